//! Lossless byte stream compression with Huffman codes.
//!
//! ```
//! let data = b"abracadabra";
//! let container = huffman_coding_rust::encode(data);
//! assert_eq!(huffman_coding_rust::decode(&container).unwrap(), data);
//! ```

pub mod container;
pub mod decoder;
pub mod decoding_table;
pub mod encoder;
pub mod error;
pub mod huffman;
pub mod queue;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;

pub use container::{Header, MAGIC, decode, decode_from_stream, encode, encode_to_stream};
pub use error::{Error, Result};
pub use huffman::{
    Code, CodeTable, FreqTable, HuffmanTree, Node, Symbol, build_huffman_tree, code_table_from_tree,
    count_frequencies, entropy_from_freq,
};

/// Encodes `data` into a newly created file at `path`.
pub fn encode_file(data: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!("Writing encoded file: {}", path.display());

    let mut writer = BufWriter::new(File::create(path)?);
    encode_to_stream(data, &mut writer)
}

/// Decodes the container stored in the file at `path`.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    info!("Reading encoded file: {}", path.display());

    let mut reader = BufReader::new(File::open(path)?);
    decode_from_stream(&mut reader)
}
