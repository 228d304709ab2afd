//! Binary container holding a Huffman coded byte stream.
//!
//! | Offset | Size     | Field                                            |
//! |--------|----------|--------------------------------------------------|
//! | 0      | 4        | [`MAGIC`]                                        |
//! | 4      | 8        | total number of payload bits, big endian         |
//! | 12     | variable | 256 records: length `L`, then `L` bytes of 0 / 1 |
//! | ...    | rest     | packed payload, most significant bit first       |
//!
//! A record of length 0 means the byte does not occur in the input.

use std::io::{self, Read, Write};

use log::{debug, warn};

use crate::decoder::BitDecoder;
use crate::decoding_table::DecodingTable;
use crate::encoder::BitEncoder;
use crate::error::{Error, Result};
use crate::huffman::{
    Code, CodeTable, SYMBOL_COUNT, build_huffman_tree, code_table_from_tree, count_frequencies,
};

pub const MAGIC: [u8; 4] = [0x34, 0x89, 0x99, 0xFF];

/// Payload bytes pulled from the reader per read.
pub const READ_CHUNK_SIZE: usize = 1024;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Header {
    pub total_bits: u64,
    pub code_table: CodeTable,
}

impl Header {
    /// Size in bytes of the serialized header.
    pub fn byte_size(&self) -> usize {
        MAGIC.len()
            + std::mem::size_of::<u64>()
            + SYMBOL_COUNT
            + self.code_table.values().map(Vec::len).sum::<usize>()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_size());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&self.total_bits.to_be_bytes());

        for symbol in 0..SYMBOL_COUNT {
            match self.code_table.get(&(symbol as u8)) {
                Some(code) => {
                    // a code over 256 symbols is at most 255 bits long
                    bytes.push(code.len() as u8);
                    bytes.extend(code.iter().map(|&bit| bit as u8));
                }
                None => bytes.push(0),
            }
        }
        bytes
    }

    pub fn write(&self, write: &mut impl Write) -> Result<()> {
        let bytes = self.to_bytes();
        debug!("Writing header: {} bytes", bytes.len());
        write.write_all(&bytes)?;
        Ok(())
    }

    pub fn read(read: &mut impl Read) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_field(read, &mut magic, "magic")?;
        if magic != MAGIC {
            return Err(Error::BadMagic(magic));
        }

        let mut bit_count = [0u8; 8];
        read_field(read, &mut bit_count, "total bit count")?;
        let total_bits = u64::from_be_bytes(bit_count);

        let mut code_table = CodeTable::new();
        for symbol in 0..SYMBOL_COUNT {
            let symbol = symbol as u8;

            let mut length = [0u8; 1];
            read_field(read, &mut length, "code table record length")?;
            if length[0] == 0 {
                continue;
            }

            let mut raw_bits = vec![0u8; length[0] as usize];
            read_field(read, &mut raw_bits, "code table record bits")?;

            let code = raw_bits
                .iter()
                .map(|&value| match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(Error::InvalidCodeBit { symbol, value }),
                })
                .collect::<Result<Code>>()?;

            code_table.insert(symbol, code);
        }

        debug!(
            "Read header: {} bits of payload, {} codes",
            total_bits,
            code_table.len()
        );

        Ok(Self {
            total_bits,
            code_table,
        })
    }
}

fn read_field(read: &mut impl Read, buffer: &mut [u8], field: &'static str) -> Result<()> {
    read.read_exact(buffer).map_err(|error| match error.kind() {
        io::ErrorKind::UnexpectedEof => Error::TruncatedHeader(field),
        _ => Error::Io(error),
    })
}

/// Fills `buffer` as far as the reader allows. Returns fewer bytes than the
/// buffer holds only at the end of the stream.
fn read_chunk(read: &mut impl Read, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match read.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(count) => filled += count,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

/// Compresses `data` into a complete container.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let frequencies = count_frequencies(data);
    debug!(
        "Encoding {} bytes with {} distinct symbols",
        data.len(),
        frequencies.len()
    );

    let code_table = match build_huffman_tree(&frequencies) {
        Ok(tree) => code_table_from_tree(&tree),
        // empty input, nothing to code
        Err(_) => CodeTable::new(),
    };

    let mut encoder = BitEncoder::new(&code_table, Vec::with_capacity(data.len()));
    encoder.encode_all(data);
    let finished = encoder.finalize();

    let header = Header {
        total_bits: finished.total_bits,
        code_table,
    };

    let mut container = header.to_bytes();
    debug!(
        "Container: {} header bytes, {} payload bytes, {} payload bits",
        container.len(),
        finished.sink.len(),
        finished.total_bits
    );
    container.extend_from_slice(&finished.sink);
    container
}

pub fn encode_to_stream(data: &[u8], write: &mut impl Write) -> Result<()> {
    write.write_all(&encode(data))?;
    write.flush()?;
    Ok(())
}

pub fn decode(container: &[u8]) -> Result<Vec<u8>> {
    let mut read = container;
    decode_from_stream(&mut read)
}

pub fn decode_from_stream(read: &mut impl Read) -> Result<Vec<u8>> {
    let header = Header::read(read)?;
    let table = DecodingTable::new(&header.code_table)?;
    let mut decoder = BitDecoder::new(table, header.total_bits, Vec::new());

    let mut chunk = [0u8; READ_CHUNK_SIZE];
    while !decoder.is_complete() {
        let count = read_chunk(read, &mut chunk)?;
        let used = decoder.decode_bytes(&chunk[..count]);

        if used < count {
            warn!(
                "Ignoring {} bytes after the declared payload",
                count - used
            );
        }

        if count < READ_CHUNK_SIZE {
            break;
        }
    }

    decoder.finish()
}
