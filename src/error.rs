use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid magic {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("header truncated while reading {0}")]
    TruncatedHeader(&'static str),

    #[error("code table record for byte {symbol:#04x} holds bit value {value}, expected 0 or 1")]
    InvalidCodeBit { symbol: u8, value: u8 },

    #[error("bytes {first:#04x} and {second:#04x} share the same code")]
    DuplicateCode { first: u8, second: u8 },

    #[error("payload truncated: header declares {expected_bits} bits, only {available_bits} available")]
    TruncatedPayload {
        expected_bits: u64,
        available_bits: u64,
    },

    #[error("payload ends with {bits} bits that do not form a complete code")]
    DanglingBits { bits: usize },

    // building a tree from nothing is undefined
    #[error("no data to build a huffman tree from")]
    NoData,
}
