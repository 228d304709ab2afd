use log::{debug, trace};

use crate::decoding_table::DecodingTable;
use crate::encoder::ByteSink;
use crate::error::{Error, Result};
use crate::huffman::Code;

/// Turns packed bytes back into symbols.
///
/// Only the first `total_bits` bits of the stream are looked at; the zero
/// padding of the last byte and anything after it is never fed to the table.
pub struct BitDecoder<S> {
    table: DecodingTable,
    sink: S,
    current_code: Code,
    total_bits: u64,
    bits_decoded: u64,
    symbols_decoded: u64,
}

impl<S: ByteSink> BitDecoder<S> {
    pub fn new(table: DecodingTable, total_bits: u64, sink: S) -> Self {
        Self {
            table,
            sink,
            current_code: Code::with_capacity(8),
            total_bits,
            bits_decoded: 0,
            symbols_decoded: 0,
        }
    }

    pub fn decode_byte(&mut self, mut byte: u8) {
        let remaining = self.total_bits - self.bits_decoded;
        let bits_to_process = remaining.min(8);

        for _ in 0..bits_to_process {
            self.current_code.push(byte & 0x80 != 0);
            byte <<= 1;
            self.bits_decoded += 1;

            if let Some(symbol) = self.table.symbol_of(&self.current_code) {
                self.current_code.clear();
                self.sink.put(symbol);
                self.symbols_decoded += 1;
            }
        }
    }

    /// Feeds `bytes` until the declared bit count is reached and returns how
    /// many of them were used.
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut used = 0;
        for &byte in bytes {
            if self.is_complete() {
                break;
            }
            self.decode_byte(byte);
            used += 1;
        }
        used
    }

    pub fn is_complete(&self) -> bool {
        self.bits_decoded == self.total_bits
    }

    pub fn bits_decoded(&self) -> u64 {
        self.bits_decoded
    }

    pub fn symbols_decoded(&self) -> u64 {
        self.symbols_decoded
    }

    /// Checks that every declared bit was seen and formed whole codes.
    pub fn finish(self) -> Result<S> {
        if !self.is_complete() {
            return Err(Error::TruncatedPayload {
                expected_bits: self.total_bits,
                available_bits: self.bits_decoded,
            });
        }

        if !self.current_code.is_empty() {
            trace!("Leftover bits: {:?}", self.current_code);
            return Err(Error::DanglingBits {
                bits: self.current_code.len(),
            });
        }

        debug!(
            "Decoded {} symbols from {} bits",
            self.symbols_decoded, self.bits_decoded
        );
        Ok(self.sink)
    }
}
