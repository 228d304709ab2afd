use log::debug;

use crate::huffman::{Code, CodeTable, SYMBOL_COUNT};

/// Receives packed bytes from a [`BitEncoder`] or decoded symbols from a
/// [`crate::decoder::BitDecoder`], one byte at a time.
pub trait ByteSink {
    fn put(&mut self, byte: u8);
}

impl ByteSink for Vec<u8> {
    fn put(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn put(&mut self, byte: u8) {
        (**self).put(byte);
    }
}

/// Adapts a closure into a [`ByteSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8)> ByteSink for FnSink<F> {
    fn put(&mut self, byte: u8) {
        (self.0)(byte);
    }
}

/// Packs codes most-significant-bit first into whole bytes.
pub struct BitEncoder<S> {
    codes: Vec<Code>,
    sink: S,
    current_byte: u8,
    pending_bits: u8,
    total_bits: u64,
    total_bytes: u64,
}

/// Result of [`BitEncoder::finalize`].
#[derive(Debug)]
pub struct Finished<S> {
    pub sink: S,
    pub total_bits: u64,
    pub total_bytes: u64,
}

impl<S: ByteSink> BitEncoder<S> {
    pub fn new(table: &CodeTable, sink: S) -> Self {
        let mut codes = vec![Code::new(); SYMBOL_COUNT];
        for (&byte, code) in table {
            codes[byte as usize] = code.clone();
        }

        Self {
            codes,
            sink,
            current_byte: 0,
            pending_bits: 0,
            total_bits: 0,
            total_bytes: 0,
        }
    }

    /// Appends the code of `byte`. Bytes without a code emit nothing.
    pub fn encode_byte(&mut self, byte: u8) {
        let Self {
            codes,
            sink,
            current_byte,
            pending_bits,
            total_bits,
            total_bytes,
        } = self;

        for &bit in &codes[byte as usize] {
            *current_byte |= (bit as u8) << (7 - *pending_bits);
            *pending_bits += 1;
            *total_bits += 1;

            if *pending_bits == 8 {
                sink.put(*current_byte);
                *total_bytes += 1;
                *current_byte = 0;
                *pending_bits = 0;
            }
        }
    }

    pub fn encode_all(&mut self, data: &[u8]) {
        for &byte in data {
            self.encode_byte(byte);
        }
    }

    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Flushes a partial last byte, zero padded, and hands back the sink.
    ///
    /// Consumes the encoder, so nothing can be encoded after the padding.
    pub fn finalize(mut self) -> Finished<S> {
        if self.pending_bits > 0 {
            // unused low bits of current_byte are still zero
            self.sink.put(self.current_byte);
            self.total_bytes += 1;
        }

        debug!(
            "Encoder finalized: {} bits in {} bytes",
            self.total_bits, self.total_bytes
        );

        Finished {
            sink: self.sink,
            total_bits: self.total_bits,
            total_bytes: self.total_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::{build_huffman_tree, code_table_from_tree, count_frequencies};

    fn bits(s: &str) -> Code {
        s.chars().map(|c| c == '1').collect()
    }

    fn encode(data: &[u8]) -> Finished<Vec<u8>> {
        let table = code_table_from_tree(&build_huffman_tree(&count_frequencies(data)).unwrap());
        let mut encoder = BitEncoder::new(&table, Vec::new());
        encoder.encode_all(data);
        encoder.finalize()
    }

    #[test]
    fn packs_msb_first_with_zero_padding() {
        let table = CodeTable::from([(1, bits("1")), (2, bits("01")), (3, bits("00"))]);
        let mut encoder = BitEncoder::new(&table, Vec::new());
        encoder.encode_all(&[1, 2, 3, 1]);
        assert_eq!(encoder.total_bits(), 6);
        assert_eq!(encoder.total_bytes(), 0);

        let finished = encoder.finalize();
        assert_eq!(finished.sink, vec![0b1010_0100]);
        assert_eq!(finished.total_bits, 6);
        assert_eq!(finished.total_bytes, 1);
    }

    #[test]
    fn byte_aligned_output_is_not_padded() {
        let table = CodeTable::from([(0, bits("1010")), (1, bits("0011"))]);
        let mut encoder = BitEncoder::new(&table, Vec::new());
        encoder.encode_all(&[0, 1, 1, 0]);
        assert_eq!(encoder.total_bytes(), 2);

        let finished = encoder.finalize();
        assert_eq!(finished.sink, vec![0b1010_0011, 0b0011_1010]);
        assert_eq!(finished.total_bits, 16);
        assert_eq!(finished.total_bytes, 2);
    }

    #[test]
    fn long_codes_span_byte_boundaries() {
        let table = CodeTable::from([(5, bits("110011001100"))]);
        let mut encoder = BitEncoder::new(&table, Vec::new());
        encoder.encode_byte(5);

        let finished = encoder.finalize();
        assert_eq!(finished.sink, vec![0b1100_1100, 0b1100_0000]);
        assert_eq!(finished.total_bits, 12);
    }

    #[test]
    fn closure_sink_receives_every_byte() {
        let table = CodeTable::from([(0, bits("11111111"))]);
        let mut seen = Vec::new();
        let mut encoder = BitEncoder::new(&table, FnSink(|b: u8| seen.push(b)));
        encoder.encode_all(&[0, 0, 0]);
        encoder.finalize();

        assert_eq!(seen, vec![0xFF; 3]);
    }

    #[test]
    fn borrowed_sink_keeps_output() {
        let table = CodeTable::from([(3, bits("0000000"))]);
        let mut out = vec![0xAB];
        let mut encoder = BitEncoder::new(&table, &mut out);
        encoder.encode_byte(3);
        encoder.encode_byte(3);
        encoder.finalize();

        assert_eq!(out, vec![0xAB, 0x00, 0x00]);
    }

    #[test]
    fn empty_input_emits_nothing() {
        let finished = BitEncoder::new(&CodeTable::new(), Vec::new()).finalize();
        assert!(finished.sink.is_empty());
        assert_eq!(finished.total_bits, 0);
    }

    #[test]
    fn single_symbol_takes_one_bit_per_byte() {
        let finished = encode(&[42; 20]);
        assert_eq!(finished.total_bits, 20);
        assert_eq!(finished.sink, vec![0, 0, 0]);
    }

    #[test]
    fn two_symbols_take_one_bit_each() {
        let data: Vec<u8> = std::iter::repeat([7, 200]).take(500).flatten().collect();
        let finished = encode(&data);

        assert_eq!(finished.total_bits, 1000);
        assert_eq!(finished.sink.len(), 125);
    }

    #[test]
    fn few_distinct_bytes_compress() {
        let data = [1, 2, 3, 4, 5];
        assert!(encode(&data).sink.len() < data.len());
    }
}
