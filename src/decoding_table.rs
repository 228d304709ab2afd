use std::cmp::Ordering;

use log::debug;

use crate::error::{Error, Result};
use crate::huffman::{Code, CodeTable, Symbol};

/// Orders codes bit by bit, `0` before `1`; a code sorts before every longer
/// code it is a prefix of.
pub fn compare_codes(left: &[bool], right: &[bool]) -> Ordering {
    // lexicographic slice order on bool is exactly this
    left.cmp(right)
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DecodingRecord {
    pub symbol: Symbol,
    pub code: Code,
}

/// Code table sorted by code, searched for exact matches.
#[derive(Debug, Clone, Default)]
pub struct DecodingTable {
    records: Vec<DecodingRecord>,
}

impl DecodingTable {
    /// Sorts the table by code. Two symbols sharing a code cannot be
    /// decoded and are rejected.
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut records: Vec<DecodingRecord> = table
            .iter()
            .map(|(&symbol, code)| DecodingRecord {
                symbol,
                code: code.clone(),
            })
            .collect();

        records.sort_by(|a, b| compare_codes(&a.code, &b.code));

        if let Some(pair) = records.windows(2).find(|pair| pair[0].code == pair[1].code) {
            return Err(Error::DuplicateCode {
                first: pair[0].symbol,
                second: pair[1].symbol,
            });
        }

        debug!("Decoding table built with {} entries", records.len());
        Ok(Self { records })
    }

    /// Position of the record whose code equals `bits` exactly.
    pub fn index_of(&self, bits: &[bool]) -> Option<usize> {
        let lower_bound = self
            .records
            .partition_point(|record| compare_codes(&record.code, bits) == Ordering::Less);

        self.records
            .get(lower_bound)
            .filter(|record| record.code == bits)
            .map(|_| lower_bound)
    }

    pub fn at(&self, index: usize) -> &DecodingRecord {
        &self.records[index]
    }

    pub fn symbol_of(&self, bits: &[bool]) -> Option<Symbol> {
        self.index_of(bits).map(|index| self.records[index].symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecodingRecord> {
        self.records.iter()
    }
}
