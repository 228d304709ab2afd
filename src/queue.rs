use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Min-priority queue keyed by a weight taken from each item.
///
/// Items of equal weight come out in the order they went in, so a caller
/// that pushes in a fixed order always gets the same pop sequence.
pub struct WeightQueue<T> {
    heap: BinaryHeap<HeapEntry<T>>,
    weight_of: fn(&T) -> u64,
    next_seq: u64,
}

struct HeapEntry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<T> Eq for HeapEntry<T> {}

impl<T> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for Min-Heap behavior in BinaryHeap (which is max-heap by default)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> WeightQueue<T> {
    pub fn new(weight_of: fn(&T) -> u64) -> Self {
        Self {
            heap: BinaryHeap::new(),
            weight_of,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        let weight = (self.weight_of)(&item);
        self.heap.push(HeapEntry {
            weight,
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
    }

    /// Removes the lightest item; among equal weights the earliest pushed.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Extend<T> for WeightQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
