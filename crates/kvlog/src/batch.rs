//! Splitting an ordered slice into store-sized chunks.

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Lazily yields consecutive sub-slices of at most `max_batch` elements.
///
/// Every chunk except possibly the last holds exactly `max_batch` elements.
/// Once exhausted, `next` keeps returning `None`; [`Batcher::reset`] restarts
/// from the first element.
#[derive(Debug, Clone)]
pub struct Batcher<'a, T> {
    items: &'a [T],
    max_batch: NonZeroUsize,
    pos: usize,
}

impl<'a, T> Batcher<'a, T> {
    pub fn new(items: &'a [T], max_batch: NonZeroUsize) -> Self {
        Self {
            items,
            max_batch,
            pos: 0,
        }
    }

    pub fn next_batch(&mut self) -> Option<&'a [T]> {
        if self.pos >= self.items.len() {
            return None;
        }
        let end = self.items.len().min(self.pos + self.max_batch.get());
        let batch = &self.items[self.pos..end];
        self.pos = end;
        Some(batch)
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }

    pub fn max_batch(&self) -> NonZeroUsize {
        self.max_batch
    }

    fn remaining_batches(&self) -> usize {
        let remaining = self.items.len().saturating_sub(self.pos);
        remaining.div_ceil(self.max_batch.get())
    }
}

impl<'a, T> Iterator for Batcher<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining_batches();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Batcher<'_, T> {}
impl<T> FusedIterator for Batcher<'_, T> {}
