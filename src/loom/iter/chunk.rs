use std::iter::FusedIterator;

use super::odometer::Odometer;
use crate::loom::{
    layout::{CompactLayout, StrideLayout},
    order::Order,
};

/// Yields the base pointer of every run of a layout.
///
/// Each run holds [`ChunkIterator::loop_size`] elements spaced [`ChunkIterator::loop_step`] apart.
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    compact: CompactLayout,
    outer: Odometer,
    position: usize,
}

impl ChunkIterator {
    pub fn new(layout: &StrideLayout, order: Order) -> Self {
        let compact = layout.compute_compact_layout(order, false);
        let outer = Odometer::start(compact.outer.dims(), compact.outer.offset());
        Self {
            compact,
            outer,
            position: 0,
        }
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.compact.chunk_count()
    }

    #[inline]
    pub fn loop_size(&self) -> usize {
        self.compact.loop_size()
    }

    #[inline]
    pub fn loop_step(&self) -> usize {
        self.compact.loop_step()
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.position < self.chunk_count()
    }

    /// Number of chunks emitted so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for ChunkIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let pointer = self.outer.pointer()?;
        let outer = std::mem::replace(&mut self.outer, Odometer::Exhausted);
        self.outer = outer.step(self.compact.outer.dims(), self.compact.outer.strides());
        self.position += 1;
        Some(pointer)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.chunk_count() - self.position;
        (len, Some(len))
    }
}

impl ExactSizeIterator for ChunkIterator {}

impl FusedIterator for ChunkIterator {}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use itertools::Itertools;

    use super::ChunkIterator;
    use crate::loom::{iter::PointerIterator, layout::StrideLayout, order::Order};

    #[test]
    fn test_dense() {
        let iter = ChunkIterator::new(&StrideLayout::dense([3, 4, 5], 2, Order::C), Order::C);
        assert_eq!(iter.chunk_count(), 1);
        assert_eq!(iter.loop_size(), 60);
        assert_eq!(iter.loop_step(), 1);
        assert_eq!(iter.collect_vec(), vec![2]);
    }

    #[test]
    fn test_runs() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::dense([3, 5], 0, Order::C).narrow(1, 1, 4)?;
        let iter = ChunkIterator::new(&layout, Order::C);
        assert_eq!((iter.chunk_count(), iter.loop_size(), iter.loop_step()), (3, 3, 1));
        assert_eq!(iter.collect_vec(), vec![1, 6, 11]);

        let iter = ChunkIterator::new(&layout, Order::F);
        assert_eq!((iter.chunk_count(), iter.loop_size(), iter.loop_step()), (3, 3, 5));
        assert_eq!(iter.collect_vec(), vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_covers_pointers() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::new([3, 2, 4], 1, [9, 1, 2])?.permute(&[2, 0, 1])?;
        for order in [Order::C, Order::F, Order::A] {
            let chunks = ChunkIterator::new(&layout, order);
            let (size, step) = (chunks.loop_size(), chunks.loop_step());
            let pointers = chunks
                .flat_map(|base| (0..size).map(move |k| base + k * step))
                .collect_vec();
            assert_eq!(pointers, PointerIterator::new(&layout, order).collect_vec());
        }
        Ok(())
    }

    #[test]
    fn test_degenerate() {
        let mut iter = ChunkIterator::new(&StrideLayout::scalar(3), Order::F);
        assert_eq!((iter.chunk_count(), iter.loop_size()), (1, 1));
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        let iter = ChunkIterator::new(&StrideLayout::dense([0, 4], 0, Order::C), Order::C);
        assert_eq!(iter.chunk_count(), 0);
        assert_eq!(iter.count(), 0);
    }
}
