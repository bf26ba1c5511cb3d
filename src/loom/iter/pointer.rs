use std::iter::FusedIterator;

use super::odometer::Odometer;
use crate::loom::{
    layout::{CompactLayout, StrideLayout},
    order::Order,
};

/// Yields the flat pointer of every element of a layout, in logical order.
///
/// Runs found by [`StrideLayout::compute_compact_layout`] are walked by plain stride
/// addition; only run boundaries touch the outer odometer. A dense layout is therefore one
/// arithmetic progression.
#[derive(Debug, Clone)]
pub struct PointerIterator {
    compact: CompactLayout,
    outer: Odometer,
    inner: usize,
    position: usize,
    size: usize,
}

impl PointerIterator {
    pub fn new(layout: &StrideLayout, order: Order) -> Self {
        let compact = layout.compute_compact_layout(order, false);
        let outer = Odometer::start(compact.outer.dims(), compact.outer.offset());
        let size = compact.chunk_count() * compact.loop_size();
        Self {
            compact,
            outer,
            inner: 0,
            position: 0,
            size,
        }
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.position < self.size
    }

    /// Number of pointers emitted so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for PointerIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let base = self.outer.pointer()?;
        let pointer = base + self.inner * self.compact.inner_stride;

        self.position += 1;
        self.inner += 1;
        if self.inner == self.compact.inner_dim {
            self.inner = 0;
            let outer = std::mem::replace(&mut self.outer, Odometer::Exhausted);
            self.outer = outer.step(self.compact.outer.dims(), self.compact.outer.strides());
        }
        Some(pointer)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.size - self.position;
        (len, Some(len))
    }
}

impl ExactSizeIterator for PointerIterator {}

impl FusedIterator for PointerIterator {}
