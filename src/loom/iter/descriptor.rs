use super::chunk::ChunkIterator;
use crate::loom::{layout::StrideLayout, num::Scalar, order::Order};

/// Every chunk base pointer of a layout, computed once, plus the vector bounds of one run.
///
/// Unlike [`ChunkIterator`], chunks can be visited in any order or in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopDescriptor {
    /// Base pointer of each run.
    pub offsets: Vec<usize>,
    /// Elements per run.
    pub size: usize,
    /// Distance between elements of a run.
    pub step: usize,
    /// Elements per vector.
    pub simd_len: usize,
    /// Elements of a run covered by whole vectors; the rest is handled one by one.
    pub simd_bound: usize,
}

impl LoopDescriptor {
    pub fn new(layout: &StrideLayout, order: Order, lanes: usize) -> Self {
        let chunks = ChunkIterator::new(layout, order);
        let size = chunks.loop_size();
        let step = chunks.loop_step();
        let simd_len = lanes.max(1);
        let simd_bound = size - size % simd_len;
        let offsets = chunks.collect();
        Self {
            offsets,
            size,
            step,
            simd_len,
            simd_bound,
        }
    }

    /// A descriptor vectorized with the lanes of `T`.
    #[inline]
    pub fn of<T: Scalar>(layout: &StrideLayout, order: Order) -> Self {
        Self::new(layout, order, T::LANES)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// Gather indexes of one vector inside a strided run.
    pub fn simd_indexes(&self) -> Vec<usize> {
        (0..self.simd_len).map(|lane| lane * self.step).collect()
    }

    /// Pointers of one run, starting from its base.
    pub fn run(&self, base: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).map(move |k| base + k * self.step)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use itertools::Itertools;

    use super::LoopDescriptor;
    use crate::loom::{iter::ChunkIterator, layout::StrideLayout, order::Order};

    #[test]
    fn test_offsets() -> Result<(), Box<dyn Error>> {
        let layouts = [
            StrideLayout::dense([4, 10], 0, Order::C),
            StrideLayout::dense([4, 10], 3, Order::F),
            StrideLayout::dense([4, 10, 3], 0, Order::C).narrow(1, 2, 9)?,
            StrideLayout::new([5, 3], 1, [7, 2])?,
            StrideLayout::scalar(4),
        ];
        for layout in layouts {
            for order in [Order::C, Order::F] {
                let descriptor = LoopDescriptor::of::<f32>(&layout, order);
                let chunks = ChunkIterator::new(&layout, order);
                assert_eq!(descriptor.count(), chunks.chunk_count());
                assert_eq!(descriptor.size, chunks.loop_size());
                assert_eq!(descriptor.step, chunks.loop_step());
                assert_eq!(descriptor.offsets, chunks.collect_vec(), "{layout} {order}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_simd_bound() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::dense([3, 11], 0, Order::C);
        let descriptor = LoopDescriptor::of::<f64>(&layout, Order::C);
        assert_eq!(descriptor.size, 33);
        assert_eq!(descriptor.simd_len, 4);
        assert_eq!(descriptor.simd_bound, 32);

        let layout = StrideLayout::new([10], 0, [3])?;
        let descriptor = LoopDescriptor::new(&layout, Order::C, 4);
        assert_eq!(descriptor.simd_bound, 8);
        assert_eq!(descriptor.simd_indexes(), vec![0, 3, 6, 9]);
        assert_eq!(descriptor.run(1).take(3).collect_vec(), vec![1, 4, 7]);
        Ok(())
    }
}
