use std::sync::Arc;

use derive_more::Display;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    order::Order,
    shape::Shape,
    slice::{Axis, Slice},
};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout shape error: dimension {1} at axis {0} is negative")]
    NegativeDim(usize, i64),
    #[error("layout stride error: rank {0} does not match stride count {1}")]
    StrideRank(usize, usize),
    #[error("layout axis error: axis {0} is out of range for rank {1}")]
    Axis(usize, usize),
    #[error("layout narrow error: range {1}..{2} is out of bounds for axis {0} of size {3}")]
    Range(usize, usize, usize, usize),
    #[error("layout permute error: {0:?} is not a permutation of {1} axes")]
    Permute(Vec<usize>, usize),
    #[error("layout squeeze error: axis {0} has size {1}, expected 1")]
    Squeeze(usize, usize),
    #[error("layout slice error: slice {1} is not compatible with shape {0}")]
    Slice(Shape, Slice),
    #[error("layout reshape error: shape {0}'s size does not match shape {1}'s")]
    Reshape(Shape, Shape),
    #[error("layout view error: layout {0} is not a single run in order {1}")]
    Run(StrideLayout, Order),
}

/// The complete addressing scheme of a tensor: a shape, a base offset and one stride per axis.
///
/// Element `[i0, .., ik]` lives at flat position `offset + i0 * stride0 + .. + ik * stridek`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("{shape}:{offset}:[{}]", strides.iter().format(", "))]
pub struct StrideLayout {
    shape: Shape,
    offset: usize,
    strides: Arc<[usize]>,
}

/// A layout folded into one inner run and the outer axes that enumerate the runs.
///
/// Outer axes are listed fastest first, so walking them with the first axis varying
/// fastest visits the runs in the order the layout was compacted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactLayout {
    /// Number of elements in one run.
    pub inner_dim: usize,
    /// Distance between consecutive elements of a run.
    pub inner_stride: usize,
    /// Layout of the run base offsets.
    pub outer: StrideLayout,
}

impl CompactLayout {
    #[inline]
    pub fn chunk_count(&self) -> usize {
        match self.inner_dim {
            0 => 0,
            _ => self.outer.size(),
        }
    }

    #[inline]
    pub fn loop_size(&self) -> usize {
        self.inner_dim
    }

    #[inline]
    pub fn loop_step(&self) -> usize {
        self.inner_stride
    }
}

impl StrideLayout {
    /// Creates a layout with explicit strides.
    pub fn new(
        shape: impl Into<Shape>,
        offset: usize,
        strides: impl Into<Arc<[usize]>>,
    ) -> Result<Self, LayoutError> {
        let shape = shape.into();
        let strides = strides.into();
        if shape.rank() != strides.len() {
            return Err(LayoutError::StrideRank(shape.rank(), strides.len()));
        }
        Ok(Self {
            shape,
            offset,
            strides,
        })
    }

    #[inline]
    fn from_parts(dims: Vec<usize>, offset: usize, strides: Vec<usize>) -> Self {
        debug_assert_eq!(dims.len(), strides.len());
        let shape = Shape::from(dims);
        let strides = strides.into();
        Self {
            shape,
            offset,
            strides,
        }
    }

    /// Creates a dense layout with canonical strides for `order`.
    /// [`Order::A`] and [`Order::Default`] produce C strides.
    pub fn dense(shape: impl Into<Shape>, offset: usize, order: Order) -> Self {
        let shape = shape.into();
        let rank = shape.rank();
        let mut strides = vec![1; rank];
        match order {
            Order::F => {
                for axis in 1..rank {
                    strides[axis] = shape.dims()[axis - 1] * strides[axis - 1];
                }
            }
            _ => {
                for axis in (0..rank.saturating_sub(1)).rev() {
                    strides[axis] = shape.dims()[axis + 1] * strides[axis + 1];
                }
            }
        }
        let strides = strides.into();
        Self {
            shape,
            offset,
            strides,
        }
    }

    /// The rank 0 layout addressing the single element at `offset`.
    #[inline]
    pub fn scalar(offset: usize) -> Self {
        Self::from_parts(vec![], offset, vec![])
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        self.shape.dim(axis)
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Stride of `axis`; 1 for the scalar layout.
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        match self.strides.len() {
            0 => 1,
            _ => self.strides[axis],
        }
    }

    /// Axes that affect addressing, i.e. those whose size is not 1.
    fn live_axes(&self) -> impl Iterator<Item = (usize, usize)> + Clone + '_ {
        self.dims()
            .iter()
            .copied()
            .zip(self.strides.iter().copied())
            .filter(|&(dim, _)| dim != 1)
    }

    /// Returns `true` if the layout is contiguous with the last axis varying fastest.
    pub fn is_c_dense(&self) -> bool {
        let axes = self.live_axes().collect_vec();
        match axes.last() {
            None => true,
            Some(&(_, stride)) => {
                stride == 1
                    && axes
                        .iter()
                        .tuple_windows()
                        .all(|(&(_, s0), &(d1, s1))| s0 == d1 * s1)
            }
        }
    }

    /// Returns `true` if the layout is contiguous with the first axis varying fastest.
    pub fn is_f_dense(&self) -> bool {
        let axes = self.live_axes().collect_vec();
        match axes.first() {
            None => true,
            Some(&(_, stride)) => {
                stride == 1
                    && axes
                        .iter()
                        .tuple_windows()
                        .all(|(&(d0, s0), &(_, s1))| s1 == d0 * s0)
            }
        }
    }

    #[inline]
    pub fn is_dense(&self) -> bool {
        self.is_c_dense() || self.is_f_dense()
    }

    /// Flat position of a multi-index.
    ///
    /// # Panics
    /// Panics if the index rank differs from the layout rank or any index is out of bounds.
    pub fn pointer(&self, index: &[usize]) -> usize {
        assert_eq!(
            index.len(),
            self.rank(),
            "index {index:?} does not match rank of layout {self}"
        );
        itertools::izip!(index, self.dims(), self.strides.iter()).fold(
            self.offset,
            |pointer, (&index, &dim, &stride)| {
                assert!(index < dim, "index {index} out of bounds for axis of size {dim}");
                pointer + index * stride
            },
        )
    }

    /// Highest flat position the layout can address, or `None` if it holds no element.
    pub fn max_pointer(&self) -> Option<usize> {
        match self.size() {
            0 => None,
            _ => Some(
                self.live_axes()
                    .fold(self.offset, |pointer, (dim, stride)| pointer + (dim - 1) * stride),
            ),
        }
    }

    /// Returns `true` if both layouts have the same rank and agree on every dimension
    /// except `axis`.
    pub fn is_compatible_along(&self, other: &StrideLayout, axis: usize) -> bool {
        self.rank() == other.rank()
            && axis < self.rank()
            && itertools::izip!(self.dims(), other.dims())
                .enumerate()
                .all(|(index, (x, y))| index == axis || x == y)
    }

    /// Folds the layout into one run and outer axes for traversal in `order`.
    ///
    /// Axes are first permuted fastest first, unit axes are dropped, and neighbours that
    /// enumerate a single progression are merged. The fastest remaining axis becomes the
    /// inner run. With `must_be_compact`, a run whose step is not 1 is rejected and every
    /// axis becomes outer with runs of length 1.
    pub fn compute_compact_layout(&self, order: Order, must_be_compact: bool) -> CompactLayout {
        let offset = self.offset;
        if self.size() == 0 {
            let outer = Self::from_parts(vec![0], offset, vec![1]);
            return CompactLayout {
                inner_dim: 0,
                inner_stride: 1,
                outer,
            };
        }

        let mut axes = self.live_axes().collect_vec();
        if order.resolve(self, Order::C) == Order::C {
            axes.reverse();
        }

        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(axes.len());
        for (dim, stride) in axes {
            match merged.last_mut() {
                Some((last_dim, last_stride)) if *last_dim * *last_stride == stride => {
                    *last_dim *= dim
                }
                _ => merged.push((dim, stride)),
            }
        }

        let ((inner_dim, inner_stride), outer) = match merged.first().copied() {
            None => ((1, 1), vec![]),
            Some((_, stride)) if must_be_compact && stride != 1 => {
                log::debug!("no unit-stride run in layout {self}, using runs of length 1");
                ((1, 1), merged)
            }
            Some(inner) => (inner, merged[1..].to_vec()),
        };
        let (dims, strides) = outer.into_iter().unzip();
        let outer = Self::from_parts(dims, offset, strides);
        CompactLayout {
            inner_dim,
            inner_stride,
            outer,
        }
    }

    fn check_axis(&self, axis: usize) -> Result<(), LayoutError> {
        match axis < self.rank() {
            true => Ok(()),
            false => Err(LayoutError::Axis(axis, self.rank())),
        }
    }

    /// Restricts `axis` to the range `start..end`, keeping the rank.
    pub fn narrow(&self, axis: usize, start: usize, end: usize) -> Result<Self, LayoutError> {
        self.check_axis(axis)?;
        let dim = self.dim(axis);
        if start > end || end > dim {
            return Err(LayoutError::Range(axis, start, end, dim));
        }
        let mut dims = self.dims().to_vec();
        dims[axis] = end - start;
        let offset = match start < dim {
            true => self.offset + start * self.strides[axis],
            false => self.offset,
        };
        Ok(Self::from_parts(dims, offset, self.strides.to_vec()))
    }

    /// Removes every axis of size 1.
    pub fn squeeze(&self) -> Self {
        let (dims, strides) = self.live_axes().unzip();
        Self::from_parts(dims, self.offset, strides)
    }

    /// Removes `axis`, which must have size 1.
    pub fn squeeze_axis(&self, axis: usize) -> Result<Self, LayoutError> {
        self.check_axis(axis)?;
        let dim = self.dim(axis);
        if dim != 1 {
            return Err(LayoutError::Squeeze(axis, dim));
        }
        let mut dims = self.dims().to_vec();
        let mut strides = self.strides.to_vec();
        dims.remove(axis);
        strides.remove(axis);
        Ok(Self::from_parts(dims, self.offset, strides))
    }

    /// Inserts an axis of size 1 before `axis`; `axis` may equal the rank.
    pub fn unsqueeze(&self, axis: usize) -> Result<Self, LayoutError> {
        if axis > self.rank() {
            return Err(LayoutError::Axis(axis, self.rank() + 1));
        }
        let stride = match axis < self.rank() {
            true => self.strides[axis] * self.dims()[axis],
            false => 1,
        };
        let mut dims = self.dims().to_vec();
        let mut strides = self.strides.to_vec();
        dims.insert(axis, 1);
        strides.insert(axis, stride);
        Ok(Self::from_parts(dims, self.offset, strides))
    }

    pub fn swap_axis(&self, x: usize, y: usize) -> Result<Self, LayoutError> {
        self.check_axis(x)?;
        self.check_axis(y)?;
        let mut dims = self.dims().to_vec();
        let mut strides = self.strides.to_vec();
        dims.swap(x, y);
        strides.swap(x, y);
        Ok(Self::from_parts(dims, self.offset, strides))
    }

    /// Moves axis `src` to position `dst`, shifting the axes in between.
    pub fn move_axis(&self, src: usize, dst: usize) -> Result<Self, LayoutError> {
        self.check_axis(src)?;
        self.check_axis(dst)?;
        let mut dims = self.dims().to_vec();
        let mut strides = self.strides.to_vec();
        let dim = dims.remove(src);
        let stride = strides.remove(src);
        dims.insert(dst, dim);
        strides.insert(dst, stride);
        Ok(Self::from_parts(dims, self.offset, strides))
    }

    /// Reorders axes so that new axis `i` is old axis `axes[i]`.
    pub fn permute(&self, axes: &[usize]) -> Result<Self, LayoutError> {
        let rank = self.rank();
        let valid = axes.len() == rank
            && axes.iter().all(|&axis| axis < rank)
            && axes.iter().all_unique();
        if !valid {
            return Err(LayoutError::Permute(axes.to_vec(), rank));
        }
        let dims = axes.iter().map(|&axis| self.dims()[axis]).collect();
        let strides = axes.iter().map(|&axis| self.strides[axis]).collect();
        Ok(Self::from_parts(dims, self.offset, strides))
    }

    /// Applies a [`Slice`]: full axes are kept, ranges narrow, single indices fix and drop
    /// the axis.
    pub fn slice(&self, slice: &Slice) -> Result<Self, LayoutError> {
        let error = || LayoutError::Slice(self.shape.clone(), slice.clone());
        if slice.len() != self.rank() {
            return Err(error());
        }
        let mut offset = self.offset;
        let mut dims = vec![];
        let mut strides = vec![];
        let axes = itertools::izip!(slice.iter(), self.dims(), self.strides.iter());
        for (&axis, &dim, &stride) in axes {
            match axis.bound(dim) {
                Axis::Full => {
                    dims.push(dim);
                    strides.push(stride);
                }
                Axis::One(index) if index < dim => offset += index * stride,
                Axis::Range(start, end) if start <= end && end <= dim => {
                    if start < dim {
                        offset += start * stride;
                    }
                    dims.push(end - start);
                    strides.push(stride);
                }
                _ => return Err(error()),
            }
        }
        Ok(Self::from_parts(dims, offset, strides))
    }

    /// Lays `shape` over the same elements without moving them.
    ///
    /// Elements are paired in `order`. This only works if the layout walks its elements as one
    /// run with a constant step in that order; otherwise the data has to be copied first.
    pub fn reshape(&self, shape: impl Into<Shape>, order: Order) -> Result<Self, LayoutError> {
        let shape = shape.into();
        if shape.size() != self.size() {
            return Err(LayoutError::Reshape(self.shape.clone(), shape));
        }
        let order = order.resolve(self, Order::C);
        let compact = self.compute_compact_layout(order, false);
        if compact.chunk_count() > 1 {
            return Err(LayoutError::Run(self.clone(), order));
        }
        let dense = Self::dense(shape, self.offset, order);
        let strides = dense
            .strides()
            .iter()
            .map(|&stride| stride * compact.inner_stride)
            .collect();
        Ok(Self::from_parts(dense.dims().to_vec(), self.offset, strides))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{LayoutError, StrideLayout};
    use crate::loom::{order::Order, shape::Shape, slice::Slice};

    #[test]
    fn test_dense() {
        let c = StrideLayout::dense([2, 3, 4], 0, Order::C);
        assert_eq!(c.strides(), &[12, 4, 1]);
        assert!(c.is_c_dense());
        assert!(!c.is_f_dense());

        let f = StrideLayout::dense([2, 3, 4], 5, Order::F);
        assert_eq!(f.strides(), &[1, 2, 6]);
        assert_eq!(f.offset(), 5);
        assert!(f.is_f_dense());

        let scalar = StrideLayout::dense(Shape::scalar(), 7, Order::C);
        assert_eq!(scalar.strides(), &[] as &[usize]);
        assert_eq!(scalar.size(), 1);
        assert_eq!(scalar.max_pointer(), Some(7));
        assert!(scalar.is_c_dense() && scalar.is_f_dense());
    }

    #[test]
    fn test_stride_rank() {
        assert!(matches!(
            StrideLayout::new([2, 3], 0, [1]),
            Err(LayoutError::StrideRank(2, 1))
        ));
    }

    #[test]
    fn test_pointer() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::new([2, 3], 10, [1, 4])?;
        assert_eq!(layout.pointer(&[0, 0]), 10);
        assert_eq!(layout.pointer(&[1, 2]), 19);
        assert_eq!(layout.max_pointer(), Some(19));
        assert_eq!(StrideLayout::dense([2, 0], 0, Order::C).max_pointer(), None);
        Ok(())
    }

    #[test]
    #[should_panic]
    fn test_pointer_out_of_bounds() {
        StrideLayout::dense([2, 3], 0, Order::C).pointer(&[2, 0]);
    }

    #[test]
    fn test_compact_dense() {
        for dims in [vec![2, 3, 4], vec![5], vec![1, 7, 1], vec![3, 1, 2, 2]] {
            let size = dims.iter().product();
            let layout = StrideLayout::dense(dims.clone(), 3, Order::C);
            let compact = layout.compute_compact_layout(Order::C, true);
            assert_eq!(compact.chunk_count(), 1, "{layout}");
            assert_eq!(compact.loop_size(), size);
            assert_eq!(compact.loop_step(), 1);
            assert_eq!(compact.outer.offset(), 3);

            let layout = StrideLayout::dense(dims, 0, Order::F);
            let compact = layout.compute_compact_layout(Order::F, true);
            assert_eq!(compact.chunk_count(), 1);
            assert_eq!(compact.loop_size(), size);
        }
    }

    #[test]
    fn test_compact_transposed() {
        // F-dense layout walked in C order: runs step over the first axis
        let layout = StrideLayout::dense([2, 3, 4], 0, Order::F);
        let compact = layout.compute_compact_layout(Order::C, false);
        assert_eq!(compact.loop_size(), 4);
        assert_eq!(compact.loop_step(), 6);
        assert_eq!(compact.chunk_count(), 6);
        assert_eq!(compact.outer.dims(), &[3, 2]);
        assert_eq!(compact.outer.strides(), &[2, 1]);

        let compact = layout.compute_compact_layout(Order::C, true);
        assert_eq!(compact.loop_size(), 1);
        assert_eq!(compact.chunk_count(), 24);
    }

    #[test]
    fn test_compact_narrowed() -> Result<(), Box<dyn Error>> {
        // rows of a narrowed C matrix stay contiguous but the matrix does not
        let layout = StrideLayout::dense([4, 6], 0, Order::C).narrow(1, 1, 4)?;
        let compact = layout.compute_compact_layout(Order::C, true);
        assert_eq!(compact.loop_size(), 3);
        assert_eq!(compact.loop_step(), 1);
        assert_eq!(compact.chunk_count(), 4);
        assert_eq!(compact.outer.offset(), 1);
        assert_eq!(compact.outer.strides(), &[6]);
        Ok(())
    }

    #[test]
    fn test_compact_degenerate() {
        let scalar = StrideLayout::scalar(4).compute_compact_layout(Order::F, true);
        assert_eq!(scalar.chunk_count(), 1);
        assert_eq!(scalar.loop_size(), 1);
        assert_eq!(scalar.outer.offset(), 4);

        let empty = StrideLayout::dense([3, 0], 0, Order::C).compute_compact_layout(Order::C, true);
        assert_eq!(empty.chunk_count(), 0);
    }

    #[test]
    fn test_views() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::dense([2, 3, 4], 0, Order::C);

        let narrow = layout.narrow(1, 1, 3)?;
        assert_eq!(narrow.dims(), &[2, 2, 4]);
        assert_eq!(narrow.offset(), 4);
        assert!(matches!(layout.narrow(1, 2, 4), Err(LayoutError::Range(1, 2, 4, 3))));
        assert!(matches!(layout.narrow(3, 0, 1), Err(LayoutError::Axis(3, 3))));

        let unsqueeze = layout.unsqueeze(1)?;
        assert_eq!(unsqueeze.dims(), &[2, 1, 3, 4]);
        assert!(unsqueeze.is_c_dense());
        assert_eq!(unsqueeze.squeeze_axis(1)?, layout);
        assert_eq!(unsqueeze.squeeze(), layout);
        assert!(matches!(layout.squeeze_axis(0), Err(LayoutError::Squeeze(0, 2))));
        assert_eq!(layout.unsqueeze(3)?.dims(), &[2, 3, 4, 1]);

        let permute = layout.permute(&[2, 0, 1])?;
        assert_eq!(permute.dims(), &[4, 2, 3]);
        assert_eq!(permute.strides(), &[1, 12, 4]);
        assert!(matches!(layout.permute(&[0, 0, 1]), Err(LayoutError::Permute(_, 3))));
        assert!(matches!(layout.permute(&[0, 1]), Err(LayoutError::Permute(_, 3))));

        let swap = layout.swap_axis(0, 2)?;
        assert_eq!(swap.strides(), &[1, 4, 12]);
        assert!(swap.is_f_dense());
        Ok(())
    }

    #[test]
    fn test_slice() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::dense([2, 3, 4], 0, Order::C);
        let slice = layout.slice(&Slice::from((1usize, .., 1usize..3)))?;
        assert_eq!(slice.dims(), &[3, 2]);
        assert_eq!(slice.strides(), &[4, 1]);
        assert_eq!(slice.offset(), 13);

        assert!(layout.slice(&Slice::from((2usize, .., ..))).is_err());
        assert!(layout.slice(&Slice::from((.., ..))).is_err());
        Ok(())
    }

    #[test]
    fn test_move_axis() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::dense([2, 3, 4, 5], 0, Order::C);
        let forward = layout.move_axis(0, 2)?;
        assert_eq!(forward.dims(), &[3, 4, 2, 5]);
        assert_eq!(forward.strides(), &[20, 5, 60, 1]);

        let backward = layout.move_axis(3, 1)?;
        assert_eq!(backward.dims(), &[2, 5, 3, 4]);
        assert_eq!(backward.strides(), &[60, 1, 20, 5]);
        assert_eq!(backward.move_axis(1, 3)?, layout);
        assert_eq!(layout.move_axis(2, 2)?, layout);
        assert!(matches!(layout.move_axis(0, 4), Err(LayoutError::Axis(4, 4))));
        Ok(())
    }

    #[test]
    fn test_reshape() -> Result<(), Box<dyn Error>> {
        let layout = StrideLayout::dense([2, 3, 4], 5, Order::C);
        let reshape = layout.reshape([6, 4], Order::C)?;
        assert_eq!(reshape, StrideLayout::dense([6, 4], 5, Order::C));
        assert_eq!(layout.reshape([24], Order::A)?.strides(), &[1]);

        // a C-dense layout is not one run in F order
        assert!(matches!(
            layout.reshape([4, 6], Order::F),
            Err(LayoutError::Run(_, Order::F))
        ));
        assert!(matches!(
            layout.reshape([5, 5], Order::C),
            Err(LayoutError::Reshape(_, _))
        ));

        // every other element of a vector is still a single run
        let every_other = StrideLayout::new([12], 1, [2])?;
        let reshape = every_other.reshape([3, 4], Order::F)?;
        assert_eq!(reshape.strides(), &[2, 6]);
        assert_eq!(reshape.offset(), 1);
        for (i, j) in itertools::iproduct!(0..3, 0..4) {
            assert_eq!(reshape.pointer(&[i, j]), every_other.pointer(&[i + 3 * j]));
        }

        // unit axes do not split the run
        let unit = StrideLayout::dense([1, 4, 1], 0, Order::F).reshape([2, 2], Order::C)?;
        assert_eq!(unit.strides(), &[2, 1]);

        let narrow = StrideLayout::dense([4, 6], 0, Order::C).narrow(1, 0, 3)?;
        assert!(narrow.reshape([12], Order::C).is_err());
        let empty = StrideLayout::dense([0, 3], 0, Order::C);
        assert_eq!(empty.reshape([3, 0], Order::C)?.size(), 0);
        assert_eq!(StrideLayout::scalar(3).reshape([1, 1], Order::C)?.offset(), 3);
        Ok(())
    }

    #[test]
    fn test_compatible() {
        let x = StrideLayout::dense([2, 3], 0, Order::C);
        let y = StrideLayout::dense([2, 5], 0, Order::F);
        assert!(x.is_compatible_along(&y, 1));
        assert!(!x.is_compatible_along(&y, 0));
        assert!(!x.is_compatible_along(&StrideLayout::dense([2, 3, 1], 0, Order::C), 1));
        assert!(!x.is_compatible_along(&y, 2));
    }
}
