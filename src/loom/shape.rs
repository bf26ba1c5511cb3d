use std::sync::Arc;

use derive_more::{Deref, Display};
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{layout::LayoutError, order::Order};

/// An immutable tuple of dimension sizes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deref, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("({})", _0.iter().format(", "))]
pub struct Shape(Arc<[usize]>);

impl Shape {
    #[inline]
    pub fn new(dims: impl Into<Arc<[usize]>>) -> Self {
        Self(dims.into())
    }

    /// The rank 0 shape, holding exactly one element.
    #[inline]
    pub fn scalar() -> Self {
        Self(Arc::new([]))
    }

    /// Builds a shape from signed dimensions, rejecting negative ones.
    pub fn try_from_signed(dims: &[i64]) -> Result<Self, LayoutError> {
        let dims: Vec<usize> = dims
            .iter()
            .enumerate()
            .map(|(axis, &dim)| {
                usize::try_from(dim).map_err(|_| LayoutError::NegativeDim(axis, dim))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self::new(dims))
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Size of `axis`.
    ///
    /// # Panics
    /// Panics if `axis` is not less than the rank.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        assert!(axis < self.rank(), "axis {axis} out of range for shape {self}");
        self.0[axis]
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements, 1 for the scalar shape.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    #[inline]
    pub fn unit_dim_count(&self) -> usize {
        self.0.iter().filter(|&&dim| dim == 1).count()
    }

    /// Logical position of `index` when the shape is enumerated in `order`.
    /// [`Order::A`] and [`Order::Default`] are taken as C.
    pub fn position(&self, order: Order, index: &[usize]) -> usize {
        assert_eq!(index.len(), self.rank(), "index rank must match shape rank");
        let axes = match order {
            Order::F => (0..self.rank()).rev().collect_vec(),
            _ => (0..self.rank()).collect_vec(),
        };
        axes.into_iter().fold(0, |position, axis| {
            assert!(index[axis] < self.0[axis], "index {index:?} out of bounds for shape {self}");
            position * self.0[axis] + index[axis]
        })
    }

    /// Inverse of [`Shape::position`].
    pub fn index(&self, order: Order, mut position: usize) -> Vec<usize> {
        assert!(position < self.size(), "position {position} out of bounds for shape {self}");
        let mut index = vec![0; self.rank()];
        let axes = match order {
            Order::F => (0..self.rank()).collect_vec(),
            _ => (0..self.rank()).rev().collect_vec(),
        };
        for axis in axes {
            index[axis] = position % self.0[axis];
            position /= self.0[axis];
        }
        index
    }
}

impl From<Vec<usize>> for Shape {
    #[inline]
    fn from(value: Vec<usize>) -> Self {
        Self(value.into())
    }
}

impl From<&[usize]> for Shape {
    #[inline]
    fn from(value: &[usize]) -> Self {
        Self(value.into())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    #[inline]
    fn from(value: [usize; N]) -> Self {
        Self(value.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use itertools::Itertools;

    use super::Shape;
    use crate::loom::{layout::LayoutError, order::Order};

    #[test]
    fn test_size() {
        assert_eq!(Shape::scalar().size(), 1);
        assert_eq!(Shape::scalar().rank(), 0);
        assert_eq!(Shape::from([2, 3, 4]).size(), 24);
        assert_eq!(Shape::from([2, 0, 4]).size(), 0);
        assert_eq!(Shape::from([2, 1, 1]).unit_dim_count(), 2);
        assert_eq!(Shape::from([2, 3]).to_string(), "(2, 3)");
    }

    #[test]
    fn test_signed() -> Result<(), Box<dyn Error>> {
        assert_eq!(Shape::try_from_signed(&[2, 3])?, Shape::from([2, 3]));
        assert!(matches!(
            Shape::try_from_signed(&[2, -1]),
            Err(LayoutError::NegativeDim(1, -1))
        ));
        Ok(())
    }

    #[test]
    fn test_position() {
        let shape = Shape::from([2, 3, 4]);
        for order in [Order::C, Order::F] {
            let positions = itertools::iproduct!(0..2, 0..3, 0..4)
                .map(|(i, j, k)| shape.position(order, &[i, j, k]))
                .sorted()
                .collect_vec();
            assert_eq!(positions, (0..24).collect_vec());
            for position in 0..24 {
                let index = shape.index(order, position);
                assert_eq!(shape.position(order, &index), position);
            }
        }
        assert_eq!(shape.position(Order::C, &[1, 0, 0]), 12);
        assert_eq!(shape.position(Order::F, &[1, 0, 0]), 1);
    }
}
