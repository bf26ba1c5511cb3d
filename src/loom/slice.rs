use std::{
    ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo},
    sync::Arc,
};

use casey::snake;
use derive_more::{Deref, DerefMut, Display, From, Into};
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A selector on one axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Keeps the whole axis.
    #[default]
    #[display("..")]
    Full,
    /// Fixes the axis at one index and drops it.
    #[display("{_0}")]
    One(usize),
    /// Keeps `start..end` of the axis.
    #[display("{_0}..{_1}")]
    Range(usize, usize),
    /// Keeps `start..` of the axis; resolved against the axis size.
    #[display("{_0}..")]
    From(usize),
}

impl From<usize> for Axis {
    #[inline]
    fn from(value: usize) -> Self {
        Self::One(value)
    }
}

impl From<RangeFull> for Axis {
    #[inline]
    fn from(_: RangeFull) -> Self {
        Self::Full
    }
}

impl From<Range<usize>> for Axis {
    #[inline]
    fn from(value: Range<usize>) -> Self {
        Self::Range(value.start, value.end)
    }
}

impl From<RangeInclusive<usize>> for Axis {
    #[inline]
    fn from(value: RangeInclusive<usize>) -> Self {
        Self::Range(*value.start(), value.end() + 1)
    }
}

impl From<RangeTo<usize>> for Axis {
    #[inline]
    fn from(value: RangeTo<usize>) -> Self {
        Self::Range(0, value.end)
    }
}

impl From<RangeFrom<usize>> for Axis {
    #[inline]
    fn from(value: RangeFrom<usize>) -> Self {
        Self::From(value.start)
    }
}

impl Axis {
    /// Replaces open ranges with closed ones for an axis of size `dim`.
    #[inline]
    pub fn bound(self, dim: usize) -> Self {
        match self {
            Axis::From(start) => Axis::Range(start, dim.max(start)),
            axis => axis,
        }
    }
}

/// One [`Axis`] selector per dimension of a layout.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deref, DerefMut, From, Into, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("[{}]", _0.iter().format(", "))]
pub struct Slice(Arc<[Axis]>);

impl From<Vec<Axis>> for Slice {
    #[inline]
    fn from(value: Vec<Axis>) -> Self {
        Self(value.into())
    }
}

macro_rules! impl_slice_from {
    ($t:ident) => {
        impl<$t: Into<Axis>> From<$t> for Slice {
            #[inline]
            fn from(snake!($t): $t) -> Self {
                Self([snake!($t).into()].into())
            }
        }
    };
    ($($t:ident),+) => {
        impl<$($t),+> From<($($t),+)> for Slice
        where
            $($t: Into<Axis>),+
        {
            #[inline]
            fn from(($(snake!($t)),+): ($($t),+)) -> Self {
                Self([$(snake!($t).into()),+].into())
            }
        }
    };
}

impl_slice_from!(T0);
impl_slice_from!(T0, T1);
impl_slice_from!(T0, T1, T2);
impl_slice_from!(T0, T1, T2, T3);
impl_slice_from!(T0, T1, T2, T3, T4);
impl_slice_from!(T0, T1, T2, T3, T4, T5);
impl_slice_from!(T0, T1, T2, T3, T4, T5, T6);
impl_slice_from!(T0, T1, T2, T3, T4, T5, T6, T7);

impl Slice {
    /// Creates a slice fixing `axis` at `index` and keeping every other axis.
    #[inline]
    pub fn fix(rank: usize, axis: usize, index: usize) -> Self {
        let mut axes = vec![Axis::Full; rank];
        axes[axis] = Axis::One(index);
        Self::from(axes)
    }
}
