use std::fmt::{Debug, Display};

use bytemuck::Pod;
use derive_more::Display;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    Byte,
    Int,
    Float,
    Double,
}

impl DataType {
    /// Returns the size in bytes of one element of this data type.
    pub const fn size(self) -> usize {
        match self {
            DataType::Byte => 1,
            DataType::Int => 4,
            DataType::Float => 4,
            DataType::Double => 8,
        }
    }

    /// Returns number of elements held in one SIMD lane group of this data type.
    pub const fn lanes(self) -> usize {
        match self {
            DataType::Byte => 16,
            DataType::Int => 8,
            DataType::Float => 8,
            DataType::Double => 4,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, DataType::Float | DataType::Double)
    }
}

pub trait Zero {
    fn zero() -> Self;
}

pub trait One {
    fn one() -> Self;
}

macro_rules! impl_zero_one {
    ($ty:ty, $zero:expr, $one:expr) => {
        impl Zero for $ty {
            #[inline]
            fn zero() -> Self {
                $zero
            }
        }

        impl One for $ty {
            #[inline]
            fn one() -> Self {
                $one
            }
        }
    };
}

impl_zero_one!(i8, 0, 1);
impl_zero_one!(i32, 0, 1);
impl_zero_one!(f32, 0.0, 1.0);
impl_zero_one!(f64, 0.0, 1.0);

/// An element type a [`Storage`](super::storage::Storage) can hold.
///
/// The set is closed: `i8`, `i32`, `f32` and `f64`. Each one is paired with a fixed-width
/// SIMD vector from `wide` used by lane-wise loads and stores.
pub trait Scalar:
    Sized
    + Pod
    + Zero
    + One
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + sealed::Sealed
{
    const DATA_TYPE: DataType;
    /// Number of elements in [`Scalar::Lanes`].
    const LANES: usize;

    type Lanes: Copy + Debug + PartialEq + std::ops::Add<Output = Self::Lanes> + Send + Sync;

    /// Packs exactly [`Scalar::LANES`] elements into a vector.
    ///
    /// # Panics
    /// Panics if the slice length differs from [`Scalar::LANES`].
    fn load_lanes(slice: &[Self]) -> Self::Lanes;

    /// Unpacks a vector into exactly [`Scalar::LANES`] elements.
    ///
    /// # Panics
    /// Panics if the slice length differs from [`Scalar::LANES`].
    fn store_lanes(lanes: Self::Lanes, slice: &mut [Self]);

    fn splat(value: Self) -> Self::Lanes;

    fn lanes_to_array(lanes: Self::Lanes) -> Vec<Self>;

    /// Converts from `f64` the way a JVM primitive cast does: floating targets round to
    /// nearest, `i32` truncates toward zero and saturates (NaN becomes 0), and `i8` first
    /// converts to `i32` then keeps the low 8 bits.
    fn from_f64(value: f64) -> Self;

    /// Widens to `f64`. Exact for every scalar type.
    fn to_f64(self) -> f64;

    /// Converts a logical index, with the same cast rules as [`Scalar::from_f64`].
    #[inline]
    fn from_index(index: usize) -> Self {
        Self::from_f64(index as f64)
    }

    /// Converts between scalar types through [`Scalar::from_f64`].
    #[inline]
    fn cast<U: Scalar>(self) -> U {
        U::from_f64(self.to_f64())
    }

    /// Addition used by accumulating operations. Integer types wrap on overflow.
    fn accumulate(self, rhs: Self) -> Self;

    fn random(rng: &mut fastrand::Rng) -> Self;
}

macro_rules! impl_scalar {
    ($ty:ty, $data_type:ident, $lanes:ident, $count:literal, $from:expr, $add:expr, $random:expr) => {
        impl Scalar for $ty {
            const DATA_TYPE: DataType = DataType::$data_type;
            const LANES: usize = $count;

            type Lanes = wide::$lanes;

            #[inline]
            fn load_lanes(slice: &[Self]) -> Self::Lanes {
                let mut array = [<$ty as Zero>::zero(); $count];
                array.copy_from_slice(slice);
                wide::$lanes::new(array)
            }

            #[inline]
            fn store_lanes(lanes: Self::Lanes, slice: &mut [Self]) {
                slice.copy_from_slice(&lanes.to_array());
            }

            #[inline]
            fn splat(value: Self) -> Self::Lanes {
                wide::$lanes::splat(value)
            }

            #[inline]
            fn lanes_to_array(lanes: Self::Lanes) -> Vec<Self> {
                lanes.to_array().to_vec()
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                let f: fn(f64) -> Self = $from;
                f(value)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn accumulate(self, rhs: Self) -> Self {
                let f: fn(Self, Self) -> Self = $add;
                f(self, rhs)
            }

            #[inline]
            fn random(rng: &mut fastrand::Rng) -> Self {
                let f: fn(&mut fastrand::Rng) -> Self = $random;
                f(rng)
            }
        }
    };
}

impl_scalar!(
    i8,
    Byte,
    i8x16,
    16,
    |x| (x as i32) as i8,
    i8::wrapping_add,
    |rng| rng.i8(..)
);
impl_scalar!(
    i32,
    Int,
    i32x8,
    8,
    |x| x as i32,
    i32::wrapping_add,
    |rng| rng.i32(..)
);
impl_scalar!(
    f32,
    Float,
    f32x8,
    8,
    |x| x as f32,
    |x, y| x + y,
    |rng| rng.f32()
);
impl_scalar!(
    f64,
    Double,
    f64x4,
    4,
    |x| x,
    |x, y| x + y,
    |rng| rng.f64()
);

mod sealed {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
