use thiserror::Error;

use super::num::{DataType, Scalar};

pub use manager::{StorageManager, StorageUntyped};

pub mod manager;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage type error: data type {0} mismatches {1}")]
    Type(DataType, DataType),
}

/// Owned, fixed-length backing memory with typed accessors.
///
/// A storage knows nothing about shapes or strides. Every accessor is bounds checked and
/// panics on an out-of-range position.
#[derive(Debug, Clone, PartialEq)]
pub struct Storage<T> {
    data: Box<[T]>,
}

impl<T: Scalar> Storage<T> {
    #[inline]
    pub(crate) fn zeros(len: usize) -> Self {
        let data = vec![T::zero(); len].into_boxed_slice();
        Self { data }
    }

    #[inline]
    pub(crate) fn from_boxed(data: Box<[T]>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    #[inline]
    pub fn get(&self, pointer: usize) -> T {
        self.data[pointer]
    }

    #[inline]
    pub fn set(&mut self, pointer: usize, value: T) {
        self.data[pointer] = value;
    }

    /// Adds `delta` to the element at `pointer`. Integer types wrap.
    #[inline]
    pub fn inc(&mut self, pointer: usize, delta: T) {
        let value = &mut self.data[pointer];
        *value = value.accumulate(delta);
    }

    /// Writes `value` into `len` consecutive positions from `start`.
    #[inline]
    pub fn fill(&mut self, value: T, start: usize, len: usize) {
        self.data[start..start + len].fill(value);
    }

    /// Loads [`Scalar::LANES`] consecutive elements from `pointer`.
    #[inline]
    pub fn load(&self, pointer: usize) -> T::Lanes {
        T::load_lanes(&self.data[pointer..pointer + T::LANES])
    }

    /// Stores [`Scalar::LANES`] consecutive elements at `pointer`.
    #[inline]
    pub fn store(&mut self, pointer: usize, lanes: T::Lanes) {
        T::store_lanes(lanes, &mut self.data[pointer..pointer + T::LANES]);
    }

    /// Loads the elements at `pointer + indexes[k]` into lane `k`.
    ///
    /// # Panics
    /// Panics if `indexes` does not hold exactly [`Scalar::LANES`] entries.
    pub fn load_gather(&self, pointer: usize, indexes: &[usize]) -> T::Lanes {
        assert_eq!(indexes.len(), T::LANES, "gather needs one index per lane");
        let gather: Vec<T> = indexes
            .iter()
            .map(|&index| self.data[pointer + index])
            .collect();
        T::load_lanes(&gather)
    }

    /// Stores lane `k` at `pointer + indexes[k]`.
    ///
    /// # Panics
    /// Panics if `indexes` does not hold exactly [`Scalar::LANES`] entries.
    pub fn store_scatter(&mut self, pointer: usize, indexes: &[usize], lanes: T::Lanes) {
        assert_eq!(indexes.len(), T::LANES, "scatter needs one index per lane");
        for (&index, value) in indexes.iter().zip(T::lanes_to_array(lanes)) {
            self.data[pointer + index] = value;
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Views the storage as native-endian bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    #[inline]
    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.data
    }
}

impl<T: Scalar> AsRef<[T]> for Storage<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}
