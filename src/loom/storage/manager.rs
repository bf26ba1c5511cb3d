use super::{Storage, StorageError};
use crate::loom::num::{DataType, Scalar};

/// A [`Storage`] of any of the supported element types, tagged by its [`DataType`].
#[derive(Debug, Clone, PartialEq)]
pub enum StorageUntyped {
    Byte(Storage<i8>),
    Int(Storage<i32>),
    Float(Storage<f32>),
    Double(Storage<f64>),
}

macro_rules! dispatch {
    ($storage:expr, $inner:ident => $body:expr) => {
        match $storage {
            StorageUntyped::Byte($inner) => $body,
            StorageUntyped::Int($inner) => $body,
            StorageUntyped::Float($inner) => $body,
            StorageUntyped::Double($inner) => $body,
        }
    };
}

/// Re-types a storage whose element type is known to be `U` already.
fn retype<T: Scalar, U: Scalar>(storage: Storage<T>) -> Result<Storage<U>, StorageError> {
    if T::DATA_TYPE != U::DATA_TYPE {
        return Err(StorageError::Type(T::DATA_TYPE, U::DATA_TYPE));
    }
    bytemuck::allocation::try_cast_slice_box(storage.into_boxed_slice())
        .map(Storage::from_boxed)
        .map_err(|_| StorageError::Type(T::DATA_TYPE, U::DATA_TYPE))
}

impl StorageUntyped {
    #[inline]
    pub fn data_type(&self) -> DataType {
        dispatch!(self, storage => storage.data_type())
    }

    #[inline]
    pub fn len(&self) -> usize {
        dispatch!(self, storage => storage.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads one element, widened to `f64`.
    #[inline]
    pub fn get_f64(&self, pointer: usize) -> f64 {
        dispatch!(self, storage => storage.get(pointer).to_f64())
    }

    /// Converts the untyped storage to a typed one. Returns error if type mismatches.
    #[inline]
    pub fn try_into_typed<T: Scalar>(self) -> Result<Storage<T>, StorageError> {
        dispatch!(self, storage => retype(storage))
    }

    /// Converts every element to `T` with [`Scalar::cast`].
    pub fn convert<T: Scalar>(&self) -> Storage<T> {
        dispatch!(self, storage => {
            let data = storage.as_slice().iter().map(|x| x.cast::<T>()).collect();
            Storage::from_boxed(data)
        })
    }
}

impl<T: Scalar> From<Storage<T>> for StorageUntyped {
    fn from(storage: Storage<T>) -> Self {
        let retyped = match T::DATA_TYPE {
            DataType::Byte => retype::<T, i8>(storage).map(Self::Byte),
            DataType::Int => retype::<T, i32>(storage).map(Self::Int),
            DataType::Float => retype::<T, f32>(storage).map(Self::Float),
            DataType::Double => retype::<T, f64>(storage).map(Self::Double),
        };
        match retyped {
            Ok(storage) => storage,
            Err(err) => unreachable!("{err}"),
        }
    }
}

/// The single allocation point for storages.
///
/// Conversions between element types follow [`Scalar::from_f64`]: truncation toward zero,
/// never rounding or saturating to the target type.
#[derive(Debug, Default, Clone, Copy)]
pub struct StorageManager;

impl StorageManager {
    pub fn zeros_of<T: Scalar>(&self, len: usize) -> Storage<T> {
        log::trace!("allocate storage of {len} × {}", T::DATA_TYPE);
        Storage::zeros(len)
    }

    pub fn scalar_of<T: Scalar>(&self, value: T) -> Storage<T> {
        Storage::from_boxed(Box::new([value]))
    }

    pub fn from_slice_of<T: Scalar, S: Scalar>(&self, data: &[S]) -> Storage<T> {
        log::trace!("allocate storage of {} × {} from {}", data.len(), T::DATA_TYPE, S::DATA_TYPE);
        Storage::from_boxed(data.iter().map(|x| x.cast::<T>()).collect())
    }

    pub fn from_vec_of<T: Scalar>(&self, data: Vec<T>) -> Storage<T> {
        Storage::from_boxed(data.into_boxed_slice())
    }

    pub fn from_storage_of<T: Scalar>(&self, storage: &StorageUntyped) -> Storage<T> {
        log::trace!(
            "convert storage of {} × {} to {}",
            storage.len(),
            storage.data_type(),
            T::DATA_TYPE
        );
        storage.convert()
    }

    pub fn zeros(&self, r#type: DataType, len: usize) -> StorageUntyped {
        match r#type {
            DataType::Byte => self.zeros_of::<i8>(len).into(),
            DataType::Int => self.zeros_of::<i32>(len).into(),
            DataType::Float => self.zeros_of::<f32>(len).into(),
            DataType::Double => self.zeros_of::<f64>(len).into(),
        }
    }

    pub fn scalar<S: Scalar>(&self, r#type: DataType, value: S) -> StorageUntyped {
        self.from_slice(r#type, &[value])
    }

    pub fn from_slice<S: Scalar>(&self, r#type: DataType, data: &[S]) -> StorageUntyped {
        match r#type {
            DataType::Byte => self.from_slice_of::<i8, S>(data).into(),
            DataType::Int => self.from_slice_of::<i32, S>(data).into(),
            DataType::Float => self.from_slice_of::<f32, S>(data).into(),
            DataType::Double => self.from_slice_of::<f64, S>(data).into(),
        }
    }

    pub fn from_storage(&self, r#type: DataType, storage: &StorageUntyped) -> StorageUntyped {
        match r#type {
            DataType::Byte => self.from_storage_of::<i8>(storage).into(),
            DataType::Int => self.from_storage_of::<i32>(storage).into(),
            DataType::Float => self.from_storage_of::<f32>(storage).into(),
            DataType::Double => self.from_storage_of::<f64>(storage).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{StorageManager, StorageUntyped};
    use crate::loom::{num::DataType, storage::StorageError};

    #[test]
    fn test_narrowing() -> Result<(), Box<dyn Error>> {
        let manager = StorageManager;
        let doubles = manager.from_slice(DataType::Double, &[1.9f64, -1.9, 300.0]);
        let bytes = manager.from_storage(DataType::Byte, &doubles);
        assert_eq!(bytes.data_type(), DataType::Byte);
        let bytes = bytes.try_into_typed::<i8>()?;
        assert_eq!(bytes.as_slice(), &[1, -1, 44]);

        let ints = manager.from_storage_of::<i32>(&doubles);
        assert_eq!(ints.as_slice(), &[1, -1, 300]);

        let floats = manager.from_slice_of::<f32, i8>(&[-3, 4]);
        assert_eq!(floats.as_slice(), &[-3.0, 4.0]);
        Ok(())
    }

    #[test]
    fn test_untyped() -> Result<(), Box<dyn Error>> {
        let manager = StorageManager;
        let storage = manager.zeros(DataType::Float, 5);
        assert_eq!(storage.len(), 5);
        assert!(matches!(storage, StorageUntyped::Float(_)));
        assert!(matches!(
            storage.clone().try_into_typed::<f64>(),
            Err(StorageError::Type(DataType::Float, DataType::Double))
        ));
        assert_eq!(storage.try_into_typed::<f32>()?.len(), 5);

        let scalar = manager.scalar(DataType::Int, 2.5f64);
        assert_eq!(scalar.get_f64(0), 2.0);

        let typed = manager.zeros_of::<i32>(3);
        let untyped = StorageUntyped::from(typed.clone());
        assert_eq!(untyped, StorageUntyped::Int(typed));
        Ok(())
    }
}
