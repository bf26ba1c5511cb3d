use std::marker::PhantomData;

use super::Engine;
use crate::loom::{
    layout::StrideLayout,
    num::Scalar,
    order::Order,
    shape::Shape,
    storage::{Storage, StorageUntyped},
    tensor::{Strided, StridedMut, Tensor, TensorError},
};

/// Allocates tensors of element type `T` from an [`Engine`].
#[derive(Debug, Clone, Copy)]
pub struct OfType<'a, T> {
    pub(super) engine: &'a Engine,
    pub(super) phantom: PhantomData<T>,
}

impl<T: Scalar> OfType<'_, T> {
    #[inline]
    fn dense(&self, shape: impl Into<Shape>, order: Order) -> StrideLayout {
        let order = order.resolve_fresh(self.engine.config.default_order);
        StrideLayout::dense(shape, 0, order)
    }

    /// A rank 0 tensor holding `value`.
    pub fn scalar(&self, value: T) -> Tensor<T> {
        let storage = self.engine.manager.scalar_of(value);
        Tensor::from_parts(StrideLayout::scalar(0), storage, self.engine.policy())
    }

    pub fn zeros(&self, shape: impl Into<Shape>, order: Order) -> Tensor<T> {
        let layout = self.dense(shape, order);
        log::debug!("zeros {} of {}", layout, T::DATA_TYPE);
        let storage = self.engine.manager.zeros_of(layout.size());
        Tensor::from_parts(layout, storage, self.engine.policy())
    }

    pub fn full(&self, shape: impl Into<Shape>, value: T, order: Order) -> Tensor<T> {
        let mut tensor = self.zeros(shape, order);
        let size = tensor.size();
        tensor.storage_mut().fill(value, 0, size);
        tensor
    }

    /// The `n × n` identity matrix.
    pub fn eye(&self, n: usize, order: Order) -> Tensor<T> {
        let mut tensor = self.zeros([n, n], order);
        let layout = tensor.layout().clone();
        let step = layout.stride(0) + layout.stride(1);
        for index in 0..n {
            tensor.ptr_set(layout.offset() + index * step, T::one());
        }
        tensor
    }

    /// A tensor whose elements, read in `order`, are `0, 1, 2, ..`.
    pub fn seq(&self, shape: impl Into<Shape>, order: Order) -> Tensor<T> {
        let mut tensor = self.zeros(shape, order);
        for (index, pointer) in tensor.pointer_iter(order).enumerate() {
            tensor.ptr_set(pointer, T::from_index(index));
        }
        tensor
    }

    /// A tensor of values drawn from `rng` in `order`.
    ///
    /// Floating types are uniform in `[0, 1)`; integer types cover their whole range.
    pub fn random(
        &self,
        shape: impl Into<Shape>,
        rng: &mut fastrand::Rng,
        order: Order,
    ) -> Tensor<T> {
        let mut tensor = self.zeros(shape, order);
        for pointer in tensor.pointer_iter(order) {
            tensor.ptr_set(pointer, T::random(rng));
        }
        tensor
    }

    /// Wraps an existing storage with an explicit layout.
    pub fn stride(
        &self,
        layout: StrideLayout,
        storage: Storage<T>,
    ) -> Result<Tensor<T>, TensorError> {
        Tensor::new(layout, storage, self.engine.policy())
    }

    /// Copies `data`, given in logical `order`, into a dense tensor; elements are cast to `T`.
    pub fn from_slice<S: Scalar>(
        &self,
        shape: impl Into<Shape>,
        order: Order,
        data: &[S],
    ) -> Result<Tensor<T>, TensorError> {
        let layout = self.dense(shape, order);
        if layout.size() != data.len() {
            return Err(TensorError::Create(layout, data.len()));
        }
        let storage = self.engine.manager.from_slice_of(data);
        Ok(Tensor::from_parts(layout, storage, self.engine.policy()))
    }

    /// Takes `data`, given in logical `order`, as the storage of a dense tensor.
    pub fn from_vec(
        &self,
        shape: impl Into<Shape>,
        order: Order,
        data: Vec<T>,
    ) -> Result<Tensor<T>, TensorError> {
        let layout = self.dense(shape, order);
        if layout.size() != data.len() {
            return Err(TensorError::Create(layout, data.len()));
        }
        let storage = self.engine.manager.from_vec_of(data);
        Ok(Tensor::from_parts(layout, storage, self.engine.policy()))
    }

    /// Converts a storage of any type to `T` and wraps it with `layout`.
    pub fn cast(
        &self,
        layout: StrideLayout,
        storage: &StorageUntyped,
    ) -> Result<Tensor<T>, TensorError> {
        let storage = self.engine.manager.from_storage_of(storage);
        Tensor::new(layout, storage, self.engine.policy())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use itertools::Itertools;

    use crate::{
        engine::{Engine, EngineConfig},
        loom::{
            layout::StrideLayout,
            num::DataType,
            order::Order,
            shape::Shape,
            tensor::{Strided, TensorError},
        },
    };

    #[test]
    fn test_seq_round_trip() -> Result<(), Box<dyn Error>> {
        let engine = Engine::default();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let rank = rng.usize(0..=4);
            let dims = (0..rank).map(|_| rng.usize(1..=5)).collect_vec();
            for order in [Order::C, Order::F] {
                let tensor = engine.of::<f64>().seq(dims.clone(), order);
                let values = tensor
                    .pointer_iter(order)
                    .map(|pointer| tensor.ptr_get(pointer))
                    .collect_vec();
                let expected = (0..tensor.size()).map(|x| x as f64).collect_vec();
                assert_eq!(values, expected, "{dims:?} {order}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_default_order() -> Result<(), Box<dyn Error>> {
        let engine = Engine::new(EngineConfig {
            default_order: Order::F,
            ..Default::default()
        })?;
        let tensor = engine.of::<i32>().seq([2, 3], Order::Default);
        assert!(tensor.layout().is_f_dense());
        assert_eq!(tensor.get(&[1, 0]), 1);
        assert_eq!(tensor.get(&[0, 1]), 2);

        let tensor = engine.of::<i32>().zeros([2, 3], Order::A);
        assert!(tensor.layout().is_c_dense());
        Ok(())
    }

    #[test]
    fn test_constructors() -> Result<(), Box<dyn Error>> {
        let engine = Engine::default();
        let of = engine.of::<f32>();

        let scalar = of.scalar(2.5);
        assert_eq!(scalar.shape(), &Shape::scalar());
        assert_eq!(scalar.to_vec(Order::C), vec![2.5]);

        let full = of.full([2, 2], 3.0, Order::F);
        assert_eq!(full.to_vec(Order::C), vec![3.0; 4]);

        let eye = of.eye(3, Order::C);
        for (i, j) in itertools::iproduct!(0..3, 0..3) {
            assert_eq!(eye.get(&[i, j]), if i == j { 1.0 } else { 0.0 });
        }
        assert_eq!(of.eye(0, Order::C).size(), 0);

        let tensor = of.from_slice([2, 2], Order::F, &[1i32, 2, 3, 4])?;
        assert_eq!(tensor.get(&[0, 1]), 3.0);
        assert!(matches!(
            of.from_slice([2, 2], Order::C, &[1.0f64]),
            Err(TensorError::Create(_, 1))
        ));

        let tensor = of.from_vec([3], Order::C, vec![1.0, 2.0, 3.0])?;
        assert_eq!(tensor.sum(), 6.0);
        Ok(())
    }

    #[test]
    fn test_random() {
        let engine = Engine::default();
        let mut rng = fastrand::Rng::with_seed(1);
        let x = engine.of::<f64>().random([4, 5], &mut rng, Order::C);
        assert!(x.to_vec(Order::C).iter().all(|x| (0.0..1.0).contains(x)));

        let mut rng = fastrand::Rng::with_seed(1);
        let y = engine.of::<f64>().random([4, 5], &mut rng, Order::F);
        assert_eq!(x.to_vec(Order::C), y.to_vec(Order::F));
        assert_eq!(x.storage(), y.storage());
    }

    #[test]
    fn test_cast() -> Result<(), Box<dyn Error>> {
        let engine = Engine::default();
        let doubles = engine.manager().from_slice(DataType::Double, &[1.9f64, -1.9, 300.0]);
        let bytes = engine
            .of::<i8>()
            .cast(StrideLayout::dense([3], 0, Order::C), &doubles)?;
        assert_eq!(bytes.to_vec(Order::C), vec![1, -1, 44]);

        let storage = engine.manager().zeros_of::<i8>(2);
        assert!(engine.of::<i8>().stride(StrideLayout::dense([3], 0, Order::C), storage).is_err());
        Ok(())
    }
}
