use super::Engine;
use crate::loom::{
    num::Scalar,
    order::Order,
    slice::Slice,
    tensor::{Strided, StridedMut, Tensor, TensorError},
};

impl Engine {
    /// Joins `tensors` along an existing `axis`, copying in the default order.
    pub fn concat<T: Scalar>(
        &self,
        axis: usize,
        tensors: &[impl Strided<T>],
    ) -> Result<Tensor<T>, TensorError> {
        self.concat_with(Order::Default, axis, tensors)
    }

    /// Joins `tensors` along an existing `axis`.
    ///
    /// Every input must match the first one on all other axes. All inputs are checked before
    /// the output is allocated, then each one is copied into its own narrowed region of the
    /// output in caller order.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub fn concat_with<T: Scalar>(
        &self,
        order: Order,
        axis: usize,
        tensors: &[impl Strided<T>],
    ) -> Result<Tensor<T>, TensorError> {
        let first = tensors.first().ok_or(TensorError::Empty)?;
        if axis >= first.rank() {
            return Err(TensorError::Axis(axis, first.rank()));
        }
        for (index, tensor) in tensors.iter().enumerate().skip(1) {
            if !first.layout().is_compatible_along(tensor.layout(), axis) {
                let shape = tensor.shape().clone();
                return Err(TensorError::Concat(index, shape, first.shape().clone(), axis));
            }
        }

        let mut dims = first.shape().to_vec();
        dims[axis] = tensors.iter().map(|tensor| tensor.shape().dim(axis)).sum();
        let order = order.resolve_fresh(self.config.default_order);
        let mut output = self.of::<T>().zeros(dims, order);
        log::debug!("concat {} tensors along axis {axis} into {}", tensors.len(), output.shape());

        let mut start = 0;
        for tensor in tensors {
            let end = start + tensor.shape().dim(axis);
            log::trace!("copy {} into {start}..{end}", tensor.shape());
            output.narrow_mut(axis, start, end)?.copy_from_with(order, tensor)?;
            start = end;
        }
        Ok(output)
    }

    /// Joins `tensors` along a new `axis`, copying in the default order.
    pub fn stack<T: Scalar>(
        &self,
        axis: usize,
        tensors: &[impl Strided<T>],
    ) -> Result<Tensor<T>, TensorError> {
        self.stack_with(Order::Default, axis, tensors)
    }

    /// Joins equally shaped `tensors` along a new `axis` inserted at that position.
    ///
    /// Input `k` lands where the new axis is fixed at `k`. All inputs are checked before the
    /// output is allocated.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub fn stack_with<T: Scalar>(
        &self,
        order: Order,
        axis: usize,
        tensors: &[impl Strided<T>],
    ) -> Result<Tensor<T>, TensorError> {
        let first = tensors.first().ok_or(TensorError::Empty)?;
        if axis > first.rank() {
            return Err(TensorError::Axis(axis, first.rank() + 1));
        }
        for (index, tensor) in tensors.iter().enumerate().skip(1) {
            if tensor.shape() != first.shape() {
                let shape = tensor.shape().clone();
                return Err(TensorError::Stack(index, shape, first.shape().clone()));
            }
        }

        let rank = first.rank();
        let mut dims = first.shape().to_vec();
        dims.insert(axis, tensors.len());
        let order = order.resolve_fresh(self.config.default_order);
        let mut output = self.of::<T>().zeros(dims, order);
        log::debug!("stack {} tensors along axis {axis} into {}", tensors.len(), output.shape());

        for (index, tensor) in tensors.iter().enumerate() {
            log::trace!("copy {} into index {index}", tensor.shape());
            output
                .slice_mut(Slice::fix(rank + 1, axis, index))?
                .copy_from_with(order, tensor)?;
        }
        Ok(output)
    }
}
