use itertools::Itertools;
use thiserror::Error;

use super::{
    iter::{ChunkIterator, LoopDescriptor, PointerIterator},
    layout::{LayoutError, StrideLayout},
    num::{DataType, Scalar},
    order::Order,
    platform,
    shape::Shape,
    slice::Slice,
    storage::{Storage, StorageError, StorageManager, StorageUntyped},
};

#[derive(Debug, Error)]
pub enum TensorError {
    #[error("tensor creation error: layout {0} does not fit storage of length {1}")]
    Create(StrideLayout, usize),
    #[error("tensor shape error: shape {0} does not match shape {1}")]
    Shape(Shape, Shape),
    #[error("tensor empty error: no input tensors")]
    Empty,
    #[error("tensor axis error: axis {0} is out of range for rank {1}")]
    Axis(usize, usize),
    #[error("tensor concat error: input {0} of shape {1} differs from {2} off axis {3}")]
    Concat(usize, Shape, Shape, usize),
    #[error("tensor stack error: input {0} of shape {1} does not equal shape {2}")]
    Stack(usize, Shape, Shape),
    #[error("tensor reshape error: shape {0}'s size does not match shape {1}'s")]
    Reshape(Shape, Shape),
    #[error("tensor chunk error: chunk size along axis {0} must be positive")]
    Chunk(usize),
    #[error("tensor order error: default order must be C or F, not {0}")]
    Order(Order),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Traversal settings a tensor inherits from the engine that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// What [`Order::Default`] means for this tensor; C or F.
    pub order: Order,
    /// Whether chunk-wise reductions may run in parallel.
    pub parallel: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            order: Order::C,
            parallel: true,
        }
    }
}

fn check_bounds(layout: &StrideLayout, len: usize) -> Result<(), TensorError> {
    match layout.max_pointer() {
        Some(pointer) if pointer >= len => Err(TensorError::Create(layout.clone(), len)),
        _ => Ok(()),
    }
}

/// Read access to a layout over a storage.
pub trait Strided<T: Scalar> {
    fn layout(&self) -> &StrideLayout;

    fn storage(&self) -> &Storage<T>;

    fn policy(&self) -> Policy;

    #[inline]
    fn shape(&self) -> &Shape {
        self.layout().shape()
    }

    #[inline]
    fn dtype(&self) -> DataType {
        T::DATA_TYPE
    }

    #[inline]
    fn size(&self) -> usize {
        self.layout().size()
    }

    #[inline]
    fn rank(&self) -> usize {
        self.layout().rank()
    }

    /// Resolves `order` into C or F for this tensor.
    #[inline]
    fn resolve(&self, order: Order) -> Order {
        order.resolve(self.layout(), self.policy().order)
    }

    #[inline]
    fn ptr_get(&self, pointer: usize) -> T {
        self.storage().get(pointer)
    }

    #[inline]
    fn get(&self, index: &[usize]) -> T {
        self.storage().get(self.layout().pointer(index))
    }

    #[inline]
    fn pointer_iter(&self, order: Order) -> PointerIterator {
        PointerIterator::new(self.layout(), self.resolve(order))
    }

    #[inline]
    fn chunk_iter(&self, order: Order) -> ChunkIterator {
        ChunkIterator::new(self.layout(), self.resolve(order))
    }

    #[inline]
    fn loop_descriptor(&self, order: Order) -> LoopDescriptor {
        LoopDescriptor::of::<T>(self.layout(), self.resolve(order))
    }

    /// Elements in logical `order`.
    fn to_vec(&self, order: Order) -> Vec<T> {
        let storage = self.storage();
        self.pointer_iter(order)
            .map(|pointer| storage.get(pointer))
            .collect()
    }

    /// Copies into a fresh dense tensor laid out in `order`.
    fn copy(&self, order: Order) -> Tensor<T> {
        let order = self.resolve(order);
        let layout = StrideLayout::dense(self.shape().clone(), 0, order);
        let storage = StorageManager.from_vec_of(self.to_vec(order));
        Tensor::from_parts(layout, storage, self.policy())
    }

    /// Sum of all elements. Integer types wrap on overflow.
    ///
    /// Each run is summed with vector lanes, gathering when the run is strided. Partial sums
    /// are added in run order, so the result does not depend on [`Policy::parallel`].
    fn sum(&self) -> T {
        let descriptor = self.loop_descriptor(Order::A);
        let storage = self.storage();
        let indexes = descriptor.simd_indexes();
        let sum_run = |base: usize| {
            let mut lanes = T::splat(T::zero());
            for k in (0..descriptor.simd_bound).step_by(descriptor.simd_len) {
                let pointer = base + k * descriptor.step;
                lanes = lanes
                    + match descriptor.step {
                        1 => storage.load(pointer),
                        _ => storage.load_gather(pointer, &indexes),
                    };
            }
            let head = T::lanes_to_array(lanes)
                .into_iter()
                .fold(T::zero(), T::accumulate);
            (descriptor.simd_bound..descriptor.size)
                .map(|k| storage.get(base + k * descriptor.step))
                .fold(head, T::accumulate)
        };
        platform::map_chunks(&descriptor.offsets, self.policy().parallel, sum_run)
            .into_iter()
            .fold(T::zero(), T::accumulate)
    }

    #[inline]
    fn view(&self) -> TensorView<'_, T> {
        TensorView {
            layout: self.layout().clone(),
            storage: self.storage(),
            policy: self.policy(),
        }
    }

    /// A view with another layout over the same storage.
    fn view_with(&self, layout: StrideLayout) -> Result<TensorView<'_, T>, TensorError> {
        TensorView::new(layout, self.storage(), self.policy())
    }

    fn narrow(
        &self,
        axis: usize,
        start: usize,
        end: usize,
    ) -> Result<TensorView<'_, T>, TensorError> {
        self.view_with(self.layout().narrow(axis, start, end)?)
    }

    /// Cuts `axis` into consecutive views, each starting at one of `indexes` and ending at the
    /// next one or at the end of the axis.
    fn split(&self, axis: usize, indexes: &[usize]) -> Result<Vec<TensorView<'_, T>>, TensorError> {
        if axis >= self.rank() {
            return Err(TensorError::Axis(axis, self.rank()));
        }
        let dim = self.shape().dim(axis);
        indexes
            .iter()
            .copied()
            .chain([dim])
            .tuple_windows()
            .map(|(start, end)| self.narrow(axis, start, end))
            .collect()
    }

    /// Cuts `axis` into views of `size` elements; the last one may be shorter.
    fn chunks(&self, axis: usize, size: usize) -> Result<Vec<TensorView<'_, T>>, TensorError> {
        if axis >= self.rank() {
            return Err(TensorError::Axis(axis, self.rank()));
        }
        if size == 0 {
            return Err(TensorError::Chunk(axis));
        }
        let indexes = (0..self.shape().dim(axis)).step_by(size).collect_vec();
        self.split(axis, &indexes)
    }

    fn slice(&self, slice: impl Into<Slice>) -> Result<TensorView<'_, T>, TensorError> {
        self.view_with(self.layout().slice(&slice.into())?)
    }

    fn squeeze(&self) -> TensorView<'_, T> {
        TensorView {
            layout: self.layout().squeeze(),
            storage: self.storage(),
            policy: self.policy(),
        }
    }

    fn squeeze_axis(&self, axis: usize) -> Result<TensorView<'_, T>, TensorError> {
        self.view_with(self.layout().squeeze_axis(axis)?)
    }

    fn unsqueeze(&self, axis: usize) -> Result<TensorView<'_, T>, TensorError> {
        self.view_with(self.layout().unsqueeze(axis)?)
    }

    fn permute(&self, axes: &[usize]) -> Result<TensorView<'_, T>, TensorError> {
        self.view_with(self.layout().permute(axes)?)
    }

    fn swap_axis(&self, x: usize, y: usize) -> Result<TensorView<'_, T>, TensorError> {
        self.view_with(self.layout().swap_axis(x, y)?)
    }

    fn move_axis(&self, src: usize, dst: usize) -> Result<TensorView<'_, T>, TensorError> {
        self.view_with(self.layout().move_axis(src, dst)?)
    }

    /// Views the same elements under another shape, pairing them in `order`.
    ///
    /// Fails with a layout error if the elements are not one run in that order; use
    /// [`Tensor::into_shape`] or [`Strided::copy`] to reshape those.
    fn reshape(
        &self,
        shape: impl Into<Shape>,
        order: Order,
    ) -> Result<TensorView<'_, T>, TensorError> {
        let shape = shape.into();
        if shape.size() != self.size() {
            return Err(TensorError::Reshape(self.shape().clone(), shape));
        }
        self.view_with(self.layout().reshape(shape, self.resolve(order))?)
    }

    /// A rank 1 view of all elements in `order`, if they form a single run.
    fn ravel(&self, order: Order) -> Result<TensorView<'_, T>, TensorError> {
        self.reshape([self.size()], order)
    }

    /// Copies all elements in `order` into a fresh rank 1 tensor.
    fn flatten(&self, order: Order) -> Tensor<T> {
        let layout = StrideLayout::dense([self.size()], 0, Order::C);
        let storage = StorageManager.from_vec_of(self.to_vec(order));
        Tensor::from_parts(layout, storage, self.policy())
    }

    /// Swaps the two axes of a matrix.
    fn transpose(&self) -> Result<TensorView<'_, T>, TensorError> {
        match self.rank() {
            2 => self.swap_axis(0, 1),
            rank => Err(TensorError::Axis(1, rank)),
        }
    }
}

/// Write access to a layout over a storage.
///
/// Mutable views borrow their storage uniquely, so two of them can never write the same
/// storage at once.
pub trait StridedMut<T: Scalar>: Strided<T> {
    fn storage_mut(&mut self) -> &mut Storage<T>;

    #[inline]
    fn ptr_set(&mut self, pointer: usize, value: T) {
        self.storage_mut().set(pointer, value);
    }

    #[inline]
    fn ptr_inc(&mut self, pointer: usize, delta: T) {
        self.storage_mut().inc(pointer, delta);
    }

    #[inline]
    fn set(&mut self, index: &[usize], value: T) {
        let pointer = self.layout().pointer(index);
        self.storage_mut().set(pointer, value);
    }

    #[inline]
    fn inc(&mut self, index: &[usize], delta: T) {
        let pointer = self.layout().pointer(index);
        self.storage_mut().inc(pointer, delta);
    }

    /// Writes `value` into every element of the layout.
    fn fill(&mut self, value: T) {
        let chunks = self.chunk_iter(Order::A);
        let (size, step) = (chunks.loop_size(), chunks.loop_step());
        let storage = self.storage_mut();
        for base in chunks {
            match step {
                1 => storage.fill(value, base, size),
                _ => (0..size).for_each(|k| storage.set(base + k * step, value)),
            }
        }
    }

    /// Copies `source` element by element, pairing both sides in the default order.
    fn copy_from(&mut self, source: &impl Strided<T>) -> Result<(), TensorError> {
        self.copy_from_with(Order::Default, source)
    }

    /// Copies `source` element by element, pairing both sides in `order`.
    fn copy_from_with(
        &mut self,
        order: Order,
        source: &impl Strided<T>,
    ) -> Result<(), TensorError> {
        if self.shape() != source.shape() {
            return Err(TensorError::Shape(self.shape().clone(), source.shape().clone()));
        }
        let order = self.resolve(order);
        let targets = self.pointer_iter(order);
        let sources = source.pointer_iter(order);
        let storage = self.storage_mut();
        for (target, pointer) in targets.zip(sources) {
            storage.set(target, source.ptr_get(pointer));
        }
        Ok(())
    }

    #[inline]
    fn view_mut(&mut self) -> TensorViewMut<'_, T> {
        let layout = self.layout().clone();
        let policy = self.policy();
        TensorViewMut {
            layout,
            storage: self.storage_mut(),
            policy,
        }
    }

    /// A mutable view with another layout over the same storage.
    fn view_mut_with(&mut self, layout: StrideLayout) -> Result<TensorViewMut<'_, T>, TensorError> {
        let policy = self.policy();
        TensorViewMut::new(layout, self.storage_mut(), policy)
    }

    fn narrow_mut(
        &mut self,
        axis: usize,
        start: usize,
        end: usize,
    ) -> Result<TensorViewMut<'_, T>, TensorError> {
        let layout = self.layout().narrow(axis, start, end)?;
        self.view_mut_with(layout)
    }

    fn slice_mut(&mut self, slice: impl Into<Slice>) -> Result<TensorViewMut<'_, T>, TensorError> {
        let layout = self.layout().slice(&slice.into())?;
        self.view_mut_with(layout)
    }

    fn squeeze_axis_mut(&mut self, axis: usize) -> Result<TensorViewMut<'_, T>, TensorError> {
        let layout = self.layout().squeeze_axis(axis)?;
        self.view_mut_with(layout)
    }
}

/// A tensor owning its storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    layout: StrideLayout,
    storage: Storage<T>,
    policy: Policy,
}

impl<T: Scalar> Tensor<T> {
    /// Creates a tensor, checking that the layout stays inside the storage.
    pub fn new(
        layout: StrideLayout,
        storage: Storage<T>,
        policy: Policy,
    ) -> Result<Self, TensorError> {
        check_bounds(&layout, storage.len())?;
        Ok(Self {
            layout,
            storage,
            policy,
        })
    }

    #[inline]
    pub(crate) fn from_parts(layout: StrideLayout, storage: Storage<T>, policy: Policy) -> Self {
        debug_assert!(check_bounds(&layout, storage.len()).is_ok());
        Self {
            layout,
            storage,
            policy,
        }
    }

    /// Creates a tensor from a storage of any type. Returns error if type mismatches.
    pub fn from_untyped(
        layout: StrideLayout,
        storage: StorageUntyped,
        policy: Policy,
    ) -> Result<Self, TensorError> {
        Self::new(layout, storage.try_into_typed()?, policy)
    }

    #[inline]
    pub fn into_storage(self) -> Storage<T> {
        self.storage
    }

    #[inline]
    pub fn into_untyped(self) -> StorageUntyped {
        self.storage.into()
    }

    /// Reshapes the tensor, leaving the storage untouched when the elements form a single run
    /// in `order` and copying them into a dense layout otherwise.
    pub fn into_shape(self, shape: impl Into<Shape>, order: Order) -> Result<Self, TensorError> {
        let shape = shape.into();
        if shape.size() != self.size() {
            return Err(TensorError::Reshape(self.shape().clone(), shape));
        }
        let order = self.resolve(order);
        match self.layout.reshape(shape.clone(), order) {
            Ok(layout) => Ok(Self { layout, ..self }),
            Err(_) => {
                log::trace!("copy {} to reshape into {shape}", self.layout);
                let layout = StrideLayout::dense(shape, 0, order);
                let storage = StorageManager.from_vec_of(self.to_vec(order));
                Ok(Self::from_parts(layout, storage, self.policy))
            }
        }
    }
}

impl<T: Scalar> Strided<T> for Tensor<T> {
    #[inline]
    fn layout(&self) -> &StrideLayout {
        &self.layout
    }

    #[inline]
    fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    #[inline]
    fn policy(&self) -> Policy {
        self.policy
    }
}

impl<T: Scalar> StridedMut<T> for Tensor<T> {
    #[inline]
    fn storage_mut(&mut self) -> &mut Storage<T> {
        &mut self.storage
    }
}

/// A layout over a borrowed storage.
#[derive(Debug, Clone)]
pub struct TensorView<'a, T> {
    layout: StrideLayout,
    storage: &'a Storage<T>,
    policy: Policy,
}

impl<'a, T: Scalar> TensorView<'a, T> {
    pub fn new(
        layout: StrideLayout,
        storage: &'a Storage<T>,
        policy: Policy,
    ) -> Result<Self, TensorError> {
        check_bounds(&layout, storage.len())?;
        Ok(Self {
            layout,
            storage,
            policy,
        })
    }
}

impl<T: Scalar> Strided<T> for TensorView<'_, T> {
    #[inline]
    fn layout(&self) -> &StrideLayout {
        &self.layout
    }

    #[inline]
    fn storage(&self) -> &Storage<T> {
        self.storage
    }

    #[inline]
    fn policy(&self) -> Policy {
        self.policy
    }
}

/// A layout over a uniquely borrowed storage.
#[derive(Debug)]
pub struct TensorViewMut<'a, T> {
    layout: StrideLayout,
    storage: &'a mut Storage<T>,
    policy: Policy,
}

impl<'a, T: Scalar> TensorViewMut<'a, T> {
    pub fn new(
        layout: StrideLayout,
        storage: &'a mut Storage<T>,
        policy: Policy,
    ) -> Result<Self, TensorError> {
        check_bounds(&layout, storage.len())?;
        Ok(Self {
            layout,
            storage,
            policy,
        })
    }
}

impl<T: Scalar> Strided<T> for TensorViewMut<'_, T> {
    #[inline]
    fn layout(&self) -> &StrideLayout {
        &self.layout
    }

    #[inline]
    fn storage(&self) -> &Storage<T> {
        self.storage
    }

    #[inline]
    fn policy(&self) -> Policy {
        self.policy
    }
}

impl<T: Scalar> StridedMut<T> for TensorViewMut<'_, T> {
    #[inline]
    fn storage_mut(&mut self) -> &mut Storage<T> {
        self.storage
    }
}
