pub mod engine;
pub mod loom;

pub mod prelude {
    pub use super::{
        engine::{Engine, EngineConfig, OfType},
        loom::{
            iter::{ChunkIterator, LoopDescriptor, PointerIterator},
            layout::{CompactLayout, LayoutError, StrideLayout},
            num::{DataType, Scalar},
            order::Order,
            shape::Shape,
            slice::{Axis, Slice},
            storage::{Storage, StorageManager, StorageUntyped},
            tensor::{Policy, Strided, StridedMut, Tensor, TensorError, TensorView, TensorViewMut},
        },
    };
}
