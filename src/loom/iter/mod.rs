//! Traversal of strided layouts.
//!
//! All three walkers share one [`Odometer`]: [`PointerIterator`] drives it over the outer axes
//! and steps the inner run itself, [`ChunkIterator`] yields only run bases, and
//! [`LoopDescriptor`] records every run base up front.

pub mod chunk;
pub mod descriptor;
pub mod odometer;
pub mod pointer;

pub use chunk::ChunkIterator;
pub use descriptor::LoopDescriptor;
pub use odometer::Odometer;
pub use pointer::PointerIterator;
