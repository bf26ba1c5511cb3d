//! The `loom` module provides the foundational abstractions of the strided array engine.
//! It separates *what* an array holds (typed, flat storage) from *how* it is addressed
//! (shape, strides and offset), and offers iteration protocols that walk any layout
//! without materializing index tuples per step.
//!
//! ## Key Components
//! 1. **Layout Arithmetic**:
//!    - Immutable shapes (`Shape`) and traversal orders (`Order`).
//!    - Stride layouts (`StrideLayout`) with dense constructors and view arithmetic.
//!    - Compact layouts that fold an array into contiguous or fixed-step runs.
//!
//! 2. **Storage**:
//!    - One owned buffer type per element type, behind the sealed `Scalar` trait.
//!    - Lane-wise (SIMD) loads and stores, contiguous or gathered.
//!    - A single allocation point (`StorageManager`) with JVM-compatible casts.
//!
//! 3. **Iteration**:
//!    - A pure odometer state machine for mixed-radix carry propagation.
//!    - Pointer, chunk and loop-descriptor iteration over any order.
//!
//! 4. **Tensors**:
//!    - Owned tensors and borrowed views sharing one storage.
//!    - Mutable views are unique borrows, so writes never alias.
//!
//! This module serves as the layout and storage backbone for higher-level numeric code.

pub mod iter;
pub mod layout;
pub mod num;
pub mod order;
pub mod platform;
pub mod shape;
pub mod slice;
pub mod storage;
pub mod tensor;
