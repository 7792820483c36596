//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical functions used by the smoother:
//! kernel functions for distance-based weighting. These are reusable building
//! blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;
