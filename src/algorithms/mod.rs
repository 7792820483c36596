//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the core local regression algorithm: weighted least
//! squares over a kernel-weighted window, producing one fitted line per
//! (span, center) unit.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Weighted linear regression over local windows.
pub mod regression;
