//! Core functionality for arbitree property-based testing.
//!
//! This crate provides the building blocks for generating test inputs and
//! shrinking failures: shrinkable values, the distance-guided shrink search,
//! random, exhaustive and edge-case generation, and the arbitraries that
//! combine them.

pub mod arbitrary;
pub mod data;
pub mod edge_cases;
pub mod error;
pub mod exhaustive;
pub mod filtered;
pub mod gen;
pub mod property;
pub mod shrinkable;
pub mod shrinking;
pub mod string;

// Re-export the main types
pub use arbitrary::*;
pub use data::*;
pub use edge_cases::*;
pub use error::*;
pub use exhaustive::*;
pub use filtered::*;
pub use gen::*;
pub use property::*;
pub use shrinkable::*;
pub use shrinking::*;
pub use string::*;
