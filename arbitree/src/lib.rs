//! arbitree property-based testing library.
//!
//! This is the main entry point for arbitree, re-exporting the arbitraries,
//! generators and shrinking machinery of `arbitree-core`.

pub use arbitree_core::*;
