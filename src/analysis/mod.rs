//! Analysis modules.
//!
//! Sorting, grouping, and summary statistics over loaded result sets.

pub mod aggregator;

pub use aggregator::*;
