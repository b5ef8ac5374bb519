//! # guardalloc-core
//!
//! Safe computation layer underneath the guardalloc allocation wrappers.
//!
//! This crate holds the overflow-checked size arithmetic and the fatal
//! failure taxonomy. It never touches an allocator; everything here is pure
//! computation over `usize` values, so the guard logic can be tested
//! exhaustively in-process.

pub mod failure;
pub mod size;

pub use failure::AllocFailure;
pub use size::{SizeOverflow, array_size, array_size_with_extra};
