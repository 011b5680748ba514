//! Base-3 number primitives.
//!
//! This module provides:
//! - [`Digit`] - A single ternary digit (0, 1, 2)
//! - [`format`] / [`TernaryBuf`] - Signed integers rendered as ternary text
//! - [`parse`] - Ternary text read back into an integer

mod digit;
pub mod format;

pub use digit::Digit;
pub use format::{format, parse, ParseError, TernaryBuf};
