//! Arithmetic utilities for pool calculations.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe
//! operations on [`Decimal`](crate::domain::Decimal) and
//! [`mul_div_floor`], the 256-bit widening helper that every truncating
//! division is built on.

mod checked;
mod mul_div;

pub use checked::CheckedArithmetic;
pub use mul_div::{U256, mul_div_floor, widening_mul};
