//! Supporting utilities shared across the crate.
//!
//! - [`constraint`]: Numeric invariants checked once at construction.
//! - [`units`]: Temperature unit systems and conversion from kelvin.

pub mod constraint;
pub mod units;
