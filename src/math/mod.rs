//! Numeric helpers: unit conversion and agronomic indices.

pub mod agronomy;
pub mod units;

pub use agronomy::*;
pub use units::*;
