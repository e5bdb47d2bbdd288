//! The data-merge core.
//!
//! raw historical + raw forecast -> normalize (each set) -> carry cumulative
//! GDD -> merge/sort -> [`MergedSeries`].
//!
//! Everything here is pure and in-memory; acquisition lives in `data`.

pub mod cumulative;
pub mod merge;
pub mod normalize;

pub use cumulative::*;
pub use merge::*;
pub use normalize::*;

use crate::domain::{Origin, RawRecord};

/// Build the merged series from the two raw record sets.
///
/// Both sets are expected in date order. The historical set must be complete
/// before any forecast record is processed, since it seeds the running total.
pub fn build_series(historical: &[RawRecord], forecast: &[RawRecord]) -> MergedSeries {
    let historical = normalize_all(historical, Origin::Historical);
    let forecast = normalize_all(forecast, Origin::Forecast);
    let forecast = carry_forward(&historical, forecast);
    merge(historical, forecast)
}
