//! Input/output helpers.
//!
//! - raw record snapshots (JSON) (`snapshot`)
//! - merged series exports (CSV/JSON) (`export`)

pub mod export;
pub mod snapshot;

pub use export::*;
pub use snapshot::*;
