//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw acquisition records (`RawRecord`)
//! - the tagged historical/forecast track (`Origin`, `Track`, `TrackValues`)
//! - normalized records and their external dual-slot shape (`SeriesRow`)
//! - acquisition settings (`SourceKind`, `SourceConfig`)

pub mod types;

pub use types::*;
