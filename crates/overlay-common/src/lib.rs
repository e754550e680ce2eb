//! Common types and utilities shared across the overlay conversion crates.

pub mod bbox;
pub mod defaults;
pub mod error;
pub mod time;

pub use bbox::{BoundsParseError, Edge, LatLonBox};
pub use defaults::{ConversionDefaults, DEFAULT_PLACEHOLDER_IMAGE};
pub use error::{ConvertError, ConvertResult};
pub use time::{normalize_iso8601, parse_instant, Availability, EPOCH_DEFAULT, LEGACY_FINAL_END};
