//! KML ground overlay to CZML conversion.
//!
//! The pipeline has three stages:
//!
//! 1. [`kml_parser::locate`] finds the `GroundOverlay` list
//! 2. [`temporal::resolve_intervals`] derives every overlay's availability
//! 3. [`materialize::materialize`] builds one CZML rectangle per overlay
//!
//! [`pipeline`] wires them together behind a header packet.

pub mod images;
pub mod materialize;
pub mod pipeline;
pub mod temporal;

pub use images::ImageTable;
pub use materialize::{materialize, ImageSource, MaterializedOverlay};
pub use pipeline::{
    convert_document, convert_kml, convert_with_report, Conversion, ConversionReport,
    OverlayConverter,
};
pub use temporal::resolve_intervals;
