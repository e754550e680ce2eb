//! KML document reading for ground overlay conversion.
//!
//! Supports:
//! - Building an owned element tree from KML text (quick-xml)
//! - Extracting `GroundOverlay` records
//! - Locating overlays in the three container layouts seen in practice:
//!   `kml/Document`, `kml/Folder` and `kml/Document/Folder`

pub mod locator;
pub mod overlay;
pub mod xml;

pub use locator::{locate, DocumentShape, LocatedOverlays};
pub use overlay::{OverlayRecord, RawBounds, TimeSpan};
pub use xml::{parse_document, XmlElement, XmlNode};
