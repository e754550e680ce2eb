//! CZML (Cesium Language) packet types.
//!
//! Only the subset needed to describe time-dynamic image rectangles is
//! modelled: the document header packet and rectangle packets carrying an
//! image material.
//!
//! # Example
//!
//! ```rust
//! use czml_protocol::{CzmlDocument, DocumentPacket};
//!
//! let doc = CzmlDocument::new(DocumentPacket::new("document", "Overlays", "1.0"));
//! assert_eq!(doc.to_json().unwrap(), r#"[{"id":"document","name":"Overlays","version":"1.0"}]"#);
//! ```

pub mod packet;

pub use packet::{
    Color, CzmlDocument, DocumentPacket, ImageMaterial, Material, OverlayPacket, Packet,
    Rectangle, RectangleCoordinates,
};

/// Media types used for CZML output.
pub mod media_types {
    /// CZML is served as plain JSON.
    pub const CZML: &str = "application/json";
    /// Conventional file extension for CZML documents.
    pub const CZML_EXTENSION: &str = "czml";
}
