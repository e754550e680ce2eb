//! Constants injected into the conversion.
//!
//! Every value the converter would otherwise hardcode lives here so a host
//! (or a test) can override it. All fields default individually, so a YAML
//! file only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::time::EPOCH_DEFAULT;

/// 1x1 transparent PNG.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionDefaults {
    /// Begin instant for overlays without TimeStamp or TimeSpan/begin.
    pub default_begin: String,

    /// End instant for the last overlay when it declares none.
    /// `None` leaves the interval open (rendered as `begin/begin`).
    pub final_end: Option<String>,

    /// Image used when an overlay has no Icon or the file was not uploaded.
    pub default_image: String,

    /// Media type for inlined images whose extension is not recognized.
    pub image_media_type: String,

    /// Material color, RGBA 0-255.
    pub color_rgba: [u8; 4],

    /// Image repeat factor (x, y).
    pub repeat: [u32; 2],

    /// Header packet.
    pub document_id: String,
    pub document_name: String,
    pub czml_version: String,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            default_begin: EPOCH_DEFAULT.to_string(),
            final_end: None,
            default_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            image_media_type: "image/png".to_string(),
            color_rgba: [255, 255, 255, 255],
            repeat: [1, 1],
            document_id: "document".to_string(),
            document_name: "KML to CZML Conversion with Image Overlay".to_string(),
            czml_version: "1.0".to_string(),
        }
    }
}

impl ConversionDefaults {
    /// Close the last overlay's interval with a fixed end instant.
    pub fn with_final_end(mut self, end: impl Into<String>) -> Self {
        self.final_end = Some(end.into());
        self
    }

    pub fn with_default_image(mut self, image: impl Into<String>) -> Self {
        self.default_image = image.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::LEGACY_FINAL_END;

    #[test]
    fn test_defaults() {
        let d = ConversionDefaults::default();
        assert_eq!(d.default_begin, "2000-01-01T00:00:00Z");
        assert!(d.final_end.is_none());
        assert_eq!(d.color_rgba, [255, 255, 255, 255]);
        assert_eq!(d.repeat, [1, 1]);
        assert!(d.default_image.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_partial_yaml_override() {
        let yaml = "final_end: \"2100-01-01T00:00:00Z\"\ndocument_name: Flood extents\n";
        let d: ConversionDefaults = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(d.final_end.as_deref(), Some(LEGACY_FINAL_END));
        assert_eq!(d.document_name, "Flood extents");
        assert_eq!(d.default_begin, "2000-01-01T00:00:00Z");
        assert_eq!(d.czml_version, "1.0");
    }

    #[test]
    fn test_builders() {
        let d = ConversionDefaults::default()
            .with_final_end(LEGACY_FINAL_END)
            .with_default_image("placeholder.png");
        assert_eq!(d.final_end.as_deref(), Some(LEGACY_FINAL_END));
        assert_eq!(d.default_image, "placeholder.png");
    }
}
