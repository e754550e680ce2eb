//! CZML packets.

use serde::{Deserialize, Serialize};

/// RGBA color with 0-255 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub rgba: [u8; 4],
}

impl Color {
    pub const WHITE: Color = Color {
        rgba: [255, 255, 255, 255],
    };

    pub fn new(rgba: [u8; 4]) -> Self {
        Self { rgba }
    }
}

/// Image material of a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMaterial {
    /// URI of the image, typically a `data:` URI.
    pub image: String,
    pub repeat: [u32; 2],
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub image: ImageMaterial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleCoordinates {
    /// West, south, east, north in degrees.
    #[serde(rename = "wsenDegrees")]
    pub wsen_degrees: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub coordinates: RectangleCoordinates,
    pub material: Material,
}

/// The mandatory first packet of a CZML stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentPacket {
    pub id: String,
    pub name: String,
    pub version: String,
}

impl DocumentPacket {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A rectangle entity draped with an image for a time interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayPacket {
    pub id: String,
    pub name: String,
    /// ISO 8601 interval `begin/end`
    pub availability: String,
    pub rectangle: Rectangle,
}

impl OverlayPacket {
    pub fn wsen_degrees(&self) -> [f64; 4] {
        self.rectangle.coordinates.wsen_degrees
    }

    pub fn image(&self) -> &str {
        &self.rectangle.material.image.image
    }
}

/// Any packet of the output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Packet {
    Document(DocumentPacket),
    Overlay(OverlayPacket),
}

/// A CZML document: the header packet followed by entity packets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CzmlDocument {
    packets: Vec<Packet>,
}

impl CzmlDocument {
    pub fn new(header: DocumentPacket) -> Self {
        Self {
            packets: vec![Packet::Document(header)],
        }
    }

    pub fn push(&mut self, overlay: OverlayPacket) {
        self.packets.push(Packet::Overlay(overlay));
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn into_packets(self) -> Vec<Packet> {
        self.packets
    }

    pub fn header(&self) -> Option<&DocumentPacket> {
        match self.packets.first() {
            Some(Packet::Document(header)) => Some(header),
            _ => None,
        }
    }

    /// Entity packets in emission order, header excluded.
    pub fn overlays(&self) -> impl Iterator<Item = &OverlayPacket> {
        self.packets.iter().filter_map(|p| match p {
            Packet::Overlay(o) => Some(o),
            Packet::Document(_) => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_overlay() -> OverlayPacket {
        OverlayPacket {
            id: "overlay_1".to_string(),
            name: "Radar".to_string(),
            availability: "2021-06-01T00:00:00Z/2021-06-02T00:00:00Z".to_string(),
            rectangle: Rectangle {
                coordinates: RectangleCoordinates {
                    wsen_degrees: [-5.0, 0.0, 20.0, 10.0],
                },
                material: Material {
                    image: ImageMaterial {
                        image: "data:image/png;base64,AAAA".to_string(),
                        repeat: [1, 1],
                        color: Color::WHITE,
                    },
                },
            },
        }
    }

    #[test]
    fn test_overlay_packet_shape() {
        let value = serde_json::to_value(sample_overlay()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "overlay_1",
                "name": "Radar",
                "availability": "2021-06-01T00:00:00Z/2021-06-02T00:00:00Z",
                "rectangle": {
                    "coordinates": { "wsenDegrees": [-5.0, 0.0, 20.0, 10.0] },
                    "material": {
                        "image": {
                            "image": "data:image/png;base64,AAAA",
                            "repeat": [1, 1],
                            "color": { "rgba": [255, 255, 255, 255] }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_document_serializes_as_array() {
        let mut doc = CzmlDocument::new(DocumentPacket::new("document", "Test", "1.0"));
        doc.push(sample_overlay());

        let value = serde_json::to_value(&doc).unwrap();
        let packets = value.as_array().unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0]["id"], "document");
        assert_eq!(packets[0]["version"], "1.0");
        assert_eq!(packets[1]["id"], "overlay_1");
    }

    #[test]
    fn test_untagged_packets_read_back() {
        let mut doc = CzmlDocument::new(DocumentPacket::new("document", "Test", "1.0"));
        doc.push(sample_overlay());

        let json = doc.to_json().unwrap();
        let parsed: CzmlDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.header().map(|h| h.name.as_str()), Some("Test"));
        assert_eq!(parsed.overlays().count(), 1);
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_overlay_accessors() {
        let overlay = sample_overlay();
        assert_eq!(overlay.wsen_degrees(), [-5.0, 0.0, 20.0, 10.0]);
        assert!(overlay.image().starts_with("data:image/png"));
    }
}
