//! Building one CZML rectangle packet per overlay.
//!
//! Bounds are strict: a missing or non-numeric edge aborts the conversion.
//! Names and images are lenient and fall back to defaults.

use czml_protocol::{Color, ImageMaterial, Material, OverlayPacket, Rectangle, RectangleCoordinates};
use kml_parser::OverlayRecord;
use overlay_common::{Availability, ConversionDefaults, ConvertError, ConvertResult, LatLonBox};
use tracing::{debug, warn};

use crate::images::{data_uri, ImageTable};

/// Where an overlay's image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Uploaded image inlined under this table key.
    Inlined(String),
    /// `Icon/href` present but no uploaded file matched.
    Missing(String),
    /// Overlay has no `Icon/href`.
    Absent,
}

impl ImageSource {
    pub fn is_inlined(&self) -> bool {
        matches!(self, ImageSource::Inlined(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedOverlay {
    pub packet: OverlayPacket,
    pub image_source: ImageSource,
}

/// Build the CZML packet for the overlay at 1-based `index`.
pub fn materialize(
    overlay: &OverlayRecord,
    availability: &Availability,
    images: &ImageTable,
    index: usize,
    defaults: &ConversionDefaults,
) -> ConvertResult<OverlayPacket> {
    materialize_traced(overlay, availability, images, index, defaults).map(|m| m.packet)
}

/// Like [`materialize`], also reporting how the image was resolved.
pub fn materialize_traced(
    overlay: &OverlayRecord,
    availability: &Availability,
    images: &ImageTable,
    index: usize,
    defaults: &ConversionDefaults,
) -> ConvertResult<MaterializedOverlay> {
    let bounds = &overlay.bounds;
    let bbox = LatLonBox::parse(
        bounds.north.as_deref(),
        bounds.south.as_deref(),
        bounds.east.as_deref(),
        bounds.west.as_deref(),
    )
    .map_err(|source| ConvertError::InvalidBounds {
        overlay: index,
        source,
    })?;

    let name = overlay
        .name
        .clone()
        .unwrap_or_else(|| format!("Overlay {}", index));
    debug!(overlay = index, name = %name, "Processing GroundOverlay");

    let (image, image_source) = resolve_image(overlay, images, index, defaults);

    let packet = OverlayPacket {
        id: format!("overlay_{}", index),
        name,
        availability: availability.interval(),
        rectangle: Rectangle {
            coordinates: RectangleCoordinates {
                wsen_degrees: bbox.wsen_degrees(),
            },
            material: Material {
                image: ImageMaterial {
                    image,
                    repeat: defaults.repeat,
                    color: Color::new(defaults.color_rgba),
                },
            },
        },
    };

    Ok(MaterializedOverlay {
        packet,
        image_source,
    })
}

fn resolve_image(
    overlay: &OverlayRecord,
    images: &ImageTable,
    index: usize,
    defaults: &ConversionDefaults,
) -> (String, ImageSource) {
    let Some(href) = overlay.icon_href.as_deref() else {
        debug!(overlay = index, "No Icon/href, using default image");
        return (defaults.default_image.clone(), ImageSource::Absent);
    };

    match images.lookup(href) {
        (key, Some(bytes)) => {
            debug!(overlay = index, image = %key, size = bytes.len(), "Encoding image");
            (
                data_uri(key, bytes, &defaults.image_media_type),
                ImageSource::Inlined(key.to_string()),
            )
        }
        (key, None) => {
            warn!(overlay = index, href = %href, key = %key, "Image file not uploaded, using default image");
            (defaults.default_image.clone(), ImageSource::Missing(key.to_string()))
        }
    }
}
