//! End-to-end conversion: locate, resolve intervals, materialize.

use czml_protocol::{CzmlDocument, DocumentPacket};
use kml_parser::{locate, parse_document, DocumentShape, XmlElement};
use overlay_common::{ConversionDefaults, ConvertError, ConvertResult};
use serde::Serialize;
use tracing::info;

use crate::images::ImageTable;
use crate::materialize::{materialize_traced, ImageSource};
use crate::temporal::resolve_intervals;

/// Summary of one conversion, for logs and metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub shape: Option<DocumentShape>,
    pub overlays: usize,
    pub images_inlined: usize,
    /// Overlays whose `Icon/href` matched no uploaded file.
    pub images_missing: usize,
    /// Overlays without any `Icon/href`.
    pub images_absent: usize,
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: CzmlDocument,
    pub report: ConversionReport,
}

/// Convert a parsed KML document.
///
/// Fails with [`ConvertError::NoOverlays`] when no container layout yields
/// overlays and with [`ConvertError::InvalidBounds`] on the first overlay whose
/// bounds do not parse. No partial document is ever returned.
pub fn convert_with_report(
    root: &XmlElement,
    images: &ImageTable,
    defaults: &ConversionDefaults,
) -> ConvertResult<Conversion> {
    let located = locate(root);
    if located.is_empty() {
        return Err(ConvertError::NoOverlays);
    }
    info!(
        count = located.len(),
        shape = ?located.shape,
        images = images.len(),
        "Found GroundOverlay elements"
    );

    let intervals = resolve_intervals(&located.overlays, defaults);

    let mut document = CzmlDocument::new(DocumentPacket::new(
        defaults.document_id.clone(),
        defaults.document_name.clone(),
        defaults.czml_version.clone(),
    ));
    let mut report = ConversionReport {
        shape: located.shape,
        overlays: located.len(),
        ..Default::default()
    };

    for (i, (overlay, availability)) in located.overlays.iter().zip(&intervals).enumerate() {
        let materialized = materialize_traced(overlay, availability, images, i + 1, defaults)?;
        match materialized.image_source {
            ImageSource::Inlined(_) => report.images_inlined += 1,
            ImageSource::Missing(_) => report.images_missing += 1,
            ImageSource::Absent => report.images_absent += 1,
        }
        document.push(materialized.packet);
    }

    info!(
        overlays = report.overlays,
        images_inlined = report.images_inlined,
        images_missing = report.images_missing,
        "KML to CZML conversion completed"
    );

    Ok(Conversion { document, report })
}

/// Convert a parsed KML document into CZML.
pub fn convert_document(
    root: &XmlElement,
    images: &ImageTable,
    defaults: &ConversionDefaults,
) -> ConvertResult<CzmlDocument> {
    convert_with_report(root, images, defaults).map(|c| c.document)
}

/// Parse KML text and convert it into CZML.
pub fn convert_kml(
    kml: &str,
    images: &ImageTable,
    defaults: &ConversionDefaults,
) -> ConvertResult<CzmlDocument> {
    let root = parse_document(kml)?;
    convert_document(&root, images, defaults)
}

/// Converter bound to a fixed set of defaults.
#[derive(Debug, Clone, Default)]
pub struct OverlayConverter {
    defaults: ConversionDefaults,
}

impl OverlayConverter {
    pub fn new(defaults: ConversionDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ConversionDefaults {
        &self.defaults
    }

    pub fn convert(&self, kml: &str, images: &ImageTable) -> ConvertResult<Conversion> {
        let root = parse_document(kml)?;
        convert_with_report(&root, images, &self.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_OVERLAYS: &str = r#"<kml><Document>
        <GroundOverlay>
          <TimeStamp><when>2021-06-01T00:00:00Z</when></TimeStamp>
          <LatLonBox><north>10</north><south>0</south><east>20</east><west>-5</west></LatLonBox>
        </GroundOverlay>
        <GroundOverlay>
          <TimeSpan><begin>2021-06-02T00:00:00Z</begin></TimeSpan>
          <LatLonBox><north>10</north><south>0</south><east>20</east><west>-5</west></LatLonBox>
        </GroundOverlay>
      </Document></kml>"#;

    #[test]
    fn test_header_then_overlays() {
        let doc = convert_kml(TWO_OVERLAYS, &ImageTable::new(), &ConversionDefaults::default())
            .unwrap();

        let header = doc.header().unwrap();
        assert_eq!(header.id, "document");
        assert_eq!(header.name, "KML to CZML Conversion with Image Overlay");
        assert_eq!(header.version, "1.0");

        let ids: Vec<_> = doc.overlays().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["overlay_1", "overlay_2"]);
    }

    #[test]
    fn test_availability_chain() {
        let doc = convert_kml(TWO_OVERLAYS, &ImageTable::new(), &ConversionDefaults::default())
            .unwrap();
        let availability: Vec<_> = doc.overlays().map(|o| o.availability.as_str()).collect();
        assert_eq!(
            availability,
            vec![
                "2021-06-01T00:00:00Z/2021-06-02T00:00:00Z",
                "2021-06-02T00:00:00Z/2021-06-02T00:00:00Z",
            ]
        );
    }

    #[test]
    fn test_report() {
        let conversion = OverlayConverter::default()
            .convert(TWO_OVERLAYS, &ImageTable::new())
            .unwrap();
        assert_eq!(
            conversion.report,
            ConversionReport {
                shape: Some(DocumentShape::Document),
                overlays: 2,
                images_inlined: 0,
                images_missing: 0,
                images_absent: 2,
            }
        );
    }

    #[test]
    fn test_no_overlays() {
        let err = convert_kml(
            "<kml><Document/></kml>",
            &ImageTable::new(),
            &ConversionDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::NoOverlays));
    }

    #[test]
    fn test_malformed_xml() {
        let err = convert_kml("<kml>", &ImageTable::new(), &ConversionDefaults::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::Xml(_)));
    }

    #[test]
    fn test_custom_header() {
        let defaults = ConversionDefaults {
            document_name: "Flood extents".to_string(),
            ..Default::default()
        };
        let doc = convert_kml(TWO_OVERLAYS, &ImageTable::new(), &defaults).unwrap();
        assert_eq!(doc.header().unwrap().name, "Flood extents");
    }
}
