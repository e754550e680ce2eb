//! Finding the `GroundOverlay` list inside a KML document.
//!
//! Producers nest overlays in one of three container layouts. Each layout is
//! tried in priority order and the first that yields overlays wins; results
//! from different layouts are never merged.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::overlay::OverlayRecord;
use crate::xml::XmlElement;

const OVERLAY: &str = "GroundOverlay";
const DOCUMENT: &str = "Document";
const FOLDER: &str = "Folder";

/// Container layout holding the overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentShape {
    /// `kml/Document/GroundOverlay`
    Document,
    /// `kml/Folder/GroundOverlay`
    Folder,
    /// `kml/Document/Folder/GroundOverlay`
    DocumentFolder,
}

impl DocumentShape {
    /// Resolution order.
    pub const PRIORITY: [DocumentShape; 3] = [
        DocumentShape::Document,
        DocumentShape::Folder,
        DocumentShape::DocumentFolder,
    ];

    /// Containers that may hold overlays for this layout, in document order.
    fn containers<'a>(&self, kml: &'a XmlElement) -> Vec<&'a XmlElement> {
        match self {
            DocumentShape::Document => kml.children_named(DOCUMENT).collect(),
            DocumentShape::Folder => kml.children_named(FOLDER).collect(),
            DocumentShape::DocumentFolder => kml
                .children_named(DOCUMENT)
                .flat_map(|doc| doc.children_named(FOLDER))
                .collect(),
        }
    }

    /// Overlay elements of the first container in this layout that has any.
    pub fn overlays<'a>(&self, kml: &'a XmlElement) -> Option<Vec<&'a XmlElement>> {
        self.containers(kml).into_iter().find_map(|container| {
            let overlays: Vec<_> = container.children_named(OVERLAY).collect();
            (!overlays.is_empty()).then_some(overlays)
        })
    }
}

impl fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = match self {
            DocumentShape::Document => "kml/Document",
            DocumentShape::Folder => "kml/Folder",
            DocumentShape::DocumentFolder => "kml/Document/Folder",
        };
        f.write_str(path)
    }
}

/// Result of [`locate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocatedOverlays {
    /// Layout that matched; `None` when no overlays were found.
    pub shape: Option<DocumentShape>,
    pub overlays: Vec<OverlayRecord>,
}

impl LocatedOverlays {
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }
}

/// Find the overlays of a parsed KML document.
///
/// An empty result is not an error here; the caller decides.
pub fn locate(root: &XmlElement) -> LocatedOverlays {
    if !root.is("kml") {
        warn!(root = %root.name, "Root element is not <kml>, no overlays located");
        return LocatedOverlays::default();
    }

    for shape in DocumentShape::PRIORITY {
        if let Some(elements) = shape.overlays(root) {
            debug!(shape = %shape, count = elements.len(), "Located GroundOverlay elements");
            return LocatedOverlays {
                shape: Some(shape),
                overlays: elements.into_iter().map(OverlayRecord::from_element).collect(),
            };
        }
    }

    warn!("No GroundOverlay elements under kml/Document, kml/Folder or kml/Document/Folder");
    LocatedOverlays::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn names(located: &LocatedOverlays) -> Vec<&str> {
        located
            .overlays
            .iter()
            .map(|o| o.name.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_document_shape() {
        let root = parse_document(
            "<kml><Document><GroundOverlay><name>a</name></GroundOverlay><GroundOverlay><name>b</name></GroundOverlay></Document></kml>",
        )
        .unwrap();
        let located = locate(&root);
        assert_eq!(located.shape, Some(DocumentShape::Document));
        assert_eq!(names(&located), vec!["a", "b"]);
    }

    #[test]
    fn test_folder_shape() {
        let root = parse_document(
            "<kml><Folder><GroundOverlay><name>f</name></GroundOverlay></Folder></kml>",
        )
        .unwrap();
        let located = locate(&root);
        assert_eq!(located.shape, Some(DocumentShape::Folder));
        assert_eq!(names(&located), vec!["f"]);
    }

    #[test]
    fn test_document_folder_shape() {
        let root = parse_document(
            "<kml><Document><name>d</name><Folder><GroundOverlay><name>x</name></GroundOverlay></Folder></Document></kml>",
        )
        .unwrap();
        let located = locate(&root);
        assert_eq!(located.shape, Some(DocumentShape::DocumentFolder));
        assert_eq!(names(&located), vec!["x"]);
    }

    #[test]
    fn test_document_wins_over_nested_folder() {
        let root = parse_document(
            "<kml><Document>\
               <GroundOverlay><name>top</name></GroundOverlay>\
               <Folder><GroundOverlay><name>nested</name></GroundOverlay></Folder>\
             </Document></kml>",
        )
        .unwrap();
        let located = locate(&root);
        assert_eq!(located.shape, Some(DocumentShape::Document));
        assert_eq!(names(&located), vec!["top"]);
    }

    #[test]
    fn test_first_populated_folder_used() {
        let root = parse_document(
            "<kml><Document>\
               <Folder><name>empty</name></Folder>\
               <Folder><GroundOverlay><name>one</name></GroundOverlay></Folder>\
               <Folder><GroundOverlay><name>two</name></GroundOverlay></Folder>\
             </Document></kml>",
        )
        .unwrap();
        let located = locate(&root);
        assert_eq!(located.shape, Some(DocumentShape::DocumentFolder));
        assert_eq!(names(&located), vec!["one"]);
    }

    #[test]
    fn test_no_overlays() {
        let root = parse_document("<kml><Document><Placemark/></Document></kml>").unwrap();
        let located = locate(&root);
        assert!(located.is_empty());
        assert!(located.shape.is_none());
    }

    #[test]
    fn test_deeper_nesting_not_recognized() {
        let root = parse_document(
            "<kml><Folder><Folder><GroundOverlay/></Folder></Folder></kml>",
        )
        .unwrap();
        assert!(locate(&root).is_empty());
    }

    #[test]
    fn test_non_kml_root() {
        let root = parse_document("<Document><GroundOverlay/></Document>").unwrap();
        assert!(locate(&root).is_empty());
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(DocumentShape::DocumentFolder.to_string(), "kml/Document/Folder");
    }
}
