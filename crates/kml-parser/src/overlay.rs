//! `GroundOverlay` extraction.

use serde::{Deserialize, Serialize};

use crate::xml::XmlElement;

/// Raw `LatLonBox` edge strings, parsed later by the materializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBounds {
    pub north: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
    pub west: Option<String>,
}

/// KML `TimeSpan`; either end may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub begin: Option<String>,
    pub end: Option<String>,
}

/// One `GroundOverlay` as declared in the document.
///
/// Empty text is treated the same as a missing element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayRecord {
    pub name: Option<String>,
    pub bounds: RawBounds,
    /// `Icon/href`, a file name or path
    pub icon_href: Option<String>,
    /// `TimeStamp/when`
    pub time_stamp: Option<String>,
    pub time_span: Option<TimeSpan>,
}

impl OverlayRecord {
    pub fn from_element(overlay: &XmlElement) -> Self {
        let bounds = overlay
            .child("LatLonBox")
            .map(|b| RawBounds {
                north: b.child_text("north"),
                south: b.child_text("south"),
                east: b.child_text("east"),
                west: b.child_text("west"),
            })
            .unwrap_or_default();

        let time_span = overlay.child("TimeSpan").map(|span| TimeSpan {
            begin: span.child_text("begin"),
            end: span.child_text("end"),
        });

        Self {
            name: overlay.child_text("name"),
            bounds,
            icon_href: overlay.child("Icon").and_then(|icon| icon.child_text("href")),
            time_stamp: overlay.child("TimeStamp").and_then(|ts| ts.child_text("when")),
            time_span,
        }
    }

    pub fn span_begin(&self) -> Option<&str> {
        self.time_span.as_ref().and_then(|s| s.begin.as_deref())
    }

    pub fn span_end(&self) -> Option<&str> {
        self.time_span.as_ref().and_then(|s| s.end.as_deref())
    }
}
