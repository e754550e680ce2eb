//! Error types for the overlay conversion pipeline.

use thiserror::Error;

use crate::bbox::BoundsParseError;

/// Result type alias using ConvertError.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Primary error type for KML to CZML conversion.
///
/// Only two variants are fatal conversion outcomes: [`ConvertError::NoOverlays`]
/// and [`ConvertError::InvalidBounds`]. Every other anomaly inside a document
/// is recovered with a default and never reaches this type.
#[derive(Debug, Error)]
pub enum ConvertError {
    // === Conversion Errors ===
    #[error("No GroundOverlay elements found in KML document")]
    NoOverlays,

    #[error("Invalid LatLonBox in overlay {overlay}: {source}")]
    InvalidBounds {
        /// 1-based overlay position in document order
        overlay: usize,
        #[source]
        source: BoundsParseError,
    },

    // === Input Errors ===
    #[error("Malformed XML document: {0}")]
    Xml(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// Whether this error comes from the conversion itself rather than the
    /// input boundary (XML parsing) or the host.
    pub fn is_fatal_conversion(&self) -> bool {
        matches!(self, ConvertError::NoOverlays | ConvertError::InvalidBounds { .. })
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ConvertError::Xml(_) => 400,

            ConvertError::NoOverlays
            | ConvertError::InvalidBounds { .. }
            | ConvertError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::Edge;

    #[test]
    fn test_status_codes() {
        assert_eq!(ConvertError::NoOverlays.http_status_code(), 500);
        assert_eq!(ConvertError::Xml("eof".to_string()).http_status_code(), 400);

        let err = ConvertError::InvalidBounds {
            overlay: 2,
            source: BoundsParseError::InvalidNumber {
                edge: Edge::North,
                value: "abc".to_string(),
            },
        };
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ConvertError::NoOverlays.is_fatal_conversion());
        assert!(!ConvertError::Xml("bad".to_string()).is_fatal_conversion());
        assert!(!ConvertError::Internal("boom".to_string()).is_fatal_conversion());
    }

    #[test]
    fn test_error_display() {
        let err = ConvertError::InvalidBounds {
            overlay: 3,
            source: BoundsParseError::InvalidNumber {
                edge: Edge::West,
                value: "ten".to_string(),
            },
        };
        let display = err.to_string();
        assert!(display.contains("overlay 3"));
        assert!(display.contains("west"));
        assert!(display.contains("ten"));
    }
}
