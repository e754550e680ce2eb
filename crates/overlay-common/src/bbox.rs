//! Geographic bounds of a ground overlay.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One edge of a `LatLonBox`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    North,
    South,
    East,
    West,
}

impl Edge {
    /// KML element name for this edge.
    pub fn tag(&self) -> &'static str {
        match self {
            Edge::North => "north",
            Edge::South => "south",
            Edge::East => "east",
            Edge::West => "west",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A KML `LatLonBox` in degrees.
///
/// No reprojection or normalization is applied: the values are carried through
/// exactly as declared in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl LatLonBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Parse the four raw edge strings of a `LatLonBox`.
    ///
    /// Fails on the first missing or non-numeric edge, checked in
    /// north, south, east, west order.
    pub fn parse(
        north: Option<&str>,
        south: Option<&str>,
        east: Option<&str>,
        west: Option<&str>,
    ) -> Result<Self, BoundsParseError> {
        Ok(Self {
            north: parse_edge(Edge::North, north)?,
            south: parse_edge(Edge::South, south)?,
            east: parse_edge(Edge::East, east)?,
            west: parse_edge(Edge::West, west)?,
        })
    }

    /// Edges in CZML `wsenDegrees` order: west, south, east, north.
    pub fn wsen_degrees(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// True when the box spans the antimeridian (east edge west of the west edge).
    pub fn crosses_antimeridian(&self) -> bool {
        self.east < self.west
    }
}

fn parse_edge(edge: Edge, raw: Option<&str>) -> Result<f64, BoundsParseError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(BoundsParseError::Missing(edge));
    };

    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(BoundsParseError::InvalidNumber {
            edge,
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundsParseError {
    #[error("missing {0} edge")]
    Missing(Edge),

    #[error("{edge} edge is not a number: '{value}'")]
    InvalidNumber { edge: Edge, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latlonbox() {
        let bbox = LatLonBox::parse(Some("10"), Some("0"), Some("20"), Some("-5")).unwrap();
        assert_eq!(bbox, LatLonBox::new(10.0, 0.0, 20.0, -5.0));
    }

    #[test]
    fn test_wsen_order() {
        let bbox = LatLonBox::new(10.0, 0.0, 20.0, -5.0);
        assert_eq!(bbox.wsen_degrees(), [-5.0, 0.0, 20.0, 10.0]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let bbox =
            LatLonBox::parse(Some(" 35.5\n"), Some("35.0"), Some("139.9 "), Some("139.4")).unwrap();
        assert_eq!(bbox.north, 35.5);
        assert_eq!(bbox.east, 139.9);
    }

    #[test]
    fn test_non_numeric_edge() {
        let err = LatLonBox::parse(Some("10"), Some("zero"), Some("20"), Some("-5")).unwrap_err();
        assert_eq!(
            err,
            BoundsParseError::InvalidNumber {
                edge: Edge::South,
                value: "zero".to_string()
            }
        );
    }

    #[test]
    fn test_missing_edge() {
        let err = LatLonBox::parse(Some("10"), Some("0"), None, Some("-5")).unwrap_err();
        assert_eq!(err, BoundsParseError::Missing(Edge::East));

        let err = LatLonBox::parse(Some("10"), Some("0"), Some("20"), Some("  ")).unwrap_err();
        assert_eq!(err, BoundsParseError::Missing(Edge::West));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LatLonBox::parse(Some("NaN"), Some("0"), Some("1"), Some("0")).is_err());
        assert!(LatLonBox::parse(Some("1"), Some("0"), Some("inf"), Some("0")).is_err());
    }

    #[test]
    fn test_antimeridian() {
        assert!(LatLonBox::new(10.0, 0.0, -170.0, 170.0).crosses_antimeridian());
        assert!(!LatLonBox::new(10.0, 0.0, 20.0, -5.0).crosses_antimeridian());
    }
}
