//! Common test fixtures for overlay conversion tests.
//!
//! This module provides pre-defined KML documents that represent the
//! container layouts and anomalies the converter has to handle.

/// Common bounding boxes as (north, south, east, west).
pub mod bounds {
    /// Small box straddling the prime meridian
    pub const SIMPLE: (f64, f64, f64, f64) = (10.0, 0.0, 20.0, -5.0);

    /// Tokyo bay area
    pub const TOKYO: (f64, f64, f64, f64) = (35.75, 35.25, 140.25, 139.5);

    /// Crosses the antimeridian (east < west)
    pub const DATELINE: (f64, f64, f64, f64) = (10.0, -10.0, -170.0, 170.0);
}

/// Common time values for testing.
pub mod time {
    pub const JUNE_1: &str = "2021-06-01T00:00:00Z";
    pub const JUNE_2: &str = "2021-06-02T00:00:00Z";
    pub const JUNE_3: &str = "2021-06-03T00:00:00Z";

    /// Date fused to time without separator or zone
    pub const FUSED: &str = "2020-01-0112:00:00";
    pub const FUSED_NORMALIZED: &str = "2020-01-01T12:00:00Z";

    pub const EPOCH_DEFAULT: &str = "2000-01-01T00:00:00Z";
}

/// Complete KML documents.
pub mod kml {
    /// Two overlays directly under `Document`, timestamp then open time span.
    pub const DOCUMENT_TWO_OVERLAYS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Precipitation</name>
    <GroundOverlay>
      <name>Radar 1</name>
      <TimeStamp><when>2021-06-01T00:00:00Z</when></TimeStamp>
      <Icon><href>images/radar_1.png</href></Icon>
      <LatLonBox>
        <north>10</north>
        <south>0</south>
        <east>20</east>
        <west>-5</west>
      </LatLonBox>
    </GroundOverlay>
    <GroundOverlay>
      <name>Radar 2</name>
      <TimeSpan><begin>2021-06-02T00:00:00Z</begin></TimeSpan>
      <Icon><href>radar_2.png</href></Icon>
      <LatLonBox>
        <north>11</north>
        <south>1</south>
        <east>21</east>
        <west>-4</west>
      </LatLonBox>
    </GroundOverlay>
  </Document>
</kml>
"#;

    /// Overlays directly under a top-level `Folder`.
    pub const FOLDER_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Folder>
    <name>Scans</name>
    <GroundOverlay>
      <TimeSpan><begin>2021-06-01T00:00:00Z</begin></TimeSpan>
      <LatLonBox><north>36</north><south>35</south><east>140</east><west>139</west></LatLonBox>
    </GroundOverlay>
    <GroundOverlay>
      <TimeSpan><begin>2021-06-02T00:00:00Z</begin></TimeSpan>
      <LatLonBox><north>36</north><south>35</south><east>140</east><west>139</west></LatLonBox>
    </GroundOverlay>
    <GroundOverlay>
      <TimeSpan><begin>2021-06-03T00:00:00Z</begin></TimeSpan>
      <LatLonBox><north>36</north><south>35</south><east>140</east><west>139</west></LatLonBox>
    </GroundOverlay>
  </Folder>
</kml>
"#;

    /// Overlays in a `Folder` nested under `Document`, as exported by Google Earth.
    pub const DOCUMENT_FOLDER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2">
  <Document>
    <name>export.kml</name>
    <Folder>
      <name>Overlays</name>
      <GroundOverlay>
        <name xml:lang="en">Flood extent</name>
        <Icon><href>C:\exports\flood.jpg</href></Icon>
        <LatLonBox>
          <north>35.75</north>
          <south>35.25</south>
          <east>140.25</east>
          <west>139.5</west>
          <rotation>0</rotation>
        </LatLonBox>
      </GroundOverlay>
    </Folder>
  </Document>
</kml>
"#;

    /// Valid KML with placemarks only.
    pub const NO_OVERLAYS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark><name>Pin</name><Point><coordinates>139.7,35.6,0</coordinates></Point></Placemark>
  </Document>
</kml>
"#;

    /// Second overlay has a non-numeric east edge.
    pub const BAD_BOUNDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <GroundOverlay>
      <LatLonBox><north>10</north><south>0</south><east>20</east><west>-5</west></LatLonBox>
    </GroundOverlay>
    <GroundOverlay>
      <LatLonBox><north>10</north><south>0</south><east>twenty</east><west>-5</west></LatLonBox>
    </GroundOverlay>
  </Document>
</kml>
"#;

    /// Truncated document.
    pub const MALFORMED: &str = r#"<kml><Document><GroundOverlay></Document></kml>"#;
}

/// Image payloads keyed the way uploads are.
pub mod images {
    /// Signature plus a few bytes; content is never decoded.
    pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x01];

    /// base64 of [`PNG_BYTES`]
    pub const PNG_BASE64: &str = "iVBORw0KGgoAAQ==";

    pub const JPEG_BYTES: &[u8] = &[0xff, 0xd8, 0xff, 0xe0];
}
