//! Builders for synthetic KML documents.
//!
//! These generate predictable documents for tests that need a specific
//! combination of time information, names and bounds.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Container layout for [`KmlBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Document,
    Folder,
    DocumentFolder,
}

/// A `GroundOverlay` to render into a document.
///
/// Bounds are written verbatim so invalid values can be injected.
#[derive(Debug, Clone)]
pub struct OverlayFixture {
    pub name: Option<String>,
    pub href: Option<String>,
    pub when: Option<String>,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub bounds: [String; 4],
}

impl Default for OverlayFixture {
    fn default() -> Self {
        Self {
            name: None,
            href: None,
            when: None,
            begin: None,
            end: None,
            bounds: ["10".into(), "0".into(), "20".into(), "-5".into()],
        }
    }
}

impl OverlayFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn when(mut self, when: &str) -> Self {
        self.when = Some(when.to_string());
        self
    }

    pub fn begin(mut self, begin: &str) -> Self {
        self.begin = Some(begin.to_string());
        self
    }

    pub fn end(mut self, end: &str) -> Self {
        self.end = Some(end.to_string());
        self
    }

    /// Edges in north, south, east, west order.
    pub fn bounds(mut self, north: &str, south: &str, east: &str, west: &str) -> Self {
        self.bounds = [north.into(), south.into(), east.into(), west.into()];
        self
    }

    pub fn to_kml(&self) -> String {
        let mut kml = String::from("<GroundOverlay>");
        if let Some(name) = &self.name {
            kml.push_str(&format!("<name>{}</name>", name));
        }
        if let Some(when) = &self.when {
            kml.push_str(&format!("<TimeStamp><when>{}</when></TimeStamp>", when));
        }
        if self.begin.is_some() || self.end.is_some() {
            kml.push_str("<TimeSpan>");
            if let Some(begin) = &self.begin {
                kml.push_str(&format!("<begin>{}</begin>", begin));
            }
            if let Some(end) = &self.end {
                kml.push_str(&format!("<end>{}</end>", end));
            }
            kml.push_str("</TimeSpan>");
        }
        if let Some(href) = &self.href {
            kml.push_str(&format!("<Icon><href>{}</href></Icon>", href));
        }
        let [north, south, east, west] = &self.bounds;
        kml.push_str(&format!(
            "<LatLonBox><north>{}</north><south>{}</south><east>{}</east><west>{}</west></LatLonBox>",
            north, south, east, west
        ));
        kml.push_str("</GroundOverlay>");
        kml
    }
}

/// Assembles overlays into a complete KML document.
#[derive(Debug, Clone)]
pub struct KmlBuilder {
    layout: Layout,
    overlays: Vec<OverlayFixture>,
}

impl KmlBuilder {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            overlays: Vec::new(),
        }
    }

    pub fn overlay(mut self, overlay: OverlayFixture) -> Self {
        self.overlays.push(overlay);
        self
    }

    pub fn build(&self) -> String {
        let body: String = self.overlays.iter().map(OverlayFixture::to_kml).collect();
        let nested = match self.layout {
            Layout::Document => format!("<Document>{}</Document>", body),
            Layout::Folder => format!("<Folder>{}</Folder>", body),
            Layout::DocumentFolder => format!("<Document><Folder>{}</Folder></Document>", body),
        };
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml xmlns=\"http://www.opengis.net/kml/2.2\">{}</kml>",
            nested
        )
    }
}

/// A temporary directory holding a KML file and an `images/` subdirectory.
pub struct FixtureDir {
    pub dir: TempDir,
    pub kml_path: PathBuf,
    pub images_dir: PathBuf,
}

/// Write `kml` and the given images to a fresh temporary directory.
///
/// Panics on I/O failure; only meant for tests.
pub fn write_fixture_dir(kml: &str, images: &[(&str, &[u8])]) -> FixtureDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    let kml_path = dir.path().join("overlays.kml");
    fs::write(&kml_path, kml).expect("write kml");

    let images_dir = dir.path().join("images");
    fs::create_dir_all(&images_dir).expect("create images dir");
    for (name, bytes) in images {
        fs::write(images_dir.join(name), bytes).expect("write image");
    }

    FixtureDir {
        dir,
        kml_path,
        images_dir,
    }
}
