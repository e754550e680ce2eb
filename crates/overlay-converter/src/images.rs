//! Uploaded image lookup and data URI encoding.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use tracing::debug;
use walkdir::WalkDir;

/// Image payloads keyed by uploaded file name.
#[derive(Debug, Clone, Default)]
pub struct ImageTable {
    images: HashMap<String, Bytes>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image under its file name. A later insert under the same name wins.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Bytes>) {
        self.images.insert(name.into(), bytes.into());
    }

    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.images.get(name)
    }

    /// Look up the image an `Icon/href` points at.
    ///
    /// Only the last path segment is significant, so `images/site.png`,
    /// `C:\kml\site.png` and `site.png` all resolve to the `site.png` entry.
    pub fn lookup<'a>(&self, href: &'a str) -> (&'a str, Option<&Bytes>) {
        let key = file_name(href);
        (key, self.images.get(key))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Load every file of a directory, keyed by file name.
    ///
    /// With `recursive`, subdirectories are walked as well; files sharing a
    /// name overwrite each other in walk order.
    pub fn from_dir(dir: &Path, recursive: bool) -> io::Result<Self> {
        let mut table = Self::new();
        let depth = if recursive { usize::MAX } else { 1 };

        for entry in WalkDir::new(dir).max_depth(depth).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let bytes = std::fs::read(entry.path())?;
            debug!(image = %name, size = bytes.len(), "Loaded image");
            table.insert(name, bytes);
        }

        Ok(table)
    }
}

impl<K: Into<String>, V: Into<Bytes>> FromIterator<(K, V)> for ImageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, bytes) in iter {
            table.insert(name, bytes);
        }
        table
    }
}

/// Final path segment of a file name, path or URL.
pub fn file_name(href: &str) -> &str {
    href.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(href)
}

/// Media type implied by a file extension.
pub fn media_type_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Inline image bytes as a base64 `data:` URI.
pub fn data_uri(name: &str, bytes: &[u8], fallback_media_type: &str) -> String {
    let media_type = media_type_for(name).unwrap_or(fallback_media_type);
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("site.png"), "site.png");
        assert_eq!(file_name("images/site.png"), "site.png");
        assert_eq!(file_name("a/b/c/site.png"), "site.png");
        assert_eq!(file_name(r"C:\kml\site.png"), "site.png");
        assert_eq!(file_name("https://example.com/tiles/site.png"), "site.png");
        assert_eq!(file_name("images/"), "");
    }

    #[test]
    fn test_lookup_strips_path() {
        let table: ImageTable = [("site.png", vec![1u8, 2, 3])].into_iter().collect();
        let (key, hit) = table.lookup("images/site.png");
        assert_eq!(key, "site.png");
        assert_eq!(hit.map(|b| b.as_ref()), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table: ImageTable = [("Site.PNG", vec![1u8])].into_iter().collect();
        assert!(table.lookup("site.png").1.is_none());
    }

    #[test]
    fn test_media_types() {
        assert_eq!(media_type_for("a.png"), Some("image/png"));
        assert_eq!(media_type_for("a.JPG"), Some("image/jpeg"));
        assert_eq!(media_type_for("a.jpeg"), Some("image/jpeg"));
        assert_eq!(media_type_for("a.svg"), Some("image/svg+xml"));
        assert_eq!(media_type_for("a.tiff"), None);
        assert_eq!(media_type_for("noext"), None);
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri("a.png", b"hello", "image/png"), "data:image/png;base64,aGVsbG8=");
        assert_eq!(data_uri("a.jpg", b"hello", "image/png"), "data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(data_uri("a.raw", b"hello", "image/png"), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("b.png"), b"b").unwrap();

        let flat = ImageTable::from_dir(dir.path(), false).unwrap();
        assert_eq!(flat.len(), 1);
        assert!(flat.get("a.png").is_some());

        let deep = ImageTable::from_dir(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 2);
        assert_eq!(deep.get("b.png").map(|b| b.as_ref()), Some(&b"b"[..]));
    }
}
