//! Time handling for overlay availability intervals.
//!
//! Instants are carried as strings. KML producers emit a wide range of
//! date/time spellings and the converter passes through anything it does not
//! know how to repair, so nothing here rejects input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fallback begin instant for overlays with no time information.
pub const EPOCH_DEFAULT: &str = "2000-01-01T00:00:00Z";

/// Far-future end once used to close the last overlay's interval.
pub const LEGACY_FINAL_END: &str = "2100-01-01T00:00:00Z";

// "YYYY-MM-DD" immediately followed by "hh:mm:ss"
const FUSED_LEN: usize = 18;

/// Normalize an ISO 8601 instant.
///
/// Values that already contain a `T` separator are returned unchanged. A date
/// fused directly to a time (`2020-01-0112:00:00`) gets the `T` separator and a
/// `Z` suffix inserted. Anything else passes through untouched.
pub fn normalize_iso8601(value: &str) -> String {
    if value.contains('T') {
        return value.to_string();
    }

    match find_fused_datetime(value.as_bytes()) {
        Some(start) => {
            let date_end = start + 10;
            let time_end = start + FUSED_LEN;
            format!(
                "{}{}T{}Z{}",
                &value[..start],
                &value[start..date_end],
                &value[date_end..time_end],
                &value[time_end..]
            )
        }
        None => value.to_string(),
    }
}

fn find_fused_datetime(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < FUSED_LEN {
        return None;
    }
    (0..=bytes.len() - FUSED_LEN).find(|&i| matches_fused(&bytes[i..i + FUSED_LEN]))
}

fn matches_fused(window: &[u8]) -> bool {
    const SHAPE: &[u8; FUSED_LEN] = b"dddd-dd-dddd:dd:dd";
    SHAPE.iter().zip(window).all(|(shape, b)| match shape {
        b'd' => b.is_ascii_digit(),
        sep => b == sep,
    })
}

/// Parse an instant as a UTC timestamp.
///
/// Accepts RFC 3339 and the date-only form KML allows. Returns `None` for
/// anything else; callers only use this for diagnostics.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

/// Resolved availability of one overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub begin: String,
    /// `None` only for the last overlay when no end could be derived.
    pub end: Option<String>,
}

impl Availability {
    pub fn new(begin: impl Into<String>, end: Option<String>) -> Self {
        Self {
            begin: begin.into(),
            end,
        }
    }

    /// CZML interval string `begin/end`.
    ///
    /// An open end degenerates to the zero-width interval `begin/begin`.
    pub fn interval(&self) -> String {
        let end = self.end.as_deref().unwrap_or(&self.begin);
        format!("{}/{}", self.begin, end)
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}
