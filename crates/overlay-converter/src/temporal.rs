//! Availability interval derivation.
//!
//! Each overlay begins at its `TimeStamp`, else its `TimeSpan/begin`, else the
//! configured default. It ends at its own `TimeSpan/end` when declared, else
//! where the next overlay begins. The last overlay without an explicit end
//! falls back to `ConversionDefaults::final_end`, which is unset by default.

use kml_parser::OverlayRecord;
use overlay_common::{normalize_iso8601, parse_instant, Availability, ConversionDefaults};
use tracing::{debug, warn};

/// Begin instant of one overlay, normalized.
pub fn begin_instant(overlay: &OverlayRecord, defaults: &ConversionDefaults) -> String {
    match overlay.time_stamp.as_deref().or(overlay.span_begin()) {
        Some(declared) => normalize_iso8601(declared),
        None => normalize_iso8601(&defaults.default_begin),
    }
}

/// Availability of every overlay, same length and order as the input.
pub fn resolve_intervals(
    overlays: &[OverlayRecord],
    defaults: &ConversionDefaults,
) -> Vec<Availability> {
    let begins: Vec<String> = overlays
        .iter()
        .enumerate()
        .map(|(i, overlay)| {
            if overlay.time_stamp.is_none() && overlay.span_begin().is_none() {
                debug!(
                    overlay = i + 1,
                    begin = %defaults.default_begin,
                    "No TimeStamp or TimeSpan/begin, using default begin"
                );
            }
            begin_instant(overlay, defaults)
        })
        .collect();

    let intervals: Vec<Availability> = overlays
        .iter()
        .zip(&begins)
        .enumerate()
        .map(|(i, (overlay, begin))| {
            let end = overlay
                .span_end()
                .map(normalize_iso8601)
                .or_else(|| begins.get(i + 1).cloned())
                .or_else(|| defaults.final_end.as_deref().map(normalize_iso8601));

            if end.is_none() {
                debug!(overlay = i + 1, "Last overlay has no end, interval left open");
            }
            Availability::new(begin.clone(), end)
        })
        .collect();

    for (i, availability) in intervals.iter().enumerate() {
        warn_unparseable(i + 1, "begin", &availability.begin);
        if let Some(end) = &availability.end {
            warn_unparseable(i + 1, "end", end);
        }
    }

    intervals
}

fn warn_unparseable(overlay: usize, bound: &str, instant: &str) {
    if parse_instant(instant).is_none() {
        warn!(overlay, bound, instant, "Instant is not ISO 8601, passing through unchanged");
    }
}
