//! Conversion metrics.

use std::time::Duration;

use metrics::{counter, histogram};
use overlay_converter::ConversionReport;

use crate::error::ApiError;

pub fn record_conversion(report: &ConversionReport, elapsed: Duration) {
    counter!("czml_conversions_total").increment(1);
    counter!("czml_overlays_total").increment(report.overlays as u64);
    counter!("czml_images_inlined_total").increment(report.images_inlined as u64);
    counter!("czml_images_defaulted_total")
        .increment((report.images_missing + report.images_absent) as u64);
    histogram!("czml_conversion_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_failure(err: &ApiError) {
    let reason = match err {
        ApiError::MissingKml => "missing_kml",
        ApiError::Multipart(_) => "multipart",
        ApiError::Convert(e) if e.is_fatal_conversion() => "conversion",
        ApiError::Convert(_) => "invalid_xml",
        ApiError::Task(_) => "task",
    };
    counter!("czml_conversion_failures_total", "reason" => reason).increment(1);
}
