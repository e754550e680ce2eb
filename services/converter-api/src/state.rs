//! Application state for the converter API.

use metrics_exporter_prometheus::PrometheusHandle;
use overlay_converter::OverlayConverter;

use crate::config::ServiceConfig;

/// Shared application state.
pub struct AppState {
    /// Converter carrying the configured conversion defaults.
    pub converter: OverlayConverter,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Prometheus handle, absent when no recorder was installed (tests).
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: ServiceConfig, prometheus: Option<PrometheusHandle>) -> Self {
        Self {
            converter: OverlayConverter::new(config.conversion.clone()),
            config,
            prometheus,
        }
    }
}
