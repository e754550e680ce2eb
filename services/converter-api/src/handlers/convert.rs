//! KML to CZML conversion endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Multipart},
    Json,
};
use czml_protocol::CzmlDocument;
use overlay_converter::ImageTable;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;

/// Multipart field carrying the KML document.
pub const KML_FIELD: &str = "kml";
/// Multipart field carrying one overlay image; repeatable.
pub const IMAGES_FIELD: &str = "images";

/// Decoded multipart upload.
#[derive(Debug, Default)]
pub struct Upload {
    pub kml: Option<String>,
    pub images: ImageTable,
}

/// POST /api/convertKml - Convert an uploaded KML document and its images.
pub async fn convert_kml_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<CzmlDocument>, ApiError> {
    let started = Instant::now();

    match convert(state, multipart).await {
        Ok((document, report)) => {
            info!(
                overlays = report.overlays,
                images_inlined = report.images_inlined,
                images_missing = report.images_missing,
                images_absent = report.images_absent,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "KML converted"
            );
            metrics::record_conversion(&report, started.elapsed());
            Ok(Json(document))
        }
        Err(e) => {
            error!(error = %e, "Error converting KML to CZML");
            metrics::record_failure(&e);
            Err(e)
        }
    }
}

async fn convert(
    state: Arc<AppState>,
    mut multipart: Multipart,
) -> Result<(CzmlDocument, overlay_converter::ConversionReport), ApiError> {
    let upload = read_upload(&mut multipart).await?;
    let kml = upload.kml.ok_or(ApiError::MissingKml)?;
    let images = upload.images;

    debug!(
        kml_bytes = kml.len(),
        images = images.len(),
        "Received conversion request"
    );

    let conversion = tokio::task::spawn_blocking(move || state.converter.convert(&kml, &images))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))??;

    Ok((conversion.document, conversion.report))
}

/// Collect the `kml` part and every `images` part.
///
/// Image parts are keyed by their filename. Parts without a filename and
/// fields with other names are skipped. A repeated `kml` part replaces the
/// earlier one.
pub async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    let mut upload = Upload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            KML_FIELD => {
                if upload.kml.is_some() {
                    warn!("Multiple kml parts uploaded, using the last one");
                }
                upload.kml = Some(field.text().await?);
            }
            IMAGES_FIELD => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    warn!("Skipping image part without a filename");
                    continue;
                };
                let bytes = field.bytes().await?;
                debug!(file = %file_name, size = bytes.len(), "Received image");
                upload.images.insert(file_name, bytes);
            }
            other => {
                debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(upload)
}
