//! HTTP server.
//!
//! Accepts a photo upload, works out where it was taken, and answers with a
//! JSON [`ResolutionResult`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check |
//! | `POST` | `/upload` | Multipart upload: `image` file, optional `user_lat` / `user_lon` |
//!
//! # Error Contract
//!
//! Error bodies always carry a provenance so clients can treat every
//! response the same way:
//!
//! ```json
//! { "error": "No image uploaded!", "source": "none" }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser clients can
//! post photos directly.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn, Span};

use crate::config::Config;
use crate::decode::{ExifDecoder, MetadataDecoder};
use crate::extract::extract_gps_from_file;
use crate::models::{ExtractionResult, ResolutionResult, Source};
use crate::resolve::resolve;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Where uploads are spooled while their metadata is read.
    temp_dir: Arc<PathBuf>,
    decoder: Arc<dyn MetadataDecoder>,
}

impl AppState {
    pub fn new(config: &Config, decoder: Arc<dyn MetadataDecoder>) -> Self {
        Self {
            temp_dir: Arc::new(config.upload.temp_dir()),
            decoder,
        }
    }
}

/// Starts the HTTP server.
///
/// Binds to `[server].host`/`[server].port` and runs until the process is
/// terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.server.bind_addr()?;
    let state = AppState::new(config, Arc::new(ExifDecoder));
    let app = build_router(state, config.server.max_upload_bytes);

    info!(%addr, "photo locator listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router with CORS, request tracing, and the upload size limit.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/upload", post(handle_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    source: Source,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            source: Source::None,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}

fn no_image() -> AppError {
    bad_request("No image uploaded!")
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ============ POST /upload ============

/// Form fields of an upload request.
#[derive(Default)]
struct UploadForm {
    image: Option<Bytes>,
    user_lat: Option<String>,
    user_lon: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            // Only a part carrying a filename is a file upload; its length
            // does not matter.
            "image" => {
                let has_file_name = field.file_name().is_some_and(|f| !f.is_empty());
                let bytes = field.bytes().await.map_err(|e| bad_request(e.body_text()))?;
                form.image = has_file_name.then_some(bytes);
            }
            "user_lat" => {
                form.user_lat = Some(field.text().await.map_err(|e| bad_request(e.body_text()))?);
            }
            "user_lon" => {
                form.user_lon = Some(field.text().await.map_err(|e| bad_request(e.body_text()))?);
            }
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }
    Ok(form)
}

/// Handler for `POST /upload`.
///
/// Returns `400` when no image is attached; any trouble reading the image's
/// metadata falls through to the device location instead of failing.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResolutionResult>, AppError> {
    // A body that is not multipart carries no files at all.
    let form = match multipart {
        Ok(multipart) => read_form(multipart).await?,
        Err(rejection) => {
            debug!(%rejection, "upload is not a multipart form");
            return Err(no_image());
        }
    };

    debug!(
        user_lat = form.user_lat.as_deref(),
        user_lon = form.user_lon.as_deref(),
        "upload received"
    );

    let Some(image) = form.image else {
        info!("no image uploaded");
        return Err(no_image());
    };

    let span = Span::current();
    let decoder = state.decoder.clone();
    let temp_dir = state.temp_dir.clone();
    let extraction = tokio::task::spawn_blocking(move || {
        span.in_scope(|| spool_and_extract(decoder.as_ref(), &temp_dir, &image))
    })
    .await
    .map_err(|e| internal(format!("metadata task failed: {}", e)))?
    .map_err(|e| {
        warn!(error = %e, "could not store upload");
        internal(format!("could not store upload: {}", e))
    })?;

    let result = resolve(
        extraction,
        form.user_lat.as_deref(),
        form.user_lon.as_deref(),
    );
    info!(source = ?result.source, "upload resolved");
    Ok(Json(result))
}

/// Writes the upload to a temporary file and extracts GPS data from it.
///
/// The file is removed when this returns, whatever the outcome.
fn spool_and_extract(
    decoder: &dyn MetadataDecoder,
    dir: &Path,
    image: &[u8],
) -> std::io::Result<ExtractionResult> {
    let mut tmp = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(dir)?;
    tmp.write_all(image)?;
    tmp.flush()?;
    debug!(path = %tmp.path().display(), "image saved to temporary file");

    Ok(extract_gps_from_file(decoder, tmp.path()))
}
