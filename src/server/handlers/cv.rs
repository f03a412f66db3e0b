//! CV download endpoint.

use std::io;
use std::path::{Path, PathBuf};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::super::AppState;

/// Failures reading a static asset from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    pub fn status(&self) -> StatusCode {
        match self {
            AssetError::Missing(_) => StatusCode::NOT_FOUND,
            AssetError::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        let body = match self {
            AssetError::Missing(_) => "Archivo no encontrado",
            AssetError::Read { .. } => "Error interno del servidor",
        };
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

/// Read a whole file, telling absence apart from other I/O failures.
pub async fn read_asset(path: &Path) -> Result<Vec<u8>, AssetError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(AssetError::Missing(path.to_path_buf()))
        }
        Err(source) => Err(AssetError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Serve the CV inline as a PDF.
pub async fn serve_cv(State(state): State<AppState>) -> Response {
    let path = state.settings.cv_path();

    match read_asset(&path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("inline; filename=\"{}\"", state.settings.cv_filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e @ AssetError::Missing(_)) => {
            tracing::warn!("{}", e);
            e.into_response()
        }
        Err(e) => {
            tracing::error!("Error serving CV: {}", e);
            e.into_response()
        }
    }
}
