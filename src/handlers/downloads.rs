/// Registro de downloads
///
/// O arquivo em si mora num CDN externo; aqui só contabilizamos o evento e
/// devolvemos a URL para o cliente seguir.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use baixatudo_backend::utils::logging::*;
use baixatudo_backend::utils::AppError;
use baixatudo_backend::AppState;

pub async fn register_download(
    State(state): State<Arc<AppState>>,
    Path(build_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/downloads/:build_id", "GET");

    let file_url = state
        .catalog
        .register_download(build_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Build {} not found", build_id)))?;

    log_download_registered(build_id);

    Ok(Json(json!({
        "success": true,
        "build_id": build_id,
        "file_url": file_url,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
