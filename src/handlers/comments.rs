/// Comentários públicos: leitura dos aprovados e envio para moderação

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use baixatudo_backend::models::NewComment;
use baixatudo_backend::utils::logging::*;
use baixatudo_backend::utils::AppError;
use baixatudo_backend::AppState;

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/softwares/:slug/comments", "GET");

    let software = state
        .catalog
        .get_software_by_slug(&slug)
        .await?
        .filter(|s| s.published)
        .ok_or_else(|| AppError::NotFound(format!("Software '{}' not found", slug)))?;

    // Somente comentários aprovados são visíveis publicamente
    let comments = state.catalog.list_approved_comments(software.id).await?;

    Ok(Json(json!({
        "success": true,
        "software_id": software.id,
        "comments": comments,
        "count": comments.len()
    })))
}

pub async fn submit_comment(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(body): Json<NewComment>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/softwares/:slug/comments", "POST");

    if let Err(msg) = body.validate() {
        log_validation_error("comment", &msg);
        return Err(AppError::ValidationError(msg));
    }

    let software = state
        .catalog
        .get_software_by_slug(&slug)
        .await?
        .filter(|s| s.published)
        .ok_or_else(|| AppError::NotFound(format!("Software '{}' not found", slug)))?;

    // Entra como 'pending' e só aparece depois da moderação
    let comment = state.catalog.submit_comment(software.id, &body).await?;
    log_comment_submitted(software.id);

    Ok(Json(json!({
        "success": true,
        "comment": comment,
        "message": "Comment submitted and awaiting moderation"
    })))
}
