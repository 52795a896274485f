/// Operações administrativas (rotas /admin/*)
///
/// Todas estas rotas ficam atrás do middleware require_admin_key: quando a
/// chave é negada o handler nem executa, então nenhuma operação aqui precisa
/// revalidar a credencial. Cada operação é uma leitura/escrita única.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use baixatudo_backend::models::{NewBuild, NewSoftware, NewVersion};
use baixatudo_backend::utils::logging::*;
use baixatudo_backend::utils::{slugify, AppError};
use baixatudo_backend::AppState;

/// GET /admin/categories - categorias com contagem de softwares
pub async fn list_categories_admin(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/categories", "GET");

    let categories = state.catalog.list_categories_with_counts().await?;

    Ok(Json(json!({
        "success": true,
        "categories": categories,
        "count": categories.len()
    })))
}

/// POST /admin/softwares - cria uma entrada de software
pub async fn create_software(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewSoftware>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/softwares", "POST");

    if let Err(msg) = body.validate() {
        log_validation_error("software", &msg);
        return Err(AppError::ValidationError(msg));
    }

    if !state.catalog.category_exists(body.category_id).await? {
        return Err(AppError::NotFound(format!(
            "Category {} not found",
            body.category_id
        )));
    }

    // O slug é derivado do nome no servidor, nunca vem do cliente
    let slug = slugify(&body.name);
    if state.catalog.get_software_by_slug(&slug).await?.is_some() {
        return Err(AppError::ValidationError(format!(
            "A software with slug '{}' already exists",
            slug
        )));
    }

    let software = state.catalog.create_software(&body, &slug).await?;
    log_info(&format!("📋 Software created: {} ({})", software.name, software.slug));

    Ok(Json(json!({
        "success": true,
        "software": software
    })))
}

/// POST /admin/softwares/:id/versions - cria uma versão
pub async fn create_version(
    State(state): State<Arc<AppState>>,
    Path(software_id): Path<i64>,
    Json(body): Json<NewVersion>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/softwares/:id/versions", "POST");

    if let Err(msg) = body.validate() {
        log_validation_error("version", &msg);
        return Err(AppError::ValidationError(msg));
    }

    if !state.catalog.software_exists(software_id).await? {
        return Err(AppError::NotFound(format!(
            "Software {} not found",
            software_id
        )));
    }

    let version = state.catalog.create_version(software_id, &body).await?;
    log_info(&format!("🏷️ Version created: {} for software {}", version.version, software_id));

    Ok(Json(json!({
        "success": true,
        "version": version
    })))
}

/// POST /admin/versions/:id/builds - cria um build para uma versão
pub async fn create_build(
    State(state): State<Arc<AppState>>,
    Path(version_id): Path<i64>,
    Json(body): Json<NewBuild>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/versions/:id/builds", "POST");

    if let Err(msg) = body.validate() {
        log_validation_error("build", &msg);
        return Err(AppError::ValidationError(msg));
    }

    if !state.catalog.version_exists(version_id).await? {
        return Err(AppError::NotFound(format!(
            "Version {} not found",
            version_id
        )));
    }

    let build = state.catalog.create_build(version_id, &body).await?;
    log_build_created(build.id, &build.platform);

    Ok(Json(json!({
        "success": true,
        "build": build
    })))
}

/// POST /admin/comments/:id/approve - aprova um comentário pendente
///
/// Idempotente: aprovar um comentário já aprovado responde sucesso sem
/// mudar nada.
pub async fn approve_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/comments/:id/approve", "POST");

    if !state.catalog.approve_comment(comment_id).await? {
        return Err(AppError::NotFound(format!(
            "Comment {} not found",
            comment_id
        )));
    }

    log_comment_approved(comment_id);

    Ok(Json(json!({
        "success": true,
        "comment_id": comment_id,
        "status": "approved"
    })))
}

/// DELETE /admin/comments/:id - remove um comentário
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/comments/:id", "DELETE");

    if !state.catalog.delete_comment(comment_id).await? {
        return Err(AppError::NotFound(format!(
            "Comment {} not found",
            comment_id
        )));
    }

    log_comment_deleted(comment_id);

    Ok(Json(json!({
        "success": true,
        "comment_id": comment_id,
        "status": "deleted"
    })))
}

/// GET /admin/stats/downloads - totais de download por software
pub async fn download_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/stats/downloads", "GET");

    let stats = state.catalog.download_stats().await?;

    Ok(Json(json!({
        "success": true,
        "stats": stats,
        "count": stats.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// POST /admin/search/reindex - reconstrói o índice de busca a partir do banco
pub async fn reindex_search(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/admin/search/reindex", "POST");

    let search = state.search.as_ref().ok_or_else(|| {
        AppError::ConfigError("Search is not configured (MEILI_URL missing)".to_string())
    })?;

    let docs = state.catalog.published_for_index().await?;
    let indexed = search.rebuild(&docs).await.map_err(|e| {
        log_search_error("reindex", &e.to_string());
        e
    })?;

    log_search_indexed(indexed);

    Ok(Json(json!({
        "success": true,
        "indexed": indexed,
        "index": search.index_name()
    })))
}
