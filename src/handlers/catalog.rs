/// Catálogo público: categorias, listagens e página de detalhe

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use baixatudo_backend::models::Build;
use baixatudo_backend::utils::logging::*;
use baixatudo_backend::utils::AppError;
use baixatudo_backend::AppState;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/categories", "GET");

    let categories = state.catalog.list_categories().await?;

    Ok(Json(json!({
        "success": true,
        "categories": categories,
        "count": categories.len()
    })))
}

pub async fn list_softwares(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingQuery>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/softwares", "GET");

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let listings = state
        .catalog
        .list_softwares(params.category.as_deref(), page, per_page)
        .await?;

    Ok(Json(json!({
        "success": true,
        "softwares": listings,
        "count": listings.len(),
        "page": page,
        "per_page": per_page
    })))
}

/// Detalhe de um software publicado, com versões e seus builds
pub async fn get_software(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/softwares/:slug", "GET");

    let software = state
        .catalog
        .get_software_by_slug(&slug)
        .await?
        .filter(|s| s.published)
        .ok_or_else(|| AppError::NotFound(format!("Software '{}' not found", slug)))?;

    let versions = state.catalog.list_versions(software.id).await?;
    let builds = state.catalog.list_builds_for_software(software.id).await?;

    let versions_json: Vec<Value> = versions
        .iter()
        .map(|v| {
            let version_builds: Vec<&Build> =
                builds.iter().filter(|b| b.version_id == v.id).collect();
            json!({
                "id": v.id,
                "version": v.version,
                "changelog": v.changelog,
                "released_at": v.released_at,
                "builds": version_builds
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "software": software,
        "versions": versions_json
    })))
}
