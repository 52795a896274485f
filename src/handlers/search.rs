/// Proxy de busca
///
/// Com Meilisearch configurado a query vai para o índice; sem ele, caímos
/// num ILIKE direto no Postgres para a busca pública continuar funcionando.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use baixatudo_backend::utils::logging::*;
use baixatudo_backend::utils::AppError;
use baixatudo_backend::AppState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

pub async fn search_softwares(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/search", "GET");

    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::ValidationError(
            "Query parameter 'q' must not be empty".to_string(),
        ));
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    match &state.search {
        Some(search) => {
            let hits = search.search(query, limit).await.map_err(|e| {
                log_search_error("search", &e.to_string());
                e
            })?;

            Ok(Json(json!({
                "success": true,
                "engine": "meilisearch",
                "query": query,
                "results": hits,
                "count": hits.len()
            })))
        }
        None => {
            let hits = state.catalog.search_fallback(query, limit as i64).await?;

            Ok(Json(json!({
                "success": true,
                "engine": "postgres",
                "query": query,
                "results": hits,
                "count": hits.len()
            })))
        }
    }
}
