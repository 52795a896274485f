use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use baixatudo_backend::utils::logging::*;
use baixatudo_backend::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "baixatudo-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn ready_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    // Testa a conexão com o banco
    let database_status = match state.catalog.ping().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    let search_status = if state.search.is_some() {
        "configured"
    } else {
        "not_configured"
    };

    let overall_ready = database_status == "connected";

    let response = json!({
        "ready": overall_ready,
        "service": "baixatudo-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "database": {
                "status": database_status
            },
            "search": {
                "status": search_status,
                "index": state.settings.search.index
            }
        }
    });

    if overall_ready {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    // Guard administrativo configurado?
    let admin_key_configured = state
        .settings
        .admin
        .api_key
        .as_deref()
        .map(str::trim)
        .is_some_and(|k| !k.is_empty());

    let search_enabled = state.settings.search.enabled && state.search.is_some();

    Json(json!({
        "service": "baixatudo-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
        "admin_key_configured": admin_key_configured,
        "integrations": {
            "database": {
                "max_connections": state.settings.database.max_connections
            },
            "search": {
                "enabled": search_enabled,
                "index": state.settings.search.index
            }
        }
    }))
}
