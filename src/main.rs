/// Backend do portal de downloads BaixaTudo
///
/// Arquitetura:
/// - Catálogo público: categorias, listagens, detalhe, comentários aprovados,
///   registro de downloads e busca
/// - Back office em /admin/*: gestão de software/versão/build, moderação de
///   comentários, estatísticas e reindexação - tudo atrás do guard de chave
///   administrativa (X-Admin-Key)
/// - Postgres como fonte de verdade; Meilisearch opcional para busca

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use baixatudo_backend::{middleware as app_middleware, services, utils, AppState};

mod handlers;

use app_middleware::AdminGuard;
use baixatudo_backend::config::Settings;
use handlers::{
    approve_comment, create_build, create_software, create_version, delete_comment,
    download_stats, get_software, health_check, list_categories, list_categories_admin,
    list_comments, list_softwares, ready_check, register_download, reindex_search,
    search_softwares, status_check, submit_comment,
};
use services::{CatalogService, SearchIndexService};
use utils::{logging::*, AppError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Carregar variáveis de ambiente do arquivo .env (se existir)
    if dotenvy::dotenv().is_err() {
        // Em produção não existe .env - variáveis vêm do ambiente
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt::init();

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Conectar no Postgres e aplicar migrações pendentes
    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log_info("🗄️ Database connected and migrations applied");

    // Busca é opcional: sem MEILI_URL o /search cai no fallback do Postgres
    let search = if settings.search.enabled {
        match settings.search.url.as_deref() {
            Some(url) => {
                let service = SearchIndexService::new(
                    url,
                    settings.search.master_key.as_deref(),
                    &settings.search.index,
                )?;
                match service.ensure_settings().await {
                    Ok(_) => {
                        log_info(&format!("🔎 Meilisearch configured - index '{}'", settings.search.index));
                        Some(service)
                    }
                    Err(e) => {
                        log_warning(&format!(
                            "⚠️ Meilisearch unreachable ({}). Falling back to Postgres search.",
                            e
                        ));
                        None
                    }
                }
            }
            None => {
                log_warning("⚠️ search.enabled=true mas MEILI_URL não configurada. Busca via Postgres.");
                None
            }
        }
    } else {
        None
    };

    // Guard administrativo: chave injetada aqui, uma vez, a partir da
    // configuração - nada lê ADMIN_API_KEY durante as requisições
    let guard = AdminGuard::from_settings(&settings);
    let admin_key_missing = settings
        .admin
        .api_key
        .as_deref()
        .map(str::trim)
        .map_or(true, str::is_empty);
    if admin_key_missing {
        log_warning("⚠️ ADMIN_API_KEY não configurada - acesso a /admin/* será sempre negado (fail closed)");
    }

    // Estado da aplicação
    let app_state = Arc::new(AppState {
        catalog: CatalogService::new(pool),
        search,
        settings: settings.clone(),
    });

    // Rotas públicas
    let mut app = Router::new()
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/status", get(status_check))

        // Catálogo
        .route("/categories", get(list_categories))
        .route("/softwares", get(list_softwares))
        .route("/softwares/:slug", get(get_software))
        .route("/softwares/:slug/comments", get(list_comments).post(submit_comment))
        .route("/downloads/:build_id", get(register_download))
        .route("/search", get(search_softwares))
        .with_state(app_state.clone());

    // Rotas administrativas protegidas com a chave administrativa
    let admin_routes = Router::new()
        .route("/admin/categories", get(list_categories_admin))
        .route("/admin/softwares", post(create_software))
        .route("/admin/softwares/:id/versions", post(create_version))
        .route("/admin/versions/:id/builds", post(create_build))
        .route("/admin/comments/:id/approve", post(approve_comment))
        .route("/admin/comments/:id", delete(delete_comment))
        .route("/admin/stats/downloads", get(download_stats))
        .route("/admin/search/reindex", post(reindex_search))
        .layer(middleware::from_fn_with_state(
            guard,
            app_middleware::require_admin_key,
        ))
        .with_state(app_state);

    app = app.merge(admin_routes);

    // Observabilidade e CORS (frontend React em outro domínio)
    app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Iniciar servidor - em PaaS usar a variável de ambiente PORT
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
