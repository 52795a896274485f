use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 BaixaTudo backend starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_comment_submitted(software_id: i64) {
    info!("💬 Comment submitted for software {} (pending moderation)", software_id);
}

pub fn log_comment_approved(comment_id: i64) {
    info!("✅ Comment approved: {}", comment_id);
}

pub fn log_comment_deleted(comment_id: i64) {
    info!("🗑️ Comment deleted: {}", comment_id);
}

pub fn log_build_created(build_id: i64, platform: &str) {
    info!("📦 Build created: {} - Platform: {}", build_id, platform);
}

pub fn log_download_registered(build_id: i64) {
    info!("⬇️ Download registered for build {}", build_id);
}

pub fn log_search_indexed(count: usize) {
    info!("🔎 Search index rebuilt with {} documents", count);
}

pub fn log_search_error(operation: &str, error: &str) {
    error!("Search index error: {} - {}", operation, error);
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
