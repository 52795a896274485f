/// Middleware layer para o Axum router
///
/// Este módulo contém middleware customizados para:
/// - Autenticação dos endpoints administrativos

pub mod admin_auth;

pub use admin_auth::{require_admin_key, AdminGuard, AuthOutcome, ADMIN_KEY_HEADER};
