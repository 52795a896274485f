// Biblioteca do backend BaixaTudo
// Expõe módulos para uso em testes e no binário

pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub catalog: services::CatalogService,
    pub search: Option<services::SearchIndexService>,
}
