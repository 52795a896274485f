use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub search: SearchSettings,
    pub admin: AdminSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchSettings {
    pub enabled: bool,
    pub url: Option<String>,         // Endereço do Meilisearch
    pub master_key: Option<String>,  // Chave do Meilisearch
    pub index: String,               // Nome do índice de softwares
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminSettings {
    // Segredo compartilhado do guard administrativo (ADMIN_API_KEY)
    pub api_key: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Variáveis de ambiente com precedência sobre os arquivos
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }
        if let Ok(key) = std::env::var("ADMIN_API_KEY") {
            builder = builder.set_override("admin.api_key", key)?;
        }
        if let Ok(url) = std::env::var("MEILI_URL") {
            builder = builder.set_override("search.url", url)?;
        }
        if let Ok(key) = std::env::var("MEILI_MASTER_KEY") {
            builder = builder.set_override("search.master_key", key)?;
        }

        // Prefixo genérico: BAIXATUDO_SERVER__PORT etc.
        builder = builder.add_source(Environment::with_prefix("BAIXATUDO").separator("__"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}
