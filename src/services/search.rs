/// Índice de busca (Meilisearch)
///
/// O frontend nunca fala com o Meilisearch diretamente: as queries passam
/// pelo backend via GET /search, que repassa para este wrapper. O índice é
/// reconstruído sob demanda pelo POST /admin/search/reindex a partir do
/// banco, que continua sendo a fonte de verdade.

use meilisearch_sdk::{client::Client, settings::Settings};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::{AppError, AppResult};

pub const SOFTWARE_PRIMARY_KEY: &str = "id";

/// Documento indexado - um por software publicado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchDoc {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub category: String,
}

#[derive(Clone)]
pub struct SearchIndexService {
    client: Client,
    index_name: String,
}

impl SearchIndexService {
    pub fn new(url: &str, master_key: Option<&str>, index_name: &str) -> AppResult<Self> {
        let client = Client::new(url, master_key)
            .map_err(|e| AppError::SearchIndex(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            index_name: index_name.to_string(),
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Garante os atributos pesquisáveis do índice (chamado no startup)
    pub async fn ensure_settings(&self) -> AppResult<()> {
        let settings = Settings::new()
            .with_searchable_attributes(["name", "summary", "category"])
            .with_filterable_attributes(["category"]);

        self.client
            .index(&self.index_name)
            .set_settings(&settings)
            .await
            .map_err(|e| AppError::SearchIndex(format!("Failed to apply settings: {}", e)))?;

        Ok(())
    }

    /// Substitui o conteúdo do índice pelos documentos informados
    pub async fn rebuild(&self, docs: &[SearchDoc]) -> AppResult<usize> {
        let index = self.client.index(&self.index_name);

        index
            .delete_all_documents()
            .await
            .map_err(|e| AppError::SearchIndex(format!("Failed to clear index: {}", e)))?;

        index
            .add_or_replace(docs, Some(SOFTWARE_PRIMARY_KEY))
            .await
            .map_err(|e| AppError::SearchIndex(format!("Failed to index documents: {}", e)))?;

        Ok(docs.len())
    }

    pub async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<SearchDoc>> {
        let index = self.client.index(&self.index_name);

        let results = index
            .search()
            .with_query(query)
            .with_limit(limit)
            .execute::<SearchDoc>()
            .await
            .map_err(|e| AppError::SearchIndex(format!("Search failed: {}", e)))?;

        Ok(results.hits.into_iter().map(|hit| hit.result).collect())
    }
}
