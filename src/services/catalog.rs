/// Acesso a dados do catálogo (Postgres)
///
/// Todas as leituras e escritas dos handlers passam por aqui. Cada operação
/// é uma query única; transações não são necessárias no desenho atual.

use sqlx::PgPool;

use crate::models::{
    Build, Category, CategorySummary, Comment, DownloadStat, NewBuild, NewComment, NewSoftware,
    NewVersion, Software, SoftwareListing, Version, COMMENT_APPROVED, COMMENT_PENDING,
};
use crate::services::search::SearchDoc;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
}

/// Offset de paginação sem overflow: page vem direto da query string e pode
/// ser qualquer i64, então a aritmética satura em vez de estourar
fn page_offset(page: i64, per_page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(per_page)
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Usado pelo /ready para confirmar que o banco responde
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Categorias
    // ------------------------------------------------------------------

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Visão do back office: inclui contagem de softwares (publicados ou não)
    pub async fn list_categories_with_counts(&self) -> AppResult<Vec<CategorySummary>> {
        let categories = sqlx::query_as::<_, CategorySummary>(
            r#"
            SELECT c.id, c.name, c.slug, COUNT(s.id) AS software_count
            FROM categories c
            LEFT JOIN softwares s ON s.category_id = c.id
            GROUP BY c.id, c.name, c.slug
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn category_exists(&self, category_id: i64) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    // ------------------------------------------------------------------
    // Softwares / versões / builds
    // ------------------------------------------------------------------

    pub async fn list_softwares(
        &self,
        category_slug: Option<&str>,
        page: i64,
        per_page: i64,
    ) -> AppResult<Vec<SoftwareListing>> {
        let offset = page_offset(page, per_page);

        let listings = sqlx::query_as::<_, SoftwareListing>(
            r#"
            SELECT s.id, s.name, s.slug, s.summary,
                   c.name AS category_name, c.slug AS category_slug
            FROM softwares s
            JOIN categories c ON c.id = s.category_id
            WHERE s.published = TRUE
              AND ($1::text IS NULL OR c.slug = $1)
            ORDER BY s.name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category_slug)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    pub async fn get_software_by_slug(&self, slug: &str) -> AppResult<Option<Software>> {
        let software = sqlx::query_as::<_, Software>(
            r#"
            SELECT id, category_id, name, slug, summary, description,
                   published, created_at, updated_at
            FROM softwares
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(software)
    }

    pub async fn software_exists(&self, software_id: i64) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM softwares WHERE id = $1")
                .bind(software_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    pub async fn create_software(&self, new: &NewSoftware, slug: &str) -> AppResult<Software> {
        let software = sqlx::query_as::<_, Software>(
            r#"
            INSERT INTO softwares (category_id, name, slug, summary, description, published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, category_id, name, slug, summary, description,
                      published, created_at, updated_at
            "#,
        )
        .bind(new.category_id)
        .bind(new.name.trim())
        .bind(slug)
        .bind(&new.summary)
        .bind(&new.description)
        .bind(new.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(software)
    }

    pub async fn list_versions(&self, software_id: i64) -> AppResult<Vec<Version>> {
        let versions = sqlx::query_as::<_, Version>(
            r#"
            SELECT id, software_id, version, changelog, released_at
            FROM versions
            WHERE software_id = $1
            ORDER BY released_at DESC
            "#,
        )
        .bind(software_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(versions)
    }

    pub async fn create_version(&self, software_id: i64, new: &NewVersion) -> AppResult<Version> {
        let version = sqlx::query_as::<_, Version>(
            r#"
            INSERT INTO versions (software_id, version, changelog)
            VALUES ($1, $2, $3)
            RETURNING id, software_id, version, changelog, released_at
            "#,
        )
        .bind(software_id)
        .bind(new.version.trim())
        .bind(&new.changelog)
        .fetch_one(&self.pool)
        .await?;

        Ok(version)
    }

    pub async fn version_exists(&self, version_id: i64) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM versions WHERE id = $1")
                .bind(version_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Builds de todas as versões de um software (agrupadas no handler)
    pub async fn list_builds_for_software(&self, software_id: i64) -> AppResult<Vec<Build>> {
        let builds = sqlx::query_as::<_, Build>(
            r#"
            SELECT b.id, b.version_id, b.platform, b.file_url,
                   b.file_size_bytes, b.sha256, b.created_at
            FROM builds b
            JOIN versions v ON v.id = b.version_id
            WHERE v.software_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(software_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(builds)
    }

    pub async fn create_build(&self, version_id: i64, new: &NewBuild) -> AppResult<Build> {
        let build = sqlx::query_as::<_, Build>(
            r#"
            INSERT INTO builds (version_id, platform, file_url, file_size_bytes, sha256)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, version_id, platform, file_url, file_size_bytes, sha256, created_at
            "#,
        )
        .bind(version_id)
        .bind(&new.platform)
        .bind(new.file_url.trim())
        .bind(new.file_size_bytes)
        .bind(&new.sha256)
        .fetch_one(&self.pool)
        .await?;

        Ok(build)
    }

    // ------------------------------------------------------------------
    // Comentários
    // ------------------------------------------------------------------

    pub async fn list_approved_comments(&self, software_id: i64) -> AppResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, software_id, author_name, body, status, created_at
            FROM comments
            WHERE software_id = $1 AND status = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(software_id)
        .bind(COMMENT_APPROVED)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn submit_comment(&self, software_id: i64, new: &NewComment) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (software_id, author_name, body, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, software_id, author_name, body, status, created_at
            "#,
        )
        .bind(software_id)
        .bind(new.author_name.trim())
        .bind(new.body.trim())
        .bind(COMMENT_PENDING)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Aprova um comentário. Idempotente: aprovar de novo não muda nada.
    /// Retorna false quando o id não existe.
    pub async fn approve_comment(&self, comment_id: i64) -> AppResult<bool> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE comments SET status = $2
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(comment_id)
        .bind(COMMENT_APPROVED)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated.is_some())
    }

    /// Retorna false quando o id não existe (nenhuma linha afetada)
    pub async fn delete_comment(&self, comment_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ------------------------------------------------------------------
    // Downloads
    // ------------------------------------------------------------------

    /// Registra um evento de download e devolve a URL do arquivo.
    /// None quando o build não existe.
    ///
    /// Comando único: a leitura do build e o insert do evento acontecem na
    /// mesma instrução, então um build removido no meio não vira erro de FK.
    pub async fn register_download(&self, build_id: i64) -> AppResult<Option<String>> {
        let file_url: Option<String> = sqlx::query_scalar(
            r#"
            WITH build AS (
                SELECT id, file_url FROM builds WHERE id = $1
            ), registered AS (
                INSERT INTO downloads (build_id)
                SELECT id FROM build
            )
            SELECT file_url FROM build
            "#,
        )
        .bind(build_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file_url)
    }

    pub async fn download_stats(&self) -> AppResult<Vec<DownloadStat>> {
        let stats = sqlx::query_as::<_, DownloadStat>(
            r#"
            SELECT s.id AS software_id, s.name AS software_name,
                   COUNT(d.id) AS total_downloads,
                   MAX(d.downloaded_at) AS last_download_at
            FROM softwares s
            LEFT JOIN versions v ON v.software_id = s.id
            LEFT JOIN builds b ON b.version_id = v.id
            LEFT JOIN downloads d ON d.build_id = b.id
            GROUP BY s.id, s.name
            ORDER BY total_downloads DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }

    // ------------------------------------------------------------------
    // Busca
    // ------------------------------------------------------------------

    /// Fallback de busca quando o Meilisearch não está configurado
    pub async fn search_fallback(&self, query: &str, limit: i64) -> AppResult<Vec<SoftwareListing>> {
        let pattern = format!("%{}%", query);

        let listings = sqlx::query_as::<_, SoftwareListing>(
            r#"
            SELECT s.id, s.name, s.slug, s.summary,
                   c.name AS category_name, c.slug AS category_slug
            FROM softwares s
            JOIN categories c ON c.id = s.category_id
            WHERE s.published = TRUE
              AND (s.name ILIKE $1 OR s.summary ILIKE $1 OR s.description ILIKE $1)
            ORDER BY s.name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    /// Documentos publicados para reconstruir o índice de busca
    pub async fn published_for_index(&self) -> AppResult<Vec<SearchDoc>> {
        let docs = sqlx::query_as::<_, SearchDoc>(
            r#"
            SELECT s.id, s.name, s.slug, s.summary, c.name AS category
            FROM softwares s
            JOIN categories c ON c.id = s.category_id
            WHERE s.published = TRUE
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    /// Pool que nunca conecta (porta fechada, timeout curto): suficiente para
    /// exercitar o caminho até a query sem um Postgres de verdade
    fn disconnected_service() -> CatalogService {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://baixatudo@127.0.0.1:1/baixatudo")
            .unwrap();
        CatalogService::new(pool)
    }

    #[test]
    fn test_offset_de_paginacao_normal() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 20), 40);
    }

    #[test]
    fn test_offset_de_paginacao_satura_em_vez_de_estourar() {
        // page vem da query string: valores absurdos não podem causar pânico
        assert_eq!(page_offset(i64::MAX, 100), i64::MAX);
        assert_eq!(page_offset(i64::MAX, i64::MAX), i64::MAX);
    }

    #[tokio::test]
    async fn test_listagem_com_pagina_gigante_nao_entra_em_panico() {
        let catalog = disconnected_service();

        // Antes do saturating a multiplicação estourava aqui, antes mesmo de
        // qualquer query; agora o erro precisa ser o de conexão
        let result = catalog.list_softwares(None, i64::MAX, 100).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_register_download_sem_banco_devolve_erro() {
        let catalog = disconnected_service();

        let result = catalog.register_download(1).await;
        assert!(result.is_err());
    }
}
