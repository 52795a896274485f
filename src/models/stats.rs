use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Totais de download por software, para o back office
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct DownloadStat {
    pub software_id: i64,
    pub software_name: String,
    pub total_downloads: i64,
    pub last_download_at: Option<DateTime<Utc>>,
}
