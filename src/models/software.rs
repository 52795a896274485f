use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Plataformas aceitas para builds
pub const SUPPORTED_PLATFORMS: &[&str] = &["windows", "macos", "linux", "android"];

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Linha de categoria para o back office, com contagem de softwares
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub software_count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Software {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Linha da listagem pública, já com a categoria resolvida
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct SoftwareListing {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub category_name: String,
    pub category_slug: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Version {
    pub id: i64,
    pub software_id: i64,
    pub version: String,
    pub changelog: Option<String>,
    pub released_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Build {
    pub id: i64,
    pub version_id: i64,
    pub platform: String,
    pub file_url: String,
    pub file_size_bytes: i64,
    pub sha256: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewSoftware {
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

impl NewSoftware {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Field 'name' must not be empty".to_string());
        }
        if self.name.len() > 200 {
            return Err("Field 'name' must be at most 200 characters".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct NewVersion {
    pub version: String,
    #[serde(default)]
    pub changelog: Option<String>,
}

impl NewVersion {
    pub fn validate(&self) -> Result<(), String> {
        if self.version.trim().is_empty() {
            return Err("Field 'version' must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct NewBuild {
    pub platform: String,
    pub file_url: String,
    pub file_size_bytes: i64,
    #[serde(default)]
    pub sha256: Option<String>,
}

impl NewBuild {
    pub fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_PLATFORMS.contains(&self.platform.as_str()) {
            return Err(format!(
                "Unsupported platform '{}' (expected one of: {})",
                self.platform,
                SUPPORTED_PLATFORMS.join(", ")
            ));
        }
        if self.file_url.trim().is_empty() {
            return Err("Field 'file_url' must not be empty".to_string());
        }
        if self.file_size_bytes <= 0 {
            return Err("Field 'file_size_bytes' must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_build_plataforma_valida() {
        let build = NewBuild {
            platform: "linux".to_string(),
            file_url: "https://cdn.baixatudo.app/builds/1.tar.gz".to_string(),
            file_size_bytes: 1024,
            sha256: None,
        };
        assert!(build.validate().is_ok());
    }

    #[test]
    fn test_new_build_plataforma_invalida() {
        let build = NewBuild {
            platform: "amiga".to_string(),
            file_url: "https://cdn.baixatudo.app/builds/1.tar.gz".to_string(),
            file_size_bytes: 1024,
            sha256: None,
        };
        assert!(build.validate().is_err());
    }

    #[test]
    fn test_new_build_tamanho_invalido() {
        let build = NewBuild {
            platform: "windows".to_string(),
            file_url: "https://cdn.baixatudo.app/builds/1.exe".to_string(),
            file_size_bytes: 0,
            sha256: None,
        };
        assert!(build.validate().is_err());
    }

    #[test]
    fn test_new_software_nome_obrigatorio() {
        let software = NewSoftware {
            category_id: 1,
            name: "   ".to_string(),
            summary: String::new(),
            description: String::new(),
            published: false,
        };
        assert!(software.validate().is_err());
    }
}
