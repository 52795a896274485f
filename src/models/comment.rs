use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status de moderação de um comentário
pub const COMMENT_PENDING: &str = "pending";
pub const COMMENT_APPROVED: &str = "approved";

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub software_id: i64,
    pub author_name: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub author_name: String,
    pub body: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), String> {
        if self.author_name.trim().is_empty() {
            return Err("Field 'author_name' must not be empty".to_string());
        }
        if self.author_name.len() > 80 {
            return Err("Field 'author_name' must be at most 80 characters".to_string());
        }
        if self.body.trim().is_empty() {
            return Err("Field 'body' must not be empty".to_string());
        }
        if self.body.len() > 4000 {
            return Err("Field 'body' must be at most 4000 characters".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comentario_valido() {
        let comment = NewComment {
            author_name: "Maria".to_string(),
            body: "Funciona muito bem no Linux.".to_string(),
        };
        assert!(comment.validate().is_ok());
    }

    #[test]
    fn test_comentario_sem_autor() {
        let comment = NewComment {
            author_name: "  ".to_string(),
            body: "Ótimo programa".to_string(),
        };
        assert!(comment.validate().is_err());
    }

    #[test]
    fn test_comentario_corpo_longo_demais() {
        let comment = NewComment {
            author_name: "João".to_string(),
            body: "x".repeat(4001),
        };
        assert!(comment.validate().is_err());
    }
}
