use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Minimum content length (in characters) accepted for a stored entry.
pub const MIN_CONTENT_LEN: usize = 10;

/// Rejected draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("content must be at least {min} characters, got {actual}")]
    ContentTooShort { min: usize, actual: usize },
}

/// Unsaved entry: everything but the id, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let actual = self.content.chars().count();
        if actual < MIN_CONTENT_LEN {
            return Err(ValidationError::ContentTooShort {
                min: MIN_CONTENT_LEN,
                actual,
            });
        }
        Ok(())
    }
}

/// Mapping between a record type and its table.
pub trait Entity {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str] = &["id", "title", "content"];

    fn from_draft(id: i64, draft: Draft) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl Entity for Blog {
    const TABLE: &'static str = "blogs";

    fn from_draft(id: i64, draft: Draft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl Entity for Post {
    const TABLE: &'static str = "posts";

    fn from_draft(id: i64, draft: Draft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
        }
    }
}
