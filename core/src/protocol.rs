use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flower::{Flower, FlowerKind, AUTHOR_MAX_CHARS, MESSAGE_MAX_CHARS, TITLE_MAX_CHARS};

/// Body of `POST /api/flowers`. Positions arrive as floats straight from a
/// click and are rounded server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFlower {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub author: Option<String>,
    pub x: f64,
    pub y: f64,
    pub flower: FlowerKind,
}

impl CreateFlower {
    /// Field-level validation, applied identically on the client before
    /// submission and on the server before persistence.
    pub fn validate(&self) -> Result<(), CreateFlowerError> {
        if self.title.trim().is_empty() {
            return Err(CreateFlowerError::EmptyTitle);
        }
        if self.title.trim().chars().count() > TITLE_MAX_CHARS {
            return Err(CreateFlowerError::TitleTooLong { max: TITLE_MAX_CHARS });
        }
        if self.message.trim().is_empty() {
            return Err(CreateFlowerError::EmptyMessage);
        }
        if self.message.trim().chars().count() > MESSAGE_MAX_CHARS {
            return Err(CreateFlowerError::MessageTooLong { max: MESSAGE_MAX_CHARS });
        }
        if let Some(author) = &self.author {
            if author.trim().chars().count() > AUTHOR_MAX_CHARS {
                return Err(CreateFlowerError::AuthorTooLong { max: AUTHOR_MAX_CHARS });
            }
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(CreateFlowerError::NonFinitePosition);
        }
        Ok(())
    }

    /// Build the persisted record: trims text fields, normalises an empty
    /// author to absent, and rounds the position to integers.
    pub fn into_flower(self, id: String, slug: String, created_at: Option<String>) -> Flower {
        let author = self
            .author
            .map(|author| author.trim().to_string())
            .filter(|author| !author.is_empty());
        Flower {
            id,
            slug,
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            author,
            x: self.x.round() as i64,
            y: self.y.round() as i64,
            kind: self.flower,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateFlowerError {
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyMessage,
    MessageTooLong { max: usize },
    AuthorTooLong { max: usize },
    NonFinitePosition,
}

impl CreateFlowerError {
    /// The offending field, for error bodies.
    pub fn field(&self) -> &'static str {
        match self {
            CreateFlowerError::EmptyTitle | CreateFlowerError::TitleTooLong { .. } => "title",
            CreateFlowerError::EmptyMessage | CreateFlowerError::MessageTooLong { .. } => "message",
            CreateFlowerError::AuthorTooLong { .. } => "author",
            CreateFlowerError::NonFinitePosition => "x",
        }
    }
}

impl fmt::Display for CreateFlowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateFlowerError::EmptyTitle => write!(f, "title is required"),
            CreateFlowerError::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
            CreateFlowerError::EmptyMessage => write!(f, "message is required"),
            CreateFlowerError::MessageTooLong { max } => {
                write!(f, "message must be at most {max} characters")
            }
            CreateFlowerError::AuthorTooLong { max } => {
                write!(f, "author must be at most {max} characters")
            }
            CreateFlowerError::NonFinitePosition => write!(f, "position must be finite"),
        }
    }
}

impl std::error::Error for CreateFlowerError {}

/// JSON body for every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Optional absolute-X bounds on `GET /api/flowers`, both inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowerQuery {
    pub min_x: Option<i64>,
    pub max_x: Option<i64>,
}

impl FlowerQuery {
    /// Parse from `minX`/`maxX` query pairs. Unknown keys are ignored,
    /// malformed integers drop the bound.
    pub fn from_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key {
                "minX" => query.min_x = value.trim().parse().ok(),
                "maxX" => query.max_x = value.trim().parse().ok(),
                _ => {}
            }
        }
        query
    }

    pub fn matches(&self, flower: &Flower) -> bool {
        if let Some(min_x) = self.min_x {
            if flower.x < min_x {
                return false;
            }
        }
        if let Some(max_x) = self.max_x {
            if flower.x > max_x {
                return false;
            }
        }
        true
    }
}
