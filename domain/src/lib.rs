use chrono::{DateTime, Utc}; // Creation timestamps and search bounds
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error; // For domain-specific errors
use uuid::Uuid;

// --- Domain Errors ---
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Missing required field '{0}'")]
    MissingField(String),
}

// --- Document ID ---
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Draws a fresh random id (UUID v4, hyphenated).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id.to_string())
    }
}

impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

// --- Author ---

/// Identity record embedded in every document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// The stored unit of content.
///
/// `id` is `None` until the document has been saved; the store assigns one.
/// `created` is owned by the caller and is never rewritten by the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: Option<DocumentId>,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created: DateTime<Utc>,
}

impl Document {
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    /// Returns the document with `id` set, leaving every other field untouched.
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Step-by-step construction of a [`Document`]; `build` null-checks the
/// required fields.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    id: Option<DocumentId>,
    title: Option<String>,
    content: Option<String>,
    author: Option<Author>,
    created: Option<DateTime<Utc>>,
}

impl DocumentBuilder {
    pub fn id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn build(self) -> Result<Document, DomainError> {
        Ok(Document {
            id: self.id,
            title: self.title.ok_or_else(|| missing("title"))?,
            content: self.content.ok_or_else(|| missing("content"))?,
            author: self.author.ok_or_else(|| missing("author"))?,
            created: self.created.ok_or_else(|| missing("created"))?,
        })
    }
}

fn missing(field: &str) -> DomainError {
    DomainError::MissingField(field.to_string())
}

// --- Search Request ---

/// Query over stored documents. Every field is optional: an empty list or a
/// `None` bound means "no constraint on that dimension".
///
/// Fields combine with AND; values inside one list combine with OR.
/// Both creation bounds are inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub title_prefixes: Vec<String>,
    pub contains_contents: Vec<String>,
    pub author_ids: Vec<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_contains_contents<I, S>(mut self, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains_contents = contents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author_ids<I, S>(mut self, author_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_ids = author_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// True when no field constrains the result, i.e. every document matches.
    pub fn is_unconstrained(&self) -> bool {
        self.title_prefixes.is_empty()
            && self.contains_contents.is_empty()
            && self.author_ids.is_empty()
            && self.created_from.is_none()
            && self.created_to.is_none()
    }
}
