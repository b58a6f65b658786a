//! Post models

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tree::{Node, TocEntry};
use super::FrontMatter;

/// Index entry for a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Identifier (file name without extension)
    pub id: String,

    pub title: String,

    /// Date exactly as written in the front-matter
    pub date: String,

    /// Parsed date, used for ordering
    #[serde(skip)]
    pub published: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PostSummary {
    /// Merge an identifier with validated front-matter
    ///
    /// The identifier always comes from the file name. An `id` key in the
    /// front-matter is dropped so it cannot shadow it.
    pub fn new(id: String, fm: FrontMatter, published: NaiveDateTime) -> Self {
        let mut extra = fm.extra;
        if let Some(shadow) = extra.shift_remove("id") {
            tracing::warn!("Ignoring front-matter id {:?} in post {}", shadow, id);
        }

        Self {
            id,
            title: fm.title.unwrap_or_default(),
            date: fm.date.unwrap_or_default(),
            published: Some(published),
            description: fm.description,
            tags: fm.tags,
            extra,
        }
    }
}

/// A post ready to hand to presentation code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPost {
    pub id: String,
    pub front_matter: FrontMatter,
    pub body: Vec<Node>,
    pub toc: Vec<TocEntry>,
}

impl RenderedPost {
    pub fn title(&self) -> &str {
        self.front_matter.title.as_deref().unwrap_or(&self.id)
    }
}

/// A statically generated page, one per document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
}
