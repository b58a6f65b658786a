//! Renderable document tree
//!
//! The markdown body of a post is converted into this tree, which is handed
//! to presentation code as-is (serialized to JSON) or written out as HTML by
//! [`crate::components::HtmlWriter`].

use serde::{Deserialize, Serialize};

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text { value: String },
    /// Inline code span
    Code { value: String },
    CodeBlock(CodeBlock),
    /// Raw HTML or JSX, passed through untouched
    Html { value: String },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Concatenated text content of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Text { value } | Node::Code { value } => out.push_str(value),
            Node::CodeBlock(block) => out.push_str(&block.code),
            Node::Html { .. } => {}
        }
    }
}

/// An element such as `p`, `h2` or `a`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A fenced or indented code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag from the fence, `language-` prefix removed
    pub language: Option<String>,
    /// Remainder of the fence info string after the language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    pub code: String,
}

impl CodeBlock {
    /// Build from a fence info string such as `rust title="main.rs"`
    pub fn from_info(info: &str, code: String) -> Self {
        let info = info.trim();
        let (lang, meta) = match info.split_once(char::is_whitespace) {
            Some((lang, meta)) => (lang, Some(meta.trim())),
            None => (info, None),
        };

        let lang = lang.strip_prefix("language-").unwrap_or(lang);

        Self {
            language: (!lang.is_empty()).then(|| lang.to_string()),
            meta: meta.filter(|m| !m.is_empty()).map(str::to_string),
            code,
        }
    }
}

/// A table of contents entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-6)
    pub level: u8,
    /// Anchor id
    pub id: String,
    pub title: String,
}
