//! Content module - post discovery, front-matter and body conversion

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod store;
pub mod tree;

pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, ParsedBody};
pub use post::{PostSummary, RenderedPost, Route};
pub use store::{ContentStore, Document};
pub use tree::{CodeBlock, Element, Node, TocEntry};
