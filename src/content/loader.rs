//! Content loader - builds the post index, routes and rendered posts

use std::path::Path;

use super::store::{ContentStore, Document};
use super::{FrontMatter, MarkdownRenderer, PostSummary, RenderedPost, Route};
use crate::error::{ContentError, FrontMatterError, Result};

/// Loads content from the posts directory
///
/// Nothing is cached: every call reads the store afresh.
pub struct ContentLoader {
    store: ContentStore,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader over a store
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// All posts, newest first
    ///
    /// Posts sharing a date keep file-name order.
    pub fn list_posts(&self) -> Result<Vec<PostSummary>> {
        let mut posts = Vec::new();

        for document in self.store.documents()? {
            posts.push(self.load_summary(&document)?);
        }

        posts.sort_by(|a, b| b.published.cmp(&a.published));

        tracing::debug!("Indexed {} posts", posts.len());
        Ok(posts)
    }

    /// One route per document, in file-name order
    pub fn list_routes(&self) -> Result<Vec<Route>> {
        let routes = self
            .store
            .documents()?
            .into_iter()
            .map(|doc| Route { id: doc.id })
            .collect();

        Ok(routes)
    }

    /// Load and convert a single post
    pub fn render_post(&self, id: &str) -> Result<RenderedPost> {
        let document = self.store.find(id)?;
        let content = self.store.read(&document)?;
        let (fm, body) = parse(&document.path, &content)?;
        fm.require().map_err(|e| parse_error(&document.path, e))?;

        let parsed = self.renderer.render(body);
        tracing::debug!(
            "Rendered {} ({} nodes, {} headings)",
            id,
            parsed.nodes.len(),
            parsed.toc.len()
        );

        Ok(RenderedPost {
            id: document.id,
            front_matter: fm,
            body: parsed.nodes,
            toc: parsed.toc,
        })
    }

    fn load_summary(&self, document: &Document) -> Result<PostSummary> {
        let content = self.store.read(document)?;
        let (fm, _) = parse(&document.path, &content)?;
        let (_, _, published) = fm.require().map_err(|e| parse_error(&document.path, e))?;

        Ok(PostSummary::new(document.id.clone(), fm, published))
    }
}

fn parse<'c>(path: &Path, content: &'c str) -> Result<(FrontMatter, &'c str)> {
    FrontMatter::parse(content).map_err(|e| parse_error(path, e))
}

fn parse_error(path: &Path, source: FrontMatterError) -> ContentError {
    ContentError::Parse {
        path: path.to_path_buf(),
        source,
    }
}
