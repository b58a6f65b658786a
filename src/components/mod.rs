//! Component registry
//!
//! Presentation code can replace how individual element tags are rendered,
//! the way MDX lets a page pass `{ code: Code }`. The mapping is built once
//! at startup and handed to [`HtmlWriter`] explicitly.

mod highlight;
mod html;

use std::collections::HashMap;
use std::fmt;

pub use highlight::CodeHighlighter;
pub use html::{escape_html, HtmlWriter};

use crate::config::SiteConfig;
use crate::content::CodeBlock;

/// Tag under which fenced code blocks are dispatched
pub const CODE_BLOCK: &str = "code";

/// Tag under which inline code spans are dispatched
pub const INLINE_CODE: &str = "inlineCode";

/// Input handed to a component
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    pub tag: &'a str,
    pub attrs: &'a [(String, String)],
    /// Already rendered HTML of the element's children
    pub children: &'a str,
    /// Set for fenced and indented code blocks only
    pub code: Option<&'a CodeBlock>,
}

/// Renders one element tag into HTML
pub trait Component: Send + Sync {
    fn render(&self, props: &Props<'_>) -> String;
}

/// Mapping from element tag to component
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Box<dyn Component>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in components enabled by the config
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut registry = Self::new();

        if config.highlight.enable {
            registry.register(CODE_BLOCK, CodeHighlighter::new(&config.highlight));
        }

        registry
    }

    /// Bind a component to a tag, replacing any previous binding
    pub fn register<C>(&mut self, tag: impl Into<String>, component: C) -> &mut Self
    where
        C: Component + 'static,
    {
        let tag = tag.into();
        tracing::debug!("Registered component for <{}>", tag);
        self.components.insert(tag, Box::new(component));
        self
    }

    pub fn get(&self, tag: &str) -> Option<&dyn Component> {
        self.components.get(tag).map(|c| c.as_ref())
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.components.keys().collect();
        tags.sort();
        f.debug_struct("ComponentRegistry")
            .field("tags", &tags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let registry = ComponentRegistry::from_config(&SiteConfig::default());
        assert!(registry.get(CODE_BLOCK).is_some());

        let mut config = SiteConfig::default();
        config.highlight.enable = false;
        let registry = ComponentRegistry::from_config(&config);
        assert!(registry.get(CODE_BLOCK).is_none());
    }

    struct Title;

    impl Component for Title {
        fn render(&self, props: &Props<'_>) -> String {
            format!("<h1 class=\"title\">{}</h1>", props.children)
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ComponentRegistry::new();
        registry.register("h1", Title);

        let props = Props {
            tag: "h1",
            attrs: &[],
            children: "Hi",
            code: None,
        };
        let html = registry.get("h1").unwrap().render(&props);
        assert_eq!(html, "<h1 class=\"title\">Hi</h1>");
        assert!(registry.get("h2").is_none());
    }
}
