//! Syntax highlighting for code blocks

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::html::escape_html;
use super::{Component, Props};
use crate::config::HighlightConfig;

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Code block component backed by syntect
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
    line_numbers: bool,
}

impl CodeHighlighter {
    /// Create a highlighter, resolving the theme up front
    pub fn new(config: &HighlightConfig) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;

        let theme = themes.remove(&config.theme).or_else(|| {
            tracing::warn!(
                "Unknown highlight theme {:?}, falling back to {}",
                config.theme,
                FALLBACK_THEME
            );
            themes.remove(FALLBACK_THEME)
        });

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers: config.line_number,
        }
    }

    /// Highlight a code block
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut source = code.to_string();
        if !source.ends_with('\n') {
            source.push('\n');
        }

        let highlighted = self.theme.as_ref().and_then(|theme| {
            highlighted_html_for_string(&source, &self.syntax_set, syntax, theme)
                .map_err(|e| tracing::warn!("Failed to highlight {} block: {}", lang, e))
                .ok()
        });

        let Some(highlighted) = highlighted else {
            return format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(code)
            );
        };

        if self.line_numbers {
            self.add_line_numbers(&highlighted, code, lang)
        } else {
            format!(
                r#"<div class="highlight {}">{}</div>"#,
                escape_html(lang),
                highlighted
            )
        }
    }

    /// Place a line-number gutter beside the highlighted code
    fn add_line_numbers(&self, highlighted: &str, code: &str, lang: &str) -> String {
        let line_count = code.lines().count().max(1);

        let gutter = (1..=line_count)
            .map(|i| format!(r#"<span class="line-number">{}</span>"#, i))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<div class="highlight {}"><pre class="gutter">{}</pre>{}</div>"#,
            escape_html(lang),
            gutter,
            highlighted
        )
    }
}

impl Component for CodeHighlighter {
    fn render(&self, props: &Props<'_>) -> String {
        match props.code {
            Some(block) => self.highlight(&block.code, block.language.as_deref()),
            None => format!("<code>{}</code>", props.children),
        }
    }
}
