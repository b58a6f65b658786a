//! HTML serialization of the document tree

use super::{ComponentRegistry, Props, CODE_BLOCK, INLINE_CODE};
use crate::content::{CodeBlock, Element, Node};

/// Elements written without a closing tag
const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "input"];

/// Elements followed by a newline in the output
const BLOCK_ELEMENTS: [&str; 21] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "ul", "ol", "li", "table", "thead",
    "tr", "th", "td", "hr", "div", "dl", "dt", "dd",
];

/// Writes a [`Node`] tree as an HTML fragment
pub struct HtmlWriter<'a> {
    registry: &'a ComponentRegistry,
}

impl<'a> HtmlWriter<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Render nodes to HTML
    pub fn render(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.write_node(node, &mut out);
        }
        out
    }

    fn write_node(&self, node: &Node, out: &mut String) {
        match node {
            Node::Text { value } => out.push_str(&escape_html(value)),
            Node::Html { value } => out.push_str(value),
            Node::Code { value } => match self.registry.get(INLINE_CODE) {
                Some(component) => {
                    let escaped = escape_html(value);
                    out.push_str(&component.render(&Props {
                        tag: INLINE_CODE,
                        attrs: &[],
                        children: &escaped,
                        code: None,
                    }));
                }
                None => {
                    out.push_str("<code>");
                    out.push_str(&escape_html(value));
                    out.push_str("</code>");
                }
            },
            Node::CodeBlock(block) => {
                match self.registry.get(CODE_BLOCK) {
                    Some(component) => out.push_str(&component.render(&Props {
                        tag: CODE_BLOCK,
                        attrs: &[],
                        children: "",
                        code: Some(block),
                    })),
                    None => write_plain_code(block, out),
                }
                out.push('\n');
            }
            Node::Element(element) => self.write_element(element, out),
        }
    }

    fn write_element(&self, element: &Element, out: &mut String) {
        let children = self.render(&element.children);

        if let Some(component) = self.registry.get(&element.tag) {
            out.push_str(&component.render(&Props {
                tag: &element.tag,
                attrs: &element.attrs,
                children: &children,
                code: None,
            }));
        } else {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                if value.is_empty() {
                    out.push_str(&format!(" {}", name));
                } else {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
            }
            out.push('>');

            if !VOID_ELEMENTS.contains(&element.tag.as_str()) {
                out.push_str(&children);
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }

        if BLOCK_ELEMENTS.contains(&element.tag.as_str()) {
            out.push('\n');
        }
    }
}

fn write_plain_code(block: &CodeBlock, out: &mut String) {
    match &block.language {
        Some(lang) => out.push_str(&format!(
            r#"<pre><code class="language-{}">"#,
            escape_html(lang)
        )),
        None => out.push_str("<pre><code>"),
    }
    out.push_str(&escape_html(&block.code));
    out.push_str("</code></pre>");
}

/// Simple HTML escaping
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
