//! Markdown to document tree conversion

use pulldown_cmark::{Alignment, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

use super::tree::{CodeBlock, Element, Node, TocEntry};

/// Result of converting a markdown body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBody {
    pub nodes: Vec<Node>,
    pub toc: Vec<TocEntry>,
}

/// Converts markdown into a [`Node`] tree
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // Front-matter is split off beforehand by FrontMatter::parse(),
        // so YAML metadata blocks stay disabled here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM;

        Self { options }
    }

    /// Convert a markdown body
    pub fn render(&self, markdown: &str) -> ParsedBody {
        let mut builder = TreeBuilder::default();

        for event in Parser::new_ext(markdown, self.options) {
            builder.event(event);
        }

        builder.finish()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<Element>,
    toc: Vec<TocEntry>,
    /// (info string, collected text) while inside a code block
    code_block: Option<(String, String)>,
    heading_ids: HashMap<String, usize>,
    table_alignments: Vec<Alignment>,
    table_cell: usize,
    in_table_head: bool,
}

impl TreeBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code_block = Some((info, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, mut code)) = self.code_block.take() {
                    if code.ends_with('\n') {
                        code.pop();
                    }
                    self.append(Node::CodeBlock(CodeBlock::from_info(&info, code)));
                }
            }
            Event::Text(text) if self.code_block.is_some() => {
                if let Some((_, code)) = self.code_block.as_mut() {
                    code.push_str(&text);
                }
            }

            // HTML blocks are a sequence of Html events; no wrapper element
            Event::Start(Tag::HtmlBlock) | Event::End(TagEnd::HtmlBlock) => {}

            Event::Start(Tag::TableHead) => {
                self.in_table_head = true;
                self.table_cell = 0;
                self.open(Element::new("thead"));
                self.open(Element::new("tr"));
            }
            Event::End(TagEnd::TableHead) => {
                self.in_table_head = false;
                self.close();
                self.close();
            }

            Event::Start(tag) => {
                let element = self.element_for(tag);
                self.open(element);
            }
            Event::End(TagEnd::Heading(_)) => self.close_heading(),
            Event::End(TagEnd::Image) => self.close_image(),
            Event::End(_) => self.close(),

            Event::Text(text) => self.append(Node::text(text.to_string())),
            Event::Code(code) => self.append(Node::Code {
                value: code.to_string(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => self.append(Node::Html {
                value: html.to_string(),
            }),
            Event::SoftBreak => self.append(Node::text("\n")),
            Event::HardBreak => self.append(Node::Element(Element::new("br"))),
            Event::Rule => self.append(Node::Element(Element::new("hr"))),
            Event::FootnoteReference(label) => {
                let link = Element {
                    children: vec![Node::text(label.to_string())],
                    ..Element::new("a").with_attr("href", format!("#fn-{}", label))
                };
                let sup = Element {
                    children: vec![Node::Element(link)],
                    ..Element::new("sup").with_attr("class", "footnote-reference")
                };
                self.append(Node::Element(sup));
            }
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("input")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if checked {
                    input = input.with_attr("checked", "");
                }
                self.append(Node::Element(input));
            }
            _ => {}
        }
    }

    fn element_for(&mut self, tag: Tag<'_>) -> Element {
        match tag {
            Tag::Paragraph => Element::new("p"),
            Tag::Heading {
                level, id, classes, ..
            } => {
                let mut el = Element::new(format!("h{}", level as u8));
                if let Some(id) = id {
                    el = el.with_attr("id", id.to_string());
                }
                if !classes.is_empty() {
                    el = el.with_attr("class", join(&classes));
                }
                el
            }
            Tag::BlockQuote { .. } => Element::new("blockquote"),
            Tag::List(Some(start)) => {
                let el = Element::new("ol");
                if start != 1 {
                    el.with_attr("start", start.to_string())
                } else {
                    el
                }
            }
            Tag::List(None) => Element::new("ul"),
            Tag::Item => Element::new("li"),
            Tag::FootnoteDefinition(label) => Element::new("div")
                .with_attr("class", "footnote-definition")
                .with_attr("id", format!("fn-{}", label)),
            Tag::DefinitionList => Element::new("dl"),
            Tag::DefinitionListTitle => Element::new("dt"),
            Tag::DefinitionListDefinition => Element::new("dd"),
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                Element::new("table")
            }
            Tag::TableRow => {
                self.table_cell = 0;
                Element::new("tr")
            }
            Tag::TableCell => {
                let el = Element::new(if self.in_table_head { "th" } else { "td" });
                let align = self.table_alignments.get(self.table_cell).copied();
                self.table_cell += 1;
                match align {
                    Some(Alignment::Left) => el.with_attr("style", "text-align: left"),
                    Some(Alignment::Center) => el.with_attr("style", "text-align: center"),
                    Some(Alignment::Right) => el.with_attr("style", "text-align: right"),
                    _ => el,
                }
            }
            Tag::Emphasis => Element::new("em"),
            Tag::Strong => Element::new("strong"),
            Tag::Strikethrough => Element::new("del"),
            Tag::Link {
                dest_url, title, ..
            } => with_title(Element::new("a").with_attr("href", dest_url.to_string()), &title),
            Tag::Image {
                dest_url, title, ..
            } => with_title(Element::new("img").with_attr("src", dest_url.to_string()), &title),
            _ => Element::new("div"),
        }
    }

    fn open(&mut self, element: Element) {
        self.stack.push(element);
    }

    fn close(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.append(Node::Element(element));
        }
    }

    fn close_heading(&mut self) {
        let Some(mut heading) = self.stack.pop() else {
            return;
        };

        let title = Node::Element(heading.clone()).text_content();
        let id = match heading.attr("id") {
            Some(id) => self.unique_id(id),
            None => self.unique_id(&slug::slugify(&title)),
        };
        heading.attrs.retain(|(k, _)| k != "id");
        heading.attrs.insert(0, ("id".to_string(), id.clone()));

        let level = heading.tag[1..].parse().unwrap_or(1);
        self.toc.push(TocEntry { level, id, title });
        self.append(Node::Element(heading));
    }

    /// Image children are its alt text; fold them into an attribute
    fn close_image(&mut self) {
        let Some(mut image) = self.stack.pop() else {
            return;
        };

        let alt = Node::Element(image.clone()).text_content();
        image.children.clear();
        image.attrs.insert(1, ("alt".to_string(), alt));
        self.append(Node::Element(image));
    }

    fn unique_id(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "section" } else { base };
        let count = self.heading_ids.entry(base.to_string()).or_insert(0);
        let id = if *count == 0 {
            base.to_string()
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        id
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    fn finish(mut self) -> ParsedBody {
        while !self.stack.is_empty() {
            self.close();
        }

        ParsedBody {
            nodes: self.root,
            toc: self.toc,
        }
    }
}

fn with_title(element: Element, title: &CowStr<'_>) -> Element {
    if title.is_empty() {
        element
    } else {
        element.with_attr("title", title.to_string())
    }
}

fn join(classes: &[CowStr<'_>]) -> String {
    classes
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
