//! Handlers for keyword lists and their terms.
//!
//! Keyword sections get their own catalog scope: inside it, `<term>` renders
//! as a list entry (nesting into sub-term lists) instead of the inline span
//! used in prose, and tags unknown to both catalogs are dropped rather than
//! passed through.

use std::sync::Arc;

use crate::html::{escape_text, normalize_text};
use crate::node::DocumentNode;
use crate::registry::core::TagCatalog;
use crate::registry::handler::{render_children_blocks, RecurseFn, TagHandler};
use crate::registry::types::{HandlerKind, RenderContext, Rendered};

/// Handler for `<keywords>` elements.
///
/// Pushes the keyword catalog for the duration of the children and wraps
/// the resulting entries in a keyword list.
pub struct KeywordsHandler {
    keyword_catalog: Arc<TagCatalog>,
}

impl KeywordsHandler {
    #[must_use]
    pub fn new(keyword_catalog: Arc<TagCatalog>) -> Self {
        Self { keyword_catalog }
    }
}

impl TagHandler for KeywordsHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        // Keyword sections occasionally hold plain text instead of term
        // elements; render that as a single entry.
        let inner = match node.as_text() {
            Some(text) => format!(
                r#"<li class="keyword">{}</li>"#,
                escape_text(&normalize_text(text))
            ),
            None => {
                context.push_catalog(Arc::clone(&self.keyword_catalog));
                let entries = render_children_blocks(node, context, recurse);
                context.pop_catalog();
                entries
            }
        };

        if inner.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(format!("<ul class=\"keywords\">\n{inner}\n</ul>"))
    }
}

/// Handler for `<term>` inside a keyword scope.
///
/// Renders a list entry; nested terms become a sub-term list under their
/// parent entry. Non-term children contribute to the entry text.
pub struct TermHandler;

impl TagHandler for TermHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let mut nested: Vec<String> = Vec::new();
        let mut inline: Vec<String> = Vec::new();

        match node.as_text() {
            Some(text) => {
                let text = escape_text(&normalize_text(text));
                if !text.is_empty() {
                    inline.push(text);
                }
            }
            None => {
                for child in node.children() {
                    let result = recurse(child, context);
                    if result.html.is_empty() {
                        continue;
                    }
                    if child.tag == "term" {
                        nested.push(result.html);
                    } else {
                        inline.push(result.html);
                    }
                }
            }
        }

        let text = inline.join("").trim().to_string();
        if text.is_empty() && nested.is_empty() {
            return Rendered::empty();
        }

        let mut html = format!(r#"<li class="keyword">{text}"#);
        if !nested.is_empty() {
            html.push_str(&format!(
                "\n<ul class=\"sub-terms\">\n{}\n</ul>\n",
                nested.join("\n")
            ));
        }
        html.push_str("</li>");
        Rendered::new(html)
    }
}
