//! Handlers for formulas and embedded MathML.
//!
//! Formula content switches the dispatcher to a dedicated MathML catalog,
//! where elements are re-emitted verbatim (tag, attributes, text) instead of
//! being mapped to prose markup.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::html::escape_attr;
use crate::node::DocumentNode;
use crate::registry::core::TagCatalog;
use crate::registry::handler::{render_children, RecurseFn, TagHandler};
use crate::registry::types::{HandlerKind, RenderContext, Rendered};

/// Serialize an attribute map back to XML attribute syntax.
///
/// Keys come out in sorted order, values escaped for attribute context.
fn format_attributes(attributes: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out
}

/// Handler that re-emits a MathML element as-is.
///
/// Browsers render MathML natively, so `<math>` subtrees pass through with
/// their original tags and attributes. Content is still escaped.
pub struct MathMlHandler;

impl TagHandler for MathMlHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let attrs = format_attributes(&node.attributes);
        if node.as_text().is_none() && node.children().is_empty() {
            return Rendered::new(format!("<{}{attrs}/>", node.tag));
        }
        let inner = render_children(node, context, recurse);
        Rendered::new(format!("<{0}{attrs}>{inner}</{0}>", node.tag))
    }
}

/// Handler for `<formula>` elements.
///
/// Pushes the MathML catalog for the duration of the children, so nested
/// `<math>` markup is re-emitted rather than treated as prose. Tags the
/// wrapper as display math when `rend="display"`.
pub struct FormulaHandler {
    math_catalog: Arc<TagCatalog>,
}

impl FormulaHandler {
    #[must_use]
    pub fn new(math_catalog: Arc<TagCatalog>) -> Self {
        Self { math_catalog }
    }
}

impl TagHandler for FormulaHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        context.push_catalog(Arc::clone(&self.math_catalog));
        let inner = render_children(node, context, recurse);
        context.pop_catalog();

        if inner.is_empty() {
            return Rendered::empty();
        }
        let class = if node.attribute("rend") == Some("display") {
            "formula formula-display"
        } else {
            "formula"
        };
        Rendered::new(format!(r#"<span class="{class}">{inner}</span>"#))
    }
}

/// Handler for `<graphic>` inside formula content.
///
/// Formula graphics are rendered images of the equation, emitted as inline
/// `<img>` elements rather than figure blocks.
pub struct InlineGraphicHandler;

impl TagHandler for InlineGraphicHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        _context: &mut RenderContext<'_>,
        _recurse: &RecurseFn<'_>,
    ) -> Rendered {
        match node.attribute("url") {
            Some(url) if !url.is_empty() => Rendered::new(format!(
                r#"<img class="formula-graphic" src="{}" alt=""/>"#,
                escape_attr(url)
            )),
            _ => {
                tracing::warn!(tag = %node.tag, "Graphic without a url attribute, rendering nothing");
                Rendered::empty()
            }
        }
    }
}
