//! Tag handler trait definition.

use super::types::{HandlerKind, RenderContext, Rendered};
use crate::html::{escape_text, normalize_text};
use crate::node::{DocumentNode, NodeValue};

/// Function type for recursive rendering of child nodes.
pub type RecurseFn<'a> = dyn Fn(&DocumentNode, &mut RenderContext<'_>) -> Rendered + 'a;

/// Trait for tag handlers.
///
/// Handlers render a specific tag into an HTML fragment. They receive a
/// `recurse` function to render child nodes through the active catalog, so
/// a handler never needs to know which catalog governs its subtree.
pub trait TagHandler: Send + Sync {
    /// Return the rendering classification of this handler.
    fn kind(&self) -> HandlerKind;

    /// Check if this handler can render the given node.
    ///
    /// Default implementation always returns true.
    fn can_handle(&self, _node: &DocumentNode, _context: &RenderContext<'_>) -> bool {
        true
    }

    /// Render the node into an HTML fragment.
    ///
    /// # Arguments
    /// * `node` - The document node to render
    /// * `context` - Current render context
    /// * `recurse` - Function to call for recursive child rendering
    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered;
}

/// Render a node's content as inline HTML.
///
/// This is the common pattern for text-level elements: a flattened string
/// value is normalized and escaped directly; a child sequence is rendered
/// through `recurse` and joined without separators, preserving the spacing
/// carried by `#text` children. The joined result is trimmed at the edges.
pub fn render_children(
    node: &DocumentNode,
    context: &mut RenderContext<'_>,
    recurse: &RecurseFn<'_>,
) -> String {
    match &node.value {
        NodeValue::Text(text) => escape_text(&normalize_text(text)),
        NodeValue::Children(children) => {
            let mut parts: Vec<String> = Vec::new();
            for child in children {
                let result = recurse(child, context);
                if !result.html.is_empty() {
                    parts.push(result.html);
                }
            }
            parts.join("").trim().to_string()
        }
    }
}

/// Render a node's content as a sequence of block fragments.
///
/// Like [`render_children`], but joins child fragments with newlines, the
/// convention for block-level containers (sections, list bodies, tables).
pub fn render_children_blocks(
    node: &DocumentNode,
    context: &mut RenderContext<'_>,
    recurse: &RecurseFn<'_>,
) -> String {
    match &node.value {
        NodeValue::Text(text) => escape_text(&normalize_text(text)),
        NodeValue::Children(children) => {
            let mut parts: Vec<String> = Vec::new();
            for child in children {
                let result = recurse(child, context);
                if !result.html.is_empty() {
                    parts.push(result.html);
                }
            }
            parts.join("\n")
        }
    }
}
