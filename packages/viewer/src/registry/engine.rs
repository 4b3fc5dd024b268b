//! Render engine that walks the tree and dispatches nodes to handlers.

use super::core::TagCatalog;
use super::handler::render_children;
use super::types::{FallbackPolicy, RenderContext, Rendered};
use crate::node::DocumentNode;

/// Engine that renders document trees through a tag catalog.
///
/// The engine walks the tree and dispatches each node to its registered
/// handler. Catalog overrides pushed onto the context shadow the base
/// catalog for the subtree that pushed them, innermost first. A tag that no
/// active catalog knows falls back to the innermost catalog's policy:
/// pass-through (render children transparently) or ignore (render nothing).
/// Rendering never fails; questionable input degrades to empty output.
pub struct RenderEngine {
    catalog: TagCatalog,
}

impl RenderEngine {
    /// Create a new engine with the given base catalog.
    #[must_use]
    pub fn new(catalog: TagCatalog) -> Self {
        Self { catalog }
    }

    /// Get a reference to the base catalog.
    #[must_use]
    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    /// Render a node tree recursively.
    ///
    /// # Arguments
    /// * `node` - The document node to render
    /// * `context` - Current render context
    ///
    /// # Returns
    /// `Rendered` HTML fragment; empty for skipped or unrenderable nodes
    pub fn render(&self, node: &DocumentNode, context: &mut RenderContext<'_>) -> Rendered {
        let recurse =
            |child: &DocumentNode, ctx: &mut RenderContext<'_>| -> Rendered { self.render(child, ctx) };

        // An override that claims the tag shadows the base catalog.
        if let Some(catalog) = context.resolve_override(node) {
            if catalog.should_skip(&node.tag) {
                tracing::debug!(tag = %node.tag, "Skipping tag");
                return Rendered::empty();
            }
            if let Some(handler) = catalog.get_handler(node, context) {
                return handler.handle(node, context, &recurse);
            }
        }

        if self.catalog.should_skip(&node.tag) {
            tracing::debug!(tag = %node.tag, "Skipping tag");
            return Rendered::empty();
        }

        if let Some(handler) = self.catalog.get_handler(node, context) {
            return handler.handle(node, context, &recurse);
        }

        // No handler in any active catalog; the innermost catalog's
        // fallback policy decides.
        let policy = context
            .innermost_fallback()
            .unwrap_or_else(|| self.catalog.fallback());
        match policy {
            FallbackPolicy::PassThrough => {
                tracing::debug!(tag = %node.tag, "No handler for tag, passing children through");
                Rendered::new(render_children(node, context, &recurse))
            }
            FallbackPolicy::Ignore => {
                tracing::debug!(tag = %node.tag, "No handler for tag, rendering nothing");
                Rendered::empty()
            }
        }
    }

    /// Render a sequence of sibling nodes, joining block fragments with
    /// newlines.
    pub fn render_all(&self, nodes: &[DocumentNode], context: &mut RenderContext<'_>) -> Rendered {
        let mut parts: Vec<String> = Vec::new();
        for node in nodes {
            let result = self.render(node, context);
            if !result.html.is_empty() {
                parts.push(result.html);
            }
        }
        Rendered::new(parts.join("\n"))
    }
}
