//! Tag catalog mapping tag names to handlers.

use std::collections::{HashMap, HashSet};

use super::handler::TagHandler;
use super::types::{FallbackPolicy, RenderContext};
use crate::node::DocumentNode;

/// Catalog mapping tag names to rendering handlers.
///
/// A catalog registers handlers for specific tag names, marks tags to be
/// skipped entirely, and carries the fallback policy applied to tags that
/// are neither registered nor skipped. Catalogs can be scoped to a subtree
/// through the render context, shadowing the catalogs outside them.
pub struct TagCatalog {
    handlers: HashMap<String, Box<dyn TagHandler>>,
    skip_tags: HashSet<String>,
    fallback: FallbackPolicy,
}

impl TagCatalog {
    /// Create a new empty catalog with the pass-through fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            skip_tags: HashSet::new(),
            fallback: FallbackPolicy::PassThrough,
        }
    }

    /// Set the fallback policy for unregistered tags.
    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Register a handler for a specific tag name.
    pub fn register(&mut self, tag_name: impl Into<String>, handler: impl TagHandler + 'static) {
        self.handlers.insert(tag_name.into(), Box::new(handler));
    }

    /// Mark tags as skip (don't render, don't recurse).
    pub fn skip(&mut self, tag_names: impl IntoIterator<Item = impl Into<String>>) {
        for tag in tag_names {
            self.skip_tags.insert(tag.into());
        }
    }

    /// Get the appropriate handler for a node.
    ///
    /// Returns `None` if the node's tag should be skipped or has no handler.
    pub fn get_handler(
        &self,
        node: &DocumentNode,
        context: &RenderContext<'_>,
    ) -> Option<&dyn TagHandler> {
        if self.skip_tags.contains(&node.tag) {
            return None;
        }

        self.handlers
            .get(&node.tag)
            .filter(|h| h.can_handle(node, context))
            .map(|h| h.as_ref())
    }

    /// Check if a tag should be skipped.
    #[must_use]
    pub fn should_skip(&self, tag_name: &str) -> bool {
        self.skip_tags.contains(tag_name)
    }

    /// Check if a handler is registered for a tag.
    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        self.handlers.contains_key(tag_name)
    }

    /// The fallback policy for unregistered tags.
    #[must_use]
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Return set of all registered tag names.
    #[must_use]
    pub fn registered_tags(&self) -> HashSet<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Return set of all skipped tag names.
    #[must_use]
    pub fn skipped_tags(&self) -> HashSet<&str> {
        self.skip_tags.iter().map(|s| s.as_str()).collect()
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::new()
    }
}
