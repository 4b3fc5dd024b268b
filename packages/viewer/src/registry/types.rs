//! Types for the tag catalog system.

use std::fmt;
use std::sync::Arc;

use super::core::TagCatalog;
use crate::node::DocumentNode;

/// Classification of tag handlers for rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Block-level elements (div, p, list, figure).
    Block,
    /// Text-level elements (hi, ref, #text).
    Inline,
    /// Elements to ignore completely.
    Skip,
}

/// Policy for tags with no registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Render the children transparently, dropping the unknown tag itself.
    #[default]
    PassThrough,
    /// Render nothing for the whole subtree.
    Ignore,
}

/// Result from rendering a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// The produced HTML fragment.
    pub html: String,
}

impl Rendered {
    /// Create a new rendered fragment.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Create an empty fragment.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            html: String::new(),
        }
    }

    /// Whether the fragment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// A footnote collected during rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    /// 1-based footnote number, in order of appearance.
    pub number: usize,
    /// Rendered footnote body.
    pub html: String,
}

/// Collector for footnotes encountered during rendering.
///
/// Note elements register their body here and render as a numbered marker;
/// the page writer emits the collected bodies as a footnote section.
#[derive(Debug, Clone, Default)]
pub struct NoteCollector {
    notes: Vec<Footnote>,
    counter: usize,
}

impl NoteCollector {
    /// Create a new empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a footnote body and return its 1-based number.
    pub fn add_note(&mut self, html: impl Into<String>) -> usize {
        self.counter += 1;
        self.notes.push(Footnote {
            number: self.counter,
            html: html.into(),
        });
        self.counter
    }

    /// Get the collected footnotes.
    #[must_use]
    pub fn notes(&self) -> &[Footnote] {
        &self.notes
    }

    /// Take ownership of collected footnotes.
    #[must_use]
    pub fn into_notes(self) -> Vec<Footnote> {
        self.notes
    }

    /// Get the current count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.counter
    }
}

/// Context passed through rendering operations.
///
/// Carries the nesting depth for heading levels, the language selected for
/// the page, the footnote collector, and the catalog override stack that
/// scopes special catalogs (math, keywords) to the subtree that opened them.
pub struct RenderContext<'a> {
    /// Collector for footnotes; `None` renders notes inline.
    pub notes: Option<&'a mut NoteCollector>,

    /// Language selected for this render.
    pub language: String,

    /// Current section nesting depth (number of enclosing `div` levels).
    pub depth: usize,

    /// Scoped catalog overrides, innermost last.
    overrides: Vec<Arc<TagCatalog>>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            notes: None,
            language: language.into(),
            depth: 0,
            overrides: Vec::new(),
        }
    }

    /// Set the footnote collector.
    #[must_use]
    pub fn with_notes(mut self, notes: &'a mut NoteCollector) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Push a catalog override scoping the given catalog to a subtree.
    ///
    /// The caller owns the scope and must call [`Self::pop_catalog`] when the
    /// subtree is done.
    pub fn push_catalog(&mut self, catalog: Arc<TagCatalog>) {
        self.overrides.push(catalog);
    }

    /// Pop the innermost catalog override.
    pub fn pop_catalog(&mut self) -> Option<Arc<TagCatalog>> {
        self.overrides.pop()
    }

    /// Number of active catalog overrides.
    #[must_use]
    pub fn override_depth(&self) -> usize {
        self.overrides.len()
    }

    /// Find the innermost override that claims the given node, either by
    /// skipping its tag or by supplying a handler for it.
    #[must_use]
    pub fn resolve_override(&self, node: &DocumentNode) -> Option<Arc<TagCatalog>> {
        self.overrides
            .iter()
            .rev()
            .find(|catalog| catalog.should_skip(&node.tag) || catalog.get_handler(node, self).is_some())
            .cloned()
    }

    /// Fallback policy of the innermost override, if any is active.
    #[must_use]
    pub fn innermost_fallback(&self) -> Option<FallbackPolicy> {
        self.overrides.last().map(|catalog| catalog.fallback())
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("language", &self.language)
            .field("depth", &self.depth)
            .field("override_depth", &self.overrides.len())
            .field("has_notes", &self.notes.is_some())
            .finish()
    }
}
