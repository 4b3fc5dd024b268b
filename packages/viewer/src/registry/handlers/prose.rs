//! Inline prose handlers for text-level elements.
//!
//! These handlers render the elements that occur inside running text, such
//! as hi (rendition), ref (link), q (inline quote), and term.

use crate::html::{escape_attr, escape_text};
use crate::node::DocumentNode;
use crate::registry::handler::{render_children, render_children_blocks, RecurseFn, TagHandler};
use crate::registry::types::{HandlerKind, RenderContext, Rendered};

/// Handler for `<p>` (paragraph) elements.
pub struct ParagraphHandler;

impl TagHandler for ParagraphHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let inner = render_children(node, context, recurse);
        if inner.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(format!("<p>{inner}</p>"))
    }
}

/// Handler for `<hi>` (highlighted/rendition) elements.
///
/// Maps the `rend` attribute to an HTML phrase element; an unknown or
/// missing rendition falls back to emphasis.
pub struct HiHandler;

impl TagHandler for HiHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let inner = render_children(node, context, recurse);
        if inner.is_empty() {
            return Rendered::empty();
        }

        let html = match node.attribute("rend") {
            Some("bold") | Some("b") => format!("<strong>{inner}</strong>"),
            Some("sup") | Some("superscript") => format!("<sup>{inner}</sup>"),
            Some("sub") | Some("subscript") => format!("<sub>{inner}</sub>"),
            Some("underline") | Some("u") => format!("<u>{inner}</u>"),
            Some("smallcaps") | Some("sc") => {
                format!(r#"<span class="smallcaps">{inner}</span>"#)
            }
            _ => format!("<em>{inner}</em>"),
        };
        Rendered::new(html)
    }
}

/// Handler for `<quote>` (block quotation) elements.
pub struct QuoteHandler;

impl TagHandler for QuoteHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let inner = render_children_blocks(node, context, recurse);
        if inner.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(format!("<blockquote>\n{inner}\n</blockquote>"))
    }
}

/// Handler for `<q>` (inline quotation) elements.
pub struct QHandler;

impl TagHandler for QHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let inner = render_children(node, context, recurse);
        if inner.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(format!("<q>{inner}</q>"))
    }
}

/// Handler for `<ref>` (reference/link) elements.
///
/// Renders an anchor when a target is present; a target-less ref degrades
/// to its plain content.
pub struct RefHandler;

impl TagHandler for RefHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let inner = render_children(node, context, recurse);

        match node.attribute("target") {
            Some(target) if !target.is_empty() => {
                let label = if inner.is_empty() {
                    escape_text(target)
                } else {
                    inner
                };
                Rendered::new(format!(r#"<a href="{}">{label}</a>"#, escape_attr(target)))
            }
            _ => {
                if inner.is_empty() {
                    Rendered::empty()
                } else {
                    Rendered::new(inner)
                }
            }
        }
    }
}

/// Handler for `<lb>` (line break) elements.
pub struct LineBreakHandler;

impl TagHandler for LineBreakHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        _node: &DocumentNode,
        _context: &mut RenderContext<'_>,
        _recurse: &RecurseFn<'_>,
    ) -> Rendered {
        Rendered::new("<br/>")
    }
}

/// Handler for `<term>` elements in running prose.
///
/// Keyword sections render terms through their own catalog; in prose a term
/// is just a marked span.
pub struct InlineTermHandler;

impl TagHandler for InlineTermHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let inner = render_children(node, context, recurse);
        if inner.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(format!(r#"<span class="term">{inner}</span>"#))
    }
}
