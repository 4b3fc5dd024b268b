//! Structural handlers for container elements.
//!
//! These handlers render the elements that shape the document: divisions,
//! headings, lists, and tables. Divisions track nesting depth so headings
//! come out at the right level.

use crate::config::{sanitize_anchor, BASE_HEADING_LEVEL, MAX_HEADING_LEVEL};
use crate::html::escape_attr;
use crate::node::DocumentNode;
use crate::registry::handler::{render_children, render_children_blocks, RecurseFn, TagHandler};
use crate::registry::types::{HandlerKind, RenderContext, Rendered};

/// Heading level for the current division depth, clamped to `h6`.
fn heading_level(depth: usize) -> usize {
    let level = usize::from(BASE_HEADING_LEVEL) + depth.saturating_sub(1);
    level.min(usize::from(MAX_HEADING_LEVEL))
}

/// Handler for transparent containers (`text`, `body`, `front`, `back`).
///
/// Renders the children as a block sequence without wrapping markup.
pub struct ContainerHandler;

impl TagHandler for ContainerHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        Rendered::new(render_children_blocks(node, context, recurse))
    }
}

/// Handler for `<div>` (text division) elements.
///
/// Increments the nesting depth around its children and wraps them in a
/// section, tagging the division type as a class when present.
pub struct DivHandler;

impl TagHandler for DivHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        context.depth += 1;
        let inner = render_children_blocks(node, context, recurse);
        context.depth -= 1;

        if inner.is_empty() {
            return Rendered::empty();
        }
        let html = match node.attribute("type") {
            Some(div_type) if !div_type.is_empty() => {
                format!(
                    "<section class=\"{}\">\n{inner}\n</section>",
                    escape_attr(div_type)
                )
            }
            _ => format!("<section>\n{inner}\n</section>"),
        };
        Rendered::new(html)
    }
}

/// Handler for `<head>` (heading) elements.
///
/// The heading level follows the division nesting depth, starting at `h2`
/// and clamped at `h6`. Headings with usable text get an anchor id.
pub struct HeadHandler;

impl TagHandler for HeadHandler {
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

        let level = heading_level(context.depth);
        let anchor = sanitize_anchor(&node.text_content());
        let html = if anchor.is_empty() {
            format!("<h{level}>{inner}</h{level}>")
        } else {
            format!(r#"<h{level} id="{anchor}">{inner}</h{level}>"#)
        };
        Rendered::new(html)
    }
}

/// Handler for `<list>` elements.
///
/// Renders item children as a list; `type="ordered"` selects a numbered
/// list and `type="gloss"` a definition list of label/item pairs. A head
/// child becomes a lead-in line rather than a heading.
pub struct ListHandler;

impl TagHandler for ListHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        if node.attribute("type") == Some("gloss") {
            return render_gloss_list(node, context, recurse);
        }

        let mut parts: Vec<String> = Vec::new();
        if let Some(head) = node.find_child("head") {
            let lead = render_children(head, context, recurse);
            if !lead.is_empty() {
                parts.push(format!(r#"<p class="list-head">{lead}</p>"#));
            }
        }

        let mut items: Vec<String> = Vec::new();
        for item in node.find_children("item") {
            let result = recurse(item, context);
            if !result.html.is_empty() {
                items.push(result.html);
            }
        }

        if items.is_empty() {
            return if parts.is_empty() {
                Rendered::empty()
            } else {
                Rendered::new(parts.join("\n"))
            };
        }

        let list_tag = if node.attribute("type") == Some("ordered") {
            "ol"
        } else {
            "ul"
        };
        parts.push(format!(
            "<{list_tag}>\n{}\n</{list_tag}>",
            items.join("\n")
        ));
        Rendered::new(parts.join("\n"))
    }
}

/// Render a gloss list as a definition list of label/item pairs.
fn render_gloss_list(
    node: &DocumentNode,
    context: &mut RenderContext<'_>,
    recurse: &RecurseFn<'_>,
) -> Rendered {
    let mut entries: Vec<String> = Vec::new();
    for child in node.child_elements() {
        match child.tag.as_str() {
            "label" => {
                let term = render_children(child, context, recurse);
                if !term.is_empty() {
                    entries.push(format!("<dt>{term}</dt>"));
                }
            }
            "item" => {
                let definition = render_children(child, context, recurse);
                if !definition.is_empty() {
                    entries.push(format!("<dd>{definition}</dd>"));
                }
            }
            _ => {}
        }
    }

    if entries.is_empty() {
        Rendered::empty()
    } else {
        Rendered::new(format!("<dl>\n{}\n</dl>", entries.join("\n")))
    }
}

/// Handler for `<item>` (list item) elements.
pub struct ItemHandler;

impl TagHandler for ItemHandler {
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
        Rendered::new(format!("<li>{inner}</li>"))
    }
}

/// Handler for standalone `<label>` elements.
pub struct LabelHandler;

impl TagHandler for LabelHandler {
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
        Rendered::new(format!(r#"<span class="label">{inner}</span>"#))
    }
}

/// Handler for `<table>` elements.
///
/// Renders row children; a head child becomes the table caption.
pub struct TableHandler;

impl TagHandler for TableHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let mut parts: Vec<String> = Vec::new();
        if let Some(head) = node.find_child("head") {
            let caption = render_children(head, context, recurse);
            if !caption.is_empty() {
                parts.push(format!("<caption>{caption}</caption>"));
            }
        }

        let mut rows: Vec<String> = Vec::new();
        for row in node.find_children("row") {
            let result = recurse(row, context);
            if !result.html.is_empty() {
                rows.push(result.html);
            }
        }
        if rows.is_empty() {
            return Rendered::empty();
        }
        parts.extend(rows);

        Rendered::new(format!("<table>\n{}\n</table>", parts.join("\n")))
    }
}

/// Handler for `<row>` elements.
pub struct RowHandler;

impl TagHandler for RowHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let mut cells: Vec<String> = Vec::new();
        for cell in node.find_children("cell") {
            let result = recurse(cell, context);
            if !result.html.is_empty() {
                cells.push(result.html);
            }
        }
        if cells.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(format!("<tr>{}</tr>", cells.join("")))
    }
}

/// Handler for `<cell>` elements.
///
/// Emits a header cell for `role="label"`, a data cell otherwise. Empty
/// cells still render so rows keep their shape.
pub struct CellHandler;

impl TagHandler for CellHandler {
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
        let cell_tag = if node.attribute("role") == Some("label") {
            "th"
        } else {
            "td"
        };
        Rendered::new(format!("<{cell_tag}>{inner}</{cell_tag}>"))
    }
}
