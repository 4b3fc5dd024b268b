//! Text node handler.

use crate::html::{escape_text, normalize_text};
use crate::node::DocumentNode;
use crate::registry::handler::{RecurseFn, TagHandler};
use crate::registry::types::{HandlerKind, RenderContext, Rendered};

/// Handler for `#text` nodes.
///
/// Emits the text normalized and escaped. Text nodes carry the spacing
/// between inline siblings, so whitespace collapses to single spaces but is
/// not stripped.
pub struct TextHandler;

impl TagHandler for TextHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        _context: &mut RenderContext<'_>,
        _recurse: &RecurseFn<'_>,
    ) -> Rendered {
        match node.as_text() {
            Some(text) => Rendered::new(escape_text(&normalize_text(text))),
            None => {
                tracing::warn!(tag = %node.tag, "Text node without a string value, rendering nothing");
                Rendered::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeValue;

    fn handle(node: &DocumentNode) -> Rendered {
        let handler = TextHandler;
        let mut context = RenderContext::new("en");
        let recurse = |_: &DocumentNode, _: &mut RenderContext<'_>| Rendered::empty();
        handler.handle(node, &mut context, &recurse)
    }

    #[test]
    fn test_text_is_escaped() {
        let node = DocumentNode::text("AT&T <3");
        assert_eq!(handle(&node).html, "AT&amp;T &lt;3");
    }

    #[test]
    fn test_whitespace_collapses_but_survives() {
        let node = DocumentNode::text("\n   between\n   ");
        assert_eq!(handle(&node).html, " between ");
    }

    #[test]
    fn test_malformed_text_node_renders_nothing() {
        // A #text node should never carry children; degrade to empty.
        let node = DocumentNode {
            tag: "#text".to_string(),
            attributes: Default::default(),
            value: NodeValue::Children(vec![DocumentNode::text("x")]),
        };
        assert!(handle(&node).is_empty());
    }
}
