//! Handlers for figures, images, and notes.

use crate::html::escape_attr;
use crate::node::DocumentNode;
use crate::registry::handler::{render_children, RecurseFn, TagHandler};
use crate::registry::types::{HandlerKind, RenderContext, Rendered};

/// Handler for `<figure>` elements.
///
/// Children render in document order; a head child becomes the caption.
pub struct FigureHandler;

impl TagHandler for FigureHandler {
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
        for child in node.child_elements() {
            if child.tag == "head" {
                let caption = render_children(child, context, recurse);
                if !caption.is_empty() {
                    parts.push(format!("<figcaption>{caption}</figcaption>"));
                }
            } else {
                let result = recurse(child, context);
                if !result.html.is_empty() {
                    parts.push(result.html);
                }
            }
        }

        if parts.is_empty() {
            Rendered::empty()
        } else {
            Rendered::new(format!("<figure>\n{}\n</figure>", parts.join("\n")))
        }
    }
}

/// Handler for block-level `<graphic>` elements.
pub struct GraphicHandler;

impl TagHandler for GraphicHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Block
    }

    fn handle(
        &self,
        node: &DocumentNode,
        _context: &mut RenderContext<'_>,
        _recurse: &RecurseFn<'_>,
    ) -> Rendered {
        match node.attribute("url") {
            Some(url) if !url.is_empty() => {
                Rendered::new(format!(r#"<img src="{}" alt=""/>"#, escape_attr(url)))
            }
            _ => {
                tracing::warn!(tag = %node.tag, "Graphic without a url attribute, rendering nothing");
                Rendered::empty()
            }
        }
    }
}

/// Handler for `<note>` elements.
///
/// With a note collector on the context, the note body is deferred to the
/// end of the page and replaced by a numbered footnote marker. Without one,
/// the note renders inline in parentheses.
pub struct NoteHandler;

impl TagHandler for NoteHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Inline
    }

    fn handle(
        &self,
        node: &DocumentNode,
        context: &mut RenderContext<'_>,
        recurse: &RecurseFn<'_>,
    ) -> Rendered {
        let body = render_children(node, context, recurse);
        if body.is_empty() {
            return Rendered::empty();
        }

        match context.notes.as_deref_mut() {
            Some(collector) => {
                let number = collector.add_note(body);
                Rendered::new(format!(
                    r##"<sup class="footnote-ref" id="fnref{number}"><a href="#fn{number}">{number}</a></sup>"##
                ))
            }
            None => Rendered::new(format!(r#"<span class="note">({body})</span>"#)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::parse_document;
    use crate::registry::{create_prose_catalog, NoteCollector, RenderContext, RenderEngine};

    fn render(xml: &str) -> String {
        let engine = RenderEngine::new(create_prose_catalog());
        let roots = parse_document(xml).expect("valid test xml");
        let mut context = RenderContext::new("en");
        engine.render(&roots[0], &mut context).html
    }

    #[test]
    fn test_figure_with_caption_and_image() {
        let xml = r#"<figure><head>Overview</head><graphic url="fig1.png"/></figure>"#;
        assert_eq!(
            render(xml),
            "<figure>\n<figcaption>Overview</figcaption>\n<img src=\"fig1.png\" alt=\"\"/>\n</figure>"
        );
    }

    #[test]
    fn test_figure_keeps_child_order() {
        let xml = r#"<figure><graphic url="a.png"/><head>After</head></figure>"#;
        let html = render(xml);
        let img = html.find("<img").expect("image rendered");
        let caption = html.find("<figcaption>").expect("caption rendered");
        assert!(img < caption);
    }

    #[test]
    fn test_empty_figure_renders_nothing() {
        assert_eq!(render("<figure></figure>"), "");
    }

    #[test]
    fn test_graphic_url_is_attribute_escaped() {
        assert_eq!(
            render(r#"<graphic url="a&quot;b.png"/>"#),
            r#"<img src="a&quot;b.png" alt=""/>"#
        );
    }

    #[test]
    fn test_graphic_without_url_renders_nothing() {
        assert_eq!(render("<graphic/>"), "");
    }

    #[test]
    fn test_note_without_collector_renders_inline() {
        assert_eq!(
            render("<p>claim<note>see appendix</note></p>"),
            r#"<p>claim<span class="note">(see appendix)</span></p>"#
        );
    }

    #[test]
    fn test_note_with_collector_emits_marker() {
        let engine = RenderEngine::new(create_prose_catalog());
        let roots = parse_document("<p>claim<note>see appendix</note></p>").unwrap();
        let mut notes = NoteCollector::new();
        let mut context = RenderContext::new("en").with_notes(&mut notes);

        let html = engine.render(&roots[0], &mut context).html;
        assert_eq!(
            html,
            r##"<p>claim<sup class="footnote-ref" id="fnref1"><a href="#fn1">1</a></sup></p>"##
        );
        assert_eq!(notes.count(), 1);
        assert_eq!(notes.notes()[0].html, "see appendix");
    }

    #[test]
    fn test_notes_number_in_document_order() {
        let engine = RenderEngine::new(create_prose_catalog());
        let roots =
            parse_document("<body><p>a<note>first</note></p><p>b<note>second</note></p></body>")
                .unwrap();
        let mut notes = NoteCollector::new();
        let mut context = RenderContext::new("en").with_notes(&mut notes);

        let html = engine.render(&roots[0], &mut context).html;
        assert!(html.contains(r##"<a href="#fn1">1</a>"##));
        assert!(html.contains(r##"<a href="#fn2">2</a>"##));
        assert_eq!(notes.notes()[0].html, "first");
        assert_eq!(notes.notes()[1].html, "second");
    }

    #[test]
    fn test_empty_note_renders_nothing() {
        let engine = RenderEngine::new(create_prose_catalog());
        let roots = parse_document("<p>claim<note></note></p>").unwrap();
        let mut notes = NoteCollector::new();
        let mut context = RenderContext::new("en").with_notes(&mut notes);

        assert_eq!(engine.render(&roots[0], &mut context).html, "<p>claim</p>");
        assert_eq!(notes.count(), 0);
    }
}
