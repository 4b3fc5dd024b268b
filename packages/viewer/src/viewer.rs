//! Main viewer service that ties all components together.

use crate::config::{validate_language, DEFAULT_LANGUAGE};
use crate::error::Result;
use crate::header::{extract_meta, DocumentMeta};
use crate::html::render_page;
use crate::node::{find_by_path, parse_document, remove_empty_text_values, DocumentNode};
use crate::registry::{create_prose_catalog, Footnote, NoteCollector, RenderContext, RenderEngine};

/// Options controlling how a document is rendered.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Preferred language for abstract selection and the page `lang`
    /// attribute. Falls back to the document's declared language, then to
    /// the default.
    pub language: Option<String>,
}

impl RenderOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred language (builder style).
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// A fully rendered document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Metadata extracted from the header.
    pub meta: DocumentMeta,

    /// Language the page was rendered for.
    pub language: String,

    /// Rendered HTML of the document body alone.
    pub body: String,

    /// Footnotes collected while rendering the body.
    pub footnotes: Vec<Footnote>,

    /// The complete HTML page.
    pub page: String,
}

/// Parse a TEI document and load its cleaned tag tree.
///
/// Parses the XML and strips whitespace-only text nodes left over from
/// pretty-printing.
///
/// # Arguments
/// * `xml` - The TEI document text
///
/// # Returns
/// Root nodes of the cleaned tree
pub fn load_tree(xml: &str) -> Result<Vec<DocumentNode>> {
    let roots = parse_document(xml)?;
    Ok(remove_empty_text_values(&roots))
}

/// Render a TEI document to a complete HTML page.
///
/// # Arguments
/// * `xml` - The TEI document text
/// * `options` - Render options
///
/// # Returns
/// A `RenderedDocument` with the page, body, metadata, and footnotes
pub fn render_document(xml: &str, options: &RenderOptions) -> Result<RenderedDocument> {
    // Validate inputs
    if let Some(language) = &options.language {
        validate_language(language)?;
    }

    // Parse and clean the tag tree
    let roots = load_tree(xml)?;

    // Extract header metadata
    let meta = extract_meta(&roots);

    // Resolve the display language: requested, then declared, then default
    let language = options
        .language
        .clone()
        .or_else(|| meta.language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    // Render the text section
    let engine = RenderEngine::new(create_prose_catalog());
    let mut notes = NoteCollector::new();
    let body = match find_by_path(&roots, "TEI/text") {
        Some(text) => {
            let mut context = RenderContext::new(&language).with_notes(&mut notes);
            engine.render(text, &mut context).html
        }
        None => {
            tracing::warn!("Document has no text section, rendering an empty body");
            String::new()
        }
    };
    let footnotes = notes.into_notes();

    // Assemble the page
    let page = render_page(&meta, &body, &footnotes, &language);

    Ok(RenderedDocument {
        meta,
        language,
        body,
        footnotes,
        page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;

    const SAMPLE_DOCUMENT: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader>
    <fileDesc>
      <titleStmt>
        <title>Tree Rendering</title>
      </titleStmt>
    </fileDesc>
    <profileDesc>
      <langUsage>
        <language ident="fr"/>
      </langUsage>
      <abstract xml:lang="en"><p>Summary.</p></abstract>
    </profileDesc>
  </teiHeader>
  <text>
    <body>
      <div>
        <head>Introduction</head>
        <p>First paragraph with a <hi rend="italic">highlight</hi>.</p>
        <p>Second paragraph<note>with a note</note>.</p>
      </div>
    </body>
  </text>
</TEI>"#;

    #[test]
    fn test_render_document() {
        let rendered = render_document(SAMPLE_DOCUMENT, &RenderOptions::new()).unwrap();

        assert_eq!(rendered.meta.title, "Tree Rendering");
        assert!(rendered.body.contains(r#"<h2 id="introduction">Introduction</h2>"#));
        assert!(rendered.body.contains("<em>highlight</em>"));
        assert!(rendered.page.contains("<title>Tree Rendering</title>"));
        assert!(rendered.page.contains(&rendered.body));
    }

    #[test]
    fn test_render_document_collects_footnotes() {
        let rendered = render_document(SAMPLE_DOCUMENT, &RenderOptions::new()).unwrap();

        assert_eq!(rendered.footnotes.len(), 1);
        assert_eq!(rendered.footnotes[0].html, "with a note");
        assert!(rendered.body.contains("fnref1"));
        assert!(rendered.page.contains("<li id=\"fn1\">with a note"));
    }

    #[test]
    fn test_render_document_language_resolution() {
        // Declared language wins over the default
        let declared = render_document(SAMPLE_DOCUMENT, &RenderOptions::new()).unwrap();
        assert_eq!(declared.language, "fr");

        // Requested language wins over the declared one
        let requested =
            render_document(SAMPLE_DOCUMENT, &RenderOptions::new().with_language("de")).unwrap();
        assert_eq!(requested.language, "de");
    }

    #[test]
    fn test_render_document_default_language() {
        let xml = "<TEI><text><body><p>x</p></body></text></TEI>";
        let rendered = render_document(xml, &RenderOptions::new()).unwrap();
        assert_eq!(rendered.language, "en");
    }

    #[test]
    fn test_render_document_without_text_section() {
        let xml = "<TEI><teiHeader/></TEI>";
        let rendered = render_document(xml, &RenderOptions::new()).unwrap();

        assert_eq!(rendered.body, "");
        assert!(rendered.page.contains("<main>"));
    }

    #[test]
    fn test_render_document_rejects_invalid_language() {
        let result = render_document(
            SAMPLE_DOCUMENT,
            &RenderOptions::new().with_language("not a language"),
        );
        assert!(matches!(result, Err(ViewerError::InvalidLanguage(_))));
    }

    #[test]
    fn test_render_document_rejects_invalid_xml() {
        let result = render_document("<TEI>unclosed", &RenderOptions::new());
        assert!(matches!(result, Err(ViewerError::XmlParse(_))));
    }

    #[test]
    fn test_load_tree_strips_whitespace_nodes() {
        let roots = load_tree("<body>\n  <p>a</p>\n</body>").unwrap();
        assert_eq!(roots[0].children().len(), 1);
    }
}
