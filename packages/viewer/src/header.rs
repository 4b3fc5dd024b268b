//! TEI header metadata extraction.
//!
//! The `teiHeader` element carries bibliographic metadata about a document,
//! including:
//! - Main title
//! - Authors and their affiliations
//! - Abstracts, possibly in several languages
//! - Keywords
//! - Publication info (journal, publisher, date)
//!
//! Extraction is tolerant throughout: a missing path yields an empty field,
//! never an error.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LANGUAGE;
use crate::enrichment::{remove_duplicate_nested_terms, terms_from_keywords, Term};
use crate::node::{find_by_path, remove_empty_text_values, DocumentNode};
use crate::registry::{create_prose_catalog, RenderContext, RenderEngine};

/// An author with display name and affiliations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Full display name.
    pub full_name: String,

    /// Institution names, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,
}

/// An abstract in a specific language, rendered to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedAbstract {
    /// Language tag (e.g., "en", "fr").
    pub lang: String,

    /// Rendered HTML body of the abstract.
    pub html: String,
}

/// Publication details from the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationInfo {
    /// Journal or collection title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,

    /// Publisher name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// Publication date, ISO-formatted when parseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl PublicationInfo {
    fn is_empty(&self) -> bool {
        self.journal.is_none() && self.publisher.is_none() && self.date.is_none()
    }
}

/// Metadata extracted from a document's `teiHeader`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Main document title; empty when the header carries none.
    pub title: String,

    /// Authors in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,

    /// Abstracts by language, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abstracts: Vec<LocalizedAbstract>,

    /// Flattened keyword list, deduplicated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Declared document language, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Publication details, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication: Option<PublicationInfo>,
}

/// Regex for slug generation - matches non-word characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Regex for slug generation - matches whitespace and dashes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_SPACE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

impl DocumentMeta {
    /// Select the abstract to display for a requested language.
    ///
    /// Falls back to the default language, then to the first abstract in
    /// document order.
    ///
    /// # Arguments
    /// * `requested` - Preferred language tag
    ///
    /// # Returns
    /// The abstract to display, or `None` when the document has none
    #[must_use]
    pub fn select_abstract(&self, requested: &str) -> Option<&LocalizedAbstract> {
        self.abstracts
            .iter()
            .find(|entry| entry.lang == requested)
            .or_else(|| {
                self.abstracts
                    .iter()
                    .find(|entry| entry.lang == DEFAULT_LANGUAGE)
            })
            .or_else(|| self.abstracts.first())
    }

    /// Generate a file-friendly slug from the title.
    ///
    /// # Examples
    /// ```
    /// use recto_viewer::header::DocumentMeta;
    ///
    /// let meta = DocumentMeta {
    ///     title: "A Survey of Tree Rendering (2nd ed.)".to_string(),
    ///     ..DocumentMeta::default()
    /// };
    /// assert_eq!(meta.to_slug(), "a_survey_of_tree_rendering_2nd_ed");
    /// ```
    #[must_use]
    pub fn to_slug(&self) -> String {
        let text = self.title.to_lowercase();
        let text = SLUG_NON_WORD.replace_all(&text, "");
        let text = SLUG_SPACE_DASH.replace_all(&text, "_");
        text.trim_matches('_').to_string()
    }
}

/// Extract metadata from a parsed document tree.
///
/// # Arguments
/// * `roots` - Root nodes of the parsed document
///
/// # Returns
/// `DocumentMeta` with every extractable field filled in
#[must_use]
pub fn extract_meta(roots: &[DocumentNode]) -> DocumentMeta {
    let title = find_by_path(roots, "TEI/teiHeader/fileDesc/titleStmt/title")
        .map(DocumentNode::text_content)
        .unwrap_or_default();

    let authors = find_by_path(roots, "TEI/teiHeader/fileDesc/sourceDesc/biblStruct/analytic")
        .map(extract_authors)
        .unwrap_or_default();

    let profile = find_by_path(roots, "TEI/teiHeader/profileDesc");
    let abstracts = profile.map(extract_abstracts).unwrap_or_default();
    let language = profile.and_then(extract_language);

    let keywords = find_by_path(roots, "TEI/teiHeader/profileDesc/textClass/keywords")
        .map(extract_keywords)
        .unwrap_or_default();

    let publication = extract_publication(roots);

    DocumentMeta {
        title,
        authors,
        abstracts,
        keywords,
        language,
        publication,
    }
}

/// Extract authors from an `analytic` block.
fn extract_authors(analytic: &DocumentNode) -> Vec<Author> {
    analytic
        .find_children("author")
        .filter_map(|author| {
            let full_name = author
                .find_child("persName")
                .map(person_name)
                .unwrap_or_else(|| author.text_content());
            if full_name.is_empty() {
                return None;
            }

            let affiliations = author
                .find_children("affiliation")
                .filter_map(affiliation_name)
                .collect();

            Some(Author {
                full_name,
                affiliations,
            })
        })
        .collect()
}

/// Assemble a display name from a `persName` element.
fn person_name(pers_name: &DocumentNode) -> String {
    let mut parts: Vec<String> = Vec::new();
    for forename in pers_name.find_children("forename") {
        let text = forename.text_content();
        if !text.is_empty() {
            parts.push(text);
        }
    }
    if let Some(surname) = pers_name.find_child("surname") {
        let text = surname.text_content();
        if !text.is_empty() {
            parts.push(text);
        }
    }
    if parts.is_empty() {
        pers_name.text_content()
    } else {
        parts.join(" ")
    }
}

/// Institution name from an `affiliation` element.
fn affiliation_name(affiliation: &DocumentNode) -> Option<String> {
    let org_names: Vec<String> = affiliation
        .find_children("orgName")
        .map(DocumentNode::text_content)
        .filter(|name| !name.is_empty())
        .collect();

    let name = if org_names.is_empty() {
        affiliation.text_content()
    } else {
        org_names.join(", ")
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Render all abstracts in a `profileDesc` block to HTML.
fn extract_abstracts(profile: &DocumentNode) -> Vec<LocalizedAbstract> {
    let engine = RenderEngine::new(create_prose_catalog());

    profile
        .find_children("abstract")
        .filter_map(|node| {
            let lang = node.attribute("lang").unwrap_or(DEFAULT_LANGUAGE).to_string();
            // Strip pretty-printing artifacts so the tree renders the same
            // whether or not the caller cleaned it first.
            let cleaned = remove_empty_text_values(std::slice::from_ref(node));
            let mut context = RenderContext::new(&lang);
            let html = engine.render(cleaned.first()?, &mut context).html;
            if html.is_empty() {
                None
            } else {
                Some(LocalizedAbstract { lang, html })
            }
        })
        .collect()
}

/// Declared document language from `langUsage`.
fn extract_language(profile: &DocumentNode) -> Option<String> {
    let language = profile.find_by_path("langUsage/language")?;
    let ident = language
        .attribute("ident")
        .map(str::to_string)
        .unwrap_or_else(|| language.text_content());
    if ident.is_empty() {
        None
    } else {
        Some(ident)
    }
}

/// Flattened, deduplicated keyword list from a `keywords` block.
fn extract_keywords(keywords: &DocumentNode) -> Vec<String> {
    let terms = remove_duplicate_nested_terms(&terms_from_keywords(keywords));

    let mut seen: Vec<String> = Vec::new();
    collect_term_texts(&terms, &mut seen);
    seen
}

fn collect_term_texts(terms: &[Term], out: &mut Vec<String>) {
    for term in terms {
        if !term.term.is_empty() && !out.contains(&term.term) {
            out.push(term.term.clone());
        }
        collect_term_texts(&term.sub_terms, out);
    }
}

/// Publication info from `publicationStmt` and the source `monogr` block.
fn extract_publication(roots: &[DocumentNode]) -> Option<PublicationInfo> {
    let journal = find_by_path(
        roots,
        "TEI/teiHeader/fileDesc/sourceDesc/biblStruct/monogr/title",
    )
    .map(DocumentNode::text_content)
    .filter(|title| !title.is_empty());

    let statement = find_by_path(roots, "TEI/teiHeader/fileDesc/publicationStmt");
    let publisher = statement
        .and_then(|node| node.find_child("publisher"))
        .map(DocumentNode::text_content)
        .filter(|name| !name.is_empty());
    let date = statement
        .and_then(|node| node.find_child("date"))
        .and_then(publication_date);

    let info = PublicationInfo {
        journal,
        publisher,
        date,
    };
    if info.is_empty() {
        None
    } else {
        Some(info)
    }
}

/// Date from a `date` element, preferring the machine-readable `when`
/// attribute over the element text. Full dates are validated and
/// re-emitted in ISO form; anything else passes through as-is.
fn publication_date(date: &DocumentNode) -> Option<String> {
    let raw = date
        .attribute("when")
        .map(str::to_string)
        .unwrap_or_else(|| date.text_content());
    if raw.is_empty() {
        return None;
    }

    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(parsed) => Some(parsed.format("%Y-%m-%d").to_string()),
        Err(_) => Some(raw),
    }
}
