//! HTML page assembly and file output.
//!
//! Takes extracted metadata, the rendered body, and collected footnotes and
//! assembles a self-contained HTML5 page with an embedded stylesheet.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::Local;

use super::text::escape_text;
use crate::error::Result;
use crate::header::DocumentMeta;
use crate::registry::Footnote;

/// Stylesheet embedded into every generated page.
const PAGE_STYLE: &str = r#"body {
  font-family: Georgia, 'Times New Roman', serif;
  line-height: 1.6;
  max-width: 46rem;
  margin: 0 auto;
  padding: 2rem 1rem;
  color: #1a1a1a;
}
header { border-bottom: 1px solid #ccc; margin-bottom: 2rem; }
h1 { font-size: 1.7rem; line-height: 1.3; }
.authors { font-size: 1.05rem; margin: 0.3rem 0; }
.affiliations { color: #555; font-size: 0.9rem; margin: 0.2rem 0; }
.publication { color: #555; font-size: 0.9rem; font-style: italic; }
.abstract { background: #f7f7f5; padding: 0.8rem 1rem; margin: 1rem 0; }
.abstract h2 { font-size: 1rem; margin: 0 0 0.4rem; }
.abstract-langs { color: #555; font-size: 0.85rem; }
ul.keywords { list-style: none; padding: 0; }
ul.keywords > li.keyword {
  display: inline-block;
  background: #eef;
  border-radius: 0.8rem;
  padding: 0.1rem 0.7rem;
  margin: 0.15rem;
  font-size: 0.85rem;
}
ul.sub-terms { list-style: none; padding-left: 0.5rem; display: inline; }
ul.sub-terms > li.keyword { background: #e4e4f7; }
blockquote { border-left: 3px solid #ccc; margin-left: 0; padding-left: 1rem; color: #444; }
figure { margin: 1.5rem 0; text-align: center; }
figure img { max-width: 100%; }
figcaption { font-size: 0.9rem; color: #555; margin-top: 0.4rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #bbb; padding: 0.3rem 0.7rem; }
caption { font-size: 0.9rem; color: #555; margin-bottom: 0.3rem; }
.formula { font-family: 'STIX Two Math', 'Cambria Math', serif; }
.formula-display { display: block; text-align: center; margin: 1rem 0; }
.smallcaps { font-variant: small-caps; }
.term { font-style: italic; }
.label { font-weight: bold; }
.note { color: #555; font-size: 0.9rem; }
.footnotes { border-top: 1px solid #ccc; margin-top: 2rem; font-size: 0.9rem; }
.footnote-ref a { text-decoration: none; }
footer { color: #888; font-size: 0.8rem; margin-top: 2rem; }
"#;

/// Assemble a complete HTML page.
///
/// # Arguments
/// * `meta` - Extracted header metadata
/// * `body` - Rendered HTML for the document body
/// * `footnotes` - Notes collected during body rendering
/// * `language` - Language for abstract selection and the `lang` attribute
///
/// # Returns
/// The page as a single HTML string
#[must_use]
pub fn render_page(
    meta: &DocumentMeta,
    body: &str,
    footnotes: &[Footnote],
    language: &str,
) -> String {
    let mut page = String::new();

    page.push_str("<!DOCTYPE html>\n");
    page.push_str(&format!("<html lang=\"{}\">\n", escape_text(language)));
    page.push_str("<head>\n<meta charset=\"utf-8\"/>\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n");
    let title = if meta.title.is_empty() {
        "Untitled document".to_string()
    } else {
        escape_text(&meta.title)
    };
    page.push_str(&format!("<title>{title}</title>\n"));
    page.push_str(&format!("<style>\n{PAGE_STYLE}</style>\n"));
    page.push_str("</head>\n<body>\n");

    page.push_str(&page_header(meta, language));

    page.push_str("<main>\n");
    if !body.is_empty() {
        page.push_str(body);
        page.push('\n');
    }
    page.push_str("</main>\n");

    page.push_str(&footnote_section(footnotes));

    page.push_str(&format!(
        "<footer>\n<p>Generated on {}</p>\n</footer>\n",
        Local::now().format("%Y-%m-%d")
    ));
    page.push_str("</body>\n</html>\n");

    page
}

/// Header section: title, authors, abstract, keywords, publication line.
fn page_header(meta: &DocumentMeta, language: &str) -> String {
    let mut header = String::from("<header>\n");

    if !meta.title.is_empty() {
        header.push_str(&format!("<h1>{}</h1>\n", escape_text(&meta.title)));
    }

    if !meta.authors.is_empty() {
        let names: Vec<String> = meta
            .authors
            .iter()
            .map(|author| escape_text(&author.full_name))
            .collect();
        header.push_str(&format!(
            "<p class=\"authors\">{}</p>\n",
            names.join(", ")
        ));

        let mut affiliations: Vec<String> = Vec::new();
        for author in &meta.authors {
            for affiliation in &author.affiliations {
                let escaped = escape_text(affiliation);
                if !affiliations.contains(&escaped) {
                    affiliations.push(escaped);
                }
            }
        }
        if !affiliations.is_empty() {
            header.push_str(&format!(
                "<p class=\"affiliations\">{}</p>\n",
                affiliations.join("; ")
            ));
        }
    }

    if let Some(publication) = &meta.publication {
        let mut parts: Vec<String> = Vec::new();
        if let Some(journal) = &publication.journal {
            parts.push(escape_text(journal));
        }
        if let Some(publisher) = &publication.publisher {
            parts.push(escape_text(publisher));
        }
        if let Some(date) = &publication.date {
            parts.push(escape_text(date));
        }
        if !parts.is_empty() {
            header.push_str(&format!(
                "<p class=\"publication\">{}</p>\n",
                parts.join(", ")
            ));
        }
    }

    if let Some(selected) = meta.select_abstract(language) {
        header.push_str(&format!(
            "<section class=\"abstract\">\n<h2>Abstract</h2>\n{}\n",
            selected.html
        ));
        let alternates: Vec<String> = meta
            .abstracts
            .iter()
            .filter(|entry| entry.lang != selected.lang)
            .map(|entry| escape_text(&entry.lang))
            .collect();
        if !alternates.is_empty() {
            header.push_str(&format!(
                "<p class=\"abstract-langs\">Also available in: {}</p>\n",
                alternates.join(", ")
            ));
        }
        header.push_str("</section>\n");
    }

    if !meta.keywords.is_empty() {
        let chips: Vec<String> = meta
            .keywords
            .iter()
            .map(|keyword| format!("<li class=\"keyword\">{}</li>", escape_text(keyword)))
            .collect();
        header.push_str(&format!(
            "<ul class=\"keywords\">\n{}\n</ul>\n",
            chips.join("\n")
        ));
    }

    header.push_str("</header>\n");
    header
}

/// Footnote section with back-links to the in-text markers.
fn footnote_section(footnotes: &[Footnote]) -> String {
    if footnotes.is_empty() {
        return String::new();
    }

    let entries: Vec<String> = footnotes
        .iter()
        .map(|note| {
            format!(
                "<li id=\"fn{0}\">{1} <a href=\"#fnref{0}\" class=\"footnote-back\">\u{21a9}</a></li>",
                note.number, note.html
            )
        })
        .collect();

    format!(
        "<section class=\"footnotes\">\n<h2>Notes</h2>\n<ol>\n{}\n</ol>\n</section>\n",
        entries.join("\n")
    )
}

/// Save a rendered page to disk.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// This ensures partial writes don't corrupt existing files on crash.
///
/// # Arguments
/// * `path` - Destination file path; parent directories are created
/// * `html` - Page content
pub fn save_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("page.html");
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    // Write to temp file first, then sync and rename for atomicity
    {
        let mut file = File::create(&temp_file)?;
        file.write_all(html.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    Ok(())
}
