//! Recto Viewer - Render TEI-encoded documents as standalone HTML pages.
//!
//! This crate parses TEI XML (the kind produced by scholarly full-text
//! pipelines), extracts header metadata, and renders the document body to a
//! single self-contained HTML page with footnotes, headings, figures, and
//! formulas.
//!
//! # Example
//!
//! ```
//! use recto_viewer::{render_document, RenderOptions};
//!
//! let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
//!   <teiHeader><fileDesc><titleStmt><title>Notes on Rendering</title></titleStmt></fileDesc></teiHeader>
//!   <text><body><p>Hello.</p></body></text>
//! </TEI>"#;
//!
//! let rendered = render_document(xml, &RenderOptions::new())?;
//! assert_eq!(rendered.meta.title, "Notes on Rendering");
//! assert!(rendered.body.contains("<p>Hello.</p>"));
//! # Ok::<(), recto_viewer::ViewerError>(())
//! ```
//!
//! # Architecture
//!
//! The viewer is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`node`]: Tag tree parsing and traversal
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for fetching remote documents
//! - [`fetch`]: Document downloading
//! - [`registry`]: Extensible tag handler system
//! - [`enrichment`]: Keyword term extraction and deduplication
//! - [`header`]: Header metadata extraction
//! - [`html`]: HTML text utilities and page assembly
//! - [`viewer`]: Main rendering pipeline
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod fetch;
pub mod header;
pub mod html;
pub mod http;
pub mod node;
pub mod registry;
pub mod viewer;

// Re-export main functions
pub use viewer::{load_tree, render_document, RenderOptions, RenderedDocument};

// Re-export commonly used items
pub use enrichment::{remove_duplicate_nested_terms, Term};
pub use error::{Result, ViewerError};
pub use header::{extract_meta, DocumentMeta};
pub use node::{find_by_path, parse_document, remove_empty_text_values, DocumentNode, NodeValue};
