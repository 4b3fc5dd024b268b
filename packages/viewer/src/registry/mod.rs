//! Tag catalog system for extensible TEI rendering.
//!
//! This module provides a catalog-based approach to rendering TEI trees.
//! Tag handlers can be registered for specific tag names, and handlers may
//! push scoped catalogs (MathML, keywords) that shadow the base catalog for
//! the duration of a subtree.

mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod types;

pub use config::{create_keyword_catalog, create_math_catalog, create_prose_catalog};
pub use core::TagCatalog;
pub use engine::RenderEngine;
pub use handler::{render_children, render_children_blocks, RecurseFn, TagHandler};
pub use types::{FallbackPolicy, Footnote, HandlerKind, NoteCollector, RenderContext, Rendered};
