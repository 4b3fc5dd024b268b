//! HTML output generation for rendered documents.

mod text;
mod writer;

pub use text::{collapse_whitespace, escape_attr, escape_text, normalize_text, strip_tags};
pub use writer::{render_page, save_page};
