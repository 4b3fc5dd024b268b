//! Catalog configuration for TEI document rendering.

use std::sync::Arc;

use super::core::TagCatalog;
use super::handlers::{
    CellHandler, ContainerHandler, DivHandler, FigureHandler, FormulaHandler, GraphicHandler,
    HeadHandler, HiHandler, InlineGraphicHandler, InlineTermHandler, ItemHandler, KeywordsHandler,
    LabelHandler, LineBreakHandler, ListHandler, MathMlHandler, NoteHandler, ParagraphHandler,
    QHandler, QuoteHandler, RefHandler, RowHandler, TableHandler, TermHandler, TextHandler,
};
use super::types::FallbackPolicy;

/// MathML element names re-emitted as-is inside formula scopes.
const MATHML_TAGS: &[&str] = &[
    "math",
    "mrow",
    "mi",
    "mo",
    "mn",
    "msub",
    "msup",
    "msubsup",
    "mfrac",
    "msqrt",
    "mroot",
    "munder",
    "mover",
    "munderover",
    "mtext",
    "mspace",
    "mstyle",
    "mtable",
    "mtr",
    "mtd",
    "semantics",
];

/// Create the catalog active inside `<formula>` scopes.
///
/// MathML elements pass through with their tags and attributes intact;
/// graphics render as inline formula images.
#[must_use]
pub fn create_math_catalog() -> TagCatalog {
    let mut catalog = TagCatalog::new();

    for tag in MATHML_TAGS {
        catalog.register(*tag, MathMlHandler);
    }
    catalog.register("graphic", InlineGraphicHandler);
    catalog.register("#text", TextHandler);

    // Alternate encodings (TeX source, OpenMath) carried alongside the
    // presentation markup; browsers do not render them.
    catalog.skip(["annotation", "annotation-xml"]);

    catalog
}

/// Create the catalog active inside keyword sections.
///
/// Terms render as list entries with nested sub-term lists. Anything the
/// base catalog does not claim either is dropped rather than passed through.
#[must_use]
pub fn create_keyword_catalog() -> TagCatalog {
    let mut catalog = TagCatalog::new().with_fallback(FallbackPolicy::Ignore);

    catalog.register("term", TermHandler);
    catalog.register("#text", TextHandler);

    catalog
}

/// Create the base catalog for TEI prose rendering.
///
/// This catalog covers all element types rendered in the document body;
/// formula and keyword subtrees switch to their own scoped catalogs.
#[must_use]
pub fn create_prose_catalog() -> TagCatalog {
    let math = Arc::new(create_math_catalog());
    let keywords = Arc::new(create_keyword_catalog());

    let mut catalog = TagCatalog::new();

    // Transparent containers
    catalog.register("TEI", ContainerHandler);
    catalog.register("text", ContainerHandler);
    catalog.register("body", ContainerHandler);
    catalog.register("front", ContainerHandler);
    catalog.register("back", ContainerHandler);
    catalog.register("abstract", ContainerHandler);

    // Structural handlers
    catalog.register("div", DivHandler);
    catalog.register("head", HeadHandler);
    catalog.register("list", ListHandler);
    catalog.register("item", ItemHandler);
    catalog.register("label", LabelHandler);
    catalog.register("table", TableHandler);
    catalog.register("row", RowHandler);
    catalog.register("cell", CellHandler);

    // Prose handlers
    catalog.register("p", ParagraphHandler);
    catalog.register("hi", HiHandler);
    catalog.register("quote", QuoteHandler);
    catalog.register("q", QHandler);
    catalog.register("ref", RefHandler);
    catalog.register("lb", LineBreakHandler);
    catalog.register("term", InlineTermHandler);
    catalog.register("#text", TextHandler);

    // Figures and notes
    catalog.register("figure", FigureHandler);
    catalog.register("graphic", GraphicHandler);
    catalog.register("note", NoteHandler);

    // Scoped regions
    catalog.register("formula", FormulaHandler::new(Arc::clone(&math)));
    catalog.register("keywords", KeywordsHandler::new(Arc::clone(&keywords)));

    // Skip tags - elements that don't contribute to rendered prose
    //
    // Header elements (extracted separately):
    //   - teiHeader: document metadata, rendered from DocumentMeta instead
    //
    // Identifiers and markers (no visible content):
    //   - idno: external identifiers (DOI, arXiv id)
    //   - milestone/pb/cb: page, column, and arbitrary reference points
    //   - anchor: link targets without content
    //   - fw: running headers and footers from the source layout
    //
    // Linking apparatus:
    //   - index: index entry declarations
    //   - link/linkGrp/alt: stand-off link declarations
    //
    // Figure internals:
    //   - figDesc: prose description of a figure, not part of the caption
    catalog.skip([
        "teiHeader",
        "idno",
        "milestone",
        "pb",
        "cb",
        "anchor",
        "fw",
        "index",
        "link",
        "linkGrp",
        "alt",
        "figDesc",
    ]);

    catalog
}
