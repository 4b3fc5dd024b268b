//! Tag handlers for TEI rendering.

mod figures;
mod keywords;
mod math;
mod prose;
mod structure;
mod text;

pub use figures::{FigureHandler, GraphicHandler, NoteHandler};
pub use keywords::{KeywordsHandler, TermHandler};
pub use math::{FormulaHandler, InlineGraphicHandler, MathMlHandler};
pub use prose::{
    HiHandler, InlineTermHandler, LineBreakHandler, ParagraphHandler, QHandler, QuoteHandler,
    RefHandler,
};
pub use structure::{
    CellHandler, ContainerHandler, DivHandler, HeadHandler, ItemHandler, LabelHandler, ListHandler,
    RowHandler, TableHandler,
};
pub use text::TextHandler;
