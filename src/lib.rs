//! Lays out repeated specimen pin labels into paginated columns and renders
//! them to PDF.
//!
//! A label file is parsed into [parse::LabelBlock]s, each block's repeat
//! count is expanded into individually placed instances by
//! [layout::layout], and a [render::Renderer] turns the placed instances into
//! output: a PDF [Document] or a serializable [render::Plan].
//!
//! ```
//! use pinlab::layout::{layout, LayoutGeometry};
//! use pinlab::parse::parse;
//! use pinlab::render::{PdfRenderer, Renderer};
//!
//! let file = parse("20\n2\nMUSEUM OF ZOOLOGY\nColl. 1931\n").expect("valid label file");
//! let geometry = LayoutGeometry::default();
//! let placed = layout(file.max_width, &file.blocks, &geometry).expect("fits on the page");
//!
//! let document = PdfRenderer::default().render(&geometry, &placed).expect("renders");
//! let mut pdf: Vec<u8> = Vec::new();
//! document.write(&mut pdf).expect("writes to memory");
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Placing label instances on pages
pub mod layout;

mod page;
pub use page::*;

/// Pre-defined page sizes
pub mod pagesize;

/// Reading label files
pub mod parse;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// Turning a layout into output
pub mod render;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
