//! Turning a finished layout into output.
//!
//! Rendering is a separate stage from layout: a [Renderer] receives the page
//! geometry and an already computed [Layout] and never changes either. Two
//! renderers are provided. [PdfRenderer] draws the label sheet as a PDF
//! [Document], and [PlanRenderer] describes every placement as plain data
//! that can be serialized.

use crate::document::Document;
use crate::font::{Font, StandardFont};
use crate::info::Info;
use crate::layout::{Capacity, Layout, LayoutGeometry, Slot};
use crate::page::{Page, SpanFont, SpanLayout};
use crate::units::Pt;
use crate::RenderError;
use serde::Serialize;
use tracing::{info, warn};

/// A stage that consumes a computed layout
pub trait Renderer {
    type Output;

    fn render(
        &self,
        geometry: &LayoutGeometry,
        layout: &Layout<'_>,
    ) -> Result<Self::Output, RenderError>;
}

/// One line of label text at its position on a page
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand<'a> {
    pub page_index: usize,
    /// Left edge of the text
    pub x: Pt,
    /// Baseline of the text, measured up from the bottom of the page
    pub baseline: Pt,
    pub text: &'a str,
}

/// Every line of every instance, in placement order. Line `i` of a label sits
/// `i * line_spacing` below the label's first baseline.
pub fn draw_commands<'a>(
    geometry: &'a LayoutGeometry,
    layout: &'a Layout<'a>,
) -> impl Iterator<Item = DrawCommand<'a>> + 'a {
    layout.instances.iter().flat_map(move |instance| {
        let (x, top) = layout.grid.origin(geometry, instance.slot);
        instance
            .lines
            .iter()
            .enumerate()
            .map(move |(i, line)| DrawCommand {
                page_index: instance.slot.page_index,
                x,
                baseline: top - geometry.line_spacing * i as f32,
                text: line.as_str(),
            })
    })
}

/// The font a [PdfRenderer] draws with
#[derive(Debug, Clone, PartialEq)]
pub enum LabelFont {
    Standard(StandardFont),
    /// Raw bytes of a TTF or OTF file to embed
    Embedded(Vec<u8>),
}

impl Default for LabelFont {
    fn default() -> Self {
        LabelFont::Standard(StandardFont::Courier)
    }
}

/// Draws label sheets as PDF documents
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    pub font: LabelFont,
    /// Size the glyphs are drawn at. Defaults to half a point above the
    /// geometry's measuring font size, which fills the row height better
    pub text_size: Option<Pt>,
    /// Vertical scale applied to every glyph
    pub vertical_stretch: f32,
    pub info: Info,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        PdfRenderer {
            font: LabelFont::default(),
            text_size: None,
            vertical_stretch: 1.3,
            info: Info::default(),
        }
    }
}

impl Renderer for PdfRenderer {
    type Output = Document;

    fn render(
        &self,
        geometry: &LayoutGeometry,
        layout: &Layout<'_>,
    ) -> Result<Document, RenderError> {
        let font = match &self.font {
            LabelFont::Standard(font) => Font::standard(*font),
            LabelFont::Embedded(bytes) => Font::load(bytes.clone())?,
        };
        if !font.is_monospaced() {
            warn!("label font is not monospaced; lines may overrun their columns");
        }

        let mut document = Document::default();
        document.set_info(self.info.clone());
        let span_font = SpanFont {
            id: document.add_font(font),
            size: self.text_size.unwrap_or(geometry.font_size + Pt(0.5)),
        };

        // an empty sheet still needs one page to be a valid PDF
        let mut pages: Vec<Page> = (0..layout.page_count().max(1))
            .map(|_| Page::new(geometry.page_size, Some(geometry.margins)))
            .collect();
        for command in draw_commands(geometry, layout) {
            pages[command.page_index].add_span(SpanLayout {
                text: command.text.to_string(),
                font: span_font,
                coords: (command.x, command.baseline),
                vertical_stretch: self.vertical_stretch,
            });
        }

        info!(
            pages = pages.len(),
            instances = layout.instances.len(),
            "rendered label sheet"
        );
        for page in pages {
            document.add_page(page);
        }
        Ok(document)
    }
}

/// A label placed on a page, with its anchor in page coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    pub block_index: usize,
    pub column_index: usize,
    pub row_index: usize,
    pub x: Pt,
    pub y: Pt,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPage {
    pub page_index: usize,
    pub labels: Vec<PlacedLabel>,
}

/// A serializable description of where every label goes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub max_width: usize,
    pub capacity: Capacity,
    pub lines_per_label: usize,
    pub label_height: Pt,
    pub column_pitch: Pt,
    pub instance_count: usize,
    pub pages: Vec<PlanPage>,
}

impl Plan {
    /// The plan as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Describes a layout as a [Plan]
#[derive(Debug, Default, Copy, Clone)]
pub struct PlanRenderer;

impl Renderer for PlanRenderer {
    type Output = Plan;

    fn render(&self, geometry: &LayoutGeometry, layout: &Layout<'_>) -> Result<Plan, RenderError> {
        let pages = layout
            .pages()
            .enumerate()
            .map(|(page_index, instances)| PlanPage {
                page_index,
                labels: instances
                    .iter()
                    .map(|instance| {
                        let Slot {
                            column_index,
                            row_index,
                            ..
                        } = instance.slot;
                        let (x, y) = layout.grid.origin(geometry, instance.slot);
                        PlacedLabel {
                            block_index: instance.block_index,
                            column_index,
                            row_index,
                            x,
                            y,
                            lines: instance.lines.to_vec(),
                        }
                    })
                    .collect(),
            })
            .collect();

        Ok(Plan {
            max_width: layout.max_width,
            capacity: layout.grid.capacity,
            lines_per_label: layout.grid.lines_per_label,
            label_height: layout.grid.label_height,
            column_pitch: layout.grid.column_pitch,
            instance_count: layout.instances.len(),
            pages,
        })
    }
}
