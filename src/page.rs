use crate::content::render_spans;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::RenderError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf, Ref};

/// Which font, at what size, a span is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text placed on a page
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    /// The start of the span's baseline
    pub coords: (Pt, Pt),
    /// Vertical scale applied to the glyphs, 1.0 for none
    pub vertical_stretch: f32,
}

/// A page of laid out label text
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// The printable area within the margins
    pub content_box: Rect,
    /// The laid out text, in drawing order
    pub spans: Vec<SpanLayout>,
}

impl Page {
    /// Create a new, empty page. The content box is inset from the page by the
    /// margins when provided
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let media_box = Rect::from_size(size);
        let content_box = match margins {
            Some(margins) => media_box.inset(&margins),
            None => media_box,
        };
        Page {
            media_box,
            content_box,
            spans: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.spans.push(span);
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        font_refs: &[(Id<Font>, Ref)],
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), RenderError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(RenderError::PageMissing(page_index))?;
        let parent = refs
            .get(RefType::PageTree)
            .ok_or(RenderError::PageMissing(page_index))?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), *font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = render_spans(&self.spans, fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
