use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    RenderError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use tracing::{info, warn};

#[derive(Default)]
/// A document stores the fonts and pages of a label sheet, then renders
/// them out as a PDF with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add a font to the document. Any page can draw with it by referring to
    /// the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Characters drawn with each font, across all pages
    fn characters_by_font(&self) -> HashMap<Id<Font>, BTreeSet<char>> {
        let mut used: HashMap<Id<Font>, BTreeSet<char>> = HashMap::new();
        for span in self.pages.iter().flat_map(|page| page.spans.iter()) {
            used.entry(span.font.id)
                .or_default()
                .extend(span.text.chars());
        }
        used
    }

    /// Write the entire document to the writer. The document is assembled in
    /// memory first and then written in one go.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), RenderError> {
        let used = self.characters_by_font();
        let Document { info, pages, fonts } = self;

        for (id, font) in fonts.iter() {
            let missing: String = used
                .get(&id)
                .into_iter()
                .flatten()
                .filter(|&&ch| !font.covers(ch))
                .collect();
            if !missing.is_empty() {
                warn!("font F{} has no glyphs for {missing:?}; they are drawn as substitutes", id.index());
            }
        }

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        let no_characters = BTreeSet::new();
        let font_refs: Vec<(Id<Font>, Ref)> = fonts
            .iter()
            .map(|(id, font)| {
                let chars = used.get(&id).unwrap_or(&no_characters);
                (id, font.write(&mut refs, id, chars, &mut writer))
            })
            .collect();

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &font_refs, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice())?;
        info!(pages = pages.len(), "wrote PDF document");
        Ok(())
    }
}
