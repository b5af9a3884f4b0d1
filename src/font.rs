use crate::{
    refs::{ObjectReferences, RefType},
    RenderError,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, BTreeSet};

/// Monospace fonts every PDF viewer provides without embedding
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StandardFont {
    #[default]
    Courier,
    CourierBold,
}

impl StandardFont {
    fn base_font(self) -> &'static [u8] {
        match self {
            StandardFont::Courier => b"Courier",
            StandardFont::CourierBold => b"Courier-Bold",
        }
    }
}

/// A font labels are drawn with.
///
/// Standard fonts cover the Windows-1252 character set; anything else is
/// drawn as `?`. Embedded fonts are TTF or OTF faces written into the PDF in
/// their entirety, and can draw any character the face has a glyph for.
pub enum Font {
    Standard(StandardFont),
    Embedded(OwnedFace),
}

impl Font {
    /// Use one of the standard PDF fonts
    pub fn standard(font: StandardFont) -> Font {
        Font::Standard(font)
    }

    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RenderError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font::Embedded(face))
    }

    /// Whether every glyph has the same advance. Label columns are sized for
    /// monospace text.
    pub fn is_monospaced(&self) -> bool {
        match self {
            Font::Standard(_) => true,
            Font::Embedded(face) => face.as_face_ref().is_monospaced(),
        }
    }

    /// Whether the font can draw `ch` as itself rather than a substitute
    pub fn covers(&self, ch: char) -> bool {
        match self {
            Font::Standard(_) => win_ansi_code(ch).is_some(),
            Font::Embedded(face) => face.as_face_ref().glyph_index(ch).is_some(),
        }
    }

    /// Append the hex-encoded character codes for `text` to a content stream string
    pub(crate) fn encode(&self, text: &str, out: &mut String) {
        for ch in text.chars() {
            let code = match self {
                Font::Standard(_) => format!("{:02x}", win_ansi_code(ch).unwrap_or(b'?')),
                Font::Embedded(face) => format!("{:04x}", glyph_for(face, ch).0),
            };
            out.push_str(&code);
        }
    }

    /// Write the font objects. `used` lists every character drawn with this
    /// font, which limits the width and ToUnicode tables of embedded fonts.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        id: Id<Font>,
        used: &BTreeSet<char>,
        writer: &mut Pdf,
    ) -> Ref {
        let index = id.index();
        let font_ref = refs.gen(RefType::Font(index));
        match self {
            Font::Standard(font) => {
                writer
                    .type1_font(font_ref)
                    .base_font(Name(font.base_font()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Font::Embedded(face) => {
                let glyphs = used_glyphs(face, used);
                let cid_ref = write_cid_font(face, refs, index, &glyphs, writer);
                let to_unicode_ref = write_to_unicode(refs, index, &glyphs, writer);

                let base_font = format!("F{index}");
                let mut font = writer.type0_font(font_ref);
                font.base_font(Name(base_font.as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_ref);
                font.to_unicode(to_unicode_ref);
            }
        }
        font_ref
    }
}

/// Map a character to its code in the WinAnsi (Windows-1252) encoding
fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => return Some(ch as u8),
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(code)
}

/// The glyph for `ch`, falling back to the replacement character, then `?`,
/// then the face's `.notdef` glyph
fn glyph_for(face: &OwnedFace, ch: char) -> GlyphId {
    let face = face.as_face_ref();
    face.glyph_index(ch)
        .or_else(|| face.glyph_index('\u{FFFD}'))
        .or_else(|| face.glyph_index('?'))
        .unwrap_or(GlyphId(0))
}

/// Glyph id -> (character, advance width in 1/1000 em) for the characters drawn
fn used_glyphs(face: &OwnedFace, used: &BTreeSet<char>) -> BTreeMap<u16, (char, f32)> {
    let scaling = 1000.0 / face.as_face_ref().units_per_em() as f32;
    used.iter()
        .map(|&ch| {
            let gid = glyph_for(face, ch);
            let advance = face
                .as_face_ref()
                .glyph_hor_advance(gid)
                .unwrap_or_default() as f32
                * scaling;
            (gid.0, (ch, advance))
        })
        .collect()
}

fn write_cid_font(
    face: &OwnedFace,
    refs: &mut ObjectReferences,
    index: usize,
    glyphs: &BTreeMap<u16, (char, f32)>,
    writer: &mut Pdf,
) -> Ref {
    let descriptor_ref = write_descriptor(face, refs, index, writer);
    let id = refs.gen(RefType::CidFont(index));
    let scaling = 1000.0 / face.as_face_ref().units_per_em() as f32;

    let mut cid_font = writer.cid_font(id);
    cid_font.subtype(CidFontType::Type2);
    cid_font.base_font(Name(format!("F{index}").as_bytes()));
    cid_font.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid_font.font_descriptor(descriptor_ref);

    // a monospace face has one advance for all glyphs; use the space's
    let default_width = face
        .as_face_ref()
        .glyph_index(' ')
        .and_then(|gid| face.as_face_ref().glyph_hor_advance(gid))
        .map(|w| w as f32 * scaling)
        .unwrap_or(600.0);
    cid_font.default_width(default_width);

    // widths are written as runs of consecutive glyph ids
    let mut widths = cid_font.widths();
    let mut run: Option<(u16, Vec<f32>)> = None;
    for (&gid, &(_, width)) in glyphs {
        match run.as_mut() {
            Some((start, run_widths)) if *start as usize + run_widths.len() == gid as usize => {
                run_widths.push(width);
            }
            _ => {
                if let Some((start, run_widths)) = run.replace((gid, vec![width])) {
                    widths.consecutive(start, run_widths);
                }
            }
        }
    }
    if let Some((start, run_widths)) = run {
        widths.consecutive(start, run_widths);
    }
    widths.finish();

    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
    id
}

fn write_descriptor(
    face: &OwnedFace,
    refs: &mut ObjectReferences,
    index: usize,
    writer: &mut Pdf,
) -> Ref {
    let data_ref = refs.gen(RefType::FontData(index));
    let data = face.as_slice();
    writer
        .stream(data_ref, data)
        .pair(Name(b"Length1"), data.len() as i32);

    let id = refs.gen(RefType::FontDescriptor(index));
    let face_ref = face.as_face_ref();
    let scaling = 1000.0 / face_ref.units_per_em() as f32;
    let bbox = face_ref.global_bounding_box();

    let mut flags = FontFlags::NON_SYMBOLIC;
    if face_ref.is_monospaced() {
        flags.insert(FontFlags::FIXED_PITCH);
    }
    if face_ref.is_italic() {
        flags.insert(FontFlags::ITALIC);
    }

    let mut descriptor = writer.font_descriptor(id);
    descriptor.name(Name(format!("F{index}").as_bytes()));
    descriptor.flags(flags);
    descriptor.bbox(pdf_writer::Rect {
        x1: bbox.x_min as f32 * scaling,
        y1: bbox.y_min as f32 * scaling,
        x2: bbox.x_max as f32 * scaling,
        y2: bbox.y_max as f32 * scaling,
    });
    descriptor.italic_angle(0.0);
    descriptor.ascent(face_ref.ascender() as f32 * scaling);
    descriptor.descent(face_ref.descender() as f32 * scaling);
    descriptor.cap_height(
        face_ref
            .capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(face_ref.ascender() as f32 * scaling),
    );
    // no stem width is recorded in TrueType faces; 80 is the customary guess
    descriptor.stem_v(80.0);
    descriptor.font_file2(data_ref);

    id
}

/// A ToUnicode CMap so text copied out of the PDF comes back as the label text
fn write_to_unicode(
    refs: &mut ObjectReferences,
    index: usize,
    glyphs: &BTreeMap<u16, (char, f32)>,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.gen(RefType::ToUnicode(index));

    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );

    // bfchar sections hold at most 100 entries each
    let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &(ch, _))| (gid, ch)).collect();
    for chunk in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for &(gid, ch) in chunk {
            let mut utf16 = [0u16; 2];
            let dest: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            cmap.push_str(&format!("<{gid:04x}> <{dest}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
        cmap.as_bytes(),
        miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
    );
    writer
        .stream(id, compressed.as_slice())
        .filter(Filter::FlateDecode);

    id
}
