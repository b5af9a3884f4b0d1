//! Content stream generation for label pages.

use crate::font::Font;
use crate::page::{SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Renders text spans to a PDF content stream.
///
/// Text is filled in black. Each span gets its own text object whose matrix
/// places the baseline at the span's coordinates and applies its vertical
/// stretch.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_spans(
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    if spans.is_empty() {
        return Ok(content);
    }

    write!(content, "q\n0 g\n")?;

    let mut current_font: Option<SpanFont> = None;
    let mut encoded = String::new();
    for span in spans {
        if current_font != Some(span.font) {
            write!(content, "/F{} {} Tf\n", span.font.id.index(), span.font.size)?;
            current_font = Some(span.font);
        }

        encoded.clear();
        fonts[span.font.id].encode(&span.text, &mut encoded);

        write!(content, "BT\n")?;
        write!(
            content,
            "1 0 0 {} {} {} Tm\n",
            span.vertical_stretch, span.coords.0, span.coords.1
        )?;
        write!(content, "<{encoded}> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(content)
}
