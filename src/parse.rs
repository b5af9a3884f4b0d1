//! Reading label files.
//!
//! A label file declares the maximum label width on its first non-blank line,
//! then alternates between *count lines* (a repeat count made of decimal
//! digits) and the *content lines* of the label that count applies to:
//!
//! ```text
//! 25
//! 3
//! BRAZIL: Amazonas
//! Manaus, 12.iii.1998
//! 1
//! HOLOTYPE
//! ```
//!
//! Blank lines are ignored anywhere.

use crate::error::{ParseError, SourceLine};
use std::path::Path;
use tracing::{debug, warn};

/// One label template and the number of physical copies to produce from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBlock {
    /// The literal text rows of the label, top to bottom
    pub lines: Vec<String>,
    /// How many instances of this label to place. Zero is legal and places nothing
    pub repeat_count: usize,
    /// The count line that opened this block
    pub opened_at: SourceLine,
}

/// A successfully parsed label file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFile {
    /// Widest allowed content line, in characters
    pub max_width: usize,
    /// Blocks in order of appearance
    pub blocks: Vec<LabelBlock>,
}

impl LabelFile {
    /// Read and parse the label file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<LabelFile, crate::Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(parse(&text)?)
    }

    /// Total number of label instances the file asks for, saturating at
    /// `usize::MAX`
    pub fn total_instances(&self) -> usize {
        self.blocks
            .iter()
            .fold(0usize, |total, block| total.saturating_add(block.repeat_count))
    }

    /// The tallest block's line count, which sets the row height for every label
    pub fn lines_per_label(&self) -> usize {
        lines_per_label(&self.blocks)
    }
}

pub(crate) fn lines_per_label(blocks: &[LabelBlock]) -> usize {
    blocks
        .iter()
        .map(|block| block.lines.len())
        .max()
        .unwrap_or_default()
}

/// Whether a line is a repeat count: after trimming, it is non-empty and made
/// up entirely of ASCII decimal digits
pub fn is_count_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Parse the full text of a label file
pub fn parse(text: &str) -> Result<LabelFile, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    parse_lines(text.lines())
}

/// Parse a label file given as a sequence of raw lines
pub fn parse_lines<I, S>(lines: I) -> Result<LabelFile, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let trimmed = raw.as_ref().trim();
            (!trimmed.is_empty()).then(|| (index + 1, trimmed.to_string()))
        })
        .enumerate()
        .map(|(index, (line, text))| {
            let at = SourceLine {
                line,
                position: index + 1,
            };
            (at, text)
        });

    let max_width = match lines.next() {
        Some((at, header)) if is_count_line(&header) => header
            .parse::<usize>()
            .map_err(|_| ParseError::MalformedHeader { at: Some(at) })?,
        Some((at, _)) => return Err(ParseError::MalformedHeader { at: Some(at) }),
        None => return Err(ParseError::MalformedHeader { at: None }),
    };

    let mut blocks: Vec<LabelBlock> = Vec::new();
    // the count line currently in effect, and the content collected under it
    let mut pending: Option<(SourceLine, usize)> = None;
    let mut current: Vec<String> = Vec::new();

    for (at, line) in lines {
        if is_count_line(&line) {
            let count = line.parse::<usize>().map_err(|_| ParseError::CountOutOfRange {
                at,
                digits: line.clone(),
            })?;

            match pending {
                Some((opened_at, repeat_count)) if !current.is_empty() => {
                    blocks.push(LabelBlock {
                        lines: std::mem::take(&mut current),
                        repeat_count,
                        opened_at,
                    });
                }
                Some((opened_at, _)) => {
                    warn!(
                        "count on {opened_at} has no label text and is replaced by the count on {at}"
                    );
                }
                None => {}
            }
            pending = Some((at, count));
            continue;
        }

        if pending.is_none() {
            return Err(ParseError::MissingRepeatCount { at });
        }

        let length = line.chars().count();
        if length > max_width {
            return Err(ParseError::LineTooLong {
                at,
                length,
                max_width,
            });
        }

        current.push(line);
    }

    if let Some((opened_at, repeat_count)) = pending {
        if !current.is_empty() {
            blocks.push(LabelBlock {
                lines: current,
                repeat_count,
                opened_at,
            });
        }
    }

    debug!(max_width, blocks = blocks.len(), "parsed label file");

    Ok(LabelFile { max_width, blocks })
}
