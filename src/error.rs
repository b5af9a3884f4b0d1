use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Where a line sits in the input: `line` is the 1-based line number in the
/// original text (blank lines included), `position` the 1-based index once
/// blank lines have been dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    pub line: usize,
    pub position: usize,
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}

fn header_location(at: &Option<SourceLine>) -> String {
    match at {
        Some(at) => at.to_string(),
        None => "end of input".to_string(),
    }
}

/// Structural problems found while reading a label file. Every variant is terminal:
/// no blocks are returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The first non-blank line is missing or is not a whole number
    #[error("{}: expected the maximum label width as a whole number", header_location(.at))]
    MalformedHeader { at: Option<SourceLine> },

    /// Label text appeared before any repeat count
    #[error("{at}: label text appears before any repeat count")]
    MissingRepeatCount { at: SourceLine },

    /// A content line is wider than the declared maximum width
    #[error("{at}: line is {length} characters wide but the maximum width is {max_width}")]
    LineTooLong {
        at: SourceLine,
        length: usize,
        max_width: usize,
    },

    /// A count line has more digits than fit in a repeat count
    #[error("{at}: repeat count {digits} is too large")]
    CountOutOfRange { at: SourceLine, digits: String },
}

impl ParseError {
    /// The offending line, if the error refers to one
    pub fn source_line(&self) -> Option<SourceLine> {
        match self {
            ParseError::MalformedHeader { at } => *at,
            ParseError::MissingRepeatCount { at }
            | ParseError::LineTooLong { at, .. }
            | ParseError::CountOutOfRange { at, .. } => Some(*at),
        }
    }
}

/// Reasons a set of parsed blocks cannot be placed on pages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("there are no label blocks to lay out")]
    EmptyInput,

    /// The page fits no label at all, usually because a label is taller than
    /// the printable height or a column is wider than the printable width
    #[error(
        "page geometry fits {labels_per_column} label(s) per column and {columns_per_page} column(s) per page"
    )]
    DegenerateGeometry {
        labels_per_column: usize,
        columns_per_page: usize,
    },

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: &'static str },

    /// The repeat counts add up to more labels than one sheet run may hold
    #[error("the repeat counts ask for more than {limit} labels")]
    TooManyInstances { limit: usize },
}

/// Errors raised by a rendering stage
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("page {0} was never allocated an object")]
    PageMissing(usize),

    #[error(transparent)]
    /// The placement plan could not be serialized
    Json(#[from] serde_json::Error),
}

/// Errors loading a geometry configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading geometry config: {0}")]
    Io(#[from] std::io::Error),

    #[error("decoding geometry config: {0}")]
    Json(#[from] serde_json::Error),
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error("reading label file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether the failure lies in the label file itself (as opposed to
    /// reading it, configuration, or producing output)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::Layout(_))
    }
}
