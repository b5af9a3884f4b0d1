use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// The rectangle covering a whole page
    pub fn from_size(size: PageSize) -> Rect {
        Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: size.0,
            y2: size.1,
        }
    }

    /// Shrink the rectangle by the given margins
    pub fn inset(&self, margins: &Margins) -> Rect {
        Rect {
            x1: self.x1 + margins.left,
            y1: self.y1 + margins.bottom,
            x2: self.x2 - margins.right,
            y2: self.y2 - margins.top,
        }
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
