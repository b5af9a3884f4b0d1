use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};

/// Margins bound the printable area of a page. Labels are placed starting at
/// the top-left corner inside the margins, and the usable width and height
/// used to size the label grid are the page dimensions minus these margins.
///
/// Sides missing from a config file keep their [Margins::label_sheet] value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default = "Margins::label_sheet")]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// The margins of the pin label sheets: a slightly deeper margin at the
    /// bottom than at the top, and nothing at the sides
    pub fn label_sheet() -> Margins {
        Margins {
            top: Mm(10.3).into(),
            right: Pt(0.0),
            bottom: Mm(11.3).into(),
            left: Pt(0.0),
        }
    }

    /// Total horizontal margin
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Total vertical margin
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}
