//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between portrait and landscape.
//!
//! # Example
//!
//! ```
//! use pinlab::pagesize::{self, PageOrientation, A4};
//!
//! let landscape = A4.landscape();
//! assert_eq!(pagesize::by_name("a4"), Some(A4));
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const HALF_LETTER: PageSize = (Pt(5.5 * 72.0), Pt(8.5 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(13.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: PageSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));

/// Names accepted by [by_name], in the order they are listed to users
pub const NAMES: &[&str] = &["a3", "a4", "a5", "a6", "letter", "half-letter", "legal", "tabloid"];

/// Look up a portrait page size by its (case-insensitive) name
pub fn by_name(name: &str) -> Option<PageSize> {
    let size = match name.trim().to_ascii_lowercase().as_str() {
        "a3" => A3,
        "a4" => A4,
        "a5" => A5,
        "a6" => A6,
        "letter" => LETTER,
        "half-letter" | "half_letter" => HALF_LETTER,
        "legal" => LEGAL,
        "tabloid" => TABLOID,
        _ => return None,
    };
    Some(size)
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in NAMES {
            assert!(by_name(name).is_some(), "{name} should resolve");
        }
        assert_eq!(by_name(" A4 "), Some(A4));
        assert_eq!(by_name("b5"), None);
    }

    #[test]
    fn orientation_swaps_dimensions() {
        let (w, h) = A4.landscape();
        assert!(w > h);
        assert_eq!(A4.landscape().portrait(), A4);
    }
}
