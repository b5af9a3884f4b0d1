use super::{Capacity, Grid, Margins};
use crate::error::{ConfigError, LayoutError};
use crate::pagesize::{self, PageSize};
use crate::units::Pt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The fixed page and font metrics labels are laid out with. Every length is
/// in points. Labels are set in a monospace face, so a line of `n` characters
/// is `n * font_size * char_width` wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutGeometry {
    /// Page (width, height)
    pub page_size: PageSize,
    pub margins: Margins,
    /// Font size used to measure label text
    pub font_size: Pt,
    /// Horizontal advance of one glyph as a fraction of the font size
    pub char_width: f32,
    /// Distance between the baselines of consecutive label lines
    pub line_spacing: Pt,
    /// Extra space added below every label row
    pub vertical_padding: Pt,
    /// Fixed column width. When absent, columns are exactly as wide as the
    /// file's maximum label width
    pub column_width: Option<Pt>,
    /// Gap between adjacent columns
    pub column_spacing: Pt,
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        LayoutGeometry {
            page_size: pagesize::A4,
            margins: Margins::label_sheet(),
            font_size: Pt(2.9),
            char_width: 0.6,
            line_spacing: Pt(3.5),
            vertical_padding: Pt(2.5),
            column_width: None,
            column_spacing: Pt(10.0),
        }
    }
}

impl LayoutGeometry {
    /// Load a geometry from a JSON file. Fields missing from the file keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<LayoutGeometry, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        LayoutGeometry::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<LayoutGeometry, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Page width available to columns
    pub fn usable_width(&self) -> Pt {
        self.page_size.0 - self.margins.horizontal()
    }

    /// Page height available to label rows
    pub fn usable_height(&self) -> Pt {
        self.page_size.1 - self.margins.vertical()
    }

    /// Height of one label row for labels of `lines_per_label` lines
    pub fn label_height(&self, lines_per_label: usize) -> Pt {
        self.line_spacing * lines_per_label as f32 + self.vertical_padding
    }

    /// Width of one column for labels at most `max_width` characters wide
    pub fn column_width(&self, max_width: usize) -> Pt {
        self.column_width
            .unwrap_or_else(|| self.font_size * self.char_width * max_width as f32)
    }

    /// Horizontal distance between the left edges of adjacent columns
    pub fn column_pitch(&self, max_width: usize) -> Pt {
        self.column_width(max_width) + self.column_spacing
    }

    /// Resolve the label grid for a file's maximum width and tallest label.
    ///
    /// Fails if the metrics are not usable lengths, or if the page cannot hold
    /// at least one label per column and one column per page.
    pub fn grid(&self, max_width: usize, lines_per_label: usize) -> Result<Grid, LayoutError> {
        if !self.line_spacing.0.is_finite() || self.line_spacing.0 < 0.0 {
            return Err(LayoutError::InvalidGeometry {
                reason: "line spacing must be a finite, non-negative length",
            });
        }
        if self.column_width.is_none() && !(self.font_size.is_positive() && self.char_width > 0.0) {
            return Err(LayoutError::InvalidGeometry {
                reason: "font size and character width must be positive to size columns",
            });
        }

        let label_height = self.label_height(lines_per_label);
        if !label_height.is_positive() {
            return Err(LayoutError::InvalidGeometry {
                reason: "label height must be positive",
            });
        }
        let column_pitch = self.column_pitch(max_width);
        if !column_pitch.is_positive() {
            return Err(LayoutError::InvalidGeometry {
                reason: "column width plus spacing must be positive",
            });
        }

        // float-to-int casts saturate, so negative or NaN ratios become zero
        let labels_per_column = (self.usable_height() / label_height).floor() as usize;
        let columns_per_page = (self.usable_width() / column_pitch).floor() as usize;

        debug!(
            %label_height,
            %column_pitch,
            labels_per_column,
            columns_per_page,
            "resolved label grid"
        );

        if labels_per_column == 0 || columns_per_page == 0 {
            return Err(LayoutError::DegenerateGeometry {
                labels_per_column,
                columns_per_page,
            });
        }

        Ok(Grid {
            capacity: Capacity {
                labels_per_column,
                columns_per_page,
            },
            lines_per_label,
            label_height,
            column_pitch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sheet_matches_label_stock() {
        let geometry = LayoutGeometry::default();
        // five-line labels: 5 * 3.5 + 2.5 = 20pt rows
        let grid = geometry.grid(25, 5).expect("default geometry is usable");
        assert_eq!(grid.label_height, Pt(20.0));
        assert_eq!(grid.capacity.labels_per_column, 39);
        // 25 * 2.9 * 0.6 + 10 = 53.5pt columns across 595.3pt
        assert!((grid.column_pitch.0 - 53.5).abs() < 1e-4);
        assert_eq!(grid.capacity.columns_per_page, 11);
    }

    #[test]
    fn fixed_column_width_ignores_max_width() {
        let geometry = LayoutGeometry {
            column_width: Some(Pt(90.0)),
            ..LayoutGeometry::default()
        };
        assert_eq!(geometry.column_pitch(1), Pt(100.0));
        assert_eq!(geometry.column_pitch(500), Pt(100.0));
    }

    #[test]
    fn label_taller_than_page_is_degenerate() {
        let geometry = LayoutGeometry::default();
        // 300 lines at 3.5pt is far taller than the 780pt printable height
        assert_eq!(
            geometry.grid(10, 300),
            Err(LayoutError::DegenerateGeometry {
                labels_per_column: 0,
                columns_per_page: 21,
            })
        );
    }

    #[test]
    fn column_wider_than_page_is_degenerate() {
        let geometry = LayoutGeometry::default();
        assert!(matches!(
            geometry.grid(1000, 3),
            Err(LayoutError::DegenerateGeometry {
                columns_per_page: 0,
                ..
            })
        ));
    }

    #[test]
    fn margins_larger_than_page_are_degenerate() {
        let geometry = LayoutGeometry {
            margins: Margins::all(Pt(1000.0)),
            ..LayoutGeometry::default()
        };
        assert!(matches!(
            geometry.grid(10, 3),
            Err(LayoutError::DegenerateGeometry {
                labels_per_column: 0,
                columns_per_page: 0,
            })
        ));
    }

    #[test]
    fn zero_height_labels_are_invalid() {
        let geometry = LayoutGeometry {
            line_spacing: Pt(0.0),
            vertical_padding: Pt(0.0),
            ..LayoutGeometry::default()
        };
        assert!(matches!(
            geometry.grid(10, 3),
            Err(LayoutError::InvalidGeometry { .. })
        ));

        let geometry = LayoutGeometry {
            line_spacing: Pt(f32::NAN),
            ..LayoutGeometry::default()
        };
        assert!(matches!(
            geometry.grid(10, 3),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn zero_width_columns_are_invalid() {
        let geometry = LayoutGeometry {
            column_width: Some(Pt(0.0)),
            column_spacing: Pt(0.0),
            ..LayoutGeometry::default()
        };
        assert!(matches!(
            geometry.grid(10, 3),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn json_overrides_only_the_fields_it_names() {
        let geometry = LayoutGeometry::from_json_str(
            r#"{ "font_size": 4.1, "line_spacing": 3.4, "margins": { "top": 20 } }"#,
        )
        .expect("valid config");
        assert_eq!(geometry.font_size, Pt(4.1));
        assert_eq!(geometry.line_spacing, Pt(3.4));
        assert_eq!(geometry.margins.top, Pt(20.0));
        assert_eq!(geometry.margins.bottom, Margins::label_sheet().bottom);
        assert_eq!(geometry.margins.left, Pt(0.0));
        assert_eq!(geometry.page_size, pagesize::A4);
        assert_eq!(geometry.column_spacing, Pt(10.0));
    }

    #[test]
    fn serializes_lengths_as_plain_numbers() {
        let geometry = LayoutGeometry {
            column_width: Some(Pt(72.0)),
            ..LayoutGeometry::default()
        };
        let json = serde_json::to_value(&geometry).expect("serializes");
        assert_eq!(json["column_width"], serde_json::json!(72.0));
        assert_eq!(json["column_spacing"], serde_json::json!(10.0));
        assert!(json["page_size"].is_array());
    }

    #[test]
    fn one_margin_override_keeps_the_label_stock_rows() {
        let geometry = LayoutGeometry::from_json_str(r#"{ "margins": { "top": 20 } }"#)
            .expect("valid config");
        assert_eq!(geometry.margins.bottom, Margins::label_sheet().bottom);
        // 841.9 - 20 - 32.0 leaves room for 39 rows of 20pt, not 41
        let grid = geometry.grid(25, 5).expect("usable geometry");
        assert_eq!(grid.capacity.labels_per_column, 39);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            LayoutGeometry::from_json_str("{ font_size: }"),
            Err(ConfigError::Json(_))
        ));
    }
}
