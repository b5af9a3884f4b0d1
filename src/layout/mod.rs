//! Placing label instances on pages.
//!
//! Every label shares one row height (set by the tallest block), so a page is
//! a regular grid of `labels_per_column` rows by `columns_per_page` columns.
//! Instances fill a column top to bottom, then the next column to the right,
//! then the next page. Placement is a pure function of the instance's index in
//! emission order, so laying out the same blocks twice yields the same result.
//!
//! # Example
//!
//! ```
//! use pinlab::layout::{layout, LayoutGeometry};
//! use pinlab::parse::parse_lines;
//!
//! let file = parse_lines(["5", "3", "ab", "cd"]).expect("valid label file");
//! let placed = layout(file.max_width, &file.blocks, &LayoutGeometry::default())
//!     .expect("fits on the page");
//!
//! assert_eq!(placed.instances.len(), 3);
//! assert_eq!(placed.page_count(), 1);
//! ```

mod geometry;
mod margins;

pub use geometry::*;
pub use margins::*;

use crate::error::LayoutError;
use crate::parse::{self, LabelBlock};
use crate::units::Pt;
use serde::Serialize;
use tracing::debug;

/// Most label instances a single layout will place
pub const MAX_INSTANCES: usize = 1_000_000;

/// How many labels fit in a column and how many columns fit on a page
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub labels_per_column: usize,
    pub columns_per_page: usize,
}

/// The grid cell an instance occupies. All indices are zero-based
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    pub page_index: usize,
    pub column_index: usize,
    pub row_index: usize,
}

impl Capacity {
    /// Labels on one full page
    pub fn per_page(&self) -> usize {
        self.labels_per_column.saturating_mul(self.columns_per_page)
    }

    /// The slot of the `k`-th instance in emission order: rows fill first,
    /// then columns, then pages
    pub fn locate(&self, k: usize) -> Slot {
        let per_page = self.per_page();
        let within_page = k % per_page;
        Slot {
            page_index: k / per_page,
            column_index: within_page / self.labels_per_column,
            row_index: within_page % self.labels_per_column,
        }
    }
}

/// A resolved label grid: capacity plus the metrics needed to position rows and columns
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Grid {
    pub capacity: Capacity,
    /// Lines in the tallest label; every row is this tall
    pub lines_per_label: usize,
    /// Height of one label row, padding included
    pub label_height: Pt,
    /// Distance between the left edges of adjacent columns
    pub column_pitch: Pt,
}

impl Grid {
    /// The anchor of a slot in page coordinates (origin at the bottom-left of
    /// the page): `x` is the left edge of its column and `y` is the baseline of
    /// the label's first line, level with the top of its row.
    pub fn origin(&self, geometry: &LayoutGeometry, slot: Slot) -> (Pt, Pt) {
        let x = geometry.margins.left + self.column_pitch * slot.column_index as f32;
        let y = geometry.page_size.1
            - geometry.margins.top
            - self.label_height * slot.row_index as f32;
        (x, y)
    }
}

/// One physical copy of a label block at a specific grid slot
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LabelInstance<'a> {
    /// The originating block's content lines
    pub lines: &'a [String],
    /// Index of the originating block
    pub block_index: usize,
    pub slot: Slot,
}

/// The placement of every label instance, in emission order
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<'a> {
    pub max_width: usize,
    pub grid: Grid,
    pub instances: Vec<LabelInstance<'a>>,
}

impl<'a> Layout<'a> {
    /// Number of pages the instances span
    pub fn page_count(&self) -> usize {
        self.instances
            .last()
            .map(|instance| instance.slot.page_index + 1)
            .unwrap_or_default()
    }

    /// Instances grouped by page, in page order
    pub fn pages(&self) -> std::slice::Chunks<'_, LabelInstance<'a>> {
        // every page but the last is full, so pages are fixed-size runs
        self.instances.chunks(self.grid.capacity.per_page())
    }
}

/// Expand the blocks' repeat counts into individually placed label instances.
///
/// Instances of a block are contiguous and blocks keep their file order. A
/// block with a repeat count of zero places nothing but still counts towards
/// the shared row height.
pub fn layout<'a>(
    max_width: usize,
    blocks: &'a [LabelBlock],
    geometry: &LayoutGeometry,
) -> Result<Layout<'a>, LayoutError> {
    if blocks.is_empty() {
        return Err(LayoutError::EmptyInput);
    }

    let lines_per_label = parse::lines_per_label(blocks);
    let grid = geometry.grid(max_width, lines_per_label)?;

    let total = blocks
        .iter()
        .try_fold(0usize, |total, block| total.checked_add(block.repeat_count))
        .filter(|&total| total <= MAX_INSTANCES);
    if total.is_none() {
        return Err(LayoutError::TooManyInstances {
            limit: MAX_INSTANCES,
        });
    }

    let instances: Vec<LabelInstance<'a>> = blocks
        .iter()
        .enumerate()
        .flat_map(|(block_index, block)| {
            std::iter::repeat((block_index, block.lines.as_slice())).take(block.repeat_count)
        })
        .enumerate()
        .map(|(k, (block_index, lines))| LabelInstance {
            lines,
            block_index,
            slot: grid.capacity.locate(k),
        })
        .collect();

    let layout = Layout {
        max_width,
        grid,
        instances,
    };
    debug!(
        instances = layout.instances.len(),
        pages = layout.page_count(),
        "laid out labels"
    );

    Ok(layout)
}
