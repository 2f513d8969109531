//! Page geometry: grids, rectangles and booklet margins.

pub mod geometry;
pub mod grid;
pub mod page;

use thiserror::Error;

pub use geometry::{Point, Rect, Size};
pub use grid::{Grid, GridSpec};
pub use page::{MarginProfiles, Margins, PageSide, PageSize, registration_marks};

/// Geometry requests that cannot be satisfied. These are programming errors
/// in page construction and abort the run instead of being clamped.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("grid needs at least one row and one column (got {columns}x{rows})")]
    EmptyGrid { columns: u16, rows: u16 },

    #[error("grid gutters must be finite and not negative")]
    InvalidGutter,

    #[error("grid bounds {0:?} are not finite")]
    InvalidBounds(Rect),

    #[error("grid gutters leave no room for cells")]
    GuttersTooWide,

    #[error("inverted cell range {from:?} to {to:?}")]
    InvertedRange { from: (i32, i32), to: (i32, i32) },

    #[error("{axis} index {index} is outside the grid ({count} {axis}s plus one margin strip)")]
    OutOfBounds { axis: &'static str, index: i32, count: u16 },
}
