//! Row/column grids over a rectangle.

use serde::Serialize;

use super::LayoutError;
use super::geometry::{Point, Rect, Size};

/// Shape of a grid: how many rows and columns, and the gaps between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    pub columns: u16,
    pub rows: u16,
    pub column_gutter: f64,
    pub row_gutter: f64,
}

impl GridSpec {
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows, column_gutter: 0.0, row_gutter: 0.0 }
    }

    pub const fn with_gutters(mut self, column_gutter: f64, row_gutter: f64) -> Self {
        self.column_gutter = column_gutter;
        self.row_gutter = row_gutter;
        self
    }
}

/// A grid anchored at a rectangle's top-left corner. Row 0 is the top row,
/// column 0 the leftmost.
///
/// Index `-1` and index `rows` / `columns` address the strip just outside the
/// grid on that side (hour labels left of column 0, the closing line right of
/// the last column). Anything further out is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    spec: GridSpec,
    bounds: Rect,
    column_width: f64,
    row_height: f64,
}

impl Grid {
    /// Establish a grid over `extent` starting at `origin`.
    pub fn define(spec: GridSpec, origin: Point, extent: Size) -> Result<Grid, LayoutError> {
        Self::within(spec, Rect::from_origin(origin, extent))
    }

    /// Establish a grid over `bounds`.
    pub fn within(spec: GridSpec, bounds: Rect) -> Result<Grid, LayoutError> {
        if spec.columns == 0 || spec.rows == 0 {
            return Err(LayoutError::EmptyGrid { columns: spec.columns, rows: spec.rows });
        }
        let usable = |gutter: f64| gutter.is_finite() && gutter >= 0.0;
        if !usable(spec.column_gutter) || !usable(spec.row_gutter) {
            return Err(LayoutError::InvalidGutter);
        }
        if ![bounds.x, bounds.y, bounds.width, bounds.height].iter().all(|v| v.is_finite()) {
            return Err(LayoutError::InvalidBounds(bounds));
        }

        let columns = f64::from(spec.columns);
        let rows = f64::from(spec.rows);
        let column_width = (bounds.width - spec.column_gutter * (columns - 1.0)) / columns;
        let row_height = (bounds.height - spec.row_gutter * (rows - 1.0)) / rows;
        if column_width <= 0.0 || row_height <= 0.0 {
            return Err(LayoutError::GuttersTooWide);
        }

        Ok(Grid { spec, bounds, column_width, row_height })
    }

    /// An independent grid over any rect, typically one of this grid's cells.
    pub fn subgrid(&self, spec: GridSpec, rect: Rect) -> Result<Grid, LayoutError> {
        Grid::within(spec, rect)
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn rows(&self) -> u16 {
        self.spec.rows
    }

    pub fn columns(&self) -> u16 {
        self.spec.columns
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Index of the last row, as used in cell addresses.
    pub fn last_row(&self) -> i32 {
        i32::from(self.spec.rows) - 1
    }

    /// Index of the last column, as used in cell addresses.
    pub fn last_column(&self) -> i32 {
        i32::from(self.spec.columns) - 1
    }

    /// The rectangle of a single cell.
    pub fn cell(&self, row: i32, col: i32) -> Result<Rect, LayoutError> {
        self.cell_range((row, col), (row, col))
    }

    /// The rectangle spanning two cells, both inclusive.
    pub fn cell_range(&self, from: (i32, i32), to: (i32, i32)) -> Result<Rect, LayoutError> {
        let (r0, c0) = from;
        let (r1, c1) = to;
        if r1 < r0 || c1 < c0 {
            return Err(LayoutError::InvertedRange { from, to });
        }
        for (index, count, axis) in [
            (r0, self.spec.rows, "row"),
            (r1, self.spec.rows, "row"),
            (c0, self.spec.columns, "column"),
            (c1, self.spec.columns, "column"),
        ] {
            if index < -1 || index > i32::from(count) {
                return Err(LayoutError::OutOfBounds { axis, index, count });
            }
        }

        let x0 = self.column_x(c0);
        let x1 = self.column_x(c1) + self.column_width;
        let y0 = self.row_y(r0);
        let y1 = self.row_y(r1) + self.row_height;
        Ok(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Every in-grid cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Rect> + '_ {
        let rows = i32::from(self.spec.rows);
        let columns = i32::from(self.spec.columns);
        (0..rows).flat_map(move |r| {
            (0..columns).map(move |c| {
                Rect::new(self.column_x(c), self.row_y(r), self.column_width, self.row_height)
            })
        })
    }

    fn column_x(&self, col: i32) -> f64 {
        self.bounds.x + f64::from(col) * (self.column_width + self.spec.column_gutter)
    }

    fn row_y(&self, row: i32) -> f64 {
        self.bounds.y + f64::from(row) * (self.row_height + self.spec.row_gutter)
    }
}
