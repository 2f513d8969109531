//! Physical pages: sizes, sides, binding margins and hole-punch marks.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect, Size};

/// Which side of a booklet spread a page lands on.
///
/// Right pages open a new sheet; Left pages are their backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSide {
    Left,
    Right,
}

impl PageSide {
    pub fn flipped(self) -> Self {
        match self {
            PageSide::Left => PageSide::Right,
            PageSide::Right => PageSide::Left,
        }
    }

    /// Right pages carry the hole-punch marks.
    pub fn has_registration_marks(self) -> bool {
        self == PageSide::Right
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// From `[top, right, bottom, left]`, CSS order.
    pub const fn from_trbl(values: [f64; 4]) -> Self {
        Self { top: values[0], right: values[1], bottom: values[2], left: values[3] }
    }
}

/// The two margin profiles of booklet printing. The binding margin always
/// faces the spine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginProfiles {
    /// Used for Left pages: wider right margin.
    pub left_bound: Margins,
    /// Used for Right pages: wider left margin.
    pub right_bound: Margins,
}

impl MarginProfiles {
    pub fn for_side(&self, side: PageSide) -> Margins {
        match side {
            PageSide::Left => self.left_bound,
            PageSide::Right => self.right_bound,
        }
    }
}

impl Default for MarginProfiles {
    fn default() -> Self {
        Self {
            left_bound: Margins::from_trbl([36.0, 72.0, 36.0, 36.0]),
            right_bound: Margins::from_trbl([36.0, 36.0, 36.0, 72.0]),
        }
    }
}

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    pub fn dimensions(self) -> Size {
        match self {
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::A4 => Size::new(595.28, 841.89),
        }
    }

    /// Printable area left after the margins.
    pub fn content_box(self, margins: &Margins) -> Rect {
        let page = self.dimensions();
        Rect::new(
            margins.left,
            margins.top,
            page.width - margins.left - margins.right,
            page.height - margins.top - margins.bottom,
        )
    }
}

/// Horizontal distance of the punch marks from the page's left edge.
const MARK_X: f64 = 25.0;
/// Half-length of each arm of a punch mark.
const MARK_ARM: f64 = 5.0;
/// Three-hole punch spacing, 4.25in.
const HOLE_SPACING: f64 = 306.0;

/// Line segments of the three hole-punch crosses, centred on the page's
/// vertical middle.
pub fn registration_marks(size: PageSize) -> Vec<(Point, Point)> {
    let middle = size.dimensions().height / 2.0;
    [middle - HOLE_SPACING, middle, middle + HOLE_SPACING]
        .into_iter()
        .flat_map(|y| {
            [
                (Point::new(MARK_X - MARK_ARM, y), Point::new(MARK_X + MARK_ARM, y)),
                (Point::new(MARK_X, y - MARK_ARM), Point::new(MARK_X, y + MARK_ARM)),
            ]
        })
        .collect()
}
