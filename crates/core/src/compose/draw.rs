//! The layout tree handed to renderers: documents, pages and draw ops.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::DateRange;
use crate::layout::{Margins, PageSide, PageSize, Point, Rect};

/// How a stroke is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Stroke {
    Solid,
    Dashed { on: f64, off: f64, phase: f64 },
}

impl Stroke {
    /// The dashed rule used for dividers and half-hour lines.
    pub const DASHED: Stroke = Stroke::Dashed { on: 2.0, off: 2.0, phase: 1.0 };
    /// The fine dotted outline of an empty checkbox.
    pub const DOTTED: Stroke = Stroke::Dashed { on: 1.0, off: 2.0, phase: 0.5 };
}

/// One of the three configured ink shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Light,
    Medium,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f64,
    pub tone: Tone,
    pub align: Align,
    pub valign: VAlign,
}

impl TextStyle {
    pub const fn heading(align: Align) -> Self {
        Self { size: 20.0, tone: Tone::Dark, align, valign: VAlign::Top }
    }

    pub const fn subheading(align: Align) -> Self {
        Self { size: 12.0, tone: Tone::Medium, align, valign: VAlign::Top }
    }

    pub const fn body() -> Self {
        Self { size: 12.0, tone: Tone::Dark, align: Align::Left, valign: VAlign::Top }
    }

    pub const fn small() -> Self {
        Self { size: 10.0, tone: Tone::Medium, align: Align::Left, valign: VAlign::Top }
    }

    pub const fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub const fn with_valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }
}

/// A span of text in a single shade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum DrawOp {
    Line { from: Point, to: Point, stroke: Stroke, tone: Tone },
    Rect { rect: Rect, stroke: Stroke, tone: Tone },
    Text { rect: Rect, runs: Vec<TextRun>, style: TextStyle },
}

/// What a page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PageKind {
    QuarterOverview { quarter: u32, range: DateRange },
    QuarterGoals { quarter: u32, range: DateRange },
    WeekAhead { monday: NaiveDate, friday: NaiveDate },
    DayTasks { date: NaiveDate },
    DayCalendar { date: NaiveDate },
    Weekend { saturday: NaiveDate, sunday: NaiveDate },
    OneOnOne { name: String, date: NaiveDate },
    OneOnOneBack { name: String, date: NaiveDate },
    Notes,
    /// Intentionally blank, inserted to put the next section on the right side.
    Filler,
}

impl PageKind {
    pub fn is_filler(&self) -> bool {
        matches!(self, PageKind::Filler)
    }

    /// Short machine-friendly name.
    pub fn name(&self) -> &'static str {
        match self {
            PageKind::QuarterOverview { .. } => "quarter-overview",
            PageKind::QuarterGoals { .. } => "quarter-goals",
            PageKind::WeekAhead { .. } => "week-ahead",
            PageKind::DayTasks { .. } => "tasks",
            PageKind::DayCalendar { .. } => "calendar",
            PageKind::Weekend { .. } => "weekend",
            PageKind::OneOnOne { .. } => "one-on-one",
            PageKind::OneOnOneBack { .. } => "one-on-one-back",
            PageKind::Notes => "notes",
            PageKind::Filler => "filler",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            PageKind::QuarterOverview { quarter, range } | PageKind::QuarterGoals { quarter, range } => {
                write!(f, "{name} Q{quarter} {}..{}", range.start(), range.end())
            }
            PageKind::WeekAhead { monday, friday } => write!(f, "{name} {monday}..{friday}"),
            PageKind::DayTasks { date } | PageKind::DayCalendar { date } => {
                write!(f, "{name} {date}")
            }
            PageKind::Weekend { saturday, sunday } => write!(f, "{name} {saturday}..{sunday}"),
            PageKind::OneOnOne { name: who, date } | PageKind::OneOnOneBack { name: who, date } => {
                write!(f, "{name} {who} {date}")
            }
            PageKind::Notes | PageKind::Filler => f.write_str(name),
        }
    }
}

/// A laid-out page, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based position in the document.
    pub number: usize,
    pub side: PageSide,
    pub kind: PageKind,
    pub margins: Margins,
    pub registration_marks: bool,
    pub ops: Vec<DrawOp>,
}

/// An ordered run of pages of one paper size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

impl Document {
    /// Pages that carry content, i.e. everything but fillers.
    pub fn content_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|p| !p.kind.is_filler())
    }
}
