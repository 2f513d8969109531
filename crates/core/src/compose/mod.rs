//! Turning a configuration and a date range into a laid-out document.
//!
//! Layout is pure: composing produces a [`Document`] of pages and draw ops
//! without touching any output. Rendering happens separately in
//! [`crate::render`].

pub mod canvas;
pub mod composer;
pub mod draw;
pub mod pages;

use thiserror::Error;

use crate::calendar::CalendarError;
use crate::layout::LayoutError;
use crate::schedule::TemplateError;

pub use canvas::Canvas;
pub use composer::{PageComposer, notes, one_on_ones, planner, year};
pub use draw::{Align, Document, DrawOp, Page, PageKind, Stroke, TextRun, TextStyle, Tone, VAlign};
pub use pages::{PageBuilder, row_capacity};

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("at least one week is required")]
    NoWeeks,

    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("templates do not fit the page: {0}")]
    Template(#[from] TemplateError),
}
