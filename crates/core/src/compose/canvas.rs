//! Accumulates draw ops for one page.

use super::draw::{DrawOp, Stroke, TextRun, TextStyle, Tone, VAlign};
use crate::layout::{Point, Rect};

/// Horizontal inset of labels from their cell edge.
pub const LABEL_INSET: f64 = 6.0;
/// Padding around a checkbox inside its row.
pub const CHECKBOX_PADDING: f64 = 6.0;

#[derive(Debug, Default)]
pub struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, from: Point, to: Point) {
        self.stroke_line(from, to, Stroke::Solid, Tone::Medium);
    }

    pub fn dashed_line(&mut self, from: Point, to: Point) {
        self.stroke_line(from, to, Stroke::DASHED, Tone::Medium);
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke, tone: Tone) {
        self.ops.push(DrawOp::Line { from, to, stroke, tone });
    }

    pub fn rect(&mut self, rect: Rect, stroke: Stroke, tone: Tone) {
        self.ops.push(DrawOp::Rect { rect, stroke, tone });
    }

    /// A line along the bottom edge of `rect`.
    pub fn rule_below(&mut self, rect: Rect) {
        self.line(rect.bottom_left(), rect.bottom_right());
    }

    pub fn text(&mut self, rect: Rect, text: impl Into<String>, style: TextStyle) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            rect,
            runs: vec![TextRun { text, tone: style.tone }],
            style,
        });
    }

    /// Text made of differently shaded spans.
    pub fn runs(&mut self, rect: Rect, runs: Vec<TextRun>, style: TextStyle) {
        self.ops.push(DrawOp::Text { rect, runs, style });
    }

    /// A checkbox in the top-left corner of `row`, sized to the row height.
    /// Labelled boxes are solid with the label beside them; empty ones are
    /// dotted.
    pub fn checkbox(&mut self, row: Rect, label: Option<&str>) {
        let size = (row.height - 2.0 * CHECKBOX_PADDING).max(1.0);
        let square = row.corner_square(size, CHECKBOX_PADDING);
        match label.filter(|l| !l.is_empty()) {
            Some(label) => {
                self.rect(square, Stroke::Solid, Tone::Light);
                let offset = size + 2.0 * CHECKBOX_PADDING;
                let label_rect =
                    Rect::new(row.x + offset, row.y, (row.width - offset).max(0.0), row.height);
                self.text(
                    label_rect,
                    label,
                    TextStyle::body().with_tone(Tone::Medium).with_valign(VAlign::Center),
                );
            }
            None => self.rect(square, Stroke::DOTTED, Tone::Light),
        }
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}
