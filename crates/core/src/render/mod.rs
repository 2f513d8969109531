//! Drawing a composed document onto an output surface.

pub mod html;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::compose::{Document, DrawOp, Stroke, TextRun, TextStyle, Tone};
use crate::layout::{Margins, PageSide, Point, Rect, Size, registration_marks};

pub use html::HtmlSurface;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing before the first page was started")]
    NoPage,

    #[error("failed to format output: {0}")]
    Format(#[from] fmt::Error),
}

/// Something pages can be drawn on. Implementations hold no layout logic;
/// all positions arrive in page space.
pub trait Surface {
    fn begin_page(&mut self, size: Size, side: PageSide, margins: &Margins) -> Result<(), RenderError>;
    fn line(&mut self, from: Point, to: Point, stroke: Stroke, tone: Tone) -> Result<(), RenderError>;
    fn rect(&mut self, rect: Rect, stroke: Stroke, tone: Tone) -> Result<(), RenderError>;
    fn text(&mut self, rect: Rect, runs: &[TextRun], style: &TextStyle) -> Result<(), RenderError>;
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Replay every page of `doc` onto `surface`, adding punch marks to the
/// pages that carry them.
pub fn render<S: Surface + ?Sized>(doc: &Document, surface: &mut S) -> Result<(), RenderError> {
    let size = doc.page_size.dimensions();
    let marks = registration_marks(doc.page_size);

    for page in &doc.pages {
        surface.begin_page(size, page.side, &page.margins)?;
        if page.registration_marks {
            for &(from, to) in &marks {
                surface.line(from, to, Stroke::Solid, Tone::Medium)?;
            }
        }
        for op in &page.ops {
            match op {
                DrawOp::Line { from, to, stroke, tone } => surface.line(*from, *to, *stroke, *tone)?,
                DrawOp::Rect { rect, stroke, tone } => surface.rect(*rect, *stroke, *tone)?,
                DrawOp::Text { rect, runs, style } => surface.text(*rect, runs, style)?,
            }
        }
    }

    surface.finish()
}

/// An sRGB color, written `RRGGBB` with an optional leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}' (expected six hex digits such as 888888)")]
pub struct InvalidColor(pub String);

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidColor(s.to_string()));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| InvalidColor(s.to_string()));
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The three ink shades pages are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub light: Color,
    pub medium: Color,
    pub dark: Color,
}

impl Palette {
    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Light => self.light,
            Tone::Medium => self.medium,
            Tone::Dark => self.dark,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            light: Color(0xaa, 0xaa, 0xaa),
            medium: Color(0x88, 0x88, 0x88),
            dark: Color(0x00, 0x00, 0x00),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("888888", Color(0x88, 0x88, 0x88))]
    #[case("#AAAAAA", Color(0xaa, 0xaa, 0xaa))]
    #[case(" 00ff7f ", Color(0x00, 0xff, 0x7f))]
    fn parses_hex_colors(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(input.parse::<Color>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("88888")]
    #[case("gggggg")]
    #[case("#12345678")]
    fn rejects_bad_colors(#[case] input: &str) {
        assert!(input.parse::<Color>().is_err());
    }

    #[test]
    fn displays_lowercase_with_hash() {
        assert_eq!(Color(0xAA, 0x0B, 0x00).to_string(), "#aa0b00");
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Surface for Recorder {
        fn begin_page(&mut self, _: Size, side: PageSide, _: &Margins) -> Result<(), RenderError> {
            self.calls.push(format!("page {side:?}"));
            Ok(())
        }
        fn line(&mut self, _: Point, _: Point, _: Stroke, _: Tone) -> Result<(), RenderError> {
            self.calls.push("line".into());
            Ok(())
        }
        fn rect(&mut self, _: Rect, _: Stroke, _: Tone) -> Result<(), RenderError> {
            self.calls.push("rect".into());
            Ok(())
        }
        fn text(&mut self, _: Rect, runs: &[TextRun], _: &TextStyle) -> Result<(), RenderError> {
            self.calls.push(format!("text {}", runs[0].text));
            Ok(())
        }
        fn finish(&mut self) -> Result<(), RenderError> {
            self.calls.push("finish".into());
            Ok(())
        }
    }

    #[test]
    fn marks_are_drawn_on_right_pages_only() {
        let config = crate::config::ResolvedConfig::default();
        let doc = crate::compose::notes(&config).unwrap();
        let mut recorder = Recorder::default();
        render(&doc, &mut recorder).unwrap();

        let pages: Vec<_> = recorder.calls.iter().filter(|c| c.starts_with("page")).collect();
        assert_eq!(pages, vec!["page Right", "page Left"]);
        let back = recorder.calls.iter().position(|c| c == "page Left").unwrap();
        let front_lines = recorder.calls[..back].iter().filter(|c| *c == "line").count();
        let back_lines = recorder.calls[back..].iter().filter(|c| *c == "line").count();
        assert_eq!(front_lines, back_lines + 6);
        assert_eq!(recorder.calls.last().unwrap(), "finish");
    }
}
