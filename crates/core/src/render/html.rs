//! A standalone HTML document with one inline SVG per page, printable from
//! any browser.

use std::fmt::Write;

use svg::node::element::{Line, Rectangle, TSpan, Text};
use svg::{Document, Node};

use super::{Palette, RenderError, Surface};
use crate::compose::{Align, Stroke, TextRun, TextStyle, Tone, VAlign};
use crate::layout::{Margins, PageSide, Point, Rect, Size};

const LINE_WIDTH: f64 = 0.5;
const LINE_SPACING: f64 = 1.2;
/// Baseline offset of the first line, as a share of the font size.
const ASCENT: f64 = 0.8;

struct OpenPage {
    side: PageSide,
    document: Document,
}

pub struct HtmlSurface {
    title: String,
    palette: Palette,
    font_family: String,
    out: String,
    page: Option<OpenPage>,
    started: bool,
}

impl HtmlSurface {
    pub fn new(title: impl Into<String>, palette: Palette, font_family: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            palette,
            font_family: font_family.into(),
            out: String::new(),
            page: None,
            started: false,
        }
    }

    /// The finished document.
    pub fn into_string(self) -> String {
        self.out
    }

    fn header(&mut self, size: Size) -> Result<(), RenderError> {
        let title = svg::node::Text::new(self.title.as_str());
        writeln!(self.out, "<!DOCTYPE html>")?;
        writeln!(self.out, "<html>\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(self.out, "<title>{title}</title>")?;
        writeln!(self.out, "<style>")?;
        writeln!(self.out, "@page {{ size: {}pt {}pt; margin: 0; }}", num(size.width), num(size.height))?;
        writeln!(self.out, "body {{ margin: 0; }}")?;
        writeln!(self.out, "section.page {{ break-after: page; page-break-after: always; }}")?;
        writeln!(self.out, "svg {{ display: block; }}")?;
        writeln!(self.out, "</style>\n</head>\n<body>")?;
        self.started = true;
        Ok(())
    }

    fn close_page(&mut self) -> Result<(), RenderError> {
        if let Some(page) = self.page.take() {
            let side = match page.side {
                PageSide::Left => "left",
                PageSide::Right => "right",
            };
            // Newlines between tspans would render as word gaps.
            let markup = page.document.to_string().replace('\n', "");
            writeln!(self.out, "<section class=\"page {side}\">\n{markup}\n</section>")?;
        }
        Ok(())
    }

    fn document(&mut self) -> Result<&mut Document, RenderError> {
        self.page.as_mut().map(|page| &mut page.document).ok_or(RenderError::NoPage)
    }

    fn stroked<T: Node>(&self, mut node: T, stroke: Stroke, tone: Tone) -> T {
        node.assign("fill", "none");
        node.assign("stroke", self.palette.color(tone).to_string());
        node.assign("stroke-width", num(LINE_WIDTH));
        if let Stroke::Dashed { on, off, phase } = stroke {
            node.assign("stroke-dasharray", format!("{} {}", num(on), num(off)));
            node.assign("stroke-dashoffset", num(phase));
        }
        node
    }

    fn multiline(&self, rect: Rect, x: f64, anchor: &str, run: &TextRun, style: &TextStyle) -> Text {
        let lines: Vec<&str> = run.text.lines().collect();
        let top = block_top(rect, style, lines.len());
        let mut text = Text::new("")
            .set("font-size", num(style.size))
            .set("text-anchor", anchor)
            .set("fill", self.palette.color(run.tone).to_string());
        for (i, line) in lines.iter().enumerate() {
            let y = top + style.size * (ASCENT + LINE_SPACING * i as f64);
            text = text.add(TSpan::new(*line).set("x", num(x)).set("y", num(y)));
        }
        text
    }
}

impl Surface for HtmlSurface {
    fn begin_page(&mut self, size: Size, side: PageSide, _margins: &Margins) -> Result<(), RenderError> {
        if !self.started {
            self.header(size)?;
        }
        self.close_page()?;
        let (w, h) = (num(size.width), num(size.height));
        let document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", format!("{w}pt"))
            .set("height", format!("{h}pt"))
            .set("viewBox", format!("0 0 {w} {h}"))
            .set("font-family", self.font_family.as_str());
        self.page = Some(OpenPage { side, document });
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke, tone: Tone) -> Result<(), RenderError> {
        let line = Line::new()
            .set("x1", num(from.x))
            .set("y1", num(from.y))
            .set("x2", num(to.x))
            .set("y2", num(to.y));
        let line = self.stroked(line, stroke, tone);
        self.document()?.append(line);
        Ok(())
    }

    fn rect(&mut self, rect: Rect, stroke: Stroke, tone: Tone) -> Result<(), RenderError> {
        let shape = Rectangle::new()
            .set("x", num(rect.x))
            .set("y", num(rect.y))
            .set("width", num(rect.width))
            .set("height", num(rect.height));
        let shape = self.stroked(shape, stroke, tone);
        self.document()?.append(shape);
        Ok(())
    }

    fn text(&mut self, rect: Rect, runs: &[TextRun], style: &TextStyle) -> Result<(), RenderError> {
        let (x, anchor) = match style.align {
            Align::Left => (rect.left(), "start"),
            Align::Center => (rect.x + rect.width / 2.0, "middle"),
            Align::Right => (rect.right(), "end"),
        };

        // Runs share one line; a lone run may span several lines.
        let text = if let [single] = runs
            && single.text.contains('\n')
        {
            self.multiline(rect, x, anchor, single, style)
        } else {
            let baseline = block_top(rect, style, 1) + style.size * ASCENT;
            let mut text = Text::new("")
                .set("x", num(x))
                .set("y", num(baseline))
                .set("font-size", num(style.size))
                .set("text-anchor", anchor)
                .set("fill", self.palette.color(style.tone).to_string());
            for run in runs {
                text = text.add(
                    TSpan::new(run.text.as_str()).set("fill", self.palette.color(run.tone).to_string()),
                );
            }
            text
        };
        self.document()?.append(text);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if !self.started {
            self.header(Size::new(0.0, 0.0))?;
        }
        self.close_page()?;
        writeln!(self.out, "</body>\n</html>")?;
        Ok(())
    }
}

/// Top edge of a block of `lines` lines placed in `rect`.
fn block_top(rect: Rect, style: &TextStyle, lines: usize) -> f64 {
    let height = style.size * (1.0 + LINE_SPACING * lines.saturating_sub(1) as f64);
    match style.valign {
        VAlign::Top => rect.top(),
        VAlign::Center => rect.top() + (rect.height - height) / 2.0,
        VAlign::Bottom => rect.bottom() - height,
    }
}

/// Compact number formatting: at most two decimals, no trailing zeros.
fn num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use svg::node::Value;

    fn page(side: PageSide) -> HtmlSurface {
        let mut surface = HtmlSurface::new("t", Palette::default(), "Futura");
        surface
            .begin_page(Size::new(612.0, 792.0), side, &Margins::from_trbl([0.0; 4]))
            .unwrap();
        surface
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(72.0), "72");
        assert_eq!(num(595.28), "595.28");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(1.0 / 3.0), "0.33");
    }

    #[test]
    fn dashed_lines_get_dash_arrays() {
        let surface = page(PageSide::Right);
        let line = surface.stroked(Line::new(), Stroke::DASHED, Tone::Medium);
        let attrs = line.get_attributes().expect("line has attributes");
        assert_eq!(attrs.get("stroke"), Some(&Value::from("#888888")));
        assert_eq!(attrs.get("stroke-dasharray"), Some(&Value::from("2 2")));
        assert_eq!(attrs.get("stroke-dashoffset"), Some(&Value::from("1")));

        let solid = surface.stroked(Line::new(), Stroke::Solid, Tone::Medium);
        assert!(solid.get_attributes().expect("line has attributes").get("stroke-dasharray").is_none());
    }

    #[test]
    fn lines_land_in_the_page_svg() {
        let mut surface = page(PageSide::Right);
        surface
            .line(Point::new(0.0, 1.0), Point::new(10.0, 1.0), Stroke::DOTTED, Tone::Medium)
            .unwrap();
        surface.finish().unwrap();
        let html = surface.into_string();
        let start = html.find("<line").unwrap();
        let line = &html[start..start + html[start..].find("/>").unwrap()];
        for attr in ["x1=\"0\"", "y1=\"1\"", "x2=\"10\"", "y2=\"1\"", "stroke-dasharray=\"1 2\""] {
            assert!(line.contains(attr), "{attr} missing from {line}");
        }
        assert!(html.contains("font-family=\"Futura\""));
    }

    #[test]
    fn drawing_without_page_fails() {
        let mut surface = HtmlSurface::new("t", Palette::default(), "Futura");
        let err = surface
            .rect(Rect::new(0.0, 0.0, 1.0, 1.0), Stroke::Solid, Tone::Dark)
            .unwrap_err();
        assert!(matches!(err, RenderError::NoPage));
    }

    #[test]
    fn multiline_text_becomes_tspans() {
        let mut surface = page(PageSide::Left);
        let run = TextRun { text: "one\ntwo".into(), tone: Tone::Medium };
        surface.text(Rect::new(10.0, 20.0, 100.0, 50.0), &[run], &TextStyle::small()).unwrap();
        surface.finish().unwrap();
        let html = surface.into_string();
        assert!(html.contains("<tspan x=\"10\" y=\"28\">one</tspan>"));
        assert!(html.contains("<tspan x=\"10\" y=\"40\">two</tspan>"));
    }

    #[test]
    fn run_text_is_escaped() {
        let mut surface = page(PageSide::Left);
        let run = TextRun { text: "Q&A <now>".into(), tone: Tone::Dark };
        surface.text(Rect::new(0.0, 0.0, 100.0, 20.0), &[run], &TextStyle::small()).unwrap();
        surface.finish().unwrap();
        let html = surface.into_string();
        assert!(html.contains("Q&amp;A &lt;now&gt;"));
        assert!(!html.contains("<now>"));
    }

    #[test]
    fn one_section_per_page() {
        let config = crate::config::ResolvedConfig::default();
        let doc = crate::compose::notes(&config).unwrap();
        let mut surface = HtmlSurface::new(&doc.title, config.palette, &config.page.font_family);
        render(&doc, &mut surface).unwrap();
        let html = surface.into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<section class=\"page").count(), 2);
        assert_eq!(html.matches("</section>").count(), 2);
        assert_eq!(html.matches("</svg>").count(), 2);
        assert!(html.contains("@page { size: 612pt 792pt; margin: 0; }"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
