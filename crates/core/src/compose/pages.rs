//! Content of each page type, laid out on the page grid.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use super::canvas::{Canvas, LABEL_INSET};
use super::draw::{Align, DrawOp, Stroke, TextRun, TextStyle, Tone, VAlign};
use super::ComposeError;
use crate::calendar::{DateRange, business_days_left_in_year};
use crate::config::ResolvedConfig;
use crate::layout::{Grid, GridSpec, LayoutError, PageSide, Rect};
use crate::locale::{Language, Strings};
use crate::schedule::{DaySchedule, RowCapacity};

/// Rows above the body of every full page: heading and subheading.
const HEADER_ROWS: i32 = 2;
/// First task row on a weekday task page; rows 1-4 hold the metrics box and
/// row 5 the column labels.
const FIRST_TASK_ROW: i32 = 6;
/// How far hour lines reach left into the label strip.
const HOUR_OVERHANG: f64 = 24.0;
/// Hour labels sit this far left of the grid edge.
const HOUR_LABEL_SHIFT: f64 = -4.0;
/// Row count the one-on-one form positions are given for (14 hour labels).
const NOMINAL_FORM_ROWS: i32 = 30;

/// Task rows available on the pages that print a weekday's templates, given
/// the number of hour labels.
pub fn row_capacity(hour_count: usize) -> RowCapacity {
    let body = 2 * hour_count;
    RowCapacity {
        weekdays: body.saturating_sub(FIRST_TASK_ROW as usize - HEADER_ROWS as usize),
        weekend: hour_count.saturating_sub(1),
    }
}

/// Builds the draw ops of single pages. Holds no state between pages.
#[derive(Debug, Clone, Copy)]
pub struct PageBuilder<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> PageBuilder<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    fn language(&self) -> Language {
        self.config.language
    }

    fn strings(&self) -> &'static Strings {
        self.config.language.strings()
    }

    fn hour_count(&self) -> i32 {
        i32::try_from(self.config.hours.len()).unwrap_or(i32::MAX)
    }

    /// The standard page grid: `columns` wide, two header rows plus two rows
    /// per hour label.
    fn grid(&self, side: PageSide) -> Result<Grid, LayoutError> {
        let rows = u16::try_from(HEADER_ROWS + 2 * self.hour_count()).unwrap_or(u16::MAX);
        let margins = self.config.page.margins.for_side(side);
        let content = self.config.page.size.content_box(&margins);
        Grid::within(GridSpec::new(self.config.page.columns, rows), content)
    }

    fn half(grid: &Grid) -> i32 {
        (grid.last_column() + 1) / 2
    }

    fn capacity(&self) -> RowCapacity {
        row_capacity(self.config.hours.len())
    }

    fn format(&self, date: NaiveDate, fmt: &str) -> String {
        self.language().format_date(date, fmt)
    }

    /// Full-width row `row`.
    fn row(grid: &Grid, row: i32) -> Result<Rect, LayoutError> {
        grid.cell_range((row, 0), (row, grid.last_column()))
    }

    pub fn week_ahead(
        &self,
        side: PageSide,
        monday: NaiveDate,
        friday: NaiveDate,
    ) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let grid = self.grid(side)?;
        let last_col = grid.last_column();
        let mut canvas = Canvas::new();

        canvas.text(Self::row(&grid, 0)?, s.week_ahead, TextStyle::heading(Align::Left));
        canvas.text(
            grid.cell(0, last_col)?,
            self.format(monday, s.week_number),
            TextStyle::heading(Align::Right),
        );
        let range = format!("{}{}", self.format(monday, s.range_start), self.format(friday, s.range_end));
        canvas.text(Self::row(&grid, 1)?, range, TextStyle::subheading(Align::Left));
        if let Some(terms) = self.config.calendar.semesters {
            canvas.text(
                grid.cell_range((1, Self::half(&grid)), (1, last_col))?,
                format!("{} {}", s.semester, terms.semester(monday)),
                TextStyle::subheading(Align::Right),
            );
        }

        for row in HEADER_ROWS..=grid.last_row() {
            canvas.rule_below(Self::row(&grid, row)?);
        }

        Ok(canvas.into_ops())
    }

    pub fn day_tasks(&self, side: PageSide, day: &DaySchedule<'_>) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let grid = self.grid(side)?;
        let last_col = grid.last_column();
        let last_row = grid.last_row();
        let half = Self::half(&grid);
        let mut canvas = Canvas::new();

        canvas.text(
            grid.cell_range((0, 0), (1, half))?,
            self.format(day.date, s.day_heading),
            TextStyle::heading(Align::Left),
        );
        canvas.text(
            grid.cell_range((0, half), (1, last_col))?,
            self.format(day.date, s.weekday),
            TextStyle::heading(Align::Right),
        );

        self.metrics_box(&mut canvas, &grid)?;

        let labels = grid.cell_range((5, 0), (5, half - 1))?.translate(LABEL_INSET, 0.0);
        canvas.text(labels, s.tasks, TextStyle::body().with_valign(VAlign::Center));
        let labels = grid.cell_range((5, half), (5, last_col))?.translate(LABEL_INSET, 0.0);
        canvas.text(labels, s.notes, TextStyle::body().with_valign(VAlign::Center));

        for row in 5..=last_row {
            canvas.rule_below(Self::row(&grid, row)?);
        }

        let divider = grid.cell_range((FIRST_TASK_ROW, half - 1), (last_row, half - 1))?;
        canvas.dashed_line(divider.top_right(), divider.bottom_right());

        let tasks = dense_tasks(day, self.capacity().for_weekday(day.weekday));
        for (i, row) in (FIRST_TASK_ROW..=last_row).enumerate() {
            let cell = grid.cell_range((row, 0), (row, half - 1))?;
            canvas.checkbox(cell, tasks.get(i).copied().flatten());
        }

        Ok(canvas.into_ops())
    }

    /// Dashed box over rows 1-4 with write-in slots and the shutdown checkbox.
    fn metrics_box(&self, canvas: &mut Canvas, grid: &Grid) -> Result<(), LayoutError> {
        let s = self.strings();
        let last_col = grid.last_column();
        let area = grid.cell_range((1, 0), (4, last_col))?;
        canvas.rect(area, Stroke::DASHED, Tone::Medium);
        canvas.text(area.inset(10.0, 10.0), s.daily_metrics, TextStyle::body().with_tone(Tone::Medium));

        let slots_area = grid.cell_range((2, 0), (3, last_col))?.inset(10.0, 0.0);
        let slots = grid.subgrid(GridSpec::new(grid.columns(), 1).with_gutters(12.0, 0.0), slots_area)?;
        for slot in slots.cells() {
            canvas.stroke_line(slot.bottom_left(), slot.bottom_right(), Stroke::Solid, Tone::Light);
        }

        let checkbox = Rect::new(area.right() - 20.0, area.bottom() - 20.0, 10.0, 10.0);
        canvas.rect(checkbox, Stroke::Solid, Tone::Medium);
        canvas.text(
            area.translate(-27.0, -7.0),
            s.shutdown_complete,
            TextStyle::body()
                .with_tone(Tone::Medium)
                .with_align(Align::Right)
                .with_valign(VAlign::Bottom),
        );
        Ok(())
    }

    pub fn day_calendar(
        &self,
        side: PageSide,
        day: &DaySchedule<'_>,
    ) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let grid = self.grid(side)?;
        let last_col = grid.last_column();
        let half = Self::half(&grid);
        let mut canvas = Canvas::new();

        canvas.text(
            grid.cell_range((0, 0), (1, half - 1))?,
            self.format(day.date, s.calendar_heading),
            TextStyle::heading(Align::Left),
        );
        canvas.text(
            grid.cell_range((0, half), (0, last_col))?,
            self.format(day.date, s.weekday),
            TextStyle::heading(Align::Right),
        );

        let mut counters = vec![TextRun {
            text: format!("{} {}", business_days_left_in_year(day.date), s.work_days_left_in_year),
            tone: Tone::Medium,
        }];
        if let Some(sprints) = self.config.calendar.sprints {
            counters.push(TextRun {
                text: format!(" · {} {}", sprints.days_left(day.date), s.days_left_in_sprint),
                tone: Tone::Light,
            });
        }
        canvas.runs(Self::row(&grid, 1)?, counters, TextStyle::subheading(Align::Left));

        let first_hour = Self::row(&grid, HEADER_ROWS)?;
        canvas.line(first_hour.top_left().offset(-HOUR_OVERHANG, 0.0), first_hour.top_right());

        for (i, label) in self.config.hours.iter() {
            let row = HEADER_ROWS + 2 * index(i);
            if let Some(label) = label {
                canvas.text(
                    grid.cell(row, -1)?.translate(HOUR_LABEL_SHIFT, 0.0),
                    label,
                    TextStyle::body().with_align(Align::Right).with_valign(VAlign::Center),
                );
            }
            let half_hour = Self::row(&grid, row)?;
            canvas.dashed_line(half_hour.bottom_left().offset(-HOUR_OVERHANG, 0.0), half_hour.bottom_right());
            let hour = Self::row(&grid, row + 1)?;
            canvas.line(hour.bottom_left().offset(-HOUR_OVERHANG, 0.0), hour.bottom_right());
        }

        for col in 0..=i32::from(grid.columns()) {
            let edge = grid.cell_range((HEADER_ROWS, col), (grid.last_row(), col))?;
            canvas.dashed_line(edge.top_left(), edge.bottom_left());
        }

        for (label, text) in &day.appointments {
            let Some(position) = self.config.hours.position(label) else { continue };
            let row = HEADER_ROWS + 2 * index(position);
            let slot = grid.cell_range((row, 0), (row + 1, last_col))?.inset(LABEL_INSET, 0.0);
            canvas.text(slot, *text, TextStyle::body().with_valign(VAlign::Center));
        }

        Ok(canvas.into_ops())
    }

    /// Saturday and the following Sunday side by side: task rows on top, an
    /// hour grid below.
    pub fn weekend(
        &self,
        side: PageSide,
        saturday: &DaySchedule<'_>,
        sunday: &DaySchedule<'_>,
    ) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let grid = self.grid(side)?;
        let last_col = grid.last_column();
        let last_row = grid.last_row();
        let half = Self::half(&grid);
        let hours = self.hour_count();
        let task_start = HEADER_ROWS;
        let task_last = task_start + hours - 1;
        let hour_start = task_last + 1;
        let mut canvas = Canvas::new();

        let halves = [(saturday, 0, half - 1), (sunday, half, last_col)];
        for (day, from, to) in halves {
            canvas.text(
                grid.cell_range((0, from), (0, to))?,
                self.format(day.date, s.weekday),
                TextStyle::heading(Align::Left),
            );
            canvas.text(
                grid.cell_range((1, from), (1, to))?,
                self.format(day.date, s.date_short),
                TextStyle::subheading(Align::Left),
            );
            let labels = grid.cell_range((task_start, from), (task_start, to))?.translate(LABEL_INSET, 0.0);
            canvas.text(labels, s.tasks, TextStyle::body().with_valign(VAlign::Center));
        }

        for row in task_start..=task_last {
            canvas.rule_below(Self::row(&grid, row)?);
        }
        let divider = grid.cell_range((task_start + 1, half - 1), (task_last, half - 1))?;
        canvas.dashed_line(divider.top_right(), divider.bottom_right());

        let capacity = self.capacity().weekend;
        for (day, from, to) in halves {
            let tasks = dense_tasks(day, capacity);
            for (i, row) in ((task_start + 1)..=task_last).enumerate() {
                let cell = grid.cell_range((row, from), (row, to))?;
                canvas.checkbox(cell, tasks.get(i).copied().flatten());
            }
        }

        for (i, label) in self.config.hours.iter() {
            let row = hour_start + index(i);
            if let Some(label) = label {
                canvas.text(
                    grid.cell(row, -1)?.translate(HOUR_LABEL_SHIFT, 0.0),
                    label,
                    TextStyle::body().with_align(Align::Right).with_valign(VAlign::Center),
                );
            }
            let hour = Self::row(&grid, row)?;
            canvas.line(hour.bottom_left().offset(-HOUR_OVERHANG, 0.0), hour.bottom_right());
        }
        for col in [0, half, i32::from(grid.columns())] {
            let edge = grid.cell_range((hour_start, col), (last_row, col))?;
            canvas.dashed_line(edge.top_left(), edge.bottom_left());
        }

        for (day, from, to) in halves {
            for (label, text) in &day.appointments {
                let Some(position) = self.config.hours.position(label) else { continue };
                let row = hour_start + index(position);
                let slot = grid.cell_range((row, from), (row, to))?.inset(LABEL_INSET, 0.0);
                canvas.text(slot, *text, TextStyle::body().with_valign(VAlign::Center));
            }
        }

        Ok(canvas.into_ops())
    }

    /// Row of a one-on-one form element, scaled from the 30-row layout to
    /// the configured hour count.
    fn form_row(grid: &Grid, nominal: i32) -> i32 {
        let rows = grid.last_row() + 1;
        HEADER_ROWS + (nominal - HEADER_ROWS) * (rows - 4) / (NOMINAL_FORM_ROWS - 4)
    }

    fn form_header(&self, canvas: &mut Canvas, grid: &Grid, name: &str, date: NaiveDate) -> Result<(), LayoutError> {
        let s = self.strings();
        let half = Self::half(grid);
        canvas.text(grid.cell_range((0, 0), (1, half - 1))?, name, TextStyle::heading(Align::Left));
        canvas.text(
            grid.cell_range((1, 0), (1, half - 1))?,
            self.format(date, s.date_long),
            TextStyle::subheading(Align::Left),
        );
        Ok(())
    }

    /// Ruled rows from `first` to `last`; rows with a heading print it
    /// instead of the rule.
    fn form_sections(
        canvas: &mut Canvas,
        grid: &Grid,
        first: i32,
        last: i32,
        headings: BTreeMap<i32, Vec<TextRun>>,
    ) -> Result<(), LayoutError> {
        let mut headings = headings;
        for row in first..=last {
            let cell = Self::row(grid, row)?;
            match headings.remove(&row) {
                Some(runs) => canvas.runs(cell, runs, TextStyle::body().with_valign(VAlign::Bottom)),
                None => canvas.rule_below(cell),
            }
        }
        Ok(())
    }

    fn titled(title: &str, instructions: &str) -> Vec<TextRun> {
        vec![
            TextRun { text: title.to_string(), tone: Tone::Dark },
            TextRun { text: format!(" {instructions}"), tone: Tone::Medium },
        ]
    }

    pub fn one_on_one(&self, side: PageSide, name: &str, date: NaiveDate) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let grid = self.grid(side)?;
        let mut canvas = Canvas::new();
        self.form_header(&mut canvas, &grid, name, date)?;

        let headings = BTreeMap::from([
            (Self::form_row(&grid, 2), Self::titled(s.personal_notes, s.personal_notes_example)),
            (Self::form_row(&grid, 5), Self::titled(s.their_update, s.their_update_instructions)),
            (Self::form_row(&grid, 15), Self::titled(s.my_update, s.my_update_instructions)),
            (Self::form_row(&grid, 24), Self::titled(s.future, s.future_instructions)),
        ]);
        Self::form_sections(&mut canvas, &grid, HEADER_ROWS, grid.last_row() - 1, headings)?;

        Ok(canvas.into_ops())
    }

    pub fn one_on_one_back(
        &self,
        side: PageSide,
        name: &str,
        date: NaiveDate,
    ) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let grid = self.grid(side)?;
        let last_col = grid.last_column();
        let half = Self::half(&grid);
        let mut canvas = Canvas::new();
        self.form_header(&mut canvas, &grid, name, date)?;

        let question_start = Self::form_row(&grid, 25);
        let question_end = (question_start + 4).min(grid.last_row());
        let dark = |text: &str| vec![TextRun { text: text.to_string(), tone: Tone::Dark }];
        let headings = BTreeMap::from([
            (Self::form_row(&grid, 2), dark(s.additional_notes)),
            (Self::form_row(&grid, 20), dark(s.feedback)),
        ]);
        Self::form_sections(&mut canvas, &grid, HEADER_ROWS, question_start - 1, headings)?;

        canvas.text(
            Self::row(&grid, question_start)?,
            s.questions_to_ask,
            TextStyle::body().with_valign(VAlign::Bottom),
        );
        if question_start < question_end {
            canvas.text(
                grid.cell_range((question_start + 1, 0), (question_end, half - 1))?,
                s.questions_left,
                TextStyle::small(),
            );
            canvas.text(
                grid.cell_range((question_start + 1, half), (question_end, last_col))?,
                s.questions_right,
                TextStyle::small(),
            );
        }

        Ok(canvas.into_ops())
    }

    /// Overview of the quarter `range`: one row per week, Monday to Friday
    /// dates in a nested grid.
    pub fn quarter_overview(
        &self,
        side: PageSide,
        quarter: u32,
        range: DateRange,
    ) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let grid = self.grid(side)?;
        let last_col = grid.last_column();
        let mut canvas = Canvas::new();

        canvas.text(
            Self::row(&grid, 0)?,
            format!("{}{quarter}", s.quarter),
            TextStyle::heading(Align::Left),
        );
        canvas.text(
            grid.cell(0, last_col)?,
            range.start().year().to_string(),
            TextStyle::heading(Align::Right),
        );
        canvas.text(Self::row(&grid, 1)?, self.range_label(range), TextStyle::subheading(Align::Left));

        let mondays = quarter_mondays(range);
        let body = grid.cell_range((HEADER_ROWS, 0), (grid.last_row(), last_col))?;
        let week_count = u16::try_from(mondays.len()).unwrap_or(u16::MAX);
        let weeks = grid.subgrid(GridSpec::new(grid.columns(), week_count), body)?;

        for (r, monday) in mondays.into_iter().enumerate() {
            let r = index(r);
            canvas.text(
                weeks.cell(r, 0)?.inset(LABEL_INSET, 0.0),
                self.format(monday, s.week_number),
                TextStyle::small().with_valign(VAlign::Center),
            );
            let days = weeks.subgrid(GridSpec::new(5, 1), weeks.cell_range((r, 1), (r, weeks.last_column()))?)?;
            for (c, cell) in days.cells().enumerate() {
                let date = monday + Duration::days(c as i64);
                let tone = if range.contains(date) { Tone::Dark } else { Tone::Light };
                canvas.text(
                    cell,
                    date.day().to_string(),
                    TextStyle::small().with_tone(tone).with_align(Align::Center).with_valign(VAlign::Center),
                );
            }
            canvas.rule_below(weeks.cell_range((r, 0), (r, weeks.last_column()))?);
        }

        Ok(canvas.into_ops())
    }

    pub fn quarter_goals(
        &self,
        side: PageSide,
        quarter: u32,
        range: DateRange,
    ) -> Result<Vec<DrawOp>, ComposeError> {
        let s = self.strings();
        let heading = format!("{}{quarter} {}", s.quarter, s.quarter_goals);
        self.checklist(side, &heading, Some(&self.range_label(range)))
    }

    pub fn notes(&self, side: PageSide) -> Result<Vec<DrawOp>, ComposeError> {
        self.checklist(side, self.strings().notes_title, None)
    }

    /// A heading over ruled rows, each with an empty checkbox.
    fn checklist(&self, side: PageSide, heading: &str, subheading: Option<&str>) -> Result<Vec<DrawOp>, ComposeError> {
        let grid = self.grid(side)?;
        let last_row = grid.last_row();
        let mut canvas = Canvas::new();

        canvas.text(Self::row(&grid, 0)?, heading, TextStyle::heading(Align::Left));
        if let Some(sub) = subheading {
            canvas.text(Self::row(&grid, 1)?, sub, TextStyle::subheading(Align::Left));
        }
        for row in HEADER_ROWS..=last_row {
            canvas.rule_below(Self::row(&grid, row)?);
        }
        for row in (HEADER_ROWS + 1)..=last_row {
            canvas.checkbox(grid.cell(row, 0)?, None);
        }

        Ok(canvas.into_ops())
    }

    fn range_label(&self, range: DateRange) -> String {
        let s = self.strings();
        format!("{}{}", self.format(range.start(), s.range_start), self.format(range.end(), s.range_end))
    }
}

fn index(i: usize) -> i32 {
    i32::try_from(i).unwrap_or(i32::MAX)
}

/// Template labels by row, `None` for free rows.
fn dense_tasks<'a>(day: &DaySchedule<'a>, capacity: usize) -> Vec<Option<&'a str>> {
    let mut rows = vec![None; capacity];
    for &(row, label) in &day.tasks {
        if let Some(slot) = rows.get_mut(row) {
            *slot = Some(label);
        }
    }
    rows
}

/// Mondays of every week touching `range`.
fn quarter_mondays(range: DateRange) -> Vec<NaiveDate> {
    let start = range.start();
    let mut monday = start - Duration::days(i64::from(start.weekday().num_days_from_monday()));
    let mut mondays = Vec::new();
    while monday <= range.end() {
        mondays.push(monday);
        monday += Duration::days(7);
    }
    mondays
}
