//! Sequencing pages onto booklet sides.

use chrono::{Duration, NaiveDate, Weekday};
use tracing::{debug, info};

use super::ComposeError;
use super::draw::{Document, DrawOp, Page, PageKind};
use super::pages::{PageBuilder, row_capacity};
use crate::calendar::{quarter, quarter_range, sunday_on_or_before, year_weeks};
use crate::config::ResolvedConfig;
use crate::layout::PageSide;
use crate::schedule::{RosterOrder, ScheduleResolver};

const WORK_WEEK: [Weekday; 5] = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

/// Appends pages while tracking which side of the booklet comes next.
///
/// The first page of a document is a Right page. Every page flips the side;
/// sections that must open on a given side get a filler page in front.
#[derive(Debug)]
pub struct PageComposer<'a> {
    config: &'a ResolvedConfig,
    builder: PageBuilder<'a>,
    resolver: ScheduleResolver<'a>,
    next_side: PageSide,
    pages: Vec<Page>,
}

impl<'a> PageComposer<'a> {
    /// Fails when the templates do not fit the configured hour grid.
    pub fn new(config: &'a ResolvedConfig) -> Result<Self, ComposeError> {
        config.templates.validate(&config.hours, row_capacity(config.hours.len()))?;
        Ok(Self {
            config,
            builder: PageBuilder::new(config),
            resolver: ScheduleResolver::new(&config.templates),
            next_side: PageSide::Right,
            pages: Vec::new(),
        })
    }

    pub fn next_side(&self) -> PageSide {
        self.next_side
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn push(&mut self, kind: PageKind, ops: Vec<DrawOp>) {
        let side = self.next_side;
        let page = Page {
            number: self.pages.len() + 1,
            side,
            margins: self.config.page.margins.for_side(side),
            registration_marks: side.has_registration_marks(),
            kind,
            ops,
        };
        debug!(number = page.number, ?side, kind = %page.kind, ops = page.ops.len(), "composed page");
        self.pages.push(page);
        self.next_side = side.flipped();
    }

    fn add<F>(&mut self, kind: PageKind, build: F) -> Result<(), ComposeError>
    where
        F: FnOnce(&PageBuilder<'a>, PageSide) -> Result<Vec<DrawOp>, ComposeError>,
    {
        let ops = build(&self.builder, self.next_side)?;
        self.push(kind, ops);
        Ok(())
    }

    /// Make the next page land on `side`, inserting a blank page if needed.
    pub fn open_on(&mut self, side: PageSide) {
        if self.next_side != side {
            self.push(PageKind::Filler, Vec::new());
        }
    }

    /// All pages of the week opened by the Sunday on or before `anchor`.
    pub fn add_week(&mut self, anchor: NaiveDate) -> Result<(), ComposeError> {
        let sunday = sunday_on_or_before(anchor);
        let next_sunday = sunday + Duration::days(7);
        let q1 = self.config.calendar.q1_start_month;

        let upcoming = quarter(next_sunday, q1)?;
        if quarter(sunday, q1)? != upcoming {
            let range = quarter_range(next_sunday, q1)?;
            self.open_on(PageSide::Right);
            self.add(PageKind::QuarterOverview { quarter: upcoming, range }, |b, side| {
                b.quarter_overview(side, upcoming, range)
            })?;
            self.add(PageKind::QuarterGoals { quarter: upcoming, range }, |b, side| {
                b.quarter_goals(side, upcoming, range)
            })?;
        }

        let monday = sunday + Duration::days(1);
        let friday = sunday + Duration::days(5);
        self.open_on(PageSide::Right);
        self.add(PageKind::WeekAhead { monday, friday }, |b, side| b.week_ahead(side, monday, friday))?;

        let resolver = self.resolver;
        let week = resolver.resolve_week(sunday);
        for weekday in WORK_WEEK {
            let day = week.day(weekday);
            self.add(PageKind::DayTasks { date: day.date }, |b, side| b.day_tasks(side, day))?;
            self.add(PageKind::DayCalendar { date: day.date }, |b, side| b.day_calendar(side, day))?;
        }

        let following = resolver.resolve_week(next_sunday);
        let saturday = week.day(Weekday::Sat);
        let weekend_sunday = following.day(Weekday::Sun);
        self.add(
            PageKind::Weekend { saturday: saturday.date, sunday: weekend_sunday.date },
            |b, side| b.weekend(side, saturday, weekend_sunday),
        )?;

        for entry in resolver.roster_entries(sunday, self.config.roster_order) {
            let kind = PageKind::OneOnOne { name: entry.name.clone(), date: entry.date };
            self.add(kind, |b, side| b.one_on_one(side, &entry.name, entry.date))?;
        }

        Ok(())
    }

    /// Front and back forms for every roster entry of the week, each opening
    /// on a Right page.
    pub fn add_one_on_ones(&mut self, anchor: NaiveDate, order: RosterOrder) -> Result<(), ComposeError> {
        let entries = self.resolver.roster_entries(anchor, order);
        if entries.is_empty() {
            debug!(%anchor, "no one-on-ones scheduled");
        }
        for entry in entries {
            self.open_on(PageSide::Right);
            let front = PageKind::OneOnOne { name: entry.name.clone(), date: entry.date };
            self.add(front, |b, side| b.one_on_one(side, &entry.name, entry.date))?;
            let back = PageKind::OneOnOneBack { name: entry.name.clone(), date: entry.date };
            self.add(back, |b, side| b.one_on_one_back(side, &entry.name, entry.date))?;
        }
        Ok(())
    }

    /// A notes sheet, front and back.
    pub fn add_notes(&mut self) -> Result<(), ComposeError> {
        self.open_on(PageSide::Right);
        self.add(PageKind::Notes, |b, side| b.notes(side))?;
        self.add(PageKind::Notes, |b, side| b.notes(side))
    }

    pub fn finish(self, title: impl Into<String>) -> Document {
        Document { title: title.into(), page_size: self.config.page.size, pages: self.pages }
    }
}

fn week_sundays(sunday: NaiveDate, weeks: u32) -> Result<impl Iterator<Item = NaiveDate>, ComposeError> {
    if weeks == 0 {
        return Err(ComposeError::NoWeeks);
    }
    let sunday = sunday_on_or_before(sunday);
    Ok((0..weeks).map(move |week| sunday + Duration::weeks(i64::from(week))))
}

/// The weekly planner for `weeks` weeks starting with the week of `sunday`.
pub fn planner(config: &ResolvedConfig, sunday: NaiveDate, weeks: u32) -> Result<Document, ComposeError> {
    let mut composer = PageComposer::new(config)?;
    for week in week_sundays(sunday, weeks)? {
        composer.add_week(week)?;
    }
    let doc = composer.finish(format!("Planner {}", sunday_on_or_before(sunday)));
    info!(weeks, pages = doc.pages.len(), "composed planner");
    Ok(doc)
}

/// One-on-one forms for every roster entry over `weeks` weeks.
pub fn one_on_ones(
    config: &ResolvedConfig,
    sunday: NaiveDate,
    weeks: u32,
    order: RosterOrder,
) -> Result<Document, ComposeError> {
    let mut composer = PageComposer::new(config)?;
    for week in week_sundays(sunday, weeks)? {
        composer.add_one_on_ones(week, order)?;
    }
    let doc = composer.finish(format!("One-on-ones {}", sunday_on_or_before(sunday)));
    info!(weeks, pages = doc.pages.len(), "composed one-on-one forms");
    Ok(doc)
}

pub fn notes(config: &ResolvedConfig) -> Result<Document, ComposeError> {
    let mut composer = PageComposer::new(config)?;
    composer.add_notes()?;
    Ok(composer.finish("Notes"))
}

/// The planner for every week touching calendar year `year`.
pub fn year(config: &ResolvedConfig, year: i32) -> Result<Document, ComposeError> {
    let (sunday, weeks) = year_weeks(year)?;
    let mut doc = planner(config, sunday, weeks)?;
    doc.title = format!("Planner {year}");
    Ok(doc)
}
