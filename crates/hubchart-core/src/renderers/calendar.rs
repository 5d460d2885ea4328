// File: crates/hubchart-core/src/renderers/calendar.rs
// Summary: Month calendar drawn as two tables: the month title, then the weeks.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};

use crate::artist::{Artist, Table};
use crate::figure::Axes;
use crate::formatters::new_figure;
use crate::job::{JobContext, JobOutcome, Scratch};
use crate::payload::ChartJob;
use crate::style::{FontSpec, Rgb};
use crate::theme::Theme;
use crate::types::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayFormat {
    /// "M"
    Short,
    /// "Mon"
    Mid,
    /// "Monday"
    Long,
}

impl DayFormat {
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "short" | "1" => DayFormat::Short,
            "long" | "3" => DayFormat::Long,
            _ => DayFormat::Mid,
        }
    }

    pub fn name(self, day: Weekday) -> String {
        let long = match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        };
        match self {
            DayFormat::Short => long[..1].to_string(),
            DayFormat::Mid => long[..3].to_string(),
            DayFormat::Long => long.to_string(),
        }
    }
}

/// `calendarFirstDay`: 6 or "sunday" starts weeks on Sunday, anything else on Monday.
pub fn first_weekday(text: &str) -> Weekday {
    match text.trim().to_ascii_lowercase().as_str() {
        "6" | "sunday" | "sun" => Weekday::Sun,
        _ => Weekday::Mon,
    }
}

/// Week rows of the month; `None` for cells outside it.
pub fn month_grid(year: i32, month: u32, first: Weekday) -> Vec<[Option<u32>; 7]> {
    let Some(start) = NaiveDate::from_ymd_opt(year, month, 1) else { return Vec::new() };
    let lead = (7 + start.weekday().num_days_from_monday() - first.num_days_from_monday()) % 7;
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut col = lead as usize;
    let mut day = start;
    while day.month() == month {
        week[col] = Some(day.day());
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if col > 0 {
        weeks.push(week);
    }
    weeks
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let p = &job.p_dict;
    let theme = Theme::from_job(job, &mut ctx.log);
    let mut figure = new_figure(job, &theme, ctx.draw_labels);
    let mut ax = Axes::new(Frame::new(0.02, 0.02, 0.98, 0.98));
    ax.face = theme.face;
    ax.x.visible = false;
    ax.y.visible = false;

    let today = ctx.now.date();
    let first = first_weekday(&p.text("calendarFirstDay"));
    let format = DayFormat::parse(&p.text("calendarDayFormat"));
    let highlight = p.color_or("todayHighlight", Rgb::new(0.33, 0.33, 0.33));
    let font = FontSpec { family: job.prefs.font_main.clone(), size: job.prefs.main_font_size, color: theme.font };

    let title = today.format("%B %Y").to_string();
    let month = Table::new((0.0, 0.86, 1.0, 1.0), vec![vec![title.clone()]], font.clone());
    ax.add(Artist::Table(month), 1.0);

    let weeks = month_grid(today.year(), today.month(), first);
    let mut cells = vec![(0..7).map(|i| format.name(first_day_plus(first, i))).collect::<Vec<_>>()];
    let mut fills = vec![vec![None; 7]];
    for week in &weeks {
        cells.push(week.iter().map(|d| d.map(|d| d.to_string()).unwrap_or_default()).collect());
        fills.push(week.iter().map(|d| (*d == Some(today.day())).then_some(highlight)).collect());
    }
    let mut table = Table::new((0.0, 0.0, 1.0, 0.86), cells, FontSpec { size: job.prefs.tick_font_size, ..font });
    table.fills = fills;
    table.edge = Some(theme.spine);
    ax.add(Artist::Table(table), 1.0);
    ctx.log.threaddebug(format!("Calendar for {title}: {} weeks, first day {first}.", weeks.len()));

    figure.add_axes(ax);
    Ok(Some(JobOutcome { figure, scratch: Scratch::default() }))
}

fn first_day_plus(first: Weekday, offset: u32) -> Weekday {
    (0..offset).fold(first, |d, _| d.succ())
}
