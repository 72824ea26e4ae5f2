//! Plain-text rendering of a widget snapshot.
//!
//! The layout mirrors the widget: a month title, the weekday header row,
//! one row per week and a today panel with the next event underneath.
//! Events with a color carry it as a `[#RRGGBB]` tag.

use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::models::appearance::Appearance;
use crate::models::day_cell::DayCell;
use crate::models::event::Event;
use crate::services::widget::WidgetSnapshot;
use crate::utils::date::{format_short_date, weekday_name};

/// Width of one grid cell: marker, two digits, marker, event marker
const CELL_WIDTH: usize = 5;

/// `date_format` is one of the settings' date formats and shapes the today header.
pub fn render(snapshot: &WidgetSnapshot, appearance: &Appearance, date_format: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", snapshot.entry_date.format("%B %Y"));
    let header: Vec<String> = snapshot
        .headers
        .iter()
        .map(|h| format!("{:^width$}", h, width = CELL_WIDTH))
        .collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());

    for week in snapshot.weeks() {
        let row: Vec<String> = week.iter().map(|day| render_cell(day, appearance)).collect();
        let _ = writeln!(out, "{}", row.join(" ").trim_end());
    }

    out.push('\n');
    out.push_str(&render_today(&snapshot.today, date_format));

    if let Some(next) = &snapshot.next_event {
        let _ = writeln!(
            out,
            "{} {} {} {}{}",
            appearance.next_prefix,
            next.label,
            next.event.title,
            time_label(&next.event, next.event.start),
            color_tag(&next.event)
        );
    }

    out
}

pub fn render_cell(day: &DayCell, appearance: &Appearance) -> String {
    let marker = if day.is_today {
        appearance.today_marker
    } else if day.is_faded() {
        appearance.faded_marker
    } else {
        ' '
    };
    let event = if day.events.is_empty() {
        ' '
    } else {
        appearance.event_marker
    };

    format!("{}{:>2}{}{}", marker, day.day_number, marker, event)
}

fn render_today(today: &DayCell, date_format: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        weekday_name(today.date),
        format_short_date(today.date, date_format)
    );

    if today.events.is_empty() {
        out.push_str("  No events\n");
    }
    for event in &today.events {
        let _ = writeln!(
            out,
            "  {:<8} {}{}",
            time_label(event, event.start),
            event.title,
            color_tag(event)
        );
    }

    out
}

fn color_tag(event: &Event) -> String {
    event
        .color
        .as_deref()
        .map(|color| format!(" [{}]", color))
        .unwrap_or_default()
}

fn time_label(event: &Event, at: DateTime<Local>) -> String {
    if event.all_day {
        "all-day".to_string()
    } else {
        at.format("%H:%M").to_string()
    }
}
