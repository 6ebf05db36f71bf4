//! Terminal rendering for monthcal-core types.

use chrono::NaiveDate;
use monthcal_core::{CalendarCell, Event, MonthView, Origin, WeekStart};
use owo_colors::OwoColorize;

/// Width of one grid column, including the event marker.
const CELL_WIDTH: usize = 4;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = if self.start == self.end {
            "all day".to_string()
        } else {
            format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
        };

        let title = match self.origin {
            Origin::External => self.title.magenta().to_string(),
            Origin::UserCreated => self.title.clone(),
        };

        format!("{:>11} {} {}", time.dimmed(), title, self.id.dimmed())
    }
}

/// Render a 42-cell grid. `has_events` decides which days get a marker.
pub fn render_grid(
    view: MonthView,
    week_start: WeekStart,
    cells: &[CalendarCell],
    has_events: impl Fn(NaiveDate) -> bool,
) -> String {
    let mut lines = Vec::new();

    let title = view.to_string();
    let width = CELL_WIDTH * 7;
    lines.push(format!("{:^width$}", title).bold().to_string());

    let header: String = week_start
        .day_names()
        .iter()
        .map(|name| format!("{:>width$}", &name[..2], width = CELL_WIDTH))
        .collect();
    lines.push(header.dimmed().to_string());

    for week in cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| render_cell(cell, has_events(cell.date)))
            .collect();
        lines.push(row);
    }

    lines.join("\n")
}

fn render_cell(cell: &CalendarCell, has_events: bool) -> String {
    let day = format!("{:>3}", cell.date.format("%-d"));
    let marker = if has_events { "•" } else { " " };

    let day = if cell.is_today {
        day.reversed().bold().to_string()
    } else if !cell.in_current_month {
        day.dimmed().to_string()
    } else {
        day
    };

    format!("{}{}", day, marker.cyan())
}

/// One line per event, grouped under a date heading.
pub fn render_day(date: NaiveDate, events: &[&Event]) -> Vec<String> {
    let mut lines = vec![date.format("%a %b %-d").to_string().bold().to_string()];
    lines.extend(events.iter().map(|e| format!("  {}", e.render())));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthcal_core::generate_grid_at;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn march_2024(week_start: WeekStart, busy: NaiveDate) -> Vec<String> {
        let view = MonthView::new(2024, 3).unwrap();
        let cells = generate_grid_at(view, week_start, d(2000, 1, 1));
        render_grid(view, week_start, &cells, |date| date == busy)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_monday_grid_header_order() {
        let lines = march_2024(WeekStart::Monday, d(2024, 3, 14));

        assert_eq!(lines.len(), 2 + 6);
        assert!(lines[0].contains("March 2024"));
        assert!(lines[1].contains("  Mo  Tu  We  Th  Fr  Sa  Su"));
    }

    #[test]
    fn test_sunday_grid_header_order() {
        let lines = march_2024(WeekStart::Sunday, d(2024, 3, 14));
        assert!(lines[1].contains("  Su  Mo  Tu  We  Th  Fr  Sa"));
    }

    #[test]
    fn test_only_days_with_events_get_a_marker() {
        let lines = march_2024(WeekStart::Monday, d(2024, 3, 14));

        let markers: usize = lines.iter().map(|l| l.matches('•').count()).sum();
        assert_eq!(markers, 1);
        // Mar 11-17 is the third week row
        assert!(lines[4].contains('•'));
    }

    #[test]
    fn test_days_outside_month_are_dimmed() {
        let outside = CalendarCell {
            date: d(2024, 2, 26),
            in_current_month: false,
            is_today: false,
        };
        let inside = CalendarCell {
            in_current_month: true,
            ..outside
        };

        assert!(render_cell(&outside, false).starts_with("\u{1b}[2m 26"));
        assert!(render_cell(&inside, false).starts_with(" 26"));
        assert!(render_cell(&inside, true).contains('•'));
    }
}
