use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::CalendarEvent;
use crate::ui::styles;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Month header
            Constraint::Min(8),    // Week grid
        ])
        .split(area);

    render_month_header(frame, app, chunks[0]);
    render_month_grid(frame, app, chunks[1]);
}

fn render_month_header(frame: &mut Frame, app: &App, area: Rect) {
    let month_name = MONTH_NAMES
        .get(app.calendar_month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {} ", month_name, app.calendar_year),
            styles::title_style(),
        ),
        Span::styled("  [←/→] month  [t]oday", styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_month_grid(frame: &mut Frame, app: &App, area: Rect) {
    let Some(first) = NaiveDate::from_ymd_opt(app.calendar_year, app.calendar_month, 1) else {
        return;
    };

    // Sunday-first offset of the month's first day.
    let lead = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(app.calendar_year, app.calendar_month);
    let weeks = (lead + days as usize).div_ceil(7);

    let mut constraints = vec![Constraint::Length(1)]; // weekday header
    constraints.extend(std::iter::repeat(Constraint::Fill(1)).take(weeks));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_weekday_header(frame, rows[0]);

    let col_constraints = [Constraint::Ratio(1, 7); 7];
    let mut day = 1u32;
    for week in 0..weeks {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(rows[week + 1]);

        for (slot, cell) in cells.iter().enumerate() {
            if (week == 0 && slot < lead) || day > days {
                continue;
            }
            render_day_cell(frame, app, *cell, day);
            day += 1;
        }
    }
}

fn render_weekday_header(frame: &mut Frame, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area);

    for (i, label) in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        .iter()
        .enumerate()
    {
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", label), styles::muted_style())),
            cells[i],
        );
    }
}

fn render_day_cell(frame: &mut Frame, app: &App, area: Rect, day: u32) {
    let events: Vec<&CalendarEvent> = app
        .calendar_events
        .iter()
        .filter(|e| e.day() == day)
        .collect();

    let mut lines = vec![Line::from(Span::styled(
        format!("{:>2}", day),
        if events.is_empty() {
            styles::muted_style()
        } else {
            styles::highlight_style()
        },
    ))];

    for event in events.iter().take(area.height.saturating_sub(2) as usize) {
        lines.push(Line::from(Span::styled(
            crate::utils::truncate_string(&event.title, area.width.saturating_sub(2) as usize),
            styles::published_style(event.is_published),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (next, NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_weekday_helper_means_sunday_first() {
        // March 2024 starts on a Friday: offset 5 in a Sunday-first grid.
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        assert_eq!(first.weekday(), Weekday::Fri);
        assert_eq!(first.weekday().num_days_from_sunday(), 5);
    }
}
