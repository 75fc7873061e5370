use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_class_date, format_duration, truncate_string};

/// Read-only view of a published playlist. Reachable without a session.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_tracks(frame, app, chunks[1]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.public_playlist {
        Some(ref playlist) => vec![
            Line::from(Span::styled(&playlist.title, styles::title_style())),
            Line::from(vec![
                Span::styled("Class: ", styles::muted_style()),
                Span::raw(format_class_date(&playlist.class_date)),
                Span::styled("   Total: ", styles::muted_style()),
                Span::raw(format_duration(Some(playlist.total_duration()))),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "Loading playlist...",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_tracks(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([
        Cell::from("#"),
        Cell::from("Title"),
        Cell::from("Artist"),
        Cell::from("Length"),
    ])
    .style(styles::title_style())
    .height(1);

    let tracks = app
        .public_playlist
        .as_ref()
        .map(|p| p.tracks.as_slice())
        .unwrap_or(&[]);

    let rows: Vec<Row> = tracks
        .iter()
        .map(|track| {
            Row::new(vec![
                Cell::from(track.position.to_string()),
                Cell::from(truncate_string(&track.title, 40)),
                Cell::from(truncate_string(&track.artist, 28)),
                Cell::from(format_duration(track.duration)),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(45),
        Constraint::Percentage(33),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Tracks ({}) ", tracks.len()))
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );

    frame.render_widget(table, area);
}
