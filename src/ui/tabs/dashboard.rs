use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_class_date, format_duration, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats strip
            Constraint::Min(5),    // Playlist table
        ])
        .split(area);

    render_stats(frame, app, chunks[0]);
    render_playlist_list(frame, app, chunks[1]);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;
    let line = Line::from(vec![
        Span::styled(" Playlists: ", styles::muted_style()),
        Span::styled(stats.total_playlists.to_string(), styles::highlight_style()),
        Span::styled("   Published: ", styles::muted_style()),
        Span::styled(
            stats.published_playlists.to_string(),
            styles::success_style(),
        ),
        Span::styled("   Tracks: ", styles::muted_style()),
        Span::styled(stats.total_tracks.to_string(), styles::highlight_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_playlist_list(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([
        Cell::from("Title"),
        Cell::from("Class Date"),
        Cell::from("Tracks"),
        Cell::from("Duration"),
        Cell::from("Status"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .playlists
        .iter()
        .enumerate()
        .map(|(i, playlist)| {
            let style = if i == app.playlist_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            let status = if playlist.is_published {
                "published"
            } else {
                "draft"
            };

            Row::new(vec![
                Cell::from(truncate_string(&playlist.title, 40)),
                Cell::from(format_class_date(&playlist.class_date)),
                Cell::from(playlist.tracks.len().to_string()),
                Cell::from(format_duration(Some(playlist.total_duration()))),
                Cell::from(status).style(styles::published_style(playlist.is_published)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Length(22),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Fill(1),
    ];

    let title = format!(
        " Playlists ({}) - [n]ew [x]import [d]elete ",
        app.playlists.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !app.playlists.is_empty() {
        state.select(Some(app.playlist_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
