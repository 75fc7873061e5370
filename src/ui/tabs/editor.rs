use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, EditorFocus};
use crate::ui::styles;
use crate::utils::{format_class_date, format_duration, format_optional, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Playlist details
            Constraint::Min(5),    // Track table
        ])
        .split(area);

    render_details(frame, app, chunks[0]);
    render_tracks(frame, app, chunks[1]);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.editor_focus == EditorFocus::Details;

    let content = match app.editor_playlist {
        Some(ref playlist) => {
            let status = if playlist.is_published {
                Span::styled("published", styles::success_style())
            } else {
                Span::styled("draft", styles::muted_style())
            };

            vec![
                Line::from(Span::styled(&playlist.title, styles::title_style())),
                Line::from(vec![
                    Span::styled("Class:    ", styles::muted_style()),
                    Span::raw(format_class_date(&playlist.class_date)),
                ]),
                Line::from(vec![
                    Span::styled("Status:   ", styles::muted_style()),
                    status,
                ]),
                Line::from(vec![
                    Span::styled("Notes:    ", styles::muted_style()),
                    Span::raw(format_optional(&playlist.description, "-")),
                ]),
            ]
        }
        None => vec![
            Line::from(Span::styled("New playlist", styles::title_style())),
            Line::from(Span::styled(
                "Not saved yet",
                styles::muted_style(),
            )),
        ],
    };

    let block = Block::default()
        .title(" Playlist - [e]dit [p]ublish toggle [d]elete [Esc] back ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_tracks(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.editor_focus == EditorFocus::Tracks;

    let header = Row::new([
        Cell::from("#"),
        Cell::from("Title"),
        Cell::from("Artist"),
        Cell::from("Length"),
        Cell::from("BPM"),
    ])
    .style(styles::title_style())
    .height(1);

    let tracks = app
        .editor_playlist
        .as_ref()
        .map(|p| p.tracks.as_slice())
        .unwrap_or(&[]);

    let rows: Vec<Row> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let style = if focused && i == app.track_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(track.position.to_string()),
                Cell::from(truncate_string(&track.title, 36)),
                Cell::from(truncate_string(&track.artist, 24)),
                Cell::from(format_duration(track.duration)),
                Cell::from(
                    track
                        .bpm
                        .map(|b| b.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(40),
        Constraint::Percentage(28),
        Constraint::Length(8),
        Constraint::Length(6),
    ];

    let total = app
        .editor_playlist
        .as_ref()
        .map(|p| format_duration(Some(p.total_duration())))
        .unwrap_or_else(|| "-".to_string());
    let title = format!(
        " Tracks ({}) - total {} - [a]dd [e]dit [K/J] move [+/-] bpm [Del] remove ",
        tracks.len(),
        total
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if focused && !tracks.is_empty() {
        state.select(Some(app.track_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
