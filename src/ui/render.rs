use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, Route};

use super::styles;
use super::tabs::{calendar, dashboard, editor, public};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingDelete) {
        render_delete_overlay(frame, app);
    }

    if matches!(app.state, AppState::Editing) {
        render_edit_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  Spindeck - {}", app.route.title());
    let right = match app.session.identity() {
        Some(admin) => format!("{} ", admin.email),
        None => "not signed in ".to_string(),
    };
    let title_len = title.chars().count();

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title_len + right.chars().count() + 2),
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Login => render_login_background(frame, area),
        Route::Dashboard => dashboard::render(frame, app, area),
        Route::Calendar => calendar::render(frame, app, area),
        Route::Editor(_) => editor::render(frame, app, area),
        Route::PublicPlaylist(_) => public::render(frame, app, area),
    }
}

fn render_login_background(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Sign in to manage your playlists",
            styles::muted_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.route {
        Route::Login => "[Esc] quit",
        Route::Dashboard => "[c]alendar | [o]ut | [q]uit",
        Route::Calendar => "[Esc] back | [q]uit",
        Route::Editor(_) => "[Esc] back | [q]uit",
        Route::PublicPlaylist(_) => "[Esc] back | [q]uit",
    };

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => " Ready ".to_string(),
    };
    let right_text = format!(" {} ", shortcuts);

    let padding = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(48, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "        ┌─┐┌─┐┬┌┐┌┌┬┐┌─┐┌─┐┬┌─",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "        └─┐├─┘││││ ││├┤ │  ├┴┐",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "        └─┘┴  ┴┘└┘─┴┘└─┘└─┘┴ ┴",
            styles::title_style(),
        )),
        Line::from(""),
    ];

    let email_focused = app.login_focus == LoginFocus::Email;
    let email_style = if email_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if email_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Email:    [", styles::muted_style()),
        Span::styled(
            format!("{:<24}{}", tail(&app.login_email, 24), cursor),
            email_style,
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let masked: String = "*".repeat(app.login_password.chars().count().min(24));
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{:<24}{}", masked, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let button_focused = app.login_focus == LoginFocus::Button;
    lines.push(Line::from(""));
    let label = if button_focused {
        " ▶ Sign in ◀ "
    } else {
        "   Sign in   "
    };
    lines.push(Line::from(vec![
        Span::raw("              ["),
        Span::styled(
            label,
            if button_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_edit_overlay(frame: &mut Frame, app: &App) {
    let Some(ref form) = app.edit_form else {
        return;
    };

    let mut height = form.values.len() as u16 + 6;
    if form.error.is_some() {
        height += 2;
    }
    let area = centered_rect_fixed(56, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(form.heading, styles::title_style())),
        Line::from(""),
    ];

    for (i, (label, value)) in form.labels.iter().zip(form.values.iter()).enumerate() {
        let focused = form.focus == i;
        let field_style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<12}[", format!("{}:", label)), styles::muted_style()),
            Span::styled(format!("{:<32}{}", tail(value, 32), cursor), field_style),
            Span::styled("]", styles::muted_style()),
        ]));
    }

    let button_focused = form.save_focused();
    let label = if button_focused {
        " ▶ Save ◀ "
    } else {
        "   Save   "
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("                   ["),
        Span::styled(
            label,
            if button_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::raw("]"),
    ]));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(48, 8, frame.area());

    frame.render_widget(Clear, area);

    let name = app
        .selected_playlist()
        .map(|p| p.title.clone())
        .or_else(|| app.editor_playlist.as_ref().map(|p| p.title.clone()))
        .unwrap_or_else(|| "this playlist".to_string());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   Delete \"{}\"?", tail(&name, 36)),
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to delete, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Last `max` characters of an input, so long values scroll in the field.
fn tail(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else {
        s.chars().skip(count - max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_end_of_long_input() {
        assert_eq!(tail("short", 10), "short");
        assert_eq!(tail("abcdefghij", 4), "ghij");
    }

    #[test]
    fn test_centered_rect_clamps_to_frame() {
        let r = centered_rect_fixed(100, 50, Rect::new(0, 0, 40, 20));
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 20);
    }
}
