use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::constants::DIALOGUE_PANEL_HEIGHT;
use crate::dialogue::DialogueSurface;
use crate::dialogue::DialoguePhase;
use crate::tui::app::App;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    // Create main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(
            [
                Constraint::Length(3),                     // Header
                Constraint::Min(10),                       // Roster
                Constraint::Length(DIALOGUE_PANEL_HEIGHT), // Dialogue box
                Constraint::Length(1),                     // Status bar
            ]
            .as_ref(),
        )
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_roster(frame, chunks[1], app);
    render_dialogue(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            "Agora",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | philosophers: "),
        Span::styled(
            app.roster().len().to_string(),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" | session: "),
        Span::styled(&app.session_label, Style::default().fg(Color::Gray)),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Render the roster of philosophers
fn render_roster(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .roster()
        .iter()
        .enumerate()
        .map(|(idx, philosopher)| {
            let selected = idx == app.selected;
            let marker = if selected { "> " } else { "  " };
            let name_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(philosopher.display_name.clone(), name_style),
            ];
            if philosopher.canonical_reply.is_some() {
                spans.push(Span::styled(
                    " (busy)",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" The Agora ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

/// Render the dialogue box under the roster
fn render_dialogue(frame: &mut Frame, area: Rect, app: &App) {
    let surface = app.surface.lock();

    let title = match app.controller.active_philosopher() {
        Some(philosopher) => format!(" {} ", philosopher.display_name),
        None => " Dialogue ".to_string(),
    };

    let (text, text_style) = if surface.is_visible() {
        (
            surface.text().to_string(),
            Style::default().fg(Color::White),
        )
    } else {
        (
            format!(
                "Walk up and press Enter to talk to {}",
                app.selected_philosopher().display_name
            ),
            Style::default().fg(Color::DarkGray),
        )
    };

    let border_color = if app.controller.is_open() {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let dialogue = Paragraph::new(text)
        .style(text_style)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(dialogue, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (mode_str, mode_color, hint) = match app.controller.phase() {
        DialoguePhase::Closed => (
            "AGORA",
            Color::Green,
            "↑/↓ walk • Enter talk • r reset memory • q quit",
        ),
        DialoguePhase::Composing => (
            "TALK",
            Color::Cyan,
            "Type your message • Enter send • Esc step back",
        ),
        DialoguePhase::Submitting => ("WAIT", Color::Yellow, "Waiting for a reply..."),
        DialoguePhase::Streaming => ("REPLY", Color::Yellow, "Space to skip"),
    };

    let status_text = match &app.status_message {
        Some(status) => status.clone(),
        None => hint.to_string(),
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", mode_str),
            Style::default()
                .bg(mode_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(status_text),
        Span::raw(" | "),
        Span::styled(
            format!("session: {}", app.session_label),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let status_bar = Paragraph::new(vec![Line::from(spans)])
        .style(Style::default().bg(Color::Black))
        .block(Block::default());

    frame.render_widget(status_bar, area);
}
