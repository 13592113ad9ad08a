use chute_core::TransferStatus;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

const PROMPT: &str = "Drop a file here to share it";

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Status
            Constraint::Length(3), // Footer/Help
        ])
        .split(f.area());

    // Title
    let title = Paragraph::new("Chute - Drop to Share")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    // The one user-facing surface: prompt, progress, result or error.
    let (text, style) = status_line(app.status());
    let status = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    f.render_widget(status, chunks[1]);

    // Footer with navigation help
    let footer = Paragraph::new("Q: Quit")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);
}

/// Pure mapping from status to displayed text and styling.
fn status_line(status: &TransferStatus) -> (String, Style) {
    match status {
        TransferStatus::Idle => {
            (PROMPT.to_string(), Style::default().fg(Color::Gray))
        }
        TransferStatus::InFlight => (
            "Sending file...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        TransferStatus::Done(message) => (
            message.clone(),
            Style::default().fg(Color::Green),
        ),
        TransferStatus::Failed(message) => (
            message.clone(),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
    }
}
