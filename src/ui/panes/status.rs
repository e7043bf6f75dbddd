//! Status bar rendering with keybindings and sequence indicators

use crate::playground::{Status, StatusKind};
use crate::sequence::RunnerState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the status bar shows
pub struct StatusRenderData<'a> {
    pub status: &'a Status,
    pub state: RunnerState,
    /// Steps run so far and batch length
    pub progress: (usize, usize),
    pub speed: u32,
}

fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Info => DEFAULT_THEME.fg,
        StatusKind::Success => DEFAULT_THEME.success,
        StatusKind::Error => DEFAULT_THEME.error,
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: step counter and status message
    let (done, total) = data.progress;
    let step_text = match data.state {
        RunnerState::Idle => " Idle ".to_string(),
        _ => format!(" Step {done}/{total} "),
    };
    let badge_bg = if data.status.kind == StatusKind::Error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.primary
    };

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.status.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(status_color(data.status.kind)),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" ←/→ ", key_style),
        Span::styled(" structure ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(format!(" speed {}% ", data.speed), desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" p ", key_style),
        Span::styled(" pause ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let badge = match data.state {
        RunnerState::Running => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        RunnerState::Paused => Some((" ⏸ PAUSED ", DEFAULT_THEME.border_focused)),
        RunnerState::Completed => Some((" DONE ", DEFAULT_THEME.success)),
        RunnerState::Idle => None,
    };
    if let Some((label, bg)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
