//! Info pane: description, operations and complexities of the current structure

use crate::structures::StructureInfo;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Keys shown under the structure description
pub const KEY_HELP: &[(&str, &str)] = &[
    ("←/→", "structure"),
    ("↑/↓", "speed"),
    ("Tab", "value/index field"),
    ("Enter / i", "insert"),
    ("x", "remove"),
    ("c", "clear"),
    ("s", "search"),
    ("k / f / r", "peek / front / rear"),
    ("a / n", "prepend / insert at"),
    ("v / z", "delete value / at"),
    ("y t u l", "pre in post level"),
    ("m", "heap min/max"),
    ("p", "pause / resume"),
    ("< / >", "scroll"),
    ("w", "save"),
    ("PgUp/PgDn g Del", "saved"),
    ("q", "quit"),
];

pub fn render_info_pane(frame: &mut Frame, area: Rect, label: &str, info: &StructureInfo) {
    let block = Block::default()
        .title(format!(" About: {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let heading = Style::default()
        .fg(DEFAULT_THEME.primary)
        .add_modifier(Modifier::BOLD);
    let bullet = Style::default().fg(DEFAULT_THEME.comment);
    let text = Style::default().fg(DEFAULT_THEME.fg);

    let mut lines = vec![Line::styled(info.description, text), Line::from("")];

    lines.push(Line::styled("Operations", heading));
    for op in info.operations {
        lines.push(Line::from(vec![Span::styled("• ", bullet), Span::styled(*op, text)]));
    }
    lines.push(Line::from(""));

    lines.push(Line::styled("Complexity", heading));
    for cost in info.complexities {
        lines.push(Line::from(vec![Span::styled("• ", bullet), Span::styled(*cost, text)]));
    }
    lines.push(Line::from(""));

    lines.push(Line::styled("Keys", heading));
    for (key, action) in KEY_HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("{key:>16} "), Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(*action, text),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
