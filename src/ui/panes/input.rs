//! Input bar with the value, index and save-name fields

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Text field receiving typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Value,
    Index,
    /// Save prompt; other keys are suspended while it is open
    SaveName,
}

impl InputField {
    /// Tab cycles between the value and index fields only
    pub fn next(self) -> Self {
        match self {
            InputField::Value => InputField::Index,
            InputField::Index => InputField::Value,
            InputField::SaveName => InputField::SaveName,
        }
    }
}

pub struct InputRenderData<'a> {
    pub value: &'a str,
    pub index: &'a str,
    pub name: &'a str,
    pub focused: InputField,
    /// Label for the index field, depends on the structure
    pub index_label: &'a str,
}

fn field<'a>(title: &'a str, text: &'a str, focused: bool) -> Paragraph<'a> {
    let border_style = if focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let mut spans = vec![Span::styled(text, Style::default().fg(DEFAULT_THEME.fg))];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(DEFAULT_THEME.border_focused)));
    }
    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(border_style),
    )
}

pub fn render_input_bar(frame: &mut Frame, area: Rect, data: InputRenderData) {
    if data.focused == InputField::SaveName {
        frame.render_widget(
            field("Save as (Enter to save, Esc to cancel)", data.name, true),
            area,
        );
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    frame.render_widget(
        field("Values: 7 or [7,3,2]", data.value, data.focused == InputField::Value),
        columns[0],
    );
    frame.render_widget(
        field(data.index_label, data.index, data.focused == InputField::Index),
        columns[1],
    );
}
