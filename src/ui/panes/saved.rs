//! Saved visualizations pane

use crate::snapshot::SavedVisualization;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Listing result handed over by the app; `Err` carries the store message
pub type SavedListing<'a> = Result<&'a [SavedVisualization], &'a str>;

pub fn render_saved_pane(
    frame: &mut Frame,
    area: Rect,
    listing: SavedListing,
    selected: usize,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .title(" Saved ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let records = match listing {
        Ok(records) if records.is_empty() => {
            let paragraph = Paragraph::new("No saved visualizations yet.")
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment));
            frame.render_widget(paragraph, area);
            return;
        }
        Ok(records) => records,
        Err(message) => {
            let paragraph = Paragraph::new(message.to_string())
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.error));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    // Keep the selection visible
    let visible = area.height.saturating_sub(2).max(1) as usize;
    let skip = selected.saturating_sub(visible - 1);

    let items: Vec<ListItem> = records
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(i, record)| {
            let marker = if i == selected { "▶ " } else { "  " };
            let name_style = if i == selected {
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(record.name.clone(), name_style),
                Span::styled(
                    format!("  #{} {}", record.id, record.kind.key().to_uppercase()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
