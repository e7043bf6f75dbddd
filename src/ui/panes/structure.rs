//! Structure pane: draws the current [`Frame`]
//!
//! Linear structures are drawn as a row of cells (the stack as a column, top
//! first). The BST and the binary heap are drawn as trees, one text row per
//! depth, with each node placed at its in-order column so children sit to the
//! left and right of their parent.

use crate::playground::{Frame as StructureFrame, RenderData, RenderOptions};
use crate::structures::heap::{left, right};
use crate::structures::payload::TreeShape;
use crate::structures::tree;
use crate::structures::StructureKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Horizontal scroll of the structure pane
pub struct StructureScrollState {
    pub offset: usize,
    /// Frame serial seen on the previous draw
    pub last_serial: u64,
}

/// A tree node placed on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub depth: usize,
    pub column: usize,
    pub value: f64,
    /// Array position for heap nodes
    pub index: Option<usize>,
}

pub fn format_value(value: f64) -> String {
    value.to_string()
}

fn cell_style(options: &RenderOptions, index: Option<usize>, value: f64) -> Style {
    let found = index.is_some_and(|i| options.is_found_index(i)) || options.is_found_value(value);
    let highlighted =
        index.is_some_and(|i| options.is_highlighted_index(i)) || options.is_highlighted_value(value);

    if found {
        Style::default()
            .bg(DEFAULT_THEME.found)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if highlighted {
        Style::default()
            .bg(DEFAULT_THEME.highlight)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.number)
    }
}

/// Render the structure pane
pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    data: &StructureFrame,
    is_focused: bool,
    scroll_state: &mut StructureScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = match data.heap_mode {
        Some(mode) => format!(" {} ({mode}-heap) ", data.kind.label()),
        None => format!(" {} ", data.kind.label()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.serial != scroll_state.last_serial {
        if !data.options.preserve_scroll {
            scroll_state.offset = 0;
        }
        scroll_state.last_serial = data.serial;
    }

    if data.data.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = match (&data.data, data.kind) {
        (RenderData::Tree(Some(root)), _) => tree_lines(&place_bst(root), &data.options),
        (RenderData::Tree(None), _) => Vec::new(),
        (RenderData::Sequence(values), StructureKind::BinaryHeap) => {
            let mut lines = tree_lines(&place_heap(values), &data.options);
            lines.push(Line::from(""));
            lines.push(cell_row(values, &data.options));
            lines.push(index_row(values));
            lines
        }
        (RenderData::Sequence(values), StructureKind::Stack) => stack_lines(values, &data.options),
        (RenderData::Sequence(values), StructureKind::LinkedList) => {
            vec![chain_line(values, &data.options), index_row_chain(values)]
        }
        (RenderData::Sequence(values), StructureKind::Queue) => vec![
            cell_row(values, &data.options),
            index_row(values),
            end_markers(values, "front", "rear"),
        ],
        (RenderData::Sequence(values), _) => {
            vec![cell_row(values, &data.options), index_row(values)]
        }
    };

    let widest = lines.iter().map(Line::width).max().unwrap_or(0);
    let visible = area.width.saturating_sub(2) as usize;
    let max_offset = widest.saturating_sub(visible);
    scroll_state.offset = scroll_state.offset.min(max_offset);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((0, u16::try_from(scroll_state.offset).unwrap_or(u16::MAX)));
    frame.render_widget(paragraph, area);
}

fn cell_width(values: &[f64]) -> usize {
    values.iter().map(|v| format_value(*v).len()).max().unwrap_or(1) + 2
}

fn cell_row(values: &[f64], options: &RenderOptions) -> Line<'static> {
    let width = cell_width(values);
    let mut spans = Vec::new();
    for (i, &value) in values.iter().enumerate() {
        spans.push(Span::styled(
            format!("{:^width$}", format_value(value)),
            cell_style(options, Some(i), value),
        ));
        spans.push(Span::styled("│", Style::default().fg(DEFAULT_THEME.border_normal)));
    }
    Line::from(spans)
}

fn index_row(values: &[f64]) -> Line<'static> {
    let width = cell_width(values);
    let text: String = (0..values.len())
        .map(|i| format!("{:^width$} ", i))
        .collect();
    Line::styled(text, Style::default().fg(DEFAULT_THEME.comment))
}

fn end_markers(values: &[f64], first: &str, last: &str) -> Line<'static> {
    let width = cell_width(values) + 1;
    let rear_column = width * values.len().saturating_sub(1);
    let mut text = format!("{first:<width$}");
    if values.len() > 1 {
        let pad = rear_column.saturating_sub(text.len());
        text.push_str(&" ".repeat(pad));
        text.push_str(last);
    }
    Line::styled(text, Style::default().fg(DEFAULT_THEME.link))
}

fn stack_lines(values: &[f64], options: &RenderOptions) -> Vec<Line<'static>> {
    let width = cell_width(values);
    values
        .iter()
        .enumerate()
        .rev()
        .map(|(i, &value)| {
            let mut spans = vec![Span::styled(
                format!("│{:^width$}│", format_value(value)),
                cell_style(options, Some(i), value),
            )];
            if i + 1 == values.len() {
                spans.push(Span::styled(" ← top", Style::default().fg(DEFAULT_THEME.link)));
            }
            Line::from(spans)
        })
        .collect()
}

fn chain_line(values: &[f64], options: &RenderOptions) -> Line<'static> {
    let width = cell_width(values);
    let arrow = Style::default().fg(DEFAULT_THEME.link);
    let mut spans = Vec::new();
    for (i, &value) in values.iter().enumerate() {
        spans.push(Span::styled(
            format!("{:^width$}", format_value(value)),
            cell_style(options, Some(i), value),
        ));
        spans.push(Span::styled(" → ", arrow));
    }
    spans.push(Span::styled("null", Style::default().fg(DEFAULT_THEME.comment)));
    Line::from(spans)
}

fn index_row_chain(values: &[f64]) -> Line<'static> {
    let width = cell_width(values);
    let text: String = (0..values.len())
        .map(|i| match i {
            0 => format!("{:^width$}   ", "head"),
            _ if i + 1 == values.len() => format!("{:^width$}   ", "tail"),
            _ => format!("{:^width$}   ", i),
        })
        .collect();
    Line::styled(text, Style::default().fg(DEFAULT_THEME.comment))
}

/// Place BST nodes by depth and in-order position
pub fn place_bst(root: &TreeShape) -> Vec<PlacedNode> {
    tree::in_order_depths(root)
        .into_iter()
        .enumerate()
        .map(|(column, (value, depth))| PlacedNode {
            depth,
            column,
            value,
            index: None,
        })
        .collect()
}

/// Place heap slots as a complete binary tree
pub fn place_heap(values: &[f64]) -> Vec<PlacedNode> {
    fn walk(values: &[f64], i: usize, depth: usize, next_column: &mut usize, out: &mut Vec<PlacedNode>) {
        if i >= values.len() {
            return;
        }
        walk(values, left(i), depth + 1, next_column, out);
        out.push(PlacedNode {
            depth,
            column: *next_column,
            value: values[i],
            index: Some(i),
        });
        *next_column += 1;
        walk(values, right(i), depth + 1, next_column, out);
    }

    let mut out = Vec::new();
    let mut next_column = 0;
    walk(values, 0, 0, &mut next_column, &mut out);
    out
}

fn tree_lines(nodes: &[PlacedNode], options: &RenderOptions) -> Vec<Line<'static>> {
    let values: Vec<f64> = nodes.iter().map(|n| n.value).collect();
    let width = cell_width(&values);
    let depth = nodes.iter().map(|n| n.depth).max().map_or(0, |d| d + 1);
    let mut rows: Vec<Vec<&PlacedNode>> = vec![Vec::new(); depth];
    for node in nodes {
        rows[node.depth].push(node);
    }

    rows.into_iter()
        .map(|mut row| {
            row.sort_by_key(|n| n.column);

            let mut spans = Vec::new();
            let mut cursor = 0;
            for node in row {
                let start = node.column * width;
                if start > cursor {
                    spans.push(Span::raw(" ".repeat(start - cursor)));
                }
                spans.push(Span::styled(
                    format!("{:^width$}", format_value(node.value)),
                    cell_style(options, node.index, node.value),
                ));
                cursor = start + width;
            }
            Line::from(spans)
        })
        .collect()
}
