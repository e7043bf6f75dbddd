// Single operations and the step lists built from them

use super::errors::PlaygroundError;
use super::render::RenderOptions;
use super::workspace::{Status, Workspace};
use crate::sequence::Step;
use crate::structures::errors::StructureError;
use crate::structures::{AnyStructure, Structure};

pub type PlaygroundStep = Step<Workspace, PlaygroundError>;

/// Where a linked-list insert puts the value; other structures ignore it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    End,
    Front,
    At,
}

/// Convert a user index, rejecting negatives
pub fn to_index(index: i64, len: usize) -> Result<usize, StructureError> {
    usize::try_from(index).map_err(|_| StructureError::InvalidIndex { index, len })
}

pub fn empty(kind: &'static str) -> StructureError {
    StructureError::EmptyStructure { kind }
}

/// Insert one value into the current structure, then render and report it
pub fn insert_value(
    ws: &mut Workspace,
    value: f64,
    index: Option<i64>,
    placement: Placement,
) -> Result<(), PlaygroundError> {
    let (options, message) = match ws.current_mut() {
        AnyStructure::Array(array) => {
            let target = index.map(|i| to_index(i, array.len())).transpose()?;
            let at = array.insert(value, target)?;
            (RenderOptions::highlight_index(at), format!("Inserted \"{value}\"."))
        }
        AnyStructure::Stack(stack) => {
            stack.push(value);
            (RenderOptions::default(), format!("Pushed \"{value}\"."))
        }
        AnyStructure::Queue(queue) => {
            queue.enqueue(value);
            let rear = queue.len() - 1;
            (RenderOptions::highlight_index(rear), format!("Enqueued \"{value}\"."))
        }
        AnyStructure::LinkedList(list) => match placement {
            Placement::Front => {
                list.prepend(value);
                (RenderOptions::highlight_index(0), format!("Prepended \"{value}\"."))
            }
            Placement::At => {
                let index = index.ok_or(PlaygroundError::IndexRequired {
                    action: "insert at index",
                })?;
                let at = list.insert_at(to_index(index, list.len())?, value)?;
                (
                    RenderOptions::highlight_index(at),
                    format!("Inserted \"{value}\" at index {at}."),
                )
            }
            Placement::End => {
                list.append(value);
                let tail = list.len() - 1;
                (RenderOptions::highlight_index(tail), format!("Appended \"{value}\"."))
            }
        },
        AnyStructure::Bst(tree) => {
            tree.insert(value).result?;
            (RenderOptions::highlight_value(value), format!("Inserted \"{value}\"."))
        }
        AnyStructure::Heap(heap) => {
            let outcome = heap.insert(value);
            (RenderOptions::highlight_index(outcome.index), format!("Inserted \"{value}\"."))
        }
    };

    ws.show(options, message);
    Ok(())
}

/// One insert step per value; with an index the k-th value goes to `index + k`
pub fn insert_steps(values: &[f64], index: Option<i64>, placement: Placement) -> Vec<PlaygroundStep> {
    values
        .iter()
        .enumerate()
        .map(|(offset, &value)| {
            // i64::MAX is out of range for every structure
            let target = index.map(|i| i.saturating_add(offset as i64));
            Box::new(move |ws: &mut Workspace| -> Result<(), PlaygroundError> {
                insert_value(ws, value, target, placement)
            }) as PlaygroundStep
        })
        .collect()
}

pub fn status_step(status: Status) -> PlaygroundStep {
    Box::new(move |ws: &mut Workspace| -> Result<(), PlaygroundError> {
        ws.report(status.clone());
        Ok(())
    })
}

/// Highlight each visited index, then mark the match (if any)
pub fn linear_visit_steps(visited: &[usize], found: Option<usize>) -> Vec<PlaygroundStep> {
    let mut steps: Vec<PlaygroundStep> = visited
        .iter()
        .map(|&index| render_step(RenderOptions::highlight_index(index).preserving_scroll()))
        .collect();

    let last = found.map_or_else(RenderOptions::default, RenderOptions::found_at);
    steps.push(render_step(last.preserving_scroll()));
    steps
}

/// Highlight each value on a descent path, then mark the match (if any)
pub fn value_visit_steps(path: &[f64], found: Option<f64>) -> Vec<PlaygroundStep> {
    let mut steps: Vec<PlaygroundStep> = path
        .iter()
        .map(|&value| render_step(RenderOptions::highlight_value(value).preserving_scroll()))
        .collect();

    let last = found.map_or_else(RenderOptions::default, RenderOptions::found);
    steps.push(render_step(last.preserving_scroll()));
    steps
}

pub fn render_step(options: RenderOptions) -> PlaygroundStep {
    Box::new(move |ws: &mut Workspace| -> Result<(), PlaygroundError> {
        ws.render(options.clone());
        Ok(())
    })
}
