//! Structure coordinator
//!
//! [`Playground`] turns user [`Command`]s into engine operations. A command
//! resolving to a single value mutates the current structure immediately and
//! renders once; anything with several values, and every search or traversal
//! animation, becomes a list of steps played by the [`SequenceRunner`].
//!
//! State is split in two so the runner can drive steps without aliasing:
//!
//! ```text
//! Playground
//! ├── Workspace       engines (one per kind), render options, status line
//! ├── SequenceRunner  queued steps over &mut Workspace
//! └── store           saved visualizations
//! ```
//!
//! The coordinator owns no clock. Callers pass `now` into
//! [`Playground::execute`] and [`Playground::tick`].

pub mod command;
pub mod errors;
pub mod input;
pub mod render;
pub mod steps;
pub mod workspace;

pub use command::Command;
pub use errors::PlaygroundError;
pub use render::{Frame, RenderData, RenderOptions};
pub use workspace::{Status, StatusKind, Workspace};

use crate::config::{DEFAULT_SPEED, DEFAULT_STORE_CAPACITY};
use crate::sequence::{RunnerState, SequenceRunner, Tick};
use crate::snapshot::{MemoryStore, NewVisualization, SavedVisualization, StoreError, VisualizationStore};
use crate::structures::bst::TraversalOrder;
use crate::structures::payload::{normalize_payload, HeapMode};
use crate::structures::{AnyStructure, LinearSearch, Structure, StructureInfo, StructureKind};
use input::{parse_numeric_tokens, parse_optional_index};
use std::time::Instant;
use steps::{
    empty, insert_steps, insert_value, linear_visit_steps, render_step, status_step, to_index,
    value_visit_steps, Placement, PlaygroundStep,
};

pub const READY_MESSAGE: &str = "Playground ready. Select a structure and start inserting values.";

pub struct Playground {
    workspace: Workspace,
    runner: SequenceRunner<Workspace, PlaygroundError>,
    store: Box<dyn VisualizationStore>,
}

impl Playground {
    pub fn new(kind: StructureKind, speed: u32, store: Box<dyn VisualizationStore>) -> Self {
        let mut workspace = Workspace::new(kind);
        workspace.info(READY_MESSAGE);
        Playground {
            workspace,
            runner: SequenceRunner::new(speed),
            store,
        }
    }

    /// Default speed and a session-only store
    pub fn in_memory(kind: StructureKind) -> Self {
        Self::new(
            kind,
            DEFAULT_SPEED,
            Box::new(MemoryStore::new(DEFAULT_STORE_CAPACITY)),
        )
    }

    pub fn current_kind(&self) -> StructureKind {
        self.workspace.current()
    }

    pub fn structure(&self, kind: StructureKind) -> Option<&AnyStructure> {
        self.workspace.structure(kind)
    }

    pub fn info(&self) -> &'static StructureInfo {
        self.current_kind().info()
    }

    pub fn frame(&self) -> Frame {
        self.workspace.frame()
    }

    pub fn status(&self) -> &Status {
        self.workspace.status()
    }

    pub fn runner_state(&self) -> RunnerState {
        self.runner.state()
    }

    pub fn speed(&self) -> u32 {
        self.runner.speed()
    }

    /// Steps run so far and the batch length
    pub fn progress(&self) -> (usize, usize) {
        (self.runner.cursor(), self.runner.len())
    }

    /// When the runner next needs a [`Playground::tick`]
    pub fn deadline(&self) -> Option<Instant> {
        self.runner.deadline()
    }

    pub fn saved(&self) -> Result<Vec<SavedVisualization>, StoreError> {
        self.store.list()
    }

    /// Run a command; failures are also written to the status line
    pub fn execute(&mut self, command: Command, now: Instant) -> Result<(), PlaygroundError> {
        let result = self.dispatch(command, now);
        if let Err(err) = &result {
            self.workspace.error(err.to_string());
        }
        result
    }

    /// Advance the running sequence, if anything is due
    pub fn tick(&mut self, now: Instant) -> Result<(), PlaygroundError> {
        let tick = self.runner.tick(&mut self.workspace, now);
        let result = self.absorb(tick);
        if let Err(err) = &result {
            self.workspace.error(err.to_string());
        }
        result
    }

    fn dispatch(&mut self, command: Command, now: Instant) -> Result<(), PlaygroundError> {
        match command {
            Command::Insert { input, index } => self.insert(&input, &index, now),
            Command::Remove { input, index } => self.remove(&input, &index),
            Command::Clear => self.clear(),
            Command::Peek => self.peek(),
            Command::PeekFront => self.peek_queue(true),
            Command::PeekRear => self.peek_queue(false),
            Command::Search { input } => self.search(&input, now),
            Command::Prepend { input } => self.prepend(&input, now),
            Command::InsertAt { input, index } => self.insert_at(&input, &index, now),
            Command::DeleteByValue { input } => self.delete_by_value(&input, now),
            Command::DeleteAt { index } => self.delete_at(&index),
            Command::Traverse { order } => self.traverse(order, now),
            Command::SetHeapMode { mode } => self.set_heap_mode(mode),
            Command::ToggleAutoplay => self.toggle_autoplay(now),
            Command::SetSpeed { percent } => {
                self.set_speed(percent);
                Ok(())
            }
            Command::Select { kind } => {
                self.select(kind);
                Ok(())
            }
            Command::Save { name } => self.save(&name).map(|_| ()),
            Command::LoadSaved { id } => self.load_saved(id),
            Command::DeleteSaved { id } => self.delete_saved(id),
        }
    }

    fn start(
        &mut self,
        steps: Vec<PlaygroundStep>,
        completion: Option<String>,
        now: Instant,
    ) -> Result<(), PlaygroundError> {
        let tick = self.runner.start(steps, completion, &mut self.workspace, now);
        self.absorb(tick)
    }

    fn absorb(&mut self, tick: Tick<PlaygroundError>) -> Result<(), PlaygroundError> {
        match tick {
            Tick::Completed { message } => {
                self.workspace.render(RenderOptions::default());
                if let Some(message) = message {
                    self.workspace.success(message);
                }
                Ok(())
            }
            Tick::Aborted { index, error } => Err(PlaygroundError::SequenceAborted {
                step: index,
                source: Box::new(error),
            }),
            Tick::Idle | Tick::Waiting | Tick::Stepped { .. } => Ok(()),
        }
    }

    /// Error for a command the current structure does not offer
    fn unsupported(&self, action: &'static str) -> PlaygroundError {
        PlaygroundError::UnsupportedAction {
            action,
            kind: self.current_kind().label(),
        }
    }

    fn require(&self, kind: StructureKind, action: &'static str) -> Result<(), PlaygroundError> {
        if self.current_kind() == kind {
            Ok(())
        } else {
            Err(self.unsupported(action))
        }
    }

    fn insert(&mut self, input: &str, index: &str, now: Instant) -> Result<(), PlaygroundError> {
        let values = parse_numeric_tokens(input)?;
        let index = parse_optional_index(index)?;

        if let &[value] = values.as_slice() {
            self.runner.cancel();
            return insert_value(&mut self.workspace, value, index, Placement::End);
        }

        let mut steps: Vec<PlaygroundStep> = Vec::new();
        match self.current_kind() {
            StructureKind::Array => steps.push(Box::new(|ws: &mut Workspace| -> Result<(), PlaygroundError> {
                ws.current_mut().clear();
                ws.render(RenderOptions::default());
                ws.info("Array reset for batch insert.");
                Ok(())
            })),
            StructureKind::Bst => steps.push(status_step(Status::new(
                StatusKind::Info,
                "Inserting values into the tree...",
            ))),
            _ => {}
        }
        steps.extend(insert_steps(&values, index, Placement::End));
        self.start(steps, None, now)
    }

    fn remove(&mut self, input: &str, index: &str) -> Result<(), PlaygroundError> {
        self.runner.cancel();
        self.workspace.render(RenderOptions::default());

        let (options, message) = match self.workspace.current_mut() {
            AnyStructure::Stack(stack) => {
                let value = stack.pop().ok_or(empty("Stack"))?;
                (RenderOptions::default(), format!("Popped \"{value}\"."))
            }
            AnyStructure::Queue(queue) => {
                let value = queue.dequeue().ok_or(empty("Queue"))?;
                (RenderOptions::highlight_index(0), format!("Dequeued \"{value}\"."))
            }
            AnyStructure::Array(array) => {
                let index = parse_optional_index(index)?;
                if array.is_empty() {
                    return Err(empty("Array").into());
                }
                let target = match index {
                    Some(i) => to_index(i, array.len())?,
                    None => array.len() - 1,
                };
                let removal = array.delete_at(target)?;
                (
                    RenderOptions::highlight_index(removal.index),
                    format!("Deleted \"{}\" at index {}.", removal.value, removal.index),
                )
            }
            AnyStructure::LinkedList(list) => {
                let value = list.remove_head().ok_or(empty("List"))?;
                (RenderOptions::highlight_index(0), format!("Removed head \"{value}\"."))
            }
            AnyStructure::Bst(tree) => {
                if input.trim().is_empty() {
                    return Err(PlaygroundError::MissingValue);
                }
                let value = first_value(input)?;
                tree.delete(value).result?;
                (RenderOptions::default(), format!("Deleted \"{value}\"."))
            }
            AnyStructure::Heap(heap) => {
                let value = heap.extract().value.ok_or(empty("Heap"))?;
                (RenderOptions::highlight_index(0), format!("Extracted \"{value}\"."))
            }
        };

        self.workspace.show(options, message);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PlaygroundError> {
        self.runner.cancel();
        self.workspace.current_mut().clear();
        self.workspace.show(RenderOptions::default(), "Structure cleared.");
        Ok(())
    }

    fn peek(&mut self) -> Result<(), PlaygroundError> {
        let unsupported = self.unsupported("Peek");
        let (options, message) = match self.workspace.current_mut() {
            AnyStructure::Stack(stack) => {
                let value = stack.peek().ok_or(empty("Stack"))?;
                (RenderOptions::default(), format!("Top value is \"{value}\"."))
            }
            AnyStructure::Heap(heap) => {
                let value = heap.peek().ok_or(empty("Heap"))?;
                (RenderOptions::highlight_index(0), format!("Root value is \"{value}\"."))
            }
            _ => return Err(unsupported),
        };
        self.runner.cancel();
        self.workspace.show(options, message);
        Ok(())
    }

    fn peek_queue(&mut self, front: bool) -> Result<(), PlaygroundError> {
        let action = if front { "Peek front" } else { "Peek rear" };
        let unsupported = self.unsupported(action);
        let AnyStructure::Queue(queue) = self.workspace.current_mut() else {
            return Err(unsupported);
        };

        let (value, index, label) = if front {
            (queue.peek_front(), 0, "Front")
        } else {
            (queue.peek_rear(), queue.len().saturating_sub(1), "Rear")
        };
        let value = value.ok_or(empty("Queue"))?;

        self.runner.cancel();
        self.workspace.show(
            RenderOptions::highlight_index(index),
            format!("{label} value is \"{value}\"."),
        );
        Ok(())
    }

    fn search(&mut self, input: &str, now: Instant) -> Result<(), PlaygroundError> {
        let unsupported = self.unsupported("Search");
        let needle = first_value(input)?;

        let (steps, status) = match self.workspace.current_mut() {
            AnyStructure::Array(array) => linear_search(array.search(needle), needle),
            AnyStructure::LinkedList(list) => linear_search(list.search(needle), needle),
            AnyStructure::Bst(tree) => {
                let search = tree.search(needle);
                let found = search.found.then_some(needle);
                let status = if search.found {
                    Status::new(StatusKind::Success, format!("Found \"{needle}\"."))
                } else {
                    Status::new(StatusKind::Info, format!("Value \"{needle}\" not found."))
                };
                (value_visit_steps(&search.path, found), status)
            }
            _ => return Err(unsupported),
        };

        self.start(steps, None, now)?;
        self.workspace.report(status);
        Ok(())
    }

    fn prepend(&mut self, input: &str, now: Instant) -> Result<(), PlaygroundError> {
        self.require(StructureKind::LinkedList, "Prepend")?;
        let values = parse_numeric_tokens(input)?;
        self.start(insert_steps(&values, None, Placement::Front), None, now)
    }

    fn insert_at(&mut self, input: &str, index: &str, now: Instant) -> Result<(), PlaygroundError> {
        self.require(StructureKind::LinkedList, "Insert at index")?;
        let values = parse_numeric_tokens(input)?;
        let index = parse_optional_index(index)?.ok_or(PlaygroundError::IndexRequired {
            action: "insert at index",
        })?;
        self.start(insert_steps(&values, Some(index), Placement::At), None, now)
    }

    fn delete_by_value(&mut self, input: &str, now: Instant) -> Result<(), PlaygroundError> {
        let unsupported = self.unsupported("Delete by value");
        let value = first_value(input)?;
        let AnyStructure::LinkedList(list) = self.workspace.current_mut() else {
            return Err(unsupported);
        };
        let deletion = list.delete_by_value(value);

        match deletion.result {
            Ok(_) => {
                let mut steps: Vec<PlaygroundStep> = deletion
                    .visited
                    .iter()
                    .map(|&index| {
                        render_step(RenderOptions::highlight_index(index).preserving_scroll())
                    })
                    .collect();
                steps.push(Box::new(move |ws: &mut Workspace| -> Result<(), PlaygroundError> {
                    ws.show(RenderOptions::default(), format!("Deleted \"{value}\"."));
                    Ok(())
                }));
                self.start(steps, None, now)
            }
            Err(err) => {
                self.start(linear_visit_steps(&deletion.visited, None), None, now)?;
                Err(err.into())
            }
        }
    }

    fn delete_at(&mut self, index: &str) -> Result<(), PlaygroundError> {
        let unsupported = self.unsupported("Delete at index");
        let index = parse_optional_index(index)?.ok_or(PlaygroundError::IndexRequired {
            action: "delete at index",
        })?;
        self.runner.cancel();

        let AnyStructure::LinkedList(list) = self.workspace.current_mut() else {
            return Err(unsupported);
        };
        let removal = list.remove_at(to_index(index, list.len())?)?;
        self.workspace.show(
            RenderOptions::highlight_index(removal.index),
            format!("Deleted \"{}\" at index {}.", removal.value, removal.index),
        );
        Ok(())
    }

    fn traverse(&mut self, order: TraversalOrder, now: Instant) -> Result<(), PlaygroundError> {
        let unsupported = self.unsupported("Traversal");
        let AnyStructure::Bst(tree) = self.workspace.current_mut() else {
            return Err(unsupported);
        };
        let values = tree.traverse(order);
        if values.is_empty() {
            return Err(empty("Tree").into());
        }

        let listed: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let summary = format!("{order}-order traversal result: [{}].", listed.join(", "));

        let mut steps: Vec<PlaygroundStep> = values
            .iter()
            .map(|&value| render_step(RenderOptions::highlight_value(value)))
            .collect();
        let last = summary.clone();
        steps.push(Box::new(move |ws: &mut Workspace| -> Result<(), PlaygroundError> {
            ws.show(RenderOptions::default().preserving_scroll(), last.clone());
            Ok(())
        }));

        self.start(steps, Some(summary), now)?;
        self.workspace.success(format!("Traversal started ({order})."));
        Ok(())
    }

    fn set_heap_mode(&mut self, mode: HeapMode) -> Result<(), PlaygroundError> {
        let unsupported = self.unsupported("Heap mode");
        let AnyStructure::Heap(heap) = self.workspace.current_mut() else {
            return Err(unsupported);
        };
        heap.set_mode(mode);
        self.runner.cancel();
        self.workspace
            .show(RenderOptions::default(), format!("Heap mode set to {mode}."));
        Ok(())
    }

    fn toggle_autoplay(&mut self, now: Instant) -> Result<(), PlaygroundError> {
        match self.runner.state() {
            RunnerState::Running => {
                self.runner.pause();
                self.workspace.info("Auto-play paused.");
                Ok(())
            }
            RunnerState::Paused => {
                self.workspace.success("Auto-play resumed.");
                match self.runner.resume(&mut self.workspace, now) {
                    Some(tick) => self.absorb(tick),
                    None => Ok(()),
                }
            }
            RunnerState::Idle | RunnerState::Completed => {
                self.workspace.info("No sequence is queued yet.");
                Ok(())
            }
        }
    }

    /// Store the speed; only reported while a sequence is playing
    fn set_speed(&mut self, percent: u32) {
        let speed = self.runner.set_speed(percent);
        if self.runner.state() == RunnerState::Running {
            self.workspace
                .info(format!("Animation speed set to {speed}%."));
        }
    }

    /// Switch structures, keeping every engine's contents
    pub fn select(&mut self, kind: StructureKind) {
        self.apply_context(kind);
        self.workspace.success(format!("{} ready.", kind.label()));
    }

    fn apply_context(&mut self, kind: StructureKind) {
        self.runner.cancel();
        self.workspace.set_current(kind);
        self.workspace.render(RenderOptions::default());
    }

    fn save(&mut self, name: &str) -> Result<SavedVisualization, PlaygroundError> {
        let kind = self.current_kind();
        let structure = self.workspace.current_mut();
        if structure.is_empty() {
            return Err(PlaygroundError::NothingToSave);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(PlaygroundError::MissingName);
        }

        let payload = structure.serialize().to_json();
        let record = self.store.create(NewVisualization {
            name: name.to_string(),
            kind,
            payload,
        })?;
        self.workspace.success(format!("Saved \"{}\".", record.name));
        Ok(record)
    }

    fn load_saved(&mut self, id: u64) -> Result<(), PlaygroundError> {
        let record = self.store.get(id)?;
        let payload = normalize_payload(&record.payload).ok_or(PlaygroundError::LoadRejected)?;

        self.runner.cancel();
        if !self.workspace.structure_mut(record.kind).load(&payload) {
            return Err(PlaygroundError::LoadRejected);
        }
        self.apply_context(record.kind);
        self.workspace.success(format!("Loaded \"{}\".", record.name));
        Ok(())
    }

    fn delete_saved(&mut self, id: u64) -> Result<(), PlaygroundError> {
        let record = self.store.get(id)?;
        self.store.delete(id)?;
        self.workspace.success(format!("Deleted \"{}\".", record.name));
        Ok(())
    }
}

fn first_value(input: &str) -> Result<f64, PlaygroundError> {
    parse_numeric_tokens(input)?
        .first()
        .copied()
        .ok_or(PlaygroundError::EmptyInput)
}

fn linear_search(search: LinearSearch, needle: f64) -> (Vec<PlaygroundStep>, Status) {
    let status = match search.found {
        Some(index) => Status::new(
            StatusKind::Success,
            format!("Found \"{needle}\" at index {index}."),
        ),
        None => Status::new(StatusKind::Info, format!("Value \"{needle}\" not found.")),
    };
    (linear_visit_steps(&search.visited, search.found), status)
}
