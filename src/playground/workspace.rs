// Structure registry, render state and status line shared with sequence steps

use super::render::{Frame, RenderData, RenderOptions};
use crate::structures::{AnyStructure, Structure, StructureKind};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One-line message shown under the visualization
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Status {
            message: message.into(),
            kind,
        }
    }
}

/// Mutable state that sequence steps operate on
///
/// Engines are created lazily, one per kind, and live for the whole session,
/// so switching away from a structure and back keeps its contents.
#[derive(Debug)]
pub struct Workspace {
    structures: FxHashMap<StructureKind, AnyStructure>,
    current: StructureKind,
    options: RenderOptions,
    status: Status,
    serial: u64,
}

impl Workspace {
    pub fn new(kind: StructureKind) -> Self {
        let mut workspace = Workspace {
            structures: FxHashMap::default(),
            current: kind,
            options: RenderOptions::default(),
            status: Status::new(StatusKind::Info, ""),
            serial: 0,
        };
        workspace.structure_mut(kind);
        workspace
    }

    pub fn current(&self) -> StructureKind {
        self.current
    }

    pub fn set_current(&mut self, kind: StructureKind) {
        self.current = kind;
        self.structure_mut(kind);
    }

    pub fn structure(&self, kind: StructureKind) -> Option<&AnyStructure> {
        self.structures.get(&kind)
    }

    /// Engine for `kind`, created on first use
    pub fn structure_mut(&mut self, kind: StructureKind) -> &mut AnyStructure {
        self.structures.entry(kind).or_insert_with(|| kind.create())
    }

    pub fn current_mut(&mut self) -> &mut AnyStructure {
        let kind = self.current;
        self.structure_mut(kind)
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Request a redraw with new emphasis
    pub fn render(&mut self, options: RenderOptions) {
        self.options = options;
        self.serial += 1;
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn report(&mut self, status: Status) {
        self.status = status;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.report(Status::new(StatusKind::Info, message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.report(Status::new(StatusKind::Success, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.report(Status::new(StatusKind::Error, message));
    }

    /// Render and report a successful operation in one go
    pub fn show(&mut self, options: RenderOptions, message: impl Into<String>) {
        self.render(options);
        self.success(message);
    }

    pub fn frame(&self) -> Frame {
        let structure = self.structures.get(&self.current);
        let data = match structure {
            Some(AnyStructure::Bst(tree)) => RenderData::Tree(tree.to_shape()),
            Some(other) => RenderData::Sequence(other.to_vec()),
            None if self.current == StructureKind::Bst => RenderData::Tree(None),
            None => RenderData::Sequence(Vec::new()),
        };
        let heap_mode = match structure {
            Some(AnyStructure::Heap(heap)) => Some(heap.mode()),
            _ => None,
        };

        Frame {
            kind: self.current,
            data,
            options: self.options.clone(),
            heap_mode,
            serial: self.serial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::payload::HeapMode;

    #[test]
    fn test_engines_survive_switching() {
        let mut workspace = Workspace::new(StructureKind::Stack);
        if let AnyStructure::Stack(stack) = workspace.current_mut() {
            stack.push(4.0);
        }
        workspace.set_current(StructureKind::Queue);
        assert!(workspace.current_mut().is_empty());
        workspace.set_current(StructureKind::Stack);
        assert_eq!(workspace.frame().data, RenderData::Sequence(vec![4.0]));
    }

    #[test]
    fn test_frame_shapes() {
        let mut workspace = Workspace::new(StructureKind::Bst);
        assert_eq!(workspace.frame().data, RenderData::Tree(None));

        workspace.set_current(StructureKind::BinaryHeap);
        let frame = workspace.frame();
        assert_eq!(frame.heap_mode, Some(HeapMode::Min));
        assert_eq!(frame.kind, StructureKind::BinaryHeap);
    }

    #[test]
    fn test_render_bumps_serial() {
        let mut workspace = Workspace::new(StructureKind::Array);
        let before = workspace.frame().serial;
        workspace.show(RenderOptions::highlight_index(0), "done");
        let frame = workspace.frame();
        assert_eq!(frame.serial, before + 1);
        assert!(frame.options.is_highlighted_index(0));
        assert_eq!(workspace.status().kind, StatusKind::Success);
    }
}
