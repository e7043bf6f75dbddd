//! Main TUI application state and logic

use crate::config::{POLL_INTERVAL_MS, SPEED_STEP};
use crate::playground::{Command, Playground};
use crate::structures::bst::TraversalOrder;
use crate::structures::payload::HeapMode;
use crate::structures::StructureKind;
use crate::ui::panes::{
    render_info_pane, render_input_bar, render_saved_pane, render_status_bar,
    render_structure_pane, InputField, InputRenderData, SavedListing, StatusRenderData,
    StructureScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Columns moved per scroll key press
const SCROLL_STEP: usize = 4;

/// Characters accepted by the value and index fields
fn is_input_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ',' | ' ' | '[' | ']' | '(' | ')' | '\'')
}

fn index_label(kind: StructureKind) -> &'static str {
    match kind {
        StructureKind::Array => "Index (optional)",
        StructureKind::LinkedList => "Index",
        _ => "Index (unused)",
    }
}

/// The main application state
pub struct App {
    pub playground: Playground,

    /// Field receiving typed characters
    pub focus: InputField,
    pub value_input: String,
    pub index_input: String,
    pub name_input: String,

    /// Selected row of the saved list
    pub saved_cursor: usize,

    pub structure_scroll: StructureScrollState,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(playground: Playground) -> Self {
        App {
            playground,
            focus: InputField::Value,
            value_input: String::new(),
            index_input: String::new(),
            name_input: String::new(),
            saved_cursor: 0,
            structure_scroll: StructureScrollState {
                offset: 0,
                last_serial: 0,
            },
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            // Errors are already on the status line
            let _ = self.playground.tick(Instant::now());

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so queued steps keep playing
            if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key, Instant::now());
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, input bar, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        // Right column: Info (top) | Saved (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let saving = self.focus == InputField::SaveName;
        let kind = self.playground.current_kind();

        render_structure_pane(
            frame,
            columns[0],
            &self.playground.frame(),
            !saving,
            &mut self.structure_scroll,
        );

        render_info_pane(frame, right_rows[0], kind.label(), self.playground.info());

        let saved = self.playground.saved();
        let error_text: String;
        let listing: SavedListing = match &saved {
            Ok(records) => Ok(records.as_slice()),
            Err(err) => {
                error_text = err.to_string();
                Err(error_text.as_str())
            }
        };
        if let Ok(records) = listing {
            self.saved_cursor = self.saved_cursor.min(records.len().saturating_sub(1));
        }
        render_saved_pane(frame, right_rows[1], listing, self.saved_cursor, saving);

        render_input_bar(
            frame,
            main_chunks[1],
            InputRenderData {
                value: &self.value_input,
                index: &self.index_input,
                name: &self.name_input,
                focused: self.focus,
                index_label: index_label(kind),
            },
        );

        render_status_bar(
            frame,
            main_chunks[2],
            StatusRenderData {
                status: self.playground.status(),
                state: self.playground.runner_state(),
                progress: self.playground.progress(),
                speed: self.playground.speed(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if self.focus == InputField::SaveName {
            self.handle_save_prompt(key, now);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c) if is_input_char(c) => {
                self.focused_input().push(c);
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Esc => {
                self.focused_input().clear();
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::Left => self.select(self.playground.current_kind().prev(), now),
            KeyCode::Right => self.select(self.playground.current_kind().next(), now),
            KeyCode::Up => {
                let percent = self.playground.speed().saturating_add(SPEED_STEP);
                self.run_command(Command::SetSpeed { percent }, now);
            }
            KeyCode::Down => {
                let percent = self.playground.speed().saturating_sub(SPEED_STEP);
                self.run_command(Command::SetSpeed { percent }, now);
            }
            KeyCode::Enter | KeyCode::Char('i') => {
                let command = Command::Insert {
                    input: self.value_input.clone(),
                    index: self.index_input.clone(),
                };
                self.run_and_clear(command, now);
            }
            KeyCode::Char('x') => {
                let command = Command::Remove {
                    input: self.value_input.clone(),
                    index: self.index_input.clone(),
                };
                self.run_and_clear(command, now);
            }
            KeyCode::Char('c') => self.run_command(Command::Clear, now),
            KeyCode::Char('s') => {
                let input = self.value_input.clone();
                self.run_command(Command::Search { input }, now);
            }
            KeyCode::Char('k') => self.run_command(Command::Peek, now),
            KeyCode::Char('f') => self.run_command(Command::PeekFront, now),
            KeyCode::Char('r') => self.run_command(Command::PeekRear, now),
            KeyCode::Char('a') => {
                let input = self.value_input.clone();
                self.run_and_clear(Command::Prepend { input }, now);
            }
            KeyCode::Char('n') => {
                let command = Command::InsertAt {
                    input: self.value_input.clone(),
                    index: self.index_input.clone(),
                };
                self.run_and_clear(command, now);
            }
            KeyCode::Char('v') => {
                let input = self.value_input.clone();
                self.run_command(Command::DeleteByValue { input }, now);
            }
            KeyCode::Char('z') => {
                let index = self.index_input.clone();
                self.run_command(Command::DeleteAt { index }, now);
            }
            KeyCode::Char('y') => self.traverse(TraversalOrder::Pre, now),
            KeyCode::Char('t') => self.traverse(TraversalOrder::In, now),
            KeyCode::Char('u') => self.traverse(TraversalOrder::Post, now),
            KeyCode::Char('l') => self.traverse(TraversalOrder::Level, now),
            KeyCode::Char('m') => {
                let mode = self
                    .playground
                    .frame()
                    .heap_mode
                    .map_or(HeapMode::Min, HeapMode::toggled);
                self.run_command(Command::SetHeapMode { mode }, now);
            }
            KeyCode::Char('p') => self.run_command(Command::ToggleAutoplay, now),
            KeyCode::Char('<') => {
                self.structure_scroll.offset =
                    self.structure_scroll.offset.saturating_sub(SCROLL_STEP);
            }
            KeyCode::Char('>') => {
                self.structure_scroll.offset =
                    self.structure_scroll.offset.saturating_add(SCROLL_STEP);
            }
            KeyCode::Char('w') => {
                self.name_input.clear();
                self.focus = InputField::SaveName;
            }
            KeyCode::PageUp => {
                self.saved_cursor = self.saved_cursor.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.saved_cursor = self.saved_cursor.saturating_add(1);
            }
            KeyCode::Char('g') => {
                if let Some(id) = self.selected_saved_id() {
                    self.run_command(Command::LoadSaved { id }, now);
                }
            }
            KeyCode::Delete => {
                if let Some(id) = self.selected_saved_id() {
                    self.run_command(Command::DeleteSaved { id }, now);
                }
            }
            _ => {}
        }
    }

    fn handle_save_prompt(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => {
                let name = self.name_input.clone();
                if self.playground.execute(Command::Save { name }, now).is_ok() {
                    self.name_input.clear();
                    self.saved_cursor = 0;
                }
                self.focus = InputField::Value;
            }
            KeyCode::Esc => {
                self.name_input.clear();
                self.focus = InputField::Value;
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                self.name_input.push(c);
            }
            _ => {}
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            InputField::Value => &mut self.value_input,
            InputField::Index => &mut self.index_input,
            InputField::SaveName => &mut self.name_input,
        }
    }

    fn select(&mut self, kind: StructureKind, now: Instant) {
        self.run_command(Command::Select { kind }, now);
    }

    fn traverse(&mut self, order: TraversalOrder, now: Instant) {
        self.run_command(Command::Traverse { order }, now);
    }

    /// Failures land on the status line, nothing else to do here
    fn run_command(&mut self, command: Command, now: Instant) {
        let _ = self.playground.execute(command, now);
    }

    /// Run a command that consumes the typed values
    fn run_and_clear(&mut self, command: Command, now: Instant) {
        if self.playground.execute(command, now).is_ok() {
            self.value_input.clear();
        }
    }

    fn selected_saved_id(&self) -> Option<u64> {
        let records = self.playground.saved().ok()?;
        records.get(self.saved_cursor).map(|record| record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::RunnerState;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            press(app, KeyCode::Char(c), now);
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Array));
        type_text(&mut app, "[1, 2]", now);
        press(&mut app, KeyCode::Tab, now);
        type_text(&mut app, "3", now);
        assert_eq!(app.value_input, "[1, 2]");
        assert_eq!(app.index_input, "3");

        press(&mut app, KeyCode::Backspace, now);
        assert_eq!(app.index_input, "");
    }

    #[test]
    fn test_signed_values_can_be_typed() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Stack));
        type_text(&mut app, "+5 -2", now);
        assert_eq!(app.value_input, "+5 -2");
    }

    #[test]
    fn test_mode_key_flips_heap_mode() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::BinaryHeap));
        assert_eq!(app.playground.frame().heap_mode, Some(HeapMode::Min));
        press(&mut app, KeyCode::Char('m'), now);
        assert_eq!(app.playground.frame().heap_mode, Some(HeapMode::Max));
        press(&mut app, KeyCode::Char('m'), now);
        assert_eq!(app.playground.frame().heap_mode, Some(HeapMode::Min));
    }

    #[test]
    fn test_enter_pushes_and_clears_value() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Stack));
        type_text(&mut app, "7", now);
        press(&mut app, KeyCode::Enter, now);
        assert!(app.value_input.is_empty());
        assert_eq!(app.playground.status().message, "Pushed \"7\".");
    }

    #[test]
    fn test_failed_insert_keeps_value() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Stack));
        type_text(&mut app, "1 2", now);
        app.value_input.push_str("x");
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.value_input, "1 2x");
    }

    #[test]
    fn test_arrows_switch_structure() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Stack));
        press(&mut app, KeyCode::Right, now);
        assert_eq!(app.playground.current_kind(), StructureKind::Stack.next());
        press(&mut app, KeyCode::Left, now);
        assert_eq!(app.playground.current_kind(), StructureKind::Stack);
    }

    #[test]
    fn test_pause_key_pauses_batch() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Queue));
        type_text(&mut app, "1,2,3", now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.playground.runner_state(), RunnerState::Running);
        press(&mut app, KeyCode::Char('p'), now);
        assert_eq!(app.playground.runner_state(), RunnerState::Paused);
    }

    #[test]
    fn test_save_prompt_round_trip() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Stack));
        type_text(&mut app, "4", now);
        press(&mut app, KeyCode::Enter, now);

        press(&mut app, KeyCode::Char('w'), now);
        assert_eq!(app.focus, InputField::SaveName);
        // Letters go to the name while the prompt is open
        type_text(&mut app, "quick", now);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter, now);

        assert_eq!(app.focus, InputField::Value);
        let saved = app.playground.saved().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "quick");
        assert_eq!(app.selected_saved_id(), Some(saved[0].id));
    }

    #[test]
    fn test_speed_keys_clamp() {
        let now = Instant::now();
        let mut app = App::new(Playground::in_memory(StructureKind::Stack));
        for _ in 0..10 {
            press(&mut app, KeyCode::Up, now);
        }
        assert_eq!(app.playground.speed(), 100);
        for _ in 0..20 {
            press(&mut app, KeyCode::Down, now);
        }
        assert_eq!(app.playground.speed(), 10);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(Playground::in_memory(StructureKind::Array));
        press(&mut app, KeyCode::Char('q'), Instant::now());
        assert!(app.should_quit);
    }
}
