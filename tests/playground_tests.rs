// Integration tests for the playground: commands, timed sequences and saving

use std::time::{Duration, Instant};

use dsstudio::playground::{Command, Playground, PlaygroundError, StatusKind};
use dsstudio::sequence::RunnerState;
use dsstudio::snapshot::{JsonFileStore, VisualizationStore};
use dsstudio::structures::bst::TraversalOrder;
use dsstudio::structures::payload::HeapMode;
use dsstudio::structures::{AnyStructure, Structure, StructureKind};

/// Comfortably longer than the slowest step delay
const LATER: Duration = Duration::from_secs(2);

fn values(pg: &Playground) -> Vec<f64> {
    pg.structure(pg.current_kind())
        .map(Structure::to_vec)
        .unwrap_or_default()
}

fn run(pg: &mut Playground, command: Command, now: Instant) -> Result<(), PlaygroundError> {
    pg.execute(command, now)
}

fn insert(input: &str) -> Command {
    Command::Insert {
        input: input.to_string(),
        index: String::new(),
    }
}

/// Tick until the runner is idle; returns the last time used
fn drain(pg: &mut Playground, mut now: Instant) -> Instant {
    for _ in 0..100 {
        if pg.runner_state() == RunnerState::Idle {
            break;
        }
        now += LATER;
        let _ = pg.tick(now);
    }
    now
}

#[test]
fn test_single_insert_is_immediate() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Stack);
    run(&mut pg, insert("7"), now).unwrap();

    assert_eq!(values(&pg), vec![7.0]);
    assert_eq!(pg.runner_state(), RunnerState::Idle);
    assert_eq!(pg.status().message, "Pushed \"7\".");
    assert_eq!(pg.status().kind, StatusKind::Success);
}

#[test]
fn test_batch_insert_plays_one_value_per_tick() {
    let start = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Queue);
    run(&mut pg, insert("[1, 2, 3]"), start).unwrap();

    // First step runs right away
    assert_eq!(values(&pg), vec![1.0]);
    assert_eq!(pg.progress(), (1, 3));

    // Nothing is due before the delay elapses
    pg.tick(start + Duration::from_millis(10)).unwrap();
    assert_eq!(values(&pg), vec![1.0]);

    pg.tick(start + LATER).unwrap();
    assert_eq!(values(&pg), vec![1.0, 2.0]);

    drain(&mut pg, start + LATER);
    assert_eq!(values(&pg), vec![1.0, 2.0, 3.0]);
    assert_eq!(pg.runner_state(), RunnerState::Idle);
}

#[test]
fn test_array_batch_resets_first() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Array);
    run(&mut pg, insert("9"), now).unwrap();

    run(&mut pg, insert("4,5"), now).unwrap();
    assert!(values(&pg).is_empty());
    assert_eq!(pg.status().message, "Array reset for batch insert.");

    drain(&mut pg, now);
    assert_eq!(values(&pg), vec![4.0, 5.0]);
}

#[test]
fn test_pause_and_resume() {
    let start = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Queue);
    run(&mut pg, insert("1 2 3 4"), start).unwrap();

    run(&mut pg, Command::ToggleAutoplay, start).unwrap();
    assert_eq!(pg.runner_state(), RunnerState::Paused);
    assert_eq!(pg.status().message, "Auto-play paused.");

    pg.tick(start + LATER * 5).unwrap();
    assert_eq!(values(&pg).len(), 1);

    // Resuming runs the next step immediately
    run(&mut pg, Command::ToggleAutoplay, start + LATER * 5).unwrap();
    assert_eq!(pg.runner_state(), RunnerState::Running);
    assert_eq!(values(&pg).len(), 2);

    drain(&mut pg, start + LATER * 5);
    assert_eq!(values(&pg), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_toggle_without_sequence() {
    let mut pg = Playground::in_memory(StructureKind::Stack);
    run(&mut pg, Command::ToggleAutoplay, Instant::now()).unwrap();
    assert_eq!(pg.status().message, "No sequence is queued yet.");
    assert_eq!(pg.runner_state(), RunnerState::Idle);
}

#[test]
fn test_new_command_cancels_sequence() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Stack);
    run(&mut pg, insert("1,2,3"), now).unwrap();
    run(&mut pg, Command::Clear, now).unwrap();

    assert_eq!(pg.runner_state(), RunnerState::Idle);
    drain(&mut pg, now);
    assert!(values(&pg).is_empty());
    assert_eq!(pg.status().message, "Structure cleared.");
}

#[test]
fn test_speed_change_keeps_sequence() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Stack);
    run(&mut pg, insert("1,2,3"), now).unwrap();
    run(&mut pg, Command::SetSpeed { percent: 100 }, now).unwrap();

    assert_eq!(pg.runner_state(), RunnerState::Running);
    assert_eq!(pg.status().message, "Animation speed set to 100%.");
    assert_eq!(pg.deadline(), Some(now + Duration::from_millis(849)));

    // The next deadline uses the new delay
    pg.tick(now + Duration::from_millis(849)).unwrap();
    assert_eq!(pg.deadline(), Some(now + Duration::from_millis(849 + 160)));
}

#[test]
fn test_linear_search_marks_match_then_clears() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Array);
    for value in ["4", "7", "9"] {
        run(&mut pg, insert(value), now).unwrap();
    }

    run(
        &mut pg,
        Command::Search {
            input: "7".to_string(),
        },
        now,
    )
    .unwrap();
    assert_eq!(pg.status().message, "Found \"7\" at index 1.");
    assert!(pg.frame().options.is_highlighted_index(0));

    let mut t = now;
    while pg.runner_state() == RunnerState::Running {
        t += LATER;
        pg.tick(t).unwrap();
    }
    assert_eq!(pg.runner_state(), RunnerState::Completed);
    assert_eq!(pg.frame().options.found_index, Some(1));

    pg.tick(t + LATER).unwrap();
    assert_eq!(pg.runner_state(), RunnerState::Idle);
    assert_eq!(pg.frame().options.found_index, None);
}

#[test]
fn test_search_miss_reports_info() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::LinkedList);
    run(&mut pg, insert("1,2"), now).unwrap();
    let now = drain(&mut pg, now);

    run(
        &mut pg,
        Command::Search {
            input: "5".to_string(),
        },
        now,
    )
    .unwrap();
    assert_eq!(pg.status().message, "Value \"5\" not found.");
    assert_eq!(pg.status().kind, StatusKind::Info);
}

#[test]
fn test_traversal_completion_message() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Bst);
    run(&mut pg, insert("5 3 8"), now).unwrap();
    let now = drain(&mut pg, now);

    run(
        &mut pg,
        Command::Traverse {
            order: TraversalOrder::In,
        },
        now,
    )
    .unwrap();
    assert_eq!(pg.status().message, "Traversal started (in).");
    assert!(pg.frame().options.is_highlighted_value(3.0));

    drain(&mut pg, now);
    assert_eq!(pg.status().message, "in-order traversal result: [3, 5, 8].");
    assert_eq!(pg.status().kind, StatusKind::Success);
}

#[test]
fn test_bst_duplicate_aborts_batch() {
    let mut now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Bst);
    run(&mut pg, insert("5,3,5,9"), now).unwrap();
    assert_eq!(pg.status().message, "Inserting values into the tree...");

    let mut outcome = Ok(());
    for _ in 0..10 {
        now += LATER;
        outcome = pg.tick(now);
        if outcome.is_err() {
            break;
        }
    }

    let err = outcome.unwrap_err();
    assert!(matches!(err, PlaygroundError::SequenceAborted { .. }));
    assert_eq!(
        pg.status().message,
        "Sequence stopped due to an error: Duplicate values are not allowed."
    );
    assert_eq!(pg.status().kind, StatusKind::Error);
    assert_eq!(pg.runner_state(), RunnerState::Idle);

    // 9 never made it in
    let tree = pg.structure(StructureKind::Bst).unwrap();
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_linked_list_insert_at_and_delete() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::LinkedList);
    run(&mut pg, insert("1,2"), now).unwrap();
    let now = drain(&mut pg, now);

    run(
        &mut pg,
        Command::InsertAt {
            input: "9".to_string(),
            index: "1".to_string(),
        },
        now,
    )
    .unwrap();
    assert_eq!(values(&pg), vec![1.0, 9.0, 2.0]);
    assert_eq!(pg.status().message, "Inserted \"9\" at index 1.");

    run(
        &mut pg,
        Command::DeleteAt {
            index: "0".to_string(),
        },
        now,
    )
    .unwrap();
    assert_eq!(values(&pg), vec![9.0, 2.0]);
    assert_eq!(pg.status().message, "Deleted \"1\" at index 0.");

    let err = run(
        &mut pg,
        Command::DeleteByValue {
            input: "42".to_string(),
        },
        now,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Value not found.");
    assert_eq!(pg.status().kind, StatusKind::Error);
}

#[test]
fn test_insert_at_requires_index() {
    let mut pg = Playground::in_memory(StructureKind::LinkedList);
    let err = run(
        &mut pg,
        Command::InsertAt {
            input: "3".to_string(),
            index: " ".to_string(),
        },
        Instant::now(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Index is required for insert at index.");
}

#[test]
fn test_error_messages_reach_status() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Stack);

    let remove = Command::Remove {
        input: String::new(),
        index: String::new(),
    };
    let err = run(&mut pg, remove, now).unwrap_err();
    assert_eq!(err.to_string(), "Stack is empty.");
    assert_eq!(pg.status().message, "Stack is empty.");

    let err = run(&mut pg, insert("1,a"), now).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Only numbers are supported. Problematic input: \"a\"."
    );

    run(&mut pg, Command::Select { kind: StructureKind::Array }, now).unwrap();
    let err = run(&mut pg, Command::Peek, now).unwrap_err();
    assert_eq!(err.to_string(), "Peek is not available for Array.");

    let err = run(&mut pg, Command::Save { name: "x".to_string() }, now).unwrap_err();
    assert!(matches!(err, PlaygroundError::NothingToSave));
}

#[test]
fn test_batch_at_max_index_aborts_cleanly() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Array);
    let command = Command::Insert {
        input: "1 2".to_string(),
        index: i64::MAX.to_string(),
    };
    run(&mut pg, command, now).unwrap();
    assert_eq!(pg.status().message, "Array reset for batch insert.");

    let err = pg.tick(now + LATER).unwrap_err();
    assert!(matches!(err, PlaygroundError::SequenceAborted { .. }));
    assert_eq!(
        pg.status().message,
        "Sequence stopped due to an error: Invalid index."
    );
    assert_eq!(pg.runner_state(), RunnerState::Idle);
    assert!(values(&pg).is_empty());
}

#[test]
fn test_out_of_range_number_is_rejected() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Stack);
    let huge = format!("1{}", "0".repeat(400));
    let err = run(&mut pg, insert(&huge), now).unwrap_err();
    assert!(err.to_string().starts_with("Only numbers are supported."));
    assert!(values(&pg).is_empty());

    // Nothing unloadable can reach a saved record
    let err = run(&mut pg, Command::Save { name: "big".to_string() }, now).unwrap_err();
    assert!(matches!(err, PlaygroundError::NothingToSave));
}

#[test]
fn test_failed_peek_keeps_sequence_running() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Queue);
    run(&mut pg, insert("1,2,3"), now).unwrap();

    let err = run(&mut pg, Command::Peek, now).unwrap_err();
    assert_eq!(err.to_string(), "Peek is not available for Queue.");
    assert_eq!(pg.runner_state(), RunnerState::Running);

    drain(&mut pg, now);
    assert_eq!(values(&pg), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_successful_peek_cancels_sequence() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Stack);
    run(&mut pg, insert("1,2,3"), now).unwrap();

    run(&mut pg, Command::Peek, now).unwrap();
    assert_eq!(pg.status().message, "Top value is \"1\".");
    assert_eq!(pg.runner_state(), RunnerState::Idle);
    drain(&mut pg, now);
    assert_eq!(values(&pg), vec![1.0]);
}

#[test]
fn test_select_keeps_each_structure() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Stack);
    run(&mut pg, insert("3"), now).unwrap();
    run(&mut pg, Command::Select { kind: StructureKind::Queue }, now).unwrap();
    assert_eq!(pg.status().message, "Queue ready.");
    assert!(values(&pg).is_empty());

    run(&mut pg, Command::Select { kind: StructureKind::Stack }, now).unwrap();
    assert_eq!(values(&pg), vec![3.0]);
}

#[test]
fn test_save_and_load_bst_shape() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::Bst);
    run(&mut pg, insert("5 3 8 1"), now).unwrap();
    let now = drain(&mut pg, now);
    let before = match pg.structure(StructureKind::Bst) {
        Some(AnyStructure::Bst(tree)) => tree.traverse(TraversalOrder::Pre),
        _ => panic!("tree missing"),
    };

    run(&mut pg, Command::Save { name: " forest ".to_string() }, now).unwrap();
    assert_eq!(pg.status().message, "Saved \"forest\".");
    let id = pg.saved().unwrap()[0].id;

    run(&mut pg, Command::Clear, now).unwrap();
    run(&mut pg, Command::Select { kind: StructureKind::Stack }, now).unwrap();
    run(&mut pg, Command::LoadSaved { id }, now).unwrap();

    assert_eq!(pg.current_kind(), StructureKind::Bst);
    assert_eq!(pg.status().message, "Loaded \"forest\".");
    let after = match pg.structure(StructureKind::Bst) {
        Some(AnyStructure::Bst(tree)) => tree.traverse(TraversalOrder::Pre),
        _ => panic!("tree missing"),
    };
    assert_eq!(before, after);
}

#[test]
fn test_save_and_load_heap_mode() {
    let now = Instant::now();
    let mut pg = Playground::in_memory(StructureKind::BinaryHeap);
    run(&mut pg, Command::SetHeapMode { mode: HeapMode::Max }, now).unwrap();
    run(&mut pg, insert("1,5,3"), now).unwrap();
    let now = drain(&mut pg, now);
    run(&mut pg, Command::Save { name: "max".to_string() }, now).unwrap();
    let id = pg.saved().unwrap()[0].id;

    run(&mut pg, Command::SetHeapMode { mode: HeapMode::Min }, now).unwrap();
    assert_eq!(values(&pg)[0], 1.0);

    run(&mut pg, Command::LoadSaved { id }, now).unwrap();
    assert_eq!(pg.frame().heap_mode, Some(HeapMode::Max));
    assert_eq!(values(&pg)[0], 5.0);
}

#[test]
fn test_missing_saved_record() {
    let mut pg = Playground::in_memory(StructureKind::Stack);
    assert!(run(&mut pg, Command::LoadSaved { id: 99 }, Instant::now()).is_err());
    assert!(run(&mut pg, Command::DeleteSaved { id: 99 }, Instant::now()).is_err());
    assert_eq!(pg.status().kind, StatusKind::Error);
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.json");
    let now = Instant::now();

    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut pg = Playground::new(StructureKind::Queue, 50, Box::new(store));
        run(&mut pg, insert("2"), now).unwrap();
        run(&mut pg, Command::Save { name: "line".to_string() }, now).unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, StructureKind::Queue);

    let id = records[0].id;
    let mut pg = Playground::new(StructureKind::Stack, 50, Box::new(store));
    run(&mut pg, Command::LoadSaved { id }, now).unwrap();
    assert_eq!(pg.current_kind(), StructureKind::Queue);
    assert_eq!(values(&pg), vec![2.0]);

    run(&mut pg, Command::DeleteSaved { id }, now).unwrap();
    assert_eq!(pg.status().message, "Deleted \"line\".");
    assert!(pg.saved().unwrap().is_empty());
}
