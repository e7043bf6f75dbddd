// dsstudio: interactive data structures studio

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use dsstudio::config::{StudioConfig, DEFAULT_STORE_CAPACITY, USAGE};
use dsstudio::playground::{Command, Playground};
use dsstudio::snapshot::{JsonFileStore, MemoryStore, VisualizationStore};
use dsstudio::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match StudioConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if config.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    let store: Box<dyn VisualizationStore> = match &config.store_path {
        Some(path) => match JsonFileStore::open(path) {
            Ok(store) => {
                eprintln!(
                    "Opened {} with {} saved visualization(s).",
                    path.display(),
                    store.len()
                );
                Box::new(store)
            }
            Err(e) => {
                eprintln!("Error: could not open '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(MemoryStore::new(DEFAULT_STORE_CAPACITY)),
    };

    let mut playground = Playground::new(config.kind, config.speed, store);

    if let Some(id) = config.load_id {
        if let Err(e) = playground.execute(Command::LoadSaved { id }, Instant::now()) {
            eprintln!("Warning: {}", e);
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(playground);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
