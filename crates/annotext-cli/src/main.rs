use annotext_config::{Config, EditorSettings};
use annotext_engine::{Editor, io, render};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

mod app;
mod ui;

use app::App;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let html = args.iter().skip(1).any(|arg| arg == "--html");
    let positional: Vec<&String> = args.iter().skip(1).filter(|arg| *arg != "--html").collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let document_path = match (positional.as_slice(), &config) {
        ([path], _) => PathBuf::from(path.as_str()),
        ([], Some(config)) => config.document_path.clone(),
        ([], None) => {
            eprintln!("Error: No document path provided and no config file found");
            eprintln!("Usage: {} [--html] <document.json>", args[0]);
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {} [--html] [document.json]", args[0]);
            process::exit(1);
        }
    };
    let settings = config.map(|config| config.editor).unwrap_or_default();

    let document = match io::read_document_or_sample(&document_path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!(
                "Error: Document '{}' could not be opened: {e}",
                document_path.display()
            );
            process::exit(1);
        }
    };

    if html {
        println!("{}", render::document_to_html(&document));
        return Ok(());
    }

    init_logging()?;
    run(document_path, document, settings)
}

/// Log to a file next to the config; the terminal belongs to the editor
fn init_logging() -> Result<()> {
    let log_path = Config::log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(
    document_path: PathBuf,
    document: annotext_engine::Document,
    settings: EditorSettings,
) -> Result<()> {
    let editor = Editor::new(document).with_history_limit(settings.history_limit);
    let mut app = App::new(document_path, editor, settings.placeholder);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("editor loop failed: {err:?}");
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}
