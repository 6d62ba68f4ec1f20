use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fruit_slice::app::App;
use fruit_slice::assets::{ImageDirResolver, SpriteCatalog};
use fruit_slice::clock::SystemClock;
use fruit_slice::input::InputManager;
use fruit_slice::settings::Settings;

fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = Settings::parse();
    settings.validate()?;
    init_logging(&settings)?;

    // Sprites are loaded before the terminal is touched so a missing file
    // reports cleanly on a normal screen
    let sprites = match &settings.assets {
        Some(dir) => SpriteCatalog::load(&ImageDirResolver::new(dir), &settings.fruits)?,
        None => SpriteCatalog::builtin(),
    };

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(supports_keyboard_enhancement, "terminal capabilities");
    if !supports_keyboard_enhancement {
        warn!("key release events unavailable, continuing on key press instead");
    }

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(
        &settings,
        SystemClock::new(),
        sprites,
        InputManager::new(supports_keyboard_enhancement),
    );
    let result = app.run(&mut terminal);

    // Cleanup
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

/// Sends tracing output to the log file; the terminal belongs to the game
fn init_logging(settings: &Settings) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&settings.log_file)
        .wrap_err_with(|| format!("failed to open log file {}", settings.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .wrap_err("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
