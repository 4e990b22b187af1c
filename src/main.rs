//! My Time Machine
//!
//! A time paradox puzzle: travel the 20th century, collect what history
//! misplaced and put the timeline back together.

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use time_machine::tui::App;
use time_machine::{Config, VERSION};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> time_machine::Result<()> {
    let config = Config::from_env()?;
    if let Some(path) = &config.log_file {
        init_tracing(path)?;
    }
    info!(version = VERSION, "=== Time Machine startup ===");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let result = run(&mut terminal, &mut app);

    // Cleanup, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    info!(status = %app.game.status_line(), "shutdown");
    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for playing My Time Machine!                   ║");
    println!("║                                                        ║");
    println!("║  Mind the paradoxes, traveler.                         ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> std::io::Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;

        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}

/// Log to a file; the terminal belongs to the UI
fn init_tracing(path: &Path) -> time_machine::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}
