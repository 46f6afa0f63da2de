//! Kana Trainer - hiragana flashcard TUI
//!
//! A terminal flashcard trainer for the 46 basic hiragana, with free-text
//! and multiple-choice practice and persistent accuracy/streak statistics.

mod catalog;
mod config;
mod evaluate;
mod session;
mod stats;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use stats::StatsStore;
use ui::App;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "kana")]
#[command(author, version, about = "Hiragana flashcard practice TUI", long_about = None)]
struct Args {
    /// Statistics file (defaults to kana_stats.json in the working directory)
    #[arg(short, long)]
    stats_file: Option<PathBuf>,

    /// Start with multiple-choice answers enabled
    #[arg(short, long)]
    multiple_choice: bool,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    // A missing or unreadable stats file silently becomes a fresh record.
    let stats_path = args.stats_file.unwrap_or_else(StatsStore::default_path);
    let stats = StatsStore::load(stats_path);

    run_tui(stats, args.multiple_choice)
}

fn run_tui(stats: StatsStore, multiple_choice: bool) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load config
    let mut config = config::Config::load().unwrap_or_default();
    if multiple_choice {
        config.multiple_choice = true;
    }

    // Create app
    let mut app = App::new(stats, config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}
