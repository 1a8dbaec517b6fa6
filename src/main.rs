use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tictac::config::AppConfig;
use tictac::ui::App;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "tictac.log";

/// N-in-a-row on an arbitrary board against minimax opponents
#[derive(Parser, Debug)]
#[command(name = "tictac", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "tictac.toml")]
    config: PathBuf,

    /// Board height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Board width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Marks in a row needed to win (overrides config)
    #[arg(long)]
    streak: Option<usize>,

    /// Minimax depth horizon (overrides config; sized to the board when unset)
    #[arg(long)]
    depth: Option<usize>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // The terminal belongs to the UI, so logs go to a file
    let log_file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let config = load_config(&cli)?;
    info!(?config, "starting tictac");

    let app = App::new(config).context("setting up the game")?;
    run(app).context("running the terminal UI")
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if let Some(height) = cli.height {
        config.game.height = height;
    }
    if let Some(width) = cli.width {
        config.game.width = width;
    }
    if let Some(streak) = cli.streak {
        config.game.streak = streak;
    }
    if let Some(depth) = cli.depth {
        config.search.max_depth = Some(depth);
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
