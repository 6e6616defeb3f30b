//! # Convênio Kiosk Entry Point
//!
//! Terminal check-in station where a patient picks a health-insurance
//! provider and authenticates with that provider's method.
//!
//! ## Usage
//!
//! ```bash
//! # Start on the provider grid
//! convenio
//!
//! # Start with a provider's modal already open
//! convenio --provider clinipam
//!
//! # Use another theme and config file
//! convenio --theme Nord --config ./kiosk.json
//!
//! # Print the provider catalogue and exit
//! convenio --list
//! ```
//!
//! ## Key Bindings
//!
//! ### Provider grid
//! - `←→↑↓` / `hjkl` - Move selection
//! - `Enter` / `Space` - Open the selected provider
//! - `1`-`4` - Open a provider directly
//! - `t` - Cycle theme
//! - `i` - Show/hide info
//! - `q` / `Q` - Quit
//!
//! ### Provider modal
//! - `Esc` - Close
//! - `0-9` / `Backspace` - Edit CPF or token path
//! - `Enter` - Confirm
//! - `Tab` - Switch method (HapVida) or QR/token (Unimed)
//! - `g` - Generate code (Clinipam)
//! - `Space` - Tap biometric reader (HapVida)
//! - `s` - Simulate QR authentication (Unimed)

use convenio::checkin::{ProviderKey, PROVIDERS};
use convenio::logging;
use convenio::ui::{self, config::Config, theme::Theme, App};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

/// How long to wait for input before redrawing (keeps countdowns live).
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Convênio - terminal check-in kiosk for health-insurance providers
#[derive(Parser, Debug)]
#[command(name = "convenio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Autenticador de Convênio - Sistema de Check-in Digital", long_about = None)]
struct Args {
    /// Open this provider's modal on start (unimed, clinipam, hapvida, outros)
    #[arg(short, long, value_name = "PROVIDER")]
    provider: Option<ProviderKey>,

    /// Theme name, overriding the config file
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Path to the config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the provider catalogue and exit
    #[arg(long)]
    list: bool,

    /// Write logs to this file instead of the data directory
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);

        original_hook(panic_info);
    }));

    let result = run_application(&args);

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

/// Write one line per provider: key, name and description.
fn print_providers(out: &mut impl Write) -> io::Result<()> {
    for (index, provider) in PROVIDERS.iter().enumerate() {
        writeln!(
            out,
            "{}. {:<9} {:<18} {}",
            index + 1,
            provider.key,
            provider.name,
            provider.description
        )?;
    }
    Ok(())
}

/// Build the app from the CLI arguments and the config file.
fn build_app(args: &Args) -> Result<App> {
    let config_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Config::config_path().ok(),
    };

    let mut config = match &args.config {
        // An explicit config file must be valid.
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if let Some(name) = &args.theme {
        let Some(theme) = Theme::by_name(name) else {
            let available: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
            bail!(
                "Unknown theme: {name} (available: {})",
                available.join(", ")
            );
        };
        config.theme = theme.name.to_string();
    }

    let mut app = App::new(config);
    if let Some(path) = config_path {
        app = app.with_config_path(path);
    }
    if let Some(provider) = args.provider {
        app.open_modal(provider);
    }
    Ok(app)
}

fn run_application(args: &Args) -> Result<()> {
    if args.list {
        print_providers(&mut io::stdout().lock()).context("Failed to print providers")?;
        return Ok(());
    }

    match logging::init(args.log_file.as_deref()) {
        Ok(path) => tracing::info!(log = %path.display(), "kiosk starting"),
        Err(e) => eprintln!("Warning: logging disabled: {e:#}"),
    }

    let mut app = build_app(args)?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader);

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    tracing::info!("kiosk stopped");

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        // Timers run on the runtime; fold their ticks in before drawing.
        app.drain_ticks();

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        if app.should_quit {
            return Ok(());
        }

        let Some(event) = event_reader.read_event(POLL_TIMEOUT)? else {
            continue;
        };

        if let Event::Key(key) = event {
            ui::handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
