//! Daylight Time - sunrise, sunset and day length for a handful of UK cities
//!
//! Pick a city on the left and step the date with the arrow keys; the value
//! boxes fill in from the Sunrise Sunset API and the map follows the city.
//!
//! # Usage
//!
//! ```sh
//! # Interactive dashboard, London today
//! cargo run -p daylight
//!
//! # Headless: fetch once and print
//! cargo run -p daylight -- --city Edinburgh --date 2024-12-21 --print
//! ```

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use daylight::app::DaylightApp;
use daylight::components::ERROR_ICON;
use daylight::state::AppState;
use daylight_core::{
    CityRegistry, ClientConfig, DaylightCache, HttpSunClient, Selection, Session, ValueView,
    DEFAULT_CITY, DEFAULT_ENDPOINT,
};

/// Daylight Time - sunrise and sunset dashboard
#[derive(Parser, Debug)]
#[command(name = "daylight")]
#[command(about = "Sunrise, sunset and day length for UK cities")]
struct Args {
    /// Initial city (one of the built-in cities)
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// Initial date, YYYY-MM-DD (defaults to today)
    #[arg(long, short, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Sunrise Sunset API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Fetch once, print the values and exit
    #[arg(long)]
    print: bool,

    /// Write logs to this file (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Logs go to `--log-file`, or to stderr in `--print` mode. The dashboard
/// owns the terminal, so without a file nothing is installed.
fn init_logging(log_file: Option<&PathBuf>, print: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if print => {
            fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref(), args.print)?;

    let registry = CityRegistry::builtin();
    if !registry.contains(&args.city) {
        eprintln!("Error: City '{}' is not available.", args.city);
        eprintln!(
            "Choose one of: {}",
            registry.names().collect::<Vec<_>>().join(", ")
        );
        return Ok(ExitCode::FAILURE);
    }

    let today = Local::now().date_naive();
    let selection = Selection::new(args.city.clone(), args.date.unwrap_or(today));
    let client = HttpSunClient::new(ClientConfig {
        endpoint: args.endpoint.clone(),
    });
    info!(%selection, endpoint = %args.endpoint, "starting");

    if args.print {
        return print_once(registry, client, selection).await;
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let cache = Arc::new(DaylightCache::new(registry, client));
    let mut app = DaylightApp::new(AppState::new(registry, selection, today), cache);
    let result = app.run(&mut terminal).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| ExitCode::SUCCESS)
}

/// Headless mode: one pass through the pipeline, one line per value box
async fn print_once(
    registry: CityRegistry,
    client: HttpSunClient,
    selection: Selection,
) -> io::Result<ExitCode> {
    let mut session = Session::new(registry, client, selection.date);
    if let Err(e) = session.select_city(&selection.city) {
        eprintln!("Error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    let view = session.views().await;
    println!("City:       {}", selection.city);
    println!("Sunrise:    {}", value_line(&view.sunrise));
    println!("Sunset:     {}", value_line(&view.sunset));
    println!("Day Length: {}", value_line(&view.day_length));
    println!("Date:       {}", view.date);

    let failed = view.fetched().iter().any(|value| value.is_failed());
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn value_line(value: &ValueView) -> String {
    match value {
        ValueView::Pending => "loading".to_string(),
        ValueView::Ready(text) => text.clone(),
        ValueView::Failed(err) => format!("{ERROR_ICON} {} ({err})", err.label()),
    }
}
