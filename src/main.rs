use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use tbib::api::client::ApiClient;
use tbib::api::http::format_api_error;
use tbib::app::App;
use tbib::config::Config;
use tbib::resource::{client::list_records, get_resource};
use tbib::{event, ui};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Terminal admin UI for the library REST backend
#[derive(Parser, Debug)]
#[command(name = "tbib", version, about, long_about = None)]
struct Args {
    /// Backend base URL (e.g. http://localhost:3000)
    #[arg(short, long)]
    api_url: Option<String>,

    /// Collection to open at startup (categorias or livros)
    #[arg(short, long)]
    resource: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Run in read-only mode (block all write operations)
    #[arg(long)]
    readonly: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("tbib started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("tbib").join("tbib.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tbib").join("tbib.log");
    }
    PathBuf::from("tbib.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let app = initialize(&args).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_app(&mut terminal, app).await;
    cleanup_terminal(&mut terminal)?;

    if let Err(err) = run_result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn initialize(args: &Args) -> Result<App> {
    // Step 1: Load configuration
    let config = Config::load();
    let api_url = config.effective_api_url(args.api_url.as_deref());
    let resource_key = config.effective_resource(args.resource.as_deref());

    let Some(def) = get_resource(&resource_key) else {
        return Err(anyhow::anyhow!(
            "Unknown resource '{}'. Available: categorias, livros",
            resource_key
        ));
    };

    tracing::info!("Using backend: {}, collection: {}", api_url, resource_key);

    // Step 2: Initialize API client
    let client = ApiClient::new(&api_url)?;

    // Step 3: Fetch initial data; a dead backend shows an empty table with
    // the error rather than refusing to start
    let (items, initial_error) = match list_records(&client, def).await {
        Ok(items) => {
            tracing::info!("Loaded {} records from /{}", items.len(), def.collection_path);
            (items, None)
        }
        Err(e) => {
            tracing::warn!("Initial fetch failed: {}", e);
            (Vec::new(), Some(format_api_error(&e)))
        }
    };

    let mut app = App::from_initialized(client, resource_key, items, config, args.readonly);

    if let Some(err) = initial_error {
        app.error_message = Some(err);
    }

    Ok(app)
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::render(f, &mut app))?;

        if event::handle_events(&mut app).await? {
            return Ok(());
        }
    }
}
