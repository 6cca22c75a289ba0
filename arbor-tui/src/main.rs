use std::fs::File;
use std::path::PathBuf;

use arbor::SystemClock;
use arbor_tui::terminal::Terminal;
use arbor_tui::{App, AppConfig, paths};
use clap::{Parser, ValueEnum};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "arbor-tui")]
#[command(about = "Explore a hierarchical JSON payload as a collapsible tree", long_about = None)]
#[command(version)]
struct Cli {
    /// File path or http(s) URL of the payload. Overrides the config file.
    resource: Option<String>,

    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let log_file = File::create(&path).expect("Failed to create log file");
    WriteLogger::init(level, Config::default(), log_file).expect("Failed to initialize logger");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(resource) = cli.resource {
        config.resource = resource;
    }
    info!("Resource: {}", config.resource);

    let mut terminal = Terminal::new().expect("Failed to initialize terminal");
    let mut app = App::new(
        config,
        terminal.size(),
        SystemClock,
        tokio::runtime::Handle::current(),
    );
    let result = tokio::task::block_in_place(|| app.run(&mut terminal));
    drop(terminal);

    if let Err(e) = result {
        error!("Terminal error: {}", e);
        eprintln!("Error: {}", e);
    }
}
