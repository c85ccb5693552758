use std::io::{self, IsTerminal};

use anyhow::Result;
use chrono::Local;
use tracing_subscriber::EnvFilter;

use planner_ledger::storage::config::Config;

mod cli;
use cli::{CliMode, CliRequest, Session, USAGE, parse_cli_mode};

fn main() -> Result<()> {
    let options = match parse_cli_mode(cli::args()) {
        Ok(CliRequest::Run(options)) => options,
        Ok(CliRequest::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}; using defaults", e);
            Config::default()
        }
    };

    setup_logging(&config);

    let today = Local::now().date_naive();
    let mut session = match Session::open(config, options.fixtures, today) {
        Ok(session) => session.with_color(io::stdout().is_terminal()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            tracing::error!("Failed to open planner: {:#}", e);
            return Err(e);
        }
    };

    let mut stdout = io::stdout().lock();
    session.run_batch(&options.exec, &mut stdout)?;

    match options.mode {
        CliMode::HeatMap(kind) => {
            let kind = kind.unwrap_or(session.config.planner.default_heat_map);
            println!("{}", session.heat_map(kind));
        }
        CliMode::Agenda(date) => {
            println!("{}", session.agenda_for(date));
        }
        CliMode::Repl => {
            session.run_repl(io::stdin().lock(), &mut stdout)?;
        }
    }

    Ok(())
}

fn setup_logging(config: &Config) {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "planner-ledger.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("planner-ledger started");
}
