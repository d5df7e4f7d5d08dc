//! `employees` - terminal front end for the employee records API.
//!
//! Usage:
//!   employees list
//!   employees add --name "Eve Adams" --age 41 --department Finance --salary 80000 --email eve@company.com
//!   employees edit 5 --salary 85000
//!   employees delete 5 --yes
//!   employees export csv --out ./backup
//!
//! Environment variables:
//!   EMPLOYEE_API_URL    # API base URL (default: http://localhost:8000/api)
//!   RUST_LOG            # Log filter (default: warn, or debug with --debug)

mod commands;
mod render;

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use employee_core::{EmployeeClient, RequestFailure, UiState, UreqTransport, DEFAULT_BASE_URL};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use commands::Command;
use render::Banner;

#[derive(Parser, Debug)]
#[command(
    name = "employees",
    version,
    about = "Manage employee records through the employee API"
)]
struct Cli {
    /// API base URL
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Enable debug logging (request/response tracing)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn prompt(question: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Spinner on stderr while a call is in flight.
struct LoadingIndicator {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LoadingIndicator {
    const POLL: Duration = Duration::from_millis(50);

    fn spawn(state: UiState) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        if !io::stderr().is_terminal() {
            return Self { stop, handle: None };
        }
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let mut spinner: Option<ProgressBar> = None;
            while !flag.load(Ordering::Relaxed) {
                match (render::loading_line(&state.snapshot()), &spinner) {
                    (Some(text), None) => spinner = Some(start_spinner(text)),
                    (None, Some(pb)) => {
                        pb.finish_and_clear();
                        spinner = None;
                    }
                    _ => {}
                }
                thread::sleep(Self::POLL);
            }
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

fn start_spinner(text: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(text);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(cli.debug) {
        eprintln!("failed to initialize logging: {err}");
    }

    let client = EmployeeClient::new(&cli.base_url, UreqTransport::new());
    let indicator = LoadingIndicator::spawn(client.state().clone());
    let mut stdout = io::stdout().lock();
    let result = commands::execute(&client, cli.command, &mut stdout, &mut prompt);
    drop(stdout);
    drop(indicator);

    match render::banner(&client.state().snapshot()) {
        Some(Banner::Error(text)) => eprintln!("{text}"),
        Some(Banner::Notice(text)) => println!("{text}"),
        None => {}
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Request failures were already shown in the banner.
            let shown = err.chain().any(|cause| {
                cause
                    .downcast_ref::<RequestFailure>()
                    .is_some_and(|f| f.is_transport() || f.status_code().is_some())
            });
            if !shown {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
