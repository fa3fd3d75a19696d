mod cli;
mod dispatch;
mod error;
mod shuttle;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use settings::Settings;
use shuttle::{Application, UserEvent};
use tokio::runtime::Runtime;
use winit::event_loop::EventLoop;

use crate::error::Error;

#[cfg(not(target_os = "linux"))]
use tray::MenuEvent;

const VERSION: &str = concat!(env!("SHUTTLE_VERSION"), " ", env!("SHUTTLE_BUILD_HASH"));

/// Opens hosts from ~/.shuttle.json in your terminal. Runs as a tray icon
/// when no command is given.
#[derive(Parser)]
#[command(name = "shuttle", version = VERSION, about)]
struct Arguments {
    /// Config file to use instead of ~/.shuttle.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<cli::Command>,
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Arguments) -> Result<(), Error> {
    let config_path = args
        .config
        .or_else(Settings::config_path)
        .ok_or(Error::NoConfigPath)?;

    let runtime = Runtime::new().map_err(Error::Runtime)?;

    match args.command {
        Some(command) => cli::run(command, &config_path, &runtime),
        None => run_tray(config_path, &runtime),
    }
}

fn run_tray(config_path: PathBuf, runtime: &Runtime) -> Result<(), Error> {
    Settings::ensure_config_at(&config_path)?;
    let settings = Settings::load_from(&config_path)?;

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    #[cfg(target_os = "linux")]
    let mut app = {
        shuttle::run_gtk_thread(config_path, settings, runtime.handle().clone(), proxy);
        Application::new(None)
    };

    #[cfg(not(target_os = "linux"))]
    let mut app = {
        MenuEvent::set_event_handler(Some(move |event| {
            let _ = proxy.send_event(UserEvent::MenuEvent(event));
        }));
        Application::new(Some(shuttle::Shuttle::new(
            config_path,
            settings,
            runtime.handle().clone(),
        )))
    };

    event_loop.run_app(&mut app)?;
    Ok(())
}
