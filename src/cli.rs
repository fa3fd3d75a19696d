use std::path::Path;
use std::sync::Arc;

use catalog::{Host, HostId, Hosts};
use clap::Subcommand;
use settings::Settings;
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::sync::watch;

use crate::dispatch;
use crate::error::Error;

#[derive(Subcommand)]
pub enum Command {
    /// List hosts, optionally filtered by a search query
    List { query: Vec<String> },
    /// Open a host, picked by index or by a query matching exactly one host
    Open {
        #[arg(required = true)]
        selector: Vec<String>,
    },
    /// Print the comment attached to a host's command
    Comment {
        #[arg(required = true)]
        selector: Vec<String>,
    },
    /// Print the JSON schema of the config file
    Schema,
}

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("No host matches {0:?}")]
    NoMatch(String),

    #[error("{count} hosts match {query:?}, narrow the query or pass an index")]
    Ambiguous { query: String, count: usize },
}

pub fn run(command: Command, config_path: &Path, runtime: &Runtime) -> Result<(), Error> {
    if let Command::Schema = command {
        println!("{}", settings::schema());
        return Ok(());
    }

    let settings = Settings::load_from(config_path)?;
    let hosts = settings.hosts();

    match command {
        Command::List { query } => {
            for (id, host) in hosts.search(&query.join(" ")) {
                println!("{}", list_line(id, host));
            }
        }
        Command::Open { selector } => {
            let (_, host) = select(&hosts, &selector.join(" "))?;
            open(&settings, host, runtime)?;
        }
        Command::Comment { selector } => {
            let (_, host) = select(&hosts, &selector.join(" "))?;
            println!("{}", host.comment);
        }
        Command::Schema => {}
    }

    Ok(())
}

/// Resolves a selector to one host.
///
/// A bare number is taken as an index when it is in range; anything else is
/// a search query that must match exactly one host.
pub fn select<'a>(hosts: &'a Hosts, selector: &str) -> Result<(HostId, &'a Host), SelectError> {
    if let Ok(index) = selector.trim().parse::<usize>() {
        let id = HostId::from_index(index);
        if let Some(host) = hosts.get(id) {
            return Ok((id, host));
        }
    }

    let mut matches = hosts.search(selector);
    match (matches.next(), matches.count()) {
        (None, _) => Err(SelectError::NoMatch(selector.to_string())),
        (Some(found), 0) => Ok(found),
        (Some(_), rest) => Err(SelectError::Ambiguous {
            query: selector.to_string(),
            count: rest + 1,
        }),
    }
}

fn list_line(id: HostId, host: &Host) -> String {
    let mut line = format!("{:>3}  {}", id.index(), host.title());

    match (&host.user, &host.ip) {
        (Some(user), Some(ip)) => line.push_str(&format!("  {user}@{ip}")),
        (None, Some(ip)) => line.push_str(&format!("  {ip}")),
        _ => {}
    }

    if !host.comment.is_empty() {
        line.push_str("  [comment]");
    }

    line
}

/// Dispatches the host's command and waits for the handshake to finish.
/// Ctrl-C cancels a dispatch that is still waiting on the terminal.
fn open(settings: &Settings, host: &Host, runtime: &Runtime) -> Result<(), Error> {
    let dispatcher = dispatch::from_settings(settings, Arc::default());
    let (trigger, cancel) = watch::channel(false);

    runtime.block_on(async {
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                trigger.send_replace(true);
            }
        });

        log::info!("opening {}", host.title());
        let result = dispatcher.dispatch(&host.cmd, &cancel).await;
        ctrl_c.abort();
        result
    })?;

    Ok(())
}
