//! Operator console: line-oriented commands read from stdin.

use std::io::BufRead;
use tokio::sync::mpsc;

/// Operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `r`: rebuild the site and restart the server
    Reload,
    /// `q`: stop the server and exit
    Quit,
}

impl Command {
    /// Parse one input line. Surrounding whitespace and case are ignored;
    /// anything other than `r` or `q` is `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "r" => Some(Command::Reload),
            "q" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Read stdin line by line on a dedicated thread.
///
/// Blocking reads stay off the runtime so they never hold up its shutdown.
/// The channel closes at end of input or on a read error; the thread exits
/// once the receiver is dropped and the next line arrives.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);

    let spawned = std::thread::Builder::new()
        .name("sitehost-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "stopped reading stdin");
                        break;
                    }
                }
            }
            tracing::debug!("stdin closed");
        });

    // without a reader the receiver sees end of input right away
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not start stdin reader");
    }

    rx
}
