use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::LogConfig;

/// Where log lines end up for this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Interactive session: only a configured file may receive output
    Tui,
    /// One-shot command: fall back to stderr
    Cli,
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(config: &LogConfig, target: LogTarget) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = &config.file {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        return Ok(());
    }

    match target {
        // Anything written to the terminal would corrupt the TUI frame
        LogTarget::Tui => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
        LogTarget::Cli => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr)
                .try_init();
        }
    }
    Ok(())
}
