//! Log output for the terminal front-end.
//!
//! The terminal belongs to the UI, so logs go to a file. Without a log file
//! no subscriber is installed and events are discarded.

use std::{fs::File, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber writing to `path`.
///
/// `RUST_LOG` takes precedence over `level`. The file is truncated.
pub fn init(path: &Path, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_events_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podrace.log");

        init(&path, "info").unwrap();
        tracing::info!(race = 41, "race started");
        tracing::debug!("below level");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("race started"));
        assert!(contents.contains("race=41"));
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(!contents.contains("below level"));
        }
    }
}
