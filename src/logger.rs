//! Tracing subscriber setup.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "dirlist=info";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// No subscriber; used by the terminal UI when no log file is given.
    Off,
}

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber for `target`.
///
/// A second call is a no-op: the first subscriber stays in place.
pub fn init_logger(target: &LogTarget) -> std::io::Result<()> {
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::registry()
                .with(build_filter())
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init();
        }
        LogTarget::File(path) => {
            let file = File::create(path)?;
            let _ = tracing_subscriber::registry()
                .with(build_filter())
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .try_init();
        }
    }
    Ok(())
}
