// src/log.rs
use std::fmt;
use std::fs::OpenOptions;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing_subscriber::{
    fmt::{format::Writer, time::FormatTime, writer::BoxMakeWriter},
    EnvFilter,
};

use crate::config::options::LogOptions;
use crate::error::Result;
use crate::file::ensure_directory;

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// `[hh:mm:ss.mmm]` since the subscriber was installed.
struct Elapsed;

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", fmt_elapsed(start().elapsed().as_millis()))
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `opts.level`.
/// Calling this twice is harmless; the first subscriber stays.
pub fn init(opts: &LogOptions) -> Result<()> {
    start();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&opts.level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::consts::LOG_LEVEL));

    let writer = match &opts.file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                ensure_directory(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Elapsed)
        .with_target(false)
        .with_ansi(opts.file.is_none())
        .with_writer(writer)
        .try_init();
    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
    Ok(())
}
