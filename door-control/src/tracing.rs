//! Provide tracing, tailored to this program.
//!
//! At startup, each binary calls one of the init_* functions to install a
//! tracing subscriber (i.e., something that emits events to a log).
//!
//! The rest of program can include `use crate::tracing::prelude::*` for
//! convenient access to the `trace!()`, `debug!()`, `info!()`, `warn!()`, and
//! `error!()` macros.

use std::env;
use time::OffsetDateTime;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{format::Writer, time::FormatTime},
    prelude::*,
};

pub mod prelude {
    #[allow(unused_imports)]
    pub use tracing::{debug, error, info, trace, warn};
}

use prelude::*;

/// Initialize logging for a line-oriented program.
///
/// If running under systemd, use journald; otherwise fall back to stderr so
/// stdout carries only the status line.
pub fn init_journald_or_stderr() {
    if running_under_systemd() {
        if let Ok(layer) = tracing_journald::layer() {
            tracing_subscriber::registry().with(layer).init();
        } else {
            use_stderr();
            error!("Failed to initialize journald logging, using stderr.");
        }
    } else {
        use_stderr();
    }
}

/// Initialize logging for a full-screen program.
///
/// Anything written to the terminal would corrupt the display, so events go
/// to journald when running under systemd and are discarded otherwise.
pub fn init_journald_only() {
    if running_under_systemd() {
        if let Ok(layer) = tracing_journald::layer() {
            tracing_subscriber::registry().with(layer).init();
        }
    }
}

fn running_under_systemd() -> bool {
    env::var("JOURNAL_STREAM").is_ok()
}

// Log to stderr, filtering according to environment variable RUST_LOG,
// overriding the default level (ERROR) to WARN. A successful send logs at
// INFO, which would otherwise echo the status line.
fn use_stderr() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("RUST_LOG")
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(LocalTimer),
        )
        .init();
}

// Provide our own timer that formats timestamps in local time and to the
// nearest second. The default timer was in UTC and formatted timestamps as an
// long, ugly string.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now =
            OffsetDateTime::now_local().unwrap_or(OffsetDateTime::now_utc());
        let stamp = now
            .format(time::macros::format_description!(
                "[hour]:[minute]:[second]"
            ))
            .map_err(|_| std::fmt::Error)?;
        write!(w, "{stamp}")
    }
}
