//! Log setup shared by the `gridboard` binary and tests.
//!
//! [`init_with_level`] installs an `env_logger` writing to stderr, one line
//! per record: `[  0.012s  INFO gridboard_lattice] message`. `RUST_LOG`
//! directives refine the requested level. With the `tracing` feature,
//! [`init_tracing`] installs a `tracing-subscriber` instead.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use env_logger::{Builder, Target};
use log::LevelFilter;

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

static STARTED: OnceLock<Instant> = OnceLock::new();

/// Crate part of a log target (`gridboard_lattice::spacing` -> `gridboard_lattice`).
fn crate_of(target: &str) -> &str {
    target.split("::").next().unwrap_or(target)
}

/// Filter directive used when `RUST_LOG` is unset.
fn default_directive(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

/// Install the stderr logger at `level`.
///
/// Only the first call installs anything; later calls return `Ok(())`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if STARTED.get().is_some() {
        return Ok(());
    }
    let started = *STARTED.get_or_init(Instant::now);

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(Target::Stderr)
        .format(move |buf, record| {
            writeln!(
                buf,
                "[{:7.3}s {:>5} {}] {}",
                started.elapsed().as_secs_f64(),
                record.level(),
                crate_of(record.target()),
                record.args()
            )
        })
        .try_init()
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, or by `level` when
/// `RUST_LOG` is unset. `json` switches to one JSON object per event.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_cut_to_crate_name() {
        assert_eq!(crate_of("gridboard_lattice::spacing"), "gridboard_lattice");
        assert_eq!(crate_of("gridboard"), "gridboard");
    }

    #[test]
    fn default_directive_is_lowercase_level() {
        assert_eq!(default_directive(LevelFilter::Debug), "debug");
        assert_eq!(default_directive(LevelFilter::Off), "off");
    }

    #[test]
    fn second_install_is_a_no_op() {
        assert!(init_with_level(LevelFilter::Warn).is_ok());
        assert!(init_with_level(LevelFilter::Trace).is_ok());
    }
}
