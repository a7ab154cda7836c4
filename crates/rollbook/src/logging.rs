//! Log output for rollbook.
//!
//! Logs go to stderr so that stdout carries only command output, which keeps
//! `--json` output pipeable. The events users act on come from the record
//! store: seed fallbacks, skipped records, backups and failed writes. Those are
//! logged at the requested level. Backend chatter from `rollbook::blob` (opening
//! databases, individual reads and writes) stays one step quieter.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much log output to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Store events at info, backends at warn.
    #[default]
    Normal,
    /// Store events at debug, backends at info.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Map the `-v` count and `-q` flag; `-q` wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Level for the record store and everything outside `rollbook::blob`.
    #[must_use]
    pub fn store_level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Level for the blob store backends.
    #[must_use]
    pub fn blob_level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// `EnvFilter` directives for this verbosity.
    #[must_use]
    pub fn directives(self) -> String {
        format!(
            "rollbook={},rollbook::blob={}",
            self.store_level(),
            self.blob_level()
        )
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, replaces the directives derived from `verbosity`.
/// Targets are shown from [`Verbosity::Verbose`] up. Calling this again after
/// a subscriber is installed has no effect.
///
/// # Examples
///
/// ```no_run
/// use rollbook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    let output = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbosity >= Verbosity::Verbose);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init();
}
