//! Log setup for the CLI and native hosts.
//!
//! `RUST_LOG` wins when set. Otherwise the crate logs at `info` (or `debug` when
//! the CLI is run with `--verbose`) and dependencies at `warn`.
//! `WALLETCARD_LOG_FORMAT` picks the output: `pretty` (default), `compact`, or `json`.

use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG_FORMAT: &str = "WALLETCARD_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to pretty output.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" | "1" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }

    pub fn from_env() -> Self {
        std::env::var(ENV_LOG_FORMAT).map(|raw| Self::parse(&raw)).unwrap_or_default()
    }
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,walletcard={}", level)
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let builder = fmt::Subscriber::builder().with_env_filter(env_filter).with_writer(std::io::stderr);

    let _ = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
