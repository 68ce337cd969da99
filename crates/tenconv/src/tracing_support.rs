//! Structured logging setup for applications built on TenConv
//!
//! The library crates log through the `log` facade. Installing a subscriber with
//! [`init_tracing`] routes those records (via `tracing-log`) together with any `tracing`
//! events into one formatted stream.
//!
//! # Example
//!
//! ```ignore
//! use tenconv::tracing_support::{init_tracing, TracingConfig, TracingFormat};
//!
//! init_tracing(TracingConfig {
//!     format: TracingFormat::Compact,
//!     filter: "tenconv_kernels=trace,info".to_string(),
//!     ..TracingConfig::default()
//! })?;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., `RUST_LOG=tenconv_kernels=debug`)
//! - `TENCONV_LOG_FORMAT`: Set output format (`json`, `compact` or `pretty`, default: `pretty`)

use anyhow::Result;
#[cfg(feature = "tracing")]
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "tenconv_kernels=info,warn";

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingFormat {
    /// Pretty-printed human-readable format
    #[default]
    Pretty,
    /// JSON format for structured logging
    Json,
    /// Compact format (single line per event)
    Compact,
}

impl TracingFormat {
    /// Parse from string, falling back to [`TracingFormat::Pretty`]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => TracingFormat::Json,
            "compact" => TracingFormat::Compact,
            _ => TracingFormat::Pretty,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output format
    pub format: TracingFormat,
    /// Filter directive (e.g., "tenconv_kernels=debug,info")
    pub filter: String,
    /// Enable ANSI colors
    pub with_ansi: bool,
    /// Show target module paths
    pub with_target: bool,
    /// Show file locations
    pub with_file: bool,
    /// Show line numbers
    pub with_line_number: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var("TENCONV_LOG_FORMAT")
            .map(|s| TracingFormat::parse(&s))
            .unwrap_or_default();
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_target: true,
            with_file: false,
            with_line_number: false,
        }
    }
}

/// Formatting layer for `config`, without the filter
#[cfg(feature = "tracing")]
fn format_layer(config: &TracingConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    // escape codes would end up inside JSON string values
    let ansi = config.with_ansi && config.format != TracingFormat::Json;
    let base = fmt::layer()
        .with_ansi(ansi)
        .with_target(config.with_target)
        .with_file(config.with_file)
        .with_line_number(config.with_line_number);

    match config.format {
        TracingFormat::Pretty => base.pretty().boxed(),
        TracingFormat::Json => base.json().boxed(),
        TracingFormat::Compact => base.compact().boxed(),
    }
}

/// Install a global subscriber built from `config`
///
/// Call once at application startup. Fails on an invalid filter directive or when a
/// global subscriber is already installed.
#[cfg(feature = "tracing")]
pub fn init_tracing(config: TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;
    tracing_subscriber::registry()
        .with(format_layer(&config).with_filter(filter))
        .try_init()?;

    tracing::debug!(format = ?config.format, filter = %config.filter, "tracing initialised");
    Ok(())
}

/// No-op when the `tracing` feature is disabled
#[cfg(not(feature = "tracing"))]
pub fn init_tracing(_config: TracingConfig) -> Result<()> {
    Ok(())
}
