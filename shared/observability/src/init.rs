//! Tracing subscriber setup for the connector service binary.

use std::env;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for log shipping
    Json,
    /// Human readable, for local development
    Pretty,
}

impl LogFormat {
    /// Anything other than `json` falls back to pretty output.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub service_name: String,
    pub environment: String,
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// Log span enter/close events
    pub log_spans: bool,
    /// Include file and line in each record
    pub include_location: bool,
}

impl TracingConfig {
    /// Settings for `service_name` from `ENVIRONMENT`, `LOG_FORMAT`,
    /// `RUST_LOG`, `LOG_SPANS` and `LOG_LOCATION`.
    pub fn for_service(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(service_name: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| lookup(key).map(|v| v == "true").unwrap_or(default);

        Self {
            service_name: service_name.into(),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),
            format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(LogFormat::Pretty),
            level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_spans: flag("LOG_SPANS", false),
            include_location: flag("LOG_LOCATION", true),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(config: TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if config.log_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let (json_layer, pretty_layer) = match config.format {
        LogFormat::Json => (
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_events(span_events)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            ),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(
                fmt::layer()
                    .pretty()
                    .with_span_events(span_events)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            ),
        ),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service_name,
            environment = %config.environment,
            format = ?config.format,
            "Tracing initialized"
        );
    }
}
