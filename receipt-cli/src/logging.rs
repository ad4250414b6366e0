use std::{
    fs::File,
    io::{self, IsTerminal},
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

/// Local-time timestamp, padded level, `file:line`, then the event fields.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} ")?;
        }

        let colour = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        if ansi {
            write!(writer, "{colour}{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{:>5} ", meta.level())?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file.rsplit(['/', '\\']).next().unwrap_or(file);
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn make_filter(
    config: &LoggingConfig,
    override_level: Option<&str>,
) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => configured_filter(config, override_level),
    }
}

/// Filter from `override_level`, falling back to the configured level.
fn configured_filter(
    config: &LoggingConfig,
    override_level: Option<&str>,
) -> Result<EnvFilter> {
    let level = override_level.unwrap_or(&config.level);
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
}

/// Installs the global subscriber. Call once at startup.
///
/// Stdout output is coloured only when attached to a terminal. The log
/// file, if configured, is appended to and never coloured. Level comes from
/// `RUST_LOG`, then `override_level`, then the config.
pub fn init_logging(
    config: &LoggingConfig,
    override_level: Option<&str>,
) -> Result<()> {
    let filter = make_filter(config, override_level)?;

    let stdout_layer = config.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LocalFmt)
            .with_ansi(io::stdout().is_terminal())
            .boxed()
    });

    let file_layer = match &config.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_level_is_rejected() {
        let config = LoggingConfig::default();

        assert!(configured_filter(&config, Some("receipt_core=loudest")).is_err());
        assert!(configured_filter(&config, Some("debug")).is_ok());
    }

    #[test]
    fn override_wins_over_configured_level() {
        let config = LoggingConfig {
            level: "receipt_core=loudest".to_string(),
            ..LoggingConfig::default()
        };

        assert!(configured_filter(&config, None).is_err());
        assert!(configured_filter(&config, Some("warn")).is_ok());
    }
}
