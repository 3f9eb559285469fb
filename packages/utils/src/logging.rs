//! Process-wide logging setup.
//!
//! A [`LoggingConfig`] is three plain strings (level, format, tags) as they come
//! from the cli, env or config file. Nothing is installed until all three parse,
//! and the global subscriber is installed at most once per process.
//! [`LoggingConfig::subscriber`] builds the same subscriber without installing it,
//! for callers that want to scope it themselves.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{level_filters::LevelFilter, Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{
        format::{Format, Writer},
        FmtContext, FormatEvent, FormatFields, MakeWriter,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    EnvFilter,
};

use crate::error::LoggingError;

pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`
    pub level: String,
    /// `json` or `text` (`none` is accepted as an alias of `json`)
    pub format: String,
    /// Comma-separated `name:value` pairs attached to every line
    pub tags: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text.to_string(),
            tags: String::new(),
        }
    }
}

impl LoggingConfig {
    pub fn new(level: impl ToString, format: impl ToString, tags: impl ToString) -> Self {
        Self {
            level: level.to_string(),
            format: format.to_string(),
            tags: tags.to_string(),
        }
    }

    pub fn parse(&self) -> Result<(LogLevel, LogFormat, LogTags), LoggingError> {
        Ok((self.level.parse()?, self.format.parse()?, self.tags.parse()?))
    }

    /// Builds the subscriber, writing to `make_writer`, without installing it
    pub fn subscriber<W>(&self, make_writer: W) -> Result<BoxedSubscriber, LoggingError>
    where
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        let (level, format, tags) = self.parse()?;

        // RUST_LOG directives still apply, the configured level overrides the global one
        let filter = EnvFilter::from_default_env().add_directive(LevelFilter::from(level.0).into());

        let registry = tracing_subscriber::registry().with(filter);

        Ok(match format {
            LogFormat::Text => Box::new(
                registry.with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(make_writer)
                        .event_format(TaggedFormat {
                            inner: Format::default()
                                .with_target(false)
                                .with_file(true)
                                .with_line_number(true),
                            format,
                            tags,
                        }),
                ),
            ),
            LogFormat::Json => Box::new(
                registry.with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(make_writer)
                        .event_format(TaggedFormat {
                            inner: Format::default()
                                .json()
                                .with_current_span(false)
                                .with_file(true)
                                .with_line_number(true),
                            format,
                            tags,
                        }),
                ),
            ),
        })
    }

    /// Installs the logger writing to stdout as the process-wide default.
    /// Fails without side effects if any of the inputs don't parse.
    pub fn init(&self) -> Result<(), LoggingError> {
        let subscriber = self.subscriber(std::io::stdout)?;

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|_| LoggingError::AlreadyInstalled)?;

        tracing::debug!(
            "Logging initialized with level {}, format {}",
            self.level,
            self.format
        );

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_str(s)
            .map(LogLevel)
            .map_err(|_| LoggingError::InvalidLevel(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" | "none" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Text => write!(f, "text"),
        }
    }
}

/// Fixed key/value pairs attached to every log line, in the order given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogTags(Vec<(String, String)>);

impl LogTags {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for LogTags {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }

        s.split(',')
            .enumerate()
            .map(|(index, pair)| match pair.split(':').collect::<Vec<_>>()[..] {
                [key, value] => Ok((key.to_string(), value.to_string())),
                _ => Err(LoggingError::InvalidTag(index)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(LogTags)
    }
}

// prefixes text lines with `key=value` pairs, or adds top-level fields to json lines.
// A json tag whose key is already taken by the line itself is written as `tag.<key>`
struct TaggedFormat<F> {
    inner: F,
    format: LogFormat,
    tags: LogTags,
}

impl<S, N, F> FormatEvent<S, N> for TaggedFormat<F>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    F: FormatEvent<S, N>,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if self.tags.is_empty() {
            return self.inner.format_event(ctx, writer, event);
        }

        match self.format {
            LogFormat::Text => {
                for (key, value) in self.tags.iter() {
                    write!(writer, "{key}={value} ")?;
                }
                self.inner.format_event(ctx, writer, event)
            }
            LogFormat::Json => {
                let mut line = String::new();
                self.inner
                    .format_event(ctx, Writer::new(&mut line), event)?;

                let mut value: serde_json::Value =
                    serde_json::from_str(&line).map_err(|_| fmt::Error)?;

                if let Some(object) = value.as_object_mut() {
                    for (key, tag) in self.tags.iter() {
                        let key = if object.contains_key(key) {
                            format!("tag.{key}")
                        } else {
                            key.to_string()
                        };
                        object.insert(key, serde_json::Value::String(tag.to_string()));
                    }
                }

                writeln!(writer, "{value}")
            }
        }
    }
}
