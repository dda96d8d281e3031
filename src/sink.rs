//! Destinations for timer reports.

use std::fmt;
use strum::{Display, EnumString, IntoStaticStr};

/// Receives the formatted report of a stopped timer
pub trait ReportSink {
    /// Label describing where reports go, available to templates as `{level}`
    fn level(&self) -> &str;

    fn report(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Level {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => Self::TRACE,
            Level::Debug => Self::DEBUG,
            Level::Info => Self::INFO,
            Level::Warn => Self::WARN,
            Level::Error => Self::ERROR,
        }
    }
}

/// Emits reports as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl ReportSink for TracingSink {
    fn level(&self) -> &str {
        self.level.as_str()
    }

    fn report(&self, message: &str) {
        // tracing needs the level at compile time
        match self.level {
            Level::Trace => tracing::trace!(target: "codetimer", "{message}"),
            Level::Debug => tracing::debug!(target: "codetimer", "{message}"),
            Level::Info => tracing::info!(target: "codetimer", "{message}"),
            Level::Warn => tracing::warn!(target: "codetimer", "{message}"),
            Level::Error => tracing::error!(target: "codetimer", "{message}"),
        }
    }
}

/// Sink backed by a closure, see [`from_fn`]
pub struct FnSink<F> {
    label: String,
    func: F,
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").field("label", &self.label).finish()
    }
}

impl<F> ReportSink for FnSink<F>
where
    F: Fn(&str),
{
    fn level(&self) -> &str {
        &self.label
    }

    fn report(&self, message: &str) {
        (self.func)(message);
    }
}

/// Creates a sink calling `func` with every report
pub fn from_fn<F>(label: impl Into<String>, func: F) -> FnSink<F>
where
    F: Fn(&str),
{
    FnSink {
        label: label.into(),
        func,
    }
}
