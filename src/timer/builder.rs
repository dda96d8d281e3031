use crate::{
    registry::Timers,
    sink::{ReportSink, TracingSink},
    timer::{ReportFormat, Timer},
};

/// Configures a [`Timer`].
///
/// Defaults: no name, [`DEFAULT_TEXT`](crate::timer::DEFAULT_TEXT) template,
/// reports through [`TracingSink`] at debug level, no fps and the global
/// registry.
pub struct TimerBuilder {
    name: Option<String>,
    text: ReportFormat,
    sink: Option<Box<dyn ReportSink>>,
    show_fps: bool,
    timers: Option<Timers>,
}

impl Default for TimerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            text: ReportFormat::default(),
            sink: Some(Box::new(TracingSink::default())),
            show_fps: false,
            timers: None,
        }
    }

    /// Registry key; unnamed timers are not recorded
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Report template
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = ReportFormat::Template(text.into());
        self
    }

    /// Build the report from the elapsed seconds
    #[must_use]
    pub fn text_fn<F>(mut self, func: F) -> Self
    where
        F: Fn(f64) -> String + 'static,
    {
        self.text = ReportFormat::Function(Box::new(func));
        self
    }

    #[must_use]
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.text = format;
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Do not report, only record
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.sink = None;
        self
    }

    #[must_use]
    pub fn show_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
        self
    }

    /// Record into `timers` instead of the global registry
    #[must_use]
    pub fn timers(mut self, timers: Timers) -> Self {
        self.timers = Some(timers);
        self
    }

    #[must_use]
    pub fn build(self) -> Timer {
        Timer {
            name: self.name,
            text: self.text,
            sink: self.sink,
            show_fps: self.show_fps,
            timers: self.timers.unwrap_or_else(Timers::global),
            start: None,
            last: f64::NAN,
        }
    }
}
