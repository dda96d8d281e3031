//! Stopwatch with reporting and registry forwarding.

mod builder;
pub use self::builder::TimerBuilder;

mod format;
pub use self::format::FPS_FLOOR;

mod guard;
pub use self::guard::TimerGuard;

use crate::{
    error::{Result, TimerError},
    registry::Timers,
    sink::ReportSink,
};
use std::{fmt, time::Instant};

pub const DEFAULT_TEXT: &str = "[{level}] {name}: {:0.4f} seconds {fps}";

/// How a stopped timer turns the elapsed seconds into a report
pub enum ReportFormat {
    /// Template with `{}`, `{name}`, `{seconds}`, `{milliseconds}`,
    /// `{minutes}`, `{level}` and `{fps}` slots
    Template(String),
    Function(Box<dyn Fn(f64) -> String>),
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self::Template(DEFAULT_TEXT.to_string())
    }
}

impl fmt::Debug for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(text) => f.debug_tuple("Template").field(text).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for ReportFormat {
    fn from(text: &str) -> Self {
        Self::Template(text.to_string())
    }
}

impl From<String> for ReportFormat {
    fn from(text: String) -> Self {
        Self::Template(text)
    }
}

/// Time your code with explicit calls, a scope guard or a wrapped closure.
///
/// ```
/// use codetimer::{Timer, Timers};
///
/// let timers = Timers::new();
/// let mut timer = Timer::builder().name("work").timers(timers.clone()).build();
///
/// timer.start()?;
/// let elapsed = timer.stop()?;
///
/// assert_eq!(timers.total("work")?, elapsed);
/// # Ok::<(), codetimer::TimerError>(())
/// ```
pub struct Timer {
    name: Option<String>,
    text: ReportFormat,
    sink: Option<Box<dyn ReportSink>>,
    show_fps: bool,
    timers: Timers,
    start: Option<Instant>,
    last: f64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("level", &self.sink.as_ref().map(|sink| sink.level()))
            .field("show_fps", &self.show_fps)
            .field("running", &self.is_running())
            .field("last", &self.last)
            .finish()
    }
}

impl Timer {
    /// Unnamed timer reporting through `tracing` at debug level
    #[must_use]
    pub fn new() -> Self {
        TimerBuilder::new().build()
    }

    /// Timer recording into the global registry under `name`
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        TimerBuilder::new().name(name).build()
    }

    #[must_use]
    pub fn builder() -> TimerBuilder {
        TimerBuilder::new()
    }

    /// Start a new timer
    /// # Errors
    /// Will return `TimerError::AlreadyRunning` if the timer was started and not stopped
    pub fn start(&mut self) -> Result<()> {
        if self.start.is_some() {
            return Err(TimerError::AlreadyRunning);
        }

        self.start = Some(Instant::now());

        Ok(())
    }

    /// Stop the timer, report and record the elapsed seconds
    /// # Errors
    /// Will return `TimerError::NotRunning` if the timer was not started
    pub fn stop(&mut self) -> Result<f64> {
        let start = self.start.take().ok_or(TimerError::NotRunning)?;

        self.last = start.elapsed().as_secs_f64();

        if let Some(sink) = &self.sink {
            let text = self.report_text(sink.level());
            sink.report(&text);
        }

        if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            self.timers.add(name, self.last);
        }

        Ok(self.last)
    }

    fn report_text(&self, level: &str) -> String {
        match &self.text {
            ReportFormat::Function(func) => func(self.last),
            ReportFormat::Template(template) => format::render(
                template,
                &format::Fields {
                    name: self.name.as_deref(),
                    seconds: self.last,
                    level,
                    show_fps: self.show_fps,
                },
            ),
        }
    }

    /// Start the timer and stop it when the returned guard goes out of scope
    /// # Errors
    /// Will return `TimerError::AlreadyRunning` if the timer is running
    pub fn scoped(&mut self) -> Result<TimerGuard<'_>> {
        self.start()?;
        Ok(TimerGuard::new(self))
    }

    /// Run `func` once while the timer is running
    /// # Errors
    /// Will return `TimerError::AlreadyRunning` if the timer is running
    pub fn time<F, R>(&mut self, func: F) -> Result<R>
    where
        F: FnOnce() -> R,
    {
        let guard = self.scoped()?;
        let result = func();
        guard.finish()?;

        Ok(result)
    }

    /// Wrap `func` so every call is timed
    pub fn wrap<'a, F, R>(&'a mut self, mut func: F) -> impl FnMut() -> Result<R> + 'a
    where
        F: FnMut() -> R + 'a,
        R: 'a,
    {
        move || self.time(&mut func)
    }

    /// Wrap `func` so every call is timed, forwarding its argument
    ///
    /// ```
    /// use codetimer::{Timer, Timers};
    ///
    /// let timers = Timers::new();
    /// let mut timer = Timer::builder().name("add").timers(timers.clone()).build();
    ///
    /// let mut add = timer.wrap_with(|(a, b): (u32, u32)| a + b);
    /// assert_eq!(add((2, 3))?, 5);
    /// # Ok::<(), codetimer::TimerError>(())
    /// ```
    pub fn wrap_with<'a, A, F, R>(&'a mut self, mut func: F) -> impl FnMut(A) -> Result<R> + 'a
    where
        F: FnMut(A) -> R + 'a,
        A: 'a,
        R: 'a,
    {
        move |arg| self.time(|| func(arg))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Seconds measured by the last completed run, `NaN` before the first one
    #[must_use]
    pub fn last(&self) -> f64 {
        self.last
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    /// Registry this timer records into
    #[must_use]
    pub fn timers(&self) -> &Timers {
        &self.timers
    }
}
