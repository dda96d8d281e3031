//! Measure how long code takes and aggregate named measurements.
//!
//! A [`Timer`] measures a region with [`Timer::start`]/[`Timer::stop`], a
//! scope guard ([`Timer::scoped`]) or a wrapped closure ([`Timer::wrap`]).
//! Named timers record every measurement into a [`Timers`] registry, the
//! process-wide one unless configured otherwise:
//!
//! ```
//! use codetimer::{Timer, Timers};
//!
//! let timers = Timers::new();
//! let mut timer = Timer::builder().name("sum").timers(timers.clone()).build();
//!
//! let sum: u64 = timer.time(|| (1..=1_000).sum())?;
//!
//! assert_eq!(sum, 500_500);
//! assert_eq!(timers.count("sum")?, 1);
//! # Ok::<(), codetimer::TimerError>(())
//! ```

pub mod error;
pub mod registry;
pub mod sink;
pub mod telemetry;
pub mod timer;
pub mod utils;

pub use self::error::{Result, TimerError};
pub use self::registry::{Summary, TimerRegistry, Timers, Totals};
pub use self::sink::{Level, ReportSink, TracingSink};
pub use self::timer::{ReportFormat, Timer, TimerBuilder, TimerGuard};
