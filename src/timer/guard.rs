use crate::{error::Result, timer::Timer};
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// Running timer that stops when dropped, see [`Timer::scoped`]
#[must_use = "the timer stops as soon as the guard is dropped"]
pub struct TimerGuard<'a> {
    timer: &'a mut Timer,
    finished: bool,
}

impl<'a> TimerGuard<'a> {
    pub(crate) fn new(timer: &'a mut Timer) -> Self {
        Self {
            timer,
            finished: false,
        }
    }

    /// Stop the timer now and return the elapsed seconds
    /// # Errors
    /// Will return `TimerError::NotRunning` if the timer was stopped through the guard
    pub fn finish(mut self) -> Result<f64> {
        self.finished = true;
        self.timer.stop()
    }
}

impl Deref for TimerGuard<'_> {
    type Target = Timer;

    fn deref(&self) -> &Timer {
        self.timer
    }
}

impl DerefMut for TimerGuard<'_> {
    fn deref_mut(&mut self) -> &mut Timer {
        self.timer
    }
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        if self.timer.is_running() {
            let _ = self.timer.stop();
        } else {
            warn!(
                timer = self.timer.name().unwrap_or("None"),
                "timer was stopped before the end of its scope"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::TimerError, registry::Timers, timer::Timer};
    use anyhow::Result;
    use std::{
        panic::{self, AssertUnwindSafe},
        thread,
        time::Duration,
    };

    fn timer(name: &str, timers: &Timers) -> Timer {
        Timer::builder()
            .name(name)
            .timers(timers.clone())
            .silent()
            .build()
    }

    #[test]
    fn test_guard_stops_on_scope_exit() -> Result<()> {
        let timers = Timers::new();
        let mut timer = timer("scope", &timers);

        {
            let guard = timer.scoped()?;
            assert!(guard.is_running());
            thread::sleep(Duration::from_millis(2));
        }

        assert!(!timer.is_running());
        assert!(timer.last() >= 0.001);
        assert_eq!(timers.count("scope")?, 1);
        assert_eq!(timers.total("scope")?, timer.last());

        Ok(())
    }

    #[test]
    fn test_guard_finish() -> Result<()> {
        let timers = Timers::new();
        let mut timer = timer("finish", &timers);

        let elapsed = timer.scoped()?.finish()?;

        assert_eq!(timer.last(), elapsed);
        assert_eq!(timers.count("finish")?, 1);

        Ok(())
    }

    #[test]
    fn test_guard_while_running() -> Result<()> {
        let timers = Timers::new();
        let mut timer = timer("busy", &timers);

        timer.start()?;
        assert!(matches!(timer.scoped(), Err(TimerError::AlreadyRunning)));
        assert!(timer.is_running());

        timer.stop()?;
        Ok(())
    }

    #[test]
    fn test_guard_stops_on_early_return() -> Result<()> {
        fn work(timer: &mut Timer) -> Result<()> {
            let _guard = timer.scoped()?;
            Err(anyhow::anyhow!("failed halfway"))
        }

        let timers = Timers::new();
        let mut timer = timer("early", &timers);

        assert!(work(&mut timer).is_err());
        assert!(!timer.is_running());
        assert_eq!(timers.count("early")?, 1);

        Ok(())
    }

    #[test]
    fn test_guard_stops_on_panic() -> Result<()> {
        let timers = Timers::new();
        let mut timer = timer("panic", &timers);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = timer.scoped().expect("timer is idle");
            panic!("boom");
        }));

        assert!(result.is_err());
        assert!(!timer.is_running());
        assert_eq!(timers.count("panic")?, 1);

        Ok(())
    }

    #[test]
    fn test_guard_stopped_inside_scope() -> Result<()> {
        let timers = Timers::new();
        let mut timer = timer("manual", &timers);

        {
            let mut guard = timer.scoped()?;
            guard.stop()?;
        }

        assert!(!timer.is_running());
        assert_eq!(timers.count("manual")?, 1);

        Ok(())
    }
}
