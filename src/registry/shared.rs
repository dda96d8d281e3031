use crate::{
    error::{Result, TimerError},
    registry::{Summary, TimerRegistry},
};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, instrument};

static GLOBAL: Lazy<Timers> = Lazy::new(Timers::new);

/// Shared handle to a [`TimerRegistry`].
///
/// Clones point at the same registry. Every [`Timer`](crate::Timer) built
/// without an explicit registry reports into [`Timers::global`].
#[derive(Debug, Clone, Default)]
pub struct Timers {
    inner: Arc<Mutex<TimerRegistry>>,
}

impl Timers {
    /// Creates a new, private registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    fn lock(&self) -> MutexGuard<'_, TimerRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read-only access to the underlying registry
    ///
    /// `func` runs with the registry locked: it must not call back into this
    /// handle or stop a named [`Timer`](crate::Timer) recording into it, the
    /// lock is not reentrant and would deadlock.
    pub fn read<F, T>(&self, func: F) -> T
    where
        F: FnOnce(&TimerRegistry) -> T,
    {
        func(&self.lock())
    }

    pub fn add(&self, name: &str, value: f64) {
        self.lock().add(name, value);
    }

    #[instrument(skip(self))]
    pub fn clear(&self) {
        let mut registry = self.lock();
        debug!(timers = registry.len(), "clearing timers");
        registry.clear();
    }

    /// Apply a function to a copy of the recorded values, outside the lock
    pub fn apply<F, T>(&self, name: &str, func: F) -> Result<T>
    where
        F: FnOnce(&[f64]) -> T,
    {
        let values = self
            .history(name)
            .ok_or_else(|| TimerError::UnknownTimer(name.to_string()))?;

        Ok(func(&values))
    }

    pub fn count(&self, name: &str) -> Result<usize> {
        self.lock().count(name)
    }

    pub fn total(&self, name: &str) -> Result<f64> {
        self.lock().total(name)
    }

    pub fn min(&self, name: &str) -> Result<f64> {
        self.lock().min(name)
    }

    pub fn max(&self, name: &str) -> Result<f64> {
        self.lock().max(name)
    }

    pub fn mean(&self, name: &str) -> Result<f64> {
        self.lock().mean(name)
    }

    pub fn median(&self, name: &str) -> Result<f64> {
        self.lock().median(name)
    }

    pub fn stdev(&self, name: &str) -> Result<f64> {
        self.lock().stdev(name)
    }

    pub fn summary(&self, name: &str) -> Result<Summary> {
        self.lock().summary(name)
    }

    /// Copy of the recorded values of a timer
    pub fn history(&self, name: &str) -> Option<Vec<f64>> {
        self.lock().history(name).map(<[f64]>::to_vec)
    }

    /// Snapshot of all running totals
    pub fn totals(&self) -> HashMap<String, f64> {
        self.lock()
            .totals()
            .iter()
            .map(|(name, total)| (name.to_string(), total))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().names()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
