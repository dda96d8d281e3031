//! Named timer registry: running totals plus the full history of recorded
//! durations for every timer name.

mod shared;
pub use self::shared::Timers;

use crate::{
    error::{Result, TimerError},
    utils,
};
use std::{collections::HashMap, fmt, ops::Index};
use tracing::trace;

// used by min/max/mean/median when a present history has no values
const EMPTY_FALLBACK: &[f64] = &[0.0];

/// Accumulated timings keyed by timer name.
///
/// Values only enter through [`TimerRegistry::add`], which keeps the total and
/// the history of a name in step. Totals can be read by key but never
/// assigned:
///
/// ```
/// let mut registry = codetimer::TimerRegistry::new();
/// registry.add("load", 1.5);
/// assert_eq!(registry["load"], 1.5);
/// ```
///
/// ```compile_fail
/// let mut registry = codetimer::TimerRegistry::new();
/// registry.add("load", 1.5);
/// registry["load"] = 3.0;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    totals: HashMap<String, f64>,
    history: HashMap<String, Vec<f64>>,
}

impl TimerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timing value for the given timer
    pub fn add(&mut self, name: &str, value: f64) {
        trace!(timer = name, value, "recording timing");

        self.history.entry(name.to_string()).or_default().push(value);
        *self.totals.entry(name.to_string()).or_insert(0.0) += value;
    }

    /// Remove all timers
    pub fn clear(&mut self) {
        self.totals.clear();
        self.history.clear();
    }

    /// Apply a function to the recorded values of one named timer
    /// # Errors
    /// Will return `TimerError::UnknownTimer` if nothing was recorded for `name`
    pub fn apply<F, T>(&self, name: &str, func: F) -> Result<T>
    where
        F: FnOnce(&[f64]) -> T,
    {
        self.history
            .get(name)
            .map(|values| func(values))
            .ok_or_else(|| TimerError::UnknownTimer(name.to_string()))
    }

    /// Number of timings
    pub fn count(&self, name: &str) -> Result<usize> {
        self.apply(name, <[f64]>::len)
    }

    /// Total time recorded for a timer
    pub fn total(&self, name: &str) -> Result<f64> {
        self.totals
            .get(name)
            .copied()
            .ok_or_else(|| TimerError::UnknownTimer(name.to_string()))
    }

    pub fn min(&self, name: &str) -> Result<f64> {
        self.apply(name, |values| utils::min(or_zero(values)))
    }

    pub fn max(&self, name: &str) -> Result<f64> {
        self.apply(name, |values| utils::max(or_zero(values)))
    }

    pub fn mean(&self, name: &str) -> Result<f64> {
        self.apply(name, |values| utils::mean(or_zero(values)))
    }

    pub fn median(&self, name: &str) -> Result<f64> {
        self.apply(name, |values| utils::median(or_zero(values)))
    }

    /// Sample standard deviation, `NaN` when fewer than two timings exist
    pub fn stdev(&self, name: &str) -> Result<f64> {
        self.apply(name, utils::stdev)
    }

    /// All statistics of a timer at once
    pub fn summary(&self, name: &str) -> Result<Summary> {
        Ok(Summary {
            name: name.to_string(),
            count: self.count(name)?,
            total: self.total(name)?,
            min: self.min(name)?,
            max: self.max(name)?,
            mean: self.mean(name)?,
            median: self.median(name)?,
            stdev: self.stdev(name)?,
        })
    }

    /// Recorded values in recording order
    #[must_use]
    pub fn history(&self, name: &str) -> Option<&[f64]> {
        self.history.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn totals(&self) -> Totals<'_> {
        Totals {
            inner: &self.totals,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.history.contains_key(name)
    }

    /// Timer names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.history.keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Index<&str> for TimerRegistry {
    type Output = f64;

    /// # Panics
    /// Panics if nothing was recorded for `name`
    fn index(&self, name: &str) -> &f64 {
        &self.totals[name]
    }
}

fn or_zero(values: &[f64]) -> &[f64] {
    if values.is_empty() {
        EMPTY_FALLBACK
    } else {
        values
    }
}

/// Read-only view of the running totals
#[derive(Debug, Clone, Copy)]
pub struct Totals<'a> {
    inner: &'a HashMap<String, f64>,
}

impl<'a> Totals<'a> {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.inner.get(name).copied()
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.inner.iter().map(|(name, total)| (name.as_str(), *total))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Statistics of a single named timer
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub name: String,
    pub count: usize,
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: count={} total={:.4}s min={:.4}s max={:.4}s mean={:.4}s median={:.4}s stdev={:.4}s",
            self.name,
            self.count,
            self.total,
            self.min,
            self.max,
            self.mean,
            self.median,
            self.stdev
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn registry_with(name: &str, values: &[f64]) -> TimerRegistry {
        let mut registry = TimerRegistry::new();
        for value in values {
            registry.add(name, *value);
        }
        registry
    }

    #[test]
    fn test_add_accumulates() -> Result<()> {
        let registry = registry_with("load", &[0.5, 0.25, 1.0]);

        assert_eq!(registry.total("load")?, 1.75);
        assert_eq!(registry.count("load")?, 3);
        assert_eq!(registry["load"], 1.75);
        assert_eq!(registry.history("load"), Some(&[0.5, 0.25, 1.0][..]));

        Ok(())
    }

    #[test]
    fn test_total_matches_history_sum() -> Result<()> {
        let values = [0.1, 0.2, 0.3, 0.7, 1.3];
        let registry = registry_with("sum", &values);

        let sum: f64 = registry.apply("sum", |v| v.iter().sum())?;
        assert_eq!(registry.total("sum")?, sum);

        Ok(())
    }

    #[test]
    fn test_statistics() -> Result<()> {
        let registry = registry_with("io", &[4.0, 1.0, 3.0, 2.0]);

        assert_eq!(registry.min("io")?, 1.0);
        assert_eq!(registry.max("io")?, 4.0);
        assert_eq!(registry.mean("io")?, 2.5);
        assert_eq!(registry.median("io")?, 2.5);
        assert!((registry.stdev("io")? - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);

        Ok(())
    }

    #[test]
    fn test_stdev_single_value_is_nan() -> Result<()> {
        let registry = registry_with("once", &[0.3]);

        assert!(registry.stdev("once")?.is_nan());
        assert_eq!(registry.median("once")?, 0.3);

        Ok(())
    }

    #[test]
    fn test_unknown_timer() {
        let registry = registry_with("known", &[1.0]);
        let unknown = TimerError::UnknownTimer("missing".to_string());

        assert_eq!(registry.count("missing"), Err(unknown.clone()));
        assert_eq!(registry.total("missing"), Err(unknown.clone()));
        assert_eq!(registry.min("missing"), Err(unknown.clone()));
        assert_eq!(registry.max("missing"), Err(unknown.clone()));
        assert_eq!(registry.mean("missing"), Err(unknown.clone()));
        assert_eq!(registry.median("missing"), Err(unknown.clone()));
        assert_eq!(registry.stdev("missing"), Err(unknown.clone()));
        assert_eq!(registry.summary("missing"), Err(unknown));
    }

    #[test]
    fn test_empty_history_falls_back_to_zero() -> Result<()> {
        let mut registry = TimerRegistry::new();
        registry.history.insert("empty".to_string(), Vec::new());
        registry.totals.insert("empty".to_string(), 0.0);

        assert_eq!(registry.count("empty")?, 0);
        assert_eq!(registry.total("empty")?, 0.0);
        assert_eq!(registry.min("empty")?, 0.0);
        assert_eq!(registry.max("empty")?, 0.0);
        assert_eq!(registry.mean("empty")?, 0.0);
        assert_eq!(registry.median("empty")?, 0.0);
        assert!(registry.stdev("empty")?.is_nan());

        Ok(())
    }

    #[test]
    fn test_clear() -> Result<()> {
        let mut registry = registry_with("a", &[1.0, 2.0]);
        registry.add("b", 3.0);
        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.totals().is_empty());
        assert_eq!(
            registry.count("a"),
            Err(TimerError::UnknownTimer("a".to_string()))
        );

        registry.add("a", 0.5);
        assert_eq!(registry.count("a")?, 1);
        assert_eq!(registry.total("a")?, 0.5);

        Ok(())
    }

    #[test]
    fn test_totals_view() {
        let mut registry = registry_with("b", &[1.0]);
        registry.add("a", 2.0);
        registry.add("a", 2.0);

        let totals = registry.totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("a"), Some(4.0));
        assert!(totals.contains_key("b"));
        assert_eq!(totals.get("c"), None);

        let mut pairs: Vec<(&str, f64)> = totals.iter().collect();
        pairs.sort_by(|x, y| x.0.cmp(y.0));
        assert_eq!(pairs, vec![("a", 4.0), ("b", 1.0)]);

        assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_summary() -> Result<()> {
        let registry = registry_with("parse", &[1.0, 3.0]);
        let summary = registry.summary("parse")?;

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 4.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.median, 2.0);
        assert!(summary.to_string().starts_with("parse: count=2 total=4.0000s"));

        Ok(())
    }
}
