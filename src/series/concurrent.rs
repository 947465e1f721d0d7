use parking_lot::RwLock;

use crate::ds::SampleId;
use crate::error::ConfigError;
use crate::traits::{Score, Timestamp};

use super::{Order, Sample, SelectiveSeries};

/// Thread-safe [`SelectiveSeries`] behind a `parking_lot::RwLock`.
///
/// Mutations take the write lock; lookups take the read lock and hand the
/// borrowed result to a closure, or return owned clones.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use samplekit::series::ConcurrentSelectiveSeries;
///
/// let series = Arc::new(ConcurrentSelectiveSeries::<u32>::new(64));
/// let handles: Vec<_> = (0..4u32)
///     .map(|t| {
///         let series = Arc::clone(&series);
///         thread::spawn(move || {
///             for i in 0..8u32 {
///                 series.insert(t * 100 + i, u64::from(t * 100 + i), 1.0);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(series.len(), 32);
/// assert!(series.read_with(|s| s.check_invariants().is_ok()));
/// ```
#[derive(Debug)]
pub struct ConcurrentSelectiveSeries<V, T = u64, S = f32> {
    inner: RwLock<SelectiveSeries<V, T, S>>,
}

impl<V, T, S> ConcurrentSelectiveSeries<V, T, S>
where
    T: Timestamp,
    S: Score,
{
    pub fn new(capacity: usize) -> Self {
        Self::from_series(SelectiveSeries::new(capacity))
    }

    pub fn with_order(capacity: usize, order: Order) -> Self {
        Self::from_series(SelectiveSeries::with_order(capacity, order))
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        SelectiveSeries::try_new(capacity).map(Self::from_series)
    }

    pub fn add(&self, value: V) -> usize {
        let mut series = self.inner.write();
        series.add(value)
    }

    pub fn add_at(&self, value: V, timestamp: T) -> usize {
        let mut series = self.inner.write();
        series.add_at(value, timestamp)
    }

    pub fn add_scored(&self, value: V, timestamp: T, score: S) -> usize {
        let mut series = self.inner.write();
        series.add_scored(value, timestamp, score)
    }

    pub fn push(&self, value: V, timestamp: T, score: S) -> bool {
        let mut series = self.inner.write();
        series.push(value, timestamp, score)
    }

    pub fn insert(&self, value: V, timestamp: T, score: S) -> bool {
        let mut series = self.inner.write();
        series.insert(value, timestamp, score)
    }

    pub fn remove(&self, id: SampleId) -> bool {
        let mut series = self.inner.write();
        series.remove(id)
    }

    pub fn rescore_dirty<F>(&self, score_fn: F) -> usize
    where
        F: FnMut(&V, &T) -> S,
    {
        let mut series = self.inner.write();
        series.rescore_dirty(score_fn)
    }

    pub fn clear(&self) {
        let mut series = self.inner.write();
        series.clear();
    }

    /// Runs `f` on the worst sample under the read lock.
    pub fn worst_with<R>(&self, f: impl FnOnce(&Sample<V, T, S>) -> R) -> Option<R> {
        let series = self.inner.read();
        series.worst().map(f)
    }

    /// Owned copies of [`SelectiveSeries::best`].
    pub fn best_cloned(&self, n: usize) -> Vec<Sample<V, T, S>>
    where
        V: Clone,
    {
        let series = self.inner.read();
        series.best(n).into_iter().cloned().collect()
    }

    pub fn find_closest_time_cloned(&self, timestamp: T) -> Option<Sample<V, T, S>>
    where
        V: Clone,
    {
        let series = self.inner.read();
        series.find_closest_time(timestamp).cloned()
    }

    /// Merges a snapshot of `other` into this series.
    ///
    /// `other` is cloned under its read lock before this series is locked, so
    /// the two locks are never held together. Merging a series into itself
    /// is therefore safe and inserts nothing.
    pub fn merge_from(&self, other: &ConcurrentSelectiveSeries<V, T, S>) -> usize
    where
        V: Clone + PartialEq,
    {
        let snapshot = other.inner.read().clone();
        let mut series = self.inner.write();
        series.merge(&snapshot)
    }
}

impl<V, T, S> ConcurrentSelectiveSeries<V, T, S> {
    pub fn from_series(series: SelectiveSeries<V, T, S>) -> Self {
        Self {
            inner: RwLock::new(series),
        }
    }

    pub fn into_inner(self) -> SelectiveSeries<V, T, S> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        let series = self.inner.read();
        series.len()
    }

    pub fn is_empty(&self) -> bool {
        let series = self.inner.read();
        series.is_empty()
    }

    pub fn capacity(&self) -> usize {
        let series = self.inner.read();
        series.capacity()
    }

    pub fn dirty(&self) -> usize {
        let series = self.inner.read();
        series.dirty()
    }

    pub fn reset_dirty(&self) {
        let mut series = self.inner.write();
        series.reset_dirty();
    }

    /// Runs `f` with shared access to the whole series.
    pub fn read_with<R>(&self, f: impl FnOnce(&SelectiveSeries<V, T, S>) -> R) -> R {
        let series = self.inner.read();
        f(&series)
    }

    /// Runs `f` with exclusive access to the whole series.
    pub fn write_with<R>(&self, f: impl FnOnce(&mut SelectiveSeries<V, T, S>) -> R) -> R {
        let mut series = self.inner.write();
        f(&mut series)
    }
}

impl<V, T, S> From<SelectiveSeries<V, T, S>> for ConcurrentSelectiveSeries<V, T, S> {
    fn from(series: SelectiveSeries<V, T, S>) -> Self {
        Self::from_series(series)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn concurrent_series_basic_ops() {
        let series: ConcurrentSelectiveSeries<u32> = ConcurrentSelectiveSeries::new(2);
        assert_eq!(series.add(1), 1);
        assert!(series.push(2, 5, 0.5));
        assert_eq!(series.len(), 2);
        assert_eq!(series.capacity(), 2);
        assert_eq!(series.dirty(), 1);

        assert_eq!(series.worst_with(|s| s.value), Some(2));
        assert!(series.insert(3, 3, 0.1));
        let values = series.read_with(|s| s.iter().map(|x| x.value).collect::<Vec<_>>());
        assert_eq!(values, vec![1, 3]);

        let best = series.best_cloned(1);
        assert_eq!(best, vec![Sample::new(1, 0, 0.0)]);

        let id = series.read_with(|s| s.id_at(0)).unwrap();
        assert!(series.remove(id));
        assert!(!series.remove(id));

        series.reset_dirty();
        assert_eq!(series.dirty(), 0);
        series.clear();
        assert!(series.is_empty());
    }

    #[test]
    fn try_new_rejects_zero_capacity() {
        assert!(ConcurrentSelectiveSeries::<u32>::try_new(0).is_err());
    }

    #[test]
    fn merge_from_self_is_a_no_op() {
        let series: ConcurrentSelectiveSeries<u32> = ConcurrentSelectiveSeries::new(4);
        series.add_scored(1, 0, 0.5);
        series.add_scored(2, 1, 0.7);
        assert_eq!(series.merge_from(&series), 0);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn merge_from_other() {
        let ours: ConcurrentSelectiveSeries<u32> = ConcurrentSelectiveSeries::new(4);
        ours.add_scored(1, 0, 0.5);
        let theirs: ConcurrentSelectiveSeries<u32> =
            ConcurrentSelectiveSeries::with_order(4, Order::Reverse);
        theirs.add_scored(2, 3, 0.2);
        theirs.add_scored(3, 7, 0.2);

        assert_eq!(ours.merge_from(&theirs), 2);
        let inner = ours.into_inner();
        let timestamps: Vec<u64> = inner.iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![0, 3, 7]);
    }

    #[test]
    fn parallel_inserts_keep_invariants() {
        let series = Arc::new(ConcurrentSelectiveSeries::<u32>::new(16));
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let series = Arc::clone(&series);
                thread::spawn(move || {
                    for i in 0..50u32 {
                        let score = ((t * 31 + i * 17) % 97) as f32;
                        series.insert(i, u64::from(i * 4 + t), score);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(series.len(), 16);
        series.read_with(|s| s.debug_validate_invariants());
    }

    #[test]
    fn write_with_exposes_full_api() {
        let series: ConcurrentSelectiveSeries<u32> = ConcurrentSelectiveSeries::new(4);
        series.add(10);
        series.add(20);
        let scored = series.write_with(|s| s.rescore_dirty(|v, _| *v as f32));
        assert_eq!(scored, 2);
        assert_eq!(series.find_closest_time_cloned(1).map(|s| s.score), Some(20.0));
    }
}
