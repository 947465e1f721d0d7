//! Fixed-capacity selective time series.
//!
//! Retains, out of an unbounded stream of timestamped and scored samples, the
//! best-scoring `capacity` of them (score 0 is best, larger is worse), while
//! keeping a time-ordered view over whatever is retained.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                 SelectiveSeries<V, T, S>  (capacity = 4)                    │
//! │                                                                             │
//! │   samples: SampleArena            order: OrderIndex (Forward)               │
//! │   ─────────────────────           ─────────────────────────                 │
//! │                                                                             │
//! │   slot  value  ts  score          logical pos:   0    1    2    3           │
//! │   ┌───┬──────┬────┬──────┐                     ┌────┬────┬────┬────┐      │
//! │   │ 0 │  a   │ 4  │ 0.3  │        slot:        │ 2  │ 3  │ 0  │ 1  │      │
//! │   │ 1 │  b   │ 7  │ 0.1  │                     └────┴────┴────┴────┘      │
//! │   │ 2 │  c   │ 1  │ 0.9  │ ← worst               ts: 1    2    4    7      │
//! │   │ 3 │  d   │ 2  │ 0.2  │                                                 │
//! │   └───┴──────┴────┴──────┘                                                 │
//! │                                                                             │
//! │   add(e, ts=8, score=0.5):                                                  │
//! │     1. worst slot = 2 (0.9); 0.5 <= 0.9 so e overwrites slot 2              │
//! │     2. slot 2 sits at logical pos 0; relocate it to the newest end          │
//! │        (positions 0..=3 rotate left by one)                                 │
//! │                                                                             │
//! │        slot:  [ 3 | 0 | 1 | 2 ]     ts: 2, 4, 7, 8                          │
//! │                                                                             │
//! │   insert(f, ts=3, score=0.25):                                              │
//! │     1. worst slot = 2 (0.5); vacated pos = 3                                │
//! │     2. insertion pos for ts=3 = 1 (first ts greater than 3 is 4)            │
//! │     3. only positions 1..=3 rotate right by one                             │
//! │                                                                             │
//! │        slot:  [ 3 | 2 | 0 | 1 ]     ts: 2, 3, 4, 7                          │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`SelectiveSeries`]: the container
//! - [`Sample`]: one `(value, timestamp, score)` triple
//! - [`Order`]: forward (oldest first) or reverse (newest first) iteration
//! - [`Iter`] / [`Entries`]: borrowed iterators in time order
//!
//! ## Operations
//!
//! | Operation                 | Description                                   | Complexity |
//! |---------------------------|-----------------------------------------------|------------|
//! | [`add`] and variants      | Store as newest, evicting the worst when full | O(n)       |
//! | [`insert`]                | Store at its timestamp position               | O(n)       |
//! | [`remove`]                | Drop a sample by handle                       | O(n)       |
//! | [`worst`]                 | Highest-scoring retained sample               | O(n)       |
//! | [`best`]                  | `k` lowest scores, in time order              | O(n·k)     |
//! | [`merge`]                 | Insert every sample of another series         | O(m·n)     |
//! | [`find_by_exact_time`]    | Sample with an exact timestamp                | O(n)       |
//! | [`find_closest_time`]     | Sample nearest to a timestamp                 | O(n)       |
//! | [`iter`] / [`get`]        | Time-ordered access                           | O(1) each  |
//!
//! [`add`]: SelectiveSeries::add
//! [`insert`]: SelectiveSeries::insert
//! [`remove`]: SelectiveSeries::remove
//! [`worst`]: SelectiveSeries::worst
//! [`best`]: SelectiveSeries::best
//! [`merge`]: SelectiveSeries::merge
//! [`find_by_exact_time`]: SelectiveSeries::find_by_exact_time
//! [`find_closest_time`]: SelectiveSeries::find_closest_time
//! [`iter`]: SelectiveSeries::iter
//! [`get`]: SelectiveSeries::get
//!
//! ## Retention Policy
//!
//! - While `len() < capacity()` every sample is stored.
//! - Once full, a new sample replaces the worst retained one (first maximum
//!   in slot order) unless its score is strictly worse; on equal scores the
//!   newer sample wins.
//! - Rejection is an expected outcome and is reported through the return
//!   value, never as an error.
//!
//! ## Partial Rescoring
//!
//! Samples added without a score get [`Score::best`] and bump the
//! [`dirty`](SelectiveSeries::dirty) counter. They sit at the newest end of
//! the time order, so [`dirty_positions`](SelectiveSeries::dirty_positions)
//! names them; [`rescore_dirty`](SelectiveSeries::rescore_dirty) scores them
//! and resets the counter.
//!
//! ## Example Usage
//!
//! ```
//! use samplekit::series::{Order, SelectiveSeries};
//!
//! let mut series: SelectiveSeries<&str, u64, f32> = SelectiveSeries::new(3);
//!
//! series.add_scored("a", 0, 5.0);
//! series.add_scored("b", 1, 3.0);
//! series.add_scored("c", 2, 8.0); // now full
//! series.add_scored("d", 3, 1.0); // displaces the worst ("c")
//!
//! let timestamps: Vec<u64> = series.iter().map(|s| s.timestamp).collect();
//! assert_eq!(timestamps, vec![0, 1, 3]);
//!
//! // Out-of-order samples go where their timestamp belongs
//! assert!(series.insert("e", 2, 0.5));
//! let timestamps: Vec<u64> = series.iter().map(|s| s.timestamp).collect();
//! assert_eq!(timestamps, vec![1, 2, 3]);
//!
//! // The two best, still in time order
//! let best: Vec<&str> = series.best(2).iter().map(|s| s.value).collect();
//! assert_eq!(best, vec!["e", "d"]);
//!
//! // Newest first
//! let reverse: SelectiveSeries<u8> = SelectiveSeries::with_order(4, Order::Reverse);
//! assert!(reverse.is_empty());
//! ```
//!
//! ## Thread Safety
//!
//! `SelectiveSeries` performs no internal synchronization; mutation requires
//! `&mut self`. With the `concurrency` feature,
//! [`ConcurrentSelectiveSeries`] wraps a series in a `parking_lot::RwLock`.

#[cfg(feature = "concurrency")]
mod concurrent;
mod iter;
mod order;
mod sample;

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentSelectiveSeries;
pub use iter::{Entries, Iter};
pub use order::Order;
pub use sample::Sample;

use std::ops::{AddAssign, Index, Range};

use crate::ds::{OrderIndex, SampleArena, SampleId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SeriesMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SeriesMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, SeriesMetricsReadRecorder, SeriesMetricsRecorder,
};
use crate::traits::{Score, Timestamp};

/// Fixed-capacity container keeping the best-scoring samples of a stream in
/// time order.
///
/// See the [module docs](self) for the retention policy and layout.
///
/// # Type Parameters
///
/// - `V`: Value type
/// - `T`: Timestamp type (default `u64`), see [`Timestamp`]
/// - `S`: Score type (default `f32`), see [`Score`]
///
/// # Example
///
/// ```
/// use samplekit::series::SelectiveSeries;
///
/// let mut series: SelectiveSeries<char> = SelectiveSeries::new(2);
/// series.add_scored('a', 0, 4.0);
/// series.add_scored('b', 1, 4.0); // appended
/// series.add_scored('c', 2, 4.0); // tie: replaces the first worst ('a')
///
/// let values: Vec<char> = series.iter().map(|s| s.value).collect();
/// assert_eq!(values, vec!['b', 'c']);
/// ```
#[derive(Debug, Clone)]
pub struct SelectiveSeries<V, T = u64, S = f32> {
    samples: SampleArena<Sample<V, T, S>>,
    order: OrderIndex,
    direction: Order,
    next_timestamp: T,
    dirty: usize,

    #[cfg(feature = "metrics")]
    metrics: SeriesMetrics,
}

// ---------------------------------------------------------------------------
// Accessors (no bounds on T / S)
// ---------------------------------------------------------------------------

impl<V, T, S> SelectiveSeries<V, T, S> {
    /// Maximum number of samples retained. Fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    /// Number of samples currently retained.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` once every slot is in use; from then on each retained
    /// sample evicts another.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Iteration direction.
    #[inline]
    pub fn order(&self) -> Order {
        self.direction
    }

    /// Number of retained samples added without a score since the last reset.
    ///
    /// Only ever incremented by the series; see [`reset_dirty`](Self::reset_dirty).
    #[inline]
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    #[inline]
    pub fn reset_dirty(&mut self) {
        self.dirty = 0;
    }

    /// Logical positions of the trailing unscored samples.
    ///
    /// Unscored samples are added at the newest end, which is the back of the
    /// time order in [`Order::Forward`] and the front in [`Order::Reverse`].
    ///
    /// ```
    /// use samplekit::series::{Order, SelectiveSeries};
    ///
    /// let mut series: SelectiveSeries<u8> = SelectiveSeries::with_order(8, Order::Reverse);
    /// series.add_scored(1, 0, 0.5);
    /// series.add(2);
    /// series.add(3);
    /// assert_eq!(series.dirty_positions(), 0..2);
    /// ```
    pub fn dirty_positions(&self) -> Range<usize> {
        let len = self.len();
        let dirty = self.dirty.min(len);
        match self.direction {
            Order::Forward => len - dirty..len,
            Order::Reverse => 0..dirty,
        }
    }

    /// Sample at logical position `pos` (0 = first in iteration order).
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&Sample<V, T, S>> {
        self.samples.get(self.order.get(pos)?)
    }

    /// Handle of the sample at logical position `pos`.
    #[inline]
    pub fn id_at(&self, pos: usize) -> Option<SampleId> {
        self.samples.id_of(self.order.get(pos)?)
    }

    /// Resolves a handle. Returns `None` once the sample was evicted or removed.
    #[inline]
    pub fn get_by_id(&self, id: SampleId) -> Option<&Sample<V, T, S>> {
        self.samples.get_by_id(id)
    }

    /// Logical position of the sample behind `id`.
    pub fn position_of(&self, id: SampleId) -> Option<usize> {
        if !self.samples.contains(id) {
            return None;
        }
        self.order.position_of(id.slot())
    }

    /// Iterates retained samples in time order; yields exactly `len()` items.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V, T, S> {
        Iter::new(self)
    }

    /// Iterates `(handle, sample)` pairs in time order.
    #[inline]
    pub fn entries(&self) -> Entries<'_, V, T, S> {
        Entries::new(self)
    }

    /// Overwrites the score of the sample at logical position `pos`.
    pub fn rescore(&mut self, pos: usize, score: S) -> bool {
        let Some(slot) = self.order.get(pos) else {
            return false;
        };
        match self.samples.get_mut(slot) {
            Some(sample) => {
                sample.score = score;
                true
            },
            None => false,
        }
    }

    /// Scores every sample in [`dirty_positions`](Self::dirty_positions) with
    /// `score_fn` and resets the dirty counter. Returns how many were scored.
    pub fn rescore_dirty<F>(&mut self, mut score_fn: F) -> usize
    where
        F: FnMut(&V, &T) -> S,
    {
        let mut scored = 0;
        for pos in self.dirty_positions() {
            let Some(slot) = self.order.get(pos) else {
                continue;
            };
            if let Some(sample) = self.samples.get_mut(slot) {
                sample.score = score_fn(&sample.value, &sample.timestamp);
                scored += 1;
            }
        }
        self.dirty = 0;
        scored
    }

    /// Consumes the series, returning the samples in time order.
    pub fn into_samples(mut self) -> Vec<Sample<V, T, S>> {
        let slots: Vec<usize> = self.order.iter().collect();
        slots
            .into_iter()
            .filter_map(|slot| self.samples.take_slot(slot))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Construction and mutation
// ---------------------------------------------------------------------------

impl<V, T, S> SelectiveSeries<V, T, S>
where
    T: Timestamp,
    S: Score,
{
    /// Creates an empty forward-ordered series.
    ///
    /// A capacity of zero is honored: such a series rejects every sample.
    /// Use [`try_new`](Self::try_new) to treat it as a configuration error.
    ///
    /// ```
    /// use samplekit::series::SelectiveSeries;
    ///
    /// let series: SelectiveSeries<String> = SelectiveSeries::new(100);
    /// assert_eq!(series.capacity(), 100);
    /// assert!(series.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_order(capacity, Order::Forward)
    }

    /// Creates an empty series iterating in `order`.
    pub fn with_order(capacity: usize, order: Order) -> Self {
        Self {
            samples: SampleArena::with_capacity(capacity),
            order: OrderIndex::with_capacity(capacity),
            direction: order,
            next_timestamp: T::origin(),
            dirty: 0,
            #[cfg(feature = "metrics")]
            metrics: SeriesMetrics::default(),
        }
    }

    /// Fallible [`new`](Self::new): rejects a capacity of zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_order(capacity, Order::Forward)
    }

    /// Fallible [`with_order`](Self::with_order): rejects a capacity of zero.
    pub fn try_with_order(capacity: usize, order: Order) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self::with_order(capacity, order))
    }

    /// Timestamp the next [`add`](Self::add) will use: one past the highest
    /// timestamp seen so far.
    #[inline]
    pub fn next_timestamp(&self) -> T {
        self.next_timestamp
    }

    /// Adds an unscored sample stamped [`next_timestamp`](Self::next_timestamp).
    ///
    /// The sample gets [`Score::best`]; if it is retained the dirty counter is
    /// incremented. Returns the dirty count.
    ///
    /// ```
    /// use samplekit::series::SelectiveSeries;
    ///
    /// let mut series: SelectiveSeries<&str> = SelectiveSeries::new(4);
    /// assert_eq!(series.add("x"), 1);
    /// assert_eq!(series.add("y"), 2);
    /// assert_eq!(series.get(1).map(|s| s.timestamp), Some(1));
    /// ```
    pub fn add(&mut self, value: V) -> usize {
        let timestamp = self.next_timestamp;
        self.add_at(value, timestamp)
    }

    /// Adds an unscored sample assumed to be the newest. Returns the dirty count.
    pub fn add_at(&mut self, value: V, timestamp: T) -> usize {
        if self.store_newest(value, timestamp, S::best()) {
            self.dirty += 1;
        }
        self.dirty
    }

    /// Adds a scored sample assumed to be the newest. Returns the dirty count,
    /// which scored samples never change.
    pub fn add_scored(&mut self, value: V, timestamp: T, score: S) -> usize {
        self.store_newest(value, timestamp, score);
        self.dirty
    }

    /// Like [`add_scored`](Self::add_scored), but reports whether the sample
    /// was retained.
    pub fn push(&mut self, value: V, timestamp: T, score: S) -> bool {
        self.store_newest(value, timestamp, score)
    }

    /// Stores a sample at the position its timestamp belongs, without assuming
    /// it is the newest.
    ///
    /// Among equal timestamps the new sample lands on the newest side. When
    /// the series is full, the worst sample is evicted in the same step and
    /// only the positions between the vacated one and the insertion point
    /// shift. Returns `false` if the score is strictly worse than the current
    /// worst.
    ///
    /// ```
    /// use samplekit::series::SelectiveSeries;
    ///
    /// let mut series: SelectiveSeries<()> = SelectiveSeries::new(8);
    /// for ts in [0, 1, 5, 7] {
    ///     series.add_scored((), ts, 1.0);
    /// }
    /// assert!(series.insert((), 3, 2.0));
    ///
    /// let timestamps: Vec<u64> = series.iter().map(|s| s.timestamp).collect();
    /// assert_eq!(timestamps, vec![0, 1, 3, 5, 7]);
    /// ```
    pub fn insert(&mut self, value: V, timestamp: T, score: S) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        self.note_timestamp(timestamp);
        let sample = Sample::new(value, timestamp, score);

        if !self.samples.is_full() {
            let pos = self.insertion_position(&timestamp, None);
            let Some(id) = self.samples.insert(sample) else {
                return false;
            };
            self.order.insert(pos, id.slot());
            #[cfg(feature = "metrics")]
            self.metrics.record_append();
            return true;
        }

        let Some((slot, vacated)) = self.displaceable(&score) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_rejection();
            return false;
        };
        let pos = self.insertion_position(&timestamp, Some(vacated));
        self.samples.replace(slot, sample);
        // `pos` counts the vacated position when it lies before it
        let target = if pos > vacated { pos - 1 } else { pos };
        self.order.relocate(vacated, target);
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        true
    }

    /// Inserts several samples in sequence. Returns how many were retained.
    pub fn insert_many<I>(&mut self, samples: I) -> usize
    where
        I: IntoIterator<Item = (V, T, S)>,
    {
        samples
            .into_iter()
            .map(|(value, timestamp, score)| self.insert(value, timestamp, score))
            .filter(|&retained| retained)
            .count()
    }

    /// Removes the sample behind `id`, returning it. Stale handles yield `None`.
    pub fn take(&mut self, id: SampleId) -> Option<Sample<V, T, S>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let pos = self.position_of(id)?;
        self.order.remove(pos);
        let sample = self.samples.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(sample)
    }

    /// Removes the sample behind `id`, closing the gap in the time order.
    /// Returns whether a sample was removed.
    ///
    /// ```
    /// use samplekit::series::SelectiveSeries;
    ///
    /// let mut series: SelectiveSeries<u32> = SelectiveSeries::new(4);
    /// series.add_scored(10, 0, 1.0);
    /// series.add_scored(20, 1, 2.0);
    /// series.add_scored(30, 2, 3.0);
    ///
    /// let id = series.id_at(1).unwrap();
    /// assert!(series.remove(id));
    /// assert!(!series.remove(id)); // already gone
    ///
    /// let values: Vec<u32> = series.iter().map(|s| s.value).collect();
    /// assert_eq!(values, vec![10, 30]);
    /// ```
    pub fn remove(&mut self, id: SampleId) -> bool {
        self.take(id).is_some()
    }

    /// The retained sample with the highest (worst) score; the first one in
    /// slot order on ties. `None` when empty.
    pub fn worst(&self) -> Option<&Sample<V, T, S>> {
        let (slot, _) = self.worst_slot()?;
        self.samples.get(slot)
    }

    /// Handle of [`worst`](Self::worst).
    pub fn worst_id(&self) -> Option<SampleId> {
        let (slot, _) = self.worst_slot()?;
        self.samples.id_of(slot)
    }

    /// The at most `n` lowest-scoring samples, in the series' time order.
    ///
    /// A working set is seeded with the first `n` samples in time order; each
    /// later sample with a strictly better score displaces the working set's
    /// worst. Displacement shifts the working set instead of sorting it, so it
    /// stays in time order throughout. `n` larger than `len()` is clamped.
    ///
    /// ```
    /// use samplekit::series::SelectiveSeries;
    ///
    /// let mut series: SelectiveSeries<char> = SelectiveSeries::new(5);
    /// for (ts, (value, score)) in [('a', 0.9), ('b', 0.1), ('c', 0.7), ('d', 0.2), ('e', 0.3)]
    ///     .into_iter()
    ///     .enumerate()
    /// {
    ///     series.add_scored(value, ts as u64, score);
    /// }
    ///
    /// let best: Vec<char> = series.best(3).iter().map(|s| s.value).collect();
    /// assert_eq!(best, vec!['b', 'd', 'e']);
    /// assert_eq!(series.best(0).len(), 0);
    /// assert_eq!(series.best(50).len(), 5);
    /// ```
    pub fn best(&self, n: usize) -> Vec<&Sample<V, T, S>> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_best_call();

        let n = n.min(self.len());
        let positions = self.order.as_slice();
        let mut picked: Vec<&Sample<V, T, S>> = positions[..n]
            .iter()
            .filter_map(|&slot| self.samples.get(slot))
            .collect();
        if picked.is_empty() {
            return picked;
        }

        let mut worst = worst_index(&picked);
        for candidate in positions[n..].iter().filter_map(|&slot| self.samples.get(slot)) {
            if picked[worst].score.is_worse_than(candidate.score) {
                picked.remove(worst);
                picked.push(candidate);
                worst = worst_index(&picked);
            }
        }
        picked
    }

    /// First sample (in time order) stamped exactly `timestamp`.
    ///
    /// The scan stops as soon as it passes `timestamp`.
    pub fn find_by_exact_time(&self, timestamp: T) -> Option<&Sample<V, T, S>> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_exact_lookup_call();

        for sample in self.iter() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_lookup_scan_step();

            if sample.timestamp == timestamp {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_exact_lookup_found();
                return Some(sample);
            }
            if !self.direction.precedes(&sample.timestamp, &timestamp) {
                break;
            }
        }
        None
    }

    /// Sample whose timestamp is nearest to `timestamp`; the first one in
    /// time order on ties. `None` when empty.
    ///
    /// ```
    /// use samplekit::series::SelectiveSeries;
    ///
    /// let mut series: SelectiveSeries<&str> = SelectiveSeries::new(4);
    /// series.add_scored("a", 10, 1.0);
    /// series.add_scored("b", 20, 1.0);
    /// series.add_scored("c", 30, 1.0);
    ///
    /// assert_eq!(series.find_closest_time(24).map(|s| s.value), Some("b"));
    /// assert_eq!(series.find_closest_time(25).map(|s| s.value), Some("b")); // tie
    /// assert_eq!(series.find_closest_time(99).map(|s| s.value), Some("c"));
    /// ```
    pub fn find_closest_time(&self, timestamp: T) -> Option<&Sample<V, T, S>> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_closest_lookup_call();

        let mut closest: Option<(&Sample<V, T, S>, T::Delta)> = None;
        for sample in self.iter() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_lookup_scan_step();

            if sample.timestamp == timestamp {
                return Some(sample);
            }
            let distance = sample.timestamp.abs_diff(timestamp);
            match closest {
                Some((_, best)) if distance >= best => {},
                _ => closest = Some((sample, distance)),
            }
        }
        closest.map(|(sample, _)| sample)
    }

    /// Drops every sample and resets the dirty counter and the default
    /// timestamp. Capacity and order are unchanged; outstanding handles go stale.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.samples.clear();
        self.order.clear();
        self.dirty = 0;
        self.next_timestamp = T::origin();
    }

    /// Verifies the internal bookkeeping.
    ///
    /// Checks that the order permutation covers exactly the occupied slots,
    /// that it is sorted by timestamp in the configured direction, and that
    /// [`next_timestamp`](Self::next_timestamp) is past every retained
    /// timestamp. The time order can only break if [`add`](Self::add) is fed
    /// a timestamp older than the newest retained one.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.order.len();
        if len != self.samples.len() {
            return Err(InvariantError::new(format!(
                "order holds {} positions but {} slots are occupied",
                len,
                self.samples.len()
            )));
        }
        if len > self.capacity() {
            return Err(InvariantError::new(format!(
                "{} samples exceed capacity {}",
                len,
                self.capacity()
            )));
        }

        let mut seen = vec![false; self.capacity()];
        let mut previous: Option<&T> = None;
        for (pos, slot) in self.order.iter().enumerate() {
            let Some(sample) = self.samples.get(slot) else {
                return Err(InvariantError::new(format!(
                    "position {} points at free slot {}",
                    pos, slot
                )));
            };
            match seen.get_mut(slot) {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(InvariantError::new(format!(
                        "slot {} appears more than once in the order",
                        slot
                    )));
                },
            }
            if let Some(prev) = previous {
                if !self.direction.precedes(prev, &sample.timestamp) {
                    return Err(InvariantError::new(format!(
                        "position {} ({:?}) is out of {:?} time order after {:?}",
                        pos, sample.timestamp, self.direction, prev
                    )));
                }
            }
            if sample.timestamp.successor() > self.next_timestamp {
                return Err(InvariantError::new(format!(
                    "next timestamp {:?} is not past retained timestamp {:?}",
                    self.next_timestamp, sample.timestamp
                )));
            }
            previous = Some(&sample.timestamp);
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("series invariant violated: {}", err);
        }
    }

    fn note_timestamp(&mut self, timestamp: T) {
        let next = timestamp.successor();
        if next > self.next_timestamp {
            self.next_timestamp = next;
        }
    }

    fn store_newest(&mut self, value: V, timestamp: T, score: S) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();

        self.note_timestamp(timestamp);
        let sample = Sample::new(value, timestamp, score);

        if !self.samples.is_full() {
            let Some(id) = self.samples.insert(sample) else {
                return false;
            };
            match self.direction {
                Order::Forward => self.order.push_back(id.slot()),
                Order::Reverse => self.order.insert(0, id.slot()),
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_append();
            return true;
        }

        let Some((slot, vacated)) = self.displaceable(&score) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_rejection();
            return false;
        };
        self.samples.replace(slot, sample);
        let newest = match self.direction {
            Order::Forward => self.order.len() - 1,
            Order::Reverse => 0,
        };
        self.order.relocate(vacated, newest);
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        true
    }

    /// Worst slot and its logical position, if `score` may replace it.
    fn displaceable(&mut self, score: &S) -> Option<(usize, usize)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_worst_scan_steps(self.samples.len() as u64);

        let (slot, worst) = self.worst_slot()?;
        if score.is_worse_than(worst) {
            return None;
        }
        let vacated = self.order.position_of(slot)?;
        Some((slot, vacated))
    }

    fn worst_slot(&self) -> Option<(usize, S)> {
        let mut worst: Option<(usize, S)> = None;
        for (slot, sample) in self.samples.iter() {
            match worst {
                Some((_, score)) if !sample.score.is_worse_than(score) => {},
                _ => worst = Some((slot, sample.score)),
            }
        }
        worst
    }

    /// First logical position a sample stamped `timestamp` goes before,
    /// skipping position `skip`.
    fn insertion_position(&self, timestamp: &T, skip: Option<usize>) -> usize {
        for (pos, slot) in self.order.iter().enumerate() {
            if skip == Some(pos) {
                continue;
            }
            let Some(existing) = self.samples.get(slot) else {
                continue;
            };
            let goes_before = match self.direction {
                Order::Forward => *timestamp < existing.timestamp,
                Order::Reverse => *timestamp >= existing.timestamp,
            };
            if goes_before {
                return pos;
            }
        }
        self.order.len()
    }
}

fn worst_index<V, T, S: Score>(picked: &[&Sample<V, T, S>]) -> usize {
    let mut worst = 0;
    for (i, sample) in picked.iter().enumerate().skip(1) {
        if sample.score.is_worse_than(picked[worst].score) {
            worst = i;
        }
    }
    worst
}

// ---------------------------------------------------------------------------
// Membership and merge (value equality)
// ---------------------------------------------------------------------------

impl<V, T, S> SelectiveSeries<V, T, S>
where
    V: PartialEq,
    T: Timestamp,
    S: Score,
{
    /// Returns `true` if an identical `(value, timestamp, score)` triple is
    /// retained.
    pub fn contains(&self, value: &V, timestamp: T, score: S) -> bool {
        self.samples.iter().any(|(_, sample)| {
            sample.timestamp == timestamp && sample.score == score && sample.value == *value
        })
    }

    /// Inserts every sample of `other`, in `other`'s iteration order, that is
    /// not already present as an identical triple. Returns how many were
    /// retained.
    ///
    /// `other` may have a different capacity and order. Merging the same
    /// series twice in a row does not insert duplicates, and with distinct
    /// scores the second merge changes nothing. With tied scores a repeated
    /// merge can still swap equal-score samples, since a tie replaces the
    /// retained worst.
    ///
    /// ```
    /// use samplekit::series::{Order, SelectiveSeries};
    ///
    /// let mut ours: SelectiveSeries<u8> = SelectiveSeries::new(3);
    /// ours.add_scored(1, 0, 0.5);
    /// ours.add_scored(2, 4, 0.9);
    ///
    /// let mut theirs: SelectiveSeries<u8> = SelectiveSeries::with_order(2, Order::Reverse);
    /// theirs.add_scored(1, 0, 0.5); // duplicate
    /// theirs.add_scored(3, 2, 0.1);
    ///
    /// assert_eq!(ours.merge(&theirs), 1);
    /// let timestamps: Vec<u64> = ours.iter().map(|s| s.timestamp).collect();
    /// assert_eq!(timestamps, vec![0, 2, 4]);
    /// assert_eq!(ours.merge(&theirs), 0);
    /// ```
    pub fn merge(&mut self, other: &SelectiveSeries<V, T, S>) -> usize
    where
        V: Clone,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_merge_call();

        let mut retained = 0;
        for sample in other.iter() {
            if self.contains(&sample.value, sample.timestamp, sample.score) {
                #[cfg(feature = "metrics")]
                self.metrics.record_merge_duplicate();
                continue;
            }
            if self.insert(sample.value.clone(), sample.timestamp, sample.score) {
                retained += 1;
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_merge_retained(retained as u64);

        retained
    }
}

// ---------------------------------------------------------------------------
// Operator and std trait impls
// ---------------------------------------------------------------------------

impl<V, T, S> Index<usize> for SelectiveSeries<V, T, S> {
    type Output = Sample<V, T, S>;

    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    fn index(&self, pos: usize) -> &Self::Output {
        match self.get(pos) {
            Some(sample) => sample,
            None => panic!(
                "position {} out of range for series of length {}",
                pos,
                self.len()
            ),
        }
    }
}

/// `series += value` is [`SelectiveSeries::add`].
impl<V, T, S> AddAssign<V> for SelectiveSeries<V, T, S>
where
    T: Timestamp,
    S: Score,
{
    fn add_assign(&mut self, value: V) {
        self.add(value);
    }
}

/// Extends by [`insert`](SelectiveSeries::insert)ing each triple.
impl<V, T, S> Extend<(V, T, S)> for SelectiveSeries<V, T, S>
where
    T: Timestamp,
    S: Score,
{
    fn extend<I: IntoIterator<Item = (V, T, S)>>(&mut self, iter: I) {
        for (value, timestamp, score) in iter {
            self.insert(value, timestamp, score);
        }
    }
}

// ---------------------------------------------------------------------------
// PartialEq: compare logical content, not slot layout
// ---------------------------------------------------------------------------

impl<V, T, S> PartialEq for SelectiveSeries<V, T, S>
where
    V: PartialEq,
    T: PartialEq,
    S: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.direction == other.direction
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[cfg(feature = "metrics")]
impl<V, T, S> SelectiveSeries<V, T, S> {
    /// Returns a snapshot of series metrics.
    pub fn metrics_snapshot(&self) -> SeriesMetricsSnapshot {
        SeriesMetricsSnapshot::capture(&self.metrics, self.len(), self.capacity(), self.dirty)
    }
}

#[cfg(feature = "metrics")]
impl<V, T, S> MetricsSnapshotProvider<SeriesMetricsSnapshot> for SelectiveSeries<V, T, S> {
    fn snapshot(&self) -> SeriesMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<V, T, S> MetricsReset for SelectiveSeries<V, T, S> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}
