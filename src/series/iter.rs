use std::iter::FusedIterator;
use std::slice;

use crate::ds::{SampleArena, SampleId};

use super::{Sample, SelectiveSeries};

// ---------------------------------------------------------------------------
// Iterator types (C-ITER-TY: names match the methods that produce them)
// ---------------------------------------------------------------------------

/// Borrowed iterator over the retained samples in the series' time order.
///
/// Created by [`SelectiveSeries::iter`].
#[derive(Debug)]
pub struct Iter<'a, V, T, S> {
    positions: slice::Iter<'a, usize>,
    samples: &'a SampleArena<Sample<V, T, S>>,
}

impl<'a, V, T, S> Iter<'a, V, T, S> {
    pub(super) fn new(series: &'a SelectiveSeries<V, T, S>) -> Self {
        Self {
            positions: series.order.as_slice().iter(),
            samples: &series.samples,
        }
    }
}

impl<V, T, S> Clone for Iter<'_, V, T, S> {
    fn clone(&self) -> Self {
        Self {
            positions: self.positions.clone(),
            samples: self.samples,
        }
    }
}

impl<'a, V, T, S> Iterator for Iter<'a, V, T, S> {
    type Item = &'a Sample<V, T, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = *self.positions.next()?;
        self.samples.get(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<V, T, S> DoubleEndedIterator for Iter<'_, V, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let slot = *self.positions.next_back()?;
        self.samples.get(slot)
    }
}

impl<V, T, S> ExactSizeIterator for Iter<'_, V, T, S> {}

impl<V, T, S> FusedIterator for Iter<'_, V, T, S> {}

/// Borrowed iterator over `(handle, sample)` pairs in the series' time order.
///
/// Created by [`SelectiveSeries::entries`]. The handles can be passed to
/// [`SelectiveSeries::remove`].
#[derive(Debug)]
pub struct Entries<'a, V, T, S> {
    positions: slice::Iter<'a, usize>,
    samples: &'a SampleArena<Sample<V, T, S>>,
}

impl<'a, V, T, S> Entries<'a, V, T, S> {
    pub(super) fn new(series: &'a SelectiveSeries<V, T, S>) -> Self {
        Self {
            positions: series.order.as_slice().iter(),
            samples: &series.samples,
        }
    }

    fn resolve(&self, slot: usize) -> Option<(SampleId, &'a Sample<V, T, S>)> {
        let samples: &'a SampleArena<Sample<V, T, S>> = self.samples;
        Some((samples.id_of(slot)?, samples.get(slot)?))
    }
}

impl<'a, V, T, S> Iterator for Entries<'a, V, T, S> {
    type Item = (SampleId, &'a Sample<V, T, S>);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = *self.positions.next()?;
        self.resolve(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<V, T, S> DoubleEndedIterator for Entries<'_, V, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let slot = *self.positions.next_back()?;
        self.resolve(slot)
    }
}

impl<V, T, S> ExactSizeIterator for Entries<'_, V, T, S> {}

impl<V, T, S> FusedIterator for Entries<'_, V, T, S> {}

// ---------------------------------------------------------------------------
// IntoIterator impls (C-ITER: iter, into_iter)
// ---------------------------------------------------------------------------

impl<'a, V, T, S> IntoIterator for &'a SelectiveSeries<V, T, S> {
    type Item = &'a Sample<V, T, S>;
    type IntoIter = Iter<'a, V, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, T, S> IntoIterator for SelectiveSeries<V, T, S> {
    type Item = Sample<V, T, S>;
    type IntoIter = std::vec::IntoIter<Sample<V, T, S>>;

    /// Consumes the series, yielding the samples in its time order.
    fn into_iter(self) -> Self::IntoIter {
        self.into_samples().into_iter()
    }
}
