use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter that can be bumped through `&self`.
///
/// Used by read paths (`best`, lookups) that only borrow the series. Relaxed
/// atomics keep it sound when a series is shared behind a read lock.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.add(1);
    }

    #[inline]
    pub fn add(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

impl Clone for MetricsCell {
    fn clone(&self) -> Self {
        Self(AtomicU64::new(self.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_add_reset() {
        let cell = MetricsCell::new();
        cell.incr();
        cell.add(4);
        assert_eq!(cell.get(), 5);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }

    #[test]
    fn clone_copies_current_value() {
        let cell = MetricsCell::new();
        cell.add(3);
        let copy = cell.clone();
        cell.incr();
        assert_eq!(copy.get(), 3);
        assert_eq!(cell.get(), 4);
    }
}
