//! Logical-position → slot permutation.
//!
//! Keeps the time view of a [`SelectiveSeries`](crate::series::SelectiveSeries)
//! without ever re-sorting: every mutation is a single contiguous block shift
//! of the position table.
//!
//! ## Architecture
//!
//! ```text
//!   logical position:   0    1    2    3    4
//!                     ┌────┬────┬────┬────┬────┐
//!   positions:        │ 3  │ 0  │ 4  │ 1  │ 2  │   (slot indices)
//!                     └────┴────┴────┴────┴────┘
//!
//!   relocate(1, 3):  slot 0 leaves position 1 and lands at position 3;
//!                    only positions 1..=3 move (rotate_left by one)
//!
//!                     ┌────┬────┬────┬────┬────┐
//!                     │ 3  │ 4  │ 1  │ 0  │ 2  │
//!                     └────┴────┴────┴────┴────┘
//! ```
//!
//! ## Operations
//!
//! | Operation       | Description                               | Complexity |
//! |-----------------|-------------------------------------------|------------|
//! | `push_back`     | Append at the last position               | O(1)       |
//! | `insert`        | Splice at a position                      | O(n)       |
//! | `remove`        | Remove a position, closing the gap        | O(n)       |
//! | `relocate`      | Move one entry, shifting the range between| O(\|from - to\|) |
//! | `position_of`   | Find the position holding a slot          | O(n)       |

/// Fixed-capacity position table; see the [module docs](self).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIndex {
    positions: Vec<usize>,
    capacity: usize,
}

impl OrderIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slot at logical position `pos`.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<usize> {
        self.positions.get(pos).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.positions
    }

    pub fn push_back(&mut self, slot: usize) {
        debug_assert!(self.positions.len() < self.capacity);
        self.positions.push(slot);
    }

    /// Splices `slot` in at `pos`, shifting `pos..` up by one.
    pub fn insert(&mut self, pos: usize, slot: usize) {
        debug_assert!(self.positions.len() < self.capacity);
        self.positions.insert(pos, slot);
    }

    /// Removes logical position `pos`, shifting `pos + 1..` down by one.
    pub fn remove(&mut self, pos: usize) -> Option<usize> {
        (pos < self.positions.len()).then(|| self.positions.remove(pos))
    }

    /// Moves the entry at `from` so that it ends up at `to`.
    ///
    /// Only the sub-range between the two positions is shifted. Out-of-range
    /// positions leave the table untouched.
    pub fn relocate(&mut self, from: usize, to: usize) {
        let len = self.positions.len();
        if from >= len || to >= len {
            return;
        }
        if from < to {
            self.positions[from..=to].rotate_left(1);
        } else if to < from {
            self.positions[to..=from].rotate_right(1);
        }
    }

    pub fn position_of(&self, slot: usize) -> Option<usize> {
        self.positions.iter().position(|&s| s == slot)
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.positions.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(slots: &[usize]) -> OrderIndex {
        let mut index = OrderIndex::with_capacity(slots.len() + 1);
        for &slot in slots {
            index.push_back(slot);
        }
        index
    }

    #[test]
    fn push_and_get() {
        let index = index_of(&[2, 0, 1]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(0), Some(2));
        assert_eq!(index.get(2), Some(1));
        assert_eq!(index.get(3), None);
    }

    #[test]
    fn insert_shifts_tail() {
        let mut index = index_of(&[0, 1, 2]);
        index.insert(1, 9);
        assert_eq!(index.as_slice(), &[0, 9, 1, 2]);
    }

    #[test]
    fn remove_closes_gap() {
        let mut index = index_of(&[4, 5, 6]);
        assert_eq!(index.remove(1), Some(5));
        assert_eq!(index.as_slice(), &[4, 6]);
        assert_eq!(index.remove(7), None);
    }

    #[test]
    fn relocate_forward_shifts_only_between() {
        let mut index = index_of(&[3, 0, 4, 1, 2]);
        index.relocate(1, 3);
        assert_eq!(index.as_slice(), &[3, 4, 1, 0, 2]);
    }

    #[test]
    fn relocate_backward_shifts_only_between() {
        let mut index = index_of(&[3, 0, 4, 1, 2]);
        index.relocate(3, 0);
        assert_eq!(index.as_slice(), &[1, 3, 0, 4, 2]);
    }

    #[test]
    fn relocate_to_end_and_front() {
        let mut index = index_of(&[0, 1, 2, 3]);
        index.relocate(0, 3);
        assert_eq!(index.as_slice(), &[1, 2, 3, 0]);
        index.relocate(3, 0);
        assert_eq!(index.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn relocate_same_or_out_of_range_is_noop() {
        let mut index = index_of(&[0, 1, 2]);
        index.relocate(1, 1);
        index.relocate(5, 0);
        index.relocate(0, 5);
        assert_eq!(index.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn position_of_finds_slot() {
        let index = index_of(&[7, 8, 9]);
        assert_eq!(index.position_of(8), Some(1));
        assert_eq!(index.position_of(1), None);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut index = index_of(&[1, 2]);
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.capacity(), 3);
    }
}
