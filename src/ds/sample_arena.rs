//! Fixed-capacity slot storage with generation-tagged handles.
//!
//! Backs the physical storage of a
//! [`SelectiveSeries`](crate::series::SelectiveSeries). Slots are allocated
//! once up front and never grow; a slot freed by [`SampleArena::remove`] is
//! reused by the next [`SampleArena::insert`], and a slot overwritten in place
//! by [`SampleArena::replace`] keeps its index.
//!
//! Every slot carries a generation counter that is bumped whenever the value
//! living in it goes away (removal, replacement, clear). A [`SampleId`] records
//! the generation it was issued for, so a handle to an evicted sample never
//! resolves to the sample that later took its slot.
//!
//! ```text
//!   slots:  [ (A, g0) | (-, g1) | (C, g3) | (D, g0) ]     free_list: [1]
//!
//!   SampleId { slot: 2, generation: 3 } → C
//!   SampleId { slot: 2, generation: 2 } → stale (C replaced an older sample)
//! ```

/// Stable handle to a sample stored in a [`SampleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleId {
    slot: usize,
    generation: u32,
}

impl SampleId {
    /// Physical slot index.
    pub fn slot(self) -> usize {
        self.slot
    }

    /// Generation of the slot this handle was issued for.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// Fixed-capacity arena; see the [module docs](self).
#[derive(Debug, Clone)]
pub struct SampleArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
    capacity: usize,
}

impl<T> SampleArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
            capacity,
        }
    }

    /// Stores `value` in a free slot. Returns `None` when the arena is full.
    pub fn insert(&mut self, value: T) -> Option<SampleId> {
        let slot = if let Some(slot) = self.free_list.pop() {
            self.slots[slot].value = Some(value);
            slot
        } else if self.slots.len() < self.capacity {
            self.slots.push(Slot {
                value: Some(value),
                generation: 0,
            });
            self.slots.len() - 1
        } else {
            return None;
        };
        self.len += 1;
        Some(SampleId {
            slot,
            generation: self.slots[slot].generation,
        })
    }

    /// Overwrites the occupied `slot`, invalidating handles to the old value.
    ///
    /// Returns the handle of the new value and the displaced value, or `None`
    /// (leaving `value` dropped) if the slot is not occupied.
    pub fn replace(&mut self, slot: usize, value: T) -> Option<(SampleId, T)> {
        let entry = self.slots.get_mut(slot)?;
        let current = entry.value.as_mut()?;
        let old = std::mem::replace(current, value);
        entry.generation = entry.generation.wrapping_add(1);
        Some((
            SampleId {
                slot,
                generation: entry.generation,
            },
            old,
        ))
    }

    pub fn remove(&mut self, id: SampleId) -> Option<T> {
        let entry = self.slots.get_mut(id.slot)?;
        if entry.generation != id.generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free_list.push(id.slot);
        self.len -= 1;
        Some(value)
    }

    /// Takes the value out of `slot` regardless of generation.
    pub fn take_slot(&mut self, slot: usize) -> Option<T> {
        let id = self.id_of(slot)?;
        self.remove(id)
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).and_then(|entry| entry.value.as_ref())
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot).and_then(|entry| entry.value.as_mut())
    }

    pub fn get_by_id(&self, id: SampleId) -> Option<&T> {
        self.slots
            .get(id.slot)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.value.as_ref())
    }

    /// Current handle for an occupied slot.
    pub fn id_of(&self, slot: usize) -> Option<SampleId> {
        let entry = self.slots.get(slot)?;
        entry.value.as_ref().map(|_| SampleId {
            slot,
            generation: entry.generation,
        })
    }

    pub fn contains(&self, id: SampleId) -> bool {
        self.get_by_id(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every value and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        for entry in &mut self.slots {
            if entry.value.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
            }
        }
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len()).rev());
        self.len = 0;
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.value.as_ref().map(|value| (slot, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_until_full() {
        let mut arena = SampleArena::with_capacity(2);
        assert!(arena.insert("a").is_some());
        assert!(arena.insert("b").is_some());
        assert!(arena.is_full());
        assert_eq!(arena.insert("c"), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut arena = SampleArena::with_capacity(0);
        assert!(arena.is_full());
        assert_eq!(arena.insert(1), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn remove_then_reuse_slot_with_new_generation() {
        let mut arena = SampleArena::with_capacity(2);
        let a = arena.insert("a").unwrap();
        let _b = arena.insert("b").unwrap();

        assert_eq!(arena.remove(a), Some("a"));
        assert!(!arena.contains(a));

        let c = arena.insert("c").unwrap();
        assert_eq!(c.slot(), a.slot());
        assert_ne!(c.generation(), a.generation());
        assert_eq!(arena.get_by_id(a), None);
        assert_eq!(arena.get_by_id(c), Some(&"c"));
    }

    #[test]
    fn replace_invalidates_old_handle() {
        let mut arena = SampleArena::with_capacity(1);
        let a = arena.insert(10).unwrap();
        let (b, old) = arena.replace(a.slot(), 20).unwrap();
        assert_eq!(old, 10);
        assert_eq!(b.slot(), a.slot());
        assert_eq!(arena.get_by_id(a), None);
        assert_eq!(arena.get_by_id(b), Some(&20));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn replace_on_free_slot_is_none() {
        let mut arena: SampleArena<i32> = SampleArena::with_capacity(2);
        assert!(arena.replace(0, 1).is_none());
        let a = arena.insert(1).unwrap();
        arena.remove(a);
        assert!(arena.replace(a.slot(), 2).is_none());
    }

    #[test]
    fn double_remove_is_none() {
        let mut arena = SampleArena::with_capacity(1);
        let a = arena.insert(1).unwrap();
        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.remove(a), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn clear_invalidates_handles_and_reuses_from_slot_zero() {
        let mut arena = SampleArena::with_capacity(3);
        let a = arena.insert('a').unwrap();
        arena.insert('b');
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(a));

        let c = arena.insert('c').unwrap();
        assert_eq!(c.slot(), 0);
        assert_eq!(arena.get(0), Some(&'c'));
    }

    #[test]
    fn iter_yields_occupied_in_slot_order() {
        let mut arena = SampleArena::with_capacity(3);
        let a = arena.insert(1).unwrap();
        arena.insert(2);
        arena.insert(3);
        arena.remove(a);
        let items: Vec<_> = arena.iter().map(|(slot, v)| (slot, *v)).collect();
        assert_eq!(items, vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn take_slot_ignores_generation() {
        let mut arena = SampleArena::with_capacity(1);
        let a = arena.insert(5).unwrap();
        arena.replace(a.slot(), 6);
        assert_eq!(arena.take_slot(a.slot()), Some(6));
        assert!(arena.is_empty());
    }
}
