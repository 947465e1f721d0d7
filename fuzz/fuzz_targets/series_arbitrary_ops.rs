#![no_main]

use libfuzzer_sys::fuzz_target;
use samplekit::series::{Order, SelectiveSeries};

// Fuzz arbitrary operation sequences on SelectiveSeries
//
// Tests random sequences of add, insert, remove, query, merge and clear
// operations in both orders, checking the bookkeeping after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 16);
    let order = if data[1] & 1 == 0 {
        Order::Forward
    } else {
        Order::Reverse
    };
    let mut series: SelectiveSeries<u8, u16, u8> = SelectiveSeries::with_order(capacity, order);
    let mut other: SelectiveSeries<u8, u16, u8> = SelectiveSeries::with_order(8, Order::Reverse);
    let mut all_ids = Vec::new();

    let mut idx = 2;
    while idx + 2 < data.len() {
        let op = data[idx] % 10;
        let value = data[idx + 1];
        let arg = data[idx + 2];
        idx += 3;

        match op {
            0 => {
                // add (unscored)
                let old_dirty = series.dirty();
                let dirty = series.add(value);
                assert!(dirty == old_dirty || dirty == old_dirty + 1);
            }
            1 => {
                // add_scored at the default timestamp
                let ts = series.next_timestamp();
                let was_full = series.is_full();
                let old_len = series.len();
                let retained = series.push(value, ts, arg);
                if !was_full {
                    assert_eq!(retained, capacity > 0);
                }
                assert!(series.len() >= old_len);
            }
            2 => {
                // insert at an arbitrary timestamp
                let old_len = series.len();
                let retained = series.insert(value, u16::from(arg) * 3, value % 32);
                if retained && old_len < capacity {
                    assert_eq!(series.len(), old_len + 1);
                }
            }
            3 => {
                // remove by handle
                if !all_ids.is_empty() {
                    let id = all_ids[usize::from(arg) % all_ids.len()];
                    let old_len = series.len();
                    if series.remove(id) {
                        assert_eq!(series.len(), old_len - 1);
                        assert!(series.get_by_id(id).is_none());
                    }
                }
            }
            4 => {
                // remember a handle
                if let Some(id) = series.id_at(usize::from(arg)) {
                    all_ids.push(id);
                }
            }
            5 => {
                // worst / best
                if let Some(worst) = series.worst() {
                    assert!(series.iter().all(|s| s.score <= worst.score));
                }
                let best = series.best(usize::from(arg % 8));
                assert!(best.len() <= series.len());
            }
            6 => {
                // time lookups
                let target = u16::from(arg) * 2;
                if let Some(found) = series.find_by_exact_time(target) {
                    assert_eq!(found.timestamp, target);
                }
                if series.is_empty() {
                    assert!(series.find_closest_time(target).is_none());
                } else {
                    assert!(series.find_closest_time(target).is_some());
                }
            }
            7 => {
                // feed and merge another series
                other.insert(value, u16::from(arg), value % 16);
                series.merge(&other);
            }
            8 => {
                // rescore dirty samples
                series.rescore_dirty(|v, _| v % 64);
                assert_eq!(series.dirty(), 0);
            }
            9 => {
                // clear
                if arg == 0 {
                    series.clear();
                    assert!(series.is_empty());
                    all_ids.clear();
                }
            }
            _ => unreachable!(),
        }

        assert!(series.len() <= capacity);
        if let Err(err) = series.check_invariants() {
            panic!("invariant violated: {}", err);
        }
    }
});
