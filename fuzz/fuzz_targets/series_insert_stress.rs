#![no_main]

use libfuzzer_sys::fuzz_target;
use samplekit::series::{Order, SelectiveSeries};

// Stress insert with distinct scores
//
// With distinct scores the retained set must be exactly the lowest
// `capacity` scores offered, whatever the timestamps and order.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = usize::from(data[0] % 12) + 1;
    let order = if data[0] & 0x80 == 0 {
        Order::Forward
    } else {
        Order::Reverse
    };
    let mut series: SelectiveSeries<usize, u8, u32> = SelectiveSeries::with_order(capacity, order);
    let mut offered = Vec::new();

    for (i, &ts) in data[1..].iter().enumerate() {
        // score i is distinct per sample; mix it so arrival is not sorted
        let score = (i as u32).wrapping_mul(2_654_435_761) >> 8;
        if offered.contains(&score) {
            continue;
        }
        offered.push(score);
        series.insert(i, ts, score);
    }

    offered.sort_unstable();
    offered.truncate(capacity);
    let mut retained: Vec<u32> = series.iter().map(|s| s.score).collect();
    retained.sort_unstable();
    assert_eq!(retained, offered);
    assert!(series.check_invariants().is_ok());
});
