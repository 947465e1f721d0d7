//! Partial rescoring: add observations unscored, then score only the new
//! ones in batches.
//!
//! Run with: `cargo run --example rescore_dirty`

use samplekit::prelude::*;

fn distance_from_target(value: &f64) -> f32 {
    (value - 0.5).abs() as f32
}

fn main() {
    let mut series: SelectiveSeries<f64> = SelectiveSeries::new(6);

    for batch in 0..4u32 {
        for i in 0..3u32 {
            series += f64::from(batch * 3 + i) / 12.0;
        }
        let positions = series.dirty_positions();
        let scored = series.rescore_dirty(|value, _| distance_from_target(value));
        println!(
            "batch {}: scored {} samples at positions {:?}",
            batch, scored, positions
        );
        for sample in &series {
            println!(
                "  t={:<2} value={:.3} score={:.3}",
                sample.timestamp, sample.value, sample.score
            );
        }
    }

    println!("next default timestamp: {}", series.next_timestamp());
}
