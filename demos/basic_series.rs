//! Bulk top-k run: stream random feature vectors through a series and print
//! the scores of the best retained samples.
//!
//! Run with: `cargo run --example basic_series`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use samplekit::prelude::*;

const CAPACITY: usize = 2_000;
const STREAM: u64 = 20_000;

fn main() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut series: SelectiveSeries<[f64; 8], u64, f32> = SeriesBuilder::new(CAPACITY).build();

    let mut rejected = 0usize;
    for ts in 0..STREAM {
        let score: f32 = rng.gen();
        let features: [f64; 8] = rng.gen();
        if !series.push(features, ts, score) {
            rejected += 1;
        }
    }

    // a late sample with the best possible score
    let late: [f64; 8] = rng.gen();
    series.insert(late, 99, 0.0);

    println!(
        "kept {} of {} samples ({} rejected), worst score {:.3}",
        series.len(),
        STREAM + 1,
        rejected,
        series.worst().map_or(f32::NAN, |s| s.score)
    );

    let best: Vec<String> = series
        .best(11)
        .iter()
        .map(|s| format!("{:.3}@{}", s.score, s.timestamp))
        .collect();
    println!("best 11 in time order: {}", best.join(" "));

    if let Err(err) = series.check_invariants() {
        eprintln!("invariant violated: {}", err);
    }
}
