//! Feed the same random stream to a forward and a reverse series, insert a
//! late sample into each, merge them and print both time orders.
//!
//! Run with: `cargo run --example merge_series`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use samplekit::prelude::*;

const CAPACITY: usize = 14;
const ADDITIONS: u64 = 47;

fn line<I: IntoIterator<Item = String>>(items: I) -> String {
    items.into_iter().collect::<Vec<_>>().join(" ")
}

fn main() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut forward: SelectiveSeries<f64> = SeriesBuilder::new(CAPACITY).forward().build();
    let mut reverse: SelectiveSeries<f64> = SeriesBuilder::new(CAPACITY).reverse().build();

    println!(
        "Doing {} random additions to two {}-sized time series:",
        ADDITIONS, CAPACITY
    );
    for ts in 0..ADDITIONS {
        let value: f64 = rng.gen();
        let score: f32 = rng.gen();
        forward.add_scored(value, ts, score);
        reverse.add_scored(value, ts, score);

        println!(
            "Added {}, score {:.3}, worst {:.3}, size {}/{}",
            ts,
            score,
            forward.worst().map_or(f32::NAN, |s| s.score),
            forward.len(),
            reverse.len()
        );
        println!("{}", line(forward.iter().map(|s| s.timestamp.to_string())));
        println!("{}", line(forward.iter().map(|s| format!("{:.3}", s.score))));
    }

    println!("\nInserting an item in each...");
    forward.insert(0.0, 3, 0.011);
    reverse.insert(0.0, 3, 0.011);

    println!("\nMerging both time series...");
    let merged = reverse.merge(&forward);
    println!("{} new samples retained", merged);

    println!("\nTimestamps, in order:");
    println!("{}", line(forward.iter().map(|s| s.timestamp.to_string())));
    println!("{}", line(reverse.iter().map(|s| s.timestamp.to_string())));

    println!("\nScores, in order:");
    println!("{}", line(forward.iter().map(|s| format!("{:.3}", s.score))));
    println!("{}", line(reverse.iter().map(|s| format!("{:.3}", s.score))));
}
