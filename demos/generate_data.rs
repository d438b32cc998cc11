//! Generates a synthetic CSV file, `sample_10k.csv`, with 10,000 rows and
//! 5 columns for benchmarking.
//!
//! The file is written with the reference `csv` crate, so it also serves as
//! independently produced input for exercising this crate's reader.
//!
//! Run with `cargo run --example generate-data`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const FILENAME: &str = "sample_10k.csv";
const NUM_ROWS: usize = 10_000;
const NUM_COLS: usize = 5;
const SEED: u64 = 42;

/// A random field with some chance of embedded commas, quotes and newlines.
fn random_field(rng: &mut SmallRng) -> String {
    let base: String = (0..5)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    match rng.gen_range(0..5) {
        0 => base,
        1 => format!("{},{}", base, base),
        2 => format!("{}\"{}", base, base),
        3 => format!("{}\n{}", base, base),
        _ => String::new(),
    }
}

fn main() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut wtr = csv::Writer::from_path(FILENAME).unwrap();
    for _ in 0..NUM_ROWS {
        let row: Vec<String> =
            (0..NUM_COLS).map(|_| random_field(&mut rng)).collect();
        wtr.write_record(&row).unwrap();
    }
    wtr.flush().unwrap();

    println!(
        "Generated {} with {} rows and {} columns.",
        FILENAME, NUM_ROWS, NUM_COLS
    );
}
