use std::error::Error;

use log::debug;

use order_synth::synth::{
    shuffle_orders, write_orders, OrderSynthesizer, DEFAULT_SEED, DUPLICATE_COUNT, NUM_ROWS,
};

const RAW_OUTPUT: &str = "customer_orders_raw.csv";
const DIRTY_OUTPUT: &str = "customer_orders_dirty.csv";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut synth = OrderSynthesizer::with_seed(DEFAULT_SEED);

    let clean = synth.generate_clean(NUM_ROWS);
    write_orders(RAW_OUTPUT, &clean)?;
    println!("Raw dataset saved with {} rows", clean.len());

    let duplicates = synth.duplicate_rows(&clean, DUPLICATE_COUNT);
    let original_count = clean.len();
    let duplicate_count = duplicates.len();

    let mut combined = clean;
    combined.extend(duplicates);
    shuffle_orders(&mut combined, DEFAULT_SEED);
    debug!("shuffled {} combined rows", combined.len());
    write_orders(DIRTY_OUTPUT, &combined)?;

    println!("Original rows: {original_count}");
    println!("Duplicate rows added: {duplicate_count}");
    println!("Total rows with duplicates: {}", combined.len());
    println!("Dataset with duplicates saved to '{DIRTY_OUTPUT}'");

    Ok(())
}
