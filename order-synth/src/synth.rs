use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::*;

use crate::error::SynthError;
use crate::order::{OrderRecord, COUNTRIES_RAW, NUM_DECIMAL_PLACES, PRODUCT_CATEGORIES};

pub const DEFAULT_SEED: u64 = 42;
pub const NUM_ROWS: usize = 2500;
pub const DUPLICATE_COUNT: usize = 200;
pub const MISSING_RATE: f64 = 0.05;

const FIRST_ORDER_NUMBER: usize = 10_000;
const QUANTITY_DELTAS: [i64; 3] = [-1, 0, 1];

/// First `Order Date` of the base table; each subsequent row is one hour later.
#[must_use]
pub fn base_order_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Generates the customer-orders fixture tables from a single seeded
/// random stream. The draw order (categories, quantities, prices, missing
/// mask, countries, then duplicate indices and deltas) is fixed so the
/// same seed always reproduces the same tables.
pub struct OrderSynthesizer {
    rng: StdRng,
}

impl OrderSynthesizer {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        OrderSynthesizer {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds the clean base table: sequential IDs and hourly timestamps,
    /// random categories, quantities, prices, and raw country strings, with
    /// roughly `MISSING_RATE` of the `Total Amount` values nulled out.
    #[must_use]
    pub fn generate_clean(&mut self, n_rows: usize) -> Vec<OrderRecord> {
        // Column-major draws; one column must be fully drawn before the next
        // starts, or reproducibility across runs breaks.
        let categories: Vec<&str> = (0..n_rows)
            .map(|_| PRODUCT_CATEGORIES[self.rng.gen_range(0..PRODUCT_CATEGORIES.len())])
            .collect();
        let quantities: Vec<u32> = (0..n_rows).map(|_| self.rng.gen_range(1..10)).collect();
        let prices: Vec<Decimal> = (0..n_rows).map(|_| self.draw_price()).collect();
        let missing: Vec<bool> = (0..n_rows)
            .map(|_| self.rng.gen::<f64>() < MISSING_RATE)
            .collect();
        let countries: Vec<&str> = (0..n_rows)
            .map(|_| COUNTRIES_RAW[self.rng.gen_range(0..COUNTRIES_RAW.len())])
            .collect();

        let mut rows = Vec::with_capacity(n_rows);
        let mut order_date = base_order_date();
        for i in 0..n_rows {
            let quantity = quantities[i];
            let price = prices[i];
            let total_amount = if missing[i] {
                None
            } else {
                Some(price * Decimal::from(quantity))
            };
            rows.push(OrderRecord {
                order_id: format!("ORD{}", FIRST_ORDER_NUMBER + i),
                customer_name: format!("Customer_{i}"),
                order_date,
                product_category: categories[i].to_string(),
                quantity,
                price,
                total_amount,
                country: countries[i].to_string(),
            });
            order_date += Duration::hours(1);
        }

        let nulled = missing.iter().filter(|&&m| m).count();
        debug!("nulled {nulled} of {n_rows} Total Amount values");

        rows
    }

    /// Samples `count` source rows with replacement and returns perturbed
    /// copies: timestamp shifted by one second, quantity nudged by a delta
    /// from {-1, 0, +1} (floored at 1), and the total recomputed. A delta of
    /// zero can leave a copy identical to its source apart from the timestamp.
    #[must_use]
    pub fn duplicate_rows(&mut self, rows: &[OrderRecord], count: usize) -> Vec<OrderRecord> {
        let indices: Vec<usize> = (0..count)
            .map(|_| self.rng.gen_range(0..rows.len()))
            .collect();

        let mut duplicates = Vec::with_capacity(count);
        for index in indices {
            let mut row = rows[index].clone();
            row.order_date += Duration::seconds(1);
            let delta = QUANTITY_DELTAS[self.rng.gen_range(0..QUANTITY_DELTAS.len())];
            row.quantity = perturbed_quantity(row.quantity, delta);
            // Always recomputed, so a duplicate never carries a missing total
            // even when its source row did.
            row.total_amount = Some(row.computed_total());
            duplicates.push(row);
        }
        duplicates
    }

    fn draw_price(&mut self) -> Decimal {
        let raw: f64 = self.rng.gen_range(10.0..500.0);
        Decimal::from_f64(raw).map_or(Decimal::ZERO, |price| price.round_dp(NUM_DECIMAL_PLACES))
    }
}

fn perturbed_quantity(quantity: u32, delta: i64) -> u32 {
    u32::try_from((i64::from(quantity) + delta).max(1)).unwrap_or(1)
}

/// Applies a uniform random permutation to the rows. The permutation step
/// runs off its own generator seeded here, independent of the draws that
/// produced the rows.
pub fn shuffle_orders(rows: &mut [OrderRecord], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);
}

/// Serializes the rows to CSV at `path`, header included, replacing any
/// existing file.
///
/// # Errors
/// Errors when the file cannot be created or a record or the final flush
/// fails to write.
pub fn write_orders<P: AsRef<Path>>(path: P, rows: &[OrderRecord]) -> Result<(), SynthError> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
