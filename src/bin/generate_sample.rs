//! Writes a deterministic Superstore-shaped sample CSV for trying out the
//! dashboard without the real dataset:
//!
//! ```text
//! cargo run --bin generate_sample [output.csv]
//! ```

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};

const CATEGORIES: [(&str, [&str; 4]); 3] = [
    ("Furniture", ["Bookcases", "Chairs", "Tables", "Furnishings"]),
    ("Office Supplies", ["Binders", "Paper", "Storage", "Appliances"]),
    ("Technology", ["Phones", "Accessories", "Machines", "Copiers"]),
];
const SEGMENTS: [&str; 3] = ["Consumer", "Corporate", "Home Office"];
const REGIONS: [&str; 4] = ["East", "West", "Central", "South"];

const N_ORDERS: usize = 500;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform float in [0, 1).
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normally distributed value (Box–Muller).
    fn gauss(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.uniform().max(f64::MIN_POSITIVE);
        let u2 = self.uniform();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mu + sigma * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Sample - Superstore.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2015, 1, 3).context("invalid start date")?;

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {output}"))?;
    writer.write_record([
        "Order ID",
        "Order Date",
        "Category",
        "Sub-Category",
        "Segment",
        "Region",
        "Sales",
        "Profit",
    ])?;

    let mut n_rows = 0usize;
    for order in 0..N_ORDERS {
        let date = start
            .checked_add_days(Days::new(rng.next_u64() % 1095))
            .context("date out of range")?;
        let order_id = format!("CA-{}-{}", date.format("%Y"), 100_000 + order);
        let date_text = date.format("%m/%d/%Y").to_string();
        let segment = *rng.pick(&SEGMENTS);
        let region = *rng.pick(&REGIONS);

        // 1–3 lines per order, each line its own product.
        let lines = 1 + rng.next_u64() % 3;
        for _ in 0..lines {
            let (category, sub_categories) = *rng.pick(&CATEGORIES);
            let sub_category = *rng.pick(&sub_categories);

            let sales = round_cents(8.0 + rng.uniform() * 1200.0);
            // Margins hover around 12% and occasionally go negative.
            let profit = round_cents(sales * rng.gauss(0.12, 0.18));

            let sales_text = sales.to_string();
            let profit_text = profit.to_string();
            writer.write_record([
                order_id.as_str(),
                date_text.as_str(),
                category,
                sub_category,
                segment,
                region,
                sales_text.as_str(),
                profit_text.as_str(),
            ])?;
            n_rows += 1;
        }
    }

    writer.flush()?;
    println!("Wrote {n_rows} records ({N_ORDERS} orders) to {output}");
    Ok(())
}
