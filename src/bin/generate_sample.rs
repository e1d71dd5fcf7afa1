use anyhow::{Context, Result};
use serde::Serialize;

/// One row in the layout of the Diwali sales export.
#[derive(Serialize)]
struct SalesRecord {
    #[serde(rename = "User_ID")]
    user_id: u64,
    #[serde(rename = "Cust_name")]
    cust_name: &'static str,
    #[serde(rename = "Product_ID")]
    product_id: String,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "Age Group")]
    age_group: &'static str,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Marital_Status")]
    marital_status: u8,
    #[serde(rename = "State")]
    state: &'static str,
    #[serde(rename = "Zone")]
    zone: &'static str,
    #[serde(rename = "Occupation")]
    occupation: &'static str,
    #[serde(rename = "Product_Category")]
    product_category: &'static str,
    #[serde(rename = "Orders")]
    orders: u32,
    #[serde(rename = "Amount")]
    amount: Option<f64>,
    #[serde(rename = "Status")]
    status: Option<&'static str>,
    unnamed1: Option<f64>,
}

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn age_group(age: u32) -> &'static str {
    match age {
        0..=17 => "0-17",
        18..=25 => "18-25",
        26..=35 => "26-35",
        36..=45 => "36-45",
        46..=50 => "46-50",
        51..=55 => "51-55",
        _ => "55+",
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let names = ["Sanskriti", "Kartik", "Bindu", "Sudevi", "Joni", "Balk", "Shivangi", "Kushal"];
    let states = [
        ("Maharashtra", "Western"),
        ("Andhra Pradesh", "Southern"),
        ("Uttar Pradesh", "Central"),
        ("Karnataka", "Southern"),
        ("Gujarat", "Western"),
        ("Delhi", "Central"),
        ("Bihar", "Eastern"),
        ("Punjab", "Northern"),
    ];
    let occupations = ["Healthcare", "Govt", "Automobile", "Construction", "IT Sector", "Banking"];
    let categories = [
        ("Auto", 4000.0),
        ("Clothing & Apparel", 7000.0),
        ("Electronics & Gadgets", 12000.0),
        ("Food", 9000.0),
        ("Footwear & Shoes", 11000.0),
        ("Furniture", 6500.0),
    ];

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let n_rows = 500;
    for i in 0..n_rows {
        let age = rng.gauss(34.0, 10.0).clamp(12.0, 80.0) as u32;
        let (state, zone) = rng.pick(&states);
        let (category, typical_amount) = rng.pick(&categories);

        // a handful of rows with no amount, like the real export
        let amount = if i % 97 == 13 {
            None
        } else {
            Some(rng.gauss(typical_amount, typical_amount * 0.3).max(188.0).round())
        };

        let record = SalesRecord {
            user_id: 1_000_001 + i,
            cust_name: rng.pick(&names),
            product_id: format!("P00{:06}", rng.next_u64() % 1_000_000),
            gender: if rng.next_f64() < 0.7 { "F" } else { "M" },
            age_group: age_group(age),
            age,
            marital_status: (rng.next_f64() < 0.42) as u8,
            state,
            zone,
            occupation: rng.pick(&occupations),
            product_category: category,
            orders: 1 + (rng.next_u64() % 4) as u32,
            amount,
            status: None,
            unnamed1: None,
        };
        writer
            .serialize(&record)
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {n_rows} sales rows to {output_path}");
    Ok(())
}
