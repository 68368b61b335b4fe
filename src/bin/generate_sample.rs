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
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (Entity, Code, base savings % of GDP, base GDP growth %)
    let countries: &[(&str, &str, f64, f64)] = &[
        ("Norway", "NOR", 34.0, 2.0),
        ("China", "CHN", 45.0, 8.0),
        ("Chile", "CHL", 21.0, 3.5),
        ("Germany", "DEU", 27.0, 1.5),
        ("United States", "USA", 18.0, 2.5),
        ("India", "IND", 30.0, 6.0),
        ("Brazil", "BRA", 16.0, 2.0),
        ("South Africa", "ZAF", 15.0, 1.8),
        ("Japan", "JPN", 28.0, 1.0),
        ("North Macedonia", "MKD", 24.0, 2.8),
        ("Chad", "TCD", 12.0, 2.2),
        ("Australia", "AUS", 23.0, 2.7),
    ];

    let years = 1990..=2019;

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Entity",
            "Code",
            "Year",
            "Gross savings (% of GDP)",
            "GDP growth (annual %)",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for year in years {
        for &(entity, code, base_savings, base_growth) in countries {
            // Slow drift over the decades plus yearly noise.
            let drift = (year - 1990) as f64 * 0.08;
            let savings = rng.gauss(base_savings + drift, 1.5).max(0.0);
            let growth = rng.gauss(base_growth, 1.0);

            // Poorer coverage for some country-years: leave cells empty so
            // the viewer has genuinely missing data to handle.
            let savings_cell = if rng.next_f64() < 0.06 {
                String::new()
            } else {
                format!("{savings:.2}")
            };
            let growth_cell = if rng.next_f64() < 0.10 {
                String::new()
            } else {
                format!("{growth:.2}")
            };

            writer
                .write_record([
                    entity,
                    code,
                    &year.to_string(),
                    &savings_cell,
                    &growth_cell,
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush CSV");
    println!("Wrote {rows} observations to {output_path}");
}
