use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use web_summary_viewer::data::model::Record;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a deterministic scraped_summary.csv for trying out the viewer")]
pub struct Args {
    /// CSV file to write
    #[arg(default_value = "scraped_summary.csv")]
    pub output: PathBuf,

    /// Number of pages to generate
    #[arg(default_value_t = 200)]
    pub count: usize,
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const TOPICS: [&str; 8] = [
    "Rust", "Databases", "Cooking", "Gardening", "Astronomy", "Cats", "Cycling", "Finance",
];
const KINDS: [&str; 5] = ["Guide", "News", "Blog", "Docs", "Forum"];
const ADJECTIVES: [&str; 5] = ["practical", "beginner-friendly", "in-depth", "quick", "opinionated"];

fn make_record(i: usize, rng: &mut SimpleRng) -> Record {
    let topic = rng.pick(&TOPICS);
    let kind = rng.pick(&KINDS);
    let adjective = rng.pick(&ADJECTIVES);
    let url = format!(
        "https://{}.example.com/{}/{i}",
        topic.to_lowercase(),
        kind.to_lowercase()
    );

    let mut record = Record::new(url);

    // Mirror the scraper's fallbacks so the viewer sees realistic gaps.
    if rng.chance(0.9) {
        record = record.with_title(format!("{topic} {kind} #{i}"));
    } else {
        record = record.with_title("No title found");
    }
    if rng.chance(0.8) {
        record = record.with_meta_description(format!(
            "A {adjective} {} about {topic}, with tips, links and \"quoted\" advice.",
            kind.to_lowercase()
        ));
    }
    if rng.chance(0.85) {
        record = record.with_ai_summary(format!(
            "This page is a {adjective} {} on {topic}.\nIt covers the basics, common pitfalls, and further reading.",
            kind.to_lowercase()
        ));
    } else {
        record = record.with_ai_summary("No meaningful paragraph found to summarize.");
    }
    record
}

fn main() -> Result<()> {
    let Args {
        output: output_path,
        count,
    } = Args::parse();

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for i in 0..count {
        writer
            .serialize(make_record(i, &mut rng))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {count} pages to {}", output_path.display());
    Ok(())
}
