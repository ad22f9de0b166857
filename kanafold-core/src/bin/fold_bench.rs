//! Character Filter Benchmarking Tool
//!
//! Measures throughput of each character filter, and of the full pipeline,
//! on a large UTF-8 text file such as a dump of product titles or article
//! abstracts.
//!
//! ## Usage
//!
//! ```bash
//! # Canonical pipeline, no mappings
//! ./target/release/fold_bench /path/to/corpus.txt
//!
//! # Pipeline described by a JSON config (mappings and/or stage order)
//! ./target/release/fold_bench /path/to/corpus.txt /path/to/kanafold.json
//! ```
//!
//! Set `RUST_LOG=kanafold_core=debug` to see how the pipeline was built.
//!
//! ## Example Output
//!
//! Each stage runs alone over the raw input, then the full pipeline runs.
//! `bytes %` and `chars %` are the size change from input to output.
//!
//! ```text
//! stage                            best ms   mean ms    MiB/s   bytes %   chars %
//! mapping                            61.20     62.05   1633.9      +0.0      +0.0
//! full_width_to_half_width          288.41    291.77    346.7      -4.8      +0.0
//! compatibility_normalization       402.93    410.12    248.2      +0.6      +0.3
//! pipeline                         1702.55   1711.30     58.7      -9.1      -3.4
//! ```
//!
//! Build in release mode and use a large input (100MB+) for stable numbers.

use std::env;
use std::fmt;
use std::fs;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use kanafold_core::analyzer::pipeline::CANONICAL_STAGES;
use kanafold_core::{CharFilter, Pipeline, PipelineConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: fold_bench <path> [config.json]");
        return ExitCode::FAILURE;
    }

    match run(&args[1], args.get(2).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, config_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(p) => PipelineConfig::from_path(p)?,
        None => PipelineConfig::default(),
    };

    println!("Loading file...");
    let input = fs::read_to_string(path)?;

    println!("File size: {:.2} MiB", mib(input.len()));
    println!("Mappings:  {}", config.mappings.len());
    println!("Stages:    {}\n", config.stages.join(" -> "));
    println!("{}", StageReport::header());

    for kind in config.stage_kinds()? {
        let single = Pipeline::builder()
            .mappings(&config.mappings)
            .stage(kind)
            .build()?;
        println!("{}", bench(kind.as_str(), &single, &input));
    }

    let full = config.build()?;
    println!("{}", bench("pipeline", &full, &input));

    if full.stages() != CANONICAL_STAGES {
        println!("(custom stage order)");
    }

    Ok(())
}

fn bench(label: &str, filter: &dyn CharFilter, input: &str) -> StageReport {
    let mut out = String::with_capacity(input.len());
    let mut run_once = || {
        filter.filter_into(input, &mut out);
        std::hint::black_box(&out);
    };

    (0..WARMUP_RUNS).for_each(|_| run_once());

    let mut best = Duration::MAX;
    let mut total = Duration::ZERO;
    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        run_once();
        let took = start.elapsed();
        best = best.min(took);
        total += took;
    }

    StageReport {
        label: label.to_owned(),
        best,
        mean: total / MEASURE_RUNS as u32,
        input_bytes: input.len(),
        input_chars: input.chars().count(),
        output_bytes: out.len(),
        output_chars: out.chars().count(),
    }
}

/// Timing and size change of one stage over the whole input.
struct StageReport {
    label: String,
    best: Duration,
    mean: Duration,
    input_bytes: usize,
    input_chars: usize,
    output_bytes: usize,
    output_chars: usize,
}

impl StageReport {
    fn header() -> String {
        format!(
            "{:<30} {:>9} {:>9} {:>8} {:>9} {:>9}",
            "stage", "best ms", "mean ms", "MiB/s", "bytes %", "chars %"
        )
    }

    fn mib_per_sec(&self) -> f64 {
        mib(self.input_bytes) / self.best.as_secs_f64()
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<30} {:>9.2} {:>9.2} {:>8.1} {:>9} {:>9}",
            self.label,
            self.best.as_secs_f64() * 1e3,
            self.mean.as_secs_f64() * 1e3,
            self.mib_per_sec(),
            growth(self.input_bytes, self.output_bytes),
            growth(self.input_chars, self.output_chars),
        )
    }
}

fn mib(bytes: usize) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Signed size change in percent. Width folding shrinks bytes while keeping
/// chars; NFKC expansions grow both.
fn growth(before: usize, after: usize) -> String {
    if before == 0 {
        return "-".to_owned();
    }
    let pct = (after as f64 - before as f64) * 100.0 / before as f64;
    format!("{pct:+.1}")
}
