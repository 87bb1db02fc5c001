use super::Context;
use crate::reports;
use clap::Args;
use gamesense::benchmark::{measure_frame_rate, parse_touch_latency, BenchmarkResult};
use gamesense::error::SenseResult;
use std::process::Command;
use std::time::Duration;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct BenchmarkArgs {
    /// Length of the synthetic frame-rate test
    #[arg(long, default_value_t = 5)]
    pub duration_secs: u64,
}

impl Default for BenchmarkArgs {
    fn default() -> Self {
        Self { duration_secs: 5 }
    }
}

fn touch_latency() -> Option<f64> {
    match Command::new("dumpsys").arg("input").output() {
        Ok(out) if out.status.success() => {
            parse_touch_latency(&String::from_utf8_lossy(&out.stdout))
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Touch latency measurement failed: {}", e);
            None
        }
    }
}

pub fn run(ctx: &Context, args: &BenchmarkArgs) -> SenseResult<()> {
    println!(
        "\n=== DEVICE BENCHMARKING ===\nRunning a {}s frame-rate test...",
        args.duration_secs
    );
    let fps = measure_frame_rate(Duration::from_secs(args.duration_secs));
    let latency = touch_latency();
    if latency.is_none() {
        println!("⚠️  Touch latency unavailable; no performance score this run.");
    }

    let result = BenchmarkResult::new(fps, latency);
    reports::print_benchmark(&result);
    result.save(ctx.config.paths.benchmark_file())?;
    println!("✅ Benchmark results saved.");
    Ok(())
}
