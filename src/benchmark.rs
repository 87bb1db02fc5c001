use crate::error::SenseResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Work done per synthetic frame.
const FRAME_WORK: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub timestamp: String,
    pub fps: Option<f64>,
    pub touch_latency: Option<f64>,
    pub performance_score: Option<f64>,
}

impl BenchmarkResult {
    pub fn new(fps: Option<f64>, touch_latency: Option<f64>) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            fps,
            touch_latency,
            performance_score: performance_score(fps, touch_latency),
        }
    }

    pub fn suggestion(&self) -> f64 {
        sensitivity_suggestion(self.performance_score)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SenseResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Benchmark results saved to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SenseResult<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

/// Runs a game-like synthetic load for `duration` and reports frames per second.
pub fn measure_frame_rate(duration: Duration) -> Option<f64> {
    if duration.is_zero() {
        return None;
    }
    let mut rng = fastrand::Rng::new();
    let start = Instant::now();
    let mut frames: u64 = 0;

    while start.elapsed() < duration {
        let mut acc = 0u64;
        for _ in 0..FRAME_WORK {
            acc = acc.wrapping_add(rng.u64(..16));
        }
        black_box(acc);
        frames += 1;
    }

    let fps = frames as f64 / duration.as_secs_f64();
    debug!("Synthetic frame test: {} frames in {:?}", frames, duration);
    Some(fps)
}

/// First `TouchLatency` line of `dumpsys input`; the value is its last token.
pub fn parse_touch_latency(output: &str) -> Option<f64> {
    output
        .lines()
        .find(|l| l.contains("TouchLatency"))
        .and_then(|l| l.split_whitespace().last())
        .and_then(|tok| tok.parse().ok())
}

/// Mean of the normalized frame-rate score (60..120 fps) and latency score (0..100 ms).
pub fn performance_score(fps: Option<f64>, latency: Option<f64>) -> Option<f64> {
    let (fps, latency) = (fps?, latency?);
    let fps_score = ((fps - 60.0) / 0.6).clamp(0.0, 100.0);
    let latency_score = (100.0 - latency).clamp(0.0, 100.0);
    Some(((fps_score + latency_score) / 2.0 * 100.0).round() / 100.0)
}

/// Advisory multiplier for the player. Not fed into the calculation.
pub fn sensitivity_suggestion(score: Option<f64>) -> f64 {
    match score {
        Some(s) if s >= 80.0 => 1.1,
        Some(s) if s <= 40.0 => 0.9,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_from_first_matching_line() {
        let out = "Input Dispatcher:\n  TouchLatency avg 23.5\n  TouchLatency avg 99\n";
        assert_eq!(parse_touch_latency(out), Some(23.5));
        assert_eq!(parse_touch_latency("no stats"), None);
        assert_eq!(parse_touch_latency("TouchLatency n/a"), None);
    }

    #[test]
    fn score_needs_both_inputs() {
        assert_eq!(performance_score(Some(120.0), None), None);
        assert_eq!(performance_score(None, Some(10.0)), None);
        assert_eq!(performance_score(Some(120.0), Some(0.0)), Some(100.0));
        assert_eq!(performance_score(Some(30.0), Some(150.0)), Some(0.0));
        // fps 90 -> 50, latency 20 -> 80
        assert_eq!(performance_score(Some(90.0), Some(20.0)), Some(65.0));
    }

    #[test]
    fn suggestion_thresholds() {
        assert_eq!(sensitivity_suggestion(Some(80.0)), 1.1);
        assert_eq!(sensitivity_suggestion(Some(40.0)), 0.9);
        assert_eq!(sensitivity_suggestion(Some(60.0)), 1.0);
        assert_eq!(sensitivity_suggestion(None), 1.0);
    }

    #[test]
    fn short_frame_test_counts_frames() {
        let fps = measure_frame_rate(Duration::from_millis(50)).unwrap();
        assert!(fps > 0.0);
        assert_eq!(measure_frame_rate(Duration::ZERO), None);
    }
}
