use crate::error::{SenseError, SenseResult};
use regex::Regex;
use std::sync::LazyLock;
use serde::{Deserialize, Serialize};

/// Physical characteristics the engine scales against. Always validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub dpi: f64,
    pub refresh_rate: f64,
    pub screen_size: f64,
    pub gyro_range: Option<f64>,
}

impl DeviceProfile {
    pub fn new(
        dpi: f64,
        refresh_rate: f64,
        screen_size: f64,
        gyro_range: Option<f64>,
    ) -> SenseResult<Self> {
        require_positive("dpi", dpi)?;
        require_positive("refresh rate", refresh_rate)?;
        require_positive("screen size", screen_size)?;
        if let Some(g) = gyro_range {
            require_positive("gyro range", g)?;
        }
        Ok(Self {
            dpi,
            refresh_rate,
            screen_size,
            gyro_range,
        })
    }

    /// Derives the screen diagonal (inches) from the pixel resolution and density.
    pub fn from_resolution(
        resolution: Resolution,
        dpi: f64,
        refresh_rate: f64,
        gyro_range: Option<f64>,
    ) -> SenseResult<Self> {
        require_positive("dpi", dpi)?;
        let screen_size = resolution.diagonal_inches(dpi);
        Self::new(dpi, refresh_rate, screen_size, gyro_range)
    }
}

fn require_positive(field: &str, value: f64) -> SenseResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SenseError::InvalidDevice(format!(
            "{} must be a positive number, got {}",
            field, value
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn diagonal_inches(&self, dpi: f64) -> f64 {
        let w = self.width as f64;
        let h = self.height as f64;
        ((w * w + h * h).sqrt() / dpi * 100.0).round() / 100.0
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Resolution {
    type Err = SenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wm_size(s)
            .ok_or_else(|| SenseError::InvalidDevice(format!("'{}' is not a WIDTHxHEIGHT resolution", s)))
    }
}

/// Device metadata echoed into reports and records alongside the numeric profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model: String,
    pub brand: String,
    pub android: String,
    pub resolution: Option<Resolution>,
    pub profile: DeviceProfile,
}

impl DeviceInfo {
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let p = &self.profile;
        vec![
            ("Device", self.model.clone()),
            ("Brand", self.brand.clone()),
            ("Android", self.android.clone()),
            (
                "Resolution",
                self.resolution
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            ("DPI", format!("{}", p.dpi)),
            ("RefreshRate", format!("{}", p.refresh_rate)),
            ("ScreenSize", format!("{}", p.screen_size)),
            (
                "GyroRange",
                p.gyro_range
                    .map(|g| format!("{}", g))
                    .unwrap_or_else(|| "None".to_string()),
            ),
        ]
    }
}

// --- Shell output parsers ---

static WM_SIZE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").ok());
static DUMPSYS_RESOLUTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"width=(\d+), height=(\d+)").ok());
static DENSITY: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_all(&[r"Physical density: (\d+)", r"density (\d+)"]));
static REFRESH_RATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[r"refreshRate=(\d+\.\d+)", r"(?i)refresh\s*rate:?\s*(\d+\.?\d*)"])
});

/// Patterns are tried in order.
fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

/// `wm size` output, e.g. "Physical size: 1080x2400".
pub fn parse_wm_size(output: &str) -> Option<Resolution> {
    let caps = WM_SIZE.as_ref()?.captures(output)?;
    Some(Resolution {
        width: caps[1].parse().ok()?,
        height: caps[2].parse().ok()?,
    })
}

/// `dumpsys display` mBaseDisplayInfo line.
pub fn parse_dumpsys_resolution(output: &str) -> Option<Resolution> {
    let caps = DUMPSYS_RESOLUTION.as_ref()?.captures(output)?;
    Some(Resolution {
        width: caps[1].parse().ok()?,
        height: caps[2].parse().ok()?,
    })
}

/// Tries `wm density`, a bare `getprop ro.sf.lcd_density` value, then `dumpsys display`.
pub fn parse_density(output: &str) -> Option<f64> {
    let trimmed = output.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    for re in DENSITY.iter() {
        if let Some(caps) = re.captures(output) {
            return caps[1].parse().ok();
        }
    }
    None
}

pub fn parse_refresh_rate(output: &str) -> Option<f64> {
    let trimmed = output.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return Some(v);
    }
    for re in REFRESH_RATE.iter() {
        if let Some(caps) = re.captures(output) {
            return caps[1].parse().ok();
        }
    }
    None
}

#[derive(Deserialize)]
struct SensorSample {
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct SensorDump {
    #[serde(rename = "GYROSCOPE", default)]
    gyroscope: Vec<SensorSample>,
}

/// Reads a `termux-sensor -s GYROSCOPE -n 1` sample and returns its peak angular rate.
/// A sample needs three axes and some real motion (> 0.1 rad/s) to count.
pub fn parse_gyro_range(output: &str) -> Option<f64> {
    let dump: SensorDump = serde_json::from_str(output).ok()?;
    let values = &dump.gyroscope.first()?.values;
    if values.len() < 3 || !values.iter().any(|v| v.abs() > 0.1) {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some(min.abs().max(max.abs()))
}
