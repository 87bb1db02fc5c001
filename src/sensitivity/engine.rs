use super::scope::{ScopeTable, SensitivityTables, SCOPE_COUNT};
use crate::device::DeviceProfile;
use crate::error::{SenseError, SenseResult};
use crate::games::GameProfile;
use crate::player::PlayerStyle;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const BASE_SENSITIVITY: f64 = 150.0;
pub const REFERENCE_DPI: f64 = 440.0;
pub const REFERENCE_REFRESH_HZ: f64 = 120.0;
pub const REFERENCE_SCREEN_INCHES: f64 = 6.67;
pub const MIN_BASE: f64 = 50.0;
/// The base never exceeds this share of the game's cap, leaving room for the ladders.
pub const BASE_CAP_SHARE: f64 = 0.9;

// Per-scope coefficients, No ADS -> 8x Scope.
pub const CAMERA_LADDER: [f64; SCOPE_COUNT] = [1.0, 0.8, 0.7, 0.65, 0.6, 0.55, 0.5];
pub const FIRING_LADDER: [f64; SCOPE_COUNT] = [1.1, 0.85, 0.75, 0.7, 0.65, 0.6, 0.55];
pub const GYRO_LADDER: [f64; SCOPE_COUNT] = [0.9, 0.75, 0.65, 0.6, 0.55, 0.5, 0.45];

/// Multipliers for the camera, firing and gyro tables respectively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentFactor {
    pub cam_adjust: f64,
    pub fire_adjust: f64,
    pub gyro_adjust: f64,
}

impl Default for AdjustmentFactor {
    fn default() -> Self {
        Self::neutral()
    }
}

impl AdjustmentFactor {
    pub fn neutral() -> Self {
        Self::uniform(1.0)
    }

    pub fn uniform(value: f64) -> Self {
        Self {
            cam_adjust: value,
            fire_adjust: value,
            gyro_adjust: value,
        }
    }

    /// Stored factors come from disk, so anything non-finite or non-positive is rejected.
    pub fn validate(&self) -> SenseResult<()> {
        for (name, v) in [
            ("cam_adjust", self.cam_adjust),
            ("fire_adjust", self.fire_adjust),
            ("gyro_adjust", self.gyro_adjust),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SenseError::InvalidInput(format!(
                    "{} must be a positive multiplier, got {}",
                    name, v
                )));
            }
        }
        Ok(())
    }
}

/// The four scale bands feeding the base value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub dpi: f64,
    pub refresh: f64,
    pub screen: f64,
    pub style: f64,
}

impl ScaleFactors {
    pub fn new(device: &DeviceProfile, style: &PlayerStyle) -> Self {
        Self {
            dpi: (device.dpi / REFERENCE_DPI).clamp(0.5, 2.0),
            refresh: (device.refresh_rate / REFERENCE_REFRESH_HZ).clamp(0.8, 1.5),
            screen: (device.screen_size / REFERENCE_SCREEN_INCHES).clamp(0.7, 1.3),
            style: style.style_scale(),
        }
    }
}

/// Rounds the exact binary value to one decimal, ties to even (25.15 is stored as 25.1499..).
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Clamps into `[0, cap]` and rounds to one decimal. Every multiplicative stage ends here.
pub fn clamp_and_round(value: f64, cap: f64) -> f64 {
    round1(value.max(0.0).min(cap))
}

pub fn gyro_scale(gyro_range: f64) -> f64 {
    (gyro_range.ln_1p() / 2.0).clamp(0.5, 1.5)
}

/// Unrounded base sensitivity, bounded to `[50, cap * 0.9]`.
pub fn base_sensitivity(device: &DeviceProfile, style: &PlayerStyle, cap: f64) -> f64 {
    let s = ScaleFactors::new(device, style);
    let raw = BASE_SENSITIVITY * (1.0 / s.dpi) * s.refresh * s.screen * s.style;
    // Lower bound wins when the cap is tiny; entries are still clamped to the cap below.
    raw.min(cap * BASE_CAP_SHARE).max(MIN_BASE)
}

fn ladder(base: f64, coefficients: &[f64; SCOPE_COUNT], cap: f64) -> ScopeTable {
    let mut values = [0.0; SCOPE_COUNT];
    for (v, c) in values.iter_mut().zip(coefficients) {
        *v = clamp_and_round(base * c, cap);
    }
    ScopeTable::from_values(values)
}

pub fn compute_base(
    device: &DeviceProfile,
    style: &PlayerStyle,
    game: &GameProfile,
) -> SenseResult<SensitivityTables> {
    let cap = game.sensitivity_cap;
    if !cap.is_finite() || cap <= 0.0 {
        return Err(SenseError::InvalidGame(format!(
            "'{}' has a non-positive sensitivity cap ({})",
            game.name, cap
        )));
    }

    let base = base_sensitivity(device, style, cap);
    if !base.is_finite() {
        return Err(SenseError::Pipeline(format!(
            "base sensitivity is not finite for {:?}",
            device
        )));
    }
    debug!("Base sensitivity for {}: {:.3}", game.name, base);

    let gyro = device.gyro_range.map(|range| {
        let scale = gyro_scale(range);
        debug!("Gyro range {:.3} rad/s -> scale {:.3}", range, scale);
        ladder(base * scale, &GYRO_LADDER, cap)
    });

    Ok(SensitivityTables {
        camera: ladder(base, &CAMERA_LADDER, cap),
        firing: ladder(base, &FIRING_LADDER, cap),
        gyro,
    })
}

/// Multiplies each present table by its component of `factor`, clamping per entry.
pub fn apply_factor(
    tables: &SensitivityTables,
    factor: &AdjustmentFactor,
    cap: f64,
) -> SensitivityTables {
    SensitivityTables {
        camera: tables
            .camera
            .map(|_, v| clamp_and_round(v * factor.cam_adjust, cap)),
        firing: tables
            .firing
            .map(|_, v| clamp_and_round(v * factor.fire_adjust, cap)),
        gyro: tables
            .gyro
            .map(|g| g.map(|_, v| clamp_and_round(v * factor.gyro_adjust, cap))),
    }
}

/// Scales every table entry of a scope by that scope's multiplier.
pub fn apply_per_scope(
    tables: &SensitivityTables,
    multipliers: &[f64; SCOPE_COUNT],
    cap: f64,
) -> SensitivityTables {
    let scale = |t: &ScopeTable| t.map(|s, v| clamp_and_round(v * multipliers[s.index()], cap));
    SensitivityTables {
        camera: scale(&tables.camera),
        firing: scale(&tables.firing),
        gyro: tables.gyro.as_ref().map(scale),
    }
}

pub fn apply_uniform(tables: &SensitivityTables, multiplier: f64, cap: f64) -> SensitivityTables {
    apply_factor(tables, &AdjustmentFactor::uniform(multiplier), cap)
}
