use clap::Args;
use gamesense::device::{
    parse_density, parse_dumpsys_resolution, parse_gyro_range, parse_refresh_rate, parse_wm_size,
    DeviceInfo, DeviceProfile, Resolution,
};
use gamesense::error::SenseResult;
use gamesense::prompt::Prompter;
use std::io::{BufRead, Write};
use std::process::Command;
use tracing::{debug, warn};

const DEFAULT_DPI: f64 = 440.0;
const DEFAULT_REFRESH: f64 = 60.0;
const DEFAULT_SCREEN: f64 = 6.5;

#[derive(Args, Debug, Clone, Default)]
pub struct DeviceArgs {
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub dpi: Option<f64>,
    #[arg(long)]
    pub refresh_rate: Option<f64>,
    /// WIDTHxHEIGHT in pixels
    #[arg(long)]
    pub resolution: Option<Resolution>,
    /// Diagonal in inches; derived from resolution and DPI when omitted
    #[arg(long)]
    pub screen_size: Option<f64>,
    #[arg(long)]
    pub gyro_range: Option<f64>,
    #[arg(long, default_value_t = false, conflicts_with = "gyro_range")]
    pub no_gyro: bool,
}

impl DeviceArgs {
    /// Enough was given on the command line that no shell probing is needed.
    pub fn is_complete(&self) -> bool {
        self.dpi.is_some()
            && self.refresh_rate.is_some()
            && (self.screen_size.is_some() || self.resolution.is_some())
    }
}

/// What the device shell reported. Every field may be missing off-device.
#[derive(Debug, Clone, Default)]
pub struct Probed {
    pub model: Option<String>,
    pub brand: Option<String>,
    pub android: Option<String>,
    pub resolution: Option<Resolution>,
    pub dpi: Option<f64>,
    pub refresh_rate: Option<f64>,
    pub gyro_range: Option<f64>,
}

fn shell(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program).args(args).output() {
        Ok(o) => o,
        Err(e) => {
            debug!("{} {:?} unavailable: {}", program, args, e);
            return None;
        }
    };
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn getprop(key: &str) -> Option<String> {
    shell("getprop", &[key])
}

pub fn probe_device() -> Probed {
    let resolution = shell("wm", &["size"])
        .as_deref()
        .and_then(parse_wm_size)
        .or_else(|| {
            shell("dumpsys", &["display"])
                .as_deref()
                .and_then(parse_dumpsys_resolution)
        });

    let dpi = shell("wm", &["density"])
        .as_deref()
        .and_then(parse_density)
        .or_else(|| getprop("ro.sf.lcd_density").as_deref().and_then(parse_density))
        .or_else(|| shell("dumpsys", &["display"]).as_deref().and_then(parse_density));

    let refresh_rate = shell("dumpsys", &["display"])
        .as_deref()
        .and_then(parse_refresh_rate)
        .or_else(|| {
            getprop("persist.sys.display.refresh_rate")
                .as_deref()
                .and_then(parse_refresh_rate)
        });

    let gyro_range = shell("termux-sensor", &["-s", "GYROSCOPE", "-n", "1", "-d", "100"])
        .as_deref()
        .and_then(parse_gyro_range);

    let probed = Probed {
        model: getprop("ro.product.model"),
        brand: getprop("ro.product.brand"),
        android: getprop("ro.build.version.release"),
        resolution,
        dpi,
        refresh_rate,
        gyro_range,
    };
    debug!("Probed device: {:?}", probed);
    probed
}

/// Flags win over probed values; anything still missing is asked for.
pub fn resolve_device<R: BufRead, W: Write>(
    args: &DeviceArgs,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<DeviceInfo> {
    let probed = if args.is_complete() {
        Probed::default()
    } else {
        println!("\n📱 Detecting device...");
        probe_device()
    };

    let dpi = match args.dpi.or(probed.dpi) {
        Some(d) => d,
        None => {
            warn!("DPI detection failed, asking the user");
            prompter.number("Enter DPI", DEFAULT_DPI)?
        }
    };
    let refresh_rate = match args.refresh_rate.or(probed.refresh_rate) {
        Some(r) => r,
        None => {
            warn!("Refresh rate detection failed, asking the user");
            prompter.number("Enter refresh rate (Hz)", DEFAULT_REFRESH)?
        }
    };
    let resolution = args.resolution.or(probed.resolution);
    let gyro_range = if args.no_gyro {
        None
    } else {
        args.gyro_range.or(probed.gyro_range)
    };

    let profile = match (args.screen_size, resolution) {
        (Some(size), _) => DeviceProfile::new(dpi, refresh_rate, size, gyro_range)?,
        (None, Some(res)) => DeviceProfile::from_resolution(res, dpi, refresh_rate, gyro_range)?,
        (None, None) => {
            let size = prompter.number("Enter screen size (inches)", DEFAULT_SCREEN)?;
            DeviceProfile::new(dpi, refresh_rate, size, gyro_range)?
        }
    };

    Ok(DeviceInfo {
        model: args
            .model
            .clone()
            .or(probed.model)
            .unwrap_or_else(|| "Unknown".to_string()),
        brand: probed.brand.unwrap_or_else(|| "Unknown".to_string()),
        android: probed.android.unwrap_or_else(|| "Unknown".to_string()),
        resolution,
        profile,
    })
}
