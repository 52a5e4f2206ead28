/// System health score: battery, disk, and memory headroom folded into
/// one number.
///
/// Each component is a percentage (battery wear, free disk, available RAM)
/// and the score is their plain average, rounded to two decimals half away
/// from zero. Any zero or negative denominator yields a score of exactly
/// `0.0` instead of NaN or infinity.
///
/// Scores are not clamped: a battery reporting more than its design
/// capacity pushes the score above 100, mirroring the raw readings.
use serde::{Deserialize, Serialize};

/// Battery capacity pair in the units the battery reports (mWh, Wh, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    pub designed_capacity: f64,
    pub current_capacity: f64,
}

impl BatteryReading {
    /// Used when the host has no battery reading (desktops, or a caller
    /// that does not supply one): a battery at full design capacity.
    pub const NOMINAL: Self = Self {
        designed_capacity: 100.0,
        current_capacity: 100.0,
    };
}

/// Disk capacity in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskReading {
    pub total: u64,
    pub free: u64,
}

/// Physical memory in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamReading {
    pub total: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthInputs {
    pub battery: BatteryReading,
    pub disk: DiskReading,
    pub ram: RamReading,
}

/// Composite 0–100 health score. Pure; never panics, never returns NaN.
pub fn health_score(inputs: &HealthInputs) -> f64 {
    let HealthInputs { battery, disk, ram } = inputs;

    // `!(x > 0.0)` also rejects NaN.
    if !(battery.designed_capacity > 0.0) || disk.total == 0 || ram.total == 0 {
        return 0.0;
    }

    // Multiply before dividing so exact inputs stay exact.
    let battery_health = 100.0 * battery.current_capacity / battery.designed_capacity;
    let disk_health = 100.0 * disk.free as f64 / disk.total as f64;
    let ram_health = 100.0 * ram.available as f64 / ram.total as f64;

    round2((battery_health + disk_health + ram_health) / 3.0)
}

/// Round to two decimals, halves away from zero.
///
/// Works on the shortest decimal form of `value` rather than its binary
/// expansion, so `33.335` (stored as 33.33499…) still rounds to `33.34`.
fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let text = format!("{}", value.abs());
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let Ok(int) = int.parse::<i128>() else {
        // Too large for cents to matter.
        return value;
    };
    let digit = |i: usize| frac.as_bytes().get(i).map_or(0, |b| i128::from(b - b'0'));
    let mut cents = int * 100 + digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        cents += 1;
    }
    (cents as f64 / 100.0).copysign(value)
}
