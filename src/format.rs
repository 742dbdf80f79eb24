//! Deterministic decimal rendering for display.
//!
//! Values are rendered from their shortest round-trip decimal representation
//! and cut at the requested precision, so results do not depend on locale or
//! on the rounding mode of the platform's float formatting.

use crate::units::UnitSystem;

/// Digits after the decimal separator on every rendered result.
pub const PRECISION: usize = 2;

/// Rendered in place of a far limit that lies at infinity.
pub const INFINITY: &str = "\u{221e}";

pub const DEGREE: &str = "\u{00b0}";

/// Rounds half-up to `precision` digits.
///
/// Adds `0.5 / 10^precision` and truncates, so `0.125` becomes `0.13`
/// rather than the `0.12` a round-half-even formatter would produce.
pub fn round(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    truncate(value + 0.5 / 10f64.powi(precision as i32), precision)
}

/// Like [`round`], but renders any negative value as [`INFINITY`].
///
/// A far limit or behind distance goes negative once the focus distance
/// passes the hyperfocal distance.
pub fn round_depth_of_field(value: f64, precision: usize) -> String {
    if value < 0.0 {
        INFINITY.to_string()
    } else {
        round(value, precision)
    }
}

/// Drops digits beyond `precision` without rounding.
///
/// Always renders exactly `precision` fractional digits.
pub fn truncate(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    // `Display` for f64 never switches to exponent notation.
    let repr = value.to_string();
    let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    if precision == 0 {
        return integer.to_string();
    }

    let digits: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(precision)
        .collect();
    format!("{integer}.{digits}")
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        format!("-{INFINITY}")
    } else {
        INFINITY.to_string()
    }
}

/// Renders a length already expressed in `unit`, e.g. `77.25 ft`.
pub fn length(value: f64, unit: UnitSystem) -> String {
    format!("{} {}", round(value, PRECISION), unit.suffix())
}

/// Renders a far limit or behind distance, substituting [`INFINITY`] for
/// negative values.
pub fn depth_of_field(value: f64, unit: UnitSystem) -> String {
    format!("{} {}", round_depth_of_field(value, PRECISION), unit.suffix())
}

/// Renders an angle in degrees, e.g. `39.59°`.
pub fn degrees(value: f64) -> String {
    format!("{}{DEGREE}", round(value, PRECISION))
}
