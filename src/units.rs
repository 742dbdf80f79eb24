use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uom::si::{
    f64::Length,
    length::{foot, meter, millimeter},
};

pub(crate) const MM_PER_METER: f64 = 1000.0;
pub(crate) const MM_PER_FOOT: f64 = 304.8;
/// Published millimeter to feet factor applied to every displayed length.
pub(crate) const FEET_PER_MM: f64 = 0.0032808399;

/// Unit system used for focus distance input and for every length output.
///
/// Persisted by index: `Imperial` (feet) is 0, `Metric` (meters) is 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Imperial, UnitSystem::Metric];

    pub fn index(self) -> usize {
        match self {
            UnitSystem::Imperial => 0,
            UnitSystem::Metric => 1,
        }
    }

    pub fn is_metric(self) -> bool {
        self == UnitSystem::Metric
    }

    /// Abbreviation appended to rendered lengths.
    pub fn suffix(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    /// Interprets `value` as feet or meters.
    pub fn length(self, value: f64) -> Length {
        match self {
            UnitSystem::Imperial => Length::new::<foot>(value),
            UnitSystem::Metric => Length::new::<meter>(value),
        }
    }

    /// Expresses `length` in feet or meters.
    pub fn display(self, length: Length) -> f64 {
        self.from_mm(length.get::<millimeter>())
    }

    /// Millimeters per native unit.
    fn mm_per_unit(self) -> f64 {
        match self {
            UnitSystem::Imperial => MM_PER_FOOT,
            UnitSystem::Metric => MM_PER_METER,
        }
    }

    /// Converts a native feet or meters value to millimeters.
    pub(crate) fn to_mm(self, value: f64) -> f64 {
        value * self.mm_per_unit()
    }

    /// Converts millimeters to native feet or meters.
    ///
    /// Feet use [`FEET_PER_MM`] rather than the inverse of [`MM_PER_FOOT`].
    pub(crate) fn from_mm(self, mm: f64) -> f64 {
        match self {
            UnitSystem::Imperial => mm * FEET_PER_MM,
            UnitSystem::Metric => mm / MM_PER_METER,
        }
    }
}

/// Wraps a millimeter value computed by the formula set.
pub(crate) fn mm(value: f64) -> Length {
    Length::new::<millimeter>(value)
}

impl TryFrom<usize> for UnitSystem {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        UnitSystem::ALL
            .get(index)
            .copied()
            .ok_or(Error::UnknownUnitSystem(index.to_string()))
    }
}

impl FromStr for UnitSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ft" | "feet" | "imperial" => Ok(UnitSystem::Imperial),
            "m" | "meters" | "metric" => Ok(UnitSystem::Metric),
            _ => Err(Error::UnknownUnitSystem(s.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "Feet"),
            UnitSystem::Metric => write!(f, "Meters"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::relative_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;

    #[rstest]
    #[case(UnitSystem::Metric, 1000.0, 1.0)]
    #[case(UnitSystem::Metric, 2500.0, 2.5)]
    #[case(UnitSystem::Imperial, 304.8, 1.0)]
    #[case(UnitSystem::Imperial, 3048.0, 10.0)]
    fn display_from_millimeters(#[case] unit: UnitSystem, #[case] mm: f64, #[case] shown: f64) {
        assert!(relative_eq!(unit.display(super::mm(mm)), shown, max_relative = 1e-8));
        assert!(relative_eq!(unit.from_mm(mm), shown, max_relative = 1e-8));
    }

    #[test]
    fn imperial_display_uses_published_factor() {
        let per_mm = UnitSystem::Imperial.display(super::mm(1.0));
        assert!(relative_eq!(per_mm, 0.0032808399, max_relative = 1e-14));
        // The exact international foot would give 0.00328083989501...
        assert!((per_mm - 1.0 / 304.8).abs() > 1e-12);
    }

    #[rstest]
    #[case(UnitSystem::Imperial, "ft")]
    #[case(UnitSystem::Metric, "m")]
    fn suffix(#[case] unit: UnitSystem, #[case] expected: &str) {
        assert_eq!(unit.suffix(), expected);
    }

    #[test]
    fn parse_unit_system() {
        assert_eq!("Feet".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert_eq!("m".parse::<UnitSystem>(), Ok(UnitSystem::Metric));
        assert_eq!(UnitSystem::try_from(1), Ok(UnitSystem::Metric));
        assert!(UnitSystem::try_from(2).is_err());
        assert!("furlong".parse::<UnitSystem>().is_err());
    }

    quickcheck! {
        fn millimeter_roundtrip(seed: u32, metric: bool) -> bool {
            let unit = if metric { UnitSystem::Metric } else { UnitSystem::Imperial };
            let value = seed as f64 / 7.0;
            let shown = unit.display(super::mm(value));
            let back = unit.length(shown).get::<millimeter>();

            relative_eq!(back, value, epsilon = 1e-9, max_relative = 1e-8)
                && relative_eq!(unit.to_mm(unit.from_mm(value)), value, epsilon = 1e-9, max_relative = 1e-8)
        }
    }
}
