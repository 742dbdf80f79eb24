use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Widest aperture in every series.
pub const BASE_F_NUMBER: f64 = 1.0;

/// Number of full stops between [`BASE_F_NUMBER`] and f/32.
const FULL_STOPS: usize = 10;

// Engraved values for each scale, from f/1 to f/32.
const THIRD_STOP_LABELS: [f64; 31] = [
    1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3, 7.1, 8.0,
    9.0, 10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 29.0, 32.0,
];
const HALF_STOP_LABELS: [f64; 21] = [
    1.0, 1.2, 1.4, 1.7, 2.0, 2.4, 2.8, 3.3, 4.0, 4.8, 5.6, 6.7, 8.0, 9.5, 11.0, 13.0, 16.0, 19.0,
    22.0, 27.0, 32.0,
];
const FULL_STOP_LABELS: [f64; 11] = [
    1.0, 1.4, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0, 32.0,
];

/// Granularity of the aperture progression.
///
/// Persisted by index: `Third` is 0, `Half` is 1, `Full` is 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StopScale {
    #[default]
    Third,
    Half,
    Full,
}

impl StopScale {
    pub const ALL: [StopScale; 3] = [StopScale::Third, StopScale::Half, StopScale::Full];

    /// Number of steps each full stop is divided into.
    pub fn steps_per_stop(self) -> usize {
        match self {
            StopScale::Third => 3,
            StopScale::Half => 2,
            StopScale::Full => 1,
        }
    }

    /// Exact f-number of step `n`, `f0 * 2^(n / 2k)`.
    pub fn f_number(self, n: usize) -> f64 {
        BASE_F_NUMBER * 2f64.powf(n as f64 / (2 * self.steps_per_stop()) as f64)
    }

    /// Number of stops from f/1 through f/32 inclusive.
    pub fn len(self) -> usize {
        FULL_STOPS * self.steps_per_stop() + 1
    }

    pub fn index(self) -> usize {
        match self {
            StopScale::Third => 0,
            StopScale::Half => 1,
            StopScale::Full => 2,
        }
    }

    fn labels(self) -> &'static [f64] {
        match self {
            StopScale::Third => &THIRD_STOP_LABELS,
            StopScale::Half => &HALF_STOP_LABELS,
            StopScale::Full => &FULL_STOP_LABELS,
        }
    }

    /// Generates the full series for this scale.
    pub fn series(self) -> ApertureSeries {
        ApertureSeries::generate(self)
    }
}

impl TryFrom<usize> for StopScale {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        StopScale::ALL
            .get(index)
            .copied()
            .ok_or(Error::UnknownStopScale(index.to_string()))
    }
}

impl FromStr for StopScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "third" | "1/3" => Ok(StopScale::Third),
            "half" | "1/2" => Ok(StopScale::Half),
            "full" => Ok(StopScale::Full),
            _ => Err(Error::UnknownStopScale(s.to_string())),
        }
    }
}

impl fmt::Display for StopScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopScale::Third => write!(f, "Third"),
            StopScale::Half => write!(f, "Half"),
            StopScale::Full => write!(f, "Full"),
        }
    }
}

/// One selectable aperture.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FStop {
    /// Geometric f-number used for calculation.
    f_number: f64,
    /// Value engraved on the lens.
    label: f64,
}

impl FStop {
    pub fn f_number(&self) -> f64 {
        self.f_number
    }

    pub fn label(&self) -> f64 {
        self.label
    }
}

impl fmt::Display for FStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.fract() == 0.0 && self.label > BASE_F_NUMBER {
            write!(f, "f/{:.0}", self.label)
        } else {
            write!(f, "f/{:.1}", self.label)
        }
    }
}

/// Ordered f-numbers for one [`StopScale`], widest first.
#[derive(Clone, Debug, PartialEq)]
pub struct ApertureSeries {
    scale: StopScale,
    stops: Vec<FStop>,
}

impl ApertureSeries {
    pub fn generate(scale: StopScale) -> Self {
        let stops = (0..scale.len())
            .zip(scale.labels())
            .map(|(n, &label)| FStop {
                f_number: scale.f_number(n),
                label,
            })
            .collect();

        tracing::debug!(%scale, "generated aperture series");
        Self { scale, stops }
    }

    pub fn scale(&self) -> StopScale {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns the stop at selection `index`.
    pub fn get(&self, index: usize) -> Result<FStop, Error> {
        self.stops
            .get(index)
            .copied()
            .ok_or(Error::ApertureOutOfRange {
                index,
                len: self.stops.len(),
            })
    }

    /// Returns the f-number at selection `index`.
    pub fn f_number(&self, index: usize) -> Result<f64, Error> {
        self.get(index).map(|stop| stop.f_number())
    }

    /// Returns the index of the stop closest to `f_number` on a log scale.
    pub fn index_of_nearest(&self, f_number: f64) -> usize {
        let target = f_number.log2();
        self.stops
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (a.f_number.log2() - target).abs();
                let db = (b.f_number.log2() - target).abs();
                da.total_cmp(&db)
            })
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    pub fn stops(&self) -> &[FStop] {
        &self.stops
    }

    pub fn iter(&self) -> impl Iterator<Item = &FStop> {
        self.stops.iter()
    }

    /// Display labels such as `f/5.6`, in selection order.
    pub fn labels(&self) -> Vec<String> {
        self.stops.iter().map(ToString::to_string).collect()
    }
}

impl Default for ApertureSeries {
    fn default() -> Self {
        Self::generate(StopScale::default())
    }
}

impl<'a> IntoIterator for &'a ApertureSeries {
    type Item = &'a FStop;
    type IntoIter = std::slice::Iter<'a, FStop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}
