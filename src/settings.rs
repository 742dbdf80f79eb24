use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const APERTURE_SCALE_KEY: &str = "apertureScale";
const CAMERA_KEY: &str = "camera";
const UNIT_KEY: &str = "unit";
const FOCAL_LENGTH_KEY: &str = "focalLength";
const APERTURE_KEY: &str = "aperture";
const FOCUS_DISTANCE_KEY: &str = "focusDistance";
const DELIMITER: char = '=';

/// Last used selections, persisted by the caller as `key=value` records.
///
/// Indices refer to [`StopScale`](crate::aperture::StopScale),
/// [`CameraProfile::catalog`](crate::camera::CameraProfile::catalog),
/// [`UnitSystem`](crate::units::UnitSystem), and the aperture series for the
/// selected scale.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Settings {
    pub aperture_scale: usize,
    pub camera: usize,
    pub unit: usize,
    pub focal_length: u32,
    pub aperture: usize,
    pub focus_distance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aperture_scale: 0,
            camera: 0,
            unit: 0,
            focal_length: 50,
            aperture: 0,
            focus_distance: 10.0,
        }
    }
}

impl Settings {
    /// Reads `key=value` lines over the defaults.
    ///
    /// Unknown keys, blank lines, and `#` comments are skipped. A later record
    /// for the same key replaces an earlier one.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut settings = Self::default();
        for (key, value) in records(text) {
            settings.apply(key, value?)?;
        }

        Ok(settings)
    }

    /// Like [`Settings::parse`], but a malformed record keeps the default.
    pub fn parse_lenient(text: &str) -> Self {
        let mut settings = Self::default();
        for (key, value) in records(text) {
            if let Err(err) = value.and_then(|value| settings.apply(key, value)) {
                tracing::warn!(%err, "keeping default setting");
            }
        }

        settings
    }

    /// Returns every setting as a `(key, value)` record.
    pub fn to_records(&self) -> Vec<(&'static str, String)> {
        vec![
            (APERTURE_SCALE_KEY, self.aperture_scale.to_string()),
            (CAMERA_KEY, self.camera.to_string()),
            (UNIT_KEY, self.unit.to_string()),
            (FOCAL_LENGTH_KEY, self.focal_length.to_string()),
            (APERTURE_KEY, self.aperture.to_string()),
            (FOCUS_DISTANCE_KEY, self.focus_distance.to_string()),
        ]
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            APERTURE_SCALE_KEY => self.aperture_scale = parse_value(key, value)?,
            CAMERA_KEY => self.camera = parse_value(key, value)?,
            UNIT_KEY => self.unit = parse_value(key, value)?,
            FOCAL_LENGTH_KEY => self.focal_length = parse_value(key, value)?,
            APERTURE_KEY => self.aperture = parse_value(key, value)?,
            FOCUS_DISTANCE_KEY => self.focus_distance = parse_value(key, value)?,
            _ => tracing::debug!(key, "ignoring unknown setting"),
        }

        Ok(())
    }
}

/// Splits `text` into `(key, value)` pairs, with an error for lines that
/// lack a delimiter.
fn records(text: &str) -> impl Iterator<Item = (&str, Result<&str, Error>)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once(DELIMITER) {
            Some((key, value)) => (key.trim(), Ok(value.trim())),
            None => (
                line,
                Err(Error::InvalidSetting {
                    key: line.to_string(),
                    value: String::new(),
                }),
            ),
        })
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    value.parse().map_err(|_| Error::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.to_records() {
            writeln!(f, "{key}{DELIMITER}{value}")?;
        }

        Ok(())
    }
}

impl FromStr for Settings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Settings::parse(s)
    }
}
