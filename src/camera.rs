use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uom::si::{f64::Length, length::millimeter};

/// Diagonal of a 36x24 mm frame, the reference for crop factors.
const FULL_FRAME_DIAGONAL_MM: f64 = 43.266_615_305_567_87;

/// Sensor geometry and circle of confusion for a camera body.
///
/// Lengths are stored in millimeters and exposed as [`Length`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CameraProfile {
    model: Cow<'static, str>,
    width_mm: f64,
    height_mm: f64,
    circle_of_confusion_mm: f64,
}

impl CameraProfile {
    const fn preset(
        model: &'static str,
        width_mm: f64,
        height_mm: f64,
        circle_of_confusion_mm: f64,
    ) -> Self {
        Self {
            model: Cow::Borrowed(model),
            width_mm,
            height_mm,
            circle_of_confusion_mm,
        }
    }

    /// Creates a custom profile.
    ///
    /// Returns an error unless every length is strictly positive and finite.
    pub fn new(
        model: impl Into<String>,
        width: Length,
        height: Length,
        circle_of_confusion: Length,
    ) -> Result<Self, Error> {
        let model = model.into();
        let (width_mm, height_mm, circle_of_confusion_mm) = (
            width.get::<millimeter>(),
            height.get::<millimeter>(),
            circle_of_confusion.get::<millimeter>(),
        );

        let valid = [width_mm, height_mm, circle_of_confusion_mm]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !valid {
            return Err(Error::InvalidProfile { model });
        }

        Ok(Self {
            model: Cow::Owned(model),
            width_mm,
            height_mm,
            circle_of_confusion_mm,
        })
    }

    /// Returns the catalog preset at `index`.
    ///
    /// The same index always refers to the same preset so persisted
    /// selections stay valid.
    pub fn get(index: usize) -> Result<&'static CameraProfile, Error> {
        CATALOG.get(index).ok_or(Error::CameraOutOfRange {
            index,
            len: CATALOG.len(),
        })
    }

    /// Returns every catalog preset in selection order.
    pub fn catalog() -> &'static [CameraProfile] {
        &CATALOG
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn width(&self) -> Length {
        Length::new::<millimeter>(self.width_mm)
    }

    pub fn height(&self) -> Length {
        Length::new::<millimeter>(self.height_mm)
    }

    pub fn circle_of_confusion(&self) -> Length {
        Length::new::<millimeter>(self.circle_of_confusion_mm)
    }

    /// Returns the sensor diagonal, `sqrt(width^2 + height^2)`.
    pub fn diagonal(&self) -> Length {
        Length::new::<millimeter>(self.diagonal_mm())
    }

    /// Ratio of the 35 mm full frame diagonal to this sensor's diagonal.
    pub fn crop_factor(&self) -> f64 {
        FULL_FRAME_DIAGONAL_MM / self.diagonal_mm()
    }

    pub(crate) fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub(crate) fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub(crate) fn diagonal_mm(&self) -> f64 {
        self.width_mm.hypot(self.height_mm)
    }

    pub(crate) fn circle_of_confusion_mm(&self) -> f64 {
        self.circle_of_confusion_mm
    }
}

impl Default for CameraProfile {
    fn default() -> Self {
        CATALOG[0].clone()
    }
}

// Circle of confusion follows the d/1500 convention rounded to the values
// commonly printed in depth of field charts.
static CATALOG: [CameraProfile; 8] = [
    CameraProfile::preset("Canon APS-C (1.6x)", 22.3, 14.9, 0.019),
    CameraProfile::preset("Nikon DX (1.5x)", 23.6, 15.7, 0.020),
    CameraProfile::preset("Sony / Pentax APS-C (1.5x)", 23.5, 15.6, 0.020),
    CameraProfile::preset("Canon APS-H (1.3x)", 28.7, 19.0, 0.023),
    CameraProfile::preset("35mm Full Frame", 36.0, 24.0, 0.030),
    CameraProfile::preset("Four Thirds (2x)", 17.3, 13.0, 0.015),
    CameraProfile::preset("Sigma Foveon (1.7x)", 20.7, 13.8, 0.017),
    CameraProfile::preset("Medium Format 645", 56.0, 41.5, 0.047),
];
