// #![warn(missing_docs)]

//! Photographic Optics Utilities
//!
//! Depth of field, hyperfocal distance, field of view, and angle of view from
//! a camera's sensor geometry, focal length, aperture, and focus distance.

#[allow(missing_docs)]
pub mod error;

pub mod aperture;
pub mod calculator;
pub mod camera;
pub mod format;
pub mod optics;
pub mod settings;
pub mod sweep;
pub mod units;

pub mod prelude {
    pub use crate::aperture::{ApertureSeries, FStop, StopScale};
    pub use crate::calculator::{OpticsCalculator, Readout};
    pub use crate::camera::CameraProfile;
    pub use crate::error::Error;
    pub use crate::optics::OpticsInput;
    pub use crate::settings::Settings;
    pub use crate::sweep::ApertureSweep;
    pub use crate::units::UnitSystem;
}
