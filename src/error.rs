use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("expected camera index in range [0, {len}) but got: {index}")]
    CameraOutOfRange { index: usize, len: usize },
    #[error("camera profile {model:?} must have a positive sensor size and circle of confusion")]
    InvalidProfile { model: String },
    #[error("expected aperture index in range [0, {len}) but got: {index}")]
    ApertureOutOfRange { index: usize, len: usize },
    #[error("unknown aperture stop scale: {0}")]
    UnknownStopScale(String),
    #[error("unknown unit system: {0}")]
    UnknownUnitSystem(String),
    #[error("expected a positive whole number of millimeters but got: {0:?}")]
    InvalidFocalLength(String),
    #[error("expected a positive focus distance but got: {0:?}")]
    InvalidFocusDistance(String),
    #[error("malformed setting {key}={value:?}")]
    InvalidSetting { key: String, value: String },
}
