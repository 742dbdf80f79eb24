use crate::{
    aperture::{ApertureSeries, FStop, StopScale},
    camera::CameraProfile,
    error::Error,
    format,
    optics::OpticsInput,
    settings::Settings,
    sweep::ApertureSweep,
    units::UnitSystem,
};
use std::fmt;
use uom::si::angle::degree;

/// Parses focal length text as a positive whole number of millimeters.
pub fn parse_focal_length(text: &str) -> Result<u32, Error> {
    match text.trim().parse::<u32>() {
        Ok(focal_length) if focal_length > 0 => Ok(focal_length),
        _ => Err(Error::InvalidFocalLength(text.to_string())),
    }
}

/// Parses focus distance text as a positive, finite number of feet or meters.
pub fn parse_focus_distance(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(distance) if distance.is_finite() && distance > 0.0 => Ok(distance),
        _ => Err(Error::InvalidFocusDistance(text.to_string())),
    }
}

/// The state a form collaborator reads and writes.
///
/// Holds the current [`OpticsInput`] together with the catalog selections it
/// was built from. Text entered for the focal length or focus distance is
/// parsed here; a malformed entry leaves the previous value in the snapshot
/// and blanks the outputs that depend on it in [`OpticsCalculator::readout`].
#[derive(Clone, Debug, PartialEq)]
pub struct OpticsCalculator {
    input: OpticsInput,
    series: ApertureSeries,
    aperture_index: usize,
    camera_index: usize,
    focal_length_error: Option<Error>,
    focus_distance_error: Option<Error>,
}

impl OpticsCalculator {
    /// Restores a calculator from persisted settings.
    ///
    /// Fails if any index is outside its catalog or a stored value is not
    /// positive.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let scale = StopScale::try_from(settings.aperture_scale)?;
        let series = scale.series();
        let aperture = series.f_number(settings.aperture)?;
        let camera = CameraProfile::get(settings.camera)?.clone();
        let unit_system = UnitSystem::try_from(settings.unit)?;

        if settings.focal_length == 0 {
            return Err(Error::InvalidFocalLength(settings.focal_length.to_string()));
        }
        if !(settings.focus_distance.is_finite() && settings.focus_distance > 0.0) {
            return Err(Error::InvalidFocusDistance(
                settings.focus_distance.to_string(),
            ));
        }

        Ok(Self {
            input: OpticsInput::new(
                camera,
                settings.focal_length,
                aperture,
                settings.focus_distance,
                unit_system,
            ),
            series,
            aperture_index: settings.aperture,
            camera_index: settings.camera,
            focal_length_error: None,
            focus_distance_error: None,
        })
    }

    /// Returns the selections to persist.
    pub fn settings(&self) -> Settings {
        Settings {
            aperture_scale: self.series.scale().index(),
            camera: self.camera_index,
            unit: self.input.unit_system().index(),
            focal_length: self.input.focal_length(),
            aperture: self.aperture_index,
            focus_distance: self.input.focus_distance(),
        }
    }

    pub fn input(&self) -> &OpticsInput {
        &self.input
    }

    pub fn series(&self) -> &ApertureSeries {
        &self.series
    }

    pub fn stop_scale(&self) -> StopScale {
        self.series.scale()
    }

    pub fn aperture_index(&self) -> usize {
        self.aperture_index
    }

    /// The selected stop.
    pub fn aperture(&self) -> FStop {
        self.series
            .get(self.aperture_index)
            .expect("aperture index is only set after a successful lookup")
    }

    pub fn camera_index(&self) -> usize {
        self.camera_index
    }

    pub fn camera(&self) -> &CameraProfile {
        self.input.camera()
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.input.unit_system()
    }

    pub fn focal_length(&self) -> u32 {
        self.input.focal_length()
    }

    pub fn focus_distance(&self) -> f64 {
        self.input.focus_distance()
    }

    pub fn set_focal_length(&mut self, focal_length: u32) -> Result<(), Error> {
        if focal_length == 0 {
            return Err(Error::InvalidFocalLength(focal_length.to_string()));
        }

        self.input.set_focal_length(focal_length);
        self.focal_length_error = None;
        Ok(())
    }

    /// Applies focal length text from a form field.
    pub fn set_focal_length_text(&mut self, text: &str) -> Result<u32, Error> {
        match parse_focal_length(text) {
            Ok(focal_length) => {
                self.input.set_focal_length(focal_length);
                self.focal_length_error = None;
                Ok(focal_length)
            }
            Err(err) => {
                tracing::warn!(%err, "blanking hyperfocal and angle of view");
                self.focal_length_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn set_focus_distance(&mut self, focus_distance: f64) -> Result<(), Error> {
        if !(focus_distance.is_finite() && focus_distance > 0.0) {
            return Err(Error::InvalidFocusDistance(focus_distance.to_string()));
        }

        self.input.set_focus_distance(focus_distance);
        self.focus_distance_error = None;
        Ok(())
    }

    /// Applies focus distance text, in the active unit, from a form field.
    pub fn set_focus_distance_text(&mut self, text: &str) -> Result<f64, Error> {
        match parse_focus_distance(text) {
            Ok(focus_distance) => {
                self.input.set_focus_distance(focus_distance);
                self.focus_distance_error = None;
                Ok(focus_distance)
            }
            Err(err) => {
                tracing::warn!(%err, "blanking depth of field and field of view");
                self.focus_distance_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn set_aperture_index(&mut self, index: usize) -> Result<(), Error> {
        let f_number = self.series.f_number(index)?;
        self.input.set_aperture(f_number);
        self.aperture_index = index;
        Ok(())
    }

    pub fn set_camera_index(&mut self, index: usize) -> Result<(), Error> {
        let camera = CameraProfile::get(index)?;
        self.input.set_camera(camera.clone());
        self.camera_index = index;
        Ok(())
    }

    /// Changes the unit of the focus distance and of every length output.
    ///
    /// The focus distance keeps its numeric value.
    pub fn set_unit_system(&mut self, unit_system: UnitSystem) {
        self.input.set_unit_system(unit_system);
    }

    /// Regenerates the aperture series and selects its first stop when the
    /// scale changes.
    pub fn set_stop_scale(&mut self, scale: StopScale) {
        if scale == self.series.scale() {
            return;
        }

        self.series = scale.series();
        self.aperture_index = 0;
        self.input.set_aperture(self.aperture().f_number());
    }

    /// Like [`set_stop_scale`](Self::set_stop_scale), but keeps the stop
    /// nearest the current aperture selected.
    pub fn set_stop_scale_keeping_aperture(&mut self, scale: StopScale) {
        let f_number = self.input.aperture();
        self.set_stop_scale(scale);
        self.aperture_index = self.series.index_of_nearest(f_number);
        self.input.set_aperture(self.aperture().f_number());
    }

    /// Near and far limits at every stop of the current series.
    ///
    /// Fails with the stored error while either text field is malformed,
    /// since every row depends on both.
    pub fn sweep(&self) -> Result<ApertureSweep, Error> {
        let error = self.focus_distance_error.as_ref();
        if let Some(err) = error.or(self.focal_length_error.as_ref()) {
            return Err(err.clone());
        }

        Ok(ApertureSweep::new(&self.input, &self.series))
    }

    /// Renders every output for display.
    pub fn readout(&self) -> Readout {
        let input = &self.input;
        let unit = input.unit_system();
        let length = |l| format::length(input.display(l), unit);
        let mut readout = Readout::default();

        tracing::debug!(
            camera = input.camera().model(),
            focal_length = input.focal_length(),
            aperture = input.aperture(),
            focus_distance = input.focus_distance(),
            %unit,
            "recalculating"
        );

        if self.focal_length_error.is_none() {
            readout.half_hyperfocal = length(input.half_hyperfocal_distance());
            readout.hyperfocal = length(input.hyperfocal_distance());
            readout.angle_of_view = format!(
                "{} x {}",
                format::degrees(input.angle_of_view_horizontal().get::<degree>()),
                format::degrees(input.angle_of_view_vertical().get::<degree>()),
            );
            readout.angle_of_view_diagonal =
                format::degrees(input.angle_of_view_diagonal().get::<degree>());
        }

        if self.focus_distance_error.is_none() {
            readout.near_limit = length(input.near_limit());
            readout.far_limit = format::depth_of_field(input.display(input.far_limit()), unit);
            readout.before = length(input.before());
            readout.behind = format::depth_of_field(input.display(input.behind()), unit);
            readout.field_of_view = format!(
                "{} x {}",
                length(input.field_of_view_width()),
                length(input.field_of_view_height()),
            );
            readout.field_of_view_diagonal = length(input.field_of_view_diagonal());
        }

        readout
    }
}

impl Default for OpticsCalculator {
    fn default() -> Self {
        Self::from_settings(&Settings::default()).expect("default settings are valid")
    }
}

/// Display text for every output.
///
/// A field is empty when the input it depends on was malformed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Readout {
    pub near_limit: String,
    pub far_limit: String,
    pub before: String,
    pub behind: String,
    pub half_hyperfocal: String,
    pub hyperfocal: String,
    pub field_of_view: String,
    pub field_of_view_diagonal: String,
    pub angle_of_view: String,
    pub angle_of_view_diagonal: String,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Depth of Field")?;
        writeln!(f, "    Near Limit: {}", self.near_limit)?;
        writeln!(f, "    Far Limit: {}", self.far_limit)?;
        writeln!(f, "    Before: {}", self.before)?;
        writeln!(f, "    Behind: {}", self.behind)?;
        writeln!(f, "Hyperfocal")?;
        writeln!(f, "    Half: {}", self.half_hyperfocal)?;
        writeln!(f, "    Distance: {}", self.hyperfocal)?;
        writeln!(f, "Field of View: {}", self.field_of_view)?;
        writeln!(f, "    Diagonal: {}", self.field_of_view_diagonal)?;
        writeln!(f, "Angle of View: {}", self.angle_of_view)?;
        write!(f, "    Diagonal: {}", self.angle_of_view_diagonal)
    }
}
