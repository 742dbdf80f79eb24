use crate::{
    camera::CameraProfile,
    units::{UnitSystem, mm},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
};

/// Snapshot of everything a calculation depends on.
///
/// Every derived quantity is recomputed from the snapshot on each call.
/// Lengths are evaluated in millimeters and returned as [`Length`]; use
/// [`OpticsInput::display`] to express them in the snapshot's unit system.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OpticsInput {
    camera: CameraProfile,
    /// Millimeters.
    focal_length: u32,
    /// F-number.
    aperture: f64,
    /// Feet or meters, per `unit_system`.
    focus_distance: f64,
    unit_system: UnitSystem,
}

impl OpticsInput {
    pub fn new(
        camera: CameraProfile,
        focal_length: u32,
        aperture: f64,
        focus_distance: f64,
        unit_system: UnitSystem,
    ) -> Self {
        Self {
            camera,
            focal_length,
            aperture,
            focus_distance,
            unit_system,
        }
    }

    pub fn camera(&self) -> &CameraProfile {
        &self.camera
    }

    pub fn focal_length(&self) -> u32 {
        self.focal_length
    }

    pub fn aperture(&self) -> f64 {
        self.aperture
    }

    pub fn focus_distance(&self) -> f64 {
        self.focus_distance
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn set_camera(&mut self, camera: CameraProfile) {
        self.camera = camera;
    }

    pub fn set_focal_length(&mut self, focal_length: u32) {
        self.focal_length = focal_length;
    }

    pub fn set_aperture(&mut self, aperture: f64) {
        self.aperture = aperture;
    }

    pub fn set_focus_distance(&mut self, focus_distance: f64) {
        self.focus_distance = focus_distance;
    }

    pub fn set_unit_system(&mut self, unit_system: UnitSystem) {
        self.unit_system = unit_system;
    }

    pub fn with_aperture(mut self, aperture: f64) -> Self {
        self.aperture = aperture;
        self
    }

    /// Expresses `length` in feet or meters according to the snapshot.
    pub fn display(&self, length: Length) -> f64 {
        self.unit_system.display(length)
    }

    /// Focus distance as a [`Length`].
    pub fn focus_distance_length(&self) -> Length {
        self.unit_system.length(self.focus_distance)
    }

    /// `H = F^2 / (A * C) + F`
    pub fn hyperfocal_distance(&self) -> Length {
        mm(self.hyperfocal_mm())
    }

    pub fn half_hyperfocal_distance(&self) -> Length {
        mm(self.hyperfocal_mm() / 2.0)
    }

    /// `N = d * (H - A) / (H + d - 2A)`
    pub fn near_limit(&self) -> Length {
        mm(self.near_limit_mm())
    }

    /// `Ft = d * (H - A) / (H - d)`
    ///
    /// Not finite and not positive once the focus distance reaches the
    /// hyperfocal distance. The value is returned as computed; a negative far
    /// limit means everything to infinity is acceptably sharp.
    pub fn far_limit(&self) -> Length {
        mm(self.far_limit_mm())
    }

    /// Distance from the near limit to the focus distance.
    pub fn before(&self) -> Length {
        mm(self.focus_distance_mm() - self.near_limit_mm())
    }

    /// Distance from the focus distance to the far limit.
    ///
    /// Carries the sign of [`far_limit`](Self::far_limit).
    pub fn behind(&self) -> Length {
        mm(self.far_limit_mm() - self.focus_distance_mm())
    }

    /// `m = F / (d - F)`
    ///
    /// Infinite when the focus distance equals the focal length.
    pub fn magnification(&self) -> f64 {
        let f = self.focal_length_mm();
        f / (self.focus_distance_mm() - f)
    }

    /// Width of the scene covered at the focus distance.
    pub fn field_of_view_width(&self) -> Length {
        mm(self.camera.width_mm() / self.magnification())
    }

    /// Height of the scene covered at the focus distance.
    pub fn field_of_view_height(&self) -> Length {
        mm(self.camera.height_mm() / self.magnification())
    }

    pub fn field_of_view_diagonal(&self) -> Length {
        let m = self.magnification();
        mm((self.camera.width_mm() / m).hypot(self.camera.height_mm() / m))
    }

    pub fn angle_of_view_horizontal(&self) -> Angle {
        self.angle_of_view(self.camera.width_mm())
    }

    pub fn angle_of_view_vertical(&self) -> Angle {
        self.angle_of_view(self.camera.height_mm())
    }

    pub fn angle_of_view_diagonal(&self) -> Angle {
        self.angle_of_view(self.camera.diagonal_mm())
    }

    /// `2 * atan(s / 2F)` for a frame dimension `s` in millimeters.
    fn angle_of_view(&self, frame_mm: f64) -> Angle {
        Angle::new::<radian>(2.0 * (frame_mm / (2.0 * self.focal_length_mm())).atan())
    }

    fn focal_length_mm(&self) -> f64 {
        self.focal_length as f64
    }

    fn focus_distance_mm(&self) -> f64 {
        self.unit_system.to_mm(self.focus_distance)
    }

    fn hyperfocal_mm(&self) -> f64 {
        let f = self.focal_length_mm();
        f * f / (self.aperture * self.camera.circle_of_confusion_mm()) + f
    }

    // The f-number enters both limits as a millimeter offset.
    fn near_limit_mm(&self) -> f64 {
        let (h, d, a) = (self.hyperfocal_mm(), self.focus_distance_mm(), self.aperture);
        d * (h - a) / (h + d - 2.0 * a)
    }

    fn far_limit_mm(&self) -> f64 {
        let (h, d, a) = (self.hyperfocal_mm(), self.focus_distance_mm(), self.aperture);
        d * (h - a) / (h - d)
    }
}

impl Default for OpticsInput {
    fn default() -> Self {
        Self::new(CameraProfile::default(), 50, 1.0, 10.0, UnitSystem::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aperture::StopScale;
    use approx::{assert_relative_eq, relative_eq};
    use quickcheck::{Arbitrary, Gen, quickcheck};
    use rstest::rstest;
    use uom::si::{angle::degree, length::millimeter};

    fn full_frame(focal_length: u32, aperture: f64, focus_distance: f64) -> OpticsInput {
        OpticsInput::new(
            CameraProfile::get(4).unwrap().clone(),
            focal_length,
            aperture,
            focus_distance,
            UnitSystem::Metric,
        )
    }

    /// A valid snapshot with the focus distance well beyond the focal length.
    #[derive(Clone, Debug)]
    struct Scenario(OpticsInput);

    impl Arbitrary for Scenario {
        fn arbitrary(g: &mut Gen) -> Self {
            let camera = g.choose(CameraProfile::catalog()).unwrap().clone();
            let focal_length = 8 + u32::arbitrary(g) % 593;
            let series = g.choose(&StopScale::ALL).unwrap().series();
            let aperture = series
                .f_number(usize::arbitrary(g) % series.len())
                .unwrap();
            let unit_system = if bool::arbitrary(g) {
                UnitSystem::Metric
            } else {
                UnitSystem::Imperial
            };
            let focus_distance = 1.0 + (u16::arbitrary(g) as f64) / 64.0;
            Scenario(OpticsInput::new(
                camera,
                focal_length,
                aperture,
                focus_distance,
                unit_system,
            ))
        }
    }

    #[test]
    fn full_frame_hyperfocal() {
        // 50 mm at f/8 with a 0.030 mm circle of confusion.
        let input = full_frame(50, 8.0, 10.0);
        assert_relative_eq!(
            input.hyperfocal_distance().get::<millimeter>(),
            2500.0 / 0.24 + 50.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            input.display(input.half_hyperfocal_distance()),
            (2500.0 / 0.24 + 50.0) / 2000.0,
            max_relative = 1e-9
        );
    }

    #[rstest]
    #[case(50, 39.5978, 26.9915, 46.7930)]
    #[case(24, 73.7398, 53.1301, 84.0622)]
    #[case(200, 10.2855, 6.8673, 12.3470)]
    fn full_frame_angle_of_view(
        #[case] focal_length: u32,
        #[case] horizontal: f64,
        #[case] vertical: f64,
        #[case] diagonal: f64,
    ) {
        let input = full_frame(focal_length, 8.0, 10.0);
        assert_relative_eq!(
            input.angle_of_view_horizontal().get::<degree>(),
            horizontal,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            input.angle_of_view_vertical().get::<degree>(),
            vertical,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            input.angle_of_view_diagonal().get::<degree>(),
            diagonal,
            epsilon = 1e-3
        );
    }

    #[test]
    fn field_of_view_scales_sensor_by_magnification() {
        // 50 mm focused at 5.05 m gives a magnification of exactly 1/100.
        let input = full_frame(50, 8.0, 5.05);
        assert_relative_eq!(input.magnification(), 0.01, max_relative = 1e-12);
        assert_relative_eq!(
            input.display(input.field_of_view_width()),
            3.6,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            input.display(input.field_of_view_height()),
            2.4,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            input.display(input.field_of_view_diagonal()),
            3.6f64.hypot(2.4),
            max_relative = 1e-9
        );
    }

    #[test]
    fn focus_at_focal_length_diverges() {
        let input = full_frame(50, 8.0, 0.05);
        assert!(!input.magnification().is_finite());
    }

    #[test]
    fn focus_beyond_hyperfocal_has_negative_far_limit() {
        let input = full_frame(50, 8.0, 20.0);
        assert!(input.hyperfocal_distance() < input.focus_distance_length());
        assert!(input.far_limit().get::<millimeter>() < 0.0);
        assert!(input.behind().get::<millimeter>() < 0.0);
        assert!(input.near_limit().get::<millimeter>() > 0.0);
    }

    #[test]
    fn default_snapshot() {
        let input = OpticsInput::default();
        assert_eq!(input.focal_length(), 50);
        assert_eq!(input.unit_system(), UnitSystem::Imperial);
        assert_eq!(input, input.clone().with_aperture(1.0));
        assert_ne!(input, input.clone().with_aperture(2.0));
    }

    quickcheck! {
        fn hyperfocal_formula(scenario: Scenario) -> bool {
            let input = scenario.0;
            let f = input.focal_length() as f64;
            let expected = f + f * f / (input.aperture() * input.camera().circle_of_confusion_mm());
            relative_eq!(
                input.hyperfocal_distance().get::<millimeter>(),
                expected,
                max_relative = 1e-9
            )
        }

        fn near_limit_before_focus(scenario: Scenario) -> bool {
            let input = scenario.0;
            let d = input.focus_distance_length().get::<millimeter>();
            let near = input.near_limit().get::<millimeter>();
            near <= d * (1.0 + 1e-12) && input.before().get::<millimeter>() >= -1e-9
        }

        fn far_limit_behind_focus(scenario: Scenario) -> bool {
            let input = scenario.0;
            let d = input.focus_distance_length().get::<millimeter>();
            let far = input.far_limit().get::<millimeter>();
            if input.hyperfocal_distance().get::<millimeter>() <= d || !far.is_finite() {
                return true;
            }
            far >= d * (1.0 - 1e-12) && input.behind().get::<millimeter>() >= -1e-9
        }
    }
}
