use approx::assert_abs_diff_eq;
use phototools::prelude::*;

/// Canon 1.6x crop body, 50 mm at f/5.6, focused at 10 ft.
fn reference_input() -> OpticsInput {
    OpticsInput::new(
        CameraProfile::get(0).unwrap().clone(),
        50,
        5.6,
        10.0,
        UnitSystem::Imperial,
    )
}

fn calculator(settings: Settings) -> OpticsCalculator {
    OpticsCalculator::from_settings(&settings).expect("settings are valid")
}

#[test]
fn reference_near_limit() {
    let input = reference_input();
    assert_abs_diff_eq!(input.display(input.near_limit()), 8.86, epsilon = 0.1);
}

#[test]
fn reference_far_limit() {
    let input = reference_input();
    assert_abs_diff_eq!(input.display(input.far_limit()), 11.5, epsilon = 0.1);
}

#[test]
fn reference_hyperfocal_distance() {
    let input = reference_input();
    assert_abs_diff_eq!(
        input.display(input.hyperfocal_distance()),
        77.25,
        epsilon = 0.1
    );
}

#[test]
fn imperial_readout() {
    let calculator = calculator(Settings {
        aperture_scale: 2,
        aperture: 5,
        ..Settings::default()
    });

    insta::assert_snapshot!(calculator.readout().to_string(), @r"
    Depth of Field
        Near Limit: 8.85 ft
        Far Limit: 11.50 ft
        Before: 1.15 ft
        Behind: 1.50 ft
    Hyperfocal
        Half: 38.24 ft
        Distance: 76.48 ft
    Field of View: 4.39 ft x 2.93 ft
        Diagonal: 5.28 ft
    Angle of View: 25.14° x 16.95°
        Diagonal: 30.03°
    ");
}

#[test]
fn metric_readout() {
    // Full frame, 35 mm at f/8, focused at 3 m.
    let calculator = calculator(Settings {
        aperture_scale: 2,
        camera: 4,
        unit: 1,
        focal_length: 35,
        aperture: 6,
        focus_distance: 3.0,
    });

    insta::assert_snapshot!(calculator.readout().to_string(), @r"
    Depth of Field
        Near Limit: 1.90 m
        Far Limit: 7.20 m
        Before: 1.10 m
        Behind: 4.20 m
    Hyperfocal
        Half: 2.57 m
        Distance: 5.14 m
    Field of View: 3.05 m x 2.03 m
        Diagonal: 3.67 m
    Angle of View: 54.43° x 37.85°
        Diagonal: 63.44°
    ");
}

#[test]
fn editing_fields_recomputes() {
    let mut calculator = OpticsCalculator::default();
    calculator.set_stop_scale(StopScale::Full);
    calculator.set_aperture_index(5).unwrap();
    calculator.set_focal_length_text("50").unwrap();
    calculator.set_focus_distance_text("10").unwrap();
    let before = calculator.readout();

    calculator.set_camera_index(4).unwrap();
    let after = calculator.readout();

    assert_ne!(before.hyperfocal, after.hyperfocal);
    // Angle of view follows the sensor size.
    assert_ne!(before.angle_of_view, after.angle_of_view);
    assert_eq!(calculator.settings().camera, 4);
}

#[test]
fn malformed_text_blanks_only_dependent_group() {
    let mut calculator = OpticsCalculator::default();
    let valid = calculator.readout();

    assert!(calculator.set_focus_distance_text("ten").is_err());
    let readout = calculator.readout();
    assert_eq!(readout.hyperfocal, valid.hyperfocal);
    assert_eq!(readout.angle_of_view, valid.angle_of_view);
    assert_eq!(readout.near_limit, "");
    assert_eq!(readout.field_of_view, "");

    assert!(calculator.set_focal_length_text("").is_err());
    assert_eq!(calculator.readout(), Readout::default());
}

#[test]
fn focus_at_focal_length_has_no_finite_magnification() {
    let input = OpticsInput::new(
        CameraProfile::get(4).unwrap().clone(),
        50,
        8.0,
        0.05,
        UnitSystem::Metric,
    );
    assert!(!input.magnification().is_finite());
}

#[test]
fn settings_survive_a_session() {
    let stored = "apertureScale=1\ncamera=2\nunit=1\nfocalLength=24\naperture=4\nfocusDistance=1.5\n";
    let mut calculator = calculator(Settings::parse(stored).unwrap());
    assert_eq!(calculator.aperture().to_string(), "f/2");

    calculator.set_focus_distance_text("2").unwrap();
    let saved = calculator.settings().to_string();
    let restored = Settings::parse(&saved).unwrap();

    assert_eq!(restored.focus_distance, 2.0);
    assert_eq!(restored.aperture_scale, 1);
    assert_eq!(restored.aperture, 4);
}
