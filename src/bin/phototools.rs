use clap::Parser;
use phototools::prelude::*;
use std::{error::Error, fs, path::PathBuf};
use tracing::info;
use uom::si::length::millimeter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a `key=value` settings file holding the last used selections.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Write the resulting selections back to the settings file.
    #[arg(long, requires = "settings")]
    save: bool,

    /// Focal length in millimeters.
    #[arg(short, long)]
    focal_length: Option<String>,

    /// Focus distance in feet or meters.
    #[arg(short = 'd', long)]
    focus_distance: Option<String>,

    /// Index into the aperture series for the selected scale.
    #[arg(short, long)]
    aperture: Option<usize>,

    /// Index into the camera catalog.
    #[arg(short, long)]
    camera: Option<usize>,

    /// Aperture scale: third, half, or full.
    #[arg(long)]
    scale: Option<StopScale>,

    /// Units: ft or m.
    #[arg(short, long)]
    units: Option<UnitSystem>,

    /// Print the camera catalog and exit.
    #[arg(long)]
    list_cameras: bool,

    /// Print the aperture series for the selected scale and exit.
    #[arg(long)]
    list_apertures: bool,

    /// Print near and far limits for every aperture in the series.
    #[arg(long)]
    sweep: bool,

    /// Print the resulting selections as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Register an event subscriber that prints events to STDOUT.
    let subscriber = tracing_subscriber::FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if args.list_cameras {
        for (index, camera) in CameraProfile::catalog().iter().enumerate() {
            println!(
                "{index:>2}  {:<28} {:>5.1} x {:>4.1} mm  CoC {:.3} mm",
                camera.model(),
                camera.width().get::<millimeter>(),
                camera.height().get::<millimeter>(),
                camera.circle_of_confusion().get::<millimeter>(),
            );
        }
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) if path.exists() => {
            info!("reading settings from {}", path.display());
            Settings::parse_lenient(&fs::read_to_string(path)?)
        }
        _ => Settings::default(),
    };
    let mut calculator = OpticsCalculator::from_settings(&settings)?;

    if let Some(scale) = args.scale {
        calculator.set_stop_scale(scale);
    }
    if let Some(index) = args.aperture {
        calculator.set_aperture_index(index)?;
    }
    if let Some(index) = args.camera {
        calculator.set_camera_index(index)?;
    }
    if let Some(units) = args.units {
        calculator.set_unit_system(units);
    }
    // Malformed text blanks the dependent outputs instead of aborting.
    if let Some(text) = &args.focal_length {
        let _ = calculator.set_focal_length_text(text);
    }
    if let Some(text) = &args.focus_distance {
        let _ = calculator.set_focus_distance_text(text);
    }

    if args.list_apertures {
        for (index, label) in calculator.series().labels().iter().enumerate() {
            println!("{index:>2}  {label}");
        }
        return Ok(());
    }

    println!(
        "{}, {} mm at {}, focused at {} {}",
        calculator.camera().model(),
        calculator.focal_length(),
        calculator.aperture(),
        calculator.focus_distance(),
        calculator.unit_system().suffix(),
    );
    println!("{}", calculator.readout());

    if args.sweep {
        println!();
        match calculator.sweep() {
            Ok(sweep) => print!("{sweep}"),
            Err(err) => println!("no sweep: {err}"),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&calculator.settings())?);
    }

    if let (true, Some(path)) = (args.save, &args.settings) {
        fs::write(path, calculator.settings().to_string())?;
        info!("saved settings to {}", path.display());
    }

    Ok(())
}
