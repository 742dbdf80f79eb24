use crate::{
    aperture::{ApertureSeries, FStop},
    format,
    optics::OpticsInput,
    units::UnitSystem,
};
use rayon::prelude::*;
use std::fmt;
use uom::si::f64::Length;

/// Depth of field at one stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepRow {
    pub stop: FStop,
    pub near_limit: Length,
    pub far_limit: Length,
    pub hyperfocal: Length,
}

/// Depth of field across every stop of a series, widest first.
///
/// Only the aperture varies between rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ApertureSweep {
    unit_system: UnitSystem,
    rows: Vec<SweepRow>,
}

impl ApertureSweep {
    /// Evaluates `input` at each stop of `series` in parallel.
    pub fn new(input: &OpticsInput, series: &ApertureSeries) -> Self {
        let rows = series
            .stops()
            .par_iter()
            .map(|stop| {
                let input = input.clone().with_aperture(stop.f_number());
                SweepRow {
                    stop: *stop,
                    near_limit: input.near_limit(),
                    far_limit: input.far_limit(),
                    hyperfocal: input.hyperfocal_distance(),
                }
            })
            .collect();

        Self {
            unit_system: input.unit_system(),
            rows,
        }
    }

    pub fn rows(&self) -> &[SweepRow] {
        &self.rows
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }
}

impl fmt::Display for ApertureSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit_system;
        writeln!(
            f,
            "{:<8}{:>14}{:>14}{:>14}",
            "Aperture", "Near Limit", "Far Limit", "Hyperfocal"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<8}{:>14}{:>14}{:>14}",
                row.stop.to_string(),
                format::length(unit.display(row.near_limit), unit),
                format::depth_of_field(unit.display(row.far_limit), unit),
                format::length(unit.display(row.hyperfocal), unit),
            )?;
        }

        Ok(())
    }
}
