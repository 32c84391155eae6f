//! Standard line pipe wall thicknesses (API 5L)
//!
//! Wall thickness schedule for plain-end line pipe by outside diameter, after
//! API 5L Table 9. Used to round a governing design thickness up to the next
//! wall a mill will actually roll.
//!
//! Diameters are matched within [`OD_MATCH_TOLERANCE_MM`] so that a metric OD
//! such as 0.2191 m finds the 219.1 mm row regardless of float noise.
//!
//! ## Example
//!
//! ```rust
//! use wallthick_core::materials::api5l::{Api5lCatalog, WallThicknessCatalog};
//!
//! let t_rec = Api5lCatalog.recommend(219.1e-3, 8.643e-3).unwrap();
//! assert!((t_rec - 8.74e-3).abs() < 1e-9);
//! ```

use crate::errors::{CalcError, CalcResult};

/// Maximum difference between a requested OD and a table OD (mm)
pub const OD_MATCH_TOLERANCE_MM: f64 = 0.5;

/// Slack when comparing a catalogue wall with the governing thickness (m)
const THICKNESS_COMPARE_SLACK_M: f64 = 1e-12;

/// Source of standard wall thicknesses for a given outside diameter.
///
/// The orchestrator takes this as a trait object so projects can substitute
/// their own pipe schedule.
pub trait WallThicknessCatalog {
    /// Standard walls (mm, ascending) for outside diameter `d_o` (m).
    fn standard_thicknesses_mm(&self, d_o: f64) -> CalcResult<&[f64]>;

    /// Smallest standard wall (m) at or above `t_gov` (m).
    ///
    /// # Errors
    /// * `CalcError::InvalidInput` - OD not in the catalogue
    /// * `CalcError::NoStandardThickness` - `t_gov` exceeds the heaviest wall
    fn recommend(&self, d_o: f64, t_gov: f64) -> CalcResult<f64> {
        self.standard_thicknesses_mm(d_o)?
            .iter()
            .map(|mm| mm * 1e-3)
            .find(|&t| t >= t_gov - THICKNESS_COMPARE_SLACK_M)
            .ok_or(CalcError::NoStandardThickness {
                od_mm: d_o * 1e3,
                required_mm: t_gov * 1e3,
            })
    }
}

/// (OD mm, standard walls mm)
const API_5L_WALLS: &[(f64, &[f64])] = &[
    (60.3, &[2.77, 3.18, 3.58, 3.91, 4.37, 4.78, 5.54, 6.35, 7.14, 8.74, 11.07]),
    (73.0, &[2.87, 3.18, 3.58, 3.96, 4.37, 4.78, 5.16, 5.49, 6.35, 7.01, 7.62, 9.53, 14.02]),
    (88.9, &[2.87, 3.18, 3.58, 3.96, 4.37, 4.78, 5.49, 6.35, 7.14, 7.62, 8.74, 11.13, 15.24]),
    (
        114.3,
        &[3.18, 3.58, 3.96, 4.37, 4.78, 5.16, 5.56, 6.02, 6.35, 7.14, 7.92, 8.56, 11.13, 13.49, 17.12],
    ),
    (
        168.3,
        &[
            3.96, 4.37, 4.78, 5.16, 5.56, 6.35, 7.11, 7.92, 8.74, 9.53, 10.97, 12.70, 14.27, 15.88, 18.26, 21.95,
        ],
    ),
    (
        219.1,
        &[
            3.96, 4.37, 4.78, 5.16, 5.56, 6.35, 7.04, 7.92, 8.18, 8.74, 9.53, 10.31, 11.13, 12.70, 14.27, 15.09,
            15.88, 18.26, 19.05, 20.62, 22.23, 23.01,
        ],
    ),
    (
        273.1,
        &[
            4.37, 5.16, 5.56, 6.35, 7.09, 7.80, 8.74, 9.27, 10.31, 11.13, 12.70, 14.27, 15.09, 15.88, 18.26, 21.44,
            25.40, 28.58,
        ],
    ),
    (
        323.9,
        &[
            4.37, 5.16, 5.56, 6.35, 7.14, 7.92, 8.38, 8.74, 9.53, 10.31, 11.13, 12.70, 14.27, 15.88, 17.48, 19.05,
            21.44, 25.40, 28.58, 33.32,
        ],
    ),
    (
        355.6,
        &[
            5.33, 5.56, 6.35, 7.14, 7.92, 8.74, 9.53, 10.31, 11.13, 11.91, 12.70, 14.27, 15.09, 15.88, 19.05, 23.83,
            27.79, 31.75, 35.71,
        ],
    ),
    (
        406.4,
        &[
            5.56, 6.35, 7.14, 7.92, 8.74, 9.53, 10.31, 11.13, 11.91, 12.70, 14.27, 15.88, 16.66, 19.05, 21.44, 26.19,
            30.96, 36.53, 40.49,
        ],
    ),
    (
        457.0,
        &[
            6.35, 7.14, 7.92, 8.74, 9.53, 10.31, 11.13, 11.91, 12.70, 14.27, 15.88, 17.48, 19.05, 23.83, 29.36,
            34.93, 39.67, 45.24,
        ],
    ),
    (
        508.0,
        &[
            6.35, 7.14, 7.92, 8.74, 9.53, 10.31, 11.13, 11.91, 12.70, 14.27, 15.09, 15.88, 17.48, 19.05, 20.62,
            26.19, 32.54, 38.10, 44.45, 50.01,
        ],
    ),
    (
        610.0,
        &[
            6.35, 7.14, 7.92, 8.74, 9.53, 10.31, 11.13, 11.91, 12.70, 14.27, 15.88, 17.48, 19.05, 24.61, 30.96,
            38.89, 46.02, 52.37, 59.54,
        ],
    ),
];

/// Built-in API 5L schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Api5lCatalog;

impl Api5lCatalog {
    /// Outside diameters (mm) covered by the schedule
    pub fn diameters_mm(&self) -> impl Iterator<Item = f64> {
        API_5L_WALLS.iter().map(|(od, _)| *od)
    }
}

impl WallThicknessCatalog for Api5lCatalog {
    fn standard_thicknesses_mm(&self, d_o: f64) -> CalcResult<&[f64]> {
        let od_mm = d_o * 1e3;
        API_5L_WALLS
            .iter()
            .find(|(od, _)| (od - od_mm).abs() <= OD_MATCH_TOLERANCE_MM)
            .map(|(_, walls)| *walls)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "D_o",
                    d_o.to_string(),
                    "Outside diameter is not a standard API 5L size",
                )
            })
    }
}
