//! # Input Files
//!
//! Boundary adapter between flat JSON input records and the [`InputData`]
//! model. An input record is a single JSON object using the engineering
//! symbols as keys:
//!
//! ```json
//! {
//!   "name": "Aviat 8in X65",
//!   "t_sel": 0.0111, "D_o": 0.2191, "t_corr": 0.0015, "f_tol": 0.125,
//!   "f_0": 0.025, "B": 0.1, "mat_p": "CS X65", "t_coat": 0.0,
//!   "T_d": 0, "P_d": 17930000, "h_ref": 0, "rho_d": 1025,
//!   "R_reel": 7.5, "T_lay": 0,
//!   "d_max": 124.247, "d_min": 80.5, "T_a": 4, "rho_w": 1025, "g": 9.80665
//! }
//! ```
//!
//! An optional `settings` object maps onto [`AnalysisSettings`]. Every missing
//! key is reported at once, before anything is computed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::calculations::inputs::{AnalysisSettings, Environment, InputData, Pipe, Process};
use crate::errors::{CalcError, CalcResult};

/// Keys every input record must contain.
pub const REQUIRED_KEYS: &[&str] = &[
    "name", "t_sel", "D_o", "t_corr", "f_tol", "f_0", "B", "mat_p", "t_coat", "T_d", "P_d", "h_ref", "rho_d",
    "R_reel", "T_lay", "d_max", "d_min", "T_a", "rho_w", "g",
];

/// Flat input record as written in input files.
/// Keys outside [`REQUIRED_KEYS`] and `settings` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub name: String,
    pub t_sel: f64,
    #[serde(rename = "D_o")]
    pub d_o: f64,
    pub t_corr: f64,
    pub f_tol: f64,
    pub f_0: f64,
    #[serde(rename = "B")]
    pub b: f64,
    pub mat_p: String,
    pub t_coat: f64,
    #[serde(rename = "T_d")]
    pub t_d: f64,
    #[serde(rename = "P_d")]
    pub p_d: f64,
    pub h_ref: f64,
    pub rho_d: f64,
    #[serde(rename = "R_reel")]
    pub r_reel: f64,
    #[serde(rename = "T_lay")]
    pub t_lay: f64,
    pub d_max: f64,
    pub d_min: f64,
    #[serde(rename = "T_a")]
    pub t_a: f64,
    pub rho_w: f64,
    pub g: f64,
    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl From<InputRecord> for InputData {
    fn from(r: InputRecord) -> Self {
        InputData {
            name: r.name,
            pipe: Pipe {
                outside_diameter_m: r.d_o,
                selected_thickness_m: r.t_sel,
                corrosion_allowance_m: r.t_corr,
                fabrication_tolerance: r.f_tol,
                initial_ovality: r.f_0,
                bend_thinning: r.b,
                coating_thickness_m: r.t_coat,
                material: r.mat_p,
            },
            process: Process {
                design_temperature_c: r.t_d,
                design_pressure_pa: r.p_d,
                reference_depth_m: r.h_ref,
                contents_density_kgm3: r.rho_d,
                reel_radius_m: r.r_reel,
                lay_temperature_c: r.t_lay,
            },
            environment: Environment {
                max_depth_m: r.d_max,
                min_depth_m: r.d_min,
                ambient_temperature_c: r.t_a,
                seawater_density_kgm3: r.rho_w,
                gravity_ms2: r.g,
            },
            settings: r.settings,
        }
    }
}

impl From<&InputData> for InputRecord {
    fn from(d: &InputData) -> Self {
        InputRecord {
            name: d.name.clone(),
            t_sel: d.pipe.selected_thickness_m,
            d_o: d.pipe.outside_diameter_m,
            t_corr: d.pipe.corrosion_allowance_m,
            f_tol: d.pipe.fabrication_tolerance,
            f_0: d.pipe.initial_ovality,
            b: d.pipe.bend_thinning,
            mat_p: d.pipe.material.clone(),
            t_coat: d.pipe.coating_thickness_m,
            t_d: d.process.design_temperature_c,
            p_d: d.process.design_pressure_pa,
            h_ref: d.process.reference_depth_m,
            rho_d: d.process.contents_density_kgm3,
            r_reel: d.process.reel_radius_m,
            t_lay: d.process.lay_temperature_c,
            d_max: d.environment.max_depth_m,
            d_min: d.environment.min_depth_m,
            t_a: d.environment.ambient_temperature_c,
            rho_w: d.environment.seawater_density_kgm3,
            g: d.environment.gravity_ms2,
            settings: d.settings.clone(),
        }
    }
}

/// Required keys absent from a JSON object, in [`REQUIRED_KEYS`] order.
pub fn missing_keys(value: &Value) -> Vec<String> {
    REQUIRED_KEYS
        .iter()
        .filter(|key| value.get(**key).is_none())
        .map(|key| key.to_string())
        .collect()
}

/// Build a validated [`InputData`] from a parsed JSON record.
///
/// # Errors
/// * `CalcError::InvalidInput` - the record is not a JSON object, or a value is
///   out of range
/// * `CalcError::MissingField` / `CalcError::MissingFields` - required keys
///   are absent (all of them are listed)
/// * `CalcError::SerializationError` - a value has the wrong type
pub fn read_input_data(value: &Value) -> CalcResult<InputData> {
    if !value.is_object() {
        return Err(CalcError::invalid_input(
            "input",
            value.to_string(),
            "Input record must be a JSON object",
        ));
    }

    let missing = missing_keys(value);
    match missing.len() {
        0 => {}
        1 => return Err(CalcError::missing_field(missing[0].clone())),
        _ => return Err(CalcError::MissingFields { fields: missing }),
    }

    let record: InputRecord = serde_json::from_value(value.clone())?;
    let data = InputData::from(record);
    data.validate()?;
    debug!(name = %data.name, material = %data.pipe.material, "input record read");
    Ok(data)
}

/// Parse and validate an input record from JSON text.
pub fn parse_input_data(json: &str) -> CalcResult<InputData> {
    let value: Value = serde_json::from_str(json)?;
    read_input_data(&value)
}
