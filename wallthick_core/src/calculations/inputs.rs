//! # Input Model
//!
//! Value objects describing one pipeline: geometry and material, process
//! conditions, and the marine environment. An [`InputData`] is built once
//! (usually by [`crate::input_file::read_input_data`]) and is the sole input to
//! [`crate::calculations::wall_thickness::calculate`].
//!
//! All quantities are SI. Field names carry their unit.
//!
//! ## Example
//!
//! ```rust
//! use wallthick_core::calculations::inputs::{Environment, Pipe};
//!
//! let pipe = Pipe {
//!     outside_diameter_m: 20.0,
//!     ..Pipe::default()
//! };
//! assert!(pipe.thin_wall_check(1.0));
//! assert!(!pipe.thin_wall_check(2.0));
//!
//! let env = Environment::default();
//! assert_eq!(env.hydro_pressure(0.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::pd8010;
use crate::errors::{CalcError, CalcResult};

/// Standard gravity (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Default seawater density (kg/m³)
pub const SEAWATER_DENSITY: f64 = 1025.0;

/// NaN and infinities fail here, before any range check can let them through.
fn require_finite(fields: &[(&str, f64)]) -> CalcResult<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, value)) => Err(CalcError::invalid_input(
            *field,
            value.to_string(),
            "Value must be a finite number",
        )),
        None => Ok(()),
    }
}

// ============================================================================
// Pipe
// ============================================================================

/// Pipe geometry, allowances and material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Outside diameter D_o (m)
    pub outside_diameter_m: f64,
    /// Selected nominal wall thickness t_sel (m)
    pub selected_thickness_m: f64,
    /// Corrosion allowance t_corr (m)
    pub corrosion_allowance_m: f64,
    /// Fabrication tolerance f_tol, fraction of nominal wall
    pub fabrication_tolerance: f64,
    /// Initial ovality f_0
    pub initial_ovality: f64,
    /// Bend thinning B, fraction of nominal wall
    pub bend_thinning: f64,
    /// External coating thickness t_coat (m)
    pub coating_thickness_m: f64,
    /// Material name, resolved against a `MaterialTable`
    pub material: String,
}

impl Default for Pipe {
    fn default() -> Self {
        Self {
            outside_diameter_m: 219.1e-3,
            selected_thickness_m: 11.1e-3,
            corrosion_allowance_m: 0.0,
            fabrication_tolerance: 0.125,
            initial_ovality: 0.025,
            bend_thinning: 0.0,
            coating_thickness_m: 0.0,
            material: "CS X65".to_string(),
        }
    }
}

impl Pipe {
    /// True when thin wall theory applies to wall `t` (`D_o / t >= 20`).
    pub fn thin_wall_check(&self, t: f64) -> bool {
        pd8010::is_thin_wall(self.outside_diameter_m, t)
    }

    /// Validate geometry and allowances.
    ///
    /// A fabrication tolerance or bend thinning of exactly 1 is accepted here
    /// and surfaces later as `DivisionByZero` from the formula that divides
    /// by it.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite(&[
            ("D_o", self.outside_diameter_m),
            ("t_sel", self.selected_thickness_m),
            ("t_corr", self.corrosion_allowance_m),
            ("f_tol", self.fabrication_tolerance),
            ("f_0", self.initial_ovality),
            ("B", self.bend_thinning),
            ("t_coat", self.coating_thickness_m),
        ])?;
        if !(self.outside_diameter_m > 0.0) {
            return Err(CalcError::invalid_input(
                "D_o",
                self.outside_diameter_m.to_string(),
                "Outside diameter must be positive",
            ));
        }
        if !(self.selected_thickness_m > 0.0) {
            return Err(CalcError::invalid_input(
                "t_sel",
                self.selected_thickness_m.to_string(),
                "Selected wall thickness must be positive",
            ));
        }
        if 2.0 * self.selected_thickness_m >= self.outside_diameter_m {
            return Err(CalcError::invalid_input(
                "t_sel",
                self.selected_thickness_m.to_string(),
                "Selected wall thickness must be less than the outside radius",
            ));
        }
        if self.corrosion_allowance_m < 0.0 {
            return Err(CalcError::invalid_input(
                "t_corr",
                self.corrosion_allowance_m.to_string(),
                "Corrosion allowance cannot be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.fabrication_tolerance) {
            return Err(CalcError::invalid_input(
                "f_tol",
                self.fabrication_tolerance.to_string(),
                "Fabrication tolerance must be between 0 and 1",
            ));
        }
        if self.initial_ovality < 0.0 {
            return Err(CalcError::invalid_input(
                "f_0",
                self.initial_ovality.to_string(),
                "Initial ovality cannot be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.bend_thinning) {
            return Err(CalcError::invalid_input(
                "B",
                self.bend_thinning.to_string(),
                "Bend thinning must be between 0 and 1",
            ));
        }
        if self.coating_thickness_m < 0.0 {
            return Err(CalcError::invalid_input(
                "t_coat",
                self.coating_thickness_m.to_string(),
                "Coating thickness cannot be negative",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Process
// ============================================================================

/// Process (operating) conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Design temperature T_d (°C)
    pub design_temperature_c: f64,
    /// Design pressure P_d at the reference point (Pa)
    pub design_pressure_pa: f64,
    /// Depth of the pressure reference point below LAT, h_ref (m).
    /// Negative when the reference is above water.
    pub reference_depth_m: f64,
    /// Contents density rho_d (kg/m³)
    pub contents_density_kgm3: f64,
    /// Reel radius R_reel (m); zero when the pipe is not reeled
    pub reel_radius_m: f64,
    /// Lay temperature T_lay (°C)
    pub lay_temperature_c: f64,
}

impl Process {
    /// True when the pipe is installed by reeling
    pub fn is_reeled(&self) -> bool {
        self.reel_radius_m > 0.0
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_finite(&[
            ("T_d", self.design_temperature_c),
            ("P_d", self.design_pressure_pa),
            ("h_ref", self.reference_depth_m),
            ("rho_d", self.contents_density_kgm3),
            ("R_reel", self.reel_radius_m),
            ("T_lay", self.lay_temperature_c),
        ])?;
        if self.contents_density_kgm3 < 0.0 {
            return Err(CalcError::invalid_input(
                "rho_d",
                self.contents_density_kgm3.to_string(),
                "Contents density cannot be negative",
            ));
        }
        if self.reel_radius_m < 0.0 {
            return Err(CalcError::invalid_input(
                "R_reel",
                self.reel_radius_m.to_string(),
                "Reel radius cannot be negative (use 0 for a pipe that is not reeled)",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Marine environment along the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Maximum water depth d_max (m)
    pub max_depth_m: f64,
    /// Minimum water depth d_min (m)
    pub min_depth_m: f64,
    /// Ambient seabed temperature T_a (°C)
    pub ambient_temperature_c: f64,
    /// Seawater density rho_w (kg/m³)
    pub seawater_density_kgm3: f64,
    /// Gravitational acceleration g (m/s²)
    pub gravity_ms2: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            max_depth_m: 0.0,
            min_depth_m: 0.0,
            ambient_temperature_c: 4.0,
            seawater_density_kgm3: SEAWATER_DENSITY,
            gravity_ms2: STANDARD_GRAVITY,
        }
    }
}

impl Environment {
    /// Hydrostatic pressure at depth `d` (m): `rho_w·g·d`.
    pub fn hydro_pressure(&self, d: f64) -> f64 {
        pd8010::pressure_head(self.seawater_density_kgm3, self.gravity_ms2, d, 0.0)
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_finite(&[
            ("d_max", self.max_depth_m),
            ("d_min", self.min_depth_m),
            ("T_a", self.ambient_temperature_c),
            ("rho_w", self.seawater_density_kgm3),
            ("g", self.gravity_ms2),
        ])?;
        if self.min_depth_m < 0.0 {
            return Err(CalcError::invalid_input(
                "d_min",
                self.min_depth_m.to_string(),
                "Water depth cannot be negative",
            ));
        }
        if self.max_depth_m < self.min_depth_m {
            return Err(CalcError::invalid_input(
                "d_max",
                self.max_depth_m.to_string(),
                "Maximum water depth must not be less than minimum water depth",
            ));
        }
        if self.seawater_density_kgm3 < 0.0 {
            return Err(CalcError::invalid_input(
                "rho_w",
                self.seawater_density_kgm3.to_string(),
                "Seawater density cannot be negative",
            ));
        }
        if !(self.gravity_ms2 > 0.0) {
            return Err(CalcError::invalid_input(
                "g",
                self.gravity_ms2.to_string(),
                "Gravitational acceleration must be positive",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Options that change how the analysis is run rather than what is analysed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Design code label printed in the report
    pub code: String,
    /// Apply DNV-OS-F101 temperature derating to yield strength
    pub derate_yield: bool,
    /// Density of the hydrotest medium (kg/m³)
    pub test_medium_density_kgm3: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            code: "PD 8010-2:2015".to_string(),
            derate_yield: true,
            test_medium_density_kgm3: SEAWATER_DENSITY,
        }
    }
}

// ============================================================================
// InputData
// ============================================================================

/// Everything needed for one wall thickness analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    /// Pipeline name
    pub name: String,
    pub pipe: Pipe,
    pub process: Process,
    pub environment: Environment,
    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl InputData {
    /// Validate all parts, stopping at the first problem.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_input("name", "", "Pipeline name cannot be empty"));
        }
        self.pipe.validate()?;
        self.process.validate()?;
        self.environment.validate()?;
        require_finite(&[(
            "settings.test_medium_density_kgm3",
            self.settings.test_medium_density_kgm3,
        )])?;
        if self.settings.test_medium_density_kgm3 < 0.0 {
            return Err(CalcError::invalid_input(
                "settings.test_medium_density_kgm3",
                self.settings.test_medium_density_kgm3.to_string(),
                "Test medium density cannot be negative",
            ));
        }
        Ok(())
    }
}
