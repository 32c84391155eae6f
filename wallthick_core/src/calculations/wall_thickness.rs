//! # Wall Thickness Analysis
//!
//! Sizes the wall of a single-walled flowline on the seabed to PD 8010-2 by
//! checking four failure modes independently:
//!
//! 1. Reeling (local buckling from bending onto the reel), when reeled
//! 2. Pressure containment (hoop stress / bursting)
//! 3. Hydrostatic collapse (local buckling under external overpressure)
//! 4. Propagation buckling
//!
//! The governing nominal thickness is the largest of these. The larger of it
//! and the bend thinning wall is rounded up to a standard wall from a
//! [`WallThicknessCatalog`], and the hydrostatic strength and leak test
//! pressures follow.
//!
//! Every formula is evaluated once; nothing iterates. The result depends on
//! the inputs alone, so identical inputs give equal results.
//!
//! ## Example
//!
//! ```rust
//! use wallthick_core::calculations::inputs::*;
//! use wallthick_core::calculations::wall_thickness::{calculate, GoverningCriterion};
//! use wallthick_core::materials::{Api5lCatalog, MaterialTable};
//!
//! let input = InputData {
//!     name: "Aviat 8in X65".to_string(),
//!     pipe: Pipe {
//!         outside_diameter_m: 219.1e-3,
//!         selected_thickness_m: 0.0111,
//!         corrosion_allowance_m: 1.5e-3,
//!         fabrication_tolerance: 0.125,
//!         initial_ovality: 0.025,
//!         bend_thinning: 0.1,
//!         coating_thickness_m: 0.0,
//!         material: "CS X65".to_string(),
//!     },
//!     process: Process {
//!         design_pressure_pa: 179.3e5,
//!         contents_density_kgm3: 1025.0,
//!         reel_radius_m: 7.5,
//!         ..Process::default()
//!     },
//!     environment: Environment {
//!         max_depth_m: 124.247,
//!         min_depth_m: 80.5,
//!         ..Environment::default()
//!     },
//!     settings: AnalysisSettings::default(),
//! };
//!
//! let result = calculate(&input, MaterialTable::builtin(), &Api5lCatalog).unwrap();
//! assert_eq!(result.governing, GoverningCriterion::PressureContainment);
//! assert!((result.t_rec_m - 10.31e-3).abs() < 1e-9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculations::inputs::InputData;
use crate::equations::dnv_f101::derate_yield;
use crate::equations::pd8010;
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{MaterialTable, WallThicknessCatalog};

// ============================================================================
// Result Types
// ============================================================================

/// Stresses and pressures derived from the inputs before any thickness check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreliminaryValues {
    /// Specified minimum yield strength (Pa)
    pub sig_y_pa: f64,
    /// Yield strength after temperature derating (Pa)
    pub sig_y_d_pa: f64,
    /// Allowable hoop stress 0.72·σ_y,d (Pa)
    pub sig_h_a_pa: f64,
    /// Internal pressure at minimum water depth (Pa)
    pub p_i_pa: f64,
    /// External pressure at minimum water depth (Pa)
    pub p_o_min_pa: f64,
    /// External pressure at maximum water depth (Pa)
    pub p_o_max_pa: f64,
    /// P_i - P_o,min: the bursting differential (Pa)
    pub delta_p_max_pa: f64,
    /// P_i - P_o,max (Pa)
    pub delta_p_min_pa: f64,
}

/// Wall theory used for the pressure containment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoopTheory {
    /// D_o/t >= 20, Equation (3)
    ThinWall,
    /// D_o/t < 20, Equation (5)
    ThickWall,
}

/// Nominal wall thickness required by each check (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NominalThicknesses {
    /// Reeling; zero when the pipe is not reeled
    pub t_r_nom: f64,
    /// Pressure containment including corrosion and fabrication allowances
    pub t_h_nom: f64,
    /// Pressure containment including bend thinning
    pub t_h_nom_bt: f64,
    /// Hydrostatic collapse
    pub t_c_nom: f64,
    /// Propagation buckling
    pub t_b_nom: f64,
}

/// The failure mode whose thickness governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoverningCriterion {
    Reeling,
    PressureContainment,
    HydrostaticCollapse,
    PropagationBuckling,
}

impl GoverningCriterion {
    pub fn display_name(&self) -> &'static str {
        match self {
            GoverningCriterion::Reeling => "Reeling",
            GoverningCriterion::PressureContainment => "Pressure Containment",
            GoverningCriterion::HydrostaticCollapse => "Hydrostatic Collapse",
            GoverningCriterion::PropagationBuckling => "Propagation Buckling",
        }
    }
}

impl fmt::Display for GoverningCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of one wall thickness analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallThicknessResult {
    /// Pipeline name
    pub name: String,
    /// Design code label
    pub code: String,
    pub preliminary: PreliminaryValues,
    /// Wall theory used for pressure containment
    pub hoop_theory: HoopTheory,
    pub thicknesses: NominalThicknesses,
    pub governing: GoverningCriterion,
    /// Governing nominal thickness (m)
    pub t_gov_m: f64,
    /// Recommended standard thickness (m), at or above both `t_gov_m` and
    /// the bend thinning wall
    pub t_rec_m: f64,
    /// Selected thickness from the input (m)
    pub t_sel_m: f64,
    /// Strength test pressure (Pa)
    pub p_st_pa: f64,
    /// Leak test pressure (Pa)
    pub p_lt_pa: f64,
    /// Equations applied, in order
    pub equations: EquationTracker,
}

impl WallThicknessResult {
    /// True when the selected wall is at least the governing wall
    pub fn selected_is_adequate(&self) -> bool {
        self.t_sel_m >= self.t_gov_m
    }

    /// Thickness required by one criterion (m)
    pub fn thickness_for(&self, criterion: GoverningCriterion) -> f64 {
        match criterion {
            GoverningCriterion::Reeling => self.thicknesses.t_r_nom,
            GoverningCriterion::PressureContainment => self.thicknesses.t_h_nom,
            GoverningCriterion::HydrostaticCollapse => self.thicknesses.t_c_nom,
            GoverningCriterion::PropagationBuckling => self.thicknesses.t_b_nom,
        }
    }
}

// ============================================================================
// Governing Selection
// ============================================================================

/// Largest applicable nominal thickness and the criterion it comes from.
///
/// Reeling only takes part when `reeled` is true. Bend thinning does not
/// govern; it only raises the standard wall recommendation. On a tie the
/// first criterion in the order reeling, pressure containment, collapse,
/// buckle is kept.
///
/// # Errors
/// * `CalcError::CalculationFailed` - any nominal thickness is NaN or infinite
pub fn governing_thickness(thicknesses: &NominalThicknesses, reeled: bool) -> CalcResult<(GoverningCriterion, f64)> {
    let all = [
        ("t_r,nom", thicknesses.t_r_nom),
        ("t_h,nom", thicknesses.t_h_nom),
        ("t_h,nom (bend thinning)", thicknesses.t_h_nom_bt),
        ("t_c,nom", thicknesses.t_c_nom),
        ("t_b,nom", thicknesses.t_b_nom),
    ];
    if let Some((symbol, value)) = all.iter().find(|(_, t)| !t.is_finite()) {
        return Err(CalcError::calculation_failed(
            "governing thickness",
            format!("{} is not a finite thickness ({})", symbol, value),
        ));
    }

    let mut candidates = Vec::with_capacity(4);
    if reeled {
        candidates.push((GoverningCriterion::Reeling, thicknesses.t_r_nom));
    }
    candidates.push((GoverningCriterion::PressureContainment, thicknesses.t_h_nom));
    candidates.push((GoverningCriterion::HydrostaticCollapse, thicknesses.t_c_nom));
    candidates.push((GoverningCriterion::PropagationBuckling, thicknesses.t_b_nom));

    Ok(candidates
        .into_iter()
        .fold((GoverningCriterion::PressureContainment, f64::NEG_INFINITY), |best, next| {
            if next.1 > best.1 {
                next
            } else {
                best
            }
        }))
}

// ============================================================================
// Analysis
// ============================================================================

fn preliminary_values(
    input: &InputData,
    sig_y: f64,
    sig_y_d: f64,
    tracker: &mut EquationTracker,
) -> PreliminaryValues {
    let env = &input.environment;
    let process = &input.process;

    let p_i = pd8010::internal_pressure(
        process.design_pressure_pa,
        process.contents_density_kgm3,
        env.gravity_ms2,
        env.min_depth_m,
        process.reference_depth_m,
    );
    tracker.record(Equation::InternalPressure, "P_i at minimum water depth");
    if p_i < 0.0 {
        warn!(p_i_pa = p_i, "internal pressure at depth is below ambient (suction)");
    }

    let p_o_min = env.hydro_pressure(env.min_depth_m);
    let p_o_max = env.hydro_pressure(env.max_depth_m);
    tracker.record(Equation::PressureHead, "P_o,min and P_o,max");

    let sig_h_a = pd8010::allowable_stress(sig_y_d);
    tracker.record(Equation::AllowableHoopStress, "sig_h,a from derated yield");

    PreliminaryValues {
        sig_y_pa: sig_y,
        sig_y_d_pa: sig_y_d,
        sig_h_a_pa: sig_h_a,
        p_i_pa: p_i,
        p_o_min_pa: p_o_min,
        p_o_max_pa: p_o_max,
        delta_p_max_pa: p_i - p_o_min,
        delta_p_min_pa: p_i - p_o_max,
    }
}

/// Minimum hoop wall before allowances and the theory that produced it.
fn hoop_minimum_thickness(
    delta_p: f64,
    d_o: f64,
    sig_h_a: f64,
    input: &InputData,
    tracker: &mut EquationTracker,
) -> CalcResult<(f64, HoopTheory)> {
    if delta_p <= 0.0 {
        warn!(
            delta_p_pa = delta_p,
            "no bursting differential; pressure containment needs allowances only"
        );
        return Ok((0.0, HoopTheory::ThinWall));
    }

    let t_thin = pd8010::hoop_thickness_thin(delta_p, d_o, sig_h_a);
    if input.pipe.thin_wall_check(t_thin) {
        tracker.record(
            Equation::HoopThicknessThin,
            format!("D_o/t = {:.1} >= {}", d_o / t_thin, pd8010::THIN_WALL_RATIO),
        );
        return Ok((t_thin, HoopTheory::ThinWall));
    }

    if delta_p >= sig_h_a {
        return Err(CalcError::calculation_failed(
            "pressure containment",
            format!(
                "pressure differential {:.3e} Pa is not below the allowable hoop stress {:.3e} Pa",
                delta_p, sig_h_a
            ),
        ));
    }
    let t_thick = pd8010::hoop_thickness_thick(delta_p, d_o, sig_h_a);
    tracker.record(
        Equation::HoopThicknessThick,
        format!("D_o/t = {:.1} < {}", d_o / t_thin, pd8010::THIN_WALL_RATIO),
    );
    Ok((t_thick, HoopTheory::ThickWall))
}

/// Run a wall thickness analysis.
///
/// # Arguments
/// * `input` - Pipeline description
/// * `materials` - Table the pipe material name is resolved against
/// * `catalog` - Standard wall schedule for the recommendation
///
/// # Errors
/// * `CalcError::InvalidInput` / `MaterialNotFound` - bad input or bad
///   material properties, before any calculation
/// * `CalcError::DivisionByZero` - fabrication tolerance or bend thinning of 1
/// * `CalcError::CalculationFailed` - a formula outside its range
/// * `CalcError::NoStandardThickness` - required wall heavier than the schedule
pub fn calculate(
    input: &InputData,
    materials: &MaterialTable,
    catalog: &dyn WallThicknessCatalog,
) -> CalcResult<WallThicknessResult> {
    input.validate()?;
    let material = materials.get(&input.pipe.material)?;
    material.validate()?;

    let pipe = &input.pipe;
    let process = &input.process;
    let env = &input.environment;
    let d_o = pipe.outside_diameter_m;

    let mut tracker = EquationTracker::new();

    // === Preliminary values ===
    let sig_y = material.sig_y_pa;
    let sig_y_d = if input.settings.derate_yield {
        tracker.record(Equation::YieldDerating, format!("T_d = {} degC", process.design_temperature_c));
        derate_yield(sig_y, material.derating, process.design_temperature_c)
    } else {
        sig_y
    };
    let pre = preliminary_values(input, sig_y, sig_y_d, &mut tracker);
    debug!(
        sig_y_d_pa = pre.sig_y_d_pa,
        p_i_pa = pre.p_i_pa,
        p_o_min_pa = pre.p_o_min_pa,
        p_o_max_pa = pre.p_o_max_pa,
        "preliminary values"
    );

    // === Reeling ===
    let t_r_nom = pd8010::reeling_thickness(d_o, process.reel_radius_m, pipe.coating_thickness_m);
    if process.is_reeled() {
        tracker.record(Equation::ReelingStrain, format!("R_reel = {} m", process.reel_radius_m));
    }
    debug!(t_r_nom, "reeling");

    // === Pressure containment ===
    let (t_h_min, hoop_theory) = hoop_minimum_thickness(pre.delta_p_max_pa, d_o, pre.sig_h_a_pa, input, &mut tracker)?;
    let t_h_nom = pd8010::req_thickness(t_h_min, pipe.corrosion_allowance_m, pipe.fabrication_tolerance)?;
    tracker.record(Equation::MechanicalAllowances, "t_h,nom");
    let t_h_nom_bt = pd8010::bend_thinning_thickness(t_h_nom, pipe.bend_thinning)?;
    tracker.record(Equation::BendThinning, "t_h,nom including bend thinning");
    debug!(t_h_min, t_h_nom, t_h_nom_bt, ?hoop_theory, "pressure containment");

    // === External pressure ===
    let t_c_nom = pd8010::collapse_thickness(
        pre.p_o_max_pa,
        sig_y_d,
        material.e_pa,
        material.v,
        d_o,
        pipe.initial_ovality,
    )?;
    tracker.record(Equation::HydrostaticCollapse, "P_o,max, no internal pressure");
    debug!(t_c_nom, "hydrostatic collapse");

    let t_b_nom = pd8010::buckle_thickness(d_o, pre.p_o_max_pa, sig_y_d);
    tracker.record(Equation::PropagationBuckling, "P_p = P_o,max");
    debug!(t_b_nom, "propagation buckling");

    let thicknesses = NominalThicknesses {
        t_r_nom,
        t_h_nom,
        t_h_nom_bt,
        t_c_nom,
        t_b_nom,
    };

    // === Governing and recommended ===
    let (governing, t_gov) = governing_thickness(&thicknesses, process.is_reeled())?;
    let t_rec = catalog.recommend(d_o, t_gov.max(t_h_nom_bt))?;
    tracker.record(
        Equation::StandardWallThickness,
        format!("D_o = {:.1} mm, t >= {:.2} mm", d_o * 1e3, t_gov.max(t_h_nom_bt) * 1e3),
    );
    info!(
        name = %input.name,
        %governing,
        t_gov_mm = t_gov * 1e3,
        t_rec_mm = t_rec * 1e3,
        "governing wall thickness"
    );
    if pipe.selected_thickness_m < t_gov {
        warn!(
            t_sel_mm = pipe.selected_thickness_m * 1e3,
            t_gov_mm = t_gov * 1e3,
            "selected wall is thinner than the governing wall"
        );
    }

    // === Test pressures ===
    let p_h = pd8010::pressure_head(
        input.settings.test_medium_density_kgm3,
        env.gravity_ms2,
        env.min_depth_m,
        process.reference_depth_m,
    );
    let p_st = pd8010::strength_test_pressure(
        t_gov,
        pipe.fabrication_tolerance,
        sig_y,
        d_o,
        process.design_pressure_pa,
        pre.p_o_min_pa,
        p_h,
    );
    tracker.record(Equation::StrengthTestPressure, "at governing nominal wall, undrated SMYS");
    let p_lt = pd8010::leak_test_pressure(process.design_pressure_pa);
    tracker.record(Equation::LeakTestPressure, "at LAT");
    debug!(p_st_pa = p_st, p_lt_pa = p_lt, "test pressures");

    Ok(WallThicknessResult {
        name: input.name.clone(),
        code: input.settings.code.clone(),
        preliminary: pre,
        hoop_theory,
        thicknesses,
        governing,
        t_gov_m: t_gov,
        t_rec_m: t_rec,
        t_sel_m: pipe.selected_thickness_m,
        p_st_pa: p_st,
        p_lt_pa: p_lt,
        equations: tracker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::inputs::{AnalysisSettings, Environment, Pipe, Process};
    use crate::materials::{Api5lCatalog, DeratingCurve, Material};
    use proptest::prelude::*;

    fn aviat() -> InputData {
        InputData {
            name: "Aviat 8in X65".to_string(),
            pipe: Pipe {
                outside_diameter_m: 219.1e-3,
                selected_thickness_m: 0.0111,
                corrosion_allowance_m: 1.5e-3,
                fabrication_tolerance: 0.125,
                initial_ovality: 0.025,
                bend_thinning: 0.1,
                coating_thickness_m: 0.0,
                material: "CS X65".to_string(),
            },
            process: Process {
                design_temperature_c: 0.0,
                design_pressure_pa: 179.3e5,
                reference_depth_m: 0.0,
                contents_density_kgm3: 1025.0,
                reel_radius_m: 7.5,
                lay_temperature_c: 0.0,
            },
            environment: Environment {
                max_depth_m: 124.247,
                min_depth_m: 80.5,
                ambient_temperature_c: 4.0,
                seawater_density_kgm3: 1025.0,
                gravity_ms2: 9.80665,
            },
            settings: AnalysisSettings::default(),
        }
    }

    fn run(input: &InputData) -> CalcResult<WallThicknessResult> {
        calculate(input, MaterialTable::builtin(), &Api5lCatalog)
    }

    #[test]
    fn test_aviat_end_to_end() {
        let result = run(&aviat()).unwrap();
        let t = result.thicknesses;

        assert!((t.t_r_nom - 8.29e-3).abs() < 1e-5);
        assert!((t.t_h_nom - 8.6428e-3).abs() < 1e-7);
        assert!((t.t_h_nom_bt - 9.6031e-3).abs() < 1e-7);
        assert!((t.t_c_nom - 3.2502e-3).abs() < 1e-6);
        assert!((t.t_b_nom - 5.5826e-3).abs() < 1e-7);

        assert_eq!(result.hoop_theory, HoopTheory::ThinWall);
        assert_eq!(result.governing, GoverningCriterion::PressureContainment);
        assert_eq!(result.t_gov_m, t.t_h_nom);
        // The 9.60 mm bend thinning wall lifts the recommendation above 8.74 mm
        assert!((result.t_rec_m - 10.31e-3).abs() < 1e-12);
        assert!(result.selected_is_adequate());
    }

    #[test]
    fn test_recommendation_covers_bend_thinning() {
        let result = run(&aviat()).unwrap();
        assert!(result.t_rec_m >= result.thicknesses.t_h_nom_bt);
        assert!(result.t_rec_m >= result.t_gov_m);

        let mut straight = aviat();
        straight.pipe.bend_thinning = 0.0;
        let result = run(&straight).unwrap();
        assert_eq!(result.thicknesses.t_h_nom_bt, result.thicknesses.t_h_nom);
        assert!((result.t_rec_m - 8.74e-3).abs() < 1e-12);
    }

    #[test]
    fn test_identical_inputs_give_equal_results() {
        let first = run(&aviat()).unwrap();
        let second = run(&aviat()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nan_design_pressure_is_rejected() {
        let mut input = aviat();
        input.process.design_pressure_pa = f64::NAN;
        let err = run(&input).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "P_d"));
    }

    #[test]
    fn test_aviat_preliminary_values() {
        let pre = run(&aviat()).unwrap().preliminary;
        assert!((pre.p_i_pa - 18_739_171.2).abs() < 1.0);
        assert!((pre.delta_p_max_pa - 17.93e6).abs() < 1e-3);
        assert_eq!(pre.sig_y_d_pa, 450e6);
        assert!((pre.sig_h_a_pa - 324e6).abs() < 1e-3);
    }

    #[test]
    fn test_aviat_test_pressures() {
        let result = run(&aviat()).unwrap();
        // 1.5·P_d plus test head governs over the 90 % SMYS limit
        assert!((result.p_st_pa - 27_704_171.2).abs() < 1.0);
        assert!((result.p_lt_pa - 197.23e5).abs() < 1e-6);
    }

    #[test]
    fn test_equations_recorded() {
        let result = run(&aviat()).unwrap();
        let eqs = &result.equations;
        assert!(eqs.contains(Equation::HoopThicknessThin));
        assert!(!eqs.contains(Equation::HoopThicknessThick));
        assert!(eqs.contains(Equation::ReelingStrain));
        assert!(eqs.contains(Equation::YieldDerating));
        assert_eq!(eqs.unique_equations().first(), Some(&Equation::YieldDerating));
    }

    #[test]
    fn test_not_reeled_excludes_reeling() {
        let mut input = aviat();
        input.process.reel_radius_m = 0.0;
        let result = run(&input).unwrap();
        assert_eq!(result.thicknesses.t_r_nom, 0.0);
        assert!(!result.equations.contains(Equation::ReelingStrain));
    }

    #[test]
    fn test_reeling_governs_tight_reel() {
        let mut input = aviat();
        input.process.reel_radius_m = 4.0;
        let result = run(&input).unwrap();
        assert_eq!(result.governing, GoverningCriterion::Reeling);
        assert_eq!(result.t_gov_m, result.thicknesses.t_r_nom);
    }

    #[test]
    fn test_thick_wall_branch() {
        let mut input = aviat();
        input.pipe.outside_diameter_m = 60.3e-3;
        input.process.design_pressure_pa = 852.984e5;
        input.process.contents_density_kgm3 = 0.0;
        input.environment.min_depth_m = 0.0;
        input.environment.max_depth_m = 0.0;
        input.pipe.corrosion_allowance_m = 0.0;
        input.pipe.fabrication_tolerance = 0.0;
        input.process.reel_radius_m = 0.0;

        let result = run(&input).unwrap();
        assert_eq!(result.hoop_theory, HoopTheory::ThickWall);
        assert!((result.thicknesses.t_h_nom - 7.125e-3).abs() < 1e-6);
        assert!(result.equations.contains(Equation::HoopThicknessThick));
        // Dry pipe at the surface: no collapse or buckle requirement
        assert_eq!(result.thicknesses.t_c_nom, 0.0);
        assert_eq!(result.thicknesses.t_b_nom, 0.0);
    }

    #[test]
    fn test_thick_wall_out_of_range() {
        let mut input = aviat();
        input.pipe.outside_diameter_m = 60.3e-3;
        input.process.design_pressure_pa = 4000e5;
        input.process.reel_radius_m = 0.0;
        let err = run(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_full_fabrication_tolerance_is_division_error() {
        let mut input = aviat();
        input.pipe.fabrication_tolerance = 1.0;
        let err = run(&input).unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));
    }

    #[test]
    fn test_unknown_material() {
        let mut input = aviat();
        input.pipe.material = "Unobtainium".to_string();
        assert!(matches!(run(&input).unwrap_err(), CalcError::MaterialNotFound { .. }));
    }

    #[test]
    fn test_suction_gives_allowance_only_hoop_wall() {
        let mut input = aviat();
        input.process.design_pressure_pa = -5e5;
        input.process.contents_density_kgm3 = 0.0;
        let result = run(&input).unwrap();
        let expected = 1.5e-3 / 0.875;
        assert!((result.thicknesses.t_h_nom - expected).abs() < 1e-12);
    }

    #[test]
    fn test_derating_raises_hoop_wall() {
        let mut hot = aviat();
        hot.process.design_temperature_c = 100.0;
        let cold_result = run(&aviat()).unwrap();
        let hot_result = run(&hot).unwrap();
        assert!((hot_result.preliminary.sig_y_d_pa - 420e6).abs() < 1e-3);
        assert!(hot_result.thicknesses.t_h_nom > cold_result.thicknesses.t_h_nom);
        // Strength test uses undrated SMYS regardless
        assert_eq!(hot_result.preliminary.sig_y_pa, 450e6);

        hot.settings.derate_yield = false;
        let undrated = run(&hot).unwrap();
        assert_eq!(undrated.preliminary.sig_y_d_pa, 450e6);
        assert!(!undrated.equations.contains(Equation::YieldDerating));
    }

    #[test]
    fn test_custom_material_table() {
        let table = MaterialTable::from_materials(vec![Material {
            name: "Test Steel".to_string(),
            density_kgm3: 7850.0,
            e_pa: 2.07e11,
            v: 0.3,
            sig_y_pa: 450e6,
            alpha_per_c: 1.17e-5,
            derating: DeratingCurve::None,
        }]);
        let mut input = aviat();
        input.pipe.material = "Test Steel".to_string();
        input.process.design_temperature_c = 150.0;
        let result = calculate(&input, &table, &Api5lCatalog).unwrap();
        assert_eq!(result.preliminary.sig_y_d_pa, 450e6);
    }

    #[test]
    fn test_bad_material_properties_rejected() {
        let base = Material {
            name: "Test Steel".to_string(),
            density_kgm3: 7850.0,
            e_pa: 2.07e11,
            v: 0.3,
            sig_y_pa: 450e6,
            alpha_per_c: 1.17e-5,
            derating: DeratingCurve::None,
        };
        let mut input = aviat();
        input.pipe.material = "Test Steel".to_string();

        for (field, material) in [
            ("E", Material { e_pa: 0.0, ..base.clone() }),
            ("sig_y", Material { sig_y_pa: -1.0, ..base.clone() }),
            ("v", Material { v: 1.0, ..base.clone() }),
        ] {
            let table = MaterialTable::from_materials(vec![material]);
            let err = calculate(&input, &table, &Api5lCatalog).unwrap_err();
            assert!(
                matches!(err, CalcError::InvalidInput { field: ref f, .. } if f == field),
                "{}: {:?}",
                field,
                err
            );
        }
    }

    #[test]
    fn test_governing_selection_example() {
        let t = NominalThicknesses {
            t_r_nom: 8.29e-3,
            t_h_nom: 8.64e-3,
            t_h_nom_bt: 9.6e-3,
            t_c_nom: 3.25e-3,
            t_b_nom: 5.58e-3,
        };
        assert_eq!(
            governing_thickness(&t, true).unwrap(),
            (GoverningCriterion::PressureContainment, 8.64e-3)
        );
    }

    #[test]
    fn test_governing_rejects_non_finite() {
        let t = NominalThicknesses {
            t_r_nom: 8.29e-3,
            t_h_nom: f64::NAN,
            t_h_nom_bt: f64::NAN,
            t_c_nom: 3.25e-3,
            t_b_nom: 5.58e-3,
        };
        let err = governing_thickness(&t, true).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");

        let t = NominalThicknesses {
            t_b_nom: f64::INFINITY,
            t_h_nom: 8.64e-3,
            t_h_nom_bt: 9.6e-3,
            ..t
        };
        assert!(governing_thickness(&t, false).is_err());
    }

    #[test]
    fn test_governing_tie_keeps_first() {
        let t = NominalThicknesses {
            t_r_nom: 5e-3,
            t_h_nom: 5e-3,
            t_h_nom_bt: 6e-3,
            t_c_nom: 5e-3,
            t_b_nom: 1e-3,
        };
        assert_eq!(governing_thickness(&t, true).unwrap().0, GoverningCriterion::Reeling);
        assert_eq!(
            governing_thickness(&t, false).unwrap().0,
            GoverningCriterion::PressureContainment
        );
    }

    #[test]
    fn test_result_serializes() {
        let result = run(&aviat()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"governing\":\"PressureContainment\""));
        let roundtrip: WallThicknessResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.governing, result.governing);
        assert_eq!(roundtrip.equations, result.equations);
        assert!((roundtrip.t_rec_m - result.t_rec_m).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn governing_is_maximum_of_applicable(
            t_r in 0.0..0.05f64,
            t_h in 0.0..0.05f64,
            t_c in 0.0..0.05f64,
            t_b in 0.0..0.05f64,
            reeled in any::<bool>(),
        ) {
            let t = NominalThicknesses { t_r_nom: t_r, t_h_nom: t_h, t_h_nom_bt: t_h * 2.0, t_c_nom: t_c, t_b_nom: t_b };
            let (_, t_gov) = governing_thickness(&t, reeled).unwrap();
            let mut expected = t_h.max(t_c).max(t_b);
            if reeled {
                expected = expected.max(t_r);
            }
            prop_assert_eq!(t_gov, expected);
        }
    }
}
