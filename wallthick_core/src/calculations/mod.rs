//! # Pipeline Calculations
//!
//! Each calculation follows the pattern:
//!
//! - Input value objects (JSON-serializable, with `validate()`)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ...) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`wall_thickness`] - PD 8010-2 wall thickness sizing and test pressures

pub mod inputs;
pub mod wall_thickness;

pub use inputs::{AnalysisSettings, Environment, InputData, Pipe, Process};
pub use wall_thickness::{
    calculate, governing_thickness, GoverningCriterion, HoopTheory, NominalThicknesses, PreliminaryValues,
    WallThicknessResult,
};
