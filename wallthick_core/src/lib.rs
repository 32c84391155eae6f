//! # wallthick_core - Pipeline Wall Thickness Engine
//!
//! Sizes the wall of a subsea pipeline to PD 8010-2. Four failure modes are
//! checked independently (reeling, pressure containment, hydrostatic collapse
//! and propagation buckling); the largest nominal thickness governs, is rounded
//! up to a standard API 5L wall, and the hydrostatic test pressures follow.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from inputs to results; the material table
//!   and wall schedule are passed in, never global
//! - **JSON-First**: inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: structured [`CalcError`] values, not strings
//!
//! ## Quick Start
//!
//! ```rust
//! use wallthick_core::input_file::parse_input_data;
//! use wallthick_core::materials::{Api5lCatalog, MaterialTable};
//! use wallthick_core::calculations::calculate;
//!
//! let data = parse_input_data(r#"{
//!     "name": "Aviat 8in X65",
//!     "t_sel": 0.0111, "D_o": 0.2191, "t_corr": 0.0015, "f_tol": 0.125,
//!     "f_0": 0.025, "B": 0.1, "mat_p": "CS X65", "t_coat": 0.0,
//!     "T_d": 0, "P_d": 17930000, "h_ref": 0, "rho_d": 1025,
//!     "R_reel": 7.5, "T_lay": 0,
//!     "d_max": 124.247, "d_min": 80.5, "T_a": 4, "rho_w": 1025, "g": 9.80665
//! }"#).unwrap();
//!
//! let result = calculate(&data, MaterialTable::builtin(), &Api5lCatalog).unwrap();
//! println!("{}", wallthick_core::report::short_summary(&result));
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - PD 8010-2 and DNV-OS-F101 formulas, equation registry
//! - [`materials`] - Material table and API 5L wall schedule
//! - [`calculations`] - Input model and the wall thickness analysis
//! - [`input_file`] - Flat JSON input records
//! - [`report`] - Text and JSON rendering of results
//! - [`file_io`] - Loading inputs, atomic report saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod input_file;
pub mod materials;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, InputData, WallThicknessResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_input, save_report};
pub use materials::{Api5lCatalog, MaterialTable, WallThicknessCatalog};
