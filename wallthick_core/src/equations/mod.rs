//! # Pipeline Design Equations
//!
//! Every code equation used to size a pipeline wall lives here, so each one can
//! be checked against its clause in one place.
//!
//! ## Modules
//!
//! - [`pd8010`] - PD 8010-2 pressure containment, collapse, buckle, reeling and
//!   test pressure formulas
//! - [`dnv_f101`] - DNV-OS-F101 temperature derating of yield strength
//! - [`polynomial`] - Real polynomial roots (used by the collapse solve)
//! - [`registry`] - Equation metadata and usage tracking for the design summary
//!
//! ## Units
//!
//! All functions take and return SI scalars: metres, pascals, kg/m³, m/s², °C.
//!
//! ## References
//!
//! - PD 8010-2:2015 Pipeline systems, Part 2: Subsea pipelines
//! - DNV-OS-F101 (2012) Submarine pipeline systems
//! - API 5L 46th edition, Specification for line pipe

pub mod dnv_f101;
pub mod pd8010;
pub mod polynomial;
pub mod registry;

pub use dnv_f101::{derate_yield, DeratingCurve};

pub use pd8010::{
    // Pressures
    internal_pressure,
    pressure_head,
    // Pressure containment
    allowable_stress,
    bend_thinning_thickness,
    hoop_pressure_thick,
    hoop_pressure_thin,
    hoop_thickness_thick,
    hoop_thickness_thin,
    is_thin_wall,
    req_thickness,
    // External pressure
    buckle_thickness,
    collapse_thickness,
    elastic_collapse_pressure,
    yield_collapse_pressure,
    // Installation
    reeling_thickness,
    // Testing
    leak_test_pressure,
    strength_test_pressure,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
};
