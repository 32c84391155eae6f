//! # Unit Types
//!
//! Type-safe wrappers for the units a report displays. The formula library
//! works on raw `f64` SI scalars (metres, pascals); these newtypes are used at
//! the reporting edge where values are converted for display.
//!
//! ## Example
//!
//! ```rust
//! use wallthick_core::units::{Meters, Millimeters, Pascals, Bar};
//!
//! let wt: Millimeters = Meters(0.0111).into();
//! assert!((wt.value() - 11.1).abs() < 1e-9);
//!
//! let p: Bar = Pascals(179.3e5).into();
//! assert!((p.value() - 179.3).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Millimeters {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

/// Pressure or stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Pressure in bar (1 bar = 1e5 Pa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bar(pub f64);

impl Bar {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Pascals> for Bar {
    fn from(pa: Pascals) -> Self {
        Bar(pa.0 * 1e-5)
    }
}
