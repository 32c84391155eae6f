//! # DNV-OS-F101 Material Derating
//!
//! Temperature derating of specified minimum yield strength, after
//! DNV-OS-F101 (2012) Section 5 Figure 2. The derating is subtracted from SMYS
//! before any PD 8010 check that uses yield.

use serde::{Deserialize, Serialize};

/// Table temperatures (°C) at which derating values are given.
const DERATING_TEMPS_C: [f64; 6] = [0.0, 25.0, 50.0, 100.0, 150.0, 200.0];

/// Carbon-manganese steel derating (Pa) at `DERATING_TEMPS_C`.
const CARBON_STEEL_DERATING_PA: [f64; 6] = [0.0, 0.0, 0.0, 30e6, 50e6, 70e6];

/// Duplex and martensitic stainless derating (Pa) at `DERATING_TEMPS_C`.
const DUPLEX_DERATING_PA: [f64; 6] = [0.0, 0.0, 40e6, 90e6, 120e6, 140e6];

/// Which derating curve a material follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeratingCurve {
    /// C-Mn line pipe (API 5L X grades)
    CarbonSteel,
    /// 22Cr / 25Cr duplex and 13Cr martensitic
    Duplex,
    /// No derating (coatings, non-structural materials)
    None,
}

impl DeratingCurve {
    fn table(&self) -> Option<&'static [f64; 6]> {
        match self {
            DeratingCurve::CarbonSteel => Some(&CARBON_STEEL_DERATING_PA),
            DeratingCurve::Duplex => Some(&DUPLEX_DERATING_PA),
            DeratingCurve::None => None,
        }
    }

    /// Yield derating (Pa) at temperature `temp_c`.
    ///
    /// Linear between table points; beyond either end of the table the end
    /// value applies.
    pub fn derating_at(&self, temp_c: f64) -> f64 {
        let Some(values) = self.table() else {
            return 0.0;
        };

        if temp_c <= DERATING_TEMPS_C[0] {
            return values[0];
        }
        let last = DERATING_TEMPS_C.len() - 1;
        if temp_c >= DERATING_TEMPS_C[last] {
            return values[last];
        }

        let hi = DERATING_TEMPS_C
            .iter()
            .position(|&t| t >= temp_c)
            .unwrap_or(last);
        let lo = hi - 1;
        let span = DERATING_TEMPS_C[hi] - DERATING_TEMPS_C[lo];
        let frac = (temp_c - DERATING_TEMPS_C[lo]) / span;
        values[lo] + frac * (values[hi] - values[lo])
    }
}

/// Derated yield strength at design temperature.
///
/// # Formula
/// σ_y,d = σ_y - f_y,temp(T_d)
///
/// # Example
/// ```rust
/// use wallthick_core::equations::dnv_f101::{derate_yield, DeratingCurve};
///
/// let sig = derate_yield(450e6, DeratingCurve::CarbonSteel, 125.0);
/// assert!((sig - 410e6).abs() < 1.0);
/// ```
pub fn derate_yield(sig_y: f64, curve: DeratingCurve, temp_c: f64) -> f64 {
    sig_y - curve.derating_at(temp_c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbon_steel_no_derating_below_50c() {
        assert_eq!(derate_yield(450e6, DeratingCurve::CarbonSteel, 50.0), 450e6);
        assert_eq!(derate_yield(450e6, DeratingCurve::CarbonSteel, 4.0), 450e6);
    }

    #[test]
    fn test_carbon_steel_interpolation() {
        // Halfway between 100 °C (30 MPa) and 150 °C (50 MPa)
        assert!((DeratingCurve::CarbonSteel.derating_at(125.0) - 40e6).abs() < 1e-6);
        // Halfway between 50 °C (0) and 100 °C (30 MPa)
        assert!((DeratingCurve::CarbonSteel.derating_at(75.0) - 15e6).abs() < 1e-6);
    }

    #[test]
    fn test_duplex_derating() {
        assert!((DeratingCurve::Duplex.derating_at(50.0) - 40e6).abs() < 1e-6);
        assert!((DeratingCurve::Duplex.derating_at(37.5) - 20e6).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_uses_end_values() {
        assert_eq!(DeratingCurve::CarbonSteel.derating_at(250.0), 70e6);
        assert_eq!(DeratingCurve::Duplex.derating_at(-10.0), 0.0);
    }

    #[test]
    fn test_no_curve() {
        assert_eq!(derate_yield(360e6, DeratingCurve::None, 150.0), 360e6);
    }
}
