//! # Materials Database
//!
//! Line pipe material properties, looked up by name.
//!
//! The analysis never reaches into a global table: a [`MaterialTable`] is an
//! explicit, immutable mapping handed to the orchestrator. [`MaterialTable::builtin`]
//! provides the standard catalogue of carbon steel and corrosion resistant
//! alloy grades; callers can build their own with [`MaterialTable::from_materials`].
//!
//! ## Example
//!
//! ```rust
//! use wallthick_core::materials::MaterialTable;
//!
//! let table = MaterialTable::builtin();
//! let x65 = table.get("CS X65").unwrap();
//! assert_eq!(x65.sig_y_pa, 450e6);
//! ```

pub mod api5l;

pub use api5l::{Api5lCatalog, WallThicknessCatalog};
pub use crate::equations::dnv_f101::DeratingCurve;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Mechanical and physical properties of a pipe material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalogue name, e.g. "CS X65"
    pub name: String,
    /// Density (kg/m³)
    pub density_kgm3: f64,
    /// Young's modulus E (Pa)
    pub e_pa: f64,
    /// Poisson's ratio ν
    pub v: f64,
    /// Specified minimum yield strength (Pa)
    pub sig_y_pa: f64,
    /// Linear thermal expansion coefficient (1/°C)
    pub alpha_per_c: f64,
    /// Temperature derating curve for yield strength
    pub derating: DeratingCurve,
}

impl Material {
    /// Carbon-manganese line pipe grade
    fn carbon_steel(name: &str, sig_y_pa: f64) -> Self {
        Self {
            name: name.to_string(),
            density_kgm3: 7850.0,
            e_pa: 2.07e11,
            v: 0.3,
            sig_y_pa,
            alpha_per_c: 1.17e-5,
            derating: DeratingCurve::CarbonSteel,
        }
    }

    /// Check the properties the analysis divides by or takes roots of.
    ///
    /// # Errors
    /// * `CalcError::InvalidInput` - `E` or `sig_y` not positive, or `|v| >= 1`
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.e_pa.is_finite() && self.e_pa > 0.0) {
            return Err(CalcError::invalid_input(
                "E",
                self.e_pa.to_string(),
                format!("Young's modulus of {} must be positive", self.name),
            ));
        }
        if !(self.sig_y_pa.is_finite() && self.sig_y_pa > 0.0) {
            return Err(CalcError::invalid_input(
                "sig_y",
                self.sig_y_pa.to_string(),
                format!("Yield strength of {} must be positive", self.name),
            ));
        }
        if !(self.v.abs() < 1.0) {
            return Err(CalcError::invalid_input(
                "v",
                self.v.to_string(),
                format!("Poisson's ratio of {} must lie strictly between -1 and 1", self.name),
            ));
        }
        Ok(())
    }

    /// Yield strength at temperature `temp_c` on this material's derating curve
    pub fn derated_yield(&self, temp_c: f64) -> f64 {
        crate::equations::dnv_f101::derate_yield(self.sig_y_pa, self.derating, temp_c)
    }
}

static BUILTIN: Lazy<MaterialTable> = Lazy::new(|| {
    MaterialTable::from_materials(vec![
        Material::carbon_steel("CS X52", 360e6),
        Material::carbon_steel("CS X60", 415e6),
        Material::carbon_steel("CS X65", 450e6),
        Material::carbon_steel("CS X70", 485e6),
        Material {
            name: "22Cr".to_string(),
            density_kgm3: 7800.0,
            e_pa: 2.00e11,
            v: 0.3,
            sig_y_pa: 360e6,
            alpha_per_c: 1.30e-5,
            derating: DeratingCurve::Duplex,
        },
        Material {
            name: "25Cr".to_string(),
            density_kgm3: 7800.0,
            e_pa: 2.00e11,
            v: 0.3,
            sig_y_pa: 360e6,
            alpha_per_c: 1.35e-5,
            derating: DeratingCurve::Duplex,
        },
        Material {
            name: "13Cr".to_string(),
            density_kgm3: 7690.0,
            e_pa: 2.01e11,
            v: 0.27,
            sig_y_pa: 360e6,
            alpha_per_c: 1.07e-5,
            derating: DeratingCurve::Duplex,
        },
    ])
});

/// Immutable name → material mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialTable {
    materials: BTreeMap<String, Material>,
}

impl MaterialTable {
    /// Build a table from a list of materials. A later entry with the same
    /// name replaces an earlier one.
    pub fn from_materials(materials: impl IntoIterator<Item = Material>) -> Self {
        Self {
            materials: materials.into_iter().map(|m| (m.name.clone(), m)).collect(),
        }
    }

    /// The standard catalogue
    pub fn builtin() -> &'static MaterialTable {
        &BUILTIN
    }

    /// Look up a material by exact name.
    pub fn get(&self, name: &str) -> CalcResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Material names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_carbon_steel() {
        let table = MaterialTable::builtin();
        let x65 = table.get("CS X65").unwrap();
        assert_eq!(x65.e_pa, 2.07e11);
        assert_eq!(x65.v, 0.3);
        assert_eq!(x65.derating, DeratingCurve::CarbonSteel);
        assert_eq!(table.get("CS X52").unwrap().sig_y_pa, 360e6);
    }

    #[test]
    fn test_builtin_materials_are_valid() {
        let table = MaterialTable::builtin();
        for name in table.names() {
            assert!(table.get(name).unwrap().validate().is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_validate_rejects_nonphysical_values() {
        let mut m = Material::carbon_steel("Bad", 450e6);
        m.e_pa = -1.0;
        assert!(matches!(m.validate(), Err(CalcError::InvalidInput { ref field, .. }) if field == "E"));

        let mut m = Material::carbon_steel("Bad", 0.0);
        assert!(matches!(m.validate(), Err(CalcError::InvalidInput { ref field, .. }) if field == "sig_y"));

        m.sig_y_pa = 450e6;
        m.v = f64::NAN;
        assert!(matches!(m.validate(), Err(CalcError::InvalidInput { ref field, .. }) if field == "v"));
    }

    #[test]
    fn test_unknown_material() {
        let err = MaterialTable::builtin().get("CS X80").unwrap_err();
        assert_eq!(err, CalcError::material_not_found("CS X80"));
    }

    #[test]
    fn test_custom_table_is_isolated_from_builtin() {
        let mut custom = Material::carbon_steel("CS X65", 450e6);
        custom.sig_y_pa = 400e6;
        let table = MaterialTable::from_materials(vec![custom]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("CS X65").unwrap().sig_y_pa, 400e6);
        assert_eq!(MaterialTable::builtin().get("CS X65").unwrap().sig_y_pa, 450e6);
        assert!(table.get("22Cr").is_err());
    }

    #[test]
    fn test_names_sorted() {
        let names: Vec<_> = MaterialTable::builtin().names().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"13Cr"));
    }

    #[test]
    fn test_derated_yield() {
        let x65 = MaterialTable::builtin().get("CS X65").unwrap();
        assert_eq!(x65.derated_yield(20.0), 450e6);
        assert!((x65.derated_yield(100.0) - 420e6).abs() < 1e-6);
    }
}
