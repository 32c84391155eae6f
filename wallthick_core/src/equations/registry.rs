//! # Equation Registry
//!
//! Central registry of the code equations used in a wall thickness analysis.
//! Each equation carries its clause reference, plain-text formula and
//! variable definitions so a design summary can cite exactly what was applied.
//!
//! ## Usage
//!
//! ```rust
//! use wallthick_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::HoopThicknessThin, "D_o/t = 36.1 >= 20");
//!
//! let meta = Equation::HoopThicknessThin.metadata();
//! assert_eq!(meta.reference.citation(), "PD 8010-2:2015 Equation (3)");
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to the design code or standard an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// PD 8010-2 Subsea pipelines code of practice
    Pd8010 {
        year: u16,
        clause: &'static str,
    },
    /// DNV-OS-F101 Submarine pipeline systems
    DnvOsF101 {
        year: u16,
        section: &'static str,
    },
    /// API 5L Specification for line pipe
    Api5l {
        edition: u8,
        table: &'static str,
    },
    /// Fundamental hydrostatics (no specific code reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Pd8010 { year, clause } => format!("PD 8010-2:{} {}", year, clause),
            CodeReference::DnvOsF101 { year, section } => format!("DNV-OS-F101 ({}) {}", year, section),
            CodeReference::Api5l { edition, table } => format!("API 5L {}th ed. {}", edition, table),
            CodeReference::Mechanics => "Hydrostatics".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the report appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Material strength at temperature
    Material,
    /// Internal and external pressures
    Pressures,
    /// Burst (hoop stress) checks and allowances
    PressureContainment,
    /// Collapse and buckle propagation
    ExternalPressure,
    /// Installation (reeling)
    Installation,
    /// Stock wall selection
    Selection,
    /// Hydrostatic strength and leak tests
    Testing,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Material => "Material",
            EquationCategory::Pressures => "Pressures",
            EquationCategory::PressureContainment => "Pressure Containment",
            EquationCategory::ExternalPressure => "External Pressure",
            EquationCategory::Installation => "Installation",
            EquationCategory::Selection => "Wall Selection",
            EquationCategory::Testing => "Testing",
        }
    }

    /// Sort order for the appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Material => 1,
            EquationCategory::Pressures => 2,
            EquationCategory::PressureContainment => 3,
            EquationCategory::ExternalPressure => 4,
            EquationCategory::Installation => 5,
            EquationCategory::Selection => 6,
            EquationCategory::Testing => 7,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "D_o", "t", "P_i")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "m", "Pa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Metadata for a code equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Category for grouping in the appendix
    pub category: EquationCategory,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All code equations used by the wall thickness analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// σ_y,d = σ_y - f_y,temp(T_d)
    YieldDerating,
    /// P_h = ρ·g·(d - h_ref)
    PressureHead,
    /// P_i = P_d + ρ_d·g·(d - h_ref)
    InternalPressure,
    /// σ_h,a = 0.72·σ_y
    AllowableHoopStress,
    /// t = ΔP·D_o / (2σ_h,a)
    HoopThicknessThin,
    /// t = ½(D_o - D_o√((σ_h,a - ΔP)/(σ_h,a + ΔP)))
    HoopThicknessThick,
    /// t_req = (t + t_corr)/(1 - f_tol)
    MechanicalAllowances,
    /// t_bt = t_nom/(1 - B)
    BendThinning,
    /// (P_o/P_e - 1)((P_o/P_y)² - 1) = (P_o/P_y)·f_0·D_o/t
    HydrostaticCollapse,
    /// t = D_o(P_p/(10.7σ_y))^(4/9)
    PropagationBuckling,
    /// t = D_o√(ε_b/(15·0.67))
    ReelingStrain,
    /// Smallest catalogue wall ≥ max(governing, bend thinning)
    StandardWallThickness,
    /// P_st = min(1.5P_d + P_h, P(0.9 SMYS))
    StrengthTestPressure,
    /// P_lt = 1.1P_d
    LeakTestPressure,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::YieldDerating => EquationMetadata {
                name: "Yield Strength Derating",
                formula_plain: "sig_y_d = sig_y - f_y_temp(T_d)",
                reference: CodeReference::DnvOsF101 { year: 2012, section: "Sec.5 Fig.2" },
                variables: vec![
                    Variable::new("sig_y", "Specified minimum yield strength", "Pa"),
                    Variable::new("T_d", "Design temperature", "degC"),
                ],
                category: EquationCategory::Material,
            },
            Equation::PressureHead => EquationMetadata {
                name: "Hydrostatic Pressure Head",
                formula_plain: "P_h = rho * g * (d - h_ref)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("rho", "Fluid density", "kg/m^3"),
                    Variable::new("g", "Gravitational acceleration", "m/s^2"),
                    Variable::new("d", "Water depth", "m"),
                    Variable::new("h_ref", "Depth of pressure reference point", "m"),
                ],
                category: EquationCategory::Pressures,
            },
            Equation::InternalPressure => EquationMetadata {
                name: "Internal Pressure at Depth",
                formula_plain: "P_i = P_d + rho_d * g * (d - h_ref)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("P_d", "Design pressure", "Pa"),
                    Variable::new("rho_d", "Contents density", "kg/m^3"),
                ],
                category: EquationCategory::Pressures,
            },
            Equation::AllowableHoopStress => EquationMetadata {
                name: "Allowable Hoop Stress",
                formula_plain: "sig_h_a = 0.72 * sig_y",
                reference: CodeReference::Pd8010 { year: 2015, clause: "Equation (2)" },
                variables: vec![Variable::new("sig_y", "Yield strength (derated)", "Pa")],
                category: EquationCategory::PressureContainment,
            },
            Equation::HoopThicknessThin => EquationMetadata {
                name: "Hoop Thickness (Thin Wall)",
                formula_plain: "t = dP * D_o / (2 * sig_h_a)",
                reference: CodeReference::Pd8010 { year: 2015, clause: "Equation (3)" },
                variables: vec![
                    Variable::new("dP", "Internal minus external pressure", "Pa"),
                    Variable::new("D_o", "Outside diameter", "m"),
                ],
                category: EquationCategory::PressureContainment,
            },
            Equation::HoopThicknessThick => EquationMetadata {
                name: "Hoop Thickness (Thick Wall)",
                formula_plain: "t = 0.5 * (D_o - sqrt((sig_h_a - dP) * D_o^2 / (sig_h_a + dP)))",
                reference: CodeReference::Pd8010 { year: 2015, clause: "Equation (5)" },
                variables: vec![
                    Variable::new("dP", "Internal minus external pressure", "Pa"),
                    Variable::new("D_o", "Outside diameter", "m"),
                ],
                category: EquationCategory::PressureContainment,
            },
            Equation::MechanicalAllowances => EquationMetadata {
                name: "Corrosion and Fabrication Allowances",
                formula_plain: "t_req = (t + t_corr) / (1 - f_tol)",
                reference: CodeReference::Pd8010 { year: 2015, clause: "Equation (4)" },
                variables: vec![
                    Variable::new("t_corr", "Corrosion allowance", "m"),
                    Variable::new("f_tol", "Fabrication tolerance", "-"),
                ],
                category: EquationCategory::PressureContainment,
            },
            Equation::BendThinning => EquationMetadata {
                name: "Bend Thinning",
                formula_plain: "t_bt = t_nom / (1 - B)",
                reference: CodeReference::Pd8010 { year: 2015, clause: "6.4.2.2" },
                variables: vec![Variable::new("B", "Bend thinning fraction", "-")],
                category: EquationCategory::PressureContainment,
            },
            Equation::HydrostaticCollapse => EquationMetadata {
                name: "Hydrostatic Collapse",
                formula_plain: "(P_o/P_e - 1)((P_o/P_y)^2 - 1) = (P_o/P_y) f_0 D_o/t",
                reference: CodeReference::Pd8010 { year: 2015, clause: "Equation (G.1)" },
                variables: vec![
                    Variable::new("P_o", "Maximum external pressure", "Pa"),
                    Variable::new("P_e", "Elastic critical pressure (G.2)", "Pa"),
                    Variable::new("P_y", "Yield pressure (G.3)", "Pa"),
                    Variable::new("f_0", "Initial ovality", "-"),
                ],
                category: EquationCategory::ExternalPressure,
            },
            Equation::PropagationBuckling => EquationMetadata {
                name: "Propagation Buckling",
                formula_plain: "t = D_o * (P_p / (10.7 * sig_y))^(4/9)",
                reference: CodeReference::Pd8010 { year: 2015, clause: "Equation (G.21)" },
                variables: vec![Variable::new("P_p", "Propagation pressure", "Pa")],
                category: EquationCategory::ExternalPressure,
            },
            Equation::ReelingStrain => EquationMetadata {
                name: "Reeling Bending Strain",
                formula_plain: "t = D_o * sqrt(eps_b / (15 * 0.67)), eps_b = D_o / (2(R_reel + D_o/2 + t_coat))",
                reference: CodeReference::Pd8010 { year: 2015, clause: "Equation (G.8)" },
                variables: vec![
                    Variable::new("R_reel", "Reel radius", "m"),
                    Variable::new("t_coat", "Coating thickness", "m"),
                ],
                category: EquationCategory::Installation,
            },
            Equation::StandardWallThickness => EquationMetadata {
                name: "Recommended Standard Wall",
                formula_plain: "t_rec = min { t in catalogue(D_o) : t >= max(t_gov, t_bt) }",
                reference: CodeReference::Api5l { edition: 46, table: "Table 9" },
                variables: vec![
                    Variable::new("t_gov", "Governing nominal thickness", "m"),
                    Variable::new("t_bt", "Pressure containment wall including bend thinning", "m"),
                ],
                category: EquationCategory::Selection,
            },
            Equation::StrengthTestPressure => EquationMetadata {
                name: "Strength Test Pressure",
                formula_plain: "P_st = min(1.5 P_d + P_h, P at 0.9 SMYS in t_nom(1 - f_tol))",
                reference: CodeReference::Pd8010 { year: 2015, clause: "11.5.1" },
                variables: vec![Variable::new("P_h", "Test medium head", "Pa")],
                category: EquationCategory::Testing,
            },
            Equation::LeakTestPressure => EquationMetadata {
                name: "Leak Test Pressure",
                formula_plain: "P_lt = 1.1 * P_d",
                reference: CodeReference::Pd8010 { year: 2015, clause: "11.5.3" },
                variables: vec![Variable::new("P_d", "Design pressure", "Pa")],
                category: EquationCategory::Testing,
            },
        }
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::YieldDerating,
    Equation::PressureHead,
    Equation::InternalPressure,
    Equation::AllowableHoopStress,
    Equation::HoopThicknessThin,
    Equation::HoopThicknessThick,
    Equation::MechanicalAllowances,
    Equation::BendThinning,
    Equation::HydrostaticCollapse,
    Equation::PropagationBuckling,
    Equation::ReelingStrain,
    Equation::StandardWallThickness,
    Equation::StrengthTestPressure,
    Equation::LeakTestPressure,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being applied during an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where/why it was used
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// True if the equation was recorded at least once
    pub fn contains(&self, equation: Equation) -> bool {
        self.usages.iter().any(|u| u.equation == equation)
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group usages by equation
    pub fn by_equation(&self) -> HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: HashMap<Equation, Vec<&EquationUsage>> = HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Unique equations grouped by category, categories in appendix order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut groups: Vec<(EquationCategory, Vec<Equation>)> = Vec::new();
        for equation in self.unique_equations() {
            let category = equation.metadata().category;
            match groups.iter_mut().find(|(c, _)| *c == category) {
                Some((_, eqs)) => eqs.push(equation),
                None => groups.push((category, vec![equation])),
            }
        }
        groups.sort_by_key(|(c, _)| c.sort_order());
        groups
    }

    /// Plain-text "Equations Referenced" appendix for the design summary.
    ///
    /// Each equation is listed once with its citation, formula, variable
    /// definitions and the places it was applied.
    pub fn generate_appendix_text(&self) -> String {
        let usages = self.by_equation();
        let mut output = String::from("Equations Referenced\n====================\n");
        for (category, equations) in self.by_category() {
            output.push_str(&format!("\n{}\n", category.display_name()));
            for equation in equations {
                let meta = equation.metadata();
                output.push_str(&format!(
                    "  {:<40} {}\n      {}\n",
                    meta.name,
                    meta.reference.citation(),
                    meta.formula_plain
                ));
                for var in &meta.variables {
                    output.push_str(&format!("        {:<8} {} ({})\n", var.symbol, var.description, var.units));
                }
                let applied: Vec<&str> = usages
                    .get(&equation)
                    .into_iter()
                    .flatten()
                    .map(|u| u.context.as_str())
                    .filter(|c| !c.is_empty())
                    .collect();
                if !applied.is_empty() {
                    output.push_str(&format!("      Applied: {}\n", applied.join("; ")));
                }
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty());
            assert!(!meta.formula_plain.is_empty());
            assert!(!meta.variables.is_empty());
        }
    }

    #[test]
    fn test_citations() {
        assert_eq!(
            Equation::PropagationBuckling.metadata().reference.citation(),
            "PD 8010-2:2015 Equation (G.21)"
        );
        assert_eq!(
            Equation::YieldDerating.metadata().reference.citation(),
            "DNV-OS-F101 (2012) Sec.5 Fig.2"
        );
    }

    #[test]
    fn test_tracker_deduplicates_in_first_use_order() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::PressureHead, "P_o,min");
        tracker.record(Equation::HoopThicknessThin, "hoop");
        tracker.record(Equation::PressureHead, "P_o,max");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(
            tracker.unique_equations(),
            vec![Equation::PressureHead, Equation::HoopThicknessThin]
        );
        assert_eq!(tracker.by_equation()[&Equation::PressureHead].len(), 2);
        assert!(tracker.contains(Equation::HoopThicknessThin));
        assert!(!tracker.contains(Equation::HoopThicknessThick));
    }

    #[test]
    fn test_by_category_sorted() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::LeakTestPressure, "");
        tracker.record(Equation::YieldDerating, "");
        let cats: Vec<_> = tracker.by_category().into_iter().map(|(c, _)| c).collect();
        assert_eq!(cats, vec![EquationCategory::Material, EquationCategory::Testing]);
    }

    #[test]
    fn test_appendix_text() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::HydrostaticCollapse, "P_o,max");
        let text = tracker.generate_appendix_text();
        assert!(text.contains("External Pressure"));
        assert!(text.contains("Hydrostatic Collapse"));
        assert!(text.contains("Equation (G.1)"));
        assert!(text.contains("f_0      Initial ovality (-)"));
        assert!(text.contains("Applied: P_o,max"));
    }

    #[test]
    fn test_appendix_joins_contexts_once_per_equation() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::PressureHead, "P_o,min");
        tracker.record(Equation::PressureHead, "P_o,max");
        tracker.record(Equation::LeakTestPressure, "");
        let text = tracker.generate_appendix_text();
        assert_eq!(text.matches("Hydrostatic Pressure Head").count(), 1);
        assert!(text.contains("Applied: P_o,min; P_o,max"));
        assert!(!text.contains("Applied: \n"));
    }
}
