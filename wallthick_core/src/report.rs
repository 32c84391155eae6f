//! # Result Reporting
//!
//! Renders a [`WallThicknessResult`] for people and for other programs.
//! Calculations never round; all rounding happens here. The issue date of a
//! design sheet is supplied by the caller, the result itself carries none.
//!
//! - [`short_summary`] - the three headline thicknesses, mm to 3 d.p.
//! - [`design_summary`] - the full wall thickness design sheet, mm and bar
//!   to 2 d.p., with the equations referenced
//! - [`to_json`] - the complete result as pretty-printed JSON

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::calculations::wall_thickness::WallThicknessResult;
use crate::errors::CalcResult;
use crate::units::{Bar, Meters, Millimeters, Pascals};

/// Width of the label column in the design summary
const LABEL_WIDTH: usize = 49;

fn mm(m: f64) -> f64 {
    Millimeters::from(Meters(m)).value()
}

fn bar(pa: f64) -> f64 {
    Bar::from(Pascals(pa)).value()
}

/// Pressure containment, collapse and buckle thicknesses in mm to 3 d.p.
pub fn short_summary(result: &WallThicknessResult) -> String {
    let t = &result.thicknesses;
    format!(
        "Pressure Containment: {:.3} mm\nHydrostatic Collapse: {:.3} mm\nPropagation buckling: {:.3} mm\n",
        mm(t.t_h_nom),
        mm(t.t_c_nom),
        mm(t.t_b_nom)
    )
}

fn line(out: &mut String, label: &str, value: f64, unit: &str) {
    let _ = writeln!(out, "{:<width$}{:.2} {}", format!("{}:", label), value, unit, width = LABEL_WIDTH);
}

/// Full wall thickness design sheet, dated `date`.
pub fn design_summary(result: &WallThicknessResult, date: NaiveDate) -> String {
    let t = &result.thicknesses;
    let mut out = String::new();

    let _ = writeln!(out, "{}", date.format("%Y-%m-%d"));
    out.push('\n');
    out.push_str("Wall Thickness Design\n=====================\n\n");
    let _ = writeln!(out, "Pipeline: {}", result.name);
    let _ = writeln!(out, "Code:     {}", result.code);
    out.push('\n');

    line(&mut out, "Reeling Criterion", mm(t.t_r_nom), "mm");
    line(&mut out, "Pressure Containment", mm(t.t_h_nom), "mm");
    line(&mut out, "Pressure Containment (incl. bend thinning)", mm(t.t_h_nom_bt), "mm");
    line(&mut out, "Hydrostatic Collapse", mm(t.t_c_nom), "mm");
    line(&mut out, "Propagation buckling", mm(t.t_b_nom), "mm");
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<width$}{}",
        "Governing Criterion:",
        result.governing,
        width = LABEL_WIDTH
    );
    line(&mut out, "Minimum Recommended API Wall Thickness", mm(result.t_rec_m), "mm");
    line(&mut out, "Selected Wall Thickness", mm(result.t_sel_m), "mm");
    if !result.selected_is_adequate() {
        out.push_str("WARNING: selected wall is thinner than the governing wall\n");
    }
    out.push('\n');

    line(&mut out, "Strength Test Pressure", bar(result.p_st_pa), "bar");
    line(&mut out, "Leak Test Pressure", bar(result.p_lt_pa), "bar");
    out.push('\n');

    out.push_str(&result.equations.generate_appendix_text());
    out
}

/// Complete result as pretty-printed JSON.
pub fn to_json(result: &WallThicknessResult) -> CalcResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
