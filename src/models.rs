//! Request, response and catalog data structures

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, CalcResult};

/// Properties of a structural steel cross-section as served by the catalog.
///
/// Linear dimensions are in mm, mass in kg/m, second moments of area in cm⁴,
/// section moduli in cm³, radii of gyration in cm, warping constant in dm⁶,
/// torsional constant in cm⁴ and area in cm². This matches the catalog wire
/// format, so sparse payloads still deserialize; fields the analysis depends
/// on are checked by [`SteelSection::validate_for_analysis`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteelSection {
    pub section_designation: String,
    #[serde(default)]
    pub mass_per_metre: f64,
    #[serde(default)]
    pub depth_of_section: f64,
    #[serde(default)]
    pub width_of_section: f64,
    #[serde(default)]
    pub thickness_web: f64,
    #[serde(default)]
    pub thickness_flange: f64,
    /// Second moment of area about the major (y) axis in cm⁴
    #[serde(default)]
    pub second_moment_of_area_axis_y: f64,
    #[serde(default)]
    pub second_moment_of_area_axis_z: f64,
    #[serde(default)]
    pub radius_of_gyration_axis_y: f64,
    #[serde(default)]
    pub radius_of_gyration_axis_z: f64,
    /// Elastic section modulus about the major (y) axis in cm³
    #[serde(default)]
    pub elastic_modulus_axis_y: f64,
    #[serde(default)]
    pub elastic_modulus_axis_z: f64,
    #[serde(default)]
    pub plastic_modulus_axis_y: f64,
    #[serde(default)]
    pub plastic_modulus_axis_z: f64,
    #[serde(default)]
    pub buckling_parameter: f64,
    #[serde(default)]
    pub torsional_index: f64,
    #[serde(default)]
    pub warping_constant: f64,
    #[serde(default)]
    pub torsional_constant: f64,
    #[serde(default)]
    pub area_of_section: f64,
}

impl SteelSection {
    /// Check that the properties the bending analysis depends on are present
    /// and physically meaningful. Catalog payloads are not trusted.
    pub fn validate_for_analysis(&self) -> CalcResult<()> {
        let integrity = |field: &str| AnalysisError::DataIntegrity {
            designation: self.section_designation.clone(),
            field: field.to_string(),
        };

        if self.section_designation.trim().is_empty() {
            return Err(AnalysisError::DataIntegrity {
                designation: "<unnamed>".to_string(),
                field: "section_designation".to_string(),
            });
        }
        if !self.second_moment_of_area_axis_y.is_finite()
            || self.second_moment_of_area_axis_y <= 0.0
        {
            return Err(integrity("second_moment_of_area_axis_y"));
        }
        if !self.elastic_modulus_axis_y.is_finite() || self.elastic_modulus_axis_y <= 0.0 {
            return Err(integrity("elastic_modulus_axis_y"));
        }
        Ok(())
    }
}

/// Load pattern on the simply-supported span.
///
/// Unknown strings deserialize as `Uniform` rather than failing the request;
/// `distributed` is accepted as an alias and computes identically to
/// `Uniform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LoadType {
    #[default]
    Uniform,
    Point,
    Distributed,
}

impl From<String> for LoadType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "point" => LoadType::Point,
            "distributed" => LoadType::Distributed,
            // Unrecognized load types fall back to the uniform formulas
            _ => LoadType::Uniform,
        }
    }
}

/// Structural steel grade per EN 10025.
///
/// Unknown grade strings fall back to `S355` rather than failing the
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String")]
pub enum SteelGrade {
    S235,
    S275,
    #[default]
    S355,
    S460,
}

impl SteelGrade {
    /// Nominal yield strength in N/mm²
    pub fn yield_strength(&self) -> f64 {
        match self {
            SteelGrade::S235 => 235.0,
            SteelGrade::S275 => 275.0,
            SteelGrade::S355 => 355.0,
            SteelGrade::S460 => 460.0,
        }
    }
}

impl From<String> for SteelGrade {
    fn from(s: String) -> Self {
        match s.trim().to_uppercase().as_str() {
            "S235" => SteelGrade::S235,
            "S275" => SteelGrade::S275,
            "S355" => SteelGrade::S355,
            "S460" => SteelGrade::S460,
            _ => SteelGrade::S355,
        }
    }
}

/// Analysis request
///
/// `applied_load` is in kN/m for uniform/distributed loads and kN for point
/// loads; `span_length` is in m. When `section_designation` is omitted the
/// analyzer searches the catalog for the lightest adequate section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadScenario {
    #[serde(default)]
    pub section_designation: Option<String>,
    pub applied_load: f64,
    pub span_length: f64,
    #[serde(default)]
    pub load_type: LoadType,
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
    #[serde(default)]
    pub material_grade: SteelGrade,
}

fn default_safety_factor() -> f64 {
    1.6
}

/// Analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub section: SteelSection,
    /// Echo of the applied load (kN or kN/m)
    pub applied_load: f64,
    /// Echo of the span (m)
    pub span_length: f64,
    /// Peak bending moment in kNm
    pub max_moment: f64,
    /// Peak shear force in kN
    pub max_shear: f64,
    /// Peak deflection in mm
    pub max_deflection: f64,
    /// Actual bending stress over allowable stress
    pub stress_utilization: f64,
    pub deflection_limit_check: bool,
    pub is_adequate: bool,
    /// Remaining stress headroom as a percentage (0 when overstressed)
    pub safety_margin: f64,
    pub recommendations: Vec<String>,
}
