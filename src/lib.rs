//! Beam Calc - structural steel beam analysis service
//!
//! Computes the response of a simply-supported steel beam (bending moment,
//! shear, deflection, stress utilization) for a given load scenario and
//! checks it against strength and serviceability limits. When no section is
//! named, searches the section catalog for the lightest adequate one.
//!
//! Section data comes from a remote catalog API, with an embedded table of
//! UK Universal Beam sections used as a fallback when the remote source is
//! unreachable.
//!
//! ## Example
//! ```rust
//! use beamcalc::prelude::*;
//!
//! let scenario = LoadScenario {
//!     section_designation: Some("UB406x178x74".to_string()),
//!     applied_load: 10.0, // kN/m
//!     span_length: 6.0,   // m
//!     load_type: LoadType::Uniform,
//!     safety_factor: 1.6,
//!     material_grade: SteelGrade::S355,
//! };
//!
//! let sections = beamcalc::catalog::embedded_sections();
//! let result = beamcalc::analysis::analyze_with_sections(&scenario, &sections).unwrap();
//!
//! assert!(result.is_adequate);
//! ```

pub mod analysis;
pub mod api;
pub mod calculations;
pub mod catalog;
pub mod error;
pub mod models;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::BeamAnalyzer;
    pub use crate::catalog::{Catalog, CatalogClient, CatalogSource};
    pub use crate::error::{AnalysisError, CalcResult};
    pub use crate::models::{AnalysisResult, LoadScenario, LoadType, SteelGrade, SteelSection};
}
