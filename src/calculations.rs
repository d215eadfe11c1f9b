//! Beam response calculations
//!
//! Closed-form Euler-Bernoulli formulas for a simply-supported span under a
//! uniform or central point load. All functions are pure; unit conversions
//! (kN/m, m, cm⁴, cm³ in, N/mm² out) happen at the formula boundary.

use crate::error::{AnalysisError, CalcResult};
use crate::models::{LoadType, SteelGrade};

/// Young's modulus for structural steel in N/mm²
pub const E_STEEL: f64 = 210_000.0;

/// Span-to-deflection ratio for general construction serviceability
pub const DEFLECTION_SPAN_RATIO: f64 = 250.0;

/// Peak bending moment in kNm.
///
/// Uniform: M = wL²/8. Point (mid-span): M = PL/4.
pub fn max_moment(load: f64, span: f64, load_type: LoadType) -> CalcResult<f64> {
    validate_loading(load, span)?;

    let moment = match load_type {
        LoadType::Point => (load * span) / 4.0,
        LoadType::Uniform | LoadType::Distributed => (load * span.powi(2)) / 8.0,
    };

    check_response(moment, "max_moment")
}

/// Peak shear force in kN.
///
/// `load / 2` for both supported load patterns. For a central point load the
/// end reaction happens to be P/2 as well, so the arms coincide; downstream
/// consumers rely on this value, keep it as is.
pub fn max_shear(load: f64, load_type: LoadType) -> CalcResult<f64> {
    if load.is_nan() || load <= 0.0 {
        return Err(AnalysisError::invalid_input(
            "applied_load",
            "must be positive",
        ));
    }

    let shear = match load_type {
        LoadType::Point => load / 2.0,
        LoadType::Uniform | LoadType::Distributed => load / 2.0,
    };

    check_response(shear, "max_shear")
}

/// Peak deflection in mm.
///
/// Uniform: δ = 5wL⁴/(384EI). Point (mid-span): δ = PL³/(48EI). The second
/// moment of area is taken in cm⁴ as catalogued. Sign is meaningless to
/// callers, so the absolute value is returned.
pub fn max_deflection(
    load: f64,
    span: f64,
    second_moment_of_area: f64,
    load_type: LoadType,
) -> CalcResult<f64> {
    validate_loading(load, span)?;
    if second_moment_of_area.is_nan() || second_moment_of_area <= 0.0 {
        return Err(AnalysisError::invalid_input(
            "second_moment_of_area_axis_y",
            "must be positive",
        ));
    }

    // cm⁴ -> mm⁴
    let i_mm4 = second_moment_of_area * 10_000.0;
    let l = span * 1000.0; // mm

    let deflection = match load_type {
        LoadType::Point => {
            let p = load * 1000.0; // kN -> N
            (p * l.powi(3)) / (48.0 * E_STEEL * i_mm4)
        }
        LoadType::Uniform | LoadType::Distributed => {
            // kN/m -> N/mm
            let w = load * 1000.0 / (span * 1000.0);
            (5.0 * w * l.powi(4)) / (384.0 * E_STEEL * i_mm4)
        }
    };

    if !deflection.is_finite() {
        return Err(AnalysisError::invalid_input(
            "max_deflection",
            "computed response is not finite",
        ));
    }
    Ok(deflection.abs())
}

/// Ratio of actual bending stress to allowable stress.
///
/// Actual stress is M/W with the moment in Nmm and the elastic section
/// modulus converted cm³ -> mm³; allowable stress is the grade yield
/// strength divided by the safety factor. Callers guarantee a positive
/// modulus from validated section data.
pub fn stress_utilization(
    moment: f64,
    elastic_modulus: f64,
    material_grade: SteelGrade,
    safety_factor: f64,
) -> f64 {
    // kNm -> Nmm
    let m_nmm = moment * 1.0e6;
    // cm³ -> mm³
    let w_mm3 = elastic_modulus * 1000.0;

    let actual_stress = m_nmm / w_mm3;
    let allowable_stress = material_grade.yield_strength() / safety_factor;

    actual_stress / allowable_stress
}

/// Serviceability deflection limit in mm (span/250)
pub fn deflection_limit(span: f64) -> f64 {
    (span * 1000.0) / DEFLECTION_SPAN_RATIO
}

fn validate_loading(load: f64, span: f64) -> CalcResult<()> {
    if load.is_nan() || load <= 0.0 {
        return Err(AnalysisError::invalid_input(
            "applied_load",
            "must be positive",
        ));
    }
    if span.is_nan() || span <= 0.0 {
        return Err(AnalysisError::invalid_input(
            "span_length",
            "must be positive",
        ));
    }
    Ok(())
}

fn check_response(value: f64, quantity: &str) -> CalcResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AnalysisError::invalid_input(
            quantity,
            "computed response is not positive and finite",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_moment() {
        // M = wL²/8 = 10 * 36 / 8
        let m = max_moment(10.0, 6.0, LoadType::Uniform).unwrap();
        assert_relative_eq!(m, 45.0);
    }

    #[test]
    fn test_point_moment() {
        // M = PL/4 = 50 * 5 / 4
        let m = max_moment(50.0, 5.0, LoadType::Point).unwrap();
        assert_relative_eq!(m, 62.5);
    }

    #[test]
    fn test_distributed_is_uniform() {
        let uniform = max_moment(12.0, 4.5, LoadType::Uniform).unwrap();
        let distributed = max_moment(12.0, 4.5, LoadType::Distributed).unwrap();
        assert_relative_eq!(uniform, distributed);
    }

    #[test]
    fn test_moment_rejects_nonpositive_inputs() {
        assert!(max_moment(0.0, 6.0, LoadType::Uniform).is_err());
        assert!(max_moment(-5.0, 6.0, LoadType::Uniform).is_err());
        assert!(max_moment(10.0, 0.0, LoadType::Point).is_err());
        assert!(max_moment(f64::NAN, 6.0, LoadType::Uniform).is_err());
    }

    #[test]
    fn test_shear_is_half_load_for_both_patterns() {
        assert_relative_eq!(max_shear(10.0, LoadType::Uniform).unwrap(), 5.0);
        assert_relative_eq!(max_shear(10.0, LoadType::Point).unwrap(), 5.0);
        assert!(max_shear(0.0, LoadType::Uniform).is_err());
    }

    #[test]
    fn test_uniform_deflection() {
        // w = 10*1000/6000 N/mm, L = 6000 mm, I = 27400e4 mm⁴
        let d = max_deflection(10.0, 6.0, 27400.0, LoadType::Uniform).unwrap();
        let w = 10.0 * 1000.0 / 6000.0;
        let expected = (5.0 * w * 6000.0_f64.powi(4)) / (384.0 * E_STEEL * 27400.0 * 1.0e4);
        assert_relative_eq!(d, expected);
        assert_relative_eq!(d, 0.4888, epsilon = 1.0e-4);
    }

    #[test]
    fn test_point_deflection() {
        // δ = PL³/(48EI)
        let d = max_deflection(50.0, 5.0, 24300.0, LoadType::Point).unwrap();
        let expected =
            (50.0 * 1000.0 * 5000.0_f64.powi(3)) / (48.0 * E_STEEL * 24300.0 * 1.0e4);
        assert_relative_eq!(d, expected);
    }

    #[test]
    fn test_deflection_is_nonnegative() {
        let d = max_deflection(15.0, 8.0, 8500.0, LoadType::Uniform).unwrap();
        assert!(d >= 0.0);
    }

    #[test]
    fn test_deflection_rejects_bad_second_moment() {
        assert!(max_deflection(10.0, 6.0, 0.0, LoadType::Uniform).is_err());
        assert!(max_deflection(10.0, 6.0, -100.0, LoadType::Point).is_err());
    }

    #[test]
    fn test_stress_utilization_reference_case() {
        // 45 kNm on W_el,y = 1330 cm³ of S355 with γ = 1.6:
        // σ = 45e6/1.33e6 = 33.83 N/mm², allowable = 355/1.6 = 221.875
        let u = stress_utilization(45.0, 1330.0, SteelGrade::S355, 1.6);
        assert_relative_eq!(u, 0.152_494, epsilon = 1.0e-6);
    }

    #[test]
    fn test_stress_utilization_scaling() {
        let base = stress_utilization(45.0, 1330.0, SteelGrade::S355, 1.6);

        // Linear in moment
        let double_moment = stress_utilization(90.0, 1330.0, SteelGrade::S355, 1.6);
        assert_relative_eq!(double_moment, 2.0 * base);

        // Inverse in section modulus
        let double_modulus = stress_utilization(45.0, 2660.0, SteelGrade::S355, 1.6);
        assert_relative_eq!(double_modulus, base / 2.0);

        // Halving the allowable stress doubles the ratio
        let double_factor = stress_utilization(45.0, 1330.0, SteelGrade::S355, 3.2);
        assert_relative_eq!(double_factor, 2.0 * base);
    }

    #[test]
    fn test_deflection_limit() {
        assert_relative_eq!(deflection_limit(6.0), 24.0);
        assert_relative_eq!(deflection_limit(8.0), 32.0);
    }
}
