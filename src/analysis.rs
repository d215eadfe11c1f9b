//! Analysis orchestration
//!
//! Resolves the section to analyze (named lookup or economical search),
//! runs the response calculations, applies the strength and serviceability
//! limit checks and assembles the result with its recommendation list.
//! Everything here is a single pass over one catalog snapshot; requests are
//! independent and idempotent.

use crate::calculations;
use crate::catalog::CatalogClient;
use crate::error::{AnalysisError, CalcResult};
use crate::models::{AnalysisResult, LoadScenario, SteelSection};

/// Analyzer bound to a catalog client.
///
/// Each call fetches a fresh catalog snapshot; the client absorbs remote
/// failures by serving its embedded table.
pub struct BeamAnalyzer {
    catalog: CatalogClient,
}

impl BeamAnalyzer {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Analyze a load scenario against the current catalog snapshot
    pub async fn analyze(&self, scenario: &LoadScenario) -> CalcResult<AnalysisResult> {
        let catalog = self.catalog.fetch_sections().await;
        analyze_with_sections(scenario, &catalog.sections)
    }

    /// Exact-designation lookup against the current catalog snapshot
    pub async fn find_section(&self, designation: &str) -> CalcResult<SteelSection> {
        let catalog = self.catalog.fetch_sections().await;
        find_by_designation(&catalog.sections, designation).map(|s| s.clone())
    }
}

/// Run the full analysis against an already-fetched catalog snapshot
pub fn analyze_with_sections(
    scenario: &LoadScenario,
    sections: &[SteelSection],
) -> CalcResult<AnalysisResult> {
    validate_scenario(scenario)?;

    let section = match &scenario.section_designation {
        Some(designation) => find_by_designation(sections, designation)?.clone(),
        None => find_optimal_section(scenario, sections)?.clone(),
    };
    section.validate_for_analysis()?;

    let max_moment = calculations::max_moment(
        scenario.applied_load,
        scenario.span_length,
        scenario.load_type,
    )?;
    let max_shear = calculations::max_shear(scenario.applied_load, scenario.load_type)?;
    let max_deflection = calculations::max_deflection(
        scenario.applied_load,
        scenario.span_length,
        section.second_moment_of_area_axis_y,
        scenario.load_type,
    )?;
    let stress_utilization = calculations::stress_utilization(
        max_moment,
        section.elastic_modulus_axis_y,
        scenario.material_grade,
        scenario.safety_factor,
    );

    // The formulas police their own output, but the utilization divide has
    // no failure path of its own
    for (value, quantity) in [
        (max_moment, "bending moment"),
        (max_shear, "shear force"),
        (max_deflection, "deflection"),
        (stress_utilization, "stress utilization"),
    ] {
        if !value.is_finite() {
            return Err(AnalysisError::Calculation(quantity.to_string()));
        }
    }

    let deflection_limit = calculations::deflection_limit(scenario.span_length);
    let deflection_ok = max_deflection <= deflection_limit;
    let is_adequate = stress_utilization <= 1.0 && deflection_ok;
    let safety_margin = if stress_utilization < 1.0 {
        (1.0 - stress_utilization) * 100.0
    } else {
        0.0
    };

    let recommendations = generate_recommendations(
        stress_utilization,
        deflection_ok,
        max_deflection,
        deflection_limit,
    );

    Ok(AnalysisResult {
        section,
        applied_load: scenario.applied_load,
        span_length: scenario.span_length,
        max_moment: round_to(max_moment, 2),
        max_shear: round_to(max_shear, 2),
        max_deflection: round_to(max_deflection, 2),
        stress_utilization: round_to(stress_utilization, 3),
        deflection_limit_check: deflection_ok,
        is_adequate,
        safety_margin: round_to(safety_margin, 1),
        recommendations,
    })
}

/// Find the most economical section that satisfies both limit states.
///
/// Suitable means stress utilization ≤ 1.0 and deflection within the
/// serviceability limit; among suitable candidates the lowest mass per
/// metre wins, first encountered on ties.
pub fn find_optimal_section<'a>(
    scenario: &LoadScenario,
    sections: &'a [SteelSection],
) -> CalcResult<&'a SteelSection> {
    // The moment depends only on the scenario; hoist it out of the loop
    let max_moment = calculations::max_moment(
        scenario.applied_load,
        scenario.span_length,
        scenario.load_type,
    )?;
    let deflection_limit = calculations::deflection_limit(scenario.span_length);

    let mut best: Option<&SteelSection> = None;
    for section in sections {
        // Malformed catalog entries are never suitable
        if section.validate_for_analysis().is_err() {
            continue;
        }

        let stress_utilization = calculations::stress_utilization(
            max_moment,
            section.elastic_modulus_axis_y,
            scenario.material_grade,
            scenario.safety_factor,
        );
        let max_deflection = match calculations::max_deflection(
            scenario.applied_load,
            scenario.span_length,
            section.second_moment_of_area_axis_y,
            scenario.load_type,
        ) {
            Ok(d) => d,
            Err(_) => continue,
        };

        if stress_utilization <= 1.0 && max_deflection <= deflection_limit {
            // Strict comparison keeps the first encountered on equal mass
            if best.map_or(true, |b| section.mass_per_metre < b.mass_per_metre) {
                best = Some(section);
            }
        }
    }

    best.ok_or(AnalysisError::NoSuitableSection)
}

fn find_by_designation<'a>(
    sections: &'a [SteelSection],
    designation: &str,
) -> CalcResult<&'a SteelSection> {
    sections
        .iter()
        .find(|s| s.section_designation == designation)
        .ok_or_else(|| AnalysisError::SectionNotFound(designation.to_string()))
}

fn validate_scenario(scenario: &LoadScenario) -> CalcResult<()> {
    if scenario.applied_load.is_nan() || scenario.applied_load <= 0.0 {
        return Err(AnalysisError::invalid_input(
            "applied_load",
            "must be positive",
        ));
    }
    if scenario.span_length.is_nan() || scenario.span_length <= 0.0 {
        return Err(AnalysisError::invalid_input(
            "span_length",
            "must be positive",
        ));
    }
    if scenario.safety_factor.is_nan() || scenario.safety_factor <= 0.0 {
        return Err(AnalysisError::invalid_input(
            "safety_factor",
            "must be positive",
        ));
    }
    Ok(())
}

struct RecommendationContext {
    utilization: f64,
    deflection_ok: bool,
    deflection: f64,
    deflection_limit: f64,
}

struct Rule {
    applies: fn(&RecommendationContext) -> bool,
    message: fn(&RecommendationContext) -> String,
}

/// Ordered rule table; every matching rule contributes one line.
///
/// The three utilization rules are mutually exclusive and none fires in the
/// [0.5, 0.9] band. The PASS rule restates the adequacy verdict and can
/// coexist with the LOW and HIGH advisories.
const RULES: &[Rule] = &[
    Rule {
        applies: |c| c.utilization > 1.0,
        message: |c| {
            format!(
                "CRITICAL: Stress utilization ({:.2}) exceeds limit. Consider larger beam section.",
                c.utilization
            )
        },
    },
    Rule {
        applies: |c| c.utilization > 0.9 && c.utilization <= 1.0,
        message: |c| {
            format!(
                "HIGH: Stress utilization ({:.2}) is high. Consider reviewing design.",
                c.utilization
            )
        },
    },
    Rule {
        applies: |c| c.utilization < 0.5,
        message: |c| {
            format!(
                "LOW: Stress utilization ({:.2}) is low. Consider smaller section for economy.",
                c.utilization
            )
        },
    },
    Rule {
        applies: |c| !c.deflection_ok,
        message: |c| {
            format!(
                "CRITICAL: Deflection ({:.1}mm) exceeds limit ({:.1}mm).",
                c.deflection, c.deflection_limit
            )
        },
    },
    Rule {
        applies: |c| c.deflection_ok && c.deflection > 0.8 * c.deflection_limit,
        message: |_| "HIGH: Deflection approaches serviceability limit.".to_string(),
    },
    Rule {
        applies: |c| c.utilization <= 1.0 && c.deflection_ok,
        message: |_| "PASS: Beam is adequate for the applied loading.".to_string(),
    },
];

/// Evaluate the recommendation rules in order and collect every match
pub fn generate_recommendations(
    utilization: f64,
    deflection_ok: bool,
    deflection: f64,
    deflection_limit: f64,
) -> Vec<String> {
    let ctx = RecommendationContext {
        utilization,
        deflection_ok,
        deflection,
        deflection_limit,
    };

    RULES
        .iter()
        .filter(|rule| (rule.applies)(&ctx))
        .map(|rule| (rule.message)(&ctx))
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10.0_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::embedded_sections;
    use crate::models::{LoadType, SteelGrade};

    fn scenario(load: f64, span: f64) -> LoadScenario {
        LoadScenario {
            section_designation: None,
            applied_load: load,
            span_length: span,
            load_type: LoadType::Uniform,
            safety_factor: 1.6,
            material_grade: SteelGrade::S355,
        }
    }

    #[test]
    fn test_scenario_validation() {
        let sections = embedded_sections();

        let mut bad = scenario(0.0, 6.0);
        let err = analyze_with_sections(&bad, &sections).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::invalid_input("applied_load", "must be positive")
        );

        bad = scenario(10.0, -2.0);
        let err = analyze_with_sections(&bad, &sections).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::invalid_input("span_length", "must be positive")
        );

        bad = scenario(10.0, 6.0);
        bad.safety_factor = 0.0;
        let err = analyze_with_sections(&bad, &sections).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::invalid_input("safety_factor", "must be positive")
        );
    }

    #[test]
    fn test_unknown_designation() {
        let mut s = scenario(10.0, 6.0);
        s.section_designation = Some("UB999x999x999".to_string());
        let err = analyze_with_sections(&s, &embedded_sections()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::SectionNotFound("UB999x999x999".to_string())
        );
    }

    #[test]
    fn test_overstressed_only_gets_single_critical() {
        let recs = generate_recommendations(1.05, true, 5.0, 24.0);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("CRITICAL: Stress utilization (1.05) exceeds limit."));
    }

    #[test]
    fn test_low_utilization_still_passes() {
        let recs = generate_recommendations(0.3, true, 5.0, 24.0);
        assert_eq!(
            recs,
            vec![
                "LOW: Stress utilization (0.30) is low. Consider smaller section for economy."
                    .to_string(),
                "PASS: Beam is adequate for the applied loading.".to_string(),
            ]
        );
    }

    #[test]
    fn test_middle_band_is_plain_pass() {
        let recs = generate_recommendations(0.7, true, 5.0, 24.0);
        assert_eq!(
            recs,
            vec!["PASS: Beam is adequate for the applied loading.".to_string()]
        );
    }

    #[test]
    fn test_high_utilization_band() {
        let recs = generate_recommendations(0.95, true, 5.0, 24.0);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("HIGH: Stress utilization (0.95) is high."));
        assert!(recs[1].starts_with("PASS:"));
    }

    #[test]
    fn test_deflection_failure_blocks_pass() {
        let recs = generate_recommendations(0.7, false, 30.0, 24.0);
        assert_eq!(
            recs,
            vec!["CRITICAL: Deflection (30.0mm) exceeds limit (24.0mm).".to_string()]
        );
    }

    #[test]
    fn test_deflection_near_limit_warns() {
        let recs = generate_recommendations(0.7, true, 20.0, 24.0);
        assert_eq!(
            recs,
            vec![
                "HIGH: Deflection approaches serviceability limit.".to_string(),
                "PASS: Beam is adequate for the applied loading.".to_string(),
            ]
        );
    }

    #[test]
    fn test_optimal_search_picks_lightest_adequate() {
        // 15 kN/m over 8 m needs W_el,y >= 541 cm³ and I_y >= 1489 cm⁴;
        // UB305x165x40 is the lightest section clearing both
        let s = scenario(15.0, 8.0);
        let sections = embedded_sections();
        let best = find_optimal_section(&s, &sections).unwrap();
        assert_eq!(best.section_designation, "UB305x165x40");

        let result = analyze_with_sections(&s, &sections).unwrap();
        assert_eq!(result.section.section_designation, "UB305x165x40");
        assert!(result.stress_utilization <= 1.0);
        assert!(result.deflection_limit_check);
        assert!(result.is_adequate);
    }

    #[test]
    fn test_optimal_search_never_returns_inadequate() {
        let s = scenario(25.0, 7.0);
        let sections = embedded_sections();
        let best = find_optimal_section(&s, &sections).unwrap();

        let moment = calculations::max_moment(s.applied_load, s.span_length, s.load_type).unwrap();
        let utilization = calculations::stress_utilization(
            moment,
            best.elastic_modulus_axis_y,
            s.material_grade,
            s.safety_factor,
        );
        let deflection = calculations::max_deflection(
            s.applied_load,
            s.span_length,
            best.second_moment_of_area_axis_y,
            s.load_type,
        )
        .unwrap();

        assert!(utilization <= 1.0);
        assert!(deflection <= calculations::deflection_limit(s.span_length));

        // Every lighter section must fail at least one limit
        for section in sections
            .iter()
            .filter(|c| c.mass_per_metre < best.mass_per_metre)
        {
            let u = calculations::stress_utilization(
                moment,
                section.elastic_modulus_axis_y,
                s.material_grade,
                s.safety_factor,
            );
            let d = calculations::max_deflection(
                s.applied_load,
                s.span_length,
                section.second_moment_of_area_axis_y,
                s.load_type,
            )
            .unwrap();
            assert!(u > 1.0 || d > calculations::deflection_limit(s.span_length));
        }
    }

    #[test]
    fn test_optimal_search_tie_breaks_on_first_encountered() {
        let sections = embedded_sections();
        let template = &sections[8];
        let mut first = template.clone();
        first.section_designation = "UB-TIE-A".to_string();
        let mut second = template.clone();
        second.section_designation = "UB-TIE-B".to_string();

        let s = scenario(10.0, 6.0);
        let candidates = [first, second];
        let best = find_optimal_section(&s, &candidates).unwrap();
        assert_eq!(best.section_designation, "UB-TIE-A");
    }

    #[test]
    fn test_no_suitable_section() {
        let s = scenario(500.0, 12.0);
        let err = find_optimal_section(&s, &embedded_sections()).unwrap_err();
        assert_eq!(err, AnalysisError::NoSuitableSection);

        let err = analyze_with_sections(&s, &embedded_sections()).unwrap_err();
        assert_eq!(err, AnalysisError::NoSuitableSection);

        let err = find_optimal_section(&scenario(10.0, 6.0), &[]).unwrap_err();
        assert_eq!(err, AnalysisError::NoSuitableSection);
    }

    #[test]
    fn test_malformed_candidates_are_skipped() {
        let mut sections = embedded_sections();
        // Lightest entry, corrupted as a remote payload might deliver it
        sections[0].elastic_modulus_axis_y = 0.0;

        let s = scenario(1.0, 3.0);
        let best = find_optimal_section(&s, &sections).unwrap();
        assert_eq!(best.section_designation, "UB254x146x31");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(45.0, 2), 45.0);
        assert_eq!(round_to(0.152_494, 3), 0.152);
        assert_eq!(round_to(84.75, 1), 84.8);
        assert_eq!(round_to(0.488_790, 2), 0.49);
    }
}
