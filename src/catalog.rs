//! Section catalog provider
//!
//! Sections come from the remote catalog API when it is reachable and from
//! an embedded table of UK Universal Beam sections otherwise. The fallback
//! is absorbed here - callers always get a catalog, tagged with the source
//! that served it so the health endpoint can report degraded operation.
//! Nothing is cached or retried; every call is a fresh fetch.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::SteelSection;

/// Bound on the remote round trip before falling back
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Which backing source served a catalog snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Remote,
    Embedded,
}

/// A catalog snapshot together with the source that produced it
#[derive(Debug, Clone)]
pub struct Catalog {
    pub sections: Vec<SteelSection>,
    pub source: CatalogSource,
}

/// Client for the remote section catalog API
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid catalog payload: {0}")]
    InvalidPayload(String),
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Fetch all known sections.
    ///
    /// Any transport, parse or validation failure on the remote source is
    /// logged and answered with the embedded table instead of an error.
    pub async fn fetch_sections(&self) -> Catalog {
        match self.fetch_remote().await {
            Ok(sections) => {
                tracing::debug!("catalog served remotely, {} sections", sections.len());
                Catalog {
                    sections,
                    source: CatalogSource::Remote,
                }
            }
            Err(e) => {
                tracing::warn!("falling back to embedded section catalog: {}", e);
                Catalog {
                    sections: embedded_sections(),
                    source: CatalogSource::Embedded,
                }
            }
        }
    }

    async fn fetch_remote(&self) -> Result<Vec<SteelSection>, FetchError> {
        let url = format!("{}/sections", self.base_url);
        let sections: Vec<SteelSection> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        validate_payload(&sections)?;
        Ok(sections)
    }
}

fn validate_payload(sections: &[SteelSection]) -> Result<(), FetchError> {
    if sections.is_empty() {
        return Err(FetchError::InvalidPayload("no sections".to_string()));
    }

    let mut seen = HashSet::new();
    for section in sections {
        let designation = section.section_designation.trim();
        if designation.is_empty() {
            return Err(FetchError::InvalidPayload(
                "section with empty designation".to_string(),
            ));
        }
        if !seen.insert(designation) {
            return Err(FetchError::InvalidPayload(format!(
                "duplicate designation '{}'",
                designation
            )));
        }
    }
    Ok(())
}

/// Embedded fallback table: UK Universal Beams, UB203 through UB610.
///
/// Values per the SCI steel section tables. Enough of a spread that the
/// economical-section search stays meaningful when the remote catalog is
/// down.
pub fn embedded_sections() -> Vec<SteelSection> {
    vec![
        SteelSection {
            section_designation: "UB203x133x25".to_string(),
            mass_per_metre: 25.1,
            depth_of_section: 203.2,
            width_of_section: 133.2,
            thickness_web: 5.7,
            thickness_flange: 7.8,
            second_moment_of_area_axis_y: 2340.0,
            second_moment_of_area_axis_z: 308.0,
            radius_of_gyration_axis_y: 8.56,
            radius_of_gyration_axis_z: 3.10,
            elastic_modulus_axis_y: 230.0,
            elastic_modulus_axis_z: 46.2,
            plastic_modulus_axis_y: 258.0,
            plastic_modulus_axis_z: 70.9,
            buckling_parameter: 0.877,
            torsional_index: 25.6,
            warping_constant: 0.0294,
            torsional_constant: 5.96,
            area_of_section: 32.0,
        },
        SteelSection {
            section_designation: "UB254x146x31".to_string(),
            mass_per_metre: 31.1,
            depth_of_section: 251.4,
            width_of_section: 146.1,
            thickness_web: 6.0,
            thickness_flange: 8.6,
            second_moment_of_area_axis_y: 4410.0,
            second_moment_of_area_axis_z: 448.0,
            radius_of_gyration_axis_y: 10.5,
            radius_of_gyration_axis_z: 3.36,
            elastic_modulus_axis_y: 351.0,
            elastic_modulus_axis_z: 61.3,
            plastic_modulus_axis_y: 393.0,
            plastic_modulus_axis_z: 94.1,
            buckling_parameter: 0.880,
            torsional_index: 29.6,
            warping_constant: 0.0660,
            torsional_constant: 8.55,
            area_of_section: 39.7,
        },
        SteelSection {
            section_designation: "UB305x165x40".to_string(),
            mass_per_metre: 40.3,
            depth_of_section: 303.4,
            width_of_section: 165.0,
            thickness_web: 6.0,
            thickness_flange: 10.2,
            second_moment_of_area_axis_y: 8500.0,
            second_moment_of_area_axis_z: 764.0,
            radius_of_gyration_axis_y: 12.9,
            radius_of_gyration_axis_z: 3.86,
            elastic_modulus_axis_y: 560.0,
            elastic_modulus_axis_z: 92.6,
            plastic_modulus_axis_y: 623.0,
            plastic_modulus_axis_z: 142.0,
            buckling_parameter: 0.889,
            torsional_index: 31.0,
            warping_constant: 0.164,
            torsional_constant: 14.7,
            area_of_section: 51.3,
        },
        SteelSection {
            section_designation: "UB356x171x51".to_string(),
            mass_per_metre: 51.0,
            depth_of_section: 355.0,
            width_of_section: 171.5,
            thickness_web: 7.4,
            thickness_flange: 11.5,
            second_moment_of_area_axis_y: 14100.0,
            second_moment_of_area_axis_z: 968.0,
            radius_of_gyration_axis_y: 14.8,
            radius_of_gyration_axis_z: 3.86,
            elastic_modulus_axis_y: 796.0,
            elastic_modulus_axis_z: 113.0,
            plastic_modulus_axis_y: 896.0,
            plastic_modulus_axis_z: 174.0,
            buckling_parameter: 0.881,
            torsional_index: 28.8,
            warping_constant: 0.286,
            torsional_constant: 23.8,
            area_of_section: 64.9,
        },
        SteelSection {
            section_designation: "UB406x178x67".to_string(),
            mass_per_metre: 67.1,
            depth_of_section: 409.4,
            width_of_section: 178.8,
            thickness_web: 8.8,
            thickness_flange: 14.3,
            second_moment_of_area_axis_y: 24300.0,
            second_moment_of_area_axis_z: 1365.0,
            radius_of_gyration_axis_y: 16.9,
            radius_of_gyration_axis_z: 3.99,
            elastic_modulus_axis_y: 1190.0,
            elastic_modulus_axis_z: 153.0,
            plastic_modulus_axis_y: 1350.0,
            plastic_modulus_axis_z: 237.0,
            buckling_parameter: 0.880,
            torsional_index: 24.3,
            warping_constant: 0.533,
            torsional_constant: 46.1,
            area_of_section: 85.5,
        },
        SteelSection {
            section_designation: "UB406x178x74".to_string(),
            mass_per_metre: 74.2,
            depth_of_section: 412.8,
            width_of_section: 179.5,
            thickness_web: 9.5,
            thickness_flange: 16.0,
            second_moment_of_area_axis_y: 27400.0,
            second_moment_of_area_axis_z: 1545.0,
            radius_of_gyration_axis_y: 17.0,
            radius_of_gyration_axis_z: 4.04,
            elastic_modulus_axis_y: 1330.0,
            elastic_modulus_axis_z: 172.0,
            plastic_modulus_axis_y: 1501.0,
            plastic_modulus_axis_z: 267.0,
            buckling_parameter: 0.882,
            torsional_index: 22.0,
            warping_constant: 0.608,
            torsional_constant: 62.8,
            area_of_section: 94.5,
        },
        SteelSection {
            section_designation: "UB457x191x82".to_string(),
            mass_per_metre: 82.0,
            depth_of_section: 460.0,
            width_of_section: 191.3,
            thickness_web: 9.9,
            thickness_flange: 16.0,
            second_moment_of_area_axis_y: 37100.0,
            second_moment_of_area_axis_z: 1871.0,
            radius_of_gyration_axis_y: 18.8,
            radius_of_gyration_axis_z: 4.23,
            elastic_modulus_axis_y: 1610.0,
            elastic_modulus_axis_z: 196.0,
            plastic_modulus_axis_y: 1830.0,
            plastic_modulus_axis_z: 304.0,
            buckling_parameter: 0.879,
            torsional_index: 25.7,
            warping_constant: 0.922,
            torsional_constant: 69.2,
            area_of_section: 104.0,
        },
        SteelSection {
            section_designation: "UB533x210x92".to_string(),
            mass_per_metre: 92.1,
            depth_of_section: 533.1,
            width_of_section: 209.3,
            thickness_web: 10.1,
            thickness_flange: 15.6,
            second_moment_of_area_axis_y: 55200.0,
            second_moment_of_area_axis_z: 2389.0,
            radius_of_gyration_axis_y: 21.7,
            radius_of_gyration_axis_z: 4.51,
            elastic_modulus_axis_y: 2070.0,
            elastic_modulus_axis_z: 228.0,
            plastic_modulus_axis_y: 2360.0,
            plastic_modulus_axis_z: 356.0,
            buckling_parameter: 0.872,
            torsional_index: 36.5,
            warping_constant: 1.60,
            torsional_constant: 75.7,
            area_of_section: 117.0,
        },
        SteelSection {
            section_designation: "UB610x229x113".to_string(),
            mass_per_metre: 113.0,
            depth_of_section: 607.6,
            width_of_section: 228.2,
            thickness_web: 11.1,
            thickness_flange: 17.3,
            second_moment_of_area_axis_y: 87300.0,
            second_moment_of_area_axis_z: 3434.0,
            radius_of_gyration_axis_y: 24.6,
            radius_of_gyration_axis_z: 4.88,
            elastic_modulus_axis_y: 2870.0,
            elastic_modulus_axis_z: 301.0,
            plastic_modulus_axis_y: 3280.0,
            plastic_modulus_axis_z: 469.0,
            buckling_parameter: 0.870,
            torsional_index: 38.0,
            warping_constant: 2.99,
            torsional_constant: 111.0,
            area_of_section: 144.0,
        },
    ]
}
