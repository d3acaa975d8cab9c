//! Estimate request validation
//!
//! User input arrives as a loosely-typed [`EstimateInput`] and is validated
//! exactly once, at this boundary, into an [`EstimateRequest`] the rest of
//! the system treats as trusted. Validation never rejects: invalid or
//! missing fields are replaced by documented defaults so the estimator
//! always produces an answer.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{MaterialGrade, ProjectCategory};

/// Raw estimate input as collected from the user, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub category: Option<String>,
    pub square_feet: Option<f64>,
    pub material_grade: Option<String>,
    pub location_code: Option<String>,
    pub timeline_months: Option<i64>,
}

/// A validated estimate request
///
/// Every field is guaranteed within its domain. Defaults applied during
/// validation: kitchen, 200 sqft, standard materials, location "00000",
/// 2 months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub category: ProjectCategory,
    /// In 1..=10,000
    pub square_feet: u32,
    pub material_grade: MaterialGrade,
    /// Exactly five ASCII digits
    pub location_code: String,
    /// In 1..=12
    pub timeline_months: u8,
}

impl Default for EstimateRequest {
    fn default() -> Self {
        Self {
            category: ProjectCategory::Kitchen,
            square_feet: Self::DEFAULT_SQUARE_FEET,
            material_grade: MaterialGrade::Standard,
            location_code: Self::DEFAULT_LOCATION_CODE.to_string(),
            timeline_months: Self::DEFAULT_TIMELINE_MONTHS,
        }
    }
}

impl EstimateRequest {
    pub const DEFAULT_SQUARE_FEET: u32 = 200;
    pub const MAX_SQUARE_FEET: u32 = 10_000;
    pub const DEFAULT_LOCATION_CODE: &'static str = "00000";
    pub const DEFAULT_TIMELINE_MONTHS: u8 = 2;
    pub const MAX_TIMELINE_MONTHS: u8 = 12;

    /// Validate raw input field by field. Each field is handled
    /// independently, so one bad value never disturbs the others.
    pub fn from_input(input: &EstimateInput) -> EstimateRequest {
        let category = match input.category.as_deref() {
            None => ProjectCategory::Kitchen,
            Some(raw) => ProjectCategory::from_str(raw).unwrap_or_else(|| {
                warn!(value = raw, "unknown project category, defaulting to kitchen");
                ProjectCategory::Kitchen
            }),
        };

        let square_feet = match input.square_feet {
            None => Self::DEFAULT_SQUARE_FEET,
            Some(v) if v.is_finite() && v >= 1.0 => {
                let rounded = v.round() as u32;
                if rounded > Self::MAX_SQUARE_FEET {
                    warn!(
                        value = v,
                        "square footage above {} clamped", Self::MAX_SQUARE_FEET
                    );
                    Self::MAX_SQUARE_FEET
                } else {
                    rounded
                }
            }
            Some(v) => {
                warn!(value = v, "square footage out of domain, defaulting to 200");
                Self::DEFAULT_SQUARE_FEET
            }
        };

        let material_grade = match input.material_grade.as_deref() {
            None => MaterialGrade::Standard,
            Some(raw) => MaterialGrade::from_str(raw).unwrap_or_else(|| {
                warn!(value = raw, "unknown material grade, defaulting to standard");
                MaterialGrade::Standard
            }),
        };

        let location_code = match input.location_code.as_deref().map(str::trim) {
            Some(raw) if raw.len() == 5 && raw.chars().all(|c| c.is_ascii_digit()) => {
                raw.to_string()
            }
            Some(raw) => {
                warn!(value = raw, "invalid postal code, defaulting to 00000");
                Self::DEFAULT_LOCATION_CODE.to_string()
            }
            None => Self::DEFAULT_LOCATION_CODE.to_string(),
        };

        let timeline_months = match input.timeline_months {
            None => Self::DEFAULT_TIMELINE_MONTHS,
            Some(m) if (1..=i64::from(Self::MAX_TIMELINE_MONTHS)).contains(&m) => m as u8,
            Some(m) => {
                let clamped = m.clamp(1, i64::from(Self::MAX_TIMELINE_MONTHS)) as u8;
                warn!(value = m, clamped, "timeline months out of range, clamped");
                clamped
            }
        };

        EstimateRequest {
            category,
            square_feet,
            material_grade,
            location_code,
            timeline_months,
        }
    }

    /// Build the retrieval query text in the same vocabulary as record
    /// summaries, so keyword matching lines up with the corpus.
    pub fn query_text(&self) -> String {
        format!(
            "{} renovation with {} square feet using {} materials in {}",
            self.category, self.square_feet, self.material_grade, self.location_code
        )
    }

    /// First digit of the location code, mapping to a region bucket
    pub fn region_digit(&self) -> usize {
        self.location_code
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        category: &str,
        square_feet: f64,
        material: &str,
        location: &str,
        months: i64,
    ) -> EstimateInput {
        EstimateInput {
            category: Some(category.to_string()),
            square_feet: Some(square_feet),
            material_grade: Some(material.to_string()),
            location_code: Some(location.to_string()),
            timeline_months: Some(months),
        }
    }

    #[test]
    fn test_empty_input_takes_all_defaults() {
        let request = EstimateRequest::from_input(&EstimateInput::default());
        assert_eq!(request, EstimateRequest::default());
    }

    #[test]
    fn test_valid_input_passes_through() {
        let request =
            EstimateRequest::from_input(&input("bathroom", 120.0, "luxury", "10001", 4));
        assert_eq!(request.category, ProjectCategory::Bathroom);
        assert_eq!(request.square_feet, 120);
        assert_eq!(request.material_grade, MaterialGrade::Luxury);
        assert_eq!(request.location_code, "10001");
        assert_eq!(request.timeline_months, 4);
    }

    #[test]
    fn test_out_of_domain_fields_are_replaced_independently() {
        // Every field is bad; every field gets its own default.
        let request = EstimateRequest::from_input(&input("foo", -5.0, "foo", "abc", 99));
        assert_eq!(request.category, ProjectCategory::Kitchen);
        assert_eq!(request.square_feet, 200);
        assert_eq!(request.material_grade, MaterialGrade::Standard);
        assert_eq!(request.location_code, "00000");
        assert_eq!(request.timeline_months, 12);
    }

    #[test]
    fn test_one_bad_field_leaves_the_rest_alone() {
        let request = EstimateRequest::from_input(&input("addition", 400.0, "foo", "60601", 6));
        assert_eq!(request.category, ProjectCategory::Addition);
        assert_eq!(request.square_feet, 400);
        assert_eq!(request.material_grade, MaterialGrade::Standard);
        assert_eq!(request.location_code, "60601");
        assert_eq!(request.timeline_months, 6);
    }

    #[test]
    fn test_square_feet_clamps_at_upper_bound() {
        let request = EstimateRequest::from_input(&input("kitchen", 50_000.0, "standard", "90210", 2));
        assert_eq!(request.square_feet, 10_000);
    }

    #[test]
    fn test_square_feet_rejects_nan_and_negatives() {
        for bad in [f64::NAN, f64::INFINITY, -5.0, 0.0, 0.4] {
            let request = EstimateRequest::from_input(&input("kitchen", bad, "standard", "90210", 2));
            assert_eq!(request.square_feet, 200, "square_feet {} not defaulted", bad);
        }
    }

    #[test]
    fn test_timeline_clamps_both_ends() {
        let low = EstimateRequest::from_input(&input("kitchen", 200.0, "standard", "90210", -3));
        assert_eq!(low.timeline_months, 1);
        let high = EstimateRequest::from_input(&input("kitchen", 200.0, "standard", "90210", 40));
        assert_eq!(high.timeline_months, 12);
    }

    #[test]
    fn test_location_code_must_be_five_digits() {
        for bad in ["abc", "1234", "123456", "12a45", ""] {
            let request = EstimateRequest::from_input(&input("kitchen", 200.0, "standard", bad, 2));
            assert_eq!(request.location_code, "00000", "{:?} accepted", bad);
        }
    }

    #[test]
    fn test_region_digit() {
        let request = EstimateRequest::from_input(&input("kitchen", 200.0, "standard", "90210", 2));
        assert_eq!(request.region_digit(), 9);
        assert_eq!(EstimateRequest::default().region_digit(), 0);
    }

    #[test]
    fn test_query_text_contains_category_and_grade() {
        let request = EstimateRequest::from_input(&input("bathroom", 80.0, "premium", "10001", 2));
        let query = request.query_text();
        assert!(query.contains("bathroom"));
        assert!(query.contains("premium"));
        assert!(query.contains("10001"));
    }
}
