//! Domain types for renovation projects, estimates, and evaluation metrics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Renovation project categories supported by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    /// Kitchen remodel
    Kitchen,
    /// Bathroom remodel
    Bathroom,
    /// Room addition or ADU
    Addition,
}

impl ProjectCategory {
    /// Base cost per square foot before adjustments, in whole dollars
    pub fn base_rate(&self) -> f64 {
        match self {
            ProjectCategory::Kitchen => 250.0,
            ProjectCategory::Bathroom => 300.0,
            ProjectCategory::Addition => 350.0,
        }
    }

    /// Typical project duration in weeks before timeline scaling
    pub fn base_weeks(&self) -> u32 {
        match self {
            ProjectCategory::Kitchen => 6,
            ProjectCategory::Bathroom => 4,
            ProjectCategory::Addition => 12,
        }
    }

    /// Get the lowercase name used in record text and filters
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Kitchen => "kitchen",
            ProjectCategory::Bathroom => "bathroom",
            ProjectCategory::Addition => "addition",
        }
    }

    /// Get all supported categories
    pub fn all() -> Vec<ProjectCategory> {
        vec![
            ProjectCategory::Kitchen,
            ProjectCategory::Bathroom,
            ProjectCategory::Addition,
        ]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<ProjectCategory> {
        match s.trim().to_lowercase().as_str() {
            "kitchen" => Some(ProjectCategory::Kitchen),
            "bathroom" => Some(ProjectCategory::Bathroom),
            "addition" | "adu" => Some(ProjectCategory::Addition),
            _ => None,
        }
    }

    /// Detect a category mentioned anywhere in free text (case-insensitive)
    pub fn detect(text: &str) -> Option<ProjectCategory> {
        let text = text.to_lowercase();
        if text.contains("kitchen") {
            Some(ProjectCategory::Kitchen)
        } else if text.contains("bathroom") {
            Some(ProjectCategory::Bathroom)
        } else if text.contains("addition") || text.contains("adu") {
            Some(ProjectCategory::Addition)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Material quality grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialGrade {
    Standard,
    Premium,
    Luxury,
}

impl MaterialGrade {
    /// Cost multiplier applied on top of the base rate
    pub fn multiplier(&self) -> f64 {
        match self {
            MaterialGrade::Standard => 1.0,
            MaterialGrade::Premium => 1.5,
            MaterialGrade::Luxury => 2.0,
        }
    }

    /// Get the lowercase name used in record text and filters
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialGrade::Standard => "standard",
            MaterialGrade::Premium => "premium",
            MaterialGrade::Luxury => "luxury",
        }
    }

    /// Get all supported grades
    pub fn all() -> Vec<MaterialGrade> {
        vec![
            MaterialGrade::Standard,
            MaterialGrade::Premium,
            MaterialGrade::Luxury,
        ]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<MaterialGrade> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(MaterialGrade::Standard),
            "premium" => Some(MaterialGrade::Premium),
            "luxury" => Some(MaterialGrade::Luxury),
            _ => None,
        }
    }

    /// Detect a grade mentioned anywhere in free text (case-insensitive)
    pub fn detect(text: &str) -> Option<MaterialGrade> {
        let text = text.to_lowercase();
        if text.contains("premium") {
            Some(MaterialGrade::Premium)
        } else if text.contains("luxury") {
            Some(MaterialGrade::Luxury)
        } else if text.contains("standard") {
            Some(MaterialGrade::Standard)
        } else {
            None
        }
    }
}

impl std::fmt::Display for MaterialGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cost breakdown across the five fixed spend categories
///
/// The amounts always sum to the total they were split from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: u64,
    pub labor: u64,
    pub permits: u64,
    pub design: u64,
    pub contingency: u64,
}

impl CostBreakdown {
    /// Split a total using the fixed proportions: materials 40%, labor 35%,
    /// permits 5%, design 10%, contingency 10%. Shares are floored and the
    /// integer-rounding remainder goes to materials, the largest category.
    pub fn split(total: u64) -> CostBreakdown {
        let materials = total * 40 / 100;
        let labor = total * 35 / 100;
        let permits = total * 5 / 100;
        let design = total * 10 / 100;
        let contingency = total * 10 / 100;
        let remainder = total - (materials + labor + permits + design + contingency);

        CostBreakdown {
            materials: materials + remainder,
            labor,
            permits,
            design,
            contingency,
        }
    }

    /// Sum of all five categories
    pub fn total(&self) -> u64 {
        self.materials + self.labor + self.permits + self.design + self.contingency
    }

    /// Category names and amounts, in display order
    pub fn entries(&self) -> [(&'static str, u64); 5] {
        [
            ("materials", self.materials),
            ("labor", self.labor),
            ("permits", self.permits),
            ("design", self.design),
            ("contingency", self.contingency),
        ]
    }
}

/// A historical renovation project record
///
/// Records are created in bulk at corpus-load time and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    /// Human-readable summary used as the retrieval matching surface
    pub text: String,
    pub category: ProjectCategory,
    pub square_feet: u32,
    pub material_grade: MaterialGrade,
    /// 5-digit postal code; the first digit maps to a region bucket
    pub location_code: String,
    pub total_cost: u64,
    pub cost_breakdown: CostBreakdown,
    pub timeline_weeks: u32,
    pub recorded_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Realized cost per square foot for this project
    pub fn rate_per_square_foot(&self) -> f64 {
        self.total_cost as f64 / self.square_feet as f64
    }
}

/// A cost estimate produced for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Point estimate in whole dollars
    pub total: u64,
    /// (min, max), ±10% around the point estimate
    pub total_range: (u64, u64),
    pub per_square_foot: f64,
    /// Sums exactly to `total`
    pub cost_breakdown: CostBreakdown,
    pub timeline_weeks: u32,
    /// In [0, 1]
    pub confidence: f64,
    /// Ids of the comparable records used as retrieval evidence
    pub comparable_ids: Vec<String>,
    /// Narrative notes added by enhancement; empty for base estimates
    pub insights: Vec<String>,
}

impl CostEstimate {
    /// Check the structural invariants every estimate must satisfy.
    /// A violation is an internal defect, not a user-facing condition.
    pub fn invariants_hold(&self) -> bool {
        let (min, max) = self.total_range;
        min <= self.total
            && self.total <= max
            && self.cost_breakdown.total() == self.total
            && (0.0..=1.0).contains(&self.confidence)
    }
}

/// The four retrieval-augmented generation quality metrics, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RagMetrics {
    pub faithfulness: f64,
    pub answer_relevancy: f64,
    pub context_precision: f64,
    pub context_recall: f64,
}

impl RagMetrics {
    /// Pass thresholds for each metric
    pub const THRESHOLDS: RagMetrics = RagMetrics {
        faithfulness: 0.80,
        answer_relevancy: 0.75,
        context_precision: 0.70,
        context_recall: 0.70,
    };

    /// Metric names and values, in canonical order
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("faithfulness", self.faithfulness),
            ("answer_relevancy", self.answer_relevancy),
            ("context_precision", self.context_precision),
            ("context_recall", self.context_recall),
        ]
    }

    /// Clamp every metric into [0, 1]
    pub fn clamped(self) -> RagMetrics {
        RagMetrics {
            faithfulness: self.faithfulness.clamp(0.0, 1.0),
            answer_relevancy: self.answer_relevancy.clamp(0.0, 1.0),
            context_precision: self.context_precision.clamp(0.0, 1.0),
            context_recall: self.context_recall.clamp(0.0, 1.0),
        }
    }

    fn passes(&self) -> MetricFlags {
        MetricFlags {
            faithfulness: self.faithfulness >= Self::THRESHOLDS.faithfulness,
            answer_relevancy: self.answer_relevancy >= Self::THRESHOLDS.answer_relevancy,
            context_precision: self.context_precision >= Self::THRESHOLDS.context_precision,
            context_recall: self.context_recall >= Self::THRESHOLDS.context_recall,
        }
    }
}

/// Per-metric pass/fail flags against the fixed thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFlags {
    pub faithfulness: bool,
    pub answer_relevancy: bool,
    pub context_precision: bool,
    pub context_recall: bool,
}

impl MetricFlags {
    pub fn all(&self) -> bool {
        self.faithfulness && self.answer_relevancy && self.context_precision && self.context_recall
    }
}

/// Quality score for a single question/contexts/answer triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationScore {
    pub metrics: RagMetrics,
    pub passed: MetricFlags,
}

impl EvaluationScore {
    /// Build a score from raw metrics, clamping into [0, 1] first
    pub fn new(metrics: RagMetrics) -> EvaluationScore {
        let metrics = metrics.clamped();
        EvaluationScore {
            passed: metrics.passes(),
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            ProjectCategory::from_str("kitchen"),
            Some(ProjectCategory::Kitchen)
        );
        assert_eq!(
            ProjectCategory::from_str("Bathroom"),
            Some(ProjectCategory::Bathroom)
        );
        assert_eq!(
            ProjectCategory::from_str("ADU"),
            Some(ProjectCategory::Addition)
        );
        assert_eq!(ProjectCategory::from_str("garage"), None);
    }

    #[test]
    fn test_category_detect() {
        assert_eq!(
            ProjectCategory::detect("Kitchen renovation with premium materials"),
            Some(ProjectCategory::Kitchen)
        );
        assert_eq!(
            ProjectCategory::detect("backyard ADU build-out"),
            Some(ProjectCategory::Addition)
        );
        assert_eq!(ProjectCategory::detect("garage conversion"), None);
    }

    #[test]
    fn test_grade_detect_prefers_explicit_mention() {
        assert_eq!(
            MaterialGrade::detect("premium bathroom remodel"),
            Some(MaterialGrade::Premium)
        );
        assert_eq!(
            MaterialGrade::detect("LUXURY addition"),
            Some(MaterialGrade::Luxury)
        );
        assert_eq!(MaterialGrade::detect("simple refresh"), None);
    }

    #[test]
    fn test_grade_multipliers_ordered() {
        assert!(MaterialGrade::Luxury.multiplier() > MaterialGrade::Premium.multiplier());
        assert!(MaterialGrade::Premium.multiplier() > MaterialGrade::Standard.multiplier());
    }

    #[test]
    fn test_breakdown_split_sums_exactly() {
        for total in [0u64, 1, 7, 99, 1_001, 90_000, 123_457, 9_999_999] {
            let breakdown = CostBreakdown::split(total);
            assert_eq!(breakdown.total(), total, "split of {} does not sum", total);
        }
    }

    #[test]
    fn test_breakdown_remainder_goes_to_materials() {
        // 101: floors are 40 + 35 + 5 + 10 + 10 = 100, remainder 1
        let breakdown = CostBreakdown::split(101);
        assert_eq!(breakdown.materials, 41);
        assert_eq!(breakdown.labor, 35);
        assert_eq!(breakdown.total(), 101);
    }

    #[test]
    fn test_metric_flags_against_thresholds() {
        let score = EvaluationScore::new(RagMetrics {
            faithfulness: 0.86,
            answer_relevancy: 0.74,
            context_precision: 0.70,
            context_recall: 0.69,
        });
        assert!(score.passed.faithfulness);
        assert!(!score.passed.answer_relevancy);
        assert!(score.passed.context_precision);
        assert!(!score.passed.context_recall);
        assert!(!score.passed.all());
    }

    #[test]
    fn test_score_clamps_metrics() {
        let score = EvaluationScore::new(RagMetrics {
            faithfulness: 1.03,
            answer_relevancy: -0.2,
            context_precision: 0.5,
            context_recall: 0.5,
        });
        assert_eq!(score.metrics.faithfulness, 1.0);
        assert_eq!(score.metrics.answer_relevancy, 0.0);
    }
}
