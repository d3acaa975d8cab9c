//! Deterministic multi-factor cost model

use rce_core::{CostBreakdown, CostEstimate, EstimateRequest, ProjectRecord};

/// Region cost multipliers keyed by the leading digit of the postal code.
/// Buckets span 0.80–1.20: digit 9 (West Coast) and digit 1 (Northeast)
/// carry the highest rates.
const REGION_MULTIPLIERS: [f64; 10] = [
    1.00, 1.15, 1.05, 0.90, 0.85, 0.80, 0.90, 0.85, 0.95, 1.20,
];

/// Confidence reported for estimates that have not been enhanced
pub const BASELINE_CONFIDENCE: f64 = 0.92;

/// The cost formula: base rate, multiplicative adjustments, ranging,
/// breakdown, and timeline. Pure and infallible over validated requests.
pub struct CostModel;

impl CostModel {
    /// Produce an estimate from a validated request and the comparable
    /// records retrieved for it. An empty comparable slice falls back to
    /// the static per-category rate table.
    pub fn estimate(request: &EstimateRequest, comparables: &[ProjectRecord]) -> CostEstimate {
        let rate = Self::base_rate(request, comparables)
            * request.material_grade.multiplier()
            * Self::region_multiplier(request)
            * Self::timeline_rate_multiplier(request.timeline_months);

        let total_f = rate * f64::from(request.square_feet);
        let total = total_f.round() as u64;
        // ±10% band, floored/ceilinged. Integer math keeps the bounds exact
        // where float products like 90000 × 1.1 drift past the true value.
        let total_range = (total * 9 / 10, (total * 11).div_ceil(10));

        let estimate = CostEstimate {
            total,
            total_range,
            per_square_foot: total as f64 / f64::from(request.square_feet),
            cost_breakdown: CostBreakdown::split(total),
            timeline_weeks: Self::timeline_weeks(request),
            confidence: BASELINE_CONFIDENCE,
            comparable_ids: comparables.iter().map(|r| r.id.clone()).collect(),
            insights: Vec::new(),
        };
        debug_assert!(
            estimate.invariants_hold(),
            "cost model produced an invalid estimate: {:?}",
            estimate
        );
        estimate
    }

    /// Mean realized rate across comparables; retrieval evidence overrides
    /// the static table whenever any records were found.
    fn base_rate(request: &EstimateRequest, comparables: &[ProjectRecord]) -> f64 {
        if comparables.is_empty() {
            request.category.base_rate()
        } else {
            let sum: f64 = comparables
                .iter()
                .map(ProjectRecord::rate_per_square_foot)
                .sum();
            sum / comparables.len() as f64
        }
    }

    fn region_multiplier(request: &EstimateRequest) -> f64 {
        REGION_MULTIPLIERS[request.region_digit()]
    }

    /// A 1-month rush raises the rate; a relaxed 3+ month schedule lowers it
    fn timeline_rate_multiplier(months: u8) -> f64 {
        if months == 1 {
            1.20
        } else if months >= 3 {
            0.95
        } else {
            1.00
        }
    }

    /// Category base weeks scaled by the requested pace, floored, never
    /// below 2 weeks
    fn timeline_weeks(request: &EstimateRequest) -> u32 {
        let scale = if request.timeline_months == 1 {
            0.8
        } else if request.timeline_months >= 3 {
            1.2
        } else {
            1.0
        };
        let weeks = (f64::from(request.category.base_weeks()) * scale).floor() as u32;
        weeks.max(2)
    }
}
