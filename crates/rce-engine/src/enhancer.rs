//! Best-effort estimate refinement via an external LLM
//!
//! Fail-open by contract: every failure path returns
//! [`Enhancement::Unavailable`] and the caller keeps the base estimate.
//! Nothing in this module can raise into the cost model or its callers.

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use rce_core::{CompletionConfig, CostEstimate, EstimateRequest, LlmProvider, Prompt};

/// Largest confidence delta the external call is allowed to apply
const CONFIDENCE_DELTA_BOUND: f64 = 0.1;

/// Outcome of a refinement attempt
#[derive(Debug, Clone)]
pub enum Enhancement {
    /// The refined estimate, with range ordering and confidence bounds
    /// re-validated
    Refined(CostEstimate),
    /// The external call could not be used; callers fall back to the base
    /// estimate explicitly
    Unavailable { reason: String },
}

/// Structured payload expected inside the model's response text
#[derive(Debug, Deserialize)]
struct RefinementResponse {
    adjusted_range: (f64, f64),
    #[serde(default)]
    insights: Vec<String>,
    #[serde(default)]
    confidence_adjustment: f64,
}

/// Refines base estimates through one external language-model call
pub struct EstimationEnhancer<L: LlmProvider> {
    llm: L,
}

impl<L: LlmProvider> EstimationEnhancer<L> {
    pub fn new(llm: L) -> EstimationEnhancer<L> {
        EstimationEnhancer { llm }
    }

    /// Refine a base estimate. Never fails; idempotent with respect to its
    /// own output shape.
    pub async fn refine(
        &self,
        estimate: &CostEstimate,
        request: &EstimateRequest,
    ) -> Enhancement {
        let prompt = Self::build_prompt(estimate, request);
        let config = CompletionConfig {
            model_id: self.llm.model_id().to_string(),
            ..Default::default()
        };

        let completion = match self.llm.complete(&prompt, &config).await {
            Ok(completion) => completion,
            Err(e) => {
                return Enhancement::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        match parse_refinement(&completion.text) {
            Some(response) => Enhancement::Refined(Self::merge(estimate, response)),
            None => {
                warn!("refinement response contained no usable JSON object");
                Enhancement::Unavailable {
                    reason: "malformed refinement response".to_string(),
                }
            }
        }
    }

    /// Instructions live in the system section; only structured request
    /// fields and the base estimate are interpolated into the user section.
    fn build_prompt(estimate: &CostEstimate, request: &EstimateRequest) -> Prompt {
        let system = "You are a renovation cost analyst. Review the base estimate for the \
                      project described in the user message and respond with a single JSON \
                      object containing: \"adjusted_range\" (two numbers, low and high, in \
                      dollars), \"insights\" (a list of short strings), and \
                      \"confidence_adjustment\" (a number between -0.1 and 0.1). \
                      Respond with the JSON object only.";

        let (range_min, range_max) = estimate.total_range;
        let user = format!(
            "Project:\n\
             - category: {}\n\
             - square feet: {}\n\
             - material grade: {}\n\
             - location code: {}\n\
             - timeline months: {}\n\
             \n\
             Base estimate:\n\
             - total: {}\n\
             - range: {} to {}\n\
             - timeline weeks: {}",
            request.category,
            request.square_feet,
            request.material_grade,
            request.location_code,
            request.timeline_months,
            estimate.total,
            range_min,
            range_max,
            estimate.timeline_weeks,
        );

        Prompt::new(system, user)
    }

    /// Merge the parsed response into the base estimate. The range is
    /// reordered if inverted, floored at zero, and widened if necessary so
    /// it still brackets the model's point estimate; the confidence delta
    /// is clamped and the result kept in [0, 1]. The breakdown and
    /// timeline stay model-owned.
    fn merge(base: &CostEstimate, response: RefinementResponse) -> CostEstimate {
        let (mut low, mut high) = response.adjusted_range;
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }
        let low = (low.max(0.0).floor() as u64).min(base.total);
        let high = (high.max(0.0).ceil() as u64).max(base.total);

        let delta = response
            .confidence_adjustment
            .clamp(-CONFIDENCE_DELTA_BOUND, CONFIDENCE_DELTA_BOUND);

        let mut refined = base.clone();
        refined.total_range = (low, high);
        refined.confidence = (base.confidence + delta).clamp(0.0, 1.0);
        refined.insights = response.insights;
        refined
    }
}

/// Pull the first JSON object out of free text and parse it
fn parse_refinement(text: &str) -> Option<RefinementResponse> {
    let json = extract_json_object(text)?;
    match serde_json::from_str(json) {
        Ok(response) => Some(response),
        Err(e) => {
            debug!(error = %e, "refinement JSON failed to deserialize");
            None
        }
    }
}

/// Find the outermost `{ ... }` span in free text, if any
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let pattern = Regex::new(r"(?s)\{.*\}").ok()?;
    Some(pattern.find(text)?.as_str())
}
