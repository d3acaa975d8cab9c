//! Estimation pipeline: validate, retrieve, model, optionally enhance

use tracing::{info, warn};

use rce_core::{
    CostEstimate, DEFAULT_TOP_K, EstimateInput, EstimateRequest, Error, LlmProvider,
    ProjectRecord, RecordFilter, Result, Retriever,
};

use crate::{CostModel, Enhancement, EstimationEnhancer};

/// How enhancement concluded for an estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancementStatus {
    /// The external refinement was merged in
    Applied,
    /// Refinement was attempted and failed; the base estimate stands
    Unavailable(String),
    /// No enhancer was configured
    Disabled,
}

/// Everything produced for a single estimation request
#[derive(Debug, Clone)]
pub struct EstimateOutcome {
    pub request: EstimateRequest,
    pub estimate: CostEstimate,
    pub comparables: Vec<ProjectRecord>,
    pub enhancement: EnhancementStatus,
}

/// Orchestrates the estimation pipeline over a retriever and an optional
/// enhancer
pub struct Estimator<R: Retriever, L: LlmProvider> {
    retriever: R,
    enhancer: Option<EstimationEnhancer<L>>,
}

impl<R: Retriever, L: LlmProvider> Estimator<R, L> {
    /// Create an estimator without enhancement
    pub fn new(retriever: R) -> Estimator<R, L> {
        Estimator {
            retriever,
            enhancer: None,
        }
    }

    /// Create an estimator with best-effort enhancement
    pub fn with_enhancer(retriever: R, enhancer: EstimationEnhancer<L>) -> Estimator<R, L> {
        Estimator {
            retriever,
            enhancer: Some(enhancer),
        }
    }

    /// Check if enhancement is configured
    pub fn has_enhancer(&self) -> bool {
        self.enhancer.is_some()
    }

    /// Run the full pipeline for one raw input.
    ///
    /// The only error this surfaces is corpus unavailability; input
    /// problems become defaults, retrieval misses fall back to the static
    /// rate table, and enhancement failures keep the base estimate.
    pub async fn estimate(&self, input: &EstimateInput) -> Result<EstimateOutcome> {
        if !self.retriever.is_ready() {
            return Err(Error::CorpusUnavailable(
                "no historical project records are loaded".to_string(),
            ));
        }

        let request = EstimateRequest::from_input(input);
        let filter = RecordFilter::by_category(request.category);
        let comparables = self
            .retriever
            .search(&request.query_text(), &filter, DEFAULT_TOP_K)
            .await?;

        let base = CostModel::estimate(&request, &comparables);

        let (estimate, enhancement) = match &self.enhancer {
            None => (base, EnhancementStatus::Disabled),
            Some(enhancer) => match enhancer.refine(&base, &request).await {
                Enhancement::Refined(refined) => (refined, EnhancementStatus::Applied),
                Enhancement::Unavailable { reason } => {
                    warn!(reason = %reason, "enhancement unavailable, keeping base estimate");
                    (base, EnhancementStatus::Unavailable(reason))
                }
            },
        };

        info!(
            category = %request.category,
            total = estimate.total,
            comparables = comparables.len(),
            "estimate produced"
        );

        Ok(EstimateOutcome {
            request,
            estimate,
            comparables,
            enhancement,
        })
    }
}
