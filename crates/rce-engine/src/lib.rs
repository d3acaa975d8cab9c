//! Retrieval-augmented cost estimation engine
//!
//! This crate provides the corpus, retriever implementations, the
//! deterministic cost model, best-effort LLM enhancement, and the
//! evaluation layer.

pub mod corpus;
pub mod cost_model;
pub mod enhancer;
pub mod estimator;
pub mod evaluation;
pub mod remote;
pub mod retriever;

pub use corpus::{ProjectCorpus, generate_synthetic_records};
pub use cost_model::{BASELINE_CONFIDENCE, CostModel};
pub use enhancer::{Enhancement, EstimationEnhancer};
pub use estimator::{EnhancementStatus, EstimateOutcome, Estimator};
pub use evaluation::{
    EvalLog, EvaluationRecord, LlmScorer, ModelComparison, ModelMetrics, SimulatedScorer,
    compare_models,
};
pub use remote::{VectorServiceConfig, VectorServiceRetriever};
pub use retriever::CorpusRetriever;

// Re-export core types for convenience
pub use rce_core::{
    CostBreakdown, CostEstimate, Error, EstimateInput, EstimateRequest, EvaluationScore,
    EvaluationScorer, MaterialGrade, ProjectCategory, ProjectRecord, RagMetrics, RecordFilter,
    Result, Retriever,
};
