//! Evaluation scoring trait

use async_trait::async_trait;

use crate::{EvaluationScore, Result};

/// Trait for estimate-quality scorers
///
/// A scorer judges a question/contexts/answer triple and reports the four
/// retrieval-augmented generation metrics. Scores are bounded signals, not
/// ground truth; callers decide what to do with a failing metric.
#[async_trait]
pub trait EvaluationScorer: Send + Sync {
    async fn score(
        &self,
        question: &str,
        contexts: &[String],
        answer: &str,
    ) -> Result<EvaluationScore>;
}
