//! Estimate-quality evaluation
//!
//! The simulated scorer models measurement noise around fixed operating
//! points rather than computing a real metric. Callers must treat scores
//! as bounded signals, not ground truth.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use rce_core::{
    CompletionConfig, Error, EvaluationScore, EvaluationScorer, LlmProvider, ProjectCategory,
    Prompt, RagMetrics, Result,
};

use crate::enhancer::extract_json_object;

/// Amplitude of the uniform noise applied to each simulated metric
const NOISE: f64 = 0.02;

/// Baseline metric quadruple for the category mentioned in the question;
/// questions naming no known category score as additions.
fn baseline_for(question: &str) -> RagMetrics {
    match ProjectCategory::detect(question) {
        Some(ProjectCategory::Kitchen) => RagMetrics {
            faithfulness: 0.86,
            answer_relevancy: 0.89,
            context_precision: 0.79,
            context_recall: 0.83,
        },
        Some(ProjectCategory::Bathroom) => RagMetrics {
            faithfulness: 0.84,
            answer_relevancy: 0.87,
            context_precision: 0.77,
            context_recall: 0.81,
        },
        _ => RagMetrics {
            faithfulness: 0.82,
            answer_relevancy: 0.85,
            context_precision: 0.75,
            context_recall: 0.79,
        },
    }
}

/// Simulated scorer: category-keyed baselines perturbed by bounded noise
pub struct SimulatedScorer {
    seed: Option<u64>,
}

impl SimulatedScorer {
    pub fn new() -> SimulatedScorer {
        SimulatedScorer { seed: None }
    }

    /// Fixed-seed variant for reproducible scores
    pub fn with_seed(seed: u64) -> SimulatedScorer {
        SimulatedScorer { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SimulatedScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvaluationScorer for SimulatedScorer {
    async fn score(
        &self,
        question: &str,
        _contexts: &[String],
        _answer: &str,
    ) -> Result<EvaluationScore> {
        let baseline = baseline_for(question);
        let mut rng = self.rng();
        let metrics = RagMetrics {
            faithfulness: baseline.faithfulness + rng.gen_range(-NOISE..=NOISE),
            answer_relevancy: baseline.answer_relevancy + rng.gen_range(-NOISE..=NOISE),
            context_precision: baseline.context_precision + rng.gen_range(-NOISE..=NOISE),
            context_recall: baseline.context_recall + rng.gen_range(-NOISE..=NOISE),
        };
        Ok(EvaluationScore::new(metrics))
    }
}

/// LLM-judged scorer: asks the model to grade the triple directly
pub struct LlmScorer<L: LlmProvider> {
    llm: L,
}

impl<L: LlmProvider> LlmScorer<L> {
    pub fn new(llm: L) -> LlmScorer<L> {
        LlmScorer { llm }
    }
}

#[async_trait]
impl<L: LlmProvider> EvaluationScorer for LlmScorer<L> {
    async fn score(
        &self,
        question: &str,
        contexts: &[String],
        answer: &str,
    ) -> Result<EvaluationScore> {
        let system = "You are an evaluation judge for a retrieval-augmented estimator. \
                      Grade the answer against the question and the retrieved contexts. \
                      Respond with a single JSON object with keys \"faithfulness\", \
                      \"answer_relevancy\", \"context_precision\", and \"context_recall\", \
                      each a number between 0 and 1. Respond with the JSON object only.";
        let user = format!(
            "Question:\n{}\n\nContexts:\n{}\n\nAnswer:\n{}",
            question,
            contexts.join("\n---\n"),
            answer
        );

        let config = CompletionConfig {
            model_id: self.llm.model_id().to_string(),
            ..Default::default()
        };
        let completion = self.llm.complete(&Prompt::new(system, user), &config).await?;

        let json = extract_json_object(&completion.text).ok_or_else(|| {
            Error::LlmProvider("judge response contained no JSON object".to_string())
        })?;
        let metrics: RagMetrics =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;

        debug!(?metrics, "llm judge scored triple");
        Ok(EvaluationScore::new(metrics))
    }
}

/// Metrics attributed to a named scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub name: String,
    pub metrics: RagMetrics,
}

/// Base-vs-enhanced comparison; improvements are signed percentages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelComparison {
    pub base: ModelMetrics,
    pub enhanced: ModelMetrics,
    pub relative_improvement: RagMetrics,
}

/// Compare the two fixed reference scoring configurations
pub fn compare_models() -> ModelComparison {
    let base = RagMetrics {
        faithfulness: 0.76,
        answer_relevancy: 0.80,
        context_precision: 0.68,
        context_recall: 0.72,
    };
    let enhanced = RagMetrics {
        faithfulness: 0.86,
        answer_relevancy: 0.89,
        context_precision: 0.79,
        context_recall: 0.83,
    };

    let pct = |b: f64, e: f64| (e - b) / b * 100.0;
    ModelComparison {
        relative_improvement: RagMetrics {
            faithfulness: pct(base.faithfulness, enhanced.faithfulness),
            answer_relevancy: pct(base.answer_relevancy, enhanced.answer_relevancy),
            context_precision: pct(base.context_precision, enhanced.context_precision),
            context_recall: pct(base.context_recall, enhanced.context_recall),
        },
        base: ModelMetrics {
            name: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            metrics: base,
        },
        enhanced: ModelMetrics {
            name: "renovation-embeddings".to_string(),
            metrics: enhanced,
        },
    }
}

/// One persisted evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: u64,
    pub session: Uuid,
    pub question: String,
    pub answer: String,
    pub contexts: Vec<String>,
    pub score: EvaluationScore,
    pub created_at: DateTime<Utc>,
}

/// Append-only store of evaluation results, one JSON file per entry,
/// keyed by a monotonically increasing id. Never read back by the engine.
pub struct EvalLog {
    dir: PathBuf,
    next_id: u64,
    session: Uuid,
}

impl EvalLog {
    /// Open a log directory, creating it if needed. Ids continue after any
    /// entries already present.
    pub fn open(dir: impl Into<PathBuf>) -> Result<EvalLog> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let next_id = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str().and_then(parse_eval_id))
            .max()
            .map_or(0, |max| max + 1);

        Ok(EvalLog {
            dir,
            next_id,
            session: Uuid::new_v4(),
        })
    }

    /// Append a score, returning the id it was stored under
    pub fn append(
        &mut self,
        question: &str,
        contexts: &[String],
        answer: &str,
        score: EvaluationScore,
    ) -> Result<u64> {
        let id = self.next_id;
        let record = EvaluationRecord {
            id,
            session: self.session,
            question: question.to_string(),
            answer: answer.to_string(),
            contexts: contexts.to_vec(),
            score,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(self.dir.join(format!("eval_{}.json", id)), json)?;

        self.next_id += 1;
        Ok(id)
    }
}

fn parse_eval_id(name: &str) -> Option<u64> {
    name.strip_prefix("eval_")?.strip_suffix(".json")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_stay_in_unit_interval_across_many_draws() {
        let scorer = SimulatedScorer::new();
        // 2,500 scores × 4 metrics = 10,000 perturbation draws
        for _ in 0..2_500 {
            let score = scorer
                .score("kitchen remodel cost", &[], "around $90,000")
                .await
                .unwrap();
            for (name, value) in score.metrics.entries() {
                assert!(
                    (0.0..=1.0).contains(&value),
                    "{} out of range: {}",
                    name,
                    value
                );
            }
        }
    }

    #[tokio::test]
    async fn test_baselines_keyed_by_question_category() {
        let scorer = SimulatedScorer::with_seed(9);

        let tolerance = NOISE + 1e-9;
        let kitchen = scorer.score("kitchen remodel", &[], "").await.unwrap();
        assert!((kitchen.metrics.faithfulness - 0.86).abs() <= tolerance);
        assert!((kitchen.metrics.answer_relevancy - 0.89).abs() <= tolerance);

        let bathroom = scorer.score("bathroom refresh", &[], "").await.unwrap();
        assert!((bathroom.metrics.faithfulness - 0.84).abs() <= tolerance);

        // No recognized category falls back to the addition quadruple.
        let other = scorer.score("pergola build", &[], "").await.unwrap();
        assert!((other.metrics.faithfulness - 0.82).abs() <= tolerance);
    }

    #[tokio::test]
    async fn test_seeded_scorer_is_reproducible() {
        let a = SimulatedScorer::with_seed(4)
            .score("kitchen", &[], "")
            .await
            .unwrap();
        let b = SimulatedScorer::with_seed(4)
            .score("kitchen", &[], "")
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_comparison_improvements() {
        let comparison = compare_models();
        let improvement = comparison.relative_improvement;
        assert_eq!(improvement.faithfulness.round() as i64, 13);
        assert_eq!(improvement.answer_relevancy.round() as i64, 11);
        assert_eq!(improvement.context_precision.round() as i64, 16);
        assert_eq!(improvement.context_recall.round() as i64, 15);
        assert!(improvement.faithfulness > 0.0);
    }

    #[test]
    fn test_eval_log_ids_are_monotonic_and_resume() {
        let dir = tempfile::tempdir().unwrap();
        let score = EvaluationScore::new(baseline_for("kitchen"));

        let mut log = EvalLog::open(dir.path()).unwrap();
        assert_eq!(log.append("q0", &[], "a0", score).unwrap(), 0);
        assert_eq!(log.append("q1", &[], "a1", score).unwrap(), 1);

        // A fresh handle over the same directory continues the sequence.
        let mut reopened = EvalLog::open(dir.path()).unwrap();
        assert_eq!(reopened.append("q2", &[], "a2", score).unwrap(), 2);

        let written = fs::read_to_string(dir.path().join("eval_2.json")).unwrap();
        let record: EvaluationRecord = serde_json::from_str(&written).unwrap();
        assert_eq!(record.id, 2);
        assert_eq!(record.question, "q2");
    }
}
