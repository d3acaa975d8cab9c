//! In-memory corpus retriever

use async_trait::async_trait;
use tracing::debug;

use rce_core::{
    MaterialGrade, ProjectCategory, ProjectRecord, RecordFilter, Result, Retriever,
};

use crate::ProjectCorpus;

/// Deterministic retriever backed by the in-memory corpus
///
/// A categorical lookup: filter fields left unset are derived from keywords
/// in the query text, the exact-match conjunction is applied over the
/// corpus, and the first `k` matches come back in corpus order.
pub struct CorpusRetriever {
    corpus: ProjectCorpus,
}

impl CorpusRetriever {
    pub fn new(corpus: ProjectCorpus) -> CorpusRetriever {
        CorpusRetriever { corpus }
    }

    /// Fill unset filter fields from keywords in the query text
    fn effective_filter(query_text: &str, filter: &RecordFilter) -> RecordFilter {
        RecordFilter {
            category: filter
                .category
                .or_else(|| ProjectCategory::detect(query_text)),
            material_grade: filter
                .material_grade
                .or_else(|| MaterialGrade::detect(query_text)),
            location_code: filter.location_code.clone(),
        }
    }
}

#[async_trait]
impl Retriever for CorpusRetriever {
    async fn search(
        &self,
        query_text: &str,
        filter: &RecordFilter,
        k: usize,
    ) -> Result<Vec<ProjectRecord>> {
        let filter = Self::effective_filter(query_text, filter);
        let matches: Vec<ProjectRecord> = self
            .corpus
            .records()
            .iter()
            .filter(|record| filter.matches(record))
            .take(k)
            .cloned()
            .collect();

        debug!(
            query = query_text,
            matched = matches.len(),
            k,
            "corpus search"
        );
        Ok(matches)
    }

    fn is_ready(&self) -> bool {
        !self.corpus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rce_core::CostBreakdown;

    fn record(id: &str, category: ProjectCategory, grade: MaterialGrade) -> ProjectRecord {
        let total_cost = 50_000;
        ProjectRecord {
            id: id.to_string(),
            text: format!("{} renovation using {} materials", category, grade),
            category,
            square_feet: 200,
            material_grade: grade,
            location_code: "90210".to_string(),
            total_cost,
            cost_breakdown: CostBreakdown::split(total_cost),
            timeline_weeks: 6,
            recorded_at: Utc::now(),
        }
    }

    fn corpus() -> ProjectCorpus {
        ProjectCorpus::new(vec![
            record("p0", ProjectCategory::Kitchen, MaterialGrade::Standard),
            record("p1", ProjectCategory::Bathroom, MaterialGrade::Premium),
            record("p2", ProjectCategory::Kitchen, MaterialGrade::Premium),
            record("p3", ProjectCategory::Bathroom, MaterialGrade::Standard),
            record("p4", ProjectCategory::Addition, MaterialGrade::Luxury),
            record("p5", ProjectCategory::Bathroom, MaterialGrade::Luxury),
        ])
    }

    #[tokio::test]
    async fn test_explicit_filter_returns_only_matching_category() {
        let retriever = CorpusRetriever::new(corpus());
        let filter = RecordFilter::by_category(ProjectCategory::Bathroom);

        let results = retriever.search("renovation", &filter, 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(
            results
                .iter()
                .all(|r| r.category == ProjectCategory::Bathroom)
        );
    }

    #[tokio::test]
    async fn test_category_and_grade_derived_from_query_text() {
        let retriever = CorpusRetriever::new(corpus());

        let results = retriever
            .search("Premium KITCHEN remodel", &RecordFilter::default(), 5)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "p2");
    }

    #[tokio::test]
    async fn test_results_come_back_in_corpus_order() {
        let retriever = CorpusRetriever::new(corpus());

        let results = retriever
            .search("bathroom remodel", &RecordFilter::default(), 10)
            .await
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3", "p5"]);
    }

    #[tokio::test]
    async fn test_no_match_yields_empty_not_error() {
        let retriever = CorpusRetriever::new(corpus());
        let filter = RecordFilter {
            category: Some(ProjectCategory::Addition),
            material_grade: Some(MaterialGrade::Standard),
            location_code: None,
        };

        let results = retriever.search("addition", &filter, 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_corpus_is_not_ready() {
        let retriever = CorpusRetriever::new(ProjectCorpus::new(Vec::new()));
        assert!(!retriever.is_ready());

        let results = retriever
            .search("kitchen", &RecordFilter::default(), 3)
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
