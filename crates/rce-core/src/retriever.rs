//! Record retrieval trait and filter types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{MaterialGrade, ProjectCategory, ProjectRecord, Result};

/// Default number of comparable records returned by a search
pub const DEFAULT_TOP_K: usize = 3;

/// Exact-match filter over project record fields
///
/// Set fields combine as a conjunction; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub category: Option<ProjectCategory>,
    pub material_grade: Option<MaterialGrade>,
    pub location_code: Option<String>,
}

impl RecordFilter {
    /// Filter on a single category
    pub fn by_category(category: ProjectCategory) -> RecordFilter {
        RecordFilter {
            category: Some(category),
            ..RecordFilter::default()
        }
    }

    /// Check whether a record satisfies every set field
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }
        if let Some(grade) = self.material_grade {
            if record.material_grade != grade {
                return false;
            }
        }
        if let Some(ref location) = self.location_code {
            if &record.location_code != location {
                return false;
            }
        }
        true
    }
}

/// Trait for comparable-record retrievers
///
/// Implementations are categorical lookups, not geometric similarity
/// searches: callers must not assume any relevance ordering beyond the
/// filter match itself. An empty result is a normal outcome, not an error.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Find up to `k` records matching the query and filter
    async fn search(
        &self,
        query_text: &str,
        filter: &RecordFilter,
        k: usize,
    ) -> Result<Vec<ProjectRecord>>;

    /// Check if the retriever has records to serve
    fn is_ready(&self) -> bool;
}
