//! Historical project corpus: file loading and synthetic generation

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use rce_core::{
    CostBreakdown, Error, MaterialGrade, ProjectCategory, ProjectRecord, Result,
};

/// Read-only collection of historical project records
///
/// Loaded once, never mutated afterwards; cloning shares the underlying
/// records, so the corpus is safe for unsynchronized concurrent reads.
#[derive(Debug, Clone)]
pub struct ProjectCorpus {
    records: Arc<Vec<ProjectRecord>>,
}

impl ProjectCorpus {
    pub fn new(records: Vec<ProjectRecord>) -> ProjectCorpus {
        ProjectCorpus {
            records: Arc::new(records),
        }
    }

    /// Load records from a JSON file containing an array of project records
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<ProjectCorpus> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let records: Vec<ProjectRecord> = serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        info!(count = records.len(), path = %path.display(), "loaded project corpus");
        Ok(ProjectCorpus::new(records))
    }

    /// Build a corpus of synthetic records; deterministic for a given seed
    pub fn synthetic(count: usize, seed: u64) -> ProjectCorpus {
        ProjectCorpus::new(generate_synthetic_records(count, seed))
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

/// Postal codes the generator draws from, one per major metro
const LOCATION_CODES: [&str; 5] = ["90210", "10001", "60601", "98101", "33139"];

/// Generate synthetic renovation project records
///
/// Square footage, realized cost rate, and timeline ranges are
/// category-specific so the corpus looks like plausible history rather
/// than uniform noise. Breakdown amounts always sum to the total cost.
pub fn generate_synthetic_records(count: usize, seed: u64) -> Vec<ProjectRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let categories = ProjectCategory::all();
    let grades = MaterialGrade::all();

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let category = categories[rng.gen_range(0..categories.len())];
        let (square_feet, rate, timeline_weeks) = match category {
            ProjectCategory::Kitchen => (
                rng.gen_range(100..=300),
                rng.gen_range(150.0..350.0),
                rng.gen_range(4..=12),
            ),
            ProjectCategory::Bathroom => (
                rng.gen_range(40..=150),
                rng.gen_range(200.0..400.0),
                rng.gen_range(3..=8),
            ),
            ProjectCategory::Addition => (
                rng.gen_range(200..=800),
                rng.gen_range(200.0..500.0),
                rng.gen_range(8..=20),
            ),
        };
        let material_grade = grades[rng.gen_range(0..grades.len())];
        let location_code = LOCATION_CODES[rng.gen_range(0..LOCATION_CODES.len())];

        let total_cost =
            (f64::from(square_feet) * rate * material_grade.multiplier()) as u64;

        records.push(ProjectRecord {
            id: format!("proj_{}", i),
            text: format!(
                "{} renovation with {} square feet using {} materials in {}. Total cost: ${}.",
                category, square_feet, material_grade, location_code, total_cost
            ),
            category,
            square_feet,
            material_grade,
            location_code: location_code.to_string(),
            total_cost,
            cost_breakdown: CostBreakdown::split(total_cost),
            timeline_weeks,
            recorded_at: Utc::now(),
        });
    }

    records
}
