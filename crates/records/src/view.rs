//! Analysis Projection

use crate::clean::CleanRecord;
use serde::Serialize;

/// One row of the analysis view: the analysis-relevant subset of a clean row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRow {
    pub title: Option<String>,
    pub duration: Option<u32>,
    pub duration_category: String,
    pub budget: Option<i64>,
    pub budget_category: String,
    pub gross: Option<i64>,
    pub gross_category: String,
    pub rating: Option<f64>,
    pub rating_category: String,
    pub director_popularity: Option<i64>,
    pub release_year: Option<i32>,
}

impl From<&CleanRecord> for AnalysisRow {
    fn from(clean: &CleanRecord) -> Self {
        let record = &clean.record;
        let categories = &clean.categories;
        Self {
            title: record.title.clone(),
            duration: record.duration,
            duration_category: categories.duration_category.clone(),
            budget: record.budget,
            budget_category: categories.budget_category.clone(),
            gross: record.gross,
            gross_category: categories.gross_category.clone(),
            rating: record.rating,
            rating_category: categories.rating_category.clone(),
            director_popularity: record.director_popularity,
            release_year: record.release_year,
        }
    }
}
