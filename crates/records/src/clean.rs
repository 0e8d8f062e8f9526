//! Normalized and Clean Rows

use crate::field::{Field, FieldSource};
use crate::raw::RawRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Columns copied verbatim from the raw row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passthrough {
    pub critic_review_count: Option<String>,
    pub user_review_count: Option<String>,
    pub cast_total_popularity: Option<String>,
    pub poster_face_count: Option<String>,
}

impl Passthrough {
    /// Borrow a passthrough column, `None` for any other field
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::CriticReviewCount => self.critic_review_count.as_deref(),
            Field::UserReviewCount => self.user_review_count.as_deref(),
            Field::CastTotalPopularity => self.cast_total_popularity.as_deref(),
            Field::PosterFaceCount => self.poster_face_count.as_deref(),
            _ => None,
        }
    }
}

impl From<&RawRecord> for Passthrough {
    fn from(raw: &RawRecord) -> Self {
        Self {
            critic_review_count: raw.critic_review_count.clone(),
            user_review_count: raw.user_review_count.clone(),
            cast_total_popularity: raw.cast_total_popularity.clone(),
            poster_face_count: raw.poster_face_count.clone(),
        }
    }
}

/// Deduplicated row with typed values.
///
/// A missing, blank or unparseable value is always `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Position of the surviving row in the raw snapshot
    pub source_index: usize,
    pub title: Option<String>,
    /// Minutes
    pub duration: Option<u32>,
    pub director_popularity: Option<i64>,
    pub lead_actor_popularity: Option<i64>,
    pub gross: Option<i64>,
    pub budget: Option<i64>,
    pub release_year: Option<i32>,
    pub rating: Option<f64>,
    pub passthrough: Passthrough,
}

impl NormalizedRecord {
    /// Numeric value of a field as `f64`, `None` for absent or non-numeric fields
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Duration => self.duration.map(f64::from),
            Field::DirectorPopularity => self.director_popularity.map(|v| v as f64),
            Field::LeadActorPopularity => self.lead_actor_popularity.map(|v| v as f64),
            Field::Gross => self.gross.map(|v| v as f64),
            Field::Budget => self.budget.map(|v| v as f64),
            Field::ReleaseYear => self.release_year.map(f64::from),
            Field::Rating => self.rating,
            _ => None,
        }
    }
}

impl FieldSource for NormalizedRecord {
    fn text(&self, field: Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Title => self.title.as_deref().map(Cow::Borrowed),
            Field::Duration => self.duration.map(|v| Cow::Owned(v.to_string())),
            Field::DirectorPopularity => self.director_popularity.map(|v| Cow::Owned(v.to_string())),
            Field::LeadActorPopularity => self.lead_actor_popularity.map(|v| Cow::Owned(v.to_string())),
            Field::Gross => self.gross.map(|v| Cow::Owned(v.to_string())),
            Field::Budget => self.budget.map(|v| Cow::Owned(v.to_string())),
            Field::ReleaseYear => self.release_year.map(|v| Cow::Owned(v.to_string())),
            Field::Rating => self.rating.map(|v| Cow::Owned(v.to_string())),
            Field::CriticReviewCount
            | Field::UserReviewCount
            | Field::CastTotalPopularity
            | Field::PosterFaceCount => self.passthrough.get(field).map(Cow::Borrowed),
        }
    }
}

/// Category labels derived from the numeric columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Categories {
    pub budget_category: String,
    pub gross_category: String,
    pub duration_category: String,
    pub rating_category: String,
}

/// Final output row: normalized values plus their categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    #[serde(flatten)]
    pub record: NormalizedRecord,
    #[serde(flatten)]
    pub categories: Categories,
}

impl FieldSource for CleanRecord {
    fn text(&self, field: Field) -> Option<Cow<'_, str>> {
        self.record.text(field)
    }
}
