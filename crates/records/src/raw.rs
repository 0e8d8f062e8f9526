//! Raw Snapshot Rows

use crate::field::{Field, FieldSource};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// One movie row exactly as ingested.
///
/// Every column is optional text: `None` is a missing value, `Some("")` a
/// blank one. Numbers in the snapshot are kept in their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub director_popularity: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub lead_actor_popularity: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub gross: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub release_year: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub critic_review_count: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub user_review_count: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub cast_total_popularity: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub poster_face_count: Option<String>,
}

impl RawRecord {
    /// Borrow a field's stored text
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a field, builder style
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// Stored value of a field
    pub fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Title => &self.title,
            Field::Duration => &self.duration,
            Field::DirectorPopularity => &self.director_popularity,
            Field::LeadActorPopularity => &self.lead_actor_popularity,
            Field::Gross => &self.gross,
            Field::Budget => &self.budget,
            Field::ReleaseYear => &self.release_year,
            Field::Rating => &self.rating,
            Field::CriticReviewCount => &self.critic_review_count,
            Field::UserReviewCount => &self.user_review_count,
            Field::CastTotalPopularity => &self.cast_total_popularity,
            Field::PosterFaceCount => &self.poster_face_count,
        }
    }

    /// Mutable stored value of a field
    pub fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Duration => &mut self.duration,
            Field::DirectorPopularity => &mut self.director_popularity,
            Field::LeadActorPopularity => &mut self.lead_actor_popularity,
            Field::Gross => &mut self.gross,
            Field::Budget => &mut self.budget,
            Field::ReleaseYear => &mut self.release_year,
            Field::Rating => &mut self.rating,
            Field::CriticReviewCount => &mut self.critic_review_count,
            Field::UserReviewCount => &mut self.user_review_count,
            Field::CastTotalPopularity => &mut self.cast_total_popularity,
            Field::PosterFaceCount => &mut self.poster_face_count,
        }
    }
}

impl FieldSource for RawRecord {
    fn text(&self, field: Field) -> Option<Cow<'_, str>> {
        self.get(field).map(Cow::Borrowed)
    }
}

/// Scalar shapes accepted in a snapshot cell
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

/// Accept strings, numbers, booleans or null and keep them as text
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseValue>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        LooseValue::Text(s) => s,
        LooseValue::Integer(i) => i.to_string(),
        LooseValue::Unsigned(u) => u.to_string(),
        LooseValue::Float(f) => f.to_string(),
        LooseValue::Flag(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_deserialization() {
        let json = r#"{
            "title": "Avatar",
            "duration": 178,
            "budget": "237000000",
            "rating": 7.9,
            "gross": null,
            "director_popularity": "\"0\""
        }"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.get(Field::Title), Some("Avatar"));
        assert_eq!(record.get(Field::Duration), Some("178"));
        assert_eq!(record.get(Field::Budget), Some("237000000"));
        assert_eq!(record.get(Field::Rating), Some("7.9"));
        assert_eq!(record.get(Field::Gross), None);
        assert_eq!(record.get(Field::DirectorPopularity), Some("\"0\""));
        // Missing keys are absent
        assert_eq!(record.get(Field::PosterFaceCount), None);
    }

    #[test]
    fn test_blank_is_not_absent() {
        let record: RawRecord = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(record.get(Field::Title), Some(""));
        assert_ne!(record.slot(Field::Title), &None);
    }

    #[test]
    fn test_builder_sets_every_field() {
        let mut record = RawRecord::default();
        for field in Field::ALL {
            record = record.with(field, field.name());
        }
        for field in Field::ALL {
            assert_eq!(record.get(field), Some(field.name()));
            assert_eq!(record.text(field).as_deref(), Some(field.name()));
        }
    }
}
