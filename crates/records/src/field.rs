//! Field Catalogue

use crate::RecordError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Every column of the movie dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    /// Running time in minutes
    Duration,
    DirectorPopularity,
    LeadActorPopularity,
    Gross,
    Budget,
    ReleaseYear,
    Rating,
    CriticReviewCount,
    UserReviewCount,
    CastTotalPopularity,
    PosterFaceCount,
}

impl Field {
    /// All fields in snapshot column order
    pub const ALL: [Field; 12] = [
        Field::Title,
        Field::Duration,
        Field::DirectorPopularity,
        Field::LeadActorPopularity,
        Field::Gross,
        Field::Budget,
        Field::ReleaseYear,
        Field::Rating,
        Field::CriticReviewCount,
        Field::UserReviewCount,
        Field::CastTotalPopularity,
        Field::PosterFaceCount,
    ];

    /// Fields whose combination identifies a movie for deduplication
    pub const IDENTITY: [Field; 7] = [
        Field::Title,
        Field::ReleaseYear,
        Field::DirectorPopularity,
        Field::LeadActorPopularity,
        Field::Gross,
        Field::Budget,
        Field::Rating,
    ];

    /// Fields carried through cleaning untouched
    pub const PASSTHROUGH: [Field; 4] = [
        Field::CriticReviewCount,
        Field::UserReviewCount,
        Field::CastTotalPopularity,
        Field::PosterFaceCount,
    ];

    /// Fields the normalizer coerces to a numeric type
    pub const NUMERIC: [Field; 7] = [
        Field::Duration,
        Field::DirectorPopularity,
        Field::LeadActorPopularity,
        Field::Gross,
        Field::Budget,
        Field::ReleaseYear,
        Field::Rating,
    ];

    /// Column name used in snapshots and configuration
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Duration => "duration",
            Field::DirectorPopularity => "director_popularity",
            Field::LeadActorPopularity => "lead_actor_popularity",
            Field::Gross => "gross",
            Field::Budget => "budget",
            Field::ReleaseYear => "release_year",
            Field::Rating => "rating",
            Field::CriticReviewCount => "critic_review_count",
            Field::UserReviewCount => "user_review_count",
            Field::CastTotalPopularity => "cast_total_popularity",
            Field::PosterFaceCount => "poster_face_count",
        }
    }

    /// Whether the normalizer parses this field into a number
    pub fn is_numeric(&self) -> bool {
        Self::NUMERIC.contains(self)
    }

    /// Whether this field takes part in the identity tuple
    pub fn is_identity(&self) -> bool {
        Self::IDENTITY.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecordError::UnknownField(s.to_string()))
    }
}

/// Text access to any field of a record.
///
/// Raw rows hand back their stored text, typed rows format their values.
/// Diagnostics are written against this trait so they can run on either
/// side of the pipeline.
pub trait FieldSource {
    /// Field value as text, `None` when absent
    fn text(&self, field: Field) -> Option<Cow<'_, str>>;

    /// Title shorthand
    fn title(&self) -> Option<Cow<'_, str>> {
        self.text(Field::Title)
    }
}
