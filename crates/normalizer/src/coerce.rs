//! Text Cleanup and Numeric Coercion
//!
//! Total functions: every input yields a value or `None`, never a panic.

use records::{Field, NormalizedRecord};

/// Remove every occurrence of each artifact, in the given order
pub fn strip_artifacts(text: &str, artifacts: &[String]) -> String {
    artifacts
        .iter()
        .filter(|artifact| !artifact.is_empty())
        .fold(text.to_string(), |acc, artifact| acc.replace(artifact.as_str(), ""))
}

/// Remove every listed character
pub fn strip_chars(text: &str, chars: &[char]) -> String {
    text.chars().filter(|c| !chars.contains(c)).collect()
}

/// Trim and map blank text to `None`
pub fn blank_to_absent(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Parse an integer, accepting decimal text with an integral value ("95.0")
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }

    let value = parse_float(text)?;
    if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Parse a finite float
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse cleaned text into a numeric field of the record.
///
/// Returns whether the field ended up present.
pub(crate) fn assign_parsed(record: &mut NormalizedRecord, field: Field, text: Option<&str>) -> bool {
    let text = blank_to_absent(text);
    match field {
        Field::Duration => {
            record.duration = text.and_then(parse_integer).and_then(|v| u32::try_from(v).ok());
            record.duration.is_some()
        }
        Field::DirectorPopularity => {
            record.director_popularity = text.and_then(parse_integer);
            record.director_popularity.is_some()
        }
        Field::LeadActorPopularity => {
            record.lead_actor_popularity = text.and_then(parse_integer);
            record.lead_actor_popularity.is_some()
        }
        Field::Gross => {
            record.gross = text.and_then(parse_integer);
            record.gross.is_some()
        }
        Field::Budget => {
            record.budget = text.and_then(parse_integer);
            record.budget.is_some()
        }
        Field::ReleaseYear => {
            record.release_year = text.and_then(parse_integer).and_then(|v| i32::try_from(v).ok());
            record.release_year.is_some()
        }
        Field::Rating => {
            record.rating = text.and_then(parse_float);
            record.rating.is_some()
        }
        _ => false,
    }
}

/// Store a literal value into a numeric field if it fits the field's type
pub(crate) fn assign_value(record: &mut NormalizedRecord, field: Field, value: f64) -> bool {
    if !value.is_finite() {
        return false;
    }
    let integral = value.fract() == 0.0;
    match field {
        Field::Rating => {
            record.rating = Some(value);
            true
        }
        _ if !integral => false,
        Field::Duration if value >= 0.0 && value <= u32::MAX as f64 => {
            record.duration = Some(value as u32);
            true
        }
        Field::ReleaseYear if value >= i32::MIN as f64 && value <= i32::MAX as f64 => {
            record.release_year = Some(value as i32);
            true
        }
        Field::DirectorPopularity | Field::LeadActorPopularity | Field::Gross | Field::Budget
            if value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            let slot = match field {
                Field::DirectorPopularity => &mut record.director_popularity,
                Field::LeadActorPopularity => &mut record.lead_actor_popularity,
                Field::Gross => &mut record.gross,
                _ => &mut record.budget,
            };
            *slot = Some(value as i64);
            true
        }
        _ => false,
    }
}
