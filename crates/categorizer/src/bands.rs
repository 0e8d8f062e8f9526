//! Threshold Bands

use crate::CategoryError;
use serde::{Deserialize, Serialize};

/// Upper edge of a band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// value < x
    Below(f64),
    /// value <= x
    AtMost(f64),
}

impl Bound {
    /// Whether a value falls under this edge
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Bound::Below(edge) => value < edge,
            Bound::AtMost(edge) => value <= edge,
        }
    }

    fn edge(&self) -> f64 {
        match *self {
            Bound::Below(edge) | Bound::AtMost(edge) => edge,
        }
    }
}

/// One labelled band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub bound: Bound,
    pub label: String,
}

impl Band {
    pub fn below(edge: f64, label: &str) -> Self {
        Self {
            bound: Bound::Below(edge),
            label: label.to_string(),
        }
    }

    pub fn at_most(edge: f64, label: &str) -> Self {
        Self {
            bound: Bound::AtMost(edge),
            label: label.to_string(),
        }
    }
}

/// Ordered bands for one field.
///
/// Bands are checked in order and the first one admitting the value wins,
/// so every value lands in exactly one band. Values above every band get
/// `fallback_label`, absent values get `absent_label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub absent_label: String,
    pub bands: Vec<Band>,
    pub fallback_label: String,
}

impl BandTable {
    pub fn new(absent_label: &str, bands: Vec<Band>, fallback_label: &str) -> Self {
        Self {
            absent_label: absent_label.to_string(),
            bands,
            fallback_label: fallback_label.to_string(),
        }
    }

    /// Label for a value; NaN is treated as absent
    pub fn classify(&self, value: Option<f64>) -> &str {
        let value = match value {
            Some(v) if !v.is_nan() => v,
            _ => return &self.absent_label,
        };

        self.bands
            .iter()
            .find(|band| band.bound.admits(value))
            .map(|band| band.label.as_str())
            .unwrap_or(self.fallback_label.as_str())
    }

    /// Every label this table can produce
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.absent_label.as_str())
            .chain(self.bands.iter().map(|band| band.label.as_str()))
            .chain(std::iter::once(self.fallback_label.as_str()))
    }

    /// Check labels are non-empty and bounds strictly increase
    pub fn validate(&self, table: &'static str) -> Result<(), CategoryError> {
        if self.absent_label.trim().is_empty() {
            return Err(CategoryError::EmptyLabel { table, position: 0 });
        }
        if self.fallback_label.trim().is_empty() {
            return Err(CategoryError::EmptyLabel {
                table,
                position: self.bands.len() + 1,
            });
        }

        let mut previous: Option<Bound> = None;
        for (index, band) in self.bands.iter().enumerate() {
            let position = index + 1;
            let edge = band.bound.edge();

            if band.label.trim().is_empty() {
                return Err(CategoryError::EmptyLabel { table, position });
            }
            if !edge.is_finite() {
                return Err(CategoryError::InvalidBound {
                    table,
                    position,
                    value: edge,
                });
            }
            if let Some(prev) = previous {
                // Equal edges only make sense as "< x" followed by "<= x"
                let reachable = edge > prev.edge()
                    || (edge == prev.edge()
                        && matches!((prev, band.bound), (Bound::Below(_), Bound::AtMost(_))));
                if !reachable {
                    return Err(CategoryError::UnorderedBound {
                        table,
                        position,
                        value: edge,
                    });
                }
            }
            previous = Some(band.bound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BandTable {
        BandTable::new(
            "Unknown",
            vec![Band::below(10.0, "small"), Band::at_most(20.0, "medium")],
            "large",
        )
    }

    #[test]
    fn test_bound_edges() {
        assert!(Bound::Below(10.0).admits(9.99));
        assert!(!Bound::Below(10.0).admits(10.0));
        assert!(Bound::AtMost(10.0).admits(10.0));
        assert!(!Bound::AtMost(10.0).admits(10.01));
    }

    #[test]
    fn test_classify_first_match_wins() {
        let table = sample();
        assert_eq!(table.classify(Some(-5.0)), "small");
        assert_eq!(table.classify(Some(10.0)), "medium");
        assert_eq!(table.classify(Some(20.0)), "medium");
        assert_eq!(table.classify(Some(20.5)), "large");
        assert_eq!(table.classify(None), "Unknown");
        assert_eq!(table.classify(Some(f64::NAN)), "Unknown");
    }

    #[test]
    fn test_labels_lists_vocabulary() {
        let table = sample();
        let labels: Vec<_> = table.labels().collect();
        assert_eq!(labels, vec!["Unknown", "small", "medium", "large"]);
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate("sample").is_ok());
    }

    #[test]
    fn test_validate_rejects_unordered() {
        let table = BandTable::new(
            "Unknown",
            vec![Band::at_most(20.0, "a"), Band::below(10.0, "b")],
            "c",
        );
        assert_eq!(
            table.validate("t"),
            Err(CategoryError::UnorderedBound {
                table: "t",
                position: 2,
                value: 10.0
            })
        );
    }

    #[test]
    fn test_validate_equal_edges() {
        let reachable = BandTable::new(
            "Unknown",
            vec![Band::below(10.0, "a"), Band::at_most(10.0, "b")],
            "c",
        );
        assert!(reachable.validate("t").is_ok());

        let unreachable = BandTable::new(
            "Unknown",
            vec![Band::at_most(10.0, "a"), Band::below(10.0, "b")],
            "c",
        );
        assert!(unreachable.validate("t").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_label_and_bad_bound() {
        let empty = BandTable::new("Unknown", vec![Band::below(1.0, " ")], "c");
        assert!(matches!(
            empty.validate("t"),
            Err(CategoryError::EmptyLabel { position: 1, .. })
        ));

        let infinite = BandTable::new("Unknown", vec![Band::below(f64::INFINITY, "a")], "c");
        assert!(matches!(
            infinite.validate("t"),
            Err(CategoryError::InvalidBound { .. })
        ));
    }
}
