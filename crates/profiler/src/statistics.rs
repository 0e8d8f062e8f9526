//! Numeric Range Computation

use serde::Serialize;

/// Min, max and mean over the values of one field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean value
    pub mean: f64,
    /// Number of values that contributed
    pub count: usize,
}

impl NumericRange {
    /// Compute the range of a set of values, `None` when there are none
    pub fn compute<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = f64::MIN;

        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            min,
            max,
            mean: sum / count as f64,
            count,
        })
    }
}
