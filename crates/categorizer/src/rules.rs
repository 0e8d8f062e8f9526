//! Category Rule Set

use crate::bands::{Band, BandTable};
use crate::CategoryError;
use serde::{Deserialize, Serialize};

/// Band tables for every categorized field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRules {
    /// Production budget
    pub budget: BandTable,
    /// Gross revenue
    pub gross: BandTable,
    /// Running time (minutes)
    pub duration: BandTable,
    /// Audience rating (0-10)
    pub rating: BandTable,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            budget: BandTable::new(
                "Unknown",
                vec![
                    Band::below(10_000_000.0, "Low Budget"),
                    Band::at_most(50_000_000.0, "Medium Budget"),
                    Band::at_most(100_000_000.0, "High Budget"),
                ],
                "Blockbuster Budget",
            ),
            gross: BandTable::new(
                "Unknown",
                vec![
                    Band::below(50_000_000.0, "Underperformer"),
                    Band::at_most(200_000_000.0, "Solid Performer"),
                    Band::at_most(500_000_000.0, "Hit"),
                ],
                "Blockbuster",
            ),
            duration: BandTable::new(
                "Unknown",
                vec![
                    Band::below(90.0, "Short Film"),
                    Band::at_most(120.0, "Standard Length"),
                    Band::at_most(150.0, "Long Film"),
                ],
                "Epic Length",
            ),
            // Scores carry one decimal, so 6.9 / 7.9 upper ends become "< 7.0" / "< 8.0"
            rating: BandTable::new(
                "Not Rated",
                vec![
                    Band::below(5.0, "Poor"),
                    Band::below(7.0, "Average"),
                    Band::below(8.0, "Good"),
                ],
                "Excellent",
            ),
        }
    }
}

impl CategoryRules {
    /// Validate every table
    pub fn validate(&self) -> Result<(), CategoryError> {
        self.budget.validate("budget")?;
        self.gross.validate("gross")?;
        self.duration.validate("duration")?;
        self.rating.validate("rating")?;
        Ok(())
    }
}
