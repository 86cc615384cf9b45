use serde::{Deserialize, Serialize};

/// One structured row of the nutrition facts table.
///
/// `percentage` is the daily-value percentage when one could be associated
/// with the row, e.g. `"15%"`. Rows are created fresh per parse call and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionItem {
    pub name: String,
    pub amount: String,
    pub percentage: Option<String>,
}

impl NutritionItem {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            percentage: None,
        }
    }

    pub fn with_percentage(
        name: impl Into<String>,
        amount: impl Into<String>,
        percentage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            percentage: Some(percentage.into()),
        }
    }
}
