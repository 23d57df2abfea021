use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::InvalidLineError;

pub const AMOUNT_MIN: i64 = 1;
pub const AMOUNT_MAX: i64 = 32_000;

/// One ingredient usage within one recipe, as returned by the cart query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct IngredientLine {
    #[validate(length(min = 1, message = "ingredient name is empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "measurement unit is empty"))]
    pub unit: String,
    #[validate(range(
        min = AMOUNT_MIN,
        max = AMOUNT_MAX,
        message = "amount is out of range"
    ))]
    pub amount: i64,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            amount,
        }
    }

    /// Checks the line invariants, `index` is the position of the line in its batch.
    pub fn check(&self, index: usize) -> Result<(), InvalidLineError> {
        self.validate().map_err(|errors| InvalidLineError {
            index,
            name: self.name.to_owned(),
            amount: self.amount,
            reason: errors.to_string(),
        })
    }
}

/// A deduplicated, summed entry of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedLine {
    pub name: String,
    pub unit: String,
    pub total_amount: i64,
}

impl AggregatedLine {
    /// Quantity cell text, `"<amount> <unit>"`.
    pub fn quantity(&self) -> String {
        format!("{} {}", self.total_amount, self.unit)
    }
}
