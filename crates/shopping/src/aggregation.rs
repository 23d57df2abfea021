use std::collections::HashMap;

use crate::error::InvalidLineError;
use crate::line::{AggregatedLine, IngredientLine};

/// Ingredient Aggregation Service
///
/// Stateless domain service that merges the ingredient lines of every recipe
/// in a shopping cart into one list.
///
/// Lines are grouped by the exact `(name, unit)` pair and their amounts summed:
/// - "Salt 10 g" + "Salt 5 g" = "Salt 15 g"
/// - "Flour 100 g" + "Flour 1 kg" = 2 separate line items (units are never converted)
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Aggregate ingredient lines, failing on the first line that breaks its invariants
    ///
    /// The result is sorted by ingredient name, then by unit, whatever the input order.
    pub fn aggregate(lines: &[IngredientLine]) -> Result<Vec<AggregatedLine>, InvalidLineError> {
        let mut groups: HashMap<(&str, &str), i64> = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            line.check(index)?;

            *groups
                .entry((line.name.as_str(), line.unit.as_str()))
                .or_insert(0) += line.amount;
        }

        let mut result: Vec<AggregatedLine> = groups
            .into_iter()
            .map(|((name, unit), total_amount)| AggregatedLine {
                name: name.to_owned(),
                unit: unit.to_owned(),
                total_amount,
            })
            .collect();

        result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.unit.cmp(&b.unit)));

        Ok(result)
    }

    /// Split a batch into valid lines and the errors of the rejected ones
    ///
    /// Used for lines read back from storage, where a bad row is skipped
    /// instead of failing the whole shopping list.
    pub fn partition_valid(
        lines: Vec<IngredientLine>,
    ) -> (Vec<IngredientLine>, Vec<InvalidLineError>) {
        let mut valid = Vec::with_capacity(lines.len());
        let mut rejected = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            match line.check(index) {
                Ok(()) => valid.push(line),
                Err(err) => rejected.push(err),
            }
        }

        (valid, rejected)
    }
}
