//! Page layout of a shopping list, independent of the output format.

use crate::line::AggregatedLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub ingredient: String,
    pub quantity: String,
}

impl From<&AggregatedLine> for Row {
    fn from(line: &AggregatedLine) -> Self {
        Self {
            ingredient: line.name.to_owned(),
            quantity: line.quantity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub total: usize,
    pub rows: Vec<Row>,
}

impl Page {
    pub fn footer_label(&self) -> String {
        format!("Page {} of {}", self.number, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListDocument {
    pub title: String,
    pub header: String,
    pub requester: String,
    pub footer: String,
    pub pages: Vec<Page>,
}

impl ShoppingListDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn row_counts(&self) -> Vec<usize> {
        self.pages.iter().map(|p| p.rows.len()).collect()
    }
}

/// Split lines into pages of at most `page_size` rows.
///
/// Page `k` holds lines `[k * page_size, min((k + 1) * page_size, len))`. An empty
/// list still yields one page without rows. `page_size` must be positive.
pub fn paginate(lines: &[AggregatedLine], page_size: usize) -> Vec<Page> {
    debug_assert!(page_size > 0);

    if lines.is_empty() {
        return vec![Page {
            number: 1,
            total: 1,
            rows: Vec::new(),
        }];
    }

    let total = lines.len().div_ceil(page_size);

    lines
        .chunks(page_size)
        .enumerate()
        .map(|(index, chunk)| Page {
            number: index + 1,
            total,
            rows: chunk.iter().map(Row::from).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(count: usize) -> Vec<AggregatedLine> {
        (0..count)
            .map(|i| AggregatedLine {
                name: format!("Ingredient {i:02}"),
                unit: "g".to_owned(),
                total_amount: (i + 1) as i64,
            })
            .collect()
    }

    fn counts(pages: &[Page]) -> Vec<usize> {
        pages.iter().map(|p| p.rows.len()).collect()
    }

    #[test]
    fn test_paginate_boundaries() {
        assert_eq!(counts(&paginate(&lines(6), 6)), vec![6]);
        assert_eq!(counts(&paginate(&lines(7), 6)), vec![6, 1]);
        assert_eq!(counts(&paginate(&lines(12), 6)), vec![6, 6]);
    }

    #[test]
    fn test_paginate_empty_keeps_one_page() {
        let pages = paginate(&[], 6);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].rows.is_empty());
        assert_eq!(pages[0].footer_label(), "Page 1 of 1");
    }

    #[test]
    fn test_paginate_row_order_and_numbers() {
        let pages = paginate(&lines(7), 6);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].total, 2);
        assert_eq!(
            pages[1].rows,
            vec![Row {
                ingredient: "Ingredient 06".to_owned(),
                quantity: "7 g".to_owned(),
            }]
        );
    }
}
