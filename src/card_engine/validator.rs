//! Structural validation of banko cards.
//!
//! `validate` is the generator's correctness oracle: pure, total, and
//! exhaustive. It runs every placement rule independently and aggregates
//! all violations instead of stopping at the first, so a hand-built broken
//! card reports everything that is wrong with it at once.

use std::collections::HashSet;
use std::fmt;

use crate::card_engine::columns::column_range;
use crate::card_engine::models::{
    Card, COLUMNS, NUMBERS_PER_CARD, NUMBERS_PER_ROW, ROWS,
};

/// One broken placement rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A row holds a number count other than 5.
    RowQuota { row: usize, count: usize },
    /// The grid holds a total other than 15 numbers.
    TotalCount { count: usize },
    /// The same value appears in more than one cell.
    DuplicateValue { value: u8 },
    /// A value sits outside its column's range.
    OutOfRange { column: usize, value: u8 },
    /// A column's values do not strictly increase from top to bottom.
    ColumnOrder { column: usize },
    /// `numbers` is not the sorted flattening of the grid.
    NumbersMismatch,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RowQuota { row, count } => write!(
                f,
                "row {row} holds {count} numbers, expected {NUMBERS_PER_ROW}"
            ),
            Violation::TotalCount { count } => write!(
                f,
                "card holds {count} numbers, expected {NUMBERS_PER_CARD}"
            ),
            Violation::DuplicateValue { value } => {
                write!(f, "value {value} appears more than once")
            }
            Violation::OutOfRange { column, value } => {
                write!(f, "value {value} is outside the range of column {column}")
            }
            Violation::ColumnOrder { column } => {
                write!(f, "column {column} is not in strictly ascending order")
            }
            Violation::NumbersMismatch => {
                write!(f, "numbers list does not match the grid contents")
            }
        }
    }
}

/// Aggregated outcome of validating one card.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// The card satisfies every placement rule.
    pub fn ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Human-readable diagnostics, one line per violation.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Run every placement rule on `card` and collect all violations found.
///
/// The checks are independent so a malformed card can report several
/// violations at once. The 3×9 shape and the 3-per-column cap are fixed by
/// the `Grid` type itself and need no runtime check.
pub fn validate(card: &Card) -> ValidationReport {
    let mut violations = Vec::new();

    // Row quotas: exactly 5 numbers per row.
    for (row, cells) in card.grid.iter().enumerate() {
        let count = cells.iter().flatten().count();
        if count != NUMBERS_PER_ROW {
            violations.push(Violation::RowQuota { row, count });
        }
    }

    // Total count and duplicates across the whole grid.
    let flat: Vec<u8> = card.grid.iter().flatten().flatten().copied().collect();
    if flat.len() != NUMBERS_PER_CARD {
        violations.push(Violation::TotalCount { count: flat.len() });
    }
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for &value in &flat {
        if !seen.insert(value) && reported.insert(value) {
            violations.push(Violation::DuplicateValue { value });
        }
    }

    // Per-column range and ordering rules.
    for column in 0..COLUMNS {
        let range = column_range(column);
        let values: Vec<u8> = (0..ROWS).filter_map(|row| card.grid[row][column]).collect();
        for &value in &values {
            if !range.contains(&value) {
                violations.push(Violation::OutOfRange { column, value });
            }
        }
        if values.windows(2).any(|pair| pair[0] >= pair[1]) {
            violations.push(Violation::ColumnOrder { column });
        }
    }

    // `numbers` must be the sorted flattening of the grid.
    let mut sorted = flat;
    sorted.sort_unstable();
    if card.numbers != sorted {
        violations.push(Violation::NumbersMismatch);
    }

    ValidationReport { violations }
}

/// Canonical uniqueness key for a card: its sorted numbers joined by `-`.
///
/// Two cards with the same number set count as duplicates even when the
/// grid arrangement differs; the card id never enters the key. Computed
/// from the grid so a stale `numbers` list cannot change a card's identity.
pub fn signature(card: &Card) -> String {
    let mut numbers: Vec<u8> = card.grid.iter().flatten().flatten().copied().collect();
    numbers.sort_unstable();
    numbers
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_engine::models::Grid;

    /// Hand-built card satisfying every placement rule.
    fn valid_card() -> Card {
        let mut grid: Grid = [[None; COLUMNS]; ROWS];
        grid[0][0] = Some(1);
        grid[0][1] = Some(10);
        grid[0][3] = Some(30);
        grid[0][5] = Some(50);
        grid[0][7] = Some(70);
        grid[1][1] = Some(12);
        grid[1][2] = Some(20);
        grid[1][4] = Some(41);
        grid[1][6] = Some(60);
        grid[1][8] = Some(82);
        grid[2][3] = Some(35);
        grid[2][4] = Some(44);
        grid[2][6] = Some(66);
        grid[2][7] = Some(77);
        grid[2][8] = Some(85);

        let mut numbers: Vec<u8> = grid.iter().flatten().flatten().copied().collect();
        numbers.sort_unstable();
        Card { id: "T-000001".to_string(), grid, numbers, is_winning: false }
    }

    #[test]
    fn valid_card_passes_with_no_violations() {
        let report = validate(&valid_card());
        assert!(report.ok(), "unexpected violations: {:?}", report.messages());
    }

    #[test]
    fn out_of_range_value_is_reported() {
        let mut card = valid_card();
        card.grid[0][0] = Some(55); // column 0 only holds 1-9
        card.numbers = card.grid.iter().flatten().flatten().copied().collect();
        card.numbers.sort_unstable();

        let report = validate(&card);
        assert!(report
            .violations
            .contains(&Violation::OutOfRange { column: 0, value: 55 }));
    }

    #[test]
    fn duplicate_value_is_reported_once() {
        let mut card = valid_card();
        card.grid[0][3] = Some(35); // 35 already sits at row 2, column 3
        card.numbers = card.grid.iter().flatten().flatten().copied().collect();
        card.numbers.sort_unstable();

        let report = validate(&card);
        let duplicates = report
            .violations
            .iter()
            .filter(|v| matches!(v, Violation::DuplicateValue { value: 35 }))
            .count();
        assert_eq!(duplicates, 1);
    }

    #[test]
    fn stale_numbers_list_is_reported() {
        let mut card = valid_card();
        card.numbers[0] = 2; // grid holds 1, not 2

        let report = validate(&card);
        assert!(report.violations.contains(&Violation::NumbersMismatch));
    }

    #[test]
    fn signature_ignores_card_id() {
        let a = valid_card();
        let mut b = valid_card();
        b.id = "T-999999".to_string();
        assert_eq!(signature(&a), signature(&b));
        assert_eq!(signature(&a), a.numbers.iter().map(u8::to_string).collect::<Vec<_>>().join("-"));
    }
}
