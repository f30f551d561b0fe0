use rand::Rng;
use std::ops::RangeInclusive;

use crate::card_engine::models::COLUMNS;

/// Inclusive number range of a grid column.
///
/// Column 0 holds 1–9 (nine values), columns 1–7 hold `10c..=10c+9` (ten
/// each), and the last column holds 80–90 (eleven).
pub fn column_range(column: usize) -> RangeInclusive<u8> {
    debug_assert!(column < COLUMNS);
    match column {
        0 => 1..=9,
        8 => 80..=90,
        c => {
            let lo = c as u8 * 10;
            lo..=lo + 9
        }
    }
}

/// One column's numbers, shuffled up front and drawn without replacement.
pub struct ColumnPool {
    numbers: Vec<u8>,
    cursor: usize,
}

impl ColumnPool {
    /// Build the pool for `column` and shuffle it with `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R, column: usize) -> Self {
        let mut numbers: Vec<u8> = column_range(column).collect();

        // Fisher-Yates shuffle
        for i in (1..numbers.len()).rev() {
            let j = rng.gen_range(0..=i);
            numbers.swap(i, j);
        }

        ColumnPool { numbers, cursor: 0 }
    }

    /// Draw one number; panics if the pool is exhausted.
    pub fn draw(&mut self) -> u8 {
        assert!(self.cursor < self.numbers.len(), "Column pool exhausted");
        let n = self.numbers[self.cursor];
        self.cursor += 1;
        n
    }

    /// Draw `n` numbers at once.
    pub fn draw_n(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.draw()).collect()
    }

    /// Numbers still available.
    pub fn remaining(&self) -> usize {
        self.numbers.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pools_cover_their_ranges_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        for column in 0..COLUMNS {
            let mut pool = ColumnPool::new_shuffled(&mut rng, column);
            let size = pool.remaining();
            let expected = match column {
                0 => 9,
                8 => 11,
                _ => 10,
            };
            assert_eq!(size, expected, "pool size for column {column}");

            let mut drawn: Vec<u8> = pool.draw_n(size);
            drawn.sort_unstable();
            let full: Vec<u8> = column_range(column).collect();
            assert_eq!(drawn, full, "column {column} pool must cover its range");
        }
    }

    #[test]
    fn pool_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<u8> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pool = ColumnPool::new_shuffled(&mut rng, 4);
            pool.draw_n(5)
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }
}
