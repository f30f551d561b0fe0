//! Constrained-random card generation.
//!
//! A card is built as a draft and checked against the validator; rejected
//! drafts are discarded and redrawn from scratch rather than repaired in
//! place. The layout steps below make rejection rare, so the retry cap is
//! a defence against logic defects rather than against bad luck.
//!
//! One draft:
//!
//! 1. Visit the columns in a shuffled order and give each 1–3 rows that are
//!    still under their 5-number quota.
//! 2. Repair: top up rows short of quota from columns with room that do not
//!    already hold that row.
//! 3. Draw distinct numbers for each column from its shuffled pool.
//! 4. Reorder each column's values into ascending order, keeping the set of
//!    occupied rows unchanged.
//! 5. Derive the sorted `numbers` list from the grid.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::card_engine::columns::ColumnPool;
use crate::card_engine::error::{BankoError, Result};
use crate::card_engine::models::{
    BatchRequest, Card, Grid, COLUMNS, MAX_PER_COLUMN, NUMBERS_PER_ROW, ROWS,
};
use crate::card_engine::validator::{signature, validate};

/// Hard cap on validator rejections for a single card.
pub const MAX_CARD_ATTEMPTS: u32 = 1000;
/// Attempt budget for a batch is `count * BATCH_ATTEMPT_FACTOR`.
pub const BATCH_ATTEMPT_FACTOR: usize = 10;

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Mint a fresh card id, unique for the lifetime of the process. Ids are
/// never reused, not even for drafts that end up rejected or deduplicated.
fn next_card_id() -> String {
    format!("B-{:06}", NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
}

/// Decide which rows each column will occupy.
///
/// The seeding pass leaves some rows short of quota; the repair pass tops
/// them up. A layout that still misses a quota is not special-cased here —
/// the validator rejects the finished draft and a fresh one is drawn.
fn draft_layout<R: Rng>(rng: &mut R) -> [[bool; ROWS]; COLUMNS] {
    let mut assigned = [[false; ROWS]; COLUMNS];
    let mut row_counts = [0usize; ROWS];
    let mut col_counts = [0usize; COLUMNS];

    let mut order: Vec<usize> = (0..COLUMNS).collect();
    // Fisher-Yates shuffle
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }

    for &column in &order {
        let mut open: Vec<usize> = (0..ROWS)
            .filter(|&row| row_counts[row] < NUMBERS_PER_ROW)
            .collect();
        if open.is_empty() {
            continue;
        }
        let take = rng.gen_range(1..=open.len().min(MAX_PER_COLUMN));
        for _ in 0..take {
            let row = open.swap_remove(rng.gen_range(0..open.len()));
            assigned[column][row] = true;
            row_counts[row] += 1;
            col_counts[column] += 1;
        }
    }

    while let Some(row) = (0..ROWS).find(|&row| row_counts[row] < NUMBERS_PER_ROW) {
        let candidates: Vec<usize> = (0..COLUMNS)
            .filter(|&c| col_counts[c] < MAX_PER_COLUMN && !assigned[c][row])
            .collect();
        if candidates.is_empty() {
            break;
        }
        let column = candidates[rng.gen_range(0..candidates.len())];
        assigned[column][row] = true;
        row_counts[row] += 1;
        col_counts[column] += 1;
    }

    assigned
}

/// Produce one draft grid: layout, number placement, ascending fix-up.
fn draft_grid<R: Rng>(rng: &mut R) -> Grid {
    let assigned = draft_layout(rng);
    let mut grid: Grid = [[None; COLUMNS]; ROWS];

    for column in 0..COLUMNS {
        let rows: Vec<usize> = (0..ROWS).filter(|&row| assigned[column][row]).collect();
        if rows.is_empty() {
            continue;
        }
        let mut pool = ColumnPool::new_shuffled(rng, column);
        for (&row, value) in rows.iter().zip(pool.draw_n(rows.len())) {
            grid[row][column] = Some(value);
        }
    }

    // Sort each column's values while keeping its occupied rows unchanged.
    for column in 0..COLUMNS {
        let mut rows = Vec::new();
        let mut values = Vec::new();
        for row in 0..ROWS {
            if let Some(value) = grid[row][column] {
                rows.push(row);
                values.push(value);
            }
        }
        values.sort_unstable();
        for (row, value) in rows.into_iter().zip(values) {
            grid[row][column] = Some(value);
        }
    }

    grid
}

fn finish_draft(grid: Grid) -> Card {
    let mut numbers: Vec<u8> = grid.iter().flatten().flatten().copied().collect();
    numbers.sort_unstable();
    Card { id: next_card_id(), grid, numbers, is_winning: false }
}

/// Generate one structurally valid card, redrawing rejected drafts.
pub fn generate_card_with<R: Rng>(rng: &mut R) -> Result<Card> {
    for _ in 0..MAX_CARD_ATTEMPTS {
        let card = finish_draft(draft_grid(rng));
        if validate(&card).ok() {
            return Ok(card);
        }
    }
    Err(BankoError::GenerationExhausted { attempts: MAX_CARD_ATTEMPTS })
}

/// Generate `count` cards with pairwise distinct number sets.
///
/// A card duplicating an already-accepted signature is skipped but still
/// consumes the attempt budget. Running out of budget reports the partial
/// count instead of silently truncating the batch.
pub fn generate_batch_with<R: Rng>(rng: &mut R, count: usize) -> Result<Vec<Card>> {
    if count == 0 {
        return Err(BankoError::InvalidConfiguration {
            message: "batch size must be at least 1".to_string(),
        });
    }

    let budget = count * BATCH_ATTEMPT_FACTOR;
    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(count);

    for _ in 0..budget {
        if cards.len() == count {
            break;
        }
        let card = generate_card_with(rng)?;
        if seen.insert(signature(&card)) {
            cards.push(card);
        }
    }

    if cards.len() < count {
        return Err(BankoError::BatchIncomplete { produced: cards.len(), requested: count });
    }
    Ok(cards)
}

/// Generate a batch from a [`BatchRequest`].
///
/// A fixed `rng_seed` reproduces the exact same grids every time; `None`
/// seeds from entropy.
pub fn generate_batch(request: BatchRequest) -> Result<Vec<Card>> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_batch_with(&mut rng, request.count)
}

/// Generate a single card from entropy.
pub fn generate_card() -> Result<Card> {
    let mut rng = StdRng::from_entropy();
    generate_card_with(&mut rng)
}
