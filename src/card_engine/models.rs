use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

/// Rows per card.
pub const ROWS: usize = 3;
/// Columns per card.
pub const COLUMNS: usize = 9;
/// Numbers each row must hold.
pub const NUMBERS_PER_ROW: usize = 5;
/// Numbers each card must hold in total.
pub const NUMBERS_PER_CARD: usize = 15;
/// Upper bound on numbers in a single column.
pub const MAX_PER_COLUMN: usize = 3;

/// The 3×9 card grid; `None` is a blank cell.
///
/// The shape is fixed by the type, so "3 rows, 9 columns" needs no runtime
/// check — only the placement rules do.
pub type Grid = [[Option<u8>; COLUMNS]; ROWS];

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// One banko card: a 3×9 grid carrying 15 numbers.
///
/// `numbers` is the sorted flat list of the grid's values and is derived
/// once at creation; the two representations must always agree. `id` is
/// process-unique and never reused, even across rejected drafts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub grid: Grid,
    pub numbers: Vec<u8>,
    /// Set by the prank optimizer; `false` everywhere else.
    #[serde(default)]
    pub is_winning: bool,
}

impl Card {
    /// Whether `value` is placed anywhere on this card.
    pub fn contains(&self, value: u8) -> bool {
        self.numbers.binary_search(&value).is_ok()
    }
}

impl fmt::Display for Card {
    /// Render the grid as three rows of right-aligned cells, blanks as `--`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(v) => format!("{v:>2}"),
                    None => "--".to_string(),
                })
                .collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// Input for batch generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// How many mutually unique cards to produce.
    pub count: usize,
    /// Fixed seed for reproducible output; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl BatchRequest {
    /// Minimal constructor: entropy-seeded batch of `count` cards.
    pub fn new(count: usize) -> Self {
        BatchRequest { count, rng_seed: None }
    }
}

/// Input for a prank run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrankRequest {
    /// Total cards to generate and hand out.
    pub total_cards: usize,
    /// How many of them may reach full house; must be below `total_cards`.
    pub winning_count: usize,
    /// Fixed seed for reproducible output; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl PrankRequest {
    /// Minimal constructor: entropy-seeded prank run.
    pub fn new(total_cards: usize, winning_count: usize) -> Self {
        PrankRequest { total_cards, winning_count, rng_seed: None }
    }
}

/// Output of a prank run: the batch, the chosen winners, and the numbers
/// the caller must withhold from the draw.
///
/// When the plan is effective, every card in `winning_ids` carries none of
/// `excluded_numbers` while every other card carries at least one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrankResult {
    pub cards: Vec<Card>,
    pub winning_ids: Vec<String>,
    pub excluded_numbers: Vec<u8>,
}

impl PrankResult {
    /// `false` means no safe exclusion set was found and the run degraded
    /// to an empty exclusion list: nothing is withheld and the partition
    /// guarantee does not hold. Re-run with different parameters.
    pub fn is_effective(&self) -> bool {
        !self.excluded_numbers.is_empty()
    }
}
