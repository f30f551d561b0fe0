//! # banko_prank_gen
//!
//! A fully offline, deterministic generator for 90-ball banko cards, with a
//! prank mode that rigs the draw without touching the cards.
//!
//! Every card is a 3×9 grid with 15 numbers: five per row, at most three
//! per column, each column limited to its own number range (1–9, 10–19, …,
//! 80–90) in ascending order. Prank mode picks a winner subset from a
//! generated batch and computes the smallest set of numbers the caller must
//! quietly withhold from the bag so that only the chosen cards can ever
//! reach full house — every other card is guaranteed to be missing at least
//! one of its numbers.
//!
//! ## How it works
//!
//! 1. Build a [`BatchRequest`] or [`PrankRequest`] with a count and an
//!    optional RNG seed.
//! 2. Call [`generate_batch`] — the engine drafts cards by constrained
//!    random placement, validates each draft against the placement rules,
//!    and deduplicates the batch by number-set signature.
//! 3. For prank mode, call [`run_prank`] — the optimizer runs randomized
//!    winner-subset trials and blocks every non-winner with a greedy
//!    set-cover over the safely excludable numbers.
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` to reproduce the exact
//!   same grids and exclusion plan every time — useful for tests and for
//!   re-printing a batch.
//! - **Always valid**: a card handed back has passed every placement rule;
//!   [`validate`] is also exposed for externally supplied cards and reports
//!   all violations at once.
//! - **Honest degradation**: when no safe exclusion set exists the prank
//!   result carries an empty exclusion list, flagged by
//!   [`PrankResult::is_effective`], never a silently wrong plan.
//!
//! ## Quick start
//!
//! ```rust
//! use banko_prank_gen::{generate_batch, run_prank, validate, BatchRequest, PrankRequest};
//!
//! // Reproducible batch: fixed seed = same cards every time.
//! let cards = generate_batch(BatchRequest { count: 10, rng_seed: Some(42) }).unwrap();
//! assert!(cards.iter().all(|card| validate(card).ok()));
//! println!("{}", cards[0]);
//!
//! // Prank mode: 3 of the 10 cards can complete, the rest never can.
//! let prank = run_prank(PrankRequest {
//!     total_cards: 10,
//!     winning_count: 3,
//!     rng_seed: Some(7),
//! })
//! .unwrap();
//! println!("withhold from the draw: {:?}", prank.excluded_numbers);
//! ```

pub mod card_engine;
pub mod export;

// Convenience re-exports so callers can use `banko_prank_gen::generate_batch`
// directly without reaching into `card_engine::`.
pub use card_engine::{
    generate_batch, generate_card, run_prank, signature, validate, BankoError,
    BatchRequest, Card, Grid, PrankRequest, PrankResult, Result, ValidationReport,
    Violation,
};
