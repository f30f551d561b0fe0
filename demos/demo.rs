//! End-to-end demo of batch generation and prank mode.
//!
//! Run with: `cargo run --example demo`
//!
//! This example shows how `banko_prank_gen` works end to end:
//!
//! 1. **Batch generation** — a seeded batch of cards, printed as grids, so
//!    the output is deterministic and reproducible.
//! 2. **Prank mode** — a rigged game where only three cards can reach full
//!    house, with the caller sheet listing the numbers to withhold.
//!
//! ## Key concepts demonstrated
//!
//! - `BatchRequest::new(count)` — minimal one-argument constructor; seeds
//!   from entropy. Set `rng_seed: Some(u64)` for fully deterministic output.
//! - Every returned card has already passed validation; `validate` is only
//!   needed for cards built elsewhere.
//! - `PrankResult::is_effective()` distinguishes a real exclusion plan from
//!   the degraded empty-set fallback.

use banko_prank_gen::{
    export, generate_batch, run_prank, validate, BatchRequest, PrankRequest,
};

fn main() {
    // ── Seeded batch ─────────────────────────────────────────────────────────
    println!();
    println!("══ Batch of 4 cards (seed=42) ══");
    println!();

    let cards = generate_batch(BatchRequest { count: 4, rng_seed: Some(42) })
        .expect("batch generation failed");
    for card in &cards {
        println!("  Card {}", card.id);
        for line in card.to_string().lines() {
            println!("    {line}");
        }
        println!("  valid: {}", validate(card).ok());
        println!();
    }

    // ── Prank mode ───────────────────────────────────────────────────────────
    // 12 cards, 3 winners: the other 9 each miss at least one withheld number.
    println!("══ Prank: 3 winners out of 12 (seed=7) ══");
    println!();

    let prank = run_prank(PrankRequest {
        total_cards: 12,
        winning_count: 3,
        rng_seed: Some(7),
    })
    .expect("prank run failed");

    println!("  winners:  {:?}", prank.winning_ids);
    println!("  withhold: {:?}", prank.excluded_numbers);
    println!("  effective: {}", prank.is_effective());
    println!();

    for line in export::operator_sheet(&prank).lines() {
        println!("  {line}");
    }

    // ── JSON export ──────────────────────────────────────────────────────────
    println!();
    println!("══ JSON document (with metadata) ══");
    println!();
    let doc = export::prank_document(&prank, true);
    println!("{}", serde_json::to_string_pretty(&doc).expect("serialization failed"));
}
