//! JSON documents and the plain-text caller sheet built from generated data.
//!
//! Everything here is a read-only view over the core data model: nothing
//! mutates a card, and the grid/number data passes through unchanged. The
//! JSON shape is what the download endpoints serve to clients; the text
//! sheet is for the person calling out numbers on game night.

use chrono::Utc;
use serde_json::{json, Value};

use crate::card_engine::models::{Card, PrankResult};

fn card_entry(card: &Card, mark_winner: bool) -> Value {
    let mut entry = json!({
        "id": card.id,
        "grid": card.grid,
        "numbers": card.numbers,
    });
    if mark_winner {
        entry["is_winning"] = json!(card.is_winning);
    }
    entry
}

/// Map a generated batch to a JSON document ready for download.
///
/// `with_meta` adds the generation timestamp and the card count header.
pub fn batch_document(cards: &[Card], with_meta: bool) -> Value {
    let mut doc = json!({
        "cards": cards.iter().map(|c| card_entry(c, false)).collect::<Vec<_>>(),
    });
    if with_meta {
        doc["generated_at"] = json!(Utc::now().to_rfc3339());
        doc["card_count"] = json!(cards.len());
    }
    doc
}

/// Map a prank run to a JSON document: the batch plus winner ids and the
/// numbers to withhold from the draw.
pub fn prank_document(result: &PrankResult, with_meta: bool) -> Value {
    let mut doc = json!({
        "cards": result.cards.iter().map(|c| card_entry(c, true)).collect::<Vec<_>>(),
        "winning_ids": result.winning_ids,
        "excluded_numbers": result.excluded_numbers,
    });
    if with_meta {
        doc["generated_at"] = json!(Utc::now().to_rfc3339());
        doc["card_count"] = json!(result.cards.len());
        doc["winning_count"] = json!(result.winning_ids.len());
        doc["excluded_count"] = json!(result.excluded_numbers.len());
    }
    doc
}

/// Build the plain-text instruction sheet for the number caller.
///
/// Lists the numbers that must never be drawn and the cards that can still
/// reach full house. A degraded run (no safe exclusion set found) is called
/// out explicitly instead of printing an empty withhold list.
pub fn operator_sheet(result: &PrankResult) -> String {
    let mut out = String::new();
    out.push_str("BANKO CALLER SHEET\n");
    out.push_str("==================\n\n");

    if result.is_effective() {
        out.push_str("Never draw these numbers:\n");
        for chunk in result.excluded_numbers.chunks(10) {
            let line: Vec<String> = chunk.iter().map(|n| format!("{n:>2}")).collect();
            out.push_str("  ");
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out.push_str("\nCards that can reach full house:\n");
        for id in &result.winning_ids {
            out.push_str("  ");
            out.push_str(id);
            out.push('\n');
        }
        out.push_str("\nEvery other card is blocked by at least one withheld number.\n");
    } else {
        out.push_str("No safe exclusion set was found for this batch.\n");
        out.push_str("All numbers stay in play; re-run with a different card or winner count.\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_engine::generator::generate_batch;
    use crate::card_engine::models::{BatchRequest, PrankRequest};
    use crate::card_engine::prank::run_prank;

    #[test]
    fn batch_document_carries_every_card() {
        let cards = generate_batch(BatchRequest { count: 4, rng_seed: Some(11) }).unwrap();
        let doc = batch_document(&cards, true);

        assert_eq!(doc["cards"].as_array().unwrap().len(), 4);
        assert_eq!(doc["card_count"], 4);
        assert!(doc["generated_at"].is_string());
        // Cards are exported without the winner flag outside prank mode.
        assert!(doc["cards"][0].get("is_winning").is_none());
    }

    #[test]
    fn prank_document_flags_winners() {
        let result = run_prank(PrankRequest {
            total_cards: 6,
            winning_count: 2,
            rng_seed: Some(3),
        })
        .unwrap();
        let doc = prank_document(&result, true);

        assert_eq!(doc["winning_count"], 2);
        assert_eq!(doc["excluded_count"], result.excluded_numbers.len());
        let flagged = doc["cards"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|c| c["is_winning"] == true)
            .count();
        assert_eq!(flagged, 2);
    }

    #[test]
    fn operator_sheet_lists_exclusions_and_winners() {
        let result = run_prank(PrankRequest {
            total_cards: 10,
            winning_count: 3,
            rng_seed: Some(21),
        })
        .unwrap();
        let sheet = operator_sheet(&result);

        if result.is_effective() {
            assert!(sheet.contains("Never draw these numbers:"));
            for id in &result.winning_ids {
                assert!(sheet.contains(id.as_str()), "sheet must list winner {id}");
            }
        } else {
            assert!(sheet.contains("No safe exclusion set"));
        }
    }
}
