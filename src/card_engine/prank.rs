//! Prank planning: choose which cards may win and compute the smallest set
//! of numbers to withhold from the draw so every other card is blocked.
//!
//! Blocking is a weighted set-cover problem: each non-winning card is a
//! target, each safely excludable number covers the targets that carry it.
//! The greedy approximation is good enough here — the plan only needs to be
//! locally non-wasteful, not provably minimal — and the winner subset is
//! re-drawn across randomized trials because the achievable exclusion size
//! depends heavily on which cards end up as winners.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::card_engine::error::{BankoError, Result};
use crate::card_engine::generator::generate_batch_with;
use crate::card_engine::models::{Card, PrankRequest, PrankResult};

/// Randomized winner-subset trials before falling back.
pub const MAX_TRIALS: usize = 100;

// Scoring policy for feasible plans. The sweet spot ends the search early;
// sizes past the soft cap are penalized harder because a long withheld-number
// list is what players notice first. Policy knobs, not part of the contract.
const SWEET_MIN: usize = 5;
const SWEET_MAX: usize = 15;
const SOFT_CAP: usize = 20;

/// Winner ids and exclusion numbers for one candidate selection.
#[derive(Debug, Clone)]
pub struct PrankPlan {
    pub winning_ids: Vec<String>,
    pub excluded_numbers: Vec<u8>,
}

/// Distance of an exclusion-set size from the sweet spot; lower is better,
/// zero short-circuits the trial loop.
fn exclusion_score(len: usize) -> usize {
    if len < SWEET_MIN {
        SWEET_MIN - len
    } else if len <= SWEET_MAX {
        0
    } else if len <= SOFT_CAP {
        len - SWEET_MAX
    } else {
        (SOFT_CAP - SWEET_MAX) + (len - SOFT_CAP) * 3
    }
}

/// Block every non-winning card with greedily chosen safe numbers.
///
/// Only numbers absent from every winning card may be excluded. Each round
/// takes the number covering the most still-unblocked cards, lowest number
/// on ties, so the result is reproducible for a fixed winner subset. A
/// number with zero marginal coverage is never taken.
///
/// Returns `None` when some non-winning card cannot be blocked at all —
/// its entire number set overlaps the winners' numbers.
fn greedy_exclusions(cards: &[Card], winners: &[bool]) -> Option<Vec<u8>> {
    let win_numbers: HashSet<u8> = cards
        .iter()
        .zip(winners)
        .filter(|(_, &winning)| winning)
        .flat_map(|(card, _)| card.numbers.iter().copied())
        .collect();

    let targets: Vec<usize> = (0..cards.len()).filter(|&i| !winners[i]).collect();

    // Safe pool: numbers on some non-winning card but on no winning card.
    // BTreeMap keeps candidates ascending for deterministic tie-breaking.
    let mut coverage: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (target, &card_idx) in targets.iter().enumerate() {
        for &number in &cards[card_idx].numbers {
            if !win_numbers.contains(&number) {
                coverage.entry(number).or_default().push(target);
            }
        }
    }

    let mut blocked = vec![false; targets.len()];
    let mut remaining = targets.len();
    let mut excluded = Vec::new();

    while remaining > 0 {
        let mut best: Option<(u8, usize)> = None;
        for (&number, covered) in &coverage {
            let gain = covered.iter().filter(|&&t| !blocked[t]).count();
            if gain > best.map_or(0, |(_, g)| g) {
                best = Some((number, gain));
            }
        }
        let (number, _) = best?;
        for &target in &coverage[&number] {
            if !blocked[target] {
                blocked[target] = true;
                remaining -= 1;
            }
        }
        excluded.push(number);
        coverage.remove(&number);
    }

    excluded.sort_unstable();
    Some(excluded)
}

/// Draw a random subset of `count` distinct card indices.
fn draw_winners<R: Rng>(rng: &mut R, total: usize, count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..total).collect();
    // Fisher-Yates shuffle
    for i in (1..indices.len()).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }
    indices.truncate(count);
    indices
}

/// Search for a winner subset whose exclusion set is small and safe.
///
/// Up to [`MAX_TRIALS`] randomized winner draws are scored; infeasible
/// trials (an unblockable non-winner) are discarded, and a plan landing in
/// the sweet spot ends the search early. When no trial is feasible, the
/// first `winning_count` cards become the winners with an empty exclusion
/// set — a degraded outcome that callers detect via
/// [`PrankResult::is_effective`].
pub fn optimize_with<R: Rng>(rng: &mut R, cards: &[Card], winning_count: usize) -> PrankPlan {
    debug_assert!(winning_count >= 1 && winning_count < cards.len());

    let mut best: Option<(usize, Vec<usize>, Vec<u8>)> = None;

    for _ in 0..MAX_TRIALS {
        let winner_idx = draw_winners(rng, cards.len(), winning_count);
        let mut winners = vec![false; cards.len()];
        for &i in &winner_idx {
            winners[i] = true;
        }

        let Some(excluded) = greedy_exclusions(cards, &winners) else {
            continue;
        };
        let score = exclusion_score(excluded.len());
        if best.as_ref().map_or(true, |(s, _, _)| score < *s) {
            let done = score == 0;
            best = Some((score, winner_idx, excluded));
            if done {
                break;
            }
        }
    }

    match best {
        Some((_, winner_idx, excluded)) => PrankPlan {
            winning_ids: winner_idx.iter().map(|&i| cards[i].id.clone()).collect(),
            excluded_numbers: excluded,
        },
        None => PrankPlan {
            winning_ids: cards
                .iter()
                .take(winning_count)
                .map(|card| card.id.clone())
                .collect(),
            excluded_numbers: Vec::new(),
        },
    }
}

/// Generate a batch and plan the prank for it.
///
/// Configuration is rejected before any generation work: the batch must be
/// non-empty and the winning count must leave at least one card to block.
pub fn run_prank(request: PrankRequest) -> Result<PrankResult> {
    if request.total_cards == 0 {
        return Err(BankoError::InvalidConfiguration {
            message: "total card count must be at least 1".to_string(),
        });
    }
    if request.winning_count == 0 || request.winning_count >= request.total_cards {
        return Err(BankoError::InvalidConfiguration {
            message: format!(
                "winning count must be between 1 and {}",
                request.total_cards - 1
            ),
        });
    }

    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let mut cards = generate_batch_with(&mut rng, request.total_cards)?;
    let plan = optimize_with(&mut rng, &cards, request.winning_count);

    let winner_ids: HashSet<&str> = plan.winning_ids.iter().map(String::as_str).collect();
    for card in &mut cards {
        card.is_winning = winner_ids.contains(card.id.as_str());
    }

    Ok(PrankResult {
        cards,
        winning_ids: plan.winning_ids,
        excluded_numbers: plan.excluded_numbers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_engine::models::{Grid, COLUMNS, ROWS};

    /// Card stub for cover tests: only `id` and `numbers` matter here.
    fn card(id: &str, numbers: &[u8]) -> Card {
        let mut numbers = numbers.to_vec();
        numbers.sort_unstable();
        let grid: Grid = [[None; COLUMNS]; ROWS];
        Card { id: id.to_string(), grid, numbers, is_winning: false }
    }

    #[test]
    fn greedy_prefers_the_widest_covering_number() {
        // 40 blocks both non-winners in one pick; 41/42 would need two.
        let cards = vec![
            card("W", &[1, 2, 3]),
            card("L1", &[40, 41, 50]),
            card("L2", &[40, 42, 51]),
        ];
        let winners = vec![true, false, false];
        let excluded = greedy_exclusions(&cards, &winners).unwrap();
        assert_eq!(excluded, vec![40]);
    }

    #[test]
    fn greedy_breaks_ties_on_the_lowest_number() {
        // Both 40 and 41 cover exactly the one non-winner.
        let cards = vec![card("W", &[1, 2]), card("L", &[40, 41])];
        let winners = vec![true, false];
        let excluded = greedy_exclusions(&cards, &winners).unwrap();
        assert_eq!(excluded, vec![40]);
    }

    #[test]
    fn greedy_reports_an_unblockable_card() {
        // The non-winner's numbers all appear on a winner.
        let cards = vec![
            card("W1", &[1, 2, 3]),
            card("W2", &[4, 5, 6]),
            card("L", &[1, 4, 5]),
        ];
        let winners = vec![true, true, false];
        assert!(greedy_exclusions(&cards, &winners).is_none());
    }

    #[test]
    fn winner_numbers_never_enter_the_exclusion_set() {
        let cards = vec![
            card("W", &[10, 20, 30]),
            card("L1", &[10, 40, 50]),
            card("L2", &[20, 41, 50]),
        ];
        let winners = vec![true, false, false];
        let excluded = greedy_exclusions(&cards, &winners).unwrap();
        for &number in &excluded {
            assert!(!cards[0].contains(number));
        }
    }
}
