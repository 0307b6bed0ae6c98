use crate::bot::EngineFeatures;
use crate::bot::expected::expected_move;
use fireworks_core::game::Decision;
use fireworks_core::model::card::Card;
use fireworks_core::model::clue::ClueValue;
use fireworks_core::model::rank::Rank;
use fireworks_core::model::suit::Suit;
use fireworks_core::understanding::{
    CLUE_TOKEN_MAX, GlobalUnderstanding, PLAYER_COUNT, UnderstandingError,
};
use rayon::prelude::*;
use tracing::{Level, event};

/// Projected outcome of a candidate after the partner's expected
/// response. Field order is the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Projection {
    score: i32,
    negated_strikes: i32,
    unlocked: bool,
    negated_bdrs: i32,
}

/// Clue candidates additionally rank by tempo, and the clue value
/// itself breaks exact ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ClueOutcome {
    score: i32,
    negated_strikes: i32,
    tempo: i32,
    unlocked: bool,
    negated_bdrs: i32,
    value: ClueValue,
}

/// Ties on the full key prefer plays over discards over clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MoveKind {
    Clue,
    Discard,
    Play,
}

/// Picks the move for `player` by simulating each candidate against
/// the shared understanding plus the partner's visible hand, then
/// letting the partner respond with [`expected_move`].
pub fn find_best_move(
    state: &GlobalUnderstanding,
    player: usize,
    partner_hand: &[Card],
    features: EngineFeatures,
) -> Result<Decision, UnderstandingError> {
    let partner = (player + 1) % PLAYER_COUNT;

    // Baseline: what the position is worth if this turn changes
    // nothing and the partner simply responds.
    let mut baseline_sim = state.clone();
    let mut baseline_hand = partner_hand.to_vec();
    expected_move(&mut baseline_sim, partner, &mut baseline_hand)?;
    let baseline = Projection {
        score: baseline_sim.max_score_adjusted(player, player, &baseline_hand),
        negated_strikes: -(baseline_sim.strikes() as i32),
        unlocked: !baseline_sim.locked(partner),
        negated_bdrs: -bad_discard_risk(state, &baseline_sim),
    };

    let best_play = best_play_candidate(state, player, partner, partner_hand, baseline, features)?;
    let best_clue = best_clue_candidate(state, player, partner, partner_hand, features)?;
    let best_discard = best_discard_candidate(state, player, partner, partner_hand, best_play.is_some())?;

    // Bad-discard risk only separates candidates when tokens are
    // plentiful enough that burning one is a real alternative.
    let gate = |negated_bdrs: i32| {
        if state.clue_tokens() >= 4 {
            negated_bdrs
        } else {
            0
        }
    };

    let mut ranked: Vec<((i32, i32, bool, i32, MoveKind), Decision)> = Vec::new();
    if let Some((projection, slot)) = best_play {
        ranked.push((
            (
                projection.score,
                projection.negated_strikes,
                projection.unlocked,
                gate(projection.negated_bdrs),
                MoveKind::Play,
            ),
            Decision::Play { slot },
        ));
    }
    if let Some(outcome) = best_clue {
        ranked.push((
            (
                outcome.score,
                outcome.negated_strikes,
                outcome.unlocked,
                gate(outcome.negated_bdrs),
                MoveKind::Clue,
            ),
            Decision::Clue {
                receiver: partner,
                value: outcome.value,
            },
        ));
    }
    if let Some((score, negated_strikes, slot)) = best_discard {
        ranked.push((
            (
                score,
                negated_strikes,
                baseline.unlocked,
                gate(baseline.negated_bdrs),
                MoveKind::Discard,
            ),
            Decision::Discard { slot },
        ));
    }

    let decision = ranked
        .into_iter()
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, decision)| decision)
        .unwrap_or(Decision::Discard { slot: 0 });
    Ok(decision)
}

fn best_play_candidate(
    state: &GlobalUnderstanding,
    player: usize,
    partner: usize,
    partner_hand: &[Card],
    baseline: Projection,
    features: EngineFeatures,
) -> Result<Option<(Projection, usize)>, UnderstandingError> {
    // Newest-slot wins ties, so track the negated slot in the key.
    let mut best: Option<(Projection, i32)> = None;
    for (slot, plausible) in state.good_touch_plays(player) {
        let projection = if let Some(identity) = plausible.sole() {
            let mut sim = state.clone();
            let mut sim_hand = partner_hand.to_vec();
            sim.play(player, identity, slot)?;
            expected_move(&mut sim, partner, &mut sim_hand)?;
            Projection {
                score: sim.max_score_adjusted(player, player, &sim_hand),
                negated_strikes: -(sim.strikes() as i32),
                unlocked: !sim.locked(partner),
                negated_bdrs: -bad_discard_risk(state, &sim),
            }
        } else {
            // Unknown exact identity: the play is sound either way,
            // score it as keeping the baseline.
            baseline
        };
        if features.log_candidates() {
            log_candidate("play", slot, projection.score);
        }
        let entry = (projection, -(slot as i32));
        best = Some(match best {
            Some(current) if current >= entry => current,
            _ => entry,
        });
    }
    if best.is_none() {
        if let Some(slot) = state.instructed_play_slots(player).first().copied() {
            best = Some((baseline, -(slot as i32)));
        }
    }
    Ok(best.map(|(projection, negated_slot)| (projection, (-negated_slot) as usize)))
}

fn best_clue_candidate(
    state: &GlobalUnderstanding,
    player: usize,
    partner: usize,
    partner_hand: &[Card],
    features: EngineFeatures,
) -> Result<Option<ClueOutcome>, UnderstandingError> {
    if state.clue_tokens() == 0 {
        return Ok(None);
    }
    let candidates = possible_clues(partner_hand);

    let evaluate = |candidate: &(ClueValue, Vec<usize>)| -> Result<ClueOutcome, UnderstandingError> {
        let (value, touching) = candidate;
        let mut sim = state.clone();
        let mut sim_hand = partner_hand.to_vec();
        sim.clue(partner, *value, touching)?;
        expected_move(&mut sim, partner, &mut sim_hand)?;
        let score = sim.max_score_adjusted(player, player, &sim_hand);
        let tempo = sim.score() as i32
            + sim.instructed_play_slots(partner).len() as i32
            + sim.good_touch_plays(partner).len() as i32;
        let unlocked = !sim.locked(partner);
        let negated_bdrs = -bad_discard_risk(state, &sim);
        // Let the partner keep responding while the clue still pays
        // out, so delayed misplays surface in the strike count.
        let mut current = sim.score();
        expected_move(&mut sim, partner, &mut sim_hand)?;
        while sim.score() > current {
            current = sim.score();
            expected_move(&mut sim, partner, &mut sim_hand)?;
        }
        Ok(ClueOutcome {
            score,
            negated_strikes: -(sim.strikes() as i32),
            tempo,
            unlocked,
            negated_bdrs,
            value: *value,
        })
    };

    let outcomes: Vec<ClueOutcome> = if features.parallel_search() {
        candidates
            .par_iter()
            .map(evaluate)
            .collect::<Result<_, _>>()?
    } else {
        candidates.iter().map(evaluate).collect::<Result<_, _>>()?
    };
    if features.log_candidates() {
        for outcome in &outcomes {
            log_candidate("clue", outcome.tempo as usize, outcome.score);
        }
    }
    Ok(outcomes.into_iter().max())
}

fn best_discard_candidate(
    state: &GlobalUnderstanding,
    player: usize,
    partner: usize,
    partner_hand: &[Card],
    has_play: bool,
) -> Result<Option<(i32, i32, usize)>, UnderstandingError> {
    if state.clue_tokens() >= CLUE_TOKEN_MAX {
        return Ok(None);
    }

    let mut avoid = false;
    let slot = if let Some(slot) = state.instructed_trash_slots(player).first().copied() {
        slot
    } else if let Some(slot) = state.known_trash_slots(player).first().copied() {
        slot
    } else if let Some(slot) = state.chop_slot(player) {
        slot
    } else {
        // Nothing marked safe. A blind discard is still on the table,
        // but never preferred over a play and never out of a lock.
        if state.locked(player) || has_play {
            avoid = true;
        }
        state.unclued_slots(player).first().copied().unwrap_or(0)
    };

    let identity = state
        .hand(player)
        .slot(slot)
        .map(|belief| {
            let mut candidates: Vec<Card> = belief
                .possibilities
                .iter()
                .filter(|card| !state.useful(*card))
                .collect();
            if candidates.is_empty() {
                candidates = belief.possibilities.iter().collect();
            }
            candidates
                .into_iter()
                .min_by_key(|card| (card.rank.value(), card.suit.index()))
        })
        .flatten()
        .unwrap_or(state.placeholder_draw());

    let mut sim = state.clone();
    let mut sim_hand = partner_hand.to_vec();
    sim.discard(player, identity, slot)?;
    expected_move(&mut sim, partner, &mut sim_hand)?;
    let score = if avoid {
        0
    } else {
        sim.max_score_adjusted(player, player, &sim_hand)
    };
    Ok(Some((score, -(sim.strikes() as i32), slot)))
}

/// Still-useful copies the projection burned relative to the starting
/// position. High risk means the line leans on discards that might hit
/// cards the score needs.
fn bad_discard_risk(before: &GlobalUnderstanding, after: &GlobalUnderstanding) -> i32 {
    Card::all()
        .filter(|card| after.useful(*card))
        .map(|card| before.usable_copies(card) as i32 - after.usable_copies(card) as i32)
        .sum()
}

/// Every legal clue against `hand`: one candidate per suit and rank
/// with at least one touched card.
fn possible_clues(hand: &[Card]) -> Vec<(ClueValue, Vec<usize>)> {
    let mut clues = Vec::new();
    for suit in Suit::ALL {
        let value = ClueValue::Suit(suit);
        let touching = value.touched_slots(hand);
        if !touching.is_empty() {
            clues.push((value, touching));
        }
    }
    for rank in Rank::ORDERED {
        let value = ClueValue::Rank(rank);
        let touching = value.touched_slots(hand);
        if !touching.is_empty() {
            clues.push((value, touching));
        }
    }
    clues
}

fn log_candidate(kind: &str, detail: usize, score: i32) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "fireworks_bot::search",
        Level::DEBUG,
        kind,
        detail,
        score,
    );
}
