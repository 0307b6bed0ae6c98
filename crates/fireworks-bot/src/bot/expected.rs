use fireworks_core::model::card::Card;
use fireworks_core::understanding::{
    CLUE_TOKEN_MAX, GlobalUnderstanding, PLAYER_COUNT, UnderstandingError,
};

/// The deterministic move both partners assume of each other when
/// projecting a candidate forward. Applies the move to `state` and to
/// `hand`, the player's true cards newest first; a simulated
/// replacement draw inserts a placeholder identity.
///
/// Priority: identified play, instructed play, forced stall at full
/// tokens, pace-preserving stall, instructed trash, known trash, chop,
/// locked stall, newest unclued discard, slot 0 discard.
pub fn expected_move(
    state: &mut GlobalUnderstanding,
    player: usize,
    hand: &mut Vec<Card>,
) -> Result<(), UnderstandingError> {
    if state.turns_left() == Some(0) {
        return Ok(());
    }

    if let Some(slot) = state.good_touch_plays(player).first().map(|(slot, _)| *slot) {
        let identity = take_slot(state, hand, slot);
        return state.play(player, identity, slot);
    }
    if let Some(slot) = state.instructed_play_slots(player).first().copied() {
        let identity = take_slot(state, hand, slot);
        return state.play(player, identity, slot);
    }

    if state.clue_tokens() == CLUE_TOKEN_MAX {
        return state.stall();
    }
    if state.clue_tokens() >= 1 {
        let partner = (player + 1) % PLAYER_COUNT;
        if state.pace_adjusted(player, partner, hand) <= 0 {
            // Discarding here throws away a turn the score still needs.
            return state.stall();
        }
    }

    if let Some(slot) = state.instructed_trash_slots(player).first().copied() {
        let identity = take_slot(state, hand, slot);
        return state.discard(player, identity, slot);
    }
    if let Some(slot) = state.known_trash_slots(player).first().copied() {
        let identity = take_slot(state, hand, slot);
        return state.discard(player, identity, slot);
    }
    if let Some(slot) = state.chop_slot(player) {
        let identity = take_slot(state, hand, slot);
        return state.discard(player, identity, slot);
    }
    if state.locked(player) && state.clue_tokens() > 0 {
        return state.stall();
    }
    if let Some(slot) = state.unclued_slots(player).first().copied() {
        let identity = take_slot(state, hand, slot);
        return state.discard(player, identity, slot);
    }

    let identity = take_slot(state, hand, 0);
    state.discard(player, identity, 0)
}

fn take_slot(state: &GlobalUnderstanding, hand: &mut Vec<Card>, slot: usize) -> Card {
    let identity = hand.remove(slot);
    if state.deck_size() > 0 {
        hand.insert(0, state.placeholder_draw());
    }
    identity
}
