mod convention;
pub mod ledger;

pub use ledger::ResourceLedger;

use crate::belief::{BeliefHand, CardId, PossibilitySet};
use crate::model::card::Card;
use crate::model::clue::ClueValue;
use crate::model::deck::DECK_SIZE;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::array;
use thiserror::Error;

pub const PLAYER_COUNT: usize = 2;
pub const HAND_SIZE: usize = 5;
pub const CLUE_TOKEN_MAX: u8 = 8;
pub const STRIKE_LIMIT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnderstandingError {
    #[error("no clue tokens available")]
    NoClueTokens,
    #[error("clue tokens already at maximum")]
    ClueTokensFull,
    #[error("slot {0} out of range")]
    SlotOutOfRange(usize),
}

/// Per-player instructed actions decoded from clues. Entries key on
/// stable card ids, so a card leaving the hand drops its own entries
/// and leaves every other entry meaning the same physical card.
#[derive(Debug, Clone, Default)]
pub(crate) struct Instructions {
    pub(crate) plays: Vec<CardId>,
    pub(crate) trash: Vec<CardId>,
    pub(crate) chop: Option<CardId>,
    pub(crate) lock: bool,
}

impl Instructions {
    pub(crate) fn forget(&mut self, id: CardId) {
        self.plays.retain(|entry| *entry != id);
        self.trash.retain(|entry| *entry != id);
        if self.chop == Some(id) {
            self.chop = None;
        }
    }

    pub(crate) fn clear_stall_state(&mut self) {
        self.chop = None;
        self.lock = false;
    }

    pub(crate) fn references(&self, id: CardId) -> bool {
        self.plays.contains(&id) || self.trash.contains(&id)
    }
}

/// The single mutable aggregate both players can derive from public
/// information: token/strike/stack bookkeeping, the belief state for
/// every hand, the copy ledger, and the instructed-action queues.
#[derive(Debug, Clone)]
pub struct GlobalUnderstanding {
    clue_tokens: u8,
    strikes: u8,
    play_stacks: [u8; Suit::COUNT],
    max_stacks: [u8; Suit::COUNT],
    deck_size: usize,
    turns_left: Option<usize>,
    next_card_id: u32,
    ledger: ResourceLedger,
    hands: [BeliefHand; PLAYER_COUNT],
    pub(crate) instructed: [Instructions; PLAYER_COUNT],
}

impl GlobalUnderstanding {
    pub fn new() -> Self {
        let mut state = Self {
            clue_tokens: CLUE_TOKEN_MAX,
            strikes: 0,
            play_stacks: [0; Suit::COUNT],
            max_stacks: [5; Suit::COUNT],
            deck_size: DECK_SIZE,
            turns_left: None,
            next_card_id: 0,
            ledger: ResourceLedger::new(),
            hands: array::from_fn(|_| BeliefHand::new()),
            instructed: array::from_fn(|_| Instructions::default()),
        };
        for player in 0..PLAYER_COUNT {
            for _ in 0..HAND_SIZE {
                state.draw(player, None);
            }
        }
        state
    }

    pub fn clue_tokens(&self) -> u8 {
        self.clue_tokens
    }

    pub fn strikes(&self) -> u8 {
        self.strikes
    }

    pub fn play_stack(&self, suit: Suit) -> u8 {
        self.play_stacks[suit.index()]
    }

    pub fn max_stack(&self, suit: Suit) -> u8 {
        self.max_stacks[suit.index()]
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    pub fn turns_left(&self) -> Option<usize> {
        self.turns_left
    }

    pub fn hand(&self, player: usize) -> &BeliefHand {
        &self.hands[player]
    }

    pub fn unseen_copies(&self, card: Card) -> u8 {
        self.ledger.unseen(card)
    }

    pub fn usable_copies(&self, card: Card) -> u8 {
        self.ledger.usable(card)
    }

    pub fn locked(&self, player: usize) -> bool {
        self.instructed[player].lock
    }

    pub fn chop_slot(&self, player: usize) -> Option<usize> {
        self.instructed[player]
            .chop
            .and_then(|id| self.hands[player].position_of(id))
    }

    pub fn instructed_play_slots(&self, player: usize) -> Vec<usize> {
        self.instructed[player]
            .plays
            .iter()
            .filter_map(|id| self.hands[player].position_of(*id))
            .collect()
    }

    pub fn instructed_trash_slots(&self, player: usize) -> Vec<usize> {
        self.instructed[player]
            .trash
            .iter()
            .filter_map(|id| self.hands[player].position_of(*id))
            .collect()
    }

    pub fn unclued_slots(&self, player: usize) -> Vec<usize> {
        self.hands[player].unclued_slots()
    }

    /// A card still matters iff it sits above the play stack and below
    /// the reachable ceiling for its suit.
    pub fn useful(&self, card: Card) -> bool {
        let suit = card.suit.index();
        self.play_stacks[suit] < card.rank.value() && card.rank.value() <= self.max_stacks[suit]
    }

    pub fn playable(&self, card: Card) -> bool {
        self.play_stacks[card.suit.index()] + 1 == card.rank.value()
    }

    pub fn score(&self) -> u32 {
        self.play_stacks.iter().map(|height| *height as u32).sum()
    }

    pub fn max_score(&self) -> u32 {
        self.max_stacks.iter().map(|height| *height as u32).sum()
    }

    /// Removes the slot (if any), invalidating its instructed actions,
    /// and draws a replacement into slot 0 while the deck lasts. The
    /// draw that empties the deck starts the final-round countdown.
    pub fn draw(&mut self, player: usize, replacing: Option<usize>) {
        if let Some(slot) = replacing {
            let removed = self.hands[player].remove(slot);
            self.instructed[player].forget(removed.id);
            self.instructed[player].clear_stall_state();
        }
        if self.deck_size > 0 {
            self.deck_size -= 1;
            let id = CardId(self.next_card_id);
            self.next_card_id += 1;
            let possibilities = self.ledger.unseen_set();
            self.hands[player].push_newest(id, possibilities);
            if self.deck_size == 0 {
                self.turns_left = Some(PLAYER_COUNT);
            }
        }
    }

    /// Accounts for one copy of `identity` becoming visible. When the
    /// last unseen copy lands, no ambiguous slot anywhere can still
    /// hold it; removals that collapse a slot to a single identity
    /// reveal that identity in turn.
    pub fn reveal_copy(&mut self, identity: Card) {
        let mut queue = vec![identity];
        while let Some(card) = queue.pop() {
            if !self.ledger.reveal(card) {
                continue;
            }
            for hand in self.hands.iter_mut() {
                for belief in hand.iter_mut() {
                    if belief.possibilities.len() > 1 && belief.possibilities.remove(card) {
                        if let Some(solved) = belief.possibilities.sole() {
                            queue.push(solved);
                        }
                    }
                }
            }
        }
    }

    /// Accounts for one copy of `identity` leaving play. Losing the
    /// last copy of a still-useful identity caps the suit's reachable
    /// ceiling below it.
    pub fn discard_copy(&mut self, identity: Card) {
        if self.ledger.spend(identity) && self.useful(identity) {
            let suit = identity.suit.index();
            self.max_stacks[suit] = self.max_stacks[suit].min(identity.rank.value() - 1);
        }
    }

    pub fn play(
        &mut self,
        player: usize,
        identity: Card,
        slot: usize,
    ) -> Result<(), UnderstandingError> {
        if slot >= self.hands[player].len() {
            return Err(UnderstandingError::SlotOutOfRange(slot));
        }
        let suit = identity.suit.index();
        let rank = identity.rank.value();
        if self.play_stacks[suit] == rank - 1 {
            self.play_stacks[suit] = rank;
            if rank == 5 && self.clue_tokens < CLUE_TOKEN_MAX {
                self.clue_tokens += 1;
            }
        } else {
            self.strikes += 1;
            if self.strikes >= STRIKE_LIMIT {
                // Strikeout freezes the round at the current score.
                self.max_stacks = self.play_stacks;
                return Ok(());
            }
        }
        let misplayed = self.play_stacks[suit] != rank;
        let ambiguous = self.hands[player]
            .slot(slot)
            .map(|belief| belief.possibilities.len() > 1)
            .unwrap_or(false);

        if let Some(turns) = self.turns_left.as_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.instructed[player].clear_stall_state();
        self.draw(player, Some(slot));
        if ambiguous {
            self.reveal_copy(identity);
        }
        if misplayed {
            self.discard_copy(identity);
        }
        Ok(())
    }

    pub fn discard(
        &mut self,
        player: usize,
        identity: Card,
        slot: usize,
    ) -> Result<(), UnderstandingError> {
        if slot >= self.hands[player].len() {
            return Err(UnderstandingError::SlotOutOfRange(slot));
        }
        if self.clue_tokens >= CLUE_TOKEN_MAX {
            return Err(UnderstandingError::ClueTokensFull);
        }
        if let Some(turns) = self.turns_left.as_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.instructed[player].clear_stall_state();
        self.draw(player, Some(slot));
        self.reveal_copy(identity);
        self.discard_copy(identity);
        self.clue_tokens += 1;
        Ok(())
    }

    pub fn clue(
        &mut self,
        receiver: usize,
        value: ClueValue,
        touching: &[usize],
    ) -> Result<(), UnderstandingError> {
        if self.clue_tokens == 0 {
            return Err(UnderstandingError::NoClueTokens);
        }
        if let Some(slot) = touching
            .iter()
            .copied()
            .find(|slot| *slot >= self.hands[receiver].len())
        {
            return Err(UnderstandingError::SlotOutOfRange(slot));
        }
        // Snapshot before the literal filter lands. Deliberately does
        // not fold in what the clue reveals about the giver's own hand;
        // the convention is decoded against the receiver's prior view.
        let before = self.hands[receiver].clone();
        self.apply_information(receiver, value, touching);
        if let Some(turns) = self.turns_left.as_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.interpret_clue(receiver, &before, value, touching);
        self.clue_tokens -= 1;
        Ok(())
    }

    /// Intersects every undetermined slot with the clue's literal
    /// filter (touched slots keep matches, untouched keep the rest).
    pub fn apply_information(&mut self, receiver: usize, value: ClueValue, touching: &[usize]) {
        let mut solved = Vec::new();
        for (slot, belief) in self.hands[receiver].iter_mut().enumerate() {
            if belief.possibilities.len() == 1 {
                continue;
            }
            if touching.contains(&slot) {
                belief.possibilities.retain(|card| value.touches(card));
                belief.touched = true;
            } else {
                belief.possibilities.retain(|card| !value.touches(card));
            }
            if let Some(card) = belief.possibilities.sole() {
                solved.push(card);
            }
        }
        for card in solved {
            self.reveal_copy(card);
        }
    }

    pub fn stall(&mut self) -> Result<(), UnderstandingError> {
        if self.clue_tokens == 0 {
            return Err(UnderstandingError::NoClueTokens);
        }
        self.clue_tokens -= 1;
        Ok(())
    }

    /// Slots whose plausible useful identities are all playable right
    /// now, with the plausible set. Touched slots discount identities
    /// that are no longer useful (the clue would not have been wasted
    /// on trash), untouched slots must be playable under every reading.
    pub fn good_touch_plays(&self, player: usize) -> Vec<(usize, PossibilitySet)> {
        self.good_touch_plays_in(&self.hands[player])
    }

    pub(crate) fn good_touch_plays_in(&self, hand: &BeliefHand) -> Vec<(usize, PossibilitySet)> {
        hand.iter()
            .enumerate()
            .filter_map(|(slot, belief)| {
                let mut plausible = PossibilitySet::EMPTY;
                for card in belief.possibilities.iter() {
                    if !belief.touched || self.useful(card) {
                        plausible.insert(card);
                    }
                }
                if !plausible.is_empty() && plausible.iter().all(|card| self.playable(card)) {
                    Some((slot, plausible))
                } else {
                    None
                }
            })
            .collect()
    }

    /// A slot is known trash when every possible identity is either no
    /// longer useful or duplicated by another fully identified slot in
    /// the same hand.
    pub fn known_trash_slots(&self, player: usize) -> Vec<usize> {
        self.known_trash_slots_in(&self.hands[player])
    }

    pub(crate) fn known_trash_slots_in(&self, hand: &BeliefHand) -> Vec<usize> {
        (0..hand.len())
            .filter(|slot| self.is_known_trash_in(hand, *slot))
            .collect()
    }

    pub(crate) fn is_known_trash_in(&self, hand: &BeliefHand, slot: usize) -> bool {
        let Some(belief) = hand.slot(slot) else {
            return false;
        };
        belief.possibilities.iter().all(|card| {
            if !self.useful(card) {
                return true;
            }
            hand.iter()
                .enumerate()
                .any(|(other, b)| other != slot && b.possibilities.sole() == Some(card))
        })
    }

    /// Identity stood in for an unknown simulated draw: some identity
    /// that no longer matters, so the projection is not polluted with
    /// phantom useful cards.
    pub fn placeholder_draw(&self) -> Card {
        Card::all()
            .find(|card| !self.useful(*card))
            .unwrap_or(Card::new(Suit::Red, Rank::One))
    }

    pub fn pace(&self) -> i32 {
        let draws_left = self.deck_size as i32
            + self
                .turns_left
                .map(|turns| turns as i32)
                .unwrap_or(PLAYER_COUNT as i32);
        let plays_left = self.max_score() as i32 - self.score() as i32;
        draws_left - plays_left
    }

    /// A useful card close enough to its ceiling that it must land in
    /// the final round.
    pub fn is_final_round_card(&self, card: Card) -> bool {
        self.useful(card)
            && card.rank.value() >= self.max_stacks[card.suit.index()].saturating_sub(1)
    }

    pub fn holds_final_round_card(&self, player: usize) -> bool {
        self.hands[player].iter().any(|belief| {
            belief.possibilities.iter().any(|card| self.useful(card))
                && belief
                    .possibilities
                    .iter()
                    .filter(|card| !belief.touched || self.useful(*card))
                    .all(|card| self.is_final_round_card(card))
        })
    }

    /// Pace minus a turn for each player who provably wastes their
    /// final-round turn. On the very last turn only the player still
    /// to move can waste it.
    pub fn pace_adjusted(
        &self,
        current_player: usize,
        player: usize,
        partner_hand: &[Card],
    ) -> i32 {
        let mut own = self.holds_final_round_card(player);
        let mut partners = partner_hand
            .iter()
            .any(|card| self.is_final_round_card(*card));
        if self.turns_left == Some(1) {
            if player == current_player {
                partners = false;
            } else {
                own = false;
            }
        }
        let dead = [own, partners].iter().filter(|held| !**held).count() as i32;
        self.pace() - dead
    }

    /// Maximum achievable score once negative pace is charged against
    /// the ceiling. Frozen at the current score when no turns remain.
    pub fn max_score_adjusted(
        &self,
        current_player: usize,
        player: usize,
        partner_hand: &[Card],
    ) -> i32 {
        if self.turns_left == Some(0) {
            return self.score() as i32;
        }
        let pace = self.pace_adjusted(current_player, player, partner_hand);
        if pace < 0 {
            self.max_score() as i32 + pace
        } else {
            self.max_score() as i32
        }
    }
}

impl Default for GlobalUnderstanding {
    fn default() -> Self {
        Self::new()
    }
}
