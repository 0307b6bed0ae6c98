use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A signal value: either a suit identifier or a rank digit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ClueValue {
    Suit(Suit),
    Rank(Rank),
}

impl ClueValue {
    pub fn touches(self, card: Card) -> bool {
        match self {
            ClueValue::Suit(suit) => card.suit == suit,
            ClueValue::Rank(rank) => card.rank == rank,
        }
    }

    /// Slots in `hand` (newest first) this value would touch.
    pub fn touched_slots(self, hand: &[Card]) -> Vec<usize> {
        hand.iter()
            .enumerate()
            .filter(|(_, card)| self.touches(**card))
            .map(|(slot, _)| slot)
            .collect()
    }

    pub const fn is_suit(self) -> bool {
        matches!(self, ClueValue::Suit(_))
    }
}

impl fmt::Display for ClueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClueValue::Suit(suit) => write!(f, "{suit}"),
            ClueValue::Rank(rank) => write!(f, "{rank}"),
        }
    }
}
