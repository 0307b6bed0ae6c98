use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of distinct card identities (5 suits x 5 ranks).
pub const IDENTITY_COUNT: usize = Suit::COUNT * Rank::COUNT;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Dense index into per-identity tables, suit-major.
    pub const fn index(self) -> usize {
        self.suit.index() * Rank::COUNT + (self.rank.value() - 1) as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= IDENTITY_COUNT {
            return None;
        }
        let suit = match Suit::from_index(index / Rank::COUNT) {
            Some(suit) => suit,
            None => return None,
        };
        let rank = match Rank::from_value((index % Rank::COUNT) as u8 + 1) {
            Some(rank) => rank,
            None => return None,
        };
        Some(Self { suit, rank })
    }

    pub const fn copies(self) -> u8 {
        self.rank.copies()
    }

    pub fn all() -> impl Iterator<Item = Card> {
        (0..IDENTITY_COUNT).filter_map(Card::from_index)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, IDENTITY_COUNT, Rank, Suit};

    #[test]
    fn index_round_trips() {
        for index in 0..IDENTITY_COUNT {
            let card = Card::from_index(index).unwrap();
            assert_eq!(card.index(), index);
        }
        assert_eq!(Card::from_index(IDENTITY_COUNT), None);
    }

    #[test]
    fn display_is_rank_then_suit() {
        let card = Card::new(Suit::Green, Rank::Three);
        assert_eq!(card.to_string(), "3G");
    }

    #[test]
    fn copies_follow_rank() {
        assert_eq!(Card::new(Suit::Red, Rank::One).copies(), 3);
        assert_eq!(Card::new(Suit::Blue, Rank::Five).copies(), 1);
    }
}
