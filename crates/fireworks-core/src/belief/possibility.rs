use crate::model::card::{Card, IDENTITY_COUNT};
use core::fmt;

/// Set of card identities still consistent with public information for
/// one slot. Backed by a bitmask over the 25-identity domain.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PossibilitySet {
    bits: u32,
}

const FULL_MASK: u32 = (1 << IDENTITY_COUNT) - 1;

impl PossibilitySet {
    pub const EMPTY: Self = Self { bits: 0 };

    pub const fn full() -> Self {
        Self { bits: FULL_MASK }
    }

    pub fn contains(self, card: Card) -> bool {
        self.bits & (1 << card.index()) != 0
    }

    pub fn insert(&mut self, card: Card) {
        self.bits |= 1 << card.index();
    }

    /// Returns true when the card was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let mask = 1u32 << card.index();
        let present = self.bits & mask != 0;
        self.bits &= !mask;
        present
    }

    pub fn retain(&mut self, mut keep: impl FnMut(Card) -> bool) {
        for card in self.iter() {
            if !keep(card) {
                self.bits &= !(1u32 << card.index());
            }
        }
    }

    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// The single remaining identity, if fully determined.
    pub fn sole(self) -> Option<Card> {
        if self.bits.count_ones() == 1 {
            Card::from_index(self.bits.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Identities in dense-index order.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        let bits = self.bits;
        (0..IDENTITY_COUNT)
            .filter(move |index| bits & (1 << index) != 0)
            .filter_map(Card::from_index)
    }
}

impl FromIterator<Card> for PossibilitySet {
    fn from_iter<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let mut set = Self::EMPTY;
        for card in cards {
            set.insert(card);
        }
        set
    }
}

impl fmt::Debug for PossibilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
