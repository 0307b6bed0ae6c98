use crate::belief::possibility::PossibilitySet;
use crate::model::card::{Card, IDENTITY_COUNT};

/// Per-identity copy accounting across the whole deck.
///
/// `unseen` counts copies not yet pinned to a known visible location;
/// `usable` counts copies not yet discarded or misplayed. Both only
/// ever decrease, and `unseen + usable` never exceeds twice the
/// printed copies (they track independent facts about the same
/// physical cards).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLedger {
    unseen: [u8; IDENTITY_COUNT],
    usable: [u8; IDENTITY_COUNT],
}

impl ResourceLedger {
    pub fn new() -> Self {
        let mut unseen = [0u8; IDENTITY_COUNT];
        for card in Card::all() {
            unseen[card.index()] = card.copies();
        }
        Self {
            usable: unseen,
            unseen,
        }
    }

    pub fn unseen(&self, card: Card) -> u8 {
        self.unseen[card.index()]
    }

    pub fn usable(&self, card: Card) -> u8 {
        self.usable[card.index()]
    }

    /// Marks one copy as located. Returns true when this was the last
    /// unseen copy; a no-op (false) when none remain, so repeated
    /// reveals of a determined identity cannot underflow.
    pub fn reveal(&mut self, card: Card) -> bool {
        let count = &mut self.unseen[card.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        *count == 0
    }

    /// Marks one copy as discarded or misplayed. Returns true when this
    /// was the last usable copy.
    pub fn spend(&mut self, card: Card) -> bool {
        let count = &mut self.usable[card.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        *count == 0
    }

    /// Identities a fresh draw could still be.
    pub fn unseen_set(&self) -> PossibilitySet {
        Card::all().filter(|card| self.unseen(*card) > 0).collect()
    }
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new()
    }
}
