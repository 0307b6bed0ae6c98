use crate::belief::possibility::PossibilitySet;

/// Stable identifier for one physical card, assigned at draw time and
/// never reused within a game. Instructed-action queues key on these
/// instead of slot positions, so cards leaving the hand never shift
/// the meaning of surviving entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

#[derive(Debug, Clone)]
pub struct SlotBelief {
    pub id: CardId,
    pub possibilities: PossibilitySet,
    /// Whether this slot was ever the direct target of a clue.
    pub touched: bool,
}

/// One player's belief hand, ordered newest first: slot 0 is the most
/// recent draw.
#[derive(Debug, Clone, Default)]
pub struct BeliefHand {
    slots: Vec<SlotBelief>,
}

impl BeliefHand {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn push_newest(&mut self, id: CardId, possibilities: PossibilitySet) {
        self.slots.insert(
            0,
            SlotBelief {
                id,
                possibilities,
                touched: false,
            },
        );
    }

    pub fn remove(&mut self, slot: usize) -> SlotBelief {
        self.slots.remove(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, slot: usize) -> Option<&SlotBelief> {
        self.slots.get(slot)
    }

    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut SlotBelief> {
        self.slots.get_mut(slot)
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotBelief> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SlotBelief> {
        self.slots.iter_mut()
    }

    /// Slots never positively touched by a clue, in hand order.
    pub fn unclued_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.touched)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{BeliefHand, CardId};
    use crate::belief::possibility::PossibilitySet;

    fn hand_with_ids(ids: &[u32]) -> BeliefHand {
        let mut hand = BeliefHand::new();
        for id in ids {
            hand.push_newest(CardId(*id), PossibilitySet::full());
        }
        hand
    }

    #[test]
    fn newest_card_sits_at_slot_zero() {
        let hand = hand_with_ids(&[0, 1, 2]);
        assert_eq!(hand.slot(0).unwrap().id, CardId(2));
        assert_eq!(hand.slot(2).unwrap().id, CardId(0));
    }

    #[test]
    fn position_of_survives_removal() {
        let mut hand = hand_with_ids(&[0, 1, 2, 3]);
        assert_eq!(hand.position_of(CardId(1)), Some(2));
        let removed = hand.remove(0);
        assert_eq!(removed.id, CardId(3));
        assert_eq!(hand.position_of(CardId(1)), Some(1));
        assert_eq!(hand.position_of(CardId(3)), None);
    }

    #[test]
    fn unclued_slots_follow_touched_flags() {
        let mut hand = hand_with_ids(&[0, 1, 2]);
        hand.slot_mut(1).unwrap().touched = true;
        assert_eq!(hand.unclued_slots(), vec![0, 2]);
    }
}
