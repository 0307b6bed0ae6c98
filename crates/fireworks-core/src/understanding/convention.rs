use crate::belief::BeliefHand;
use crate::model::clue::ClueValue;
use crate::understanding::GlobalUnderstanding;

impl GlobalUnderstanding {
    /// Decodes the referential meaning of a clue, given the receiver's
    /// hand as it stood before the literal filter was applied.
    ///
    /// A clue whose literal content newly identifies a play or known
    /// trash explains itself and carries no instruction. Anything else
    /// is a pointer into the receiver's not-yet-clued slots; whether
    /// the pointer means play, trash, save, or lock depends on the
    /// signal type and on whether the receiver was already loaded with
    /// something to do.
    pub(crate) fn interpret_clue(
        &mut self,
        receiver: usize,
        before: &BeliefHand,
        value: ClueValue,
        touching: &[usize],
    ) {
        let old_identified: Vec<usize> = self
            .good_touch_plays_in(before)
            .into_iter()
            .map(|(slot, _)| slot)
            .collect();
        let old_trashes = self.known_trash_slots_in(before);
        let was_loaded = !old_identified.is_empty()
            || !old_trashes.is_empty()
            || !self.instructed[receiver].plays.is_empty()
            || !self.instructed[receiver].trash.is_empty();

        // Pre-clue unclued ordering, instructed slots excluded. Slot
        // positions are stable across a clue, so these indices are
        // valid against the post-clue hand too.
        let old_unclued: Vec<usize> = before
            .unclued_slots()
            .into_iter()
            .filter(|slot| {
                before
                    .slot(*slot)
                    .map(|belief| !self.instructed[receiver].references(belief.id))
                    .unwrap_or(false)
            })
            .collect();

        let identified_now: Vec<usize> = self
            .good_touch_plays(receiver)
            .into_iter()
            .map(|(slot, _)| slot)
            .collect();
        let trashes_now = self.known_trash_slots(receiver);

        let newly_identified = identified_now
            .iter()
            .any(|slot| !old_identified.contains(slot) && !old_unclued.contains(slot));
        let newly_trash = trashes_now
            .iter()
            .any(|slot| !old_trashes.contains(slot) && !old_unclued.contains(slot));
        if newly_identified || newly_trash {
            return;
        }

        let Some(referent) = referent(&old_unclued, touching) else {
            return;
        };
        let Some(referent_id) = self.hands[receiver].slot(referent).map(|belief| belief.id)
        else {
            return;
        };

        let all_trash = touching
            .iter()
            .filter(|slot| old_unclued.contains(slot))
            .all(|slot| trashes_now.contains(slot));

        let instructions = &mut self.instructed[receiver];
        match value {
            ClueValue::Suit(_) if !all_trash => {
                if was_loaded {
                    if touching.contains(&old_unclued[0]) {
                        instructions.trash.push(referent_id);
                    } else {
                        instructions.plays.push(referent_id);
                    }
                } else if !instructions.lock && referent == old_unclued[0] {
                    instructions.chop = None;
                    instructions.lock = true;
                } else {
                    instructions.chop = Some(referent_id);
                    instructions.lock = false;
                }
            }
            _ => instructions.plays.push(referent_id),
        }
    }
}

/// The referent is the unclued slot whose circular successor in the
/// pre-clue unclued ordering is touched.
fn referent(unclued: &[usize], touching: &[usize]) -> Option<usize> {
    (0..unclued.len()).find_map(|index| {
        let successor = unclued[(index + 1) % unclued.len()];
        touching.contains(&successor).then_some(unclued[index])
    })
}

#[cfg(test)]
mod tests {
    use super::referent;
    use crate::understanding::GlobalUnderstanding;
    use crate::model::clue::ClueValue;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn referent_points_at_predecessor_of_first_touched() {
        assert_eq!(referent(&[0, 1, 2, 3, 4], &[1]), Some(0));
        assert_eq!(referent(&[0, 1, 2, 3, 4], &[3]), Some(2));
    }

    #[test]
    fn referent_wraps_around() {
        assert_eq!(referent(&[0, 1, 2, 3, 4], &[0]), Some(4));
        assert_eq!(referent(&[2, 3, 4], &[2]), Some(4));
    }

    #[test]
    fn referent_requires_a_touched_unclued_slot() {
        assert_eq!(referent(&[2, 3, 4], &[0, 1]), None);
        assert_eq!(referent(&[], &[0]), None);
    }

    #[test]
    fn rank_clue_instructs_play_of_referent() {
        let mut state = GlobalUnderstanding::new();
        state.clue(1, ClueValue::Rank(Rank::One), &[1]).unwrap();
        assert_eq!(state.instructed_play_slots(1), vec![0]);
        assert_eq!(state.chop_slot(1), None);
        assert!(!state.locked(1));
    }

    #[test]
    fn suit_clue_on_unloaded_receiver_marks_chop() {
        let mut state = GlobalUnderstanding::new();
        // Touching slot 0 makes slot 4 the referent via wrap-around.
        state.clue(1, ClueValue::Suit(Suit::Red), &[0]).unwrap();
        assert_eq!(state.chop_slot(1), Some(4));
        assert!(!state.locked(1));
        assert!(state.instructed_play_slots(1).is_empty());
    }

    #[test]
    fn suit_clue_pointing_at_newest_unclued_locks() {
        let mut state = GlobalUnderstanding::new();
        // Referent slot 0 is the receiver's next default discard.
        state.clue(1, ClueValue::Suit(Suit::Red), &[1]).unwrap();
        assert!(state.locked(1));
        assert_eq!(state.chop_slot(1), None);
    }

    #[test]
    fn suit_clue_on_loaded_receiver_instructs_trash_or_play() {
        // Loaded through an instructed play from a rank clue.
        let mut state = GlobalUnderstanding::new();
        state.clue(1, ClueValue::Rank(Rank::One), &[1]).unwrap();
        assert_eq!(state.instructed_play_slots(1), vec![0]);

        // Newest unclued slot (2) touched: referent becomes trash.
        let mut touched_newest = state.clone();
        touched_newest
            .clue(1, ClueValue::Suit(Suit::Red), &[2])
            .unwrap();
        assert_eq!(touched_newest.instructed_trash_slots(1), vec![4]);

        // Newest unclued slot untouched: referent becomes a play.
        let mut untouched_newest = state.clone();
        untouched_newest
            .clue(1, ClueValue::Suit(Suit::Red), &[3])
            .unwrap();
        let mut plays = untouched_newest.instructed_play_slots(1);
        plays.sort_unstable();
        assert_eq!(plays, vec![0, 2]);
    }

    #[test]
    fn literal_clue_carries_no_instruction() {
        let mut state = GlobalUnderstanding::new();
        state.clue(1, ClueValue::Rank(Rank::One), &[1]).unwrap();
        state.clue(1, ClueValue::Suit(Suit::Red), &[1]).unwrap();
        // Slot 1 collapsed to Red 1, an identified play; the second
        // clue explains itself and leaves the queues alone.
        assert_eq!(
            state.hand(1).slot(1).unwrap().possibilities.sole(),
            Some(crate::model::card::Card::new(Suit::Red, Rank::One))
        );
        assert_eq!(state.instructed_play_slots(1), vec![0]);
        assert_eq!(state.instructed_trash_slots(1), Vec::<usize>::new());
        assert_eq!(state.chop_slot(1), None);
        assert!(!state.locked(1));
    }

    #[test]
    fn decode_is_deterministic() {
        let base = {
            let mut state = GlobalUnderstanding::new();
            state.clue(1, ClueValue::Rank(Rank::Two), &[2, 3]).unwrap();
            state
        };
        let mut first = base.clone();
        let mut second = base.clone();
        first.clue(1, ClueValue::Suit(Suit::Green), &[0, 4]).unwrap();
        second.clue(1, ClueValue::Suit(Suit::Green), &[0, 4]).unwrap();
        assert_eq!(first.instructed_play_slots(1), second.instructed_play_slots(1));
        assert_eq!(first.instructed_trash_slots(1), second.instructed_trash_slots(1));
        assert_eq!(first.chop_slot(1), second.chop_slot(1));
        assert_eq!(first.locked(1), second.locked(1));
    }
}
