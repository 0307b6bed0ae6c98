use crate::model::card::Card;
use crate::model::clue::ClueValue;
use serde::{Deserialize, Serialize};

/// A completed action as seen from outside, with everything a watcher
/// needs to update a [`GlobalUnderstanding`] without consulting the
/// deck. Clues carry the touched slots because the observer cannot
/// compute them for a hand it does not see.
///
/// [`GlobalUnderstanding`]: crate::understanding::GlobalUnderstanding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservedAction {
    Play {
        actor: usize,
        slot: usize,
        identity: Card,
    },
    Discard {
        actor: usize,
        slot: usize,
        identity: Card,
    },
    Clue {
        actor: usize,
        receiver: usize,
        value: ClueValue,
        touched: Vec<usize>,
    },
}

/// What a player chooses to do on their turn. Slots index the actor's
/// own hand, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Play { slot: usize },
    Discard { slot: usize },
    Clue { receiver: usize, value: ClueValue },
}
