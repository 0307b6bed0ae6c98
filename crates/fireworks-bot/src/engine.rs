use crate::bot::{EngineFeatures, find_best_move};
use fireworks_core::game::{Decision, ObservedAction};
use fireworks_core::model::card::Card;
use fireworks_core::understanding::{GlobalUnderstanding, PLAYER_COUNT, UnderstandingError};
use tracing::{Level, event};

/// Everything the driver shows an engine on its turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    /// Actions since this engine last moved, oldest first. A window
    /// shorter than a full rotation means a game just started.
    pub recent_actions: &'a [ObservedAction],
    /// The partner's true cards, newest first.
    pub partner_hand: &'a [Card],
}

/// One seat's decision maker: replays observed actions into its copy
/// of the shared understanding, then searches for a move.
pub struct Engine {
    seat: usize,
    features: EngineFeatures,
    understanding: GlobalUnderstanding,
}

impl Engine {
    pub fn new(seat: usize) -> Self {
        Self::with_features(seat, EngineFeatures::from_env())
    }

    pub fn with_features(seat: usize, features: EngineFeatures) -> Self {
        Self {
            seat,
            features,
            understanding: GlobalUnderstanding::new(),
        }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn understanding(&self) -> &GlobalUnderstanding {
        &self.understanding
    }

    pub fn decide(&mut self, view: &TurnView<'_>) -> Result<Decision, UnderstandingError> {
        if view.recent_actions.len() < PLAYER_COUNT {
            self.understanding = GlobalUnderstanding::new();
        }
        for action in view.recent_actions {
            self.replay(action)?;
        }
        let decision = find_best_move(
            &self.understanding,
            self.seat,
            view.partner_hand,
            self.features,
        )?;
        self.log_decision(decision);
        Ok(decision)
    }

    fn replay(&mut self, action: &ObservedAction) -> Result<(), UnderstandingError> {
        match action {
            ObservedAction::Play {
                actor,
                slot,
                identity,
            } => self.understanding.play(*actor, *identity, *slot),
            ObservedAction::Discard {
                actor,
                slot,
                identity,
            } => self.understanding.discard(*actor, *identity, *slot),
            ObservedAction::Clue {
                receiver,
                value,
                touched,
                ..
            } => self.understanding.clue(*receiver, *value, touched),
        }
    }

    fn log_decision(&self, decision: Decision) {
        if !tracing::enabled!(Level::INFO) {
            return;
        }
        event!(
            target: "fireworks_bot::engine",
            Level::INFO,
            seat = self.seat,
            decision = ?decision,
            clue_tokens = self.understanding.clue_tokens(),
            strikes = self.understanding.strikes(),
            score = self.understanding.score(),
            deck = self.understanding.deck_size(),
        );
    }
}
