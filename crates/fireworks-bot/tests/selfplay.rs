use fireworks_bot::{Engine, EngineFeatures, TurnView};
use fireworks_core::game::{Decision, ObservedAction};
use fireworks_core::model::card::Card;
use fireworks_core::model::deck::Deck;
use fireworks_core::model::suit::Suit;
use fireworks_core::understanding::{CLUE_TOKEN_MAX, HAND_SIZE, PLAYER_COUNT, STRIKE_LIMIT};

const TURN_CAP: usize = 120;

/// The true table state: the dealt deck plus the bookkeeping both
/// engines only ever infer. Applies decisions and records observed
/// actions.
struct Table {
    deck: Vec<Card>,
    hands: [Vec<Card>; PLAYER_COUNT],
    clue_tokens: u8,
    strikes: u8,
    stacks: [u8; Suit::COUNT],
    turns_left: Option<usize>,
    log: Vec<ObservedAction>,
}

impl Table {
    fn deal(seed: u64) -> Self {
        let mut deck = Deck::shuffled_with_seed(seed).cards().to_vec();
        let mut hands: [Vec<Card>; PLAYER_COUNT] = [Vec::new(), Vec::new()];
        for hand in hands.iter_mut() {
            for _ in 0..HAND_SIZE {
                let card = deck.pop().unwrap();
                hand.insert(0, card);
            }
        }
        Self {
            deck,
            hands,
            clue_tokens: CLUE_TOKEN_MAX,
            strikes: 0,
            stacks: [0; Suit::COUNT],
            turns_left: None,
            log: Vec::new(),
        }
    }

    fn score(&self) -> u32 {
        self.stacks.iter().map(|height| *height as u32).sum()
    }

    fn over(&self) -> bool {
        self.strikes >= STRIKE_LIMIT
            || self.turns_left == Some(0)
            || self.stacks.iter().all(|height| *height == 5)
    }

    fn draw(&mut self, actor: usize) {
        if let Some(card) = self.deck.pop() {
            self.hands[actor].insert(0, card);
            if self.deck.is_empty() {
                self.turns_left = Some(PLAYER_COUNT);
            }
        }
    }

    fn tick(&mut self) {
        if let Some(turns) = self.turns_left.as_mut() {
            *turns = turns.saturating_sub(1);
        }
    }

    fn apply(&mut self, actor: usize, decision: Decision) {
        match decision {
            Decision::Play { slot } => {
                let identity = self.hands[actor].remove(slot);
                let suit = identity.suit.index();
                if self.stacks[suit] + 1 == identity.rank.value() {
                    self.stacks[suit] += 1;
                    if identity.rank.value() == 5 && self.clue_tokens < CLUE_TOKEN_MAX {
                        self.clue_tokens += 1;
                    }
                } else {
                    self.strikes += 1;
                }
                self.tick();
                self.draw(actor);
                self.log.push(ObservedAction::Play {
                    actor,
                    slot,
                    identity,
                });
            }
            Decision::Discard { slot } => {
                assert!(
                    self.clue_tokens < CLUE_TOKEN_MAX,
                    "discard proposed at full tokens on turn {}",
                    self.log.len()
                );
                let identity = self.hands[actor].remove(slot);
                self.clue_tokens += 1;
                self.tick();
                self.draw(actor);
                self.log.push(ObservedAction::Discard {
                    actor,
                    slot,
                    identity,
                });
            }
            Decision::Clue { receiver, value } => {
                assert!(
                    self.clue_tokens > 0,
                    "clue proposed without tokens on turn {}",
                    self.log.len()
                );
                assert_ne!(receiver, actor);
                let touched = value.touched_slots(&self.hands[receiver]);
                assert!(!touched.is_empty(), "clue touches nothing");
                self.clue_tokens -= 1;
                self.tick();
                self.log.push(ObservedAction::Clue {
                    actor,
                    receiver,
                    value,
                    touched,
                });
            }
        }
    }
}

fn run_game(seed: u64) -> (Table, usize) {
    let mut table = Table::deal(seed);
    let mut engines = [
        Engine::with_features(0, EngineFeatures::default()),
        Engine::with_features(1, EngineFeatures::default()),
    ];
    let mut cursors = [0usize; PLAYER_COUNT];
    let mut turns = 0;
    while !table.over() && turns < TURN_CAP {
        let actor = turns % PLAYER_COUNT;
        let partner = (actor + 1) % PLAYER_COUNT;
        let window = table.log[cursors[actor]..].to_vec();
        cursors[actor] = table.log.len();
        let partner_hand = table.hands[partner].clone();
        let decision = engines[actor]
            .decide(&TurnView {
                recent_actions: &window,
                partner_hand: &partner_hand,
            })
            .unwrap();
        table.apply(actor, decision);
        turns += 1;
    }
    (table, turns)
}

#[test]
fn self_play_terminates_legally() {
    let (table, turns) = run_game(7);
    assert!(turns < TURN_CAP, "game failed to terminate");
    assert!(table.score() <= 25);
    assert!(table.strikes <= STRIKE_LIMIT);
    assert!(table.clue_tokens <= CLUE_TOKEN_MAX);
}

#[test]
fn self_play_is_reproducible() {
    let (first, first_turns) = run_game(11);
    let (second, second_turns) = run_game(11);
    assert_eq!(first_turns, second_turns);
    assert_eq!(first.log, second.log);
    assert_eq!(first.score(), second.score());
}

#[test]
fn self_play_makes_progress() {
    // Over a few seeds the pair should land at least some cards; a
    // zero score everywhere would mean the convention never connects.
    let total: u32 = [3, 19, 42].iter().map(|seed| run_game(*seed).0.score()).sum();
    assert!(total > 0);
}
