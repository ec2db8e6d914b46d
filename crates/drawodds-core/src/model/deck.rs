use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Cards in a full deck.
pub const FULL_DECK: i64 = 40;
/// Cards dealt as the opening hand.
pub const OPENING_HAND: i64 = 4;
/// Cards left in the deck once the opening hand is dealt.
pub const POST_HAND_DECK: i64 = FULL_DECK - OPENING_HAND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Target,
    Other,
}

/// A full deck reduced to what the model cares about: target or not.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Slot>,
}

impl Deck {
    /// Unshuffled deck with `targets` target cards on top. Clamped to the deck size.
    pub fn with_targets(targets: i64) -> Self {
        let targets = targets.clamp(0, FULL_DECK) as usize;
        let mut cards = Vec::with_capacity(FULL_DECK as usize);
        cards.extend(std::iter::repeat_n(Slot::Target, targets));
        cards.extend(std::iter::repeat_n(
            Slot::Other,
            FULL_DECK as usize - targets,
        ));
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(targets: i64, rng: &mut R) -> Self {
        let mut deck = Self::with_targets(targets);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(targets: i64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(targets, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Slot] {
        &self.cards
    }

    pub fn target_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|slot| **slot == Slot::Target)
            .count()
    }

    /// True when any of the top `draws` cards is a target.
    pub fn hits_within(&self, draws: usize) -> bool {
        self.cards
            .iter()
            .take(draws)
            .any(|slot| *slot == Slot::Target)
    }
}
