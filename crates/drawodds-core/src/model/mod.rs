//! Draw-probability model for a 40-card deck with a 4-card opening hand.

pub mod deck;
pub mod params;
pub mod policy;
pub mod probability;
pub mod variant;

pub use deck::{Deck, FULL_DECK, OPENING_HAND, POST_HAND_DECK, Slot};
pub use params::DrawParams;
pub use policy::{KeepMode, ParseKeepModeError};
pub use probability::{
    keep_miss, keep_probability, missed_opening_miss, no_keep_miss, no_keep_probability,
    probability_after_missed_opening, probability_at_least_one,
};
pub use variant::ModelVariant;
