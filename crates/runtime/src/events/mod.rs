//! Topic-based event bus for runtime events.
//!
//! Engine notifications are republished verbatim on [`Topic::Encounter`];
//! the turn loop reports its own progress on [`Topic::Turn`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{EncounterOutcome, TurnEvent};
