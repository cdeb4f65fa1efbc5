//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the encounter and executes commands; timers it
//! spawns report back through the same command channel.

mod lifetime;
mod simulation;
mod timings;

pub use simulation::{Command, SimulationWorker, Timer};
pub use timings::PresentationTimings;
