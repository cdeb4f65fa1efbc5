//! Combat resolution system.
//!
//! Pure functions for damage arithmetic and knockback classification. The
//! engine's strike operations compose them with state mutation and events.
//!
//! # Core Functions
//!
//! - `defender_damage` / `collision_damage`: damage for each hit source
//! - `apply_damage`: HP reduction (clamped to 0)
//! - `query_destination`: runs the knockback movement query
//! - `classify`: turns a query result into a [`KnockbackOutcome`]

pub mod damage;
pub mod knockback;
pub mod result;

pub use damage::{DamageSource, apply_damage, collision_damage, defender_damage};
pub use knockback::{KnockbackDirection, KnockbackOutcome, classify, query_destination};
pub use result::StrikeOutcome;
