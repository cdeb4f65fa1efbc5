//! Presentation durations the worker waits out between engine steps.

use std::time::Duration;

use siege_core::AttackPhase;

/// How long each visual beat lasts before the engine is told it finished.
///
/// The engine itself is instantaneous; these only pace the timers that call
/// back into it (arrival, attack phase steps, discard after the fade).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationTimings {
    /// Appearance animation after the spawn interval elapses.
    pub appear: Duration,
    /// Travel time of a committed forward move.
    pub travel: Duration,
    /// Travel time of a knockback bounce or displacement.
    pub knockback: Duration,
    pub approach: Duration,
    pub strike: Duration,
    pub retreat: Duration,
    /// Fade-out of a dead monster before it is discarded.
    pub fade: Duration,
    /// Multiplier applied to every delay, spawn intervals included.
    pub time_scale: f32,
}

impl PresentationTimings {
    /// All beats take zero time.
    pub fn instant() -> Self {
        Self {
            appear: Duration::ZERO,
            travel: Duration::ZERO,
            knockback: Duration::ZERO,
            approach: Duration::ZERO,
            strike: Duration::ZERO,
            retreat: Duration::ZERO,
            fade: Duration::ZERO,
            time_scale: 1.0,
        }
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Scales a base duration. Negative or non-finite scales collapse to zero.
    pub fn scaled(&self, base: Duration) -> Duration {
        if self.time_scale.is_finite() && self.time_scale > 0.0 {
            base.mul_f32(self.time_scale)
        } else {
            Duration::ZERO
        }
    }

    pub fn spawn_delay(&self, interval_ms: u64) -> Duration {
        self.scaled(Duration::from_millis(interval_ms) + self.appear)
    }

    /// Time spent in `phase` before the attack advances, or `None` once done.
    pub fn attack_phase(&self, phase: AttackPhase) -> Option<Duration> {
        let base = match phase {
            AttackPhase::Approaching => self.approach,
            AttackPhase::DamageApplied => self.strike,
            AttackPhase::Retreating => self.retreat,
            AttackPhase::Done => return None,
        };
        Some(self.scaled(base))
    }
}

impl Default for PresentationTimings {
    fn default() -> Self {
        Self {
            appear: Duration::from_millis(300),
            travel: Duration::from_millis(200),
            knockback: Duration::from_millis(200),
            approach: Duration::from_millis(250),
            strike: Duration::from_millis(50),
            retreat: Duration::from_millis(150),
            fade: Duration::from_millis(500),
            time_scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_scale_applies_to_every_delay() {
        let timings = PresentationTimings::default().with_time_scale(2.0);

        assert_eq!(timings.spawn_delay(100), Duration::from_millis(800));
        assert_eq!(
            timings.attack_phase(AttackPhase::Approaching),
            Some(Duration::from_millis(500))
        );
        assert_eq!(timings.attack_phase(AttackPhase::Done), None);
    }

    #[test]
    fn invalid_scale_means_instant() {
        let timings = PresentationTimings::default().with_time_scale(f32::NAN);
        assert_eq!(timings.scaled(Duration::from_secs(1)), Duration::ZERO);
    }
}
