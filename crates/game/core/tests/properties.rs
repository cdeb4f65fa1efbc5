mod common;

use common::{Encounter, slime};
use proptest::prelude::*;
use siege_core::{
    CellIndex, CreatureState, DefenderState, GameConfig, GridTopology, Heading,
    KnockbackDirection, MonsterId, MonsterState, StrikeOutcome, combat::apply_damage,
};

proptest! {
    #[test]
    fn move_turn_counter_never_increases_and_floors_at_zero(
        move_turn in 0u32..16,
        ticks in 0usize..40,
    ) {
        let mut monster = MonsterState::new(MonsterId(1), slime(5).with_move_turn(move_turn));
        monster.reset_move_turn();

        let mut previous = monster.move_turn_remaining;
        for _ in 0..ticks {
            monster.tick_move_turn();
            prop_assert!(monster.move_turn_remaining <= previous);
            previous = monster.move_turn_remaining;
        }
        prop_assert_eq!(
            monster.move_turn_remaining,
            move_turn.saturating_sub(ticks as u32)
        );
    }

    #[test]
    fn damage_is_clamped_at_zero(hp in 0u32..10_000, damage in 0u32..10_000) {
        let expected = if damage >= hp { 0 } else { hp - damage };
        prop_assert_eq!(apply_damage(hp, damage), expected);
    }

    #[test]
    fn defender_strike_keeps_hp_and_state_consistent(
        hp in 1u32..200,
        damage in 0u32..60,
        combo in 0u32..5,
    ) {
        let defender = DefenderState::new(100, damage)
            .with_combo(combo)
            .with_knockback(KnockbackDirection::None);
        let mut encounter = Encounter::new(GameConfig::default().with_defender(defender));
        let id = encounter.ready(slime(hp), 40);

        let outcome = encounter
            .engine()
            .strike_from_defender(id, Heading::OUTWARD)
            .unwrap();

        let monster = encounter.monster(id);
        prop_assert_eq!(monster.hp, hp.saturating_sub(damage * combo));
        prop_assert!(monster.hp <= monster.max_hp);
        prop_assert_eq!(monster.hp == 0, monster.state == CreatureState::Dead);
        prop_assert_eq!(outcome.is_kill(), monster.hp == 0);
    }

    #[test]
    fn attack_range_matches_ring_boundary(cell in 0u32..144, range in 1u32..4) {
        let grid = GridTopology::default();
        let reachable = grid.within_attack_range(CellIndex(cell), range);
        prop_assert_eq!(reachable, grid.ring(CellIndex(cell)) < range);
    }
}

#[test]
fn striking_twice_after_death_is_ignored() {
    let defender = DefenderState::new(100, 50);
    let mut encounter = Encounter::new(GameConfig::default().with_defender(defender));
    let id = encounter.ready(slime(10), 40);

    let mut engine = encounter.engine();
    assert!(engine.strike_from_defender(id, Heading::OUTWARD).unwrap().is_kill());
    assert_eq!(
        engine.strike_from_defender(id, Heading::OUTWARD).unwrap(),
        StrikeOutcome::Ignored
    );
}
