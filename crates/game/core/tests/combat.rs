mod common;

use common::{Encounter, slime};
use siege_core::{
    AttackPhase, AttackStart, BossState, CellIndex, CreatureState, DeathCause, DefenderState,
    EncounterError, EncounterEvent, GameConfig, Heading, KnockbackDirection, KnockbackOutcome,
    PositionalIndex, SpecialAbility, StrikeOutcome, TurnDecision,
};

fn config(knockback: KnockbackDirection, damage: u32) -> GameConfig {
    GameConfig::default().with_defender(DefenderState::new(50, damage).with_knockback(knockback))
}

#[test]
fn lethal_strike_kills_and_drops_coins_once() {
    let mut encounter = Encounter::new(config(KnockbackDirection::Back, 10));
    let id = encounter.ready(slime(8).with_drop_coin(4), 30);
    encounter.ready(slime(8), 50);

    let outcome = encounter
        .engine()
        .strike_from_defender(id, Heading::OUTWARD)
        .unwrap();

    assert_eq!(outcome, StrikeOutcome::Killed);
    let monster = encounter.monster(id);
    assert_eq!(monster.hp, 0);
    assert_eq!(monster.state, CreatureState::Dead);
    assert_eq!(monster.cell, None);
    assert_eq!(monster.death.map(|death| death.cause), Some(DeathCause::Slain));
    assert_eq!(encounter.grid.occupant(CellIndex(30)), None);
    assert_eq!(encounter.state.rewards.coins, 4);
    assert!(encounter.events.contains(&EncounterEvent::CoinDropped {
        cell: CellIndex(30),
        amount: 4,
    }));
    assert!(encounter.events.iter().any(|event| matches!(
        event,
        EncounterEvent::MonsterDied { monster, remaining: 1, .. } if *monster == id
    )));
}

#[test]
fn death_is_idempotent() {
    let mut encounter = Encounter::new(config(KnockbackDirection::None, 10));
    let id = encounter.ready(slime(5).with_drop_coin(2), 30);
    encounter
        .engine()
        .strike_from_defender(id, Heading::OUTWARD)
        .unwrap();
    let before = encounter.monster(id).clone();
    let events = encounter.events.len();
    let occupied = encounter.grid.occupied();

    let mut engine = encounter.engine();
    assert!(!engine.kill(id, DeathCause::Slain, Heading::INWARD).unwrap());
    assert_eq!(
        engine.strike_from_defender(id, Heading::OUTWARD).unwrap(),
        StrikeOutcome::Ignored
    );

    assert_eq!(encounter.monster(id), &before);
    assert_eq!(encounter.events.len(), events);
    assert_eq!(encounter.grid.occupied(), occupied);
    assert_eq!(encounter.state.rewards.coins, 2);
}

#[test]
fn surviving_monster_bounces_when_knockback_is_unset() {
    let mut encounter = Encounter::new(config(KnockbackDirection::None, 3));
    let id = encounter.ready(slime(10), 30);

    let outcome = encounter
        .engine()
        .strike_from_defender(id, Heading::OUTWARD)
        .unwrap();

    assert_eq!(
        outcome,
        StrikeOutcome::KnockedBack {
            remaining: 7,
            knockback: KnockbackOutcome::Bounce {
                cell: CellIndex(30)
            },
        }
    );
    assert_eq!(encounter.monster(id).state, CreatureState::Moving);
    assert!(encounter.monster(id).is_resolving());

    encounter.engine().arrive(id).unwrap();
    let monster = encounter.monster(id);
    assert_eq!(monster.state, CreatureState::Idle);
    assert_eq!(monster.move_turn_remaining, 0);
}

#[test]
fn knockback_into_free_cell_displaces_victim() {
    let mut encounter = Encounter::new(config(KnockbackDirection::Clockwise, 3));
    let id = encounter.ready(slime(10), 23);

    encounter
        .engine()
        .strike_from_defender(id, Heading::OUTWARD)
        .unwrap();

    assert_eq!(encounter.monster(id).cell, Some(CellIndex(12)));
    assert_eq!(encounter.grid.occupant(CellIndex(12)), Some(id));
    assert_eq!(encounter.grid.occupant(CellIndex(23)), None);
}

#[test]
fn knockback_chain_stops_after_one_collision() {
    let mut encounter = Encounter::new(config(KnockbackDirection::Back, 5));
    let front = encounter.ready(slime(20).with_damage(4), 12);
    let middle = encounter.ready(slime(20).with_damage(9), 24);
    let back = encounter.ready(slime(20), 36);

    let outcome = encounter
        .engine()
        .strike_from_defender(front, Heading::OUTWARD)
        .unwrap();

    assert_eq!(
        outcome,
        StrikeOutcome::KnockedBack {
            remaining: 15,
            knockback: KnockbackOutcome::Collision {
                at: CellIndex(24),
                occupant: Some(middle),
                settle: CellIndex(12),
            },
        }
    );
    assert_eq!(encounter.monster(middle).hp, 16);
    assert_eq!(encounter.monster(back).hp, 20);
    for (id, cell) in [(front, 12), (middle, 24), (back, 36)] {
        assert_eq!(encounter.grid.cell_of(id), Some(CellIndex(cell)));
        assert_eq!(encounter.monster(id).cell, Some(CellIndex(cell)));
    }
    assert_eq!(encounter.monster(front).state, CreatureState::Idle);
    assert_eq!(encounter.monster(middle).state, CreatureState::Idle);
    assert_eq!(
        encounter.count(|event| matches!(event, EncounterEvent::Knockback { .. })),
        1
    );
    assert_eq!(
        encounter.count(|event| matches!(event, EncounterEvent::DamageApplied { .. })),
        2
    );
}

#[test]
fn chain_collision_can_kill_the_occupant() {
    let mut encounter = Encounter::new(config(KnockbackDirection::Front, 1));
    let struck = encounter.ready(slime(20).with_damage(6), 24);
    let blocker = encounter.ready(slime(5).with_drop_coin(3), 12);

    encounter
        .engine()
        .strike_from_defender(struck, Heading::OUTWARD)
        .unwrap();

    let blocker_state = encounter.monster(blocker);
    assert!(blocker_state.is_dead());
    assert_eq!(
        blocker_state.death.map(|death| death.heading),
        Some(Heading::INWARD)
    );
    assert_eq!(encounter.state.rewards.coins, 3);
    assert_eq!(encounter.grid.occupant(CellIndex(12)), None);
    assert_eq!(encounter.grid.cell_of(struck), Some(CellIndex(24)));
}

#[test]
fn monster_hits_never_knock_back() {
    let mut encounter = Encounter::new(config(KnockbackDirection::Back, 1));
    let source = encounter.ready(slime(10).with_damage(2), 24);
    let target = encounter.ready(slime(10), 12);

    let outcome = encounter
        .engine()
        .strike_from_monster(target, source)
        .unwrap();

    assert_eq!(outcome, StrikeOutcome::Damaged { remaining: 8 });
    assert_eq!(encounter.monster(target).cell, Some(CellIndex(12)));
    assert_eq!(encounter.monster(target).state, CreatureState::Idle);
}

#[test]
fn suicidal_monster_dies_but_its_attack_still_lands() {
    let mut encounter = Encounter::new(config(KnockbackDirection::None, 1));
    let archetype = slime(6)
        .with_damage(9)
        .with_drop_coin(5)
        .with_ability(SpecialAbility::Suicidal);
    let id = encounter.ready(archetype, 3);

    let mut engine = encounter.engine();
    assert_eq!(engine.take_turn(id).unwrap(), TurnDecision::Attack);
    assert_eq!(engine.start_attack(id).unwrap(), AttackStart::Started);
    assert_eq!(engine.state().monster(id).map(|m| m.state), Some(CreatureState::Dead));

    assert_eq!(engine.advance_attack(id).unwrap(), AttackPhase::DamageApplied);
    assert_eq!(engine.state().defender.hp, 41);
    assert_eq!(engine.advance_attack(id).unwrap(), AttackPhase::Retreating);
    assert_eq!(engine.advance_attack(id).unwrap(), AttackPhase::Done);
    assert_eq!(
        engine.advance_attack(id).unwrap_err(),
        EncounterError::NoAttackInProgress(id)
    );
    engine.finish_attack(id).unwrap();

    let monster = encounter.monster(id);
    assert_eq!(monster.state, CreatureState::Dead);
    assert_eq!(monster.hp, 0);
    assert!(!monster.is_resolving());
    assert_eq!(encounter.state.rewards.coins, 0);

    let discarded = encounter.engine().discard(id).unwrap();
    assert_eq!(discarded.id, id);
    assert!(encounter.state.monster(id).is_none());
}

#[test]
fn support_monster_heals_dies_and_counters_the_boss() {
    let rules = config(KnockbackDirection::None, 1).with_boss(BossState::new(95, 100));
    let mut encounter = Encounter::new(rules);
    let archetype = slime(10)
        .with_damage(3)
        .with_ability(SpecialAbility::Support);
    let id = encounter.ready(archetype, 7);

    let mut engine = encounter.engine();
    assert_eq!(engine.take_turn(id).unwrap(), TurnDecision::Attack);
    assert_eq!(engine.start_attack(id).unwrap(), AttackStart::Started);
    engine.finish_attack(id).unwrap();

    assert!(encounter.events.contains(&EncounterEvent::BossHealed {
        monster: id,
        amount: 5,
        hp: 100,
    }));
    assert!(encounter.events.contains(&EncounterEvent::BossDamaged {
        monster: id,
        amount: 3,
        hp: 97,
    }));
    assert_eq!(encounter.state.boss.hp, 97);
    let monster = encounter.monster(id);
    assert!(monster.is_dead());
    assert!(!monster.is_resolving());
    assert_eq!(encounter.state.defender.hp, 50);
}

#[test]
fn discarding_a_living_monster_is_rejected() {
    let mut encounter = Encounter::new(GameConfig::default());
    let id = encounter.ready(slime(5), 40);

    assert_eq!(
        encounter.engine().discard(id).unwrap_err(),
        EncounterError::NotDead(id)
    );
}

#[test]
fn selection_changes_are_reported_once() {
    let mut encounter = Encounter::new(GameConfig::default());
    let id = encounter.ready(slime(5), 40);

    let mut engine = encounter.engine();
    engine.set_selected(id, true).unwrap();
    engine.set_selected(id, true).unwrap();

    assert!(encounter.monster(id).is_selected());
    assert_eq!(
        encounter.count(|event| matches!(event, EncounterEvent::SelectionChanged { .. })),
        1
    );
}

#[test]
fn force_idle_drops_a_pending_attack() {
    let mut encounter = Encounter::new(GameConfig::default());
    let id = encounter.ready(slime(5).with_damage(4), 2);
    let defender_hp = encounter.state.defender.hp;

    let mut engine = encounter.engine();
    engine.take_turn(id).unwrap();
    engine.start_attack(id).unwrap();
    engine.force_idle(id).unwrap();
    engine.finish_attack(id).unwrap();

    let monster = encounter.monster(id);
    assert!(!monster.is_resolving());
    assert_eq!(monster.state, CreatureState::Idle);
    assert_eq!(encounter.state.defender.hp, defender_hp);
}
