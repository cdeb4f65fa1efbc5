mod common;

use common::{Encounter, slime};
use siege_core::{
    AttackPhase, AttackStart, CellIndex, CreatureState, EncounterError, ErrorSeverity, GameConfig,
    GameError, GridError, PositionalIndex, TurnDecision,
};

/// Drives one full turn for a single monster the way the runtime does, with
/// every timer firing immediately.
fn play_turn(encounter: &mut Encounter, id: siege_core::MonsterId) -> TurnDecision {
    let mut engine = encounter.engine();
    engine.begin_turn();
    let decision = engine.take_turn(id).unwrap();

    match decision {
        TurnDecision::Move { .. } => engine.arrive(id).unwrap(),
        TurnDecision::Attack => {
            assert_eq!(engine.start_attack(id).unwrap(), AttackStart::Started);
            while engine.advance_attack(id).unwrap() != AttackPhase::Done {}
            engine.finish_attack(id).unwrap();
        }
        TurnDecision::Wait { .. } | TurnDecision::Blocked => {
            engine.start_attack(id).unwrap();
        }
    }
    engine.end_turn(id).unwrap();
    decision
}

#[test]
fn monster_marches_inward_then_attacks() {
    let mut encounter = Encounter::new(GameConfig::default());
    let archetype = slime(20).with_move_turn(2).with_damage(7);
    let id = encounter.ready(archetype, 24);
    let defender_hp = encounter.state.defender.hp;

    let decisions: Vec<_> = (0..5).map(|_| play_turn(&mut encounter, id)).collect();

    assert_eq!(
        decisions,
        vec![
            TurnDecision::Move {
                from: CellIndex(24),
                to: CellIndex(12),
            },
            TurnDecision::Wait { remaining: 1 },
            TurnDecision::Move {
                from: CellIndex(12),
                to: CellIndex(0),
            },
            TurnDecision::Wait { remaining: 1 },
            TurnDecision::Attack,
        ]
    );
    assert_eq!(encounter.state.defender.hp, defender_hp - 7);
    assert_eq!(encounter.monster(id).state, CreatureState::Idle);
    assert_eq!(encounter.monster(id).move_turn_remaining, 2);
    assert_eq!(encounter.grid.cell_of(id), Some(CellIndex(0)));
}

#[test]
fn attack_range_boundary_decides_between_attack_and_move() {
    let mut encounter = Encounter::new(GameConfig::default());
    let inside = encounter.ready(slime(5), 11);
    let outside = encounter.ready(slime(5), 12);

    let mut engine = encounter.engine();
    assert_eq!(engine.take_turn(inside).unwrap(), TurnDecision::Attack);
    assert!(engine.take_turn(outside).unwrap().is_move());
}

#[test]
fn huge_attack_range_reaches_from_any_ring() {
    let mut encounter = Encounter::new(GameConfig::default());
    let id = encounter.ready(slime(5).with_attack_range(400_000_000), 100);

    assert_eq!(
        encounter.engine().take_turn(id).unwrap(),
        TurnDecision::Attack
    );
}

#[test]
fn a_single_decision_never_moves_and_attacks() {
    let mut encounter = Encounter::new(GameConfig::default());
    let ids: Vec<_> = [0, 13, 30, 47, 100]
        .into_iter()
        .map(|cell| encounter.ready(slime(5), cell))
        .collect();

    for id in ids {
        let decision = encounter.engine().take_turn(id).unwrap();
        let state = encounter.monster(id).state;
        match decision {
            TurnDecision::Attack => assert_eq!(state, CreatureState::Attack),
            TurnDecision::Move { .. } => assert_eq!(state, CreatureState::Moving),
            other => panic!("unexpected decision {other:?}"),
        }
    }
}

#[test]
fn blocked_monster_restarts_cooldown() {
    let mut encounter = Encounter::new(GameConfig::default());
    encounter.ready(slime(5), 12);
    let blocked = encounter.ready(slime(5).with_move_turn(3), 24);

    let decision = encounter.engine().take_turn(blocked).unwrap();

    assert_eq!(decision, TurnDecision::Blocked);
    let monster = encounter.monster(blocked);
    assert_eq!(monster.move_turn_remaining, 3);
    assert!(!monster.is_busy());
    assert_eq!(monster.cell, Some(CellIndex(24)));
}

#[test]
fn inner_monster_vacates_before_outer_decides() {
    let mut encounter = Encounter::new(GameConfig::default());
    let outer = encounter.ready(slime(5), 36);
    let inner = encounter.ready(slime(5), 24);

    assert_eq!(encounter.state.turn_order(), vec![inner, outer]);
    for id in encounter.state.turn_order() {
        assert!(encounter.engine().take_turn(id).unwrap().is_move());
    }
    assert_eq!(encounter.monster(inner).cell, Some(CellIndex(12)));
    assert_eq!(encounter.monster(outer).cell, Some(CellIndex(24)));
}

#[test]
fn busy_and_dead_monsters_are_skipped_as_recoverable() {
    let mut encounter = Encounter::new(GameConfig::default());
    let mut engine = encounter.engine();
    let appearing = engine.spawn(slime(5), CellIndex(40), 300).unwrap();

    let error = engine.take_turn(appearing).unwrap_err();
    assert_eq!(error, EncounterError::MonsterBusy(appearing));
    assert!(error.severity().is_recoverable());

    engine
        .kill(appearing, siege_core::DeathCause::Slain, Default::default())
        .unwrap();
    assert_eq!(
        engine.take_turn(appearing).unwrap_err(),
        EncounterError::MonsterDead(appearing)
    );
}

#[test]
fn out_of_range_cell_is_an_internal_error() {
    let mut encounter = Encounter::new(GameConfig::default());
    let id = encounter.ready(slime(5), 40);
    encounter.state.monster_mut(id).unwrap().cell = Some(CellIndex(500));

    let error = encounter.engine().take_turn(id).unwrap_err();

    assert_eq!(
        error,
        EncounterError::Grid(GridError::CellOutOfRange {
            cell: CellIndex(500),
            cell_count: 144,
        })
    );
    assert_eq!(error.severity(), ErrorSeverity::Internal);
}

#[test]
fn spawning_onto_an_occupied_cell_is_rejected() {
    let mut encounter = Encounter::new(GameConfig::default());
    let first = encounter.ready(slime(5), 40);

    let error = encounter
        .engine()
        .spawn(slime(5), CellIndex(40), 0)
        .unwrap_err();

    assert_eq!(
        error,
        EncounterError::Grid(GridError::CellOccupied {
            cell: CellIndex(40),
            occupant: first,
        })
    );
    assert_eq!(encounter.state.monsters.len(), 1);
}
