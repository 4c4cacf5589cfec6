use std::time::Duration;

use lawn_defence_core::{
    CellCoord, Cue, EnemyKind, PixelPoint, PlacementError, PlantKind, SessionState, Tuning,
    WavePhase,
};
use lawn_defence_session::{ClickOutcome, Session, SessionError};

const FRAME_MS: u64 = 100;

fn playing(tuning: Tuning, seed: u64) -> Session {
    let mut session = Session::new(tuning, seed).expect("valid tuning");
    session.start_session().expect("start from menu");
    session
}

#[test]
fn placing_a_shooter_charges_once_and_occupies_the_cell() {
    let mut session = playing(Tuning::default(), 1);
    assert_eq!(session.snapshot().balance, 500);

    session.select_plant(PlantKind::Shooter).expect("affordable");
    let cell = CellCoord::new(2, 2);
    let plant = session.attempt_place(cell).expect("first placement succeeds");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.balance, 400);
    assert!(snapshot
        .plants
        .iter()
        .any(|snapshot| snapshot.id == plant && snapshot.cell == cell));
    assert_eq!(
        session.attempt_place(cell),
        Err(PlacementError::CellOccupied),
        "the selection stays armed and the cell is taken",
    );
    assert_eq!(session.snapshot().balance, 400, "a rejected placement is free");

    let cues = session.drain_cues();
    assert_eq!(
        cues,
        vec![Cue::MenuClick, Cue::PlantPlaced(PlantKind::Shooter)]
    );
}

#[test]
fn placement_checks_play_state_before_selection() {
    let mut session = Session::new(Tuning::default(), 1).expect("valid tuning");
    assert_eq!(
        session.attempt_place(CellCoord::new(0, 0)),
        Err(PlacementError::NotPlaying)
    );
    session.start_session().expect("start");
    assert_eq!(
        session.attempt_place(CellCoord::new(0, 0)),
        Err(PlacementError::NoSelection)
    );
    session.select_plant(PlantKind::Blocker).expect("affordable");
    assert_eq!(
        session.attempt_place(CellCoord::new(9, 0)),
        Err(PlacementError::OutOfBounds)
    );
}

#[test]
fn undefended_lawn_is_lost_to_the_first_enemy() {
    let mut session = playing(Tuning::default(), 2);
    let mut cues = Vec::new();

    while session.state() == SessionState::Playing
        && session.snapshot().elapsed < Duration::from_secs(120)
    {
        session.tick(FRAME_MS);
        cues.extend(session.drain_cues());
    }

    assert_eq!(session.state(), SessionState::GameOver);
    assert_eq!(cues.last(), Some(&Cue::GameOver));
    let elapsed = session.snapshot().elapsed;
    assert!(
        elapsed > Duration::from_secs(55) && elapsed < Duration::from_secs(70),
        "a lone enemy needs roughly 27 seconds after the 30 second delay, took {elapsed:?}",
    );

    let frozen = session.snapshot().elapsed;
    session.tick(FRAME_MS);
    assert_eq!(session.snapshot().elapsed, frozen, "game over stops the clock");
}

#[test]
fn two_waves_repelled_by_a_shooter_column_end_in_victory() {
    let mut tuning = Tuning::default();
    tuning.waves.counts = vec![3, 5];
    tuning.enemies.normal.health = 25;
    tuning.enemies.armored.health = 25;
    let mut session = playing(tuning, 3);

    session.select_plant(PlantKind::Shooter).expect("affordable");
    for row in 0..5 {
        let _ = session
            .attempt_place(CellCoord::new(0, row))
            .expect("five shooters fit the starting balance");
    }
    assert_eq!(session.snapshot().balance, 0);

    let mut destroyed = 0;
    let mut destroyed_before_wave_two = None;
    while session.state() == SessionState::Playing
        && session.snapshot().elapsed < Duration::from_secs(180)
    {
        session.tick(FRAME_MS);
        destroyed += session
            .drain_cues()
            .into_iter()
            .filter(|cue| {
                matches!(
                    cue,
                    Cue::EnemyDestroyed(EnemyKind::Normal | EnemyKind::Armored)
                )
            })
            .count();
        if destroyed_before_wave_two.is_none() && session.snapshot().wave.wave == 2 {
            destroyed_before_wave_two = Some(destroyed);
        }
    }

    assert_eq!(session.state(), SessionState::Victory);
    assert_eq!(
        destroyed_before_wave_two,
        Some(3),
        "wave two starts only once the three enemies of wave one are gone",
    );
    assert_eq!(destroyed, 8);
    let wave = session.snapshot().wave;
    assert_eq!(wave.phase, WavePhase::AllCleared);
    assert_eq!(wave.final_wave, 2);
}

#[test]
fn uncollected_natural_pickup_expires_without_credit() {
    let mut session = playing(Tuning::default(), 4);

    let mut created_by = None;
    while created_by.is_none() {
        session.tick(FRAME_MS);
        let snapshot = session.snapshot();
        if !snapshot.pickups.is_empty() {
            created_by = Some(snapshot.elapsed);
        }
        assert!(snapshot.elapsed < Duration::from_secs(11), "expected a natural drop");
    }

    let lifetime_ms = session.tuning().pickups.lifetime_ms;
    session.tick(lifetime_ms);
    session.tick(1);

    let snapshot = session.snapshot();
    assert!(snapshot.pickups.is_empty(), "pickup must be gone at t0 + L + 1");
    assert_eq!(snapshot.balance, 500);
    assert!(!session.drain_cues().contains(&Cue::PickupCollected));
}

#[test]
fn click_collects_a_pickup_before_placing() {
    let mut session = playing(Tuning::default(), 5);
    while session.snapshot().pickups.is_empty() {
        session.tick(FRAME_MS);
    }
    session.select_plant(PlantKind::Generator).expect("affordable");

    let snapshot = session.snapshot();
    let point = snapshot.pickups.iter().next().expect("pickup").bounds.center();
    assert_eq!(
        session.click(point),
        Ok(ClickOutcome::Collected { value: 25 })
    );
    assert_eq!(session.snapshot().balance, 525);
    assert!(session.snapshot().plants.is_empty(), "collection consumes the click");

    let outcome = session.click(point).expect("playing");
    match snapshot.grid.cell_at(point) {
        Some(_) => assert!(matches!(outcome, ClickOutcome::Placed { .. })),
        None => assert_eq!(outcome, ClickOutcome::Ignored),
    }
    assert_eq!(
        session.click(PixelPoint::new(400.0, 10.0)),
        Ok(ClickOutcome::Ignored),
        "clicks above the lawn do nothing",
    );
}

#[test]
fn state_machine_rejects_invalid_transitions() {
    let mut session = Session::new(Tuning::default(), 6).expect("valid tuning");
    assert_eq!(
        session.restart_session(),
        Err(SessionError::InvalidTransition {
            from: SessionState::Menu,
            to: SessionState::Playing,
        })
    );
    assert!(session.return_to_menu().is_err());

    session.show_help().expect("menu to help");
    assert_eq!(session.state(), SessionState::Help);
    assert!(session.start_session().is_err(), "help only returns to the menu");
    session.return_to_menu().expect("help to menu");

    session.start_session().expect("menu to playing");
    assert!(session.show_help().is_err());
    session.return_to_menu().expect("playing to menu");
    assert_eq!(session.state(), SessionState::Menu);
    assert_eq!(
        session.drain_cues(),
        vec![Cue::MenuClick, Cue::MenuClick],
        "help and start are menu clicks",
    );
}

#[test]
fn restart_after_defeat_resets_the_run() {
    let mut session = playing(Tuning::default(), 7);
    session.select_plant(PlantKind::Blocker).expect("affordable");
    let _ = session.attempt_place(CellCoord::new(8, 0)).expect("placed");
    while session.state() == SessionState::Playing {
        session.tick(500);
    }
    assert_eq!(session.state(), SessionState::GameOver);

    session.restart_session().expect("restart after game over");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Playing);
    assert_eq!(snapshot.balance, 500);
    assert_eq!(snapshot.elapsed, Duration::ZERO);
    assert!(snapshot.plants.is_empty());
    assert!(snapshot.enemies.is_empty());
    assert_eq!(snapshot.selected, None);
    assert_eq!(snapshot.wave.phase, WavePhase::Idle);
}

#[test]
fn identical_seeds_and_inputs_replay_identically() {
    let first = replay(0xdead_beef);
    let second = replay(0xdead_beef);
    assert_eq!(first, second, "replay diverged between runs");
}

fn replay(seed: u64) -> (String, Vec<Cue>) {
    let mut session = playing(Tuning::default(), seed);
    let mut cues = Vec::new();
    session.select_plant(PlantKind::Generator).expect("affordable");
    let _ = session.attempt_place(CellCoord::new(0, 1)).expect("placed");
    session.select_plant(PlantKind::Shooter).expect("affordable");
    for row in [0, 2, 4] {
        let _ = session.attempt_place(CellCoord::new(1, row)).expect("placed");
    }
    for frame in 0..900 {
        session.tick(FRAME_MS);
        if frame % 10 == 0 {
            let pickups: Vec<PixelPoint> = session
                .snapshot()
                .pickups
                .iter()
                .map(|pickup| pickup.bounds.center())
                .collect();
            for point in pickups {
                let _ = session.attempt_collect(point);
            }
        }
        cues.extend(session.drain_cues());
    }
    (format!("{:?}", session.snapshot()), cues)
}
