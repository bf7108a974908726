use super::*;

#[test]
fn test_refuel_without_budget_logs_failure_and_changes_nothing() {
    let content = base_content();
    let mut state = base_state(&content);
    set_budget(&mut state, content.constants.refuel_cost - 1);
    satellite_mut(&mut state, "SAT-1").fuel = 40.0;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Refuel)]),
        &content,
        &mut make_rng(),
    );

    assert_eq!(next.budget, state.budget);
    assert!(approx(satellite(&next, "SAT-1").fuel, 40.0));
    assert_eq!(next.history.len(), 1);
    assert!(matches!(
        events(&next)[0],
        Event::ActionFailed {
            action: SatelliteAction::Refuel,
            failure: FailureReason::InsufficientBudget { .. },
            ..
        }
    ));
    assert_eq!(next.history[0].event.kind(), EventKind::Error);
}

#[test]
fn test_refuel_fills_tank_and_debits_cost() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-2").fuel = 30.0;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-2", SatelliteAction::Refuel)]),
        &content,
        &mut make_rng(),
    );

    assert!(approx(satellite(&next, "SAT-2").fuel, 100.0));
    assert_eq!(next.budget, 65_000 - content.constants.refuel_cost);
    assert_eq!(next.stats.total_spent, content.constants.refuel_cost);
    assert_eq!(
        next.history[0].event.cost(),
        Some(content.constants.refuel_cost)
    );
}

#[test]
fn test_cam_burns_fuel_and_lowers_risk() {
    let content = base_content();
    let mut state = base_state(&content);
    let sat = satellite_mut(&mut state, "SAT-1");
    sat.fuel = 10.0;
    sat.collision_risk = 0.5;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Cam)]),
        &content,
        &mut make_rng(),
    );

    let sat = satellite(&next, "SAT-1");
    assert!(approx(sat.fuel, 2.0));
    assert!(approx(sat.collision_risk, 0.3));
    assert_eq!(next.budget, 65_000 - content.constants.cam_cost);
    assert!(matches!(events(&next)[0], Event::ManeuverExecuted { .. }));
}

#[test]
fn test_cam_risk_never_goes_below_zero() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-1").collision_risk = 0.15;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Cam)]),
        &content,
        &mut make_rng(),
    );

    assert!(satellite(&next, "SAT-1").collision_risk.abs() < f32::EPSILON);
}

#[test]
fn test_cam_without_fuel_reports_fuel_shortage() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-1").fuel = 7.0;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Cam)]),
        &content,
        &mut make_rng(),
    );

    assert_eq!(next.budget, 65_000);
    assert!(approx(satellite(&next, "SAT-1").fuel, 7.0));
    assert!(matches!(
        events(&next)[0],
        Event::ActionFailed {
            failure: FailureReason::InsufficientFuel { .. },
            ..
        }
    ));
}

#[test]
fn test_cam_without_budget_reports_budget_shortage() {
    let content = base_content();
    let mut state = base_state(&content);
    set_budget(&mut state, content.constants.cam_cost - 1);

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Cam)]),
        &content,
        &mut make_rng(),
    );

    assert!(approx(satellite(&next, "SAT-1").fuel, 100.0));
    assert!(matches!(
        events(&next)[0],
        Event::ActionFailed {
            failure: FailureReason::InsufficientBudget { .. },
            ..
        }
    ));
}

#[test]
fn test_cam_short_on_both_reports_fuel_first() {
    let content = base_content();
    let mut state = base_state(&content);
    set_budget(&mut state, 0);
    satellite_mut(&mut state, "SAT-1").fuel = 1.0;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Cam)]),
        &content,
        &mut make_rng(),
    );

    assert!(matches!(
        events(&next)[0],
        Event::ActionFailed {
            failure: FailureReason::InsufficientFuel { .. },
            ..
        }
    ));
}

#[test]
fn test_imaging_pays_efficiency_scaled_reward() {
    let content = base_content();
    let c = &content.constants;
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-1").efficiency = 0.9;

    // 0.5 misses both discovery bands.
    let mut rng = ScriptedRng::new(&[0.5]);
    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Imaging)]),
        &content,
        &mut rng,
    );

    let sat = satellite(&next, "SAT-1");
    assert!(approx(sat.fuel, 98.0));
    assert!(approx(sat.efficiency, 0.95));
    // 2200 × 1.3
    assert_eq!(next.budget, 65_000 - c.imaging_cost + 2_860);
    assert_eq!(next.stats.total_earned, 2_860);
    assert!(matches!(
        events(&next)[0],
        Event::ImagingCompleted {
            reward: 2_860,
            discovery: Discovery::None,
            ..
        }
    ));
    assert_eq!(next.history[0].event.kind(), EventKind::Imaging);
}

#[test]
fn test_imaging_low_efficiency_pays_base_reward() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-1").efficiency = 0.6;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Imaging)]),
        &content,
        &mut ScriptedRng::new(&[0.9]),
    );

    assert_eq!(next.history[0].event.reward(), Some(2_200));
}

#[test]
fn test_imaging_discovery_bands_share_one_draw() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-1").efficiency = 0.6;

    let cases = [
        (0.1, Discovery::Major, 2_200 + 6_000),
        (0.2, Discovery::Partial, 2_200 + 1_800),
        (0.34, Discovery::Partial, 2_200 + 1_800),
        (0.4, Discovery::None, 2_200),
    ];
    for (draw, expected_discovery, expected_reward) in cases {
        let mut rng = ScriptedRng::new(&[draw]);
        let next = step_turn(
            &state,
            &actions_only(vec![action("SAT-1", SatelliteAction::Imaging)]),
            &content,
            &mut rng,
        );
        let Event::ImagingCompleted {
            reward, discovery, ..
        } = events(&next)[0]
        else {
            panic!("expected imaging event for draw {draw}");
        };
        assert_eq!(*discovery, expected_discovery, "draw {draw}");
        assert_eq!(*reward, expected_reward, "draw {draw}");
        assert_eq!(rng.remaining(), 0, "exactly one draw per imaging pass");
    }
}

#[test]
fn test_imaging_efficiency_capped_at_one() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-1").efficiency = 0.98;

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Imaging)]),
        &content,
        &mut make_rng(),
    );

    assert!(approx(satellite(&next, "SAT-1").efficiency, 1.0));
}

#[test]
fn test_imaging_without_fuel_fails() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-1").fuel = 1.5;

    let mut rng = ScriptedRng::new(&[0.0]);
    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-1", SatelliteAction::Imaging)]),
        &content,
        &mut rng,
    );

    assert_eq!(next.budget, 65_000);
    assert_eq!(rng.remaining(), 1, "failed imaging consumes no draw");
    assert!(matches!(events(&next)[0], Event::ActionFailed { .. }));
}

#[test]
fn test_maintenance_lowers_risk_and_raises_efficiency() {
    let content = base_content();
    let state = base_state(&content);

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-3", SatelliteAction::Maintenance)]),
        &content,
        &mut make_rng(),
    );

    let sat = satellite(&next, "SAT-3");
    assert!(approx(sat.collision_risk, 0.02));
    assert!(approx(sat.efficiency, 0.83));
    assert!(approx(sat.fuel, 100.0));
    assert_eq!(next.budget, 65_000 - content.constants.maintenance_cost);
    assert_eq!(next.history[0].event.kind(), EventKind::Maintenance);
}

#[test]
fn test_actions_on_failed_satellite_are_skipped_silently() {
    let content = base_content();
    let mut state = base_state(&content);
    satellite_mut(&mut state, "SAT-2").status = SatelliteStatus::Failed;
    satellite_mut(&mut state, "SAT-2").fuel = 20.0;
    let before = satellite(&state, "SAT-2").clone();

    let orders = actions_only(
        SatelliteAction::ALL
            .into_iter()
            .map(|a| action("SAT-2", a))
            .collect(),
    );
    let next = step_turn(&state, &orders, &content, &mut make_rng());

    assert_eq!(satellite(&next, "SAT-2"), &before);
    assert_eq!(next.budget, state.budget);
    assert!(next.history.is_empty());
}

#[test]
fn test_actions_on_unknown_satellite_are_skipped_silently() {
    let content = base_content();
    let state = base_state(&content);

    let next = step_turn(
        &state,
        &actions_only(vec![action("SAT-99", SatelliteAction::Refuel)]),
        &content,
        &mut make_rng(),
    );

    assert_eq!(next, state);
}

#[test]
fn test_actions_apply_in_submission_order() {
    let content = base_content();
    let c = &content.constants;
    let mut state = base_state(&content);
    set_budget(&mut state, c.refuel_cost + 100);
    satellite_mut(&mut state, "SAT-1").fuel = 50.0;

    let next = step_turn(
        &state,
        &actions_only(vec![
            action("SAT-1", SatelliteAction::Refuel),
            action("SAT-2", SatelliteAction::Maintenance),
        ]),
        &content,
        &mut make_rng(),
    );

    assert!(matches!(events(&next)[0], Event::Refueled { .. }));
    assert!(matches!(
        events(&next)[1],
        Event::ActionFailed {
            action: SatelliteAction::Maintenance,
            ..
        }
    ));
    assert_eq!(next.budget, 100);
}

#[test]
fn test_unknown_action_names_are_rejected_at_parse() {
    assert_eq!("REFUEL".parse::<SatelliteAction>(), Ok(SatelliteAction::Refuel));
    assert_eq!("cam".parse::<SatelliteAction>(), Ok(SatelliteAction::Cam));
    assert_eq!(
        "WARP".parse::<SatelliteAction>(),
        Err(GameError::UnknownAction("WARP".to_string()))
    );
    assert!(serde_json::from_str::<SatelliteAction>("\"WARP\"").is_err());
    assert_eq!(
        serde_json::from_str::<SatelliteAction>("\"IMAGING\"").unwrap(),
        SatelliteAction::Imaging
    );
}
