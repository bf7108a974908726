//! Phase A: per-satellite actions.

use rand::Rng;

use crate::dice::roll;
use crate::ledger::{can_afford, credit, debit};
use crate::{
    ActionOrder, Constants, Discovery, Event, FailureReason, GameContent, GameState,
    SatelliteAction, SatelliteId,
};

/// Apply every action in submission order. Orders naming a missing or failed
/// satellite are skipped without a log entry.
pub(crate) fn apply_actions(
    state: &mut GameState,
    orders: &[ActionOrder],
    content: &GameContent,
    rng: &mut impl Rng,
) {
    for order in orders {
        let Some(index) = active_index(state, &order.satellite_id) else {
            continue;
        };
        let c = &content.constants;
        match order.action {
            SatelliteAction::Refuel => refuel(state, index, c),
            SatelliteAction::Cam => maneuver(state, index, c),
            SatelliteAction::Imaging => imaging(state, index, c, rng),
            SatelliteAction::Maintenance => maintenance(state, index, c),
        }
    }
}

fn active_index(state: &GameState, id: &SatelliteId) -> Option<usize> {
    state
        .satellites
        .iter()
        .position(|sat| &sat.id == id && sat.is_active())
}

fn action_cost(action: SatelliteAction, c: &Constants) -> i64 {
    match action {
        SatelliteAction::Refuel => c.refuel_cost,
        SatelliteAction::Cam => c.cam_cost,
        SatelliteAction::Imaging => c.imaging_cost,
        SatelliteAction::Maintenance => c.maintenance_cost,
    }
}

/// Checks fuel first, then budget. Logs the failure and returns false if
/// either is short.
fn check_preconditions(
    state: &mut GameState,
    index: usize,
    action: SatelliteAction,
    fuel_needed: f32,
    c: &Constants,
) -> bool {
    let cost = action_cost(action, c);
    let sat = &state.satellites[index];
    let failure = if sat.fuel < fuel_needed {
        Some(FailureReason::InsufficientFuel {
            required: fuel_needed,
            available: sat.fuel,
        })
    } else if !can_afford(state, cost) {
        Some(FailureReason::InsufficientBudget {
            required: cost,
            available: state.budget,
        })
    } else {
        None
    };

    match failure {
        Some(failure) => {
            let satellite_id = state.satellites[index].id.clone();
            crate::record(
                state,
                Event::ActionFailed {
                    satellite_id,
                    action,
                    failure,
                },
            );
            false
        }
        None => true,
    }
}

fn refuel(state: &mut GameState, index: usize, c: &Constants) {
    if !check_preconditions(state, index, SatelliteAction::Refuel, 0.0, c) {
        return;
    }
    debit(state, c.refuel_cost);
    let sat = &mut state.satellites[index];
    sat.fuel = 100.0;
    let satellite_id = sat.id.clone();
    crate::record(
        state,
        Event::Refueled {
            satellite_id,
            cost: c.refuel_cost,
        },
    );
}

fn maneuver(state: &mut GameState, index: usize, c: &Constants) {
    if !check_preconditions(state, index, SatelliteAction::Cam, c.cam_fuel, c) {
        return;
    }
    debit(state, c.cam_cost);
    let sat = &mut state.satellites[index];
    sat.fuel -= c.cam_fuel;
    sat.collision_risk = (sat.collision_risk - c.cam_risk_reduction).max(0.0);
    let event = Event::ManeuverExecuted {
        satellite_id: sat.id.clone(),
        cost: c.cam_cost,
        risk_after: sat.collision_risk,
    };
    crate::record(state, event);
}

/// Payout multiplier for an imaging pass at the given efficiency.
pub fn imaging_multiplier(efficiency: f32) -> f64 {
    if efficiency > 0.85 {
        1.3
    } else if efficiency > 0.7 {
        1.15
    } else {
        1.0
    }
}

/// One draw against cumulative bands: below `discovery_chance` pays the full
/// bonus, the next `partial_discovery_chance` pays the partial share.
fn discovery_roll(c: &Constants, rng: &mut impl Rng) -> (Discovery, i64) {
    let draw = roll(rng);
    if draw < c.discovery_chance {
        (Discovery::Major, c.discovery_bonus)
    } else if draw < c.discovery_chance + c.partial_discovery_chance {
        #[allow(clippy::cast_possible_truncation)]
        let partial = (c.discovery_bonus as f64 * c.partial_discovery_share).round() as i64;
        (Discovery::Partial, partial)
    } else {
        (Discovery::None, 0)
    }
}

fn imaging(state: &mut GameState, index: usize, c: &Constants, rng: &mut impl Rng) {
    if !check_preconditions(state, index, SatelliteAction::Imaging, c.imaging_fuel, c) {
        return;
    }
    debit(state, c.imaging_cost);
    let sat = &mut state.satellites[index];
    sat.fuel -= c.imaging_fuel;
    sat.efficiency = (sat.efficiency + c.imaging_efficiency_gain).min(1.0);
    let satellite_id = sat.id.clone();

    #[allow(clippy::cast_possible_truncation)]
    let base = (c.imaging_base_reward as f64 * imaging_multiplier(sat.efficiency)).round() as i64;
    let (discovery, bonus) = discovery_roll(c, rng);
    let reward = base + bonus;
    credit(state, reward);

    crate::record(
        state,
        Event::ImagingCompleted {
            satellite_id,
            cost: c.imaging_cost,
            reward,
            discovery,
        },
    );
}

fn maintenance(state: &mut GameState, index: usize, c: &Constants) {
    if !check_preconditions(state, index, SatelliteAction::Maintenance, 0.0, c) {
        return;
    }
    debit(state, c.maintenance_cost);
    let sat = &mut state.satellites[index];
    sat.collision_risk = (sat.collision_risk - c.maintenance_risk_reduction).max(0.0);
    sat.efficiency = (sat.efficiency + c.maintenance_efficiency_gain).min(1.0);
    let satellite_id = sat.id.clone();
    crate::record(
        state,
        Event::MaintenancePerformed {
            satellite_id,
            cost: c.maintenance_cost,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imaging_multiplier_bands() {
        assert!((imaging_multiplier(0.9) - 1.3).abs() < 1e-9);
        assert!((imaging_multiplier(0.85) - 1.15).abs() < 1e-9);
        assert!((imaging_multiplier(0.71) - 1.15).abs() < 1e-9);
        assert!((imaging_multiplier(0.7) - 1.0).abs() < 1e-9);
    }
}
