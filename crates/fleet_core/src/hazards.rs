//! End-of-turn settlement: operating costs, satellite drift, and the two
//! stochastic hazards (ground emergencies and debris collisions).

use rand::Rng;

use crate::dice::{chance, pick, uniform};
use crate::ledger::debit;
use crate::metrics::{mean_active_efficiency, mean_active_risk};
use crate::{Constants, Event, GameState, SatelliteStatus};

/// Discount applied to operating costs for a well-kept fleet.
pub fn operational_discount(mean_efficiency: f32) -> f64 {
    if mean_efficiency > 0.8 {
        0.85
    } else if mean_efficiency > 0.6 {
        0.93
    } else {
        1.0
    }
}

/// `base × (active / total) × factor × discount`, rounded. Zero for an
/// empty fleet.
#[allow(clippy::cast_possible_truncation)]
pub fn operational_cost(state: &GameState, c: &Constants) -> i64 {
    let total = state.satellites.len();
    if total == 0 {
        return 0;
    }
    let active_ratio = state.active_count() as f64 / total as f64;
    let discount = operational_discount(mean_active_efficiency(state));
    (c.base_operational_cost as f64 * active_ratio * c.operational_cost_factor * discount).round()
        as i64
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn charge_operations(state: &mut GameState, c: &Constants) {
    let cost = operational_cost(state, c);
    debit(state, cost);
    let event = Event::OperationalCost {
        cost,
        active: state.active_count() as u32,
        total: state.satellites.len() as u32,
    };
    crate::record(state, event);
}

/// Fuel regenerates, risk creeps up, and efficiency occasionally decays.
/// Three draws per active satellite, in fleet order.
pub(crate) fn drift_satellites(state: &mut GameState, c: &Constants, rng: &mut impl Rng) {
    for sat in state.satellites.iter_mut().filter(|s| s.is_active()) {
        sat.fuel = (sat.fuel + uniform(rng, c.fuel_regen_min, c.fuel_regen_max)).clamp(0.0, 100.0);
        sat.collision_risk = (sat.collision_risk + uniform(rng, c.risk_drift_min, c.risk_drift_max))
            .clamp(0.0, 1.0);
        if chance(rng, c.efficiency_decay_chance) {
            sat.efficiency = (sat.efficiency - c.efficiency_decay).max(c.efficiency_floor);
        }
    }
}

/// One draw; on a hit the emergency cost is charged.
pub(crate) fn roll_emergency(state: &mut GameState, c: &Constants, rng: &mut impl Rng) {
    if !chance(rng, c.emergency_chance) {
        return;
    }
    debit(state, c.emergency_cost);
    state.stats.emergencies += 1;
    tracing::info!(turn = state.meta.turn, cost = c.emergency_cost, "emergency");
    crate::record(
        state,
        Event::Emergency {
            cost: c.emergency_cost,
        },
    );
}

/// Hit probability is `mean_risk × collision_risk_factor`. On a hit a second
/// draw picks the victim among active satellites. No draws at all when the
/// fleet has no active satellite.
pub(crate) fn roll_collision(state: &mut GameState, c: &Constants, rng: &mut impl Rng) {
    let active: Vec<usize> = state
        .satellites
        .iter()
        .enumerate()
        .filter(|(_, sat)| sat.is_active())
        .map(|(index, _)| index)
        .collect();
    if active.is_empty() {
        return;
    }
    let probability = f64::from(mean_active_risk(state)) * c.collision_risk_factor;
    if !chance(rng, probability) {
        return;
    }

    let index = active[pick(rng, active.len())];
    let sat = &mut state.satellites[index];
    sat.status = SatelliteStatus::Failed;
    let satellite_id = sat.id.clone();
    debit(state, c.collision_cost);
    state.stats.collisions += 1;
    tracing::info!(turn = state.meta.turn, satellite = %satellite_id, "collision");
    crate::record(
        state,
        Event::Collision {
            satellite_id,
            cost: c.collision_cost,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_bands() {
        assert!((operational_discount(0.81) - 0.85).abs() < 1e-9);
        assert!((operational_discount(0.8) - 0.93).abs() < 1e-9);
        assert!((operational_discount(0.61) - 0.93).abs() < 1e-9);
        assert!((operational_discount(0.6) - 1.0).abs() < 1e-9);
    }
}
