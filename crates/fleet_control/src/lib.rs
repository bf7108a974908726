mod advisor;

pub use advisor::{get_strategic_tips, strategic_tips, Tip};

use fleet_core::{
    ActionOrder, Assignment, Constants, GameContent, GameState, Satellite, SatelliteAction,
    SatelliteId, Task, TurnOrders,
};

pub trait OrderSource {
    fn generate_orders(&mut self, state: &GameState, content: &GameContent) -> TurnOrders;
}

/// Plays a turn automatically, then always advances:
/// 1. Refuel satellites running low on fuel.
/// 2. Maneuver satellites with high collision risk.
/// 3. Maintain satellites whose efficiency has slipped.
/// 4. Image with idle satellites while the budget has headroom.
/// 5. Hand pending tasks to the satellite with the most fuel left.
///
/// Spending stops short of `budget_reserve` so the fleet can still pay its
/// operating costs and penalties.
#[derive(Debug, Clone)]
pub struct AutopilotController {
    pub refuel_below: f32,
    pub cam_above_risk: f32,
    pub maintain_below_efficiency: f32,
    pub budget_reserve: i64,
    pub imaging_reserve: i64,
}

impl Default for AutopilotController {
    fn default() -> Self {
        Self {
            refuel_below: 25.0,
            cam_above_risk: 0.25,
            maintain_below_efficiency: 0.75,
            budget_reserve: 5_000,
            imaging_reserve: 25_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Fuel and budget after this turn's planned orders.
struct Plan {
    budget: i64,
    fuel: Vec<(SatelliteId, f32)>,
    orders: TurnOrders,
}

impl Plan {
    fn new(state: &GameState) -> Self {
        Plan {
            budget: state.budget,
            fuel: state
                .active_satellites()
                .map(|sat| (sat.id.clone(), sat.fuel))
                .collect(),
            orders: TurnOrders::advance_only(),
        }
    }

    fn order(&mut self, satellite_id: &SatelliteId, action: SatelliteAction, c: &Constants) {
        let (cost, fuel_after) = {
            let fuel = self.fuel_of(satellite_id);
            match action {
                SatelliteAction::Refuel => (c.refuel_cost, 100.0),
                SatelliteAction::Cam => (c.cam_cost, fuel - c.cam_fuel),
                SatelliteAction::Imaging => (c.imaging_cost, fuel - c.imaging_fuel),
                SatelliteAction::Maintenance => (c.maintenance_cost, fuel),
            }
        };
        self.budget -= cost;
        self.set_fuel(satellite_id, fuel_after);
        self.orders.actions.push(ActionOrder {
            satellite_id: satellite_id.clone(),
            action,
        });
    }

    fn fuel_of(&self, satellite_id: &SatelliteId) -> f32 {
        self.fuel
            .iter()
            .find(|(id, _)| id == satellite_id)
            .map_or(0.0, |(_, fuel)| *fuel)
    }

    fn set_fuel(&mut self, satellite_id: &SatelliteId, value: f32) {
        if let Some(entry) = self.fuel.iter_mut().find(|(id, _)| id == satellite_id) {
            entry.1 = value;
        }
    }
}

/// Paying tasks first, most urgent priority first, then earliest deadline.
fn tasks_by_urgency(state: &GameState) -> Vec<&Task> {
    let mut tasks: Vec<&Task> = state.tasks.iter().collect();
    tasks.sort_by(|a, b| {
        (b.reward > 0)
            .cmp(&(a.reward > 0))
            .then(b.priority.cmp(&a.priority))
            .then(a.deadline.cmp(&b.deadline))
            .then(a.id.cmp(&b.id))
    });
    tasks
}

impl AutopilotController {
    fn plan_action(&self, plan: &Plan, sat: &Satellite, c: &Constants) -> Option<SatelliteAction> {
        let spendable = plan.budget - self.budget_reserve;
        let fuel = sat.fuel;
        if fuel < self.refuel_below && spendable >= c.refuel_cost {
            Some(SatelliteAction::Refuel)
        } else if sat.collision_risk > self.cam_above_risk
            && fuel >= c.cam_fuel
            && spendable >= c.cam_cost
        {
            Some(SatelliteAction::Cam)
        } else if sat.efficiency < self.maintain_below_efficiency
            && spendable >= c.maintenance_cost
        {
            Some(SatelliteAction::Maintenance)
        } else if fuel >= self.refuel_below + c.imaging_fuel
            && plan.budget - self.imaging_reserve >= c.imaging_cost
        {
            Some(SatelliteAction::Imaging)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// AutopilotController
// ---------------------------------------------------------------------------

impl OrderSource for AutopilotController {
    fn generate_orders(&mut self, state: &GameState, content: &GameContent) -> TurnOrders {
        let c = &content.constants;
        let mut plan = Plan::new(state);

        for sat in state.active_satellites() {
            if let Some(action) = self.plan_action(&plan, sat, c) {
                plan.order(&sat.id, action, c);
            }
        }

        let mut busy: Vec<SatelliteId> = Vec::new();
        for task in tasks_by_urgency(state) {
            let candidate = plan
                .fuel
                .iter()
                .filter(|(id, fuel)| *fuel >= task.fuel && !busy.contains(id))
                .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
                .map(|(id, _)| id.clone());
            let Some(satellite_id) = candidate else {
                continue;
            };
            let remaining = plan.fuel_of(&satellite_id) - task.fuel;
            plan.set_fuel(&satellite_id, remaining);
            busy.push(satellite_id.clone());
            plan.orders.assignments.push(Assignment {
                task_id: task.id.clone(),
                satellite_id,
            });
        }

        plan.orders
    }
}
