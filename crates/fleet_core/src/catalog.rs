//! Built-in task catalog and balance constants.
//!
//! Mirrors `content/task_catalog.json` and `content/constants.json`; binaries
//! fall back to this when no content directory is available.

use crate::{Constants, GameContent, TaskCategory, TaskPriority, TaskTemplate};

pub const STANDARD_CONTENT_VERSION: &str = "fleet-ops-1";

fn template(
    title: &str,
    category: TaskCategory,
    priority: TaskPriority,
    reward: i64,
    penalty: i64,
    fuel: f32,
    duration: u64,
) -> TaskTemplate {
    TaskTemplate {
        title: title.to_string(),
        category,
        priority,
        reward,
        penalty,
        fuel,
        duration,
    }
}

pub fn standard_task_templates() -> Vec<TaskTemplate> {
    use TaskCategory::{Communications, Defense, EarthObservation, Emergency, Maintenance, Scientific};
    use TaskPriority::{Critical, High, Low, Medium};

    vec![
        template("Wildfire Monitoring", EarthObservation, High, 9_000, 3_500, 12.0, 3),
        template("Maritime Relay Window", Communications, Medium, 6_000, 2_000, 8.0, 4),
        template("Crop Health Survey", EarthObservation, Low, 4_500, 1_500, 10.0, 5),
        template("Debris Field Inspection", Maintenance, Medium, 0, 2_500, 6.0, 3),
        template("Solar Storm Response", Emergency, Critical, 14_000, 7_000, 18.0, 2),
        template("Atmospheric Sounding", Scientific, Medium, 7_500, 2_500, 14.0, 4),
        template("Border Surveillance Pass", Defense, High, 11_000, 4_500, 15.0, 3),
        template("Station-Keeping Audit", Maintenance, Low, 0, 1_500, 4.0, 4),
        template("Flood Mapping Tasking", EarthObservation, Critical, 12_500, 6_000, 16.0, 2),
    ]
}

pub fn standard_constants() -> Constants {
    Constants {
        max_turns: 20,
        refuel_cost: 2_000,
        cam_cost: 1_200,
        imaging_cost: 800,
        maintenance_cost: 1_500,
        cam_fuel: 8.0,
        cam_risk_reduction: 0.2,
        imaging_fuel: 2.0,
        imaging_efficiency_gain: 0.05,
        imaging_base_reward: 2_200,
        discovery_bonus: 6_000,
        discovery_chance: 0.15,
        partial_discovery_chance: 0.20,
        partial_discovery_share: 0.3,
        maintenance_risk_reduction: 0.08,
        maintenance_efficiency_gain: 0.03,
        safety_task_risk_reduction: 0.12,
        high_efficiency_threshold: 0.9,
        high_efficiency_bonus: 1.1,
        base_operational_cost: 2_500,
        operational_cost_factor: 0.8,
        fuel_regen_min: 8.0,
        fuel_regen_max: 15.0,
        risk_drift_min: 0.008,
        risk_drift_max: 0.02,
        efficiency_decay_chance: 0.3,
        efficiency_decay: 0.01,
        efficiency_floor: 0.5,
        late_game_turn: 8,
        emergency_chance: 0.08,
        emergency_cost: 5_000,
        collision_risk_factor: 0.35,
        collision_cost: 15_000,
        satellite_risk_min: 0.05,
        satellite_risk_max: 0.15,
        satellite_efficiency_min: 0.85,
        satellite_efficiency_max: 0.95,
    }
}

impl GameContent {
    /// Catalog and constants the game ships with.
    pub fn standard() -> Self {
        GameContent {
            content_version: STANDARD_CONTENT_VERSION.to_string(),
            task_templates: standard_task_templates(),
            starter_tasks: vec![0, 1, 3],
            constants: standard_constants(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_tasks_point_into_catalog() {
        let content = GameContent::standard();
        for index in &content.starter_tasks {
            assert!(*index < content.task_templates.len());
        }
    }

    #[test]
    fn catalog_has_safety_and_critical_templates() {
        let templates = standard_task_templates();
        assert!(templates.iter().any(|t| t.reward == 0));
        assert!(templates.iter().any(|t| t.priority == TaskPriority::Critical));
        assert!(templates.iter().all(|t| t.duration > 0 && t.penalty > 0));
    }
}
