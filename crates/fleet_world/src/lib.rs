//! Content loading and game persistence shared between fleet_cli and fleet_daemon.

mod repository;

pub use repository::{GameRepository, InMemoryRepository, JsonDirRepository};

use anyhow::{Context, Result};
use fleet_core::{Constants, GameContent, TaskTemplate};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Deserialize)]
struct TaskCatalogFile {
    content_version: String,
    starter_tasks: Vec<usize>,
    templates: Vec<TaskTemplate>,
}

fn check_range(name: &str, min: f32, max: f32) {
    assert!(
        min <= max,
        "constant range '{name}' is inverted: min {min} > max {max}",
    );
}

fn check_probability(name: &str, value: f64) {
    assert!(
        (0.0..=1.0).contains(&value),
        "constant '{name}' = {value} is not a probability",
    );
}

/// Validates loaded content, panicking on any authoring error.
///
/// Catches mistakes like: a starter task index past the end of the catalog,
/// a template with no turns before its deadline, or a min/max range written
/// the wrong way round.
pub fn validate_content(content: &GameContent) {
    assert!(
        !content.task_templates.is_empty(),
        "task catalog has no templates"
    );

    let mut titles: HashSet<&str> = HashSet::new();
    for template in &content.task_templates {
        assert!(!template.title.is_empty(), "task template has empty title");
        assert!(
            titles.insert(template.title.as_str()),
            "task template '{}' is defined twice",
            template.title,
        );
        assert!(
            template.duration > 0,
            "task template '{}' has zero duration",
            template.title,
        );
        assert!(
            template.reward >= 0 && template.penalty >= 0,
            "task template '{}' has a negative reward or penalty",
            template.title,
        );
        assert!(
            (0.0..=100.0).contains(&template.fuel),
            "task template '{}' fuel {} is outside 0..=100",
            template.title,
            template.fuel,
        );
    }

    for &index in &content.starter_tasks {
        assert!(
            index < content.task_templates.len(),
            "starter task index {index} is not a known template (catalog has {})",
            content.task_templates.len(),
        );
    }

    validate_constants(&content.constants);
}

fn validate_constants(c: &Constants) {
    assert!(c.max_turns > 0, "max_turns must be positive");
    for (name, cost) in [
        ("refuel_cost", c.refuel_cost),
        ("cam_cost", c.cam_cost),
        ("imaging_cost", c.imaging_cost),
        ("maintenance_cost", c.maintenance_cost),
        ("base_operational_cost", c.base_operational_cost),
        ("emergency_cost", c.emergency_cost),
        ("collision_cost", c.collision_cost),
    ] {
        assert!(cost >= 0, "constant '{name}' is negative: {cost}");
    }

    check_range("fuel_regen", c.fuel_regen_min, c.fuel_regen_max);
    check_range("risk_drift", c.risk_drift_min, c.risk_drift_max);
    check_range("satellite_risk", c.satellite_risk_min, c.satellite_risk_max);
    check_range(
        "satellite_efficiency",
        c.satellite_efficiency_min,
        c.satellite_efficiency_max,
    );

    check_probability("discovery_chance", c.discovery_chance);
    check_probability("partial_discovery_chance", c.partial_discovery_chance);
    check_probability(
        "discovery_chance + partial_discovery_chance",
        c.discovery_chance + c.partial_discovery_chance,
    );
    check_probability("partial_discovery_share", c.partial_discovery_share);
    check_probability("efficiency_decay_chance", c.efficiency_decay_chance);
    check_probability("emergency_chance", c.emergency_chance);

    assert!(
        (0.0..=1.0).contains(&c.efficiency_floor),
        "efficiency_floor {} is outside 0..=1",
        c.efficiency_floor,
    );
}

pub fn load_content(dir: &Path) -> Result<GameContent> {
    let constants: Constants = serde_json::from_str(
        &std::fs::read_to_string(dir.join("constants.json")).context("reading constants.json")?,
    )
    .context("parsing constants.json")?;
    let catalog: TaskCatalogFile = serde_json::from_str(
        &std::fs::read_to_string(dir.join("task_catalog.json"))
            .context("reading task_catalog.json")?,
    )
    .context("parsing task_catalog.json")?;
    let content = GameContent {
        content_version: catalog.content_version,
        task_templates: catalog.templates,
        starter_tasks: catalog.starter_tasks,
        constants,
    };
    validate_content(&content);
    Ok(content)
}

/// Loads `dir` when it exists, otherwise the built-in standard content.
pub fn load_content_or_standard(dir: &Path) -> Result<GameContent> {
    if dir.is_dir() {
        load_content(dir).with_context(|| format!("loading content from {}", dir.display()))
    } else {
        Ok(GameContent::standard())
    }
}
