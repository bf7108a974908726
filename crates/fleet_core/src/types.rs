//! Type definitions for `fleet_core`.
//!
//! All public types, structs, enums, and ID newtypes used by the turn engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::GameError;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(SatelliteId);
string_id!(TaskId);
string_id!(EventId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(GameId)
    }
}

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatelliteStatus {
    Active,
    /// Terminal. Set once by a collision and never cleared.
    Failed,
}

/// Per-satellite action the player can order once per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SatelliteAction {
    Refuel,
    /// Collision-avoidance maneuver.
    Cam,
    Imaging,
    Maintenance,
}

impl SatelliteAction {
    pub const ALL: [SatelliteAction; 4] = [
        SatelliteAction::Refuel,
        SatelliteAction::Cam,
        SatelliteAction::Imaging,
        SatelliteAction::Maintenance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SatelliteAction::Refuel => "REFUEL",
            SatelliteAction::Cam => "CAM",
            SatelliteAction::Imaging => "IMAGING",
            SatelliteAction::Maintenance => "MAINTENANCE",
        }
    }
}

impl std::fmt::Display for SatelliteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SatelliteAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SatelliteAction::ALL
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownAction(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    EarthObservation,
    Communications,
    Scientific,
    Defense,
    Maintenance,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    /// Payout multiplier applied when a rewarded task completes.
    pub fn reward_multiplier(self) -> f64 {
        match self {
            TaskPriority::Critical => 1.3,
            TaskPriority::High => 1.15,
            TaskPriority::Medium | TaskPriority::Low => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub meta: MetaState,
    /// Signed: a turn may push the budget below zero.
    pub budget: i64,
    /// Creation order.
    pub satellites: Vec<Satellite>,
    /// Active contracts, unique by id.
    pub tasks: Vec<Task>,
    /// Append-only log. Never read back by the engine.
    pub history: Vec<EventEnvelope>,
    pub stats: FleetStats,
    pub counters: Counters,
}

impl GameState {
    pub fn satellite(&self, id: &SatelliteId) -> Option<&Satellite> {
        self.satellites.iter().find(|sat| &sat.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn active_satellites(&self) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter().filter(|sat| sat.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_satellites().count()
    }

    /// `initial_budget + total_earned - total_spent`; equals `budget` in every
    /// state the engine returns.
    pub fn ledger_balance(&self) -> i64 {
        self.meta.initial_budget + self.stats.total_earned - self.stats.total_spent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaState {
    pub id: GameId,
    pub turn: u64,
    pub max_turns: u64,
    pub initial_budget: i64,
    pub schema_version: u32,
    pub content_version: String,
}

/// Running totals. Only ever incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetStats {
    pub collisions: u64,
    pub emergencies: u64,
    pub tasks_completed: u64,
    pub total_earned: i64,
    pub total_spent: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub next_event_id: u64,
    pub next_task_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub id: SatelliteId,
    pub status: SatelliteStatus,
    /// Percent, 0..=100.
    pub fuel: f32,
    /// Probability weight, 0..=1.
    pub collision_risk: f32,
    /// 0..=1. Drift never takes it below `Constants::efficiency_floor`.
    pub efficiency: f32,
}

impl Satellite {
    pub fn is_active(&self) -> bool {
        self.status == SatelliteStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    /// Zero marks a maintenance/safety task.
    pub reward: i64,
    /// Charged as `abs(penalty)` on expiry or forced failure.
    pub penalty: i64,
    pub fuel: f32,
    /// Turn at which the task expires if still unresolved.
    pub deadline: u64,
}

// ---------------------------------------------------------------------------
// Order types
// ---------------------------------------------------------------------------

/// Everything the player submits for one engine call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnOrders {
    /// Applied in submission order.
    #[serde(default)]
    pub actions: Vec<ActionOrder>,
    /// Applied in submission order, after all actions.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub advance: bool,
}

impl TurnOrders {
    /// Orders that only close the turn.
    pub fn advance_only() -> Self {
        TurnOrders {
            advance: true,
            ..TurnOrders::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOrder {
    pub satellite_id: SatelliteId,
    pub action: SatelliteAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub task_id: TaskId,
    pub satellite_id: SatelliteId,
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub turn: u64,
    pub event: Event,
}

/// Display grouping for history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Error,
    Success,
    Penalty,
    Emergency,
    Collision,
    Operational,
    Imaging,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    InsufficientBudget { required: i64, available: i64 },
    InsufficientFuel { required: f32, available: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discovery {
    None,
    Partial,
    Major,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ActionFailed {
        satellite_id: SatelliteId,
        action: SatelliteAction,
        failure: FailureReason,
    },
    Refueled {
        satellite_id: SatelliteId,
        cost: i64,
    },
    ManeuverExecuted {
        satellite_id: SatelliteId,
        cost: i64,
        risk_after: f32,
    },
    ImagingCompleted {
        satellite_id: SatelliteId,
        cost: i64,
        reward: i64,
        discovery: Discovery,
    },
    MaintenancePerformed {
        satellite_id: SatelliteId,
        cost: i64,
    },
    TaskFailed {
        task_id: TaskId,
        title: String,
        satellite_id: SatelliteId,
        penalty: i64,
        fuel_required: f32,
        fuel_available: f32,
    },
    TaskCompleted {
        task_id: TaskId,
        title: String,
        satellite_id: SatelliteId,
        reward: i64,
    },
    SafetyTaskCompleted {
        task_id: TaskId,
        title: String,
        satellite_id: SatelliteId,
    },
    TaskExpired {
        task_id: TaskId,
        title: String,
        penalty: i64,
    },
    OperationalCost {
        cost: i64,
        active: u32,
        total: u32,
    },
    Emergency {
        cost: i64,
    },
    Collision {
        satellite_id: SatelliteId,
        cost: i64,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ActionFailed { .. } | Event::TaskFailed { .. } => EventKind::Error,
            Event::TaskCompleted { .. } => EventKind::Success,
            Event::TaskExpired { .. } => EventKind::Penalty,
            Event::Emergency { .. } => EventKind::Emergency,
            Event::Collision { .. } => EventKind::Collision,
            Event::Refueled { .. } | Event::ManeuverExecuted { .. } | Event::OperationalCost { .. } => {
                EventKind::Operational
            }
            Event::ImagingCompleted { .. } => EventKind::Imaging,
            Event::MaintenancePerformed { .. } | Event::SafetyTaskCompleted { .. } => {
                EventKind::Maintenance
            }
        }
    }

    /// Amount debited by this event, if any.
    pub fn cost(&self) -> Option<i64> {
        match self {
            Event::Refueled { cost, .. }
            | Event::ManeuverExecuted { cost, .. }
            | Event::ImagingCompleted { cost, .. }
            | Event::MaintenancePerformed { cost, .. }
            | Event::OperationalCost { cost, .. }
            | Event::Emergency { cost }
            | Event::Collision { cost, .. } => Some(*cost),
            Event::TaskFailed { penalty, .. } | Event::TaskExpired { penalty, .. } => {
                Some(*penalty)
            }
            Event::ActionFailed { .. }
            | Event::TaskCompleted { .. }
            | Event::SafetyTaskCompleted { .. } => None,
        }
    }

    /// Amount credited by this event, if any.
    pub fn reward(&self) -> Option<i64> {
        match self {
            Event::ImagingCompleted { reward, .. } | Event::TaskCompleted { reward, .. } => {
                Some(*reward)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::ActionFailed {
                satellite_id,
                action,
                failure: FailureReason::InsufficientBudget { required, available },
            } => write!(
                f,
                "{satellite_id}: {action} failed, insufficient budget ({available} of {required})"
            ),
            Event::ActionFailed {
                satellite_id,
                action,
                failure: FailureReason::InsufficientFuel { required, available },
            } => write!(
                f,
                "{satellite_id}: {action} failed, insufficient fuel ({available:.1}% of {required:.1}%)"
            ),
            Event::Refueled { satellite_id, cost } => {
                write!(f, "{satellite_id} refueled to 100% (-{cost})")
            }
            Event::ManeuverExecuted {
                satellite_id,
                cost,
                risk_after,
            } => write!(
                f,
                "{satellite_id} executed collision-avoidance maneuver, risk now {:.1}% (-{cost})",
                risk_after * 100.0
            ),
            Event::ImagingCompleted {
                satellite_id,
                cost,
                reward,
                discovery,
            } => {
                write!(f, "{satellite_id} imaging pass earned {reward} (-{cost})")?;
                match discovery {
                    Discovery::Major => f.write_str(", major discovery"),
                    Discovery::Partial => f.write_str(", minor discovery"),
                    Discovery::None => Ok(()),
                }
            }
            Event::MaintenancePerformed { satellite_id, cost } => {
                write!(f, "{satellite_id} maintenance completed (-{cost})")
            }
            Event::TaskFailed {
                title,
                satellite_id,
                penalty,
                fuel_required,
                fuel_available,
                ..
            } => write!(
                f,
                "'{title}' failed on {satellite_id}: needs {fuel_required:.1}% fuel, has {fuel_available:.1}% (-{penalty})"
            ),
            Event::TaskCompleted {
                title,
                satellite_id,
                reward,
                ..
            } => write!(f, "'{title}' completed by {satellite_id} (+{reward})"),
            Event::SafetyTaskCompleted {
                title,
                satellite_id,
                ..
            } => write!(f, "'{title}' completed by {satellite_id}, collision risk reduced"),
            Event::TaskExpired { title, penalty, .. } => {
                write!(f, "'{title}' expired (-{penalty})")
            }
            Event::OperationalCost {
                cost,
                active,
                total,
            } => write!(f, "Operational costs for {active}/{total} satellites (-{cost})"),
            Event::Emergency { cost } => {
                write!(f, "Ground segment emergency required immediate response (-{cost})")
            }
            Event::Collision { satellite_id, cost } => {
                write!(f, "{satellite_id} lost in a debris collision (-{cost})")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameContent {
    pub content_version: String,
    pub task_templates: Vec<TaskTemplate>,
    /// Catalog indices seeded into every new game.
    pub starter_tasks: Vec<usize>,
    pub constants: Constants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub title: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub reward: i64,
    pub penalty: i64,
    pub fuel: f32,
    /// Turns from creation until the deadline.
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    pub max_turns: u64,

    // Action costs, per action, independent of satellite.
    pub refuel_cost: i64,
    pub cam_cost: i64,
    pub imaging_cost: i64,
    pub maintenance_cost: i64,

    pub cam_fuel: f32,
    pub cam_risk_reduction: f32,
    pub imaging_fuel: f32,
    pub imaging_efficiency_gain: f32,
    pub imaging_base_reward: i64,
    pub discovery_bonus: i64,
    /// Single draw below this value: full discovery bonus.
    pub discovery_chance: f64,
    /// Width of the band above `discovery_chance` that pays the partial bonus.
    pub partial_discovery_chance: f64,
    pub partial_discovery_share: f64,
    pub maintenance_risk_reduction: f32,
    pub maintenance_efficiency_gain: f32,

    /// Risk removed by completing a zero-reward task.
    pub safety_task_risk_reduction: f32,
    pub high_efficiency_threshold: f32,
    pub high_efficiency_bonus: f64,

    pub base_operational_cost: i64,
    pub operational_cost_factor: f64,

    // Per-turn drift for active satellites.
    pub fuel_regen_min: f32,
    pub fuel_regen_max: f32,
    pub risk_drift_min: f32,
    pub risk_drift_max: f32,
    pub efficiency_decay_chance: f64,
    pub efficiency_decay: f32,
    pub efficiency_floor: f32,

    /// After this turn two tasks are offered per advance instead of one.
    pub late_game_turn: u64,

    pub emergency_chance: f64,
    pub emergency_cost: i64,
    /// Collision probability per advance is `mean_risk × collision_risk_factor`.
    pub collision_risk_factor: f64,
    pub collision_cost: i64,

    // Factory ranges for new satellites.
    pub satellite_risk_min: f32,
    pub satellite_risk_max: f32,
    pub satellite_efficiency_min: f32,
    pub satellite_efficiency_max: f32,
}
