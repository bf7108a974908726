use axum::{
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use fleet_control::{get_strategic_tips, strategic_tips, Tip};
use fleet_core::{
    evaluate_game_status, step_turn, GameId, GameState, Outcome, TurnOrders,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_BUDGET: i64 = 65_000;
pub const DEFAULT_SATELLITES: i64 = 4;

pub fn make_router(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/meta", get(meta_handler))
        .route(
            "/api/v1/games",
            get(list_games_handler).post(create_game_handler),
        )
        .route("/api/v1/games/:id", get(snapshot_handler))
        .route("/api/v1/games/:id/turn", post(turn_handler))
        .route("/api/v1/games/:id/outcome", get(outcome_handler))
        .route("/api/v1/games/:id/tips", get(tips_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidGameId(raw.to_string()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewGameRequest {
    pub budget: Option<i64>,
    pub satellites: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub state: GameState,
    pub outcome: Outcome,
    pub tips: Vec<String>,
}

pub async fn meta_handler(
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let games = app_state.repo.list().map_err(ApiError::Storage)?.len();
    Ok(Json(serde_json::json!({
        "content_version": app_state.content.content_version,
        "max_turns": app_state.content.constants.max_turns,
        "games": games,
    })))
}

pub async fn list_games_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<GameId>>, ApiError> {
    Ok(Json(app_state.repo.list().map_err(ApiError::Storage)?))
}

pub async fn create_game_handler(
    State(app_state): State<AppState>,
    Json(request): Json<NewGameRequest>,
) -> Result<(StatusCode, Json<GameState>), ApiError> {
    let budget = request.budget.unwrap_or(DEFAULT_BUDGET);
    let satellites = request.satellites.unwrap_or(DEFAULT_SATELLITES);
    let state = app_state.create_game(budget, satellites)?;
    tracing::info!(game_id = %state.meta.id, budget, satellites, "game created");
    Ok((StatusCode::CREATED, Json(state)))
}

pub async fn snapshot_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    let id = parse_game_id(&id)?;
    Ok(Json(app_state.load(id)?))
}

/// Steps one game. Concurrent turns on the same game run one after the other.
pub async fn turn_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(orders): Json<TurnOrders>,
) -> Result<Json<TurnResponse>, ApiError> {
    let id = parse_game_id(&id)?;
    let lock = app_state.game_lock(id);
    let stepped = {
        let _guard = lock.lock();
        step_stored_game(&app_state, id, &orders)
    };
    app_state.release_game_lock(id, lock);
    let next = stepped?;

    let outcome = evaluate_game_status(&next);
    if outcome.is_over() {
        tracing::info!(game_id = %id, turn = next.meta.turn, ?outcome, "game decided");
    }
    let tips = get_strategic_tips(&next);
    Ok(Json(TurnResponse {
        state: next,
        outcome,
        tips,
    }))
}

/// Load, step and save. Callers hold the game's lock.
fn step_stored_game(
    app_state: &AppState,
    id: GameId,
    orders: &TurnOrders,
) -> Result<GameState, ApiError> {
    let state = app_state.load(id)?;
    if evaluate_game_status(&state).is_over() {
        return Err(ApiError::GameOver(id));
    }
    let mut rng = app_state.turn_rng(&state);
    let next = step_turn(&state, orders, &app_state.content, &mut rng);
    app_state.save(&next)?;
    Ok(next)
}

pub async fn outcome_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    let id = parse_game_id(&id)?;
    Ok(Json(evaluate_game_status(&app_state.load(id)?)))
}

pub async fn tips_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Tip>>, ApiError> {
    let id = parse_game_id(&id)?;
    Ok(Json(strategic_tips(&app_state.load(id)?)))
}
