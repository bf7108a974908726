use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use fleet_core::{GameError, GameId};

/// Request failures. Game outcomes such as bankruptcy are never errors here.
#[derive(Debug)]
pub enum ApiError {
    InvalidGameId(String),
    GameNotFound(GameId),
    InvalidGame(GameError),
    GameOver(GameId),
    Storage(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidGameId(_) => StatusCode::BAD_REQUEST,
            ApiError::GameNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidGame(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::GameOver(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::InvalidGameId(raw) => format!("'{raw}' is not a game id"),
            ApiError::GameNotFound(id) => format!("no game with id {id}"),
            ApiError::InvalidGame(err) => err.to_string(),
            ApiError::GameOver(id) => format!("game {id} is already decided"),
            ApiError::Storage(_) => "storage failure".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(err) = &self {
            tracing::error!("game storage failed: {err:#}");
        }
        let body = serde_json::json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}
