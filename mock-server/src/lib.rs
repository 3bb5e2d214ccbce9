use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: String,
    pub lives: u32,
    /// Not part of the client's model; exercises unknown-field tolerance.
    pub turn: u32,
}

#[derive(Deserialize)]
pub struct Hit {
    #[serde(default = "one")]
    pub damage: u32,
}

fn one() -> u32 {
    1
}

pub type Db = Arc<RwLock<HashMap<String, Game>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/game", get(start_game))
        .route("/api/game/{id}", get(get_game))
        .route("/api/game/{id}/hit", post(hit))
        .route("/api/game/{id}/moved", get(moved))
        .route("/api/broken", get(broken))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": { "message": message } }))).into_response()
}

async fn start_game(State(db): State<Db>) -> Json<Game> {
    let game = Game {
        game_id: Uuid::new_v4().to_string(),
        lives: STARTING_LIVES,
        turn: 0,
    };
    db.write().await.insert(game.game_id.clone(), game.clone());
    Json(game)
}

async fn get_game(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.read().await.get(&id) {
        Some(game) => Json(game.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "not found"),
    }
}

async fn hit(State(db): State<Db>, Path(id): Path<String>, Form(input): Form<Hit>) -> Response {
    let mut games = db.write().await;
    let Some(game) = games.get_mut(&id) else {
        return api_error(StatusCode::NOT_FOUND, "not found");
    };
    if game.lives == 0 {
        return api_error(StatusCode::CONFLICT, "game over");
    }
    game.lives = game.lives.saturating_sub(input.damage);
    game.turn += 1;
    Json(game.clone()).into_response()
}

/// Answers with a redirect that also carries the game as its body.
async fn moved(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.read().await.get(&id) {
        Some(game) => (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, format!("/api/game/{id}/elsewhere"))],
            Json(game.clone()),
        )
            .into_response(),
        None => api_error(StatusCode::NOT_FOUND, "not found"),
    }
}

/// Error status with a body that is not the `{"error": ...}` shape.
async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}
