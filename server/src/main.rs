mod config;
mod store;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use c4_engine::{
    select_ai_move, BattleMode, Board, Difficulty, GameError, GameOutcome, GameSession,
    MoveOutcome, SearchConfig, Turn,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::config::{config_path, ServerConfig};
use crate::store::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = config_path();
    let config = ServerConfig::load_or_default(&path)?;
    init_tracing(&config.log_filter);
    if !path.exists() {
        warn!(path = %path.display(), "config file not found, using defaults");
    }

    let state = AppState::resume(&config)?;
    let app = app_router(state);

    let listener = TcpListener::bind(&config.addr).await?;
    info!("Listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

type Session = GameSession<JsonFileStore>;

#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<Session>>,
    save_path: PathBuf,
    search: SearchConfig,
}

impl AppState {
    /// Picks up the saved game, if any.
    fn resume(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = JsonFileStore::new(&config.save_path);
        let found = store.path().exists();
        let session = GameSession::resume(store)?.with_search(config.search);
        if found {
            info!(
                path = %config.save_path.display(),
                turn = ?session.turn(),
                mode = ?session.mode(),
                outcome = ?session.outcome(),
                "resumed saved game"
            );
        } else {
            info!(path = %config.save_path.display(), "no saved game, starting fresh");
        }
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            save_path: config.save_path.clone(),
            search: config.search,
        })
    }
}

fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/game", get(get_game).post(new_game))
        .route("/game/move", post(play_move))
        .route("/game/ai-turn", post(ai_turn))
        .route("/ai/move", post(ai_move));
    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

/// Read-only view of the session for rendering.
#[derive(Debug, Serialize, Deserialize)]
struct GameView {
    rows: usize,
    cols: usize,
    /// Bottom row first.
    board: Board,
    turn: Turn,
    battle_mode: BattleMode,
    difficulty: Option<Difficulty>,
    outcome: GameOutcome,
}

impl From<&Session> for GameView {
    fn from(session: &Session) -> Self {
        let board = session.board().clone();
        GameView {
            rows: board.rows(),
            cols: board.cols(),
            board,
            turn: session.turn(),
            battle_mode: session.mode(),
            difficulty: session.difficulty(),
            outcome: session.outcome(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewGameRequest {
    battle_mode: BattleMode,
    difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    column: usize,
}

#[derive(Debug, Serialize)]
struct MoveResponse {
    moves: Vec<MoveOutcome>,
    /// Set when the human move was kept but the computer could not answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_error: Option<String>,
    game: GameView,
}

#[derive(Debug, Deserialize)]
struct AiMoveRequest {
    board: Board,
    difficulty: Difficulty,
}

#[derive(Debug, Serialize, Deserialize)]
struct AiMoveResponse {
    column: usize,
}

fn lock(state: &AppState) -> Result<std::sync::MutexGuard<'_, Session>, ApiError> {
    state
        .session
        .lock()
        .map_err(|_| ApiError(anyhow!("game session lock poisoned")))
}

async fn get_game(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let session = lock(&state)?;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(GameView::from(&*session))))
}

async fn new_game(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<GameView>, ApiError> {
    let mut session = lock(&state)?;
    let store = JsonFileStore::new(&state.save_path);
    *session = GameSession::new(req.battle_mode, req.difficulty, store)?.with_search(state.search);
    info!(mode = ?req.battle_mode, difficulty = ?req.difficulty, "new game");
    Ok(Json(GameView::from(&*session)))
}

/// Applies the human move, then lets the computer answer when it is its turn.
/// A failed reply does not undo the human move; it is reported in `ai_error`.
async fn play_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let mut session = lock(&state)?;
    let mut moves = Vec::new();

    let human = session.play(req.column)?;
    info!(
        seat = ?human.seat,
        column = human.column,
        row = human.row,
        outcome = ?human.outcome,
        "move applied"
    );
    moves.push(human);

    let mut ai_error = None;
    if session.awaits_computer() {
        match session.play_ai_turn() {
            Ok(reply) => {
                debug!(
                    column = reply.column,
                    row = reply.row,
                    outcome = ?reply.outcome,
                    "computer replied"
                );
                moves.push(reply);
            }
            Err(err) => {
                warn!(error = %err, "computer reply failed, human move kept");
                ai_error = Some(err.to_string());
            }
        }
    }

    Ok(Json(MoveResponse {
        moves,
        ai_error,
        game: GameView::from(&*session),
    }))
}

/// Plays the computer's pending move, e.g. after resuming a save made between
/// the human move and the reply.
async fn ai_turn(State(state): State<AppState>) -> Result<Json<MoveResponse>, ApiError> {
    let mut session = lock(&state)?;
    let reply = session.play_ai_turn()?;
    info!(column = reply.column, row = reply.row, outcome = ?reply.outcome, "computer moved");
    Ok(Json(MoveResponse {
        moves: vec![reply],
        ai_error: None,
        game: GameView::from(&*session),
    }))
}

/// Stateless suggestion for the second seat on an arbitrary board.
async fn ai_move(
    State(state): State<AppState>,
    Json(req): Json<AiMoveRequest>,
) -> Result<Json<AiMoveResponse>, ApiError> {
    let column = select_ai_move(&req.board, req.difficulty, state.search)?;
    debug!(difficulty = ?req.difficulty, column, "suggested move");
    Ok(Json(AiMoveResponse { column }))
}

#[derive(Debug)]
struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<GameError>() {
            Some(GameError::Persistence(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
            Some(err) if err.is_rejected_move() => StatusCode::BAD_REQUEST,
            Some(GameError::DepthOutOfRange(_) | GameError::MissingDifficulty) => {
                StatusCode::BAD_REQUEST
            }
            Some(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }
        let body = format!("{}", self.0);
        (status, body).into_response()
    }
}
