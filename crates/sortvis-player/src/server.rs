//! Axum web server with WebSocket streaming for playback.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{State, ws::{Message, WebSocket, WebSocketUpgrade}},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sortvis_trace::{Algorithm, Trace};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::frame::Frame;
use crate::playback::Direction;
use crate::session::Session;

type AppState = Arc<Session>;

/// Playback server.
pub struct PlayerServer {
    session: Arc<Session>,
}

impl PlayerServer {
    /// Create a server around a session.
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/trace", get(get_trace_handler).post(load_handler))
            .route("/api/playback", get(frame_handler))
            .route("/api/playback/toggle", post(toggle_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/rate", post(rate_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(Arc::clone(&self.session))
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Playback server running on http://{}", addr);
        axum::serve(listener, self.router()).await?;
        self.session.shutdown().await;
        Ok(())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Trace(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Serialize)]
struct AlgorithmInfo {
    name: &'static str,
    title: &'static str,
}

async fn algorithms_handler() -> Json<Vec<AlgorithmInfo>> {
    Json(
        Algorithm::ALL
            .iter()
            .map(|a| AlgorithmInfo {
                name: a.name(),
                title: a.title(),
            })
            .collect(),
    )
}

#[derive(Deserialize)]
struct LoadRequest {
    algorithm: String,
    values: Vec<f64>,
}

async fn load_handler(
    State(session): State<AppState>,
    Json(req): Json<LoadRequest>,
) -> Result<Json<Frame>, Error> {
    let algorithm: Algorithm = req.algorithm.parse()?;
    let frame = session.load_input(algorithm, &req.values).await?;
    Ok(Json(frame))
}

async fn get_trace_handler(State(session): State<AppState>) -> Json<Option<Trace>> {
    Json(session.trace().await)
}

async fn frame_handler(State(session): State<AppState>) -> Json<Frame> {
    Json(session.frame().await)
}

async fn toggle_handler(State(session): State<AppState>) -> Json<Frame> {
    Json(session.toggle_play().await)
}

async fn pause_handler(State(session): State<AppState>) -> Json<Frame> {
    Json(session.pause().await)
}

/// Navigation result: whether the cursor moved, and where it is now.
#[derive(Serialize)]
struct Moved {
    moved: bool,
    frame: Frame,
}

#[derive(Deserialize)]
struct StepRequest {
    direction: Direction,
}

async fn step_handler(
    State(session): State<AppState>,
    Json(req): Json<StepRequest>,
) -> Json<Moved> {
    let (moved, frame) = session.step(req.direction).await;
    Json(Moved { moved, frame })
}

#[derive(Deserialize)]
struct SeekRequest {
    index: usize,
}

async fn seek_handler(
    State(session): State<AppState>,
    Json(req): Json<SeekRequest>,
) -> Json<Moved> {
    let (moved, frame) = session.seek(req.index).await;
    Json(Moved { moved, frame })
}

#[derive(Deserialize)]
struct RateRequest {
    level: i32,
}

async fn rate_handler(
    State(session): State<AppState>,
    Json(req): Json<RateRequest>,
) -> Json<Frame> {
    Json(session.set_rate(req.level).await)
}

async fn ws_handler(ws: WebSocketUpgrade, State(session): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, session))
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetFrame,
    Load { algorithm: String, values: Vec<f64> },
    Toggle,
    Pause,
    Step { direction: Direction },
    Seek { index: usize },
    Rate { level: i32 },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Frame(Frame),
    Error { message: String },
}

async fn handle_ws(mut socket: WebSocket, session: AppState) {
    let mut frames = session.subscribe();
    let initial = frames.borrow_and_update().clone();
    if send(&mut socket, &WsResponse::Frame(initial)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = match serde_json::from_str::<WsCommand>(text.as_str()) {
                            Ok(cmd) => handle_ws_command(&session, cmd).await,
                            Err(e) => Some(WsResponse::Error { message: e.to_string() }),
                        };
                        if let Some(reply) = reply {
                            if send(&mut socket, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();
                if send(&mut socket, &WsResponse::Frame(frame)).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Apply a command. State changes reach the client through the frame feed,
/// so only queries and failures produce a direct reply.
async fn handle_ws_command(session: &Session, cmd: WsCommand) -> Option<WsResponse> {
    match cmd {
        WsCommand::GetFrame => return Some(WsResponse::Frame(session.frame().await)),
        WsCommand::Load { algorithm, values } => {
            let loaded: Result<Frame, Error> = match algorithm.parse::<Algorithm>() {
                Ok(algorithm) => session.load_input(algorithm, &values).await,
                Err(e) => Err(e.into()),
            };
            if let Err(e) = loaded {
                return Some(WsResponse::Error { message: e.to_string() });
            }
        }
        WsCommand::Toggle => {
            session.toggle_play().await;
        }
        WsCommand::Pause => {
            session.pause().await;
        }
        WsCommand::Step { direction } => {
            session.step(direction).await;
        }
        WsCommand::Seek { index } => {
            session.seek(index).await;
        }
        WsCommand::Rate { level } => {
            session.set_rate(level).await;
        }
    }
    None
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> Result<(), axum::Error> {
    match serde_json::to_string(response) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            warn!("Failed to encode response: {}", e);
            Ok(())
        }
    }
}
