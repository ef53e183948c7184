// 🌐 HTTP API - the browser front end's view of a Session
//
// Every route is one synchronous Session transition behind a mutex.
// Roster ids come in as path/body strings and are validated here;
// everything past that point is permissive.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::TeamSettings;
use crate::grouping::GenerationResult;
use crate::member::Member;
use crate::roster::RosterId;
use crate::session::Session;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    titles: Arc<TeamSettings>,
}

impl AppState {
    pub fn new(session: Session, titles: TeamSettings) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            titles: Arc::new(titles),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        // A panicked handler cannot leave a half-applied move behind,
        // so the data is still consistent.
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterView {
    pub id: RosterId,
    pub title: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub source: String,
    pub dest: String,
    pub member_id: String,
}

fn bad_request(message: String) -> Response {
    warn!(%message, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ApiResponse::err(message))).into_response()
}

fn parse_roster(value: &str) -> Result<RosterId, Response> {
    value.parse().map_err(|e: crate::ShuffleError| bad_request(e.to_string()))
}

fn mutation(changed: bool, member_id: Option<String>) -> Response {
    Json(ApiResponse::ok(MutationResponse { changed, member_id })).into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/rosters - Both rosters in display order
async fn get_rosters(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session();
    let rosters: Vec<RosterView> = RosterId::ALL
        .into_iter()
        .map(|id| RosterView {
            id,
            title: state.titles.title(id).to_string(),
            members: session.store().roster(id).members().to_vec(),
        })
        .collect();

    Json(ApiResponse::ok(rosters))
}

/// POST /api/rosters/:roster/members - Add a member
async fn add_member(
    State(state): State<AppState>,
    Path(roster): Path<String>,
    Json(request): Json<AddMemberRequest>,
) -> Response {
    let roster = match parse_roster(&roster) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let member_id = state.session().add(roster, &request.name);
    mutation(member_id.is_some(), member_id)
}

/// DELETE /api/rosters/:roster/members/:id - Remove a member
async fn remove_member(
    State(state): State<AppState>,
    Path((roster, member_id)): Path<(String, String)>,
) -> Response {
    let roster = match parse_roster(&roster) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let changed = state.session().remove(roster, &member_id);
    mutation(changed, None)
}

/// POST /api/moves - Move a member between rosters (a drop)
async fn move_member(State(state): State<AppState>, Json(request): Json<MoveRequest>) -> Response {
    let (source, dest) = match (parse_roster(&request.source), parse_roster(&request.dest)) {
        (Ok(source), Ok(dest)) => (source, dest),
        (Err(response), _) | (_, Err(response)) => return response,
    };

    let changed = state.session().move_member(source, dest, &request.member_id);
    mutation(changed, None)
}

/// POST /api/generate - Group both rosters and open the result
async fn generate(State(state): State<AppState>) -> impl IntoResponse {
    let mut session = state.session();
    let result = session.generate().clone();
    Json(ApiResponse::ok(result))
}

/// GET /api/result - The open result, or null
async fn get_result(State(state): State<AppState>) -> impl IntoResponse {
    let result: Option<GenerationResult> = state.session().result().cloned();
    Json(ApiResponse::ok(result))
}

/// DELETE /api/result - Close the result view
async fn close_result(State(state): State<AppState>) -> Response {
    let changed = state.session().close_result();
    mutation(changed, None)
}

/// GET / - Serve the web UI
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/rosters", get(get_rosters))
        .route("/rosters/:roster/members", post(add_member))
        .route("/rosters/:roster/members/:id", delete(remove_member))
        .route("/moves", post(move_member))
        .route("/generate", post(generate))
        .route("/result", get(get_result).delete(close_result))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
