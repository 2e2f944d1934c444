// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use confreview_api::{
    AuthenticatedActor, AuthenticationService, Dispatcher, ErrorKind, LogNotifier,
    OperationRequest, ServiceError, translate_domain_error,
};
use confreview_audit::AuditEvent;
use confreview_domain::{Conference, ConferenceId};
use confreview_persistence::{ConferenceSummary, Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Conference paper reviewing server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// JSON file holding a list of conferences to store on start
    #[arg(short, long)]
    seed: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// Requests are serialized on the persistence mutex.
#[derive(Clone)]
struct AppState {
    /// Conference snapshots and audit log.
    persistence: Arc<Mutex<Persistence>>,
    /// Operation registry and dispatcher.
    dispatcher: Arc<Dispatcher>,
}

/// Body of `POST /rpc`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RpcRequest {
    /// Operation name, e.g. `conference.assignReferee`.
    method: String,
    /// The acting user.
    #[serde(default)]
    actor: Option<String>,
    /// Operation parameters.
    #[serde(default)]
    params: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RpcResponse {
    result: Value,
}

/// Serializable representation of an `AuditEvent` for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuditEventResponse {
    event_id: Option<i64>,
    conference: String,
    actor_id: String,
    actor_type: String,
    cause_id: String,
    cause_description: String,
    action_name: String,
    action_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
            },
        });
        (self.status, body).into_response()
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        let status: StatusCode = match err.kind {
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            code: err.code,
            message: err.message,
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        ServiceError::from(err).into()
    }
}

fn audit_event_to_response(event: &AuditEvent) -> AuditEventResponse {
    AuditEventResponse {
        event_id: event.event_id,
        conference: event.conference.to_string(),
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
    }
}

/// Handler for `POST /rpc`.
///
/// Authenticates the asserted actor and runs the named operation.
async fn handle_rpc(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RpcRequest>,
) -> Result<Json<RpcResponse>, HttpError> {
    info!(method = %request.method, "Handling rpc request");

    let actor: AuthenticatedActor = AuthenticationService::authenticate(request.actor.as_deref())
        .map_err(|e| {
            warn!(method = %request.method, error = %e, "Rejected unauthenticated call");
            ServiceError::from(e)
        })?;
    let operation: OperationRequest = OperationRequest {
        method: request.method,
        actor,
        params: request.params,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result: Value = app_state
        .dispatcher
        .dispatch(&mut persistence, &operation)?;
    drop(persistence);

    Ok(Json(RpcResponse { result }))
}

/// Handler for `GET /conferences`.
async fn handle_list_conferences(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ConferenceSummary>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let conferences: Vec<ConferenceSummary> = persistence.list_conferences()?;
    drop(persistence);

    Ok(Json(conferences))
}

/// Handler for `GET /conferences/{conference_id}/audit`.
///
/// Returns the ordered audit timeline of a conference.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(conference_id): Path<String>,
) -> Result<Json<Vec<AuditEventResponse>>, HttpError> {
    info!(conference = %conference_id, "Handling get_audit_timeline request");
    let conference: ConferenceId =
        ConferenceId::new(&conference_id).map_err(translate_domain_error)?;

    let mut persistence = app_state.persistence.lock().await;
    persistence.load_conference(&conference)?;
    let events: Vec<AuditEvent> = persistence.get_audit_timeline(&conference)?;
    drop(persistence);

    Ok(Json(events.iter().map(audit_event_to_response).collect()))
}

/// Handler for `GET /operations`.
async fn handle_list_operations(
    AxumState(app_state): AxumState<AppState>,
) -> Json<Vec<&'static str>> {
    Json(app_state.dispatcher.operations())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/rpc", post(handle_rpc))
        .route("/conferences", get(handle_list_conferences))
        .route(
            "/conferences/{conference_id}/audit",
            get(handle_get_audit_timeline),
        )
        .route("/operations", get(handle_list_operations))
        .with_state(app_state)
}

/// Reads the conferences of a seed file.
fn load_seed(path: &FsPath) -> Result<Vec<Conference>, Box<dyn std::error::Error>> {
    let raw: String = std::fs::read_to_string(path)?;
    let conferences: Vec<Conference> = serde_json::from_str(&raw)?;
    Ok(conferences)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing conference reviewing server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(seed) = &args.seed {
        let conferences: Vec<Conference> = load_seed(seed)?;
        persistence.initialize_fixtures(&conferences)?;
    }

    let dispatcher: Dispatcher = Dispatcher::new(Box::new(LogNotifier))?;
    info!(
        operations = dispatcher.operations().len(),
        "Operation registry ready"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        dispatcher: Arc::new(dispatcher),
    };
    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
