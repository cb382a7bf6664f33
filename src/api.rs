use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::{collections::HashSet, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{parse_addresses, Config};
use crate::error::SummaryError;
use crate::models::HistoryEntry;
use crate::parser::{decode_transaction, RawTransaction};
use crate::rpc::ExplorerClient;
use crate::summary;

#[derive(Clone)]
struct AppState {
    cfg: Arc<Config>,
    explorer: ExplorerClient,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub tx: String,
    pub addresses: Option<String>, // comma separated, defaults to configured wallet
}

#[derive(Deserialize)]
pub struct SummaryRequest {
    pub transaction: RawTransaction,
    #[serde(default)]
    pub addresses: Vec<String>,
}

struct ApiError(SummaryError);

impl From<SummaryError> for ApiError {
    fn from(e: SummaryError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::BAD_REQUEST
        };
        warn!("Summary request failed: {}", self.0);
        (status, self.0.to_string()).into_response()
    }
}

pub async fn serve(cfg: Config, explorer: ExplorerClient) -> eyre::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let addr = SocketAddr::from(([127, 0, 0, 1], cfg.port));
    let state = AppState {
        cfg: Arc::new(cfg),
        explorer,
    };

    let app = Router::new()
        .route("/", get(|| async { "Base tx summary API running" }))
        .route("/summary", get(summary_by_id).post(summary_from_payload))
        .with_state(state)
        .layer(cors);

    info!("API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn owners_or_default(state: &AppState, requested: HashSet<String>) -> HashSet<String> {
    if requested.is_empty() {
        state.cfg.owner_addresses.clone()
    } else {
        requested
    }
}

async fn summary_by_id(
    State(state): State<AppState>,
    Query(q): Query<SummaryQuery>,
) -> Result<Json<HistoryEntry>, ApiError> {
    let owners = owners_or_default(&state, parse_addresses(q.addresses.as_deref().unwrap_or("")));

    let tx = state.explorer.get_transaction(&q.tx).await?;
    let entry = summary::summarize(&tx, &owners, &state.cfg.fee, &state.explorer).await?;

    Ok(Json(entry))
}

async fn summary_from_payload(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<HistoryEntry>, ApiError> {
    let owners = owners_or_default(&state, parse_addresses(&req.addresses.join(",")));

    let tx = decode_transaction(req.transaction);
    let entry = summary::summarize(&tx, &owners, &state.cfg.fee, &state.explorer).await?;

    Ok(Json(entry))
}
