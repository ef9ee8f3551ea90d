//! In-memory emulation of the RGB REST API.
//!
//! Serves the same routes and envelopes as the real service so the client can
//! be exercised end-to-end: `{"status":"success","data":...}` on success and
//! an HTTP error status with `{"message":...}` otherwise.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const SUPPORTED_VERSIONS: &[&str] = &["1.0", "1.1"];
pub const SUPPORTED_NETWORKS: &[&str] = &["mainnet", "testnet", "signet", "regtest"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocation {
    pub coins: u64,
    pub outpoint: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum Allocations {
    One(Allocation),
    Many(Vec<Allocation>),
}

impl Allocations {
    fn into_vec(self) -> Vec<Allocation> {
        match self {
            Allocations::One(a) => vec![a],
            Allocations::Many(list) => list,
        }
    }
}

#[derive(Deserialize)]
pub struct IssueFungible {
    pub ticker: String,
    pub name: String,
    pub precision: u8,
    pub allocations: Allocations,
    pub description: Option<String>,
    #[serde(default)]
    pub inflation: Vec<Allocation>,
    #[serde(default)]
    pub renomination: Vec<String>,
    #[serde(default)]
    pub epoch: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub asset_id: String,
    pub network: String,
    pub ticker: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub precision: u8,
    pub issued_supply: u64,
    pub allocations: Vec<Allocation>,
    pub inflation: Vec<Allocation>,
    pub renomination: Vec<String>,
    pub epoch: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxosQuery {
    #[serde(default)]
    pub wallet_descriptor: String,
    pub key_range_start_idx: Option<i64>,
    pub key_range_count: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    pub amount: f64,
    pub height: i64,
}

/// Issued assets keyed by asset id.
pub type Db = Arc<RwLock<HashMap<String, AssetInfo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/{version}/{network}/fungible/issue", post(issue_fungible))
        .route("/api/{version}/{network}/wallet/utxos", get(wallet_utxos))
        .route("/api/{version}/{network}/broken/envelope", get(broken_envelope))
        .route("/api/{version}/{network}/broken/body", get(broken_body))
        .route("/api/{version}/{network}/echo/headers", get(echo_headers).post(echo_headers))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Error reply carrying `{"message": ...}`.
pub struct ApiFailure {
    status: StatusCode,
    message: &'static str,
}

impl ApiFailure {
    fn invalid_parameters() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid parameters",
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

fn success(data: Value) -> Json<Value> {
    Json(json!({ "status": "success", "data": data }))
}

fn check_route(version: &str, network: &str) -> Result<(), ApiFailure> {
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ApiFailure {
            status: StatusCode::NOT_FOUND,
            message: "Unsupported API version",
        });
    }
    if !SUPPORTED_NETWORKS.contains(&network) {
        return Err(ApiFailure {
            status: StatusCode::BAD_REQUEST,
            message: "Unknown network",
        });
    }
    Ok(())
}

async fn issue_fungible(
    State(db): State<Db>,
    Path((version, network)): Path<(String, String)>,
    Json(input): Json<IssueFungible>,
) -> Result<Json<Value>, ApiFailure> {
    check_route(&version, &network)?;
    let allocations = input.allocations.into_vec();
    if input.ticker.is_empty()
        || input.name.is_empty()
        || allocations.is_empty()
        || allocations.iter().any(|a| !is_outpoint(&a.outpoint))
    {
        info!(%network, ticker = %input.ticker, "rejected fungible issue");
        return Err(ApiFailure::invalid_parameters());
    }

    let asset = AssetInfo {
        asset_id: format!("rgb1{}", Uuid::new_v4().simple()),
        network,
        ticker: input.ticker,
        name: input.name,
        description: input.description,
        precision: input.precision,
        issued_supply: allocations.iter().map(|a| a.coins).sum(),
        allocations,
        inflation: input.inflation,
        renomination: input.renomination,
        epoch: input.epoch,
    };
    info!(asset_id = %asset.asset_id, ticker = %asset.ticker, "issued fungible asset");
    db.write().await.insert(asset.asset_id.clone(), asset.clone());

    Ok(success(json!({ "assetInfo": asset })))
}

async fn wallet_utxos(
    State(db): State<Db>,
    Path((version, network)): Path<(String, String)>,
    Query(query): Query<UtxosQuery>,
) -> Result<Json<Value>, ApiFailure> {
    check_route(&version, &network)?;
    let start = query.key_range_start_idx.unwrap_or(0);
    let count = query.key_range_count.unwrap_or(20);
    if query.wallet_descriptor.is_empty() || start < 0 || count <= 0 {
        info!(%network, "rejected wallet utxos query");
        return Err(ApiFailure::invalid_parameters());
    }

    let assets = db.read().await;
    let mut utxos: Vec<Utxo> = assets
        .values()
        .filter(|asset| asset.network == network)
        .flat_map(|asset| asset.allocations.iter())
        .filter_map(|a| utxo_from_outpoint(&a.outpoint))
        .collect();
    utxos.sort_by(|a, b| (&a.txid, a.vout).cmp(&(&b.txid, b.vout)));
    utxos.dedup();
    let utxos = key_range(utxos, start, count);
    info!(%network, start, count, found = utxos.len(), "listed wallet utxos");

    Ok(success(json!({ "utxos": utxos })))
}

/// Keep the `count` outputs starting at index `start`, standing in for the
/// derivation key range of the wallet descriptor.
fn key_range(utxos: Vec<Utxo>, start: i64, count: i64) -> Vec<Utxo> {
    let start = usize::try_from(start).unwrap_or(0);
    let count = usize::try_from(count).unwrap_or(0);
    utxos.into_iter().skip(start).take(count).collect()
}

async fn echo_headers(method: Method, headers: HeaderMap) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    success(json!({ "method": method.as_str(), "contentType": content_type }))
}

async fn broken_envelope() -> Json<Value> {
    Json(json!({ "status": "error" }))
}

async fn broken_body() -> (StatusCode, &'static str) {
    (StatusCode::OK, "<html>not json</html>")
}

fn is_outpoint(outpoint: &str) -> bool {
    utxo_from_outpoint(outpoint).is_some()
}

fn utxo_from_outpoint(outpoint: &str) -> Option<Utxo> {
    let (txid, vout) = outpoint.split_once(':')?;
    if txid.len() != 64 || !txid.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(Utxo {
        txid: txid.to_string(),
        vout: vout.parse().ok()?,
        amount: 0.0001,
        height: 100,
    })
}
