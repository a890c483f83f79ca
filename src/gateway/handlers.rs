//! Wallet HTTP handlers

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa::ToSchema;

use super::state::AppState;
use super::types::{
    ApiResponse, ApiResult, WalletOperationRequest, WalletResponse, error_codes, ok, reject,
};
use crate::wallet::{OperationKind, WalletLocator};

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Health check endpoint
///
/// Pings PostgreSQL and reports liveness without exposing internals.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(HealthResponse {
                timestamp_ms: now_ms,
            })),
        ),
        Err(e) => {
            tracing::error!("[HEALTH] PostgreSQL ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    code: error_codes::SERVICE_UNAVAILABLE,
                    msg: "unavailable".to_string(),
                    data: None,
                }),
            )
        }
    }
}

/// Get wallet state by UUID
///
/// GET /api/v1/wallets/{wallet_uuid}
///
/// Plain (non-locking) read: concurrent mutations are not blocked and
/// the response may reflect either side of an in-flight operation.
#[utoipa::path(
    get,
    path = "/api/v1/wallets/{wallet_uuid}",
    params(
        ("wallet_uuid" = String, Path, description = "External wallet identifier")
    ),
    responses(
        (status = 200, description = "Wallet state", body = WalletResponse, content_type = "application/json"),
        (status = 404, description = "Wallet not found"),
        (status = 422, description = "Malformed wallet identifier")
    ),
    tag = "Wallet"
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet_uuid): Path<String>,
) -> ApiResult<WalletResponse> {
    // Identifier syntax is checked before any storage access
    let wallet_id = match WalletLocator::parse_id(&wallet_uuid) {
        Ok(id) => id,
        Err(e) => return reject(e),
    };

    match state.locator.get(wallet_id).await {
        Ok(wallet) => ok(wallet.into()),
        Err(e) => reject(e),
    }
}

/// List all wallets
///
/// GET /api/v1/wallets
#[utoipa::path(
    get,
    path = "/api/v1/wallets",
    responses(
        (status = 200, description = "All wallets", body = Vec<WalletResponse>, content_type = "application/json")
    ),
    tag = "Wallet"
)]
pub async fn list_wallets(State(state): State<Arc<AppState>>) -> ApiResult<Vec<WalletResponse>> {
    match state.locator.list().await {
        Ok(wallets) => ok(wallets.into_iter().map(WalletResponse::from).collect()),
        Err(e) => reject(e),
    }
}

/// Apply a balance operation to a wallet
///
/// POST /api/v1/wallets/{wallet_uuid}/operation
///
/// Runs the locked read-modify-commit cycle under the retry
/// coordinator; transient lock conflicts are absorbed internally.
#[utoipa::path(
    post,
    path = "/api/v1/wallets/{wallet_uuid}/operation",
    params(
        ("wallet_uuid" = String, Path, description = "External wallet identifier")
    ),
    request_body = WalletOperationRequest,
    responses(
        (status = 200, description = "Post-operation wallet state", body = WalletResponse, content_type = "application/json"),
        (status = 400, description = "Insufficient funds"),
        (status = 404, description = "Wallet not found"),
        (status = 422, description = "Malformed identifier, operation type, or amount"),
        (status = 500, description = "Storage failure or retries exhausted")
    ),
    tag = "Wallet"
)]
pub async fn operate_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet_uuid): Path<String>,
    Json(req): Json<WalletOperationRequest>,
) -> ApiResult<WalletResponse> {
    let wallet_id = match WalletLocator::parse_id(&wallet_uuid) {
        Ok(id) => id,
        Err(e) => return reject(e),
    };

    // Operation kind is validated before any transaction starts
    let op = match req.operation_type.parse::<OperationKind>() {
        Ok(op) => op,
        Err(e) => return reject(e),
    };

    match state.coordinator.execute(wallet_id, op, req.amount).await {
        Ok(wallet) => ok(wallet.into()),
        Err(e) => reject(e),
    }
}

/// Internal wallet provisioning (dev/test only)
///
/// [SECURITY WARNING] This endpoint exists for development and test
/// setups only. Production builds MUST be compiled with
/// `--no-default-features` to exclude it.
///
/// POST /internal/mock/wallets
#[cfg(feature = "mock-api")]
pub async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<super::types::CreateWalletRequest>,
) -> ApiResult<WalletResponse> {
    use crate::wallet::{Wallet, validate_amount};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    let balance = req.balance.unwrap_or(Decimal::ZERO);
    if let Err(e) = validate_amount(balance) {
        return reject(e);
    }

    let wallet_id = Uuid::new_v4();
    let inserted = sqlx::query_as::<_, Wallet>(
        "INSERT INTO wallets_tb (wallet_id, balance) VALUES ($1, $2) RETURNING id, wallet_id, balance",
    )
    .bind(wallet_id)
    .bind(balance)
    .fetch_one(state.db.pool())
    .await;

    match inserted {
        Ok(wallet) => {
            tracing::info!(%wallet_id, %balance, "Mock wallet provisioned");
            ok(wallet.into())
        }
        Err(e) => reject(e.into()),
    }
}
