//! API response envelope, error codes, and wallet DTOs

use axum::{Json, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::wallet::{Wallet, WalletError};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Handler result: success envelope or (status, error envelope)
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

pub fn reject<T>(err: WalletError) -> ApiResult<T> {
    Err(error_response(err))
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;

    // Resource errors (4xxx)
    pub const WALLET_NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

/// Map a core error to its HTTP status and error-code envelope.
///
/// Validation -> 422, missing wallet -> 404, rejected debit -> 400,
/// exhausted retries and storage failures -> 500.
pub fn error_response(err: WalletError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, code) = match &err {
        WalletError::InvalidWalletId(_)
        | WalletError::InvalidOperation(_)
        | WalletError::InvalidAmount(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            error_codes::INVALID_PARAMETER,
        ),
        WalletError::NotFound(_) => (StatusCode::NOT_FOUND, error_codes::WALLET_NOT_FOUND),
        WalletError::InsufficientFunds => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_BALANCE)
        }
        WalletError::TransientConflict
        | WalletError::RetriesExhausted(_)
        | WalletError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    };
    (status, Json(ApiResponse::<()>::error(code, err.to_string())))
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

/// Wallet operation request body
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletOperationRequest {
    /// "DEPOSIT" or "WITHDRAW"
    #[schema(example = "DEPOSIT")]
    pub operation_type: String,
    /// Non-negative, at most 2 fractional digits
    #[schema(value_type = String, example = "100.50")]
    pub amount: Decimal,
}

/// Wallet state as returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct WalletResponse {
    pub id: i64,
    /// External wallet identifier
    pub uuid: Uuid,
    /// Current balance, scale 2
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            uuid: wallet.wallet_id,
            amount: wallet.balance,
        }
    }
}

/// Provisioning request for the mock-api endpoint
#[cfg(feature = "mock-api")]
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWalletRequest {
    /// Opening balance, defaults to 0
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "100.00")]
    pub balance: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn validation_errors_map_to_422() {
        for err in [
            WalletError::InvalidWalletId("not-a-uuid".into()),
            WalletError::InvalidOperation("TRANSFER".into()),
            WalletError::InvalidAmount(dec!(-1)),
        ] {
            let (status, body) = error_response(err);
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body.code, error_codes::INVALID_PARAMETER);
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, body) = error_response(WalletError::NotFound(Uuid::nil()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, error_codes::WALLET_NOT_FOUND);
    }

    #[test]
    fn insufficient_funds_maps_to_400() {
        let (status, _) = error_response(WalletError::InsufficientFunds);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn exhausted_retries_and_storage_failures_map_to_500() {
        let (status, _) = error_response(WalletError::RetriesExhausted(5));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = error_response(WalletError::Storage(sqlx::Error::PoolTimedOut));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn success_envelope_has_code_zero() {
        let response = ApiResponse::success(42);
        assert_eq!(response.code, error_codes::SUCCESS);
        assert_eq!(response.msg, "ok");
        assert_eq!(response.data, Some(42));
    }

    #[test]
    fn wallet_response_keeps_original_wire_field_names() {
        let wallet = Wallet {
            id: 7,
            wallet_id: Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap(),
            balance: dec!(101.00),
        };

        let value = serde_json::to_value(ApiResponse::success(WalletResponse::from(wallet)))
            .unwrap();
        assert_eq!(value["code"], 0);
        assert_eq!(value["msg"], "ok");
        assert_eq!(value["data"]["id"], 7);
        assert_eq!(
            value["data"]["uuid"],
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
        // Exact fixed-point as a string, scale preserved
        assert_eq!(value["data"]["amount"], "101.00");
    }

    #[test]
    fn error_envelope_carries_code_and_omits_data() {
        let (_, body) = error_response(WalletError::InsufficientFunds);
        let value = serde_json::to_value(&body.0).unwrap();
        assert_eq!(value["code"], error_codes::INSUFFICIENT_BALANCE);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn operation_request_parses_camel_case_wire_form() {
        let req: WalletOperationRequest =
            serde_json::from_str(r#"{"operationType":"DEPOSIT","amount":"100.50"}"#).unwrap();
        assert_eq!(req.operation_type, "DEPOSIT");
        assert_eq!(req.amount, dec!(100.50));

        // Numeric amounts are accepted too
        let req: WalletOperationRequest =
            serde_json::from_str(r#"{"operationType":"WITHDRAW","amount":25.75}"#).unwrap();
        assert_eq!(req.amount, dec!(25.75));
    }
}
