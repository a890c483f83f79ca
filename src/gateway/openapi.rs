//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{WalletOperationRequest, WalletResponse};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "walletd API",
        version = "1.0.0",
        description = "Wallet balance service: read access and DEPOSIT/WITHDRAW operations keyed by wallet UUID.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::get_wallet,
        crate::gateway::handlers::list_wallets,
        crate::gateway::handlers::operate_wallet,
    ),
    components(schemas(HealthResponse, WalletResponse, WalletOperationRequest)),
    tags(
        (name = "Wallet", description = "Wallet read and balance mutation endpoints"),
        (name = "System", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;
