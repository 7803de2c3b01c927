//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::RegisterCommand;
use crate::domain::{AuthenticatedUser, Summary, Transaction, TransactionFields, TransactionType};
use crate::error::AppError;

use super::state::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<TransactionRequest> for TransactionFields {
    fn from(request: TransactionRequest) -> Self {
        TransactionFields::new(request.amount, request.date, request.kind)
            .with_description(request.description.unwrap_or_default())
            .with_category(request.category.unwrap_or_default())
    }
}

// =========================================================================
// Routers
// =========================================================================

/// Unauthenticated login/registration endpoints
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Transaction endpoints; expect an authenticated caller
pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/summary", get(get_summary))
        .route("/:id", put(update_transaction).delete(delete_transaction))
}

// =========================================================================
// POST /api/auth/login
// =========================================================================

/// Exchange credentials for a bearer token
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let result = state.auth.login(&request.username, &request.password).await?;

    Ok(Json(LoginResponse {
        token: result.token,
        token_type: "Bearer".to_string(),
        user_id: result.user_id,
        username: result.username,
        email: result.email,
    }))
}

// =========================================================================
// POST /api/auth/register
// =========================================================================

/// Register a new user
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<&'static str, AppError> {
    state
        .auth
        .register(RegisterCommand::new(
            request.username,
            request.email,
            request.password,
        ))
        .await?;

    Ok("User registered successfully!")
}

// =========================================================================
// GET /api/transactions
// =========================================================================

/// List the caller's transactions, newest first
async fn list_transactions(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.transactions.list(&caller).await?;
    Ok(Json(transactions))
}

// =========================================================================
// POST /api/transactions
// =========================================================================

async fn create_transaction(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state.transactions.create(&caller, request.into()).await?;
    Ok(Json(transaction))
}

// =========================================================================
// PUT /api/transactions/:id
// =========================================================================

async fn update_transaction(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state
        .transactions
        .update(id, &caller, request.into())
        .await?;
    Ok(Json(transaction))
}

// =========================================================================
// DELETE /api/transactions/:id
// =========================================================================

async fn delete_transaction(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    state.transactions.delete(id, &caller).await?;
    Ok("Transaction deleted successfully")
}

// =========================================================================
// GET /api/transactions/summary
// =========================================================================

/// Income/expense totals for the caller
async fn get_summary(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<Summary>, AppError> {
    let summary = state.transactions.summary(&caller).await?;
    Ok(Json(summary))
}
