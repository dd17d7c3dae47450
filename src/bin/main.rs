// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! REST API server for the bank ledger.
//!
//! The ledger core knows nothing about HTTP; this binary deserializes
//! identifiers and amounts, maps domain errors to status codes, and
//! serializes responses.
//!
//! ## Endpoints
//!
//! - `POST /accounts` - Create an account
//! - `POST /accounts/{id}/deposit` - Deposit into an account
//! - `POST /accounts/{id}/withdraw` - Withdraw from an account
//! - `POST /transfer` - Transfer between two accounts
//! - `GET /accounts` - List all accounts
//! - `GET /accounts/{id}` - Account details with recent outgoing transfers
//!
//! ## Example Usage
//!
//! ```bash
//! curl -X POST http://localhost:3000/accounts
//!
//! curl -X POST http://localhost:3000/accounts/<id>/deposit \
//!   -H "Content-Type: application/json" \
//!   -d '{"amount": "100.00"}'
//!
//! curl -X POST http://localhost:3000/transfer \
//!   -H "Content-Type: application/json" \
//!   -d '{"from_account_id": "<a>", "to_account_id": "<b>", "amount": "40.00"}'
//!
//! curl http://localhost:3000/accounts/<id>
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bank_ledger_rs::{Account, AccountDetails, AccountId, Ledger, LedgerError};
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Bank Ledger - REST API server
///
/// Serves an in-memory concurrent ledger over HTTP. All state is lost on
/// shutdown.
#[derive(Parser, Debug)]
#[command(name = "bank-ledger-rs")]
#[command(about = "An in-memory bank ledger served over HTTP", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
}

// === Request/Response DTOs ===

/// Request body carrying a single amount.
///
/// Amounts travel as JSON strings to preserve decimal precision:
/// ```json
/// {"amount": "100.00"}
/// ```
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
}

/// Request body for transfers.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Decimal,
}

/// Response body for account information.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: AccountId,
    pub balance: Decimal,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            balance: account.balance(),
        }
    }
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing the ledger.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
}

// === Error Handling ===

/// Wrapper for converting [`LedgerError`] into HTTP responses.
pub struct AppError(LedgerError);

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            LedgerError::InvalidAmount => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            LedgerError::SameAccount => (StatusCode::BAD_REQUEST, "SAME_ACCOUNT"),
            LedgerError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            LedgerError::InsufficientFunds => (StatusCode::CONFLICT, "INSUFFICIENT_FUNDS"),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /accounts - Create a new account.
async fn create_account(State(state): State<AppState>) -> (StatusCode, Json<AccountResponse>) {
    let account = state.ledger.create_account();
    (StatusCode::CREATED, Json(AccountResponse::from(&*account)))
}

/// POST /accounts/{id}/deposit - Deposit into an account.
async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    Json(request): Json<AmountRequest>,
) -> Result<StatusCode, AppError> {
    state.ledger.deposit(id, request.amount)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /accounts/{id}/withdraw - Withdraw from an account.
async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    Json(request): Json<AmountRequest>,
) -> Result<StatusCode, AppError> {
    state.ledger.withdraw(id, request.amount)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /transfer - Transfer between two accounts.
async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<StatusCode, AppError> {
    state
        .ledger
        .transfer(request.from_account_id, request.to_account_id, request.amount)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /accounts/{id} - Account details with recent outgoing transfers.
async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> Result<Json<AccountDetails>, AppError> {
    let details = state.ledger.account_details(id)?;
    Ok(Json(details))
}

/// GET /accounts - List all accounts.
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<AccountResponse>> {
    let accounts: Vec<AccountResponse> = state
        .ledger
        .all_accounts()
        .iter()
        .map(|account| AccountResponse::from(account.as_ref()))
        .collect();

    Json(accounts)
}

// === Router ===

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/accounts", post(create_account).get(list_accounts))
        .route("/accounts/{id}", get(get_account))
        .route("/accounts/{id}/deposit", post(deposit))
        .route("/accounts/{id}/withdraw", post(withdraw))
        .route("/transfer", post(transfer))
        .with_state(state)
}

// === Main ===

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();

    let state = AppState {
        ledger: Arc::new(Ledger::new()),
    };

    let app = create_router(state);

    let listener = match TcpListener::bind(args.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Error binding to {}: {}", args.listen, e);
            process::exit(1);
        }
    };

    info!(addr = %args.listen, "bank ledger API server running");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        process::exit(1);
    }
}
