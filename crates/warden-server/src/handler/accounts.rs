//! Handlers for the authenticated account routes.
//!
//! Every route here sits behind the request gate. Routes that act on a
//! username from the body only act on the caller's own account.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};

use crate::extract::{AuthState, Json, ValidateJson};
use crate::handler::request::{
    ChangePasswordRequest, ChangeUsernameRequest, DeleteAccountRequest,
};
use crate::handler::response::{AccountResponse, AccountsResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{AccountService, ServiceState};

/// Tracing target for account handlers.
const TRACING_TARGET: &str = "warden_server::handler::accounts";

/// Rejects requests whose body names an account other than the caller's.
fn ensure_self(auth_state: &AuthState, username: &str) -> Result<()> {
    if auth_state.username() == username {
        return Ok(());
    }

    tracing::warn!(
        target: TRACING_TARGET,
        caller = auth_state.username(),
        target_account = username,
        "request rejected: acting on another account"
    );

    Err(ErrorKind::Forbidden
        .with_message("You can only manage your own account")
        .with_resource("account"))
}

/// Lists every account without password hashes or tokens.
#[tracing::instrument(skip_all, fields(caller = auth_state.username()))]
async fn list_users(
    auth_state: AuthState,
    State(account_service): State<AccountService>,
) -> Result<Json<AccountsResponse>> {
    let accounts = account_service.list_accounts().await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = accounts.len(),
        "accounts listed"
    );

    let accounts = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(accounts))
}

/// Deletes the caller's account.
///
/// Tokens issued before the deletion stay valid until they expire, but every
/// route that names the account in its body has nothing left to act on.
#[tracing::instrument(skip_all, fields(caller = auth_state.username()))]
async fn delete_account(
    auth_state: AuthState,
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<DeleteAccountRequest>,
) -> Result<StatusCode> {
    ensure_self(&auth_state, &request.username)?;
    account_service.delete_account(&request.username).await?;

    tracing::info!(target: TRACING_TARGET, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the caller's password after checking the current one.
#[tracing::instrument(skip_all, fields(caller = auth_state.username()))]
async fn change_password(
    auth_state: AuthState,
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<ChangePasswordRequest>,
) -> Result<StatusCode> {
    ensure_self(&auth_state, &request.username)?;
    account_service
        .change_password(
            &request.username,
            &request.current_password,
            &request.new_password,
        )
        .await?;

    tracing::info!(target: TRACING_TARGET, "password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// Renames the caller's account.
///
/// The caller's current token still names the old username, so a new login
/// is needed before acting on the renamed account.
#[tracing::instrument(skip_all, fields(caller = auth_state.username()))]
async fn change_username(
    auth_state: AuthState,
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<ChangeUsernameRequest>,
) -> Result<StatusCode> {
    ensure_self(&auth_state, &request.username)?;
    account_service
        .change_username(&request.username, &request.new_username)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        new_username = %request.new_username,
        "username changed"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Returns a [`Router`] with all account routes.
///
/// The caller is expected to put these behind the request gate.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/delete", delete(delete_account))
        .route("/password", post(change_password))
        .route("/username", post(change_username))
}
