//! Registration and login handlers.
//!
//! Both routes are public. Failures never say which field was wrong: a taken
//! username and a taken email give the same `409 conflict`, and an unknown
//! username and a wrong password give the same `401 unauthorized`.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{LoginRequest, RegisterRequest};
use crate::handler::response::{AccountResponse, LoginResponse};
use crate::service::{AccountService, ServiceState};

/// Tracing target for authentication handlers.
const TRACING_TARGET: &str = "warden_server::handler::authentication";

/// Creates a new account.
#[tracing::instrument(skip_all, fields(username = %request.username))]
async fn register(
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    tracing::trace!(target: TRACING_TARGET, "registration requested");

    let account = account_service
        .register(&request.username, &request.email, &request.password)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        username = %account.username,
        "account registered"
    );

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Exchanges credentials for a session token.
#[tracing::instrument(skip_all, fields(username = %request.username))]
async fn login(
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    tracing::trace!(target: TRACING_TARGET, "login requested");

    let issued = account_service
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(issued.into()))
}

/// Returns a [`Router`] with all public authentication routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn register_then_login() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/register")
            .json(&json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "password1",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(body["username"], "alice");
        assert_eq!(body["email"], "a@x.com");
        assert!(body.get("createdAt").is_some());
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());

        let response = server
            .post("/register")
            .json(&json!({
                "username": "alice",
                "email": "b@y.com",
                "password": "password2",
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["name"], "conflict");

        let response = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "password1" }))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["tokenType"], "Bearer");
        assert!(!body["token"].as_str().unwrap_or_default().is_empty());
        assert!(body.get("expiresAt").is_some());

        let response = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["name"], "unauthorized");

        Ok(())
    }

    #[tokio::test]
    async fn email_collision_looks_like_username_collision() -> anyhow::Result<()> {
        let server = create_test_server()?;

        server
            .post("/register")
            .json(&json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "password1",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let by_username = server
            .post("/register")
            .json(&json!({
                "username": "alice",
                "email": "other@x.com",
                "password": "password1",
            }))
            .await;
        let by_email = server
            .post("/register")
            .json(&json!({
                "username": "bob",
                "email": "a@x.com",
                "password": "password1",
            }))
            .await;

        by_username.assert_status(StatusCode::CONFLICT);
        by_email.assert_status(StatusCode::CONFLICT);
        assert_eq!(by_username.text(), by_email.text());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_looks_like_wrong_password() -> anyhow::Result<()> {
        let server = create_test_server()?;

        server
            .post("/register")
            .json(&json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "password1",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let unknown = server
            .post("/login")
            .json(&json!({ "username": "nobody", "password": "password1" }))
            .await;
        let wrong = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "password2" }))
            .await;

        unknown.assert_status(StatusCode::UNAUTHORIZED);
        wrong.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.text(), wrong.text());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_registration_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let cases = [
            json!({ "username": "al", "email": "a@x.com", "password": "password1" }),
            json!({ "username": "alice", "email": "ax.com", "password": "password1" }),
            json!({ "username": "alice", "email": "a@x.com", "password": "short" }),
            json!({ "username": "alice", "email": "a@x.com" }),
        ];

        for case in cases {
            let response = server.post("/register").json(&case).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<Value>()["name"], "bad_request");
        }

        let response = server
            .post("/register")
            .json(&json!({
                "username": "a".repeat(65),
                "email": "a@x.com",
                "password": "password1",
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        Ok(())
    }
}
