//! In-memory stand-in for the organisation accounts API.
//!
//! Serves the three account routes under `/v1/organisation/accounts` with
//! the same status codes as the real service: 201/200/204 on success, 400
//! for invalid ids or payloads, 404 for unknown accounts and 409 for
//! duplicate ids or stale versions.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub organisation_id: String,
    #[serde(default, rename = "type")]
    pub account_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub version: i64,
}

pub type Db = Arc<RwLock<HashMap<String, Account>>>;

type Rejection = (StatusCode, Json<ErrorBody>);

fn reject(status: StatusCode, message: impl Into<String>) -> Rejection {
    (
        status,
        Json(ErrorBody {
            error_message: message.into(),
        }),
    )
}

fn require_uuid(field: &str, value: &str) -> Result<(), Rejection> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| reject(StatusCode::BAD_REQUEST, format!("{field} in body must be of type uuid")))
}

pub fn app() -> Router {
    app_with_db(Db::default())
}

/// Router over a caller-owned store, so tests can seed or inspect it.
pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route(ACCOUNTS_PATH, post(create_account))
        .route(
            &format!("{ACCOUNTS_PATH}/{{id}}"),
            get(fetch_account).delete(delete_account),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_account(
    State(db): State<Db>,
    Json(input): Json<Envelope<Account>>,
) -> Result<(StatusCode, Json<Envelope<Account>>), Rejection> {
    let mut account = input.data;
    require_uuid("id", &account.id)?;
    require_uuid("organisation_id", &account.organisation_id)?;
    if account.account_type != "accounts" {
        return Err(reject(StatusCode::BAD_REQUEST, "type in body should be one of [accounts]"));
    }

    let mut accounts = db.write().await;
    if accounts.contains_key(&account.id) {
        return Err(reject(
            StatusCode::CONFLICT,
            "Account cannot be created as it violates a duplicate constraint",
        ));
    }
    account.version.get_or_insert(0);
    accounts.insert(account.id.clone(), account.clone());
    tracing::info!(id = %account.id, "account created");
    Ok((StatusCode::CREATED, Json(Envelope { data: account })))
}

async fn fetch_account(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Account>>, Rejection> {
    require_uuid("id", &id)?;
    let accounts = db.read().await;
    accounts
        .get(&id)
        .cloned()
        .map(|data| Json(Envelope { data }))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, format!("record {id} does not exist")))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, Rejection> {
    require_uuid("id", &id)?;
    let mut accounts = db.write().await;
    let current = accounts
        .get(&id)
        .and_then(|a| a.version)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, format!("record {id} does not exist")))?;
    if current != params.version {
        return Err(reject(StatusCode::CONFLICT, "invalid version"));
    }
    accounts.remove(&id);
    tracing::info!(%id, version = params.version, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_serializes_without_absent_fields() {
        let account = Account {
            id: Uuid::nil().to_string(),
            organisation_id: Uuid::nil().to_string(),
            account_type: "accounts".to_string(),
            version: None,
            attributes: None,
        };
        let json = serde_json::to_value(Envelope { data: account }).unwrap();
        assert_eq!(json["data"]["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["data"]["type"], "accounts");
        assert!(json["data"].get("version").is_none());
        assert!(json["data"].get("attributes").is_none());
    }

    #[test]
    fn empty_payload_deserializes_to_blank_account() {
        let input: Envelope<Account> = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(input.data.id.is_empty());
        assert!(input.data.account_type.is_empty());
    }

    #[test]
    fn require_uuid_rejects_short_ids() {
        assert!(require_uuid("id", "123").is_err());
        assert!(require_uuid("id", "123e4567-e89b-12d3-a456-426614174129").is_ok());
    }
}
