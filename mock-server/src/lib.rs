//! In-process stand-in for the Quorum API.
//!
//! Serves `/api/list/`, `/api/customtag/` and `/api/supporter/` with the same
//! query-string authentication as the real service. Supporters created through
//! the API are kept in memory for the life of the router.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const INVALID_KEY_BODY: &str = "Bad request. Invalid API key";

/// The single account the mock accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub api_key: String,
}

impl Account {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MailingList {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomTag {
    pub id: u64,
    pub name: String,
    pub tag_type: String,
}

/// Listing envelope used by every collection endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Listing<T> {
    pub meta: Meta,
    pub objects: Vec<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    pub model: String,
    pub total_count: usize,
}

impl<T> Listing<T> {
    fn new(model: &str, objects: Vec<T>) -> Self {
        Self {
            meta: Meta {
                model: model.to_string(),
                total_count: objects.len(),
            },
            objects,
        }
    }
}

#[derive(Deserialize)]
pub struct AuthParams {
    pub username: Option<String>,
    pub api_key: Option<String>,
}

struct Inner {
    account: Account,
    lists: Vec<MailingList>,
    custom_tags: Vec<CustomTag>,
    supporters: RwLock<Vec<Map<String, Value>>>,
}

type Db = Arc<Inner>;

pub fn app(account: Account) -> Router {
    let db: Db = Arc::new(Inner {
        account,
        lists: vec![
            MailingList {
                id: 1,
                name: "Newsletter".to_string(),
            },
            MailingList {
                id: 2,
                name: "Volunteers".to_string(),
            },
        ],
        custom_tags: vec![CustomTag {
            id: 10,
            name: "Preferred district".to_string(),
            tag_type: "single_option".to_string(),
        }],
        supporters: RwLock::new(Vec::new()),
    });
    Router::new()
        .route("/api/list/", get(list_lists))
        .route("/api/customtag/", get(list_custom_tags))
        .route("/api/supporter/", get(list_supporters).post(create_supporter))
        .with_state(db)
}

pub async fn run(listener: TcpListener, account: Account) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, username = %account.username, "mock Quorum API listening");
    }
    axum::serve(listener, app(account)).await
}

fn authorize(db: &Db, params: &AuthParams) -> Result<(), Response> {
    let accepted = params.username.as_deref() == Some(db.account.username.as_str())
        && params.api_key.as_deref() == Some(db.account.api_key.as_str());
    if accepted {
        Ok(())
    } else {
        debug!(username = ?params.username, "rejecting request with bad credentials");
        Err((StatusCode::UNAUTHORIZED, INVALID_KEY_BODY).into_response())
    }
}

async fn list_lists(
    State(db): State<Db>,
    Query(params): Query<AuthParams>,
) -> Result<Json<Listing<MailingList>>, Response> {
    authorize(&db, &params)?;
    Ok(Json(Listing::new("List", db.lists.clone())))
}

async fn list_custom_tags(
    State(db): State<Db>,
    Query(params): Query<AuthParams>,
) -> Result<Json<Listing<CustomTag>>, Response> {
    authorize(&db, &params)?;
    Ok(Json(Listing::new("CustomTag", db.custom_tags.clone())))
}

async fn list_supporters(
    State(db): State<Db>,
    Query(params): Query<AuthParams>,
) -> Result<Json<Listing<Map<String, Value>>>, Response> {
    authorize(&db, &params)?;
    let supporters = db.supporters.read().await;
    Ok(Json(Listing::new("Supporter", supporters.clone())))
}

async fn create_supporter(
    State(db): State<Db>,
    Query(params): Query<AuthParams>,
    Json(mut input): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Map<String, Value>>), Response> {
    authorize(&db, &params)?;
    if !matches!(input.get("email"), Some(Value::String(email)) if !email.is_empty()) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "email is required" })),
        )
            .into_response());
    }
    let mut supporters = db.supporters.write().await;
    let id = supporters.len() as u64 + 1;
    input.insert("id".to_string(), Value::from(id));
    supporters.push(input.clone());
    debug!(id, "created supporter");
    Ok((StatusCode::CREATED, Json(input)))
}
