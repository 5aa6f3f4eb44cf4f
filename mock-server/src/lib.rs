use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct NewItem {
    pub name: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Item>>>;

/// A `{"detail": ...}` error response, the shape the gateway reads messages from.
fn detail(status: StatusCode, message: impl Into<Value>) -> Response {
    let message: Value = message.into();
    (status, Json(json!({ "detail": message }))).into_response()
}

fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Item not found")
}

fn blank_name() -> Response {
    detail(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!([{
            "loc": ["body", "name"],
            "msg": "name must not be blank",
            "type": "value_error",
        }]),
    )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(replace_item).delete(delete_item))
        .route("/echo", any(echo))
        .route("/boom", any(boom))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let items = db.read().await;
    Json(items.values().cloned().collect())
}

async fn create_item(State(db): State<Db>, Json(input): Json<NewItem>) -> Response {
    if input.name.trim().is_empty() {
        return blank_name();
    }
    let item = Item {
        id: Uuid::new_v4(),
        name: input.name,
    };
    db.write().await.insert(item.id, item.clone());
    tracing::debug!(id = %item.id, "item created");
    (StatusCode::CREATED, Json(item)).into_response()
}

async fn get_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let items = db.read().await;
    match items.get(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => not_found(),
    }
}

async fn replace_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewItem>,
) -> Response {
    if input.name.trim().is_empty() {
        return blank_name();
    }
    let mut items = db.write().await;
    match items.get_mut(&id) {
        Some(item) => {
            item.name = input.name;
            Json(item.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let mut items = db.write().await;
    match items.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

/// Reflects the request back so callers can inspect what went over the wire.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: HashMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn boom() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
