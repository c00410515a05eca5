//! Route handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use items_core::{Item, ItemId, Page, PageLimit, Paginator};

use crate::error::{Result, ServerError};
use crate::SharedStore;

/// Every route the service answers, as reported by `GET /`.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/items"),
    ("POST", "/items"),
    ("GET", "/items/{item_id}"),
    ("PUT", "/items/{item_id}"),
    ("DELETE", "/items/{item_id}"),
    ("GET", "/items/{item_id}/{property_name}"),
    ("GET", "/v1/items"),
    ("POST", "/v1/items"),
    ("GET", "/v1/items/{item_id}"),
    ("PUT", "/v1/items/{item_id}"),
    ("DELETE", "/v1/items/{item_id}"),
    ("GET", "/v1/items/{item_id}/{property_name}"),
];

#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub path: &'static str,
    pub method: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteListing {
    pub routes: Vec<RouteInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthRsp {
    pub status: &'static str,
}

/// Query parameters for the paginated listing.
///
/// Both are read as raw strings so a malformed `limit` is reported the
/// same way as an out-of-range one.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

pub async fn root() -> Json<RouteListing> {
    debug!("Root path accessed");
    Json(RouteListing {
        routes: ROUTES
            .iter()
            .map(|&(method, path)| RouteInfo { path, method })
            .collect(),
    })
}

pub async fn health() -> Json<HealthRsp> {
    debug!("Health check");
    Json(HealthRsp { status: "healthy" })
}

/// `GET /items`: every item, following pages until the store is exhausted.
pub async fn list_items(State(store): State<SharedStore>) -> Result<Json<Vec<Item>>> {
    let items = Paginator::new(store.as_ref()).list_all().await?;
    info!(count = items.len(), "Listed all items");
    Ok(Json(items))
}

/// `GET /v1/items`: one page of items.
pub async fn list_items_page(
    State(store): State<SharedStore>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page>> {
    let Query(params) = params?;

    let limit = match params.limit.as_deref() {
        Some(raw) => raw.parse::<PageLimit>()?,
        None => PageLimit::default(),
    };

    let page = Paginator::new(store.as_ref())
        .list_page(limit.get(), params.cursor.as_deref())
        .await?;

    info!(
        count = page.items.len(),
        more = page.next.is_some(),
        "Listed page"
    );
    Ok(Json(page))
}

pub async fn get_item(
    State(store): State<SharedStore>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>> {
    let id = ItemId::new(item_id)?;
    let item = store
        .get_by_key(&id)
        .await?
        .ok_or(ServerError::ItemNotFound)?;
    debug!(%id, "Fetched item");
    Ok(Json(item))
}

pub async fn get_item_property(
    State(store): State<SharedStore>,
    Path((item_id, property_name)): Path<(String, String)>,
) -> Result<Json<Map<String, Value>>> {
    let id = ItemId::new(item_id)?;
    let item = store
        .get_by_key(&id)
        .await?
        .ok_or(ServerError::ItemNotFound)?;

    let value = item
        .get(&property_name)
        .cloned()
        .ok_or_else(|| ServerError::PropertyNotFound {
            name: property_name.clone(),
        })?;

    debug!(%id, property = %property_name, "Fetched item property");

    let mut rsp = Map::new();
    rsp.insert(property_name, value);
    Ok(Json(rsp))
}

pub async fn create_item(
    State(store): State<SharedStore>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let Json(body) = payload?;
    let item = Item::new(body)?;
    store.put(&item).await?;
    info!(id = %item.id(), "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /items/{id}`: replace the whole item. The path id wins over any
/// `id` in the body.
pub async fn update_item(
    State(store): State<SharedStore>,
    Path(item_id): Path<String>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>> {
    let id = ItemId::new(item_id)?;
    let Json(body) = payload?;
    let item = Item::with_id(&id, body)?;
    store.put(&item).await?;
    info!(%id, "Updated item");
    Ok(Json(item))
}

pub async fn delete_item(
    State(store): State<SharedStore>,
    Path(item_id): Path<String>,
) -> Result<StatusCode> {
    let id = ItemId::new(item_id)?;
    store.delete_by_key(&id).await?;
    info!(%id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}
