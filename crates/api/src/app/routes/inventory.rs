//! Inventory routes.
//!
//! Each handler runs one session action and answers with the reloaded view.
//! Store and input failures are logged by the session and never change the
//! status code.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use stockroom_inventory::InventoryView;

use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(list_items))
        .route("/inventory/items", post(add_item))
        .route("/inventory/items/:name", put(update_item).delete(remove_item))
}

fn view_response(view: &InventoryView) -> axum::response::Response {
    (StatusCode::OK, Json(dto::InventoryResponse::from(view))).into_response()
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let mut session = services.session(params.search);
    session.load().await;
    view_response(&session.into_view())
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    let mut session = services.session(params.search);
    session.add(&body.name).await;
    view_response(&session.into_view())
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Query(params): Query<dto::SearchParams>,
    Json(body): Json<dto::SetQuantityRequest>,
) -> axum::response::Response {
    let mut session = services.session(params.search);
    session.update(&name, &body.quantity.into_text()).await;
    view_response(&session.into_view())
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let mut session = services.session(params.search);
    session.remove(&name).await;
    view_response(&session.into_view())
}
