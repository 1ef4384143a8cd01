// region:    --- Imports
use crate::auction::model::TotalResponse;
use crate::error::AuctionError;
use crate::manager::AuctionManager;
use crate::overlay::Overlay;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

// endregion: --- Imports

pub type AppState = (Arc<AuctionManager>, Arc<Overlay>);

/// 경매 시작 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenItemCommand {
    pub item_id: String,
}

// region:    --- Router
pub fn routes(manager: Arc<AuctionManager>, overlay: Arc<Overlay>) -> Router {
    // 브라우저 소스에서 조회하므로 cors 허용
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/overlay", get(handle_get_overlay))
        .route("/items", get(handle_get_items))
        .route("/total", get(handle_get_total))
        .route("/control/open-item", post(handle_open_item))
        .route("/control/close-item", post(handle_close_item))
        .route(
            "/control/items/:item_id/bids/:bid_id",
            delete(handle_delete_bid),
        )
        .layer(cors)
        .with_state((manager, overlay))
}
// endregion: --- Router

// region:    --- Query Handlers

/// 오버레이 뷰 조회
pub async fn handle_get_overlay(State((_, overlay)): State<AppState>) -> impl IntoResponse {
    Json(overlay.view().await)
}

/// 캐시된 상품 목록 조회
pub async fn handle_get_items(State((manager, _)): State<AppState>) -> impl IntoResponse {
    info!("{:<12} --> 상품 목록 조회", "Handler");
    Json(manager.get_items().await)
}

/// 누적 모금액 조회
pub async fn handle_get_total(State((manager, _)): State<AppState>) -> Response {
    match manager.get_total_cents().await {
        Ok(total_cents) => Json(TotalResponse { total_cents }).into_response(),
        Err(e) => upstream_error(e),
    }
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

/// 상품 경매 시작
pub async fn handle_open_item(
    State((manager, _)): State<AppState>,
    Json(cmd): Json<OpenItemCommand>,
) -> Response {
    info!("{:<12} --> 상품 경매 시작 요청: {:?}", "Handler", cmd);
    match manager.open_item(&cmd.item_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => upstream_error(e),
    }
}

/// 현재 상품 경매 종료
pub async fn handle_close_item(State((manager, _)): State<AppState>) -> Response {
    info!("{:<12} --> 상품 경매 종료 요청", "Handler");
    match manager.close_item().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => upstream_error(e),
    }
}

/// 입찰 철회
pub async fn handle_delete_bid(
    State((manager, _)): State<AppState>,
    Path((item_id, bid_id)): Path<(String, String)>,
) -> Response {
    info!(
        "{:<12} --> 입찰 철회 요청: item={}, bid={}",
        "Handler", item_id, bid_id
    );
    match manager.delete_bid(&item_id, &bid_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => upstream_error(e),
    }
}

// endregion: --- Command Handlers

fn upstream_error(e: AuctionError) -> Response {
    error!("{:<12} --> 원격 API 오류: {}", "Handler", e);
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}
