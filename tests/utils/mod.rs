#![allow(dead_code)]
use async_trait::async_trait;
use auction_overlay::api::AuctionApi;
use auction_overlay::auction::model::{Bid, Item};
use auction_overlay::error::AuctionError;
use auction_overlay::push::PushStream;
use axum::extract::{Form, Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use futures::stream::{self, StreamExt};
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};

pub const PASSWORD: &str = "s3cret&pw";

/// 트레이싱 초기화 (여러 테스트에서 호출해도 안전)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

pub fn sample_item(id: &str) -> Item {
    Item {
        id: id.to_string(),
        title: format!("Item {}", id),
        description: format!("Description of item {}", id),
        images: vec![format!("https://img.example/{}-a.png", id)],
        start_bid: 1000,
        closed: false,
        donator: "Twilight".to_string(),
        country: "Equestria".to_string(),
    }
}

pub fn sample_bid(id: &str, item_id: &str, amount: i64) -> Bid {
    Bid {
        id: id.to_string(),
        amount,
        bidder: format!("bidder-{}", id),
        bidder_display_name: format!("Bidder {}", id),
        item_id: item_id.to_string(),
    }
}

// region:    --- Fake Auction Api
/// 원격 경매 API 가짜 서버 상태
#[derive(Default)]
pub struct FakeAuction {
    pub items: Mutex<Vec<Item>>,
    pub current_item: Mutex<Option<Item>>,
    pub bids: Mutex<HashMap<String, Vec<Bid>>>,
    pub total_cents: Mutex<i64>,
    /// "METHOD path?query" 형태로 기록
    pub requests: Mutex<Vec<String>>,
    pub opened: Mutex<Vec<String>>,
    streams: Mutex<Vec<mpsc::UnboundedSender<String>>>,
    subscriptions: Mutex<usize>,
}

impl FakeAuction {
    pub fn with_items(items: Vec<Item>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
            ..Default::default()
        })
    }

    /// 연결된 모든 푸시 채널로 data 전송
    pub async fn push(&self, data: &str) {
        let mut streams = self.streams.lock().await;
        streams.retain(|sender| sender.send(data.to_string()).is_ok());
    }

    /// 모든 푸시 채널 종료
    pub async fn close_streams(&self) {
        self.streams.lock().await.clear();
    }

    pub async fn subscriptions(&self) -> usize {
        *self.subscriptions.lock().await
    }

    pub async fn wait_for_subscriptions(&self, count: usize) {
        eventually(|| async move { self.subscriptions().await >= count }).await;
    }
}

pub async fn spawn_fake(fake: Arc<FakeAuction>) -> String {
    let app = Router::new()
        .route("/api/items", get(get_items))
        .route("/api/currentItem", get(get_current_item))
        .route("/api/items/:id/bids", get(get_bids))
        .route("/api/items/:id/bids/:bid_id", delete(delete_bid))
        .route("/api/total", get(get_total))
        .route("/api/openItem", post(open_item))
        .route("/api/closeItem", post(close_item))
        .route("/api/events", get(events))
        .layer(middleware::from_fn_with_state(Arc::clone(&fake), authorize))
        .with_state(fake);
    serve(app).await
}

/// 임의 포트로 라우터 실행 후 base url 반환
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn authorize(
    State(fake): State<Arc<FakeAuction>>,
    Query(query): Query<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Response {
    let line = format!("{} {}", request.method(), request.uri());
    fake.requests.lock().await.push(line);
    if query.get("password").map(String::as_str) != Some(PASSWORD) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn get_items(State(fake): State<Arc<FakeAuction>>) -> impl IntoResponse {
    let items = fake.items.lock().await.clone();
    Json(json!({ "items": items }))
}

async fn get_current_item(State(fake): State<Arc<FakeAuction>>) -> impl IntoResponse {
    let item = fake.current_item.lock().await.clone();
    Json(json!({ "item": item }))
}

async fn get_bids(
    State(fake): State<Arc<FakeAuction>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let bids = fake.bids.lock().await.get(&id).cloned().unwrap_or_default();
    Json(json!({ "bids": bids }))
}

async fn get_total(State(fake): State<Arc<FakeAuction>>) -> impl IntoResponse {
    let total_cents = *fake.total_cents.lock().await;
    Json(json!({ "totalCents": total_cents }))
}

async fn open_item(
    State(fake): State<Arc<FakeAuction>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let item_id = form.get("itemId").cloned().unwrap_or_default();
    fake.opened.lock().await.push(item_id.clone());
    let item = fake
        .items
        .lock()
        .await
        .iter()
        .find(|item| item.id == item_id)
        .cloned();
    *fake.current_item.lock().await = item;
    fake.push(&json!({"type": "openItem", "event": {"itemId": item_id}}).to_string())
        .await;
    StatusCode::OK
}

async fn close_item(State(fake): State<Arc<FakeAuction>>) -> impl IntoResponse {
    let closed = fake.current_item.lock().await.take();
    if let Some(item) = closed {
        fake.push(&json!({"type": "closeItem", "event": {"itemId": item.id}}).to_string())
            .await;
    }
    StatusCode::OK
}

async fn delete_bid(
    State(fake): State<Arc<FakeAuction>>,
    Path((id, bid_id)): Path<(String, String)>,
) -> impl IntoResponse {
    if let Some(bids) = fake.bids.lock().await.get_mut(&id) {
        bids.retain(|bid| bid.id != bid_id);
    }
    fake.push(
        &json!({"type": "deleteBid", "event": {"itemId": id, "bidId": bid_id}}).to_string(),
    )
    .await;
    StatusCode::OK
}

async fn events(State(fake): State<Arc<FakeAuction>>) -> impl IntoResponse {
    let (sender, receiver) = mpsc::unbounded_channel::<String>();
    fake.streams.lock().await.push(sender);
    *fake.subscriptions.lock().await += 1;

    let stream = stream::unfold(receiver, |mut receiver| async move {
        receiver
            .recv()
            .await
            .map(|data| (Ok::<_, Infallible>(Event::default().data(data)), receiver))
    });
    Sse::new(stream)
}
// endregion: --- Fake Auction Api

// region:    --- Stub Auction Api
/// 네트워크 없이 응답하는 API (멈춘 시계 테스트용)
/// 입찰은 비어 있고 푸시 채널은 아무것도 보내지 않는다.
pub struct StubApi {
    pub items: Vec<Item>,
    pub total_cents: i64,
}

#[async_trait]
impl AuctionApi for StubApi {
    async fn get_items(&self) -> Result<Vec<Item>, AuctionError> {
        Ok(self.items.clone())
    }

    async fn get_current_item(&self) -> Result<Option<Item>, AuctionError> {
        Ok(None)
    }

    async fn get_item_bids(&self, _item_id: &str) -> Result<Vec<Bid>, AuctionError> {
        Ok(Vec::new())
    }

    async fn get_total_cents(&self) -> Result<i64, AuctionError> {
        Ok(self.total_cents)
    }

    async fn open_item(&self, _item_id: &str) -> Result<(), AuctionError> {
        Ok(())
    }

    async fn close_item(&self) -> Result<(), AuctionError> {
        Ok(())
    }

    async fn delete_bid(&self, _item_id: &str, _bid_id: &str) -> Result<(), AuctionError> {
        Ok(())
    }

    async fn subscribe(&self) -> Result<PushStream, AuctionError> {
        Ok(stream::pending().boxed())
    }
}
// endregion: --- Stub Auction Api

/// 조건이 참이 될 때까지 대기 (최대 5초)
pub async fn eventually<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..500 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("조건이 5초 안에 충족되지 않았습니다");
}
