/// 경매 상태 동기화 매니저
/// 1. 초기 스냅샷 조회 (카탈로그, 현재 상품)
/// 2. 푸시 채널 구독
/// 3. 푸시 메시지 -> 스냅샷 반영 -> 알림 재발행
// region:    --- Imports
use crate::api::AuctionApi;
use crate::auction::events::AuctionEvent;
use crate::auction::model::{Bid, Item};
use crate::error::AuctionError;
use crate::push::{self, PushStream};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

// endregion: --- Imports

pub mod snapshot;

pub use snapshot::Snapshot;

// 알림 채널 버퍼 크기
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

// region:    --- Auction Manager
pub struct AuctionManager {
    api: Arc<dyn AuctionApi>,
    snapshot: RwLock<Snapshot>,
    sender: broadcast::Sender<AuctionEvent>,
}

impl AuctionManager {
    pub fn new(api: Arc<dyn AuctionApi>) -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            snapshot: RwLock::new(Snapshot::default()),
            sender,
        }
    }

    /// 알림 구독
    pub fn subscribe(&self) -> broadcast::Receiver<AuctionEvent> {
        self.sender.subscribe()
    }

    /// 캐시된 카탈로그
    pub async fn get_items(&self) -> Vec<Item> {
        self.snapshot.read().await.items.clone()
    }

    pub async fn get_item(&self, item_id: &str) -> Option<Item> {
        self.snapshot.read().await.item(item_id).cloned()
    }

    /// 캐시된 현재 상품
    pub async fn get_current_item(&self) -> Option<Item> {
        self.snapshot.read().await.current_item.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.snapshot.read().await.ready
    }

    /// 마지막 스냅샷 조회 시각
    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.loaded_at
    }

    pub async fn get_item_bids(&self, item_id: &str) -> Result<Vec<Bid>, AuctionError> {
        self.api.get_item_bids(item_id).await
    }

    pub async fn open_item(&self, item_id: &str) -> Result<(), AuctionError> {
        self.api.open_item(item_id).await
    }

    pub async fn close_item(&self) -> Result<(), AuctionError> {
        self.api.close_item().await
    }

    pub async fn delete_bid(&self, item_id: &str, bid_id: &str) -> Result<(), AuctionError> {
        self.api.delete_bid(item_id, bid_id).await
    }

    pub async fn get_total_cents(&self) -> Result<i64, AuctionError> {
        self.api.get_total_cents().await
    }

    /// 동기화 루프
    /// 카탈로그 불일치 시 스냅샷을 버리고 구독부터 다시 시작한다.
    pub async fn run(&self) -> Result<(), AuctionError> {
        loop {
            // 구독을 먼저 열어 스냅샷 조회 중 도착한 메시지를 놓치지 않는다
            let mut stream = self.api.subscribe().await?;
            self.load_snapshot().await?;

            match self.consume(&mut stream).await {
                Err(AuctionError::Desync { item_id }) => {
                    warn!(
                        "{:<12} --> 카탈로그에 없는 상품 수신, 전체 재로드: {}",
                        "Manager", item_id
                    );
                    *self.snapshot.write().await = Snapshot::default();
                }
                other => return other,
            }
        }
    }

    /// 푸시 메시지 1건 처리
    /// 알 수 없는 종류의 메시지는 알림 없이 넘어간다.
    pub async fn handle_message(&self, data: &str) -> Result<Option<AuctionEvent>, AuctionError> {
        let Some(message) = push::decode_message(data)? else {
            return Ok(None);
        };
        debug!("{:<12} --> 푸시 메시지 수신: {:?}", "Manager", message);

        let event = self.snapshot.write().await.apply(message)?;
        self.publish(event.clone());
        Ok(Some(event))
    }

    async fn load_snapshot(&self) -> Result<(), AuctionError> {
        info!("{:<12} --> 초기 스냅샷 조회 시작", "Manager");
        let items = self.api.get_items().await?;
        let current_item = self.api.get_current_item().await?;
        let snapshot = Snapshot::loaded(items, current_item);
        info!(
            "{:<12} --> 초기 스냅샷 조회 성공: 상품 {}개, 현재 상품 {:?}, 시각 {:?}",
            "Manager",
            snapshot.items.len(),
            snapshot.current_item.as_ref().map(|item| &item.id),
            snapshot.loaded_at
        );

        *self.snapshot.write().await = snapshot;
        self.publish(AuctionEvent::Ready);
        Ok(())
    }

    async fn consume(&self, stream: &mut PushStream) -> Result<(), AuctionError> {
        while let Some(data) = stream.next().await {
            self.handle_message(&data?).await?;
        }
        Err(AuctionError::StreamClosed)
    }

    fn publish(&self, event: AuctionEvent) {
        if self.sender.send(event).is_err() {
            debug!("{:<12} --> 구독자 없음", "Manager");
        }
    }
}
// endregion: --- Auction Manager
