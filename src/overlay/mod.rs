/// 오버레이 상태 관리
/// 매니저 알림을 받아 화면 상태에 반영한다.
// region:    --- Imports
use crate::auction::events::AuctionEvent;
use crate::auction::model::Item;
use crate::config::Config;
use crate::manager::AuctionManager;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, Notify, RwLock};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

// endregion: --- Imports

pub mod board;
pub mod carousel;
pub mod view;

pub use board::{format_cents, BidBoard, BidLine};
pub use carousel::{ImageCarousel, ROTATE_INTERVAL};
pub use view::{ItemView, OverlayState, OverlayView};

// region:    --- Overlay
pub struct Overlay {
    manager: Arc<AuctionManager>,
    charity: String,
    big_webcam: bool,
    state: RwLock<OverlayState>,
    // 상품이 바뀌면 이미지 교체 주기를 다시 시작
    restart_carousel: Notify,
}

impl Overlay {
    pub fn new(manager: Arc<AuctionManager>, config: &Config) -> Self {
        Self {
            manager,
            charity: config.charity.clone(),
            big_webcam: config.overlay.big_webcam,
            state: RwLock::new(OverlayState::new(config.standby_image.clone())),
            restart_carousel: Notify::new(),
        }
    }

    /// 현재 화면 뷰 모델
    pub async fn view(&self) -> OverlayView {
        self.state.read().await.view(&self.charity, self.big_webcam)
    }

    /// 알림 수신 루프
    pub async fn run(&self, mut receiver: broadcast::Receiver<AuctionEvent>) {
        info!("{:<12} --> 알림 수신 시작", "Overlay");
        loop {
            match receiver.recv().await {
                Ok(event) => self.handle_event(event).await,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "{:<12} --> 알림 {}건 유실, 스냅샷에서 다시 로드",
                        "Overlay", skipped
                    );
                    self.resync().await;
                }
                Err(RecvError::Closed) => {
                    info!("{:<12} --> 알림 채널 종료", "Overlay");
                    return;
                }
            }
        }
    }

    /// 이미지 순환 루프
    /// 상품이 바뀔 때마다 새 상품의 첫 이미지가 한 주기 전체를 보여준다.
    pub async fn run_carousel(&self) {
        let mut ticker = interval_at(Instant::now() + ROTATE_INTERVAL, ROTATE_INTERVAL);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.state.write().await.carousel.advance() {
                        debug!("{:<12} --> 다음 이미지", "Overlay");
                    }
                }
                _ = self.restart_carousel.notified() => ticker.reset(),
            }
        }
    }

    /// 알림 1건 반영
    pub async fn handle_event(&self, event: AuctionEvent) {
        match event {
            AuctionEvent::Ready => self.resync().await,
            AuctionEvent::ItemOpened { item } => {
                info!("{:<12} --> 상품 경매 시작: {}", "Overlay", item.title);
                self.show_item(Some(item)).await;
                self.refresh_total().await;
            }
            AuctionEvent::ItemClosed { item_id } => {
                info!("{:<12} --> 상품 경매 종료: {}", "Overlay", item_id);
                self.show_item(None).await;
                self.refresh_total().await;
            }
            AuctionEvent::BidPlaced { bid } => {
                let mut state = self.state.write().await;
                let is_current = state
                    .current_item
                    .as_ref()
                    .is_some_and(|item| item.id == bid.item_id);
                if is_current {
                    state.bids.push(bid);
                } else {
                    debug!(
                        "{:<12} --> 현재 상품이 아닌 입찰 무시: {}",
                        "Overlay", bid.item_id
                    );
                }
            }
            AuctionEvent::BidDeleted { bid_id, .. } => {
                self.state.write().await.bids.remove(&bid_id);
            }
        }
    }

    /// 매니저 스냅샷 기준으로 화면 전체 재구성
    async fn resync(&self) {
        let current_item = self.manager.get_current_item().await;
        self.show_item(current_item).await;
        self.refresh_total().await;
        let ready = self.manager.is_ready().await;
        let synced_at = self.manager.loaded_at().await;
        info!(
            "{:<12} --> 스냅샷 기준 화면 재구성: ready={}, 스냅샷 시각 {:?}",
            "Overlay", ready, synced_at
        );
        let mut state = self.state.write().await;
        state.ready = ready;
        state.synced_at = synced_at;
    }

    async fn show_item(&self, item: Option<Item>) {
        let bids = match &item {
            Some(item) => match self.manager.get_item_bids(&item.id).await {
                Ok(bids) => BidBoard::from_server_order(bids),
                Err(e) => {
                    error!("{:<12} --> 입찰 목록 조회 실패: {}", "Overlay", e);
                    BidBoard::default()
                }
            },
            None => BidBoard::default(),
        };
        self.state.write().await.show_item(item, bids);
        self.restart_carousel.notify_one();
    }

    async fn refresh_total(&self) {
        match self.manager.get_total_cents().await {
            Ok(total_cents) => self.state.write().await.total_cents = total_cents,
            Err(e) => error!("{:<12} --> 모금액 조회 실패: {}", "Overlay", e),
        }
    }
}
// endregion: --- Overlay
