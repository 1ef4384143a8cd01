// region:    --- Imports
use crate::auction::events::{AuctionEvent, PushMessage};
use crate::auction::model::Item;
use crate::error::AuctionError;
use chrono::{DateTime, Utc};

// endregion: --- Imports

// region:    --- Snapshot
/// 카탈로그 + 현재 상품 캐시
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub items: Vec<Item>,
    pub current_item: Option<Item>,
    pub ready: bool,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// 초기 조회 결과로 스냅샷 생성
    pub fn loaded(items: Vec<Item>, current_item: Option<Item>) -> Self {
        Self {
            items,
            current_item,
            ready: true,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// 푸시 메시지를 반영하고 발행할 알림을 반환
    /// 카탈로그에 없는 상품이 열리면 Desync 를 반환하고 스냅샷은 그대로 둔다.
    pub fn apply(&mut self, message: PushMessage) -> Result<AuctionEvent, AuctionError> {
        match message {
            PushMessage::OpenItem { item_id } => {
                let item = self
                    .item(&item_id)
                    .cloned()
                    .ok_or(AuctionError::Desync { item_id })?;
                self.current_item = Some(item.clone());
                Ok(AuctionEvent::ItemOpened { item })
            }
            PushMessage::CloseItem { item_id } => {
                self.current_item = None;
                if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
                    item.closed = true;
                }
                Ok(AuctionEvent::ItemClosed { item_id })
            }
            PushMessage::Bid(bid) => Ok(AuctionEvent::BidPlaced { bid }),
            PushMessage::DeleteBid { item_id, bid_id } => {
                Ok(AuctionEvent::BidDeleted { item_id, bid_id })
            }
        }
    }
}
// endregion: --- Snapshot
