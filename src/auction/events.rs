use super::model::{Bid, Item};
use serde::{Deserialize, Serialize};

/// 푸시 채널로 수신되는 메시지 (`{type, event}`)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(
    tag = "type",
    content = "event",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum PushMessage {
    // 상품 경매 시작
    OpenItem { item_id: String },
    // 상품 경매 종료
    CloseItem { item_id: String },
    // 입찰
    Bid(Bid),
    // 입찰 철회
    DeleteBid { item_id: String, bid_id: String },
}

impl PushMessage {
    /// 처리하는 메시지 종류 (`type` 값)
    pub const KINDS: [&'static str; 4] = ["openItem", "closeItem", "bid", "deleteBid"];
}

/// 구독자에게 재발행되는 알림
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuctionEvent {
    // 초기 스냅샷 로드 완료
    Ready,
    // 새 현재 상품
    ItemOpened { item: Item },
    // 현재 상품 종료
    ItemClosed { item_id: String },
    // 새 입찰
    BidPlaced { bid: Bid },
    // 입찰 철회
    BidDeleted { item_id: String, bid_id: String },
}
