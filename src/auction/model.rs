use serde::{Deserialize, Serialize};

// 상품 모델
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// 시작 입찰가 (센트 단위)
    pub start_bid: i64,
    pub closed: bool,
    pub donator: String,
    pub country: String,
}

// 입찰 모델
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    /// 입찰 금액 (센트 단위)
    #[serde(rename = "bid")]
    pub amount: i64,
    pub bidder: String,
    pub bidder_display_name: String,
    pub item_id: String,
}

// region:    --- Response Envelopes
/// GET /api/items 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}

/// GET /api/currentItem 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentItemResponse {
    pub item: Option<Item>,
}

/// GET /api/items/{id}/bids 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct BidsResponse {
    pub bids: Vec<Bid>,
}

/// GET /api/total 응답
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalResponse {
    pub total_cents: i64,
}
// endregion: --- Response Envelopes
