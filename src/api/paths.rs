//! 원격 API 경로 (퍼센트 인코딩 전 세그먼트 단위)

/// 전체 상품 목록
pub const ITEMS: &[&str] = &["api", "items"];

/// 현재 경매 중인 상품
pub const CURRENT_ITEM: &[&str] = &["api", "currentItem"];

/// 누적 모금액
pub const TOTAL: &[&str] = &["api", "total"];

/// 상품 경매 시작 (form: itemId)
pub const OPEN_ITEM: &[&str] = &["api", "openItem"];

/// 현재 상품 경매 종료
pub const CLOSE_ITEM: &[&str] = &["api", "closeItem"];

/// 푸시 채널
pub const EVENTS: &[&str] = &["api", "events"];

/// 상품 입찰 목록
pub fn item_bids(item_id: &str) -> [&str; 4] {
    ["api", "items", item_id, "bids"]
}

/// 상품 입찰 단건
pub fn item_bid<'a>(item_id: &'a str, bid_id: &'a str) -> [&'a str; 5] {
    ["api", "items", item_id, "bids", bid_id]
}
