// region:    --- Imports
use super::board::{format_cents, BidBoard, BidLine};
use super::carousel::ImageCarousel;
use crate::auction::model::Item;
use chrono::{DateTime, Utc};
use serde::Serialize;

// endregion: --- Imports

// region:    --- Overlay State
/// 오버레이 화면 상태
#[derive(Debug, Clone)]
pub struct OverlayState {
    pub ready: bool,
    pub current_item: Option<Item>,
    pub bids: BidBoard,
    pub total_cents: i64,
    pub carousel: ImageCarousel,
    /// 화면을 재구성한 스냅샷의 조회 시각
    pub synced_at: Option<DateTime<Utc>>,
}

impl OverlayState {
    pub fn new(standby_image: impl Into<String>) -> Self {
        Self {
            ready: false,
            current_item: None,
            bids: BidBoard::default(),
            total_cents: 0,
            carousel: ImageCarousel::new(standby_image),
            synced_at: None,
        }
    }

    /// 현재 상품 교체, 입찰 목록과 이미지도 함께 바꾼다
    pub fn show_item(&mut self, item: Option<Item>, bids: BidBoard) {
        match &item {
            Some(item) => self.carousel.show(&item.images),
            None => self.carousel.clear(),
        }
        self.current_item = item;
        self.bids = bids;
    }

    pub fn view(&self, charity: &str, big_webcam: bool) -> OverlayView {
        OverlayView {
            ready: self.ready,
            synced_at: self.synced_at,
            charity: charity.to_string(),
            total_raised: format_cents(self.total_cents),
            big_webcam,
            image: self.carousel.current().to_string(),
            item: self.current_item.as_ref().map(|item| ItemView {
                id: item.id.clone(),
                title: item.title.clone(),
                byline: format!("{} — {}", item.donator, item.country),
                highest_bid: self.bids.highest().map(BidLine::from),
                previous_bids: self.bids.previous().iter().map(BidLine::from).collect(),
            }),
        }
    }
}
// endregion: --- Overlay State

// region:    --- Overlay View
/// 렌더링 레이어에 넘기는 뷰 모델
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OverlayView {
    pub ready: bool,
    pub synced_at: Option<DateTime<Utc>>,
    pub charity: String,
    pub total_raised: String,
    pub big_webcam: bool,
    pub image: String,
    pub item: Option<ItemView>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub byline: String,
    pub highest_bid: Option<BidLine>,
    pub previous_bids: Vec<BidLine>,
}
// endregion: --- Overlay View
