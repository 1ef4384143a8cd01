use crate::auction::model::Bid;
use serde::Serialize;

// 최고 입찰 아래에 보여줄 이전 입찰 수
const PREVIOUS_BIDS_SHOWN: usize = 4;

/// 센트 단위 금액을 `$25.50` 형식으로 변환
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

// region:    --- Bid Board
/// 최신 입찰이 앞에 오는 입찰 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidBoard {
    bids: Vec<Bid>,
}

impl BidBoard {
    /// 서버 순서(오래된 것부터)의 목록을 뒤집어 보드 생성
    pub fn from_server_order(bids: Vec<Bid>) -> Self {
        Self {
            bids: bids.into_iter().rev().collect(),
        }
    }

    /// 새 입찰을 맨 앞에 추가, 이미 있는 id 는 무시
    pub fn push(&mut self, bid: Bid) {
        if self.bids.iter().any(|existing| existing.id == bid.id) {
            return;
        }
        self.bids.insert(0, bid);
    }

    /// 입찰 id 로 제거, 나머지 순서는 유지
    pub fn remove(&mut self, bid_id: &str) {
        self.bids.retain(|bid| bid.id != bid_id);
    }

    pub fn clear(&mut self) {
        self.bids.clear();
    }

    pub fn highest(&self) -> Option<&Bid> {
        self.bids.first()
    }

    pub fn previous(&self) -> &[Bid] {
        let end = self.bids.len().min(PREVIOUS_BIDS_SHOWN + 1);
        self.bids.get(1..end).unwrap_or(&[])
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }
}
// endregion: --- Bid Board

/// 화면에 표시할 입찰 한 줄
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BidLine {
    pub id: String,
    pub amount: String,
    pub bidder: String,
}

impl From<&Bid> for BidLine {
    fn from(bid: &Bid) -> Self {
        Self {
            id: bid.id.clone(),
            amount: format_cents(bid.amount),
            bidder: bid.bidder_display_name.clone(),
        }
    }
}
