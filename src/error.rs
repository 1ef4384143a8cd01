// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Auction Error
/// 오버레이 전역 에러
#[derive(Debug, Error)]
pub enum AuctionError {
    /// 원격 API 호출 실패 (전송 오류 또는 2xx 가 아닌 응답)
    #[error("원격 API 호출 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 응답 본문 역직렬화 실패
    #[error("응답 역직렬화 실패 ({context}): {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// 푸시 메시지 역직렬화 실패
    #[error("푸시 메시지 역직렬화 실패: {payload:?}: {source}")]
    MalformedPush {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// 캐시된 카탈로그에 없는 상품이 열림
    #[error("카탈로그에 없는 상품: {item_id}")]
    Desync { item_id: String },

    /// 푸시 채널이 서버에 의해 닫힘
    #[error("푸시 채널이 닫혔습니다")]
    StreamClosed,

    #[error("잘못된 URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
// endregion: --- Auction Error
