/// 원격 경매 API 클라이언트
/// 모든 요청에 password 쿼리 파라미터를 붙인다.
// region:    --- Imports
use crate::auction::model::{
    Bid, BidsResponse, CurrentItemResponse, Item, ItemsResponse, TotalResponse,
};
use crate::error::AuctionError;
use crate::push::{self, PushStream};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

// endregion: --- Imports

pub mod paths;

// region:    --- Auction Api Trait
/// 원격 경매 API 트레이트
#[async_trait]
pub trait AuctionApi: Send + Sync {
    async fn get_items(&self) -> Result<Vec<Item>, AuctionError>;
    async fn get_current_item(&self) -> Result<Option<Item>, AuctionError>;
    /// 서버가 준 순서 그대로 반환
    async fn get_item_bids(&self, item_id: &str) -> Result<Vec<Bid>, AuctionError>;
    async fn get_total_cents(&self) -> Result<i64, AuctionError>;
    async fn open_item(&self, item_id: &str) -> Result<(), AuctionError>;
    async fn close_item(&self) -> Result<(), AuctionError>;
    async fn delete_bid(&self, item_id: &str, bid_id: &str) -> Result<(), AuctionError>;
    /// 푸시 채널 구독
    async fn subscribe(&self) -> Result<PushStream, AuctionError>;
}
// endregion: --- Auction Api Trait

// region:    --- Http Auction Api
/// reqwest 기반 구현체
pub struct HttpAuctionApi {
    client: Client,
    base_url: Url,
    password: String,
}

impl HttpAuctionApi {
    pub fn new(base_url: &str, password: impl Into<String>) -> Result<Self, AuctionError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AuctionError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            password: password.into(),
        })
    }

    /// 경로 세그먼트를 인코딩해 붙이고 password 를 더한 전체 URL
    /// 상품/입찰 id 에 `/`, `?`, `#` 이 있어도 한 세그먼트로 남는다.
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        with_password(url.as_str(), &self.password)
    }

    async fn get_json<T>(&self, segments: &[&str]) -> Result<T, AuctionError>
    where
        T: DeserializeOwned,
    {
        let path = segments.join("/");
        debug!("{:<12} --> GET /{}", "Api", path);
        let response = self
            .client
            .get(self.url(segments))
            .send()
            .await?
            .error_for_status()?;
        deserialize_response(response, &path).await
    }
}

#[async_trait]
impl AuctionApi for HttpAuctionApi {
    async fn get_items(&self) -> Result<Vec<Item>, AuctionError> {
        let body: ItemsResponse = self.get_json(paths::ITEMS).await?;
        Ok(body.items)
    }

    async fn get_current_item(&self) -> Result<Option<Item>, AuctionError> {
        let body: CurrentItemResponse = self.get_json(paths::CURRENT_ITEM).await?;
        Ok(body.item)
    }

    async fn get_item_bids(&self, item_id: &str) -> Result<Vec<Bid>, AuctionError> {
        let body: BidsResponse = self.get_json(&paths::item_bids(item_id)).await?;
        Ok(body.bids)
    }

    async fn get_total_cents(&self) -> Result<i64, AuctionError> {
        let body: TotalResponse = self.get_json(paths::TOTAL).await?;
        Ok(body.total_cents)
    }

    async fn open_item(&self, item_id: &str) -> Result<(), AuctionError> {
        info!("{:<12} --> 상품 경매 시작 요청: {}", "Api", item_id);
        self.client
            .post(self.url(paths::OPEN_ITEM))
            .form(&[("itemId", item_id)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn close_item(&self) -> Result<(), AuctionError> {
        info!("{:<12} --> 상품 경매 종료 요청", "Api");
        self.client
            .post(self.url(paths::CLOSE_ITEM))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_bid(&self, item_id: &str, bid_id: &str) -> Result<(), AuctionError> {
        info!(
            "{:<12} --> 입찰 철회 요청: item={}, bid={}",
            "Api", item_id, bid_id
        );
        self.client
            .delete(self.url(&paths::item_bid(item_id, bid_id)))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn subscribe(&self) -> Result<PushStream, AuctionError> {
        info!("{:<12} --> 푸시 채널 연결", "Api");
        let response = self
            .client
            .get(self.url(paths::EVENTS))
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;
        Ok(push::event_stream(response))
    }
}
// endregion: --- Http Auction Api

// region:    --- Helpers
/// password 쿼리 파라미터 추가
/// 이미 쿼리 문자열이 있으면 `&`, 없으면 `?` 로 잇는다.
pub fn with_password(url: &str, password: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    let encoded: String = url::form_urlencoded::byte_serialize(password.as_bytes()).collect();
    format!("{}{}password={}", url, separator, encoded)
}

async fn deserialize_response<T>(response: Response, context: &str) -> Result<T, AuctionError>
where
    T: DeserializeOwned,
{
    let full = response.bytes().await?;
    serde_json::from_slice(&full).map_err(|source| AuctionError::Decode {
        context: format!("{}: {}", context, String::from_utf8_lossy(&full)),
        source,
    })
}
// endregion: --- Helpers
