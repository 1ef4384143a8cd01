/// 환경 변수 기반 설정
// region:    --- Imports
use std::borrow::Cow;
use std::env;

// endregion: --- Imports

pub const DEFAULT_SERVICE_URL: &str = "https://auction-api.charity.ponyfest.horse";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STANDBY_IMAGE: &str = "standby.png";
pub const DEFAULT_CHARITY: &str = "Benefiting the National Alliance on Mental Illness";

// region:    --- Overlay Config
/// 오버레이 URL 쿼리 파라미터
/// `password`: 경매 API 비밀번호, `webcam=big`: 큰 웹캠 레이아웃
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayConfig {
    pub password: String,
    pub big_webcam: bool,
}

impl OverlayConfig {
    /// 전체 URL 또는 쿼리 문자열에서 파싱
    /// 같은 키가 여러 번 나오면 첫 값을 쓴다.
    pub fn from_query(input: &str) -> Self {
        let query = input.split_once('?').map_or(input, |(_, query)| query);
        let query = query.split('#').next().unwrap_or_default();
        let pairs: Vec<(Cow<'_, str>, Cow<'_, str>)> =
            url::form_urlencoded::parse(query.as_bytes()).collect();

        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        };

        Self {
            password: first("password").unwrap_or_default(),
            big_webcam: first("webcam").as_deref() == Some("big"),
        }
    }
}
// endregion: --- Overlay Config

// region:    --- Config
#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: String,
    pub listen_addr: String,
    pub standby_image: String,
    pub charity: String,
    pub overlay: OverlayConfig,
}

impl Config {
    /// 환경 변수에서 설정 로드
    /// 오버레이 쿼리는 첫 번째 인자가 OVERLAY_QUERY 보다 우선한다.
    pub fn from_env() -> Self {
        let query = env::args()
            .nth(1)
            .or_else(|| env::var("OVERLAY_QUERY").ok())
            .unwrap_or_default();

        Self {
            service_url: env_or("AUCTION_SERVICE_URL", DEFAULT_SERVICE_URL),
            listen_addr: env_or("OVERLAY_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            standby_image: env_or("OVERLAY_STANDBY_IMAGE", DEFAULT_STANDBY_IMAGE),
            charity: env_or("OVERLAY_CHARITY", DEFAULT_CHARITY),
            overlay: OverlayConfig::from_query(&query),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
// endregion: --- Config
