// region:    --- Imports
use auction_overlay::api::{AuctionApi, HttpAuctionApi};
use auction_overlay::config::Config;
use auction_overlay::handlers;
use auction_overlay::manager::AuctionManager;
use auction_overlay::overlay::Overlay;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env();
    info!(
        "{:<12} --> 경매 API: {}, 큰 웹캠: {}",
        "Main", config.service_url, config.overlay.big_webcam
    );

    // 원격 API 클라이언트 생성
    let api: Arc<dyn AuctionApi> = Arc::new(HttpAuctionApi::new(
        &config.service_url,
        config.overlay.password.clone(),
    )?);

    // 상태 동기화 매니저 생성
    let manager = Arc::new(AuctionManager::new(api));
    let overlay = Arc::new(Overlay::new(Arc::clone(&manager), &config));

    // run 이전에 구독해야 Ready 알림을 놓치지 않는다
    let receiver = manager.subscribe();
    let overlay_events = Arc::clone(&overlay);
    tokio::spawn(async move {
        overlay_events.run(receiver).await;
    });

    let overlay_carousel = Arc::clone(&overlay);
    tokio::spawn(async move {
        overlay_carousel.run_carousel().await;
    });

    let sync_manager = Arc::clone(&manager);
    tokio::spawn(async move {
        if let Err(e) = sync_manager.run().await {
            error!("{:<12} --> 동기화 중단: {}", "Main", e);
        }
    });

    // 라우터 설정
    let routes_all = handlers::routes(manager, overlay);

    // 리스너 생성
    let listener = TcpListener::bind(config.listen_addr.as_str()).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
