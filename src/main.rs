//! # Quotes API 웹 서버 진입점
//!
//! 명언 검색/브라우즈 API 서버의 시작점입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. PostgreSQL(ParadeDB) 연결 풀 생성과 연결 확인
//! 4. API 라우터와 미들웨어(CORS, 요청 로깅) 설정
//! 5. HTTP 서버 시작 (Ctrl+C로 정상 종료)

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

use anyhow::Result;
use config::Config;
use routes::AppState;
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 이 크레이트와 HTTP 계층을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotes_api=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting Quotes API server on {}:{}", config.host, config.port);

    // 연결 풀: 요청 하나가 최대 5개의 쿼리를 동시에 실행하므로
    // max_connections는 그보다 크게 잡는 것이 좋습니다.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 잘못된 DATABASE_URL이나 꺼진 DB를 첫 요청이 아니라 시작 시점에 발견하기 위한 확인
    sqlx::query("SELECT 1").execute(&pool).await?;
    tracing::info!("Connected to database");

    let state = AppState { pool: pool.clone() };

    // 프론트엔드가 다른 출처(예: localhost:3000)에서 호출하므로 모두 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 진행 중인 쿼리가 끝난 뒤 연결을 정리합니다.
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Ctrl+C를 기다립니다. 시그널 핸들러를 등록하지 못하면 종료 신호 없이 계속 실행합니다.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
