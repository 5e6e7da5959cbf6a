//! # OpenAPI Showcase Gateway サーバー
//!
//! 5 つのバックエンドサービスの OpenAPI ドキュメントを統合し、
//! 1 つのドキュメントとビューアとして公開する。
//!
//! ```text
//!                              ┌──────────────┐
//!                         ┌───▶│  Auth :8001  │
//! ┌──────────┐   ┌────────┴──┐ ├──────────────┤
//! │ Browser  │──▶│  Gateway  │▶│ Orders :8002 │
//! └──────────┘   │  :8000    │ ├──────────────┤
//!                └────────┬──┘ │     ...      │
//!                         └───▶│Webhook :8005 │
//!                              └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト |
//! |--------|------------|
//! | `GATEWAY_HOST` | `0.0.0.0` |
//! | `GATEWAY_PORT` | `8000` |
//! | `API_TITLE` / `API_DESCRIPTION` / `API_VERSION` | 統合ドキュメントの `info` |
//! | `AUTH_API_URL` ... `WEBHOOK_TESTER_API_URL` | `http://localhost:8001` ... `8005` |
//! | `SPEC_FETCH_TIMEOUT_SECS` | `5` |
//! | `CORS_ORIGINS` | `http://localhost:3000,http://localhost:8000` |
//! | `LOG_FORMAT` | `pretty`（`json` で JSON ログ） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p showcase-gateway
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use showcase_gateway::{
    app_builder::build_app,
    client::{OpenApiSpecClient, OpenApiSpecClientImpl},
    config::GatewayConfig,
};
use showcase_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Gateway サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の読み込み
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("gateway"));
    let _tracing_guard = tracing::info_span!("app", service = "gateway").entered();

    let config = GatewayConfig::from_env().context("設定の読み込みに失敗しました")?;

    let spec_client: Arc<dyn OpenApiSpecClient> = Arc::new(
        OpenApiSpecClientImpl::new(config.spec_fetch_timeout)
            .context("HTTP クライアントの初期化に失敗しました")?,
    );
    let app = build_app(&config, spec_client);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("バインドアドレスが不正です: {}", config.host))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Gateway サーバーを起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
