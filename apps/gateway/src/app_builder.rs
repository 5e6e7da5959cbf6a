//! # Gateway アプリケーション構築
//!
//! ユースケース・State の組み立てとルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, http::HeaderValue, routing::get};
use showcase_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    client::OpenApiSpecClient,
    config::GatewayConfig,
    error::not_found_fallback,
    handler::{HealthState, OpenApiState, get_combined_spec, health_check, redoc, stoplight},
    usecase::{CombinedSpecUseCase, base_info},
};

/// ルーターを構築する
///
/// クライアントは外部から受け取る（テストではスタブを注入する）。
pub fn build_app(config: &GatewayConfig, spec_client: Arc<dyn OpenApiSpecClient>) -> Router {
    let openapi_state = Arc::new(OpenApiState {
        usecase: CombinedSpecUseCase::new(
            spec_client,
            config.services.clone(),
            base_info(config),
        ),
    });

    let health_state = Arc::new(HealthState {
        version: config.api_version.clone(),
    });

    // Request ID レイヤー（下に書いたものが外側）
    // 1. SetRequestIdLayer（最外）: UUID v7 を採番（クライアント提供値があればそれを使う）
    // 2. TraceLayer: request_id を含むスパンを作成
    // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
    // 4. CorsLayer: プリフライトはここで応答する
    Router::new()
        .merge(
            Router::new()
                .route("/health", get(health_check))
                .with_state(health_state),
        )
        .route("/stoplight", get(stoplight))
        .route("/redoc", get(redoc))
        .route("/openapi.json", get(get_combined_spec))
        .with_state(openapi_state)
        .fallback(not_found_fallback)
        .layer(cors_layer(&config.cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 許可オリジンの一覧から CORS レイヤーを作る
///
/// 認証情報付きリクエストを許可するため、メソッドとヘッダーはワイルドカードではなく
/// リクエストの値をそのまま返す。
fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
