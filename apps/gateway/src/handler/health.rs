//! # ヘルスチェックハンドラ
//!
//! レスポンス型は [`showcase_shared::HealthResponse`] を参照。

use std::sync::Arc;

use axum::{Json, extract::State};
use showcase_shared::HealthResponse;

/// ヘルスチェックで名乗るサービス名
pub const SERVICE_NAME: &str = "gateway-api";

/// ヘルスチェックハンドラの State
pub struct HealthState {
    /// 公開 API のバージョン（`API_VERSION`）
    pub version: String,
}

/// Gateway のヘルスチェックエンドポイント
///
/// バックエンドサービスの状態は見ない（Liveness のみ）。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(SERVICE_NAME, state.version.as_str()))
}
