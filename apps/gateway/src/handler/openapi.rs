//! # 統合 OpenAPI ドキュメントハンドラ

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{bundler::CombinedSpec, usecase::CombinedSpecUseCase};

/// 統合ドキュメントハンドラの State
pub struct OpenApiState {
    pub usecase: CombinedSpecUseCase,
}

/// GET /openapi.json
///
/// リクエストのたびに各サービスから取得し直す（キャッシュしない）。
#[tracing::instrument(skip_all)]
pub async fn get_combined_spec(State(state): State<Arc<OpenApiState>>) -> Json<CombinedSpec> {
    Json(state.usecase.combined_spec().await)
}
