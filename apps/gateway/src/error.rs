//! # Gateway エラーハンドリング
//!
//! 共通の [`ErrorResponse`] を axum レスポンスへ変換する。

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use showcase_shared::ErrorResponse;

/// HTTP API エラー
///
/// ステータスコードは `ErrorResponse::status` から決まる。
/// HTTP ステータスとして不正な値の場合は 500 の内部エラーに置き換える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(pub ErrorResponse);

impl From<ErrorResponse> for ApiError {
    fn from(error: ErrorResponse) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match StatusCode::from_u16(self.0.status) {
            Ok(status) => (status, Json(self.0)).into_response(),
            Err(_) => {
                tracing::error!(status = self.0.status, "不正なステータスのエラーレスポンスです");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal_error()),
                )
                    .into_response()
            }
        }
    }
}

/// ルートが存在しない場合のフォールバック
pub async fn not_found_fallback(uri: Uri) -> ApiError {
    ErrorResponse::not_found(format!("{} は存在しません", uri.path())).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responseのstatusがhttpステータスになる() {
        let response = ApiError(ErrorResponse::not_found("無い")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_範囲外のstatusは500の内部エラーに置き換わる() {
        let response = ApiError(ErrorResponse::new("odd", "Odd", 1000, "")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error, ErrorResponse::internal_error());
    }
}
