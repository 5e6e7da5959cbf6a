//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 全サービスで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は各サービスの責務（shared に axum 依存を入れない）
//! - よく使うエラー種別は便利コンストラクタで提供し、URI のハードコードを排除
//! - ページネーションのエラーは `From` で変換できる

use serde::{Deserialize, Serialize};

use crate::pagination::{CursorError, PageRequestError};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://openapi-showcase.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
///
/// すべてのサービスで統一されたエラーレスポンス形式。
/// `type` フィールドは URI で問題の種類を識別する（機械可読なエラーコード）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(as = ProblemDetails))]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `error_type_suffix` はベース URI に付加される（例: `"invalid-cursor"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// 404 Not Found
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", 404, detail)
    }

    /// 400 Validation Error
    pub fn validation_error(detail: impl Into<String>) -> Self {
        Self::new("validation-error", "Validation Error", 400, detail)
    }

    /// 400 Invalid Cursor
    pub fn invalid_cursor(detail: impl Into<String>) -> Self {
        Self::new("invalid-cursor", "Invalid Cursor", 400, detail)
    }

    /// 500 Internal Server Error
    ///
    /// detail は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            "内部エラーが発生しました",
        )
    }
}

impl From<CursorError> for ErrorResponse {
    fn from(err: CursorError) -> Self {
        Self::invalid_cursor(err.to_string())
    }
}

impl From<PageRequestError> for ErrorResponse {
    fn from(err: PageRequestError) -> Self {
        Self::validation_error(err.to_string())
    }
}
