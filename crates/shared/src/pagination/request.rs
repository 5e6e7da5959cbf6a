//! # ページリクエスト
//!
//! 一覧 API が受け取る `cursor` / `limit` クエリパラメータ。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `limit` 未指定時の取得件数
pub const DEFAULT_LIMIT: u32 = 20;

/// `limit` の上限
pub const MAX_LIMIT: u32 = 100;

/// ページリクエストのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// `limit` が 1〜100 の範囲外
    #[error("limit は 1 以上 {MAX_LIMIT} 以下である必要があります（指定値: {0}）")]
    InvalidLimit(u32),
}

/// ページリクエスト
///
/// # 不変条件
///
/// - `limit` は 1 以上 [`MAX_LIMIT`] 以下
/// - `cursor` が空文字列の場合は未指定として扱う
///
/// クエリ文字列からのデシリアライズでも同じ検証を行う。
///
/// ```
/// use showcase_shared::PageRequest;
///
/// let request = PageRequest::first_page();
/// assert_eq!(request.limit(), 20);
/// assert!(request.cursor().is_none());
///
/// assert!(PageRequest::new(None, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct PageRequest {
    /// 前ページのレスポンスで返されたカーソル
    cursor: Option<String>,
    /// 取得件数（デフォルト 20、最大 100）
    #[cfg_attr(feature = "openapi", param(minimum = 1, maximum = 100, default = 20))]
    limit:  u32,
}

impl PageRequest {
    /// 新しいページリクエストを作成する
    pub fn new(cursor: Option<String>, limit: u32) -> Result<Self, PageRequestError> {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PageRequestError::InvalidLimit(limit));
        }
        Ok(Self {
            cursor: cursor.filter(|c| !c.is_empty()),
            limit,
        })
    }

    /// 先頭ページ（デフォルト件数）のリクエスト
    pub fn first_page() -> Self {
        Self {
            cursor: None,
            limit:  DEFAULT_LIMIT,
        }
    }

    /// 指定カーソルから再開するリクエスト（件数は維持）
    pub fn with_cursor(&self, cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()).filter(|c| !c.is_empty()),
            limit:  self.limit,
        }
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first_page()
    }
}

/// デシリアライズ用の未検証リクエスト
#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default = "default_limit")]
    limit:  u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.cursor, raw.limit)
    }
}
