//! # ページの切り出し
//!
//! フィルタ・ソート済みの候補列とページリクエストから、1 ページ分のアイテムと
//! 次ページのカーソルを作る。
//!
//! ## 処理の流れ
//!
//! 1. カーソルをデコードし、候補列から同じ ID のアイテムを線形探索する
//! 2. 見つかったアイテムの直後から `limit + 1` 件を取り出す
//! 3. 先読みの 1 件があれば `has_more = true` とし、最終アイテムからカーソルを作る
//!
//! カーソルの ID が候補列に存在しない場合（削除済みアイテム、別クエリのカーソル）は
//! 先頭ページから再開する。結果は新しい先頭ページになるだけで、誤ったページには
//! ならない。
//!
//! DB バックエンドでは線形探索の代わりに
//! `WHERE (sort_key, id) > (cursor.value, cursor.id)` でシークし、
//! 先読み結果を [`PaginatedResponse::from_lookahead`] に渡す。

use chrono::{DateTime, Utc};

use super::{
    cursor::{CursorError, CursorPayload, CursorValue, decode_cursor, encode_cursor},
    request::PageRequest,
};
use crate::PaginatedResponse;

/// 不正な形式のカーソルに対する方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidCursorPolicy {
    /// [`CursorError::InvalidCursor`] を返す（400 として扱う）
    #[default]
    Reject,
    /// 先頭ページから再開する
    Restart,
}

/// カーソルに埋め込むアイテムのソート位置
///
/// `sort_key_of` アクセサが返す値。作成日時順のデフォルトソートでは
/// [`SortKey::created_at`]、それ以外のフィールドでソートする場合は
/// [`SortKey::field`] を使う。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortKey {
    created_at: Option<DateTime<Utc>>,
    field:      Option<(String, CursorValue)>,
}

impl SortKey {
    /// ソート位置を持たない（ID のみのカーソル）
    pub fn none() -> Self {
        Self::default()
    }

    /// 作成日時によるソート位置
    pub fn created_at(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at: Some(created_at),
            field:      None,
        }
    }

    /// カスタムフィールドによるソート位置
    pub fn field(name: impl Into<String>, value: impl Into<CursorValue>) -> Self {
        Self {
            created_at: None,
            field:      Some((name.into(), value.into())),
        }
    }

    /// 作成日時を併せて記録する
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    fn into_payload(self, id: String) -> CursorPayload {
        let mut payload = CursorPayload::new(id);
        if let Some(created_at) = self.created_at {
            payload = payload.with_created_at(created_at);
        }
        if let Some((field, value)) = self.field {
            payload = payload.with_sort_field(field, value);
        }
        payload
    }
}

/// カーソルページネーター
///
/// 状態を持たないため、各サービスの State にそのまま保持して共有できる。
///
/// ```
/// use showcase_shared::{CursorPaginator, PageRequest, SortKey};
///
/// let paginator = CursorPaginator::default();
/// let request = PageRequest::new(None, 2).unwrap();
///
/// let page = paginator
///     .paginate(vec![3, 2, 1], &request, |n| n.to_string(), |_| SortKey::none())
///     .unwrap();
/// assert_eq!(page.items, vec![3, 2]);
/// assert!(page.has_more);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorPaginator {
    policy: InvalidCursorPolicy,
}

impl CursorPaginator {
    pub fn new(policy: InvalidCursorPolicy) -> Self {
        Self { policy }
    }

    /// 候補列から 1 ページを切り出す
    ///
    /// `candidates` はフィルタ・ソート済みであること。
    /// `id_of` はアイテムの一意な ID、`sort_key_of` はカーソルに記録する
    /// ソート位置を返す。
    ///
    /// # エラー
    ///
    /// [`InvalidCursorPolicy::Reject`] の場合、形式が不正なカーソルに対して
    /// [`CursorError::InvalidCursor`] を返す。
    pub fn paginate<T, I, K>(
        &self,
        candidates: Vec<T>,
        request: &PageRequest,
        id_of: I,
        sort_key_of: K,
    ) -> Result<PaginatedResponse<T>, CursorError>
    where
        I: Fn(&T) -> String,
        K: Fn(&T) -> SortKey,
    {
        let start = match request.cursor() {
            Some(cursor) => self.resume_index(&candidates, cursor, &id_of)?,
            None => 0,
        };
        let limit = request.limit() as usize;

        let lookahead: Vec<T> = candidates
            .into_iter()
            .skip(start)
            .take(limit + 1)
            .collect();

        Ok(PaginatedResponse::from_lookahead(
            lookahead,
            limit,
            id_of,
            sort_key_of,
        ))
    }

    /// カーソルが指すアイテムの直後のインデックスを返す
    fn resume_index<T, I>(
        &self,
        candidates: &[T],
        cursor: &str,
        id_of: &I,
    ) -> Result<usize, CursorError>
    where
        I: Fn(&T) -> String,
    {
        let payload = match decode_cursor(cursor) {
            Ok(payload) => payload,
            Err(e) => match self.policy {
                InvalidCursorPolicy::Reject => return Err(e),
                InvalidCursorPolicy::Restart => {
                    tracing::debug!(error = %e, "不正なカーソルのため先頭ページから再開します");
                    return Ok(0);
                }
            },
        };

        match candidates.iter().position(|item| id_of(item) == payload.id) {
            Some(index) => Ok(index + 1),
            None => {
                tracing::debug!(
                    cursor.id = %payload.id,
                    "カーソルの ID が候補に存在しないため先頭ページから再開します"
                );
                Ok(0)
            }
        }
    }
}

impl<T> PaginatedResponse<T> {
    /// 先読み結果からページを作る
    ///
    /// `items` は再開位置から最大 `limit + 1` 件取得したもの。
    /// `limit` を超える分があれば切り捨て、最後に返すアイテムから
    /// 次ページのカーソルを作る。
    pub fn from_lookahead<I, K>(mut items: Vec<T>, limit: usize, id_of: I, sort_key_of: K) -> Self
    where
        I: Fn(&T) -> String,
        K: Fn(&T) -> SortKey,
    {
        let overflowed = items.len() > limit;
        items.truncate(limit);

        let next_cursor = if overflowed {
            items.last().map(|last| {
                let payload = sort_key_of(last).into_payload(id_of(last));
                encode_cursor(&payload)
            })
        } else {
            None
        };

        Self::new(items, next_cursor)
    }
}
