//! # カーソルベースページネーション
//!
//! Orders / Notifications / Webhook Tester の一覧 API で共有するページネーションエンジン。
//!
//! ## 構成
//!
//! - `cursor`: カーソルのエンコード / デコード（URL-safe base64 + JSON）
//! - `request`: ページリクエスト（`cursor` / `limit` クエリパラメータ）
//! - `paginator`: 候補列から 1 ページを切り出す [`CursorPaginator`]
//! - `sort`: 呼び出し側が候補列を全順序で並べるためのヘルパー
//!
//! ## 前提
//!
//! エンジンはフィルタもソートも行わない。呼び出し側はフィルタ・ソート済みの
//! 候補列を渡す。ソートは ID によるタイブレークを含む全順序でなければならない
//! （カーソルの再開位置は ID の線形探索で決まるため）。
//!
//! カーソルは同じフィルタ・ソート条件でのみ意味を持つ。デコード時にその整合性は
//! 検証しないため、異なるクエリ間でカーソルを使い回してはならない。

mod cursor;
mod paginator;
mod request;
mod sort;

pub use cursor::{CursorError, CursorPayload, CursorValue, decode_cursor, encode_cursor};
pub use paginator::{CursorPaginator, InvalidCursorPolicy, SortKey};
pub use request::{DEFAULT_LIMIT, MAX_LIMIT, PageRequest, PageRequestError};
pub use sort::{SortOrder, sort_candidates};
