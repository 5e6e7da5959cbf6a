//! # OpenAPI Showcase 共有ユーティリティ
//!
//! このクレートは、OpenAPI Showcase
//! の各サービス（Orders / Notifications / Webhook Tester / Gateway）で使用される
//! 共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（HTTP レスポンスへの変換は各サービスの責務）
//! - 外部クレートへの依存は最小限に抑える

pub mod error_response;
pub mod health;
pub mod observability;
pub mod paginated_response;
pub mod pagination;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
pub use paginated_response::PaginatedResponse;
pub use pagination::{
    CursorError,
    CursorPaginator,
    CursorPayload,
    CursorValue,
    InvalidCursorPolicy,
    PageRequest,
    PageRequestError,
    SortKey,
    SortOrder,
    decode_cursor,
    encode_cursor,
    sort_candidates,
};
