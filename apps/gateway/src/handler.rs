//! # HTTP ハンドラ
//!
//! - `openapi`: 統合 OpenAPI ドキュメント
//! - `docs`: ドキュメントビューア（Stoplight Elements / Redoc）
//! - `health`: ヘルスチェック

pub mod docs;
pub mod health;
pub mod openapi;

pub use docs::{redoc, stoplight};
pub use health::{HealthState, health_check};
pub use openapi::{OpenApiState, get_combined_spec};
