//! # ユースケース層
//!
//! ハンドラは薄く保ち、サービス間の取得とマージの手順はここに集約する。
//! クライアントは `Arc<dyn Trait>` で外部から注入する。

pub mod combined_spec;

pub use combined_spec::{CombinedSpecUseCase, base_info};
