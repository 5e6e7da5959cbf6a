//! # 外部 API クライアント
//!
//! 統合対象のバックエンドサービスとの通信を担当する。

pub mod openapi_spec;

pub use openapi_spec::{OpenApiSpecClient, OpenApiSpecClientImpl, SpecFetchError};
