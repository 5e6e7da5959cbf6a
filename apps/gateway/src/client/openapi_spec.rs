//! # OpenAPI ドキュメント取得クライアント
//!
//! 各バックエンドサービスの `GET {base_url}/openapi.json` を呼び出す。
//! 取得に失敗したサービスはマージ対象から外れるだけなので、
//! リトライは行わない。

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// ドキュメント取得エラー
#[derive(Debug, Clone, Error)]
pub enum SpecFetchError {
    /// タイムアウト
    #[error("タイムアウトしました: {0}")]
    Timeout(String),

    /// 接続失敗などのネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 2xx 以外のステータス
    #[error("予期しないステータス {status}: {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// レスポンスボディが JSON でない
    #[error("JSON として解釈できません: {0}")]
    InvalidBody(String),
}

impl From<reqwest::Error> for SpecFetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SpecFetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            SpecFetchError::InvalidBody(err.to_string())
        } else {
            SpecFetchError::Network(err.to_string())
        }
    }
}

/// OpenAPI ドキュメント取得クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait OpenApiSpecClient: Send + Sync {
    /// サービスの OpenAPI ドキュメントを取得する
    async fn fetch_spec(&self, base_url: &str) -> Result<Value, SpecFetchError>;
}

/// reqwest による実装
#[derive(Debug, Clone)]
pub struct OpenApiSpecClientImpl {
    client: reqwest::Client,
}

impl OpenApiSpecClientImpl {
    /// 新しいクライアントを作成する
    ///
    /// `timeout` はリクエスト全体（接続からボディ受信まで）に適用される。
    pub fn new(timeout: Duration) -> Result<Self, SpecFetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OpenApiSpecClient for OpenApiSpecClientImpl {
    async fn fetch_spec(&self, base_url: &str) -> Result<Value, SpecFetchError> {
        let url = format!("{}/openapi.json", base_url.trim_end_matches('/'));

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpecFetchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
