//! # Gateway 設定
//!
//! 環境変数から Gateway サーバーの設定を読み込む。
//! すべての変数にデフォルト値があり、未設定でもローカル開発構成で起動できる。

use std::{env, time::Duration};

use axum::http::HeaderValue;
use thiserror::Error;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8000";

const DEFAULT_TITLE: &str = "OpenAPI Showcase - Combined API";
const DEFAULT_DESCRIPTION: &str = "\
# OpenAPI Showcase

5 つのバックエンドサービスの OpenAPI ドキュメントを統合したものです。

## Services

- **Auth API** (`/auth`): JWT 認証とユーザー管理
- **Orders API** (`/orders`): カーソルページネーション付きの注文管理
- **File Processor API** (`/files`): ファイルのアップロードと変換
- **Notifications API** (`/notifications`): WebSocket / SSE による通知
- **Webhook Tester API** (`/webhooks`): Webhook の受信と検査

## Authentication

```
Authorization: Bearer <access_token>
```
";

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 値を解釈できない
    #[error("{name} の値が不正です: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// 統合対象のバックエンドサービス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// サービス名（スキーマ名の名前空間）
    pub name:        &'static str,
    /// 統合ドキュメントでのパスプレフィックス
    pub path_prefix: &'static str,
    /// サービスのベース URL
    pub base_url:    String,
}

/// Gateway サーバーの設定
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 統合ドキュメントのタイトル
    pub api_title: String,
    /// 統合ドキュメントの説明
    pub api_description: String,
    /// 統合ドキュメントのバージョン
    pub api_version: String,
    /// 統合対象サービス（マージ順）
    pub services: Vec<ServiceEndpoint>,
    /// 各サービスからのドキュメント取得タイムアウト
    pub spec_fetch_timeout: Duration,
    /// クロスオリジンアクセスを許可するオリジン
    pub cors_origins: Vec<HeaderValue>,
}

/// (サービス名, パスプレフィックス, URL の環境変数, デフォルト URL)
const SERVICE_TABLE: [(&str, &str, &str, &str); 5] = [
    ("Auth", "/auth", "AUTH_API_URL", "http://localhost:8001"),
    ("Orders", "/orders", "ORDERS_API_URL", "http://localhost:8002"),
    (
        "FileProcessor",
        "/files",
        "FILE_PROCESSOR_API_URL",
        "http://localhost:8003",
    ),
    (
        "Notifications",
        "/notifications",
        "NOTIFICATIONS_API_URL",
        "http://localhost:8004",
    ),
    (
        "WebhookTester",
        "/webhooks",
        "WEBHOOK_TESTER_API_URL",
        "http://localhost:8005",
    ),
];

impl GatewayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// テストではプロセスの環境変数を書き換えずに済むよう、これを直接使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = parse_var("GATEWAY_PORT", lookup("GATEWAY_PORT"), 8000u16)?;
        let timeout_secs = parse_var(
            "SPEC_FETCH_TIMEOUT_SECS",
            lookup("SPEC_FETCH_TIMEOUT_SECS"),
            5u64,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name:  "SPEC_FETCH_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        let services = SERVICE_TABLE
            .iter()
            .map(|&(name, path_prefix, url_var, default_url)| ServiceEndpoint {
                name,
                path_prefix,
                base_url: get_or(url_var, default_url),
            })
            .collect();

        let cors_origins = parse_origins(&get_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS))?;

        Ok(Self {
            host: get_or("GATEWAY_HOST", "0.0.0.0"),
            port,
            api_title: get_or("API_TITLE", DEFAULT_TITLE),
            api_description: get_or("API_DESCRIPTION", DEFAULT_DESCRIPTION),
            api_version: get_or("API_VERSION", "1.0.0"),
            services,
            spec_fetch_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

/// カンマ区切りのオリジン一覧。空要素は無視する
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidValue {
                name:  "CORS_ORIGINS",
                value: raw.to_string(),
            })
        })
        .collect()
}
