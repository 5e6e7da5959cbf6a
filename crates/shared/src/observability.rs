//! # ログと Request ID
//!
//! Gateway と各サービスが共有する tracing の初期化処理。
//!
//! - `LOG_FORMAT=json` で 1 行 1 イベントの JSON、それ以外は人間向けの整形出力
//! - `RUST_LOG` が無ければ `info,showcase=debug`
//! - HTTP リクエストごとに `x-request-id` を採番し、リクエストスパンに載せる

/// Request ID を運ぶヘッダー
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ログの出力先フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// ログ収集基盤向け
    Json,
    /// 端末向け
    #[default]
    Pretty,
}

impl LogFormat {
    /// `"json"` / `"pretty"` を解釈する
    ///
    /// それ以外の値は `Pretty` として扱い、stderr に警告を出す。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: LOG_FORMAT={other:?} is not json|pretty, using pretty");
                Self::Pretty
            }
        }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// [`init_tracing`] の引数
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 起動ログに出すサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// `LOG_FORMAT` を読んで作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバルな tracing subscriber を登録する
///
/// プロセスで一度だけ呼ぶ。JSON 出力ではイベントのフィールドを最上位に展開し、
/// 現在のスパン（`app` / `request`）を `span` キーに含める。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{
        EnvFilter,
        Layer as _,
        fmt,
        layer::SubscriberExt,
        util::SubscriberInitExt,
    };

    const DEFAULT_DIRECTIVES: &str = "info,showcase=debug";

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let output = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().boxed(),
    };

    tracing_subscriber::registry().with(filter).with(output).init();

    tracing::debug!(
        service = %config.service_name,
        format = ?config.log_format,
        "ログ出力を開始しました"
    );
}

/// 時刻順に並ぶ UUID v7 を Request ID として採番する
///
/// クライアントが `x-request-id` を付けてきた場合は `SetRequestIdLayer` が
/// その値を優先するため、これは呼ばれない。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// `TraceLayer::make_span_with` 用の `request` スパン
///
/// ヘッダーが無い場合（レイヤー順を誤った場合）は `request_id = "-"` になる。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id
    )
}
