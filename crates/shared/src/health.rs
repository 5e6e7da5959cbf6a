//! # ヘルスチェック共通型
//!
//! 全サービスのヘルスチェックエンドポイントで使用される共通レスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// ```
/// use showcase_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("gateway-api", "1.0.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// サービス名（例: `"gateway-api"`）
    pub service: String,
    /// 公開 API のバージョン
    pub version: String,
}

impl HealthResponse {
    /// 稼働中のレスポンスを作成する
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            service: service.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_responseのserializeで正しいjson形状にする() {
        let response = HealthResponse::healthy("gateway-api", "1.0.0");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "service": "gateway-api",
                "version": "1.0.0"
            })
        );
    }
}
