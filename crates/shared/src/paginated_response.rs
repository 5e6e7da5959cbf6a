//! # ページネーション付きレスポンス
//!
//! カーソルベースのページネーションに対応した API レスポンス型。

use serde::{Deserialize, Serialize};

/// ページネーション付きレスポンス
///
/// ## JSON 形式
///
/// ```json
/// {
///   "items": [...],
///   "next_cursor": "opaque-cursor-string",
///   "has_more": true
/// }
/// ```
///
/// `next_cursor` が `null` の場合は最後のページを意味する。
///
/// # 不変条件
///
/// - `has_more` は `next_cursor.is_some()` と常に一致する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginatedResponse<T> {
    /// 現在のページのアイテム
    pub items:       Vec<T>,
    /// 次ページのカーソル（最終ページでは `null`）
    pub next_cursor: Option<String>,
    /// 後続ページが存在するか
    pub has_more:    bool,
    /// 総件数（計算コストが高いため任意）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total:       Option<u64>,
}

impl<T> PaginatedResponse<T> {
    /// `has_more` を `next_cursor` から導出して作成する
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            has_more: next_cursor.is_some(),
            items,
            next_cursor,
            total: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_serializeを正しいjson形状にする() {
        let response = PaginatedResponse::new(vec!["a", "b"], Some("next".to_string()));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "items": ["a", "b"],
                "next_cursor": "next",
                "has_more": true
            })
        );
    }

    #[test]
    fn test_最終ページはnext_cursorがnullでhas_moreがfalse() {
        let response = PaginatedResponse::new(vec![1, 2], None);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["next_cursor"], serde_json::Value::Null);
        assert_eq!(json["has_more"], false);
    }

    #[test]
    fn test_totalを設定するとjsonに含まれる() {
        let response = PaginatedResponse {
            total: Some(0),
            ..PaginatedResponse::new(Vec::<i32>::new(), None)
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["total"], 0);
    }

    #[test]
    fn test_deserializeでtotal省略を許容する() {
        let json = r#"{"items": [], "next_cursor": null, "has_more": false}"#;
        let response: PaginatedResponse<String> = serde_json::from_str(json).unwrap();

        assert_eq!(response, PaginatedResponse::new(vec![], None));
    }
}

#[cfg(all(test, feature = "openapi"))]
mod openapi_tests {
    use utoipa::PartialSchema;

    use super::*;

    #[test]
    fn test_paginated_responseにtoschemaが実装されている() {
        let schema = PaginatedResponse::<String>::schema();
        let utoipa::openapi::RefOr::T(schema) = schema else {
            panic!("expected inline schema, got ref");
        };
        let utoipa::openapi::Schema::Object(obj) = schema else {
            panic!("expected object schema");
        };
        assert!(obj.properties.contains_key("items"));
        assert!(obj.properties.contains_key("next_cursor"));
        assert!(obj.properties.contains_key("has_more"));
    }
}
