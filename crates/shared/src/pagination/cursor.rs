//! # カーソルのエンコード / デコード
//!
//! カーソルは [`CursorPayload`] を JSON にシリアライズし、URL-safe base64
//! でエンコードした opaque 文字列。
//!
//! ```text
//! {"created_at":"2024-01-01T00:00:00+00:00","id":"42"}
//!   └─ base64 (URL-safe, パディングあり) ─▶ eyJjcmVhdGVkX2F0Ijoi...
//! ```
//!
//! JSON のキーは常にソート順で出力されるため、論理的に同じ内容のカーソルは
//! バイト単位で同一の文字列になる。

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// カーソル用 base64 エンジン
///
/// エンコードはパディング付き。デコードはパディングの有無を問わない。
const CURSOR_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// カーソルエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// base64 / JSON / 必須フィールドのいずれかが不正
    #[error("不正なカーソルです: {0}")]
    InvalidCursor(String),
}

/// カーソルに埋め込むソート値
///
/// JSON プリミティブのみを保持する。日時は RFC 3339（ISO 8601）文字列、
/// UUID はハイフン区切り文字列に正規化される。
///
/// JSON に表現できない非有限の浮動小数点数は `"Infinity"` / `"-Infinity"` /
/// `"NaN"` の文字列として保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for CursorValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CursorValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CursorValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for CursorValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for CursorValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Float(value)
        } else if value.is_nan() {
            Self::Text("NaN".to_string())
        } else if value.is_sign_positive() {
            Self::Text("Infinity".to_string())
        } else {
            Self::Text("-Infinity".to_string())
        }
    }
}

impl From<String> for CursorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CursorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for CursorValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(to_iso8601(value))
    }
}

impl From<Uuid> for CursorValue {
    fn from(value: Uuid) -> Self {
        Self::Text(value.to_string())
    }
}

/// カーソルの中身
///
/// フィールドの宣言順がそのまま JSON のキー順になる。
/// キーをソート順に保つため、フィールドはアルファベット順に並べている。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPayload {
    /// 最終アイテムの作成日時（ISO 8601）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// カスタムソートのフィールド名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field:      Option<String>,
    /// 最終アイテムの ID
    pub id:         String,
    /// カスタムソートのフィールド値
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value:      Option<CursorValue>,
}

impl CursorPayload {
    /// ID のみを持つペイロードを作成する
    pub fn new(id: impl ToString) -> Self {
        Self {
            created_at: None,
            field:      None,
            id:         id.to_string(),
            value:      None,
        }
    }

    /// 作成日時を設定する
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(to_iso8601(created_at));
        self
    }

    /// カスタムソートのフィールド名と値を設定する
    pub fn with_sort_field(
        mut self,
        field: impl Into<String>,
        value: impl Into<CursorValue>,
    ) -> Self {
        self.field = Some(field.into());
        self.value = Some(match value.into() {
            CursorValue::Float(f) => CursorValue::from(f),
            other => other,
        });
        self
    }
}

/// カーソルをエンコードする
///
/// ```
/// use showcase_shared::{CursorPayload, decode_cursor, encode_cursor};
///
/// let cursor = encode_cursor(&CursorPayload::new(42));
/// assert_eq!(decode_cursor(&cursor).unwrap().id, "42");
/// ```
pub fn encode_cursor(payload: &CursorPayload) -> String {
    let json = serde_json::to_vec(payload)
        .expect("CursorPayload は文字列キーとプリミティブ値のみで構成される");
    CURSOR_ENGINE.encode(json)
}

/// カーソルをデコードする
///
/// base64 デコード、JSON パース、`id` の存在確認のいずれかに失敗した場合は
/// [`CursorError::InvalidCursor`] を返す。呼び出し側は 400 系のクライアント
/// エラーとして扱うこと。
pub fn decode_cursor(cursor: &str) -> Result<CursorPayload, CursorError> {
    let bytes = CURSOR_ENGINE
        .decode(cursor)
        .map_err(|e| CursorError::InvalidCursor(format!("base64 デコードに失敗: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CursorError::InvalidCursor(format!("JSON の解析に失敗: {e}")))
}

/// `+00:00` 形式の ISO 8601 文字列
///
/// 小数秒はマイクロ秒が 0 でなければ 6 桁で出力し、それ以外は省略する。
/// マイクロ秒未満は切り捨てる。
fn to_iso8601(value: DateTime<Utc>) -> String {
    let format = if value.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    value.to_rfc3339_opts(format, false)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_idと作成日時のラウンドトリップ() {
        let id = Uuid::now_v7();
        let payload = CursorPayload::new(id).with_created_at(fixed_time());

        let decoded = decode_cursor(&encode_cursor(&payload)).unwrap();

        assert_eq!(decoded.id, id.to_string());
        assert_eq!(
            decoded.created_at.as_deref(),
            Some("2023-11-14T22:13:20+00:00")
        );
        assert_eq!(decoded.field, None);
        assert_eq!(decoded.value, None);
    }

    #[rstest]
    #[case(CursorValue::Int(150))]
    #[case(CursorValue::Int(-3))]
    #[case(CursorValue::Float(12.5))]
    #[case(CursorValue::Bool(true))]
    #[case(CursorValue::Text("pending".to_string()))]
    fn test_カスタムソート値のラウンドトリップ(#[case] value: CursorValue) {
        let payload = CursorPayload::new("order-1").with_sort_field("total", value.clone());

        let decoded = decode_cursor(&encode_cursor(&payload)).unwrap();

        assert_eq!(decoded.field.as_deref(), Some("total"));
        assert_eq!(decoded.value, Some(value));
    }

    #[test]
    fn test_日時のソート値はiso8601文字列に正規化される() {
        let payload = CursorPayload::new("1").with_sort_field("created_at", fixed_time());

        let decoded = decode_cursor(&encode_cursor(&payload)).unwrap();

        assert_eq!(
            decoded.value,
            Some(CursorValue::Text("2023-11-14T22:13:20+00:00".to_string()))
        );
    }

    #[rstest]
    #[case::ミリ秒(123_000_000, "2023-11-14T22:13:20.123000+00:00")]
    #[case::マイクロ秒(123_456_000, "2023-11-14T22:13:20.123456+00:00")]
    #[case::マイクロ秒未満は切り捨て(123_456_789, "2023-11-14T22:13:20.123456+00:00")]
    #[case::マイクロ秒未満のみ(500, "2023-11-14T22:13:20+00:00")]
    fn test_小数秒はマイクロ秒6桁で出力される(#[case] nanos: u32, #[case] expected: &str) {
        let created_at = DateTime::from_timestamp(1_700_000_000, nanos).unwrap();
        let payload = CursorPayload::new("1").with_created_at(created_at);

        let decoded = decode_cursor(&encode_cursor(&payload)).unwrap();

        assert_eq!(decoded.created_at.as_deref(), Some(expected));
    }

    #[rstest]
    #[case(f64::INFINITY, "Infinity")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    #[case(f64::NAN, "NaN")]
    fn test_非有限の浮動小数点数は文字列として保持される(
        #[case] value: f64,
        #[case] expected: &str,
    ) {
        let payload = CursorPayload::new("1").with_sort_field("score", value);

        let cursor = encode_cursor(&payload);
        let decoded = decode_cursor(&cursor).unwrap();

        assert!(!cursor.is_empty());
        assert_eq!(decoded.field.as_deref(), Some("score"));
        assert_eq!(decoded.value, Some(CursorValue::Text(expected.to_string())));
    }

    #[test]
    fn test_直接渡した非有限のfloatも文字列に正規化される() {
        let payload =
            CursorPayload::new("1").with_sort_field("score", CursorValue::Float(f64::INFINITY));

        assert_eq!(
            payload.value,
            Some(CursorValue::Text("Infinity".to_string()))
        );
    }

    #[test]
    fn test_uuidのソート値は文字列に正規化される() {
        let id = Uuid::now_v7();
        let payload = CursorPayload::new("1").with_sort_field("user_id", id);

        let decoded = decode_cursor(&encode_cursor(&payload)).unwrap();

        assert_eq!(decoded.value, Some(CursorValue::Text(id.to_string())));
    }

    #[test]
    fn test_同じ内容のエンコード結果はバイト単位で一致する() {
        let build = || {
            CursorPayload::new("abc")
                .with_created_at(fixed_time())
                .with_sort_field("total", 10_i64)
        };

        assert_eq!(encode_cursor(&build()), encode_cursor(&build()));
    }

    #[test]
    fn test_jsonのキーはソート順で出力される() {
        let payload = CursorPayload::new("7")
            .with_created_at(fixed_time())
            .with_sort_field("status", "paid");

        let bytes = CURSOR_ENGINE.decode(encode_cursor(&payload)).unwrap();
        let json = String::from_utf8(bytes).unwrap();

        assert_eq!(
            json,
            r#"{"created_at":"2023-11-14T22:13:20+00:00","field":"status","id":"7","value":"paid"}"#
        );
    }

    #[test]
    fn test_省略したフィールドはjsonに含まれない() {
        let bytes = CURSOR_ENGINE
            .decode(encode_cursor(&CursorPayload::new("7")))
            .unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"id":"7"}"#);
    }

    #[test]
    fn test_エンコード結果はurl_safeな文字のみで構成される() {
        // '?' や '>' を含む値は標準 base64 だと '+' や '/' を生む
        let payload = CursorPayload::new("???>>>").with_sort_field("q", "~~~???");

        let cursor = encode_cursor(&payload);

        assert!(
            cursor
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=')),
            "URL-safe でない文字を含む: {cursor}"
        );
    }

    #[test]
    fn test_パディングなしのカーソルもデコードできる() {
        let cursor = encode_cursor(&CursorPayload::new("12"));
        let unpadded = cursor.trim_end_matches('=');

        assert_eq!(decode_cursor(unpadded).unwrap().id, "12");
    }

    #[test]
    fn test_未知のキーは無視される() {
        let cursor = CURSOR_ENGINE.encode(r#"{"id":"1","extra":true}"#);

        assert_eq!(decode_cursor(&cursor).unwrap(), CursorPayload::new("1"));
    }

    #[rstest]
    #[case::base64として不正("!!!not-base64!!!")]
    #[case::空文字列("")]
    fn test_base64またはjsonとして不正なカーソルはエラー(#[case] cursor: &str) {
        assert!(matches!(
            decode_cursor(cursor),
            Err(CursorError::InvalidCursor(_))
        ));
    }

    #[rstest]
    #[case::jsonでない("not json at all")]
    #[case::idがない(r#"{"created_at":"2024-01-01T00:00:00+00:00"}"#)]
    #[case::idが文字列でない(r#"{"id":42}"#)]
    #[case::オブジェクトでない(r#"["1"]"#)]
    #[case::値がプリミティブでない(r#"{"id":"1","value":{"nested":1}}"#)]
    fn test_中身が不正なカーソルはエラー(#[case] json: &str) {
        let cursor = CURSOR_ENGINE.encode(json);

        assert!(matches!(
            decode_cursor(&cursor),
            Err(CursorError::InvalidCursor(_))
        ));
    }
}
