//! # OpenAPI バンドラー
//!
//! 各バックエンドサービスが個別に公開する OpenAPI ドキュメントを、
//! 1 つの統合ドキュメントにマージする。
//!
//! ## マージ規則
//!
//! - パス: サービスのプレフィックスを付与する（`/x` → `/svc/x`）
//! - スキーマ: `{サービス名}_{スキーマ名}` にリネームし、`$ref` も追従させる
//! - セキュリティスキーム: 同名は先勝ち
//! - タグ: `{サービス名}: {タグ名}` で重複排除
//! - セキュリティ要件: 値の等価性で重複排除
//!
//! ドキュメントが取得できなかったサービス（`None`）はスキップする。
//! `paths` や `components` が欠けた不正な形のドキュメントも、
//! 欠けた部分を空として扱い、エラーにはしない。

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::openapi::Info;

/// 統合ドキュメントの OpenAPI バージョン
pub const OPENAPI_VERSION: &str = "3.1.0";

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// マージ対象となる 1 サービス分の入力
#[derive(Debug, Clone, PartialEq)]
pub struct MergeUnit {
    /// サービス名（スキーマ名・タグ名の名前空間に使う）
    pub service_name: String,
    /// パスに付与するプレフィックス（例: `/orders`）
    pub path_prefix:  String,
    /// サービスの OpenAPI ドキュメント（取得失敗時は `None`）
    pub document:     Option<Value>,
}

impl MergeUnit {
    pub fn new(
        service_name: impl Into<String>,
        path_prefix: impl Into<String>,
        document: Option<Value>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            path_prefix: path_prefix.into(),
            document,
        }
    }
}

/// 統合された OpenAPI ドキュメント
///
/// `paths` と `components` のキー順は挿入順（サービス順、その中はソースの順）。
#[derive(Debug, Clone, Serialize)]
pub struct CombinedSpec {
    pub openapi:    String,
    pub info:       Info,
    pub paths:      Map<String, Value>,
    pub components: CombinedComponents,
    pub tags:       Vec<CombinedTag>,
    pub security:   Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CombinedComponents {
    pub schemas:          Map<String, Value>,
    #[serde(rename = "securitySchemes")]
    pub security_schemes: Map<String, Value>,
}

/// サービス名で修飾されたタグ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedTag {
    pub name:        String,
    pub description: String,
}

impl CombinedSpec {
    fn empty(info: Info) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            paths: Map::new(),
            components: CombinedComponents::default(),
            tags: Vec::new(),
            security: Vec::new(),
        }
    }

    fn absorb(&mut self, unit: &MergeUnit, document: &Value) {
        let service = unit.service_name.as_str();

        for (path, operations) in object_at(document, "/paths") {
            self.paths.insert(
                format!("{}{}", unit.path_prefix, path),
                rewrite_schema_refs(operations, service),
            );
        }

        for (schema_name, schema) in object_at(document, "/components/schemas") {
            self.components.schemas.insert(
                namespaced_schema_name(service, schema_name),
                rewrite_schema_refs(schema, service),
            );
        }

        for (scheme_name, scheme) in object_at(document, "/components/securitySchemes") {
            match self.components.security_schemes.get(scheme_name) {
                None => {
                    self.components
                        .security_schemes
                        .insert(scheme_name.clone(), scheme.clone());
                }
                Some(existing) if existing != scheme => {
                    tracing::warn!(
                        service,
                        scheme = %scheme_name,
                        "同名で内容の異なるセキュリティスキームを検出しました。最初の定義を維持します"
                    );
                }
                Some(_) => {}
            }
        }

        for tag in array_at(document, "/tags") {
            let Some(name) = tag.get("name").and_then(Value::as_str) else {
                tracing::debug!(service, "name の無いタグをスキップします");
                continue;
            };
            let display_name = format!("{service}: {name}");
            if self.tags.iter().any(|t| t.name == display_name) {
                continue;
            }
            let description = tag
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            self.tags.push(CombinedTag {
                name: display_name,
                description,
            });
        }

        for requirement in array_at(document, "/security") {
            if !self.security.contains(requirement) {
                self.security.push(requirement.clone());
            }
        }
    }
}

/// OpenAPI ドキュメントのマージを行う
///
/// 状態を持たないため、どのタスクからでも同時に呼び出せる。
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiBundler;

impl OpenApiBundler {
    pub fn new() -> Self {
        Self
    }

    /// 入力順にドキュメントをマージする
    pub fn merge(&self, units: &[MergeUnit], base_info: Info) -> CombinedSpec {
        let mut combined = CombinedSpec::empty(base_info);

        for unit in units {
            let Some(document) = unit.document.as_ref() else {
                tracing::debug!(service = %unit.service_name, "ドキュメントが無いためスキップします");
                continue;
            };
            combined.absorb(unit, document);
        }

        combined
    }
}

/// `#/components/schemas/` を指す `$ref` をサービス名で修飾する
///
/// オブジェクトと配列は再帰的に辿る。それ以外の `$ref`（外部参照や
/// `#/components/responses/...` など）と、文字列でない `$ref` はそのまま残す。
pub fn rewrite_schema_refs(value: &Value, service_name: &str) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let rewritten = match (key.as_str(), child) {
                        ("$ref", Value::String(reference)) => {
                            match reference.strip_prefix(SCHEMA_REF_PREFIX) {
                                Some(schema_name) => Value::String(format!(
                                    "{SCHEMA_REF_PREFIX}{}",
                                    namespaced_schema_name(service_name, schema_name)
                                )),
                                None => child.clone(),
                            }
                        }
                        _ => rewrite_schema_refs(child, service_name),
                    };
                    (key.clone(), rewritten)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rewrite_schema_refs(item, service_name))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn namespaced_schema_name(service_name: &str, schema_name: &str) -> String {
    format!("{service_name}_{schema_name}")
}

/// ポインタ位置のオブジェクトを辿る。存在しない・オブジェクトでない場合は空
fn object_at<'a>(document: &'a Value, pointer: &str) -> impl Iterator<Item = (&'a String, &'a Value)> {
    document
        .pointer(pointer)
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|map| map.iter())
}

/// ポインタ位置の配列を辿る。存在しない・配列でない場合は空
fn array_at<'a>(document: &'a Value, pointer: &str) -> impl Iterator<Item = &'a Value> {
    document
        .pointer(pointer)
        .and_then(Value::as_array)
        .into_iter()
        .flat_map(|items| items.iter())
}
