//! # OpenAPI Showcase Gateway ライブラリ
//!
//! 各バックエンドサービスの OpenAPI ドキュメントを統合して公開するゲートウェイ。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築
//! - `bundler`: OpenAPI ドキュメントのマージ
//! - `client`: バックエンドサービスからのドキュメント取得
//! - `config`: 環境変数からの設定読み込み
//! - `error`: HTTP エラーレスポンス
//! - `handler`: HTTP ハンドラ
//! - `usecase`: 取得とマージの手順

pub mod app_builder;
pub mod bundler;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
