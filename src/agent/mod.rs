//! 代理調用層。
//!
//! 此模組描述與三個遠端代理服務互動的全部抽象：固定的代理
//! 註冊表、統一的請求/結果信封、端點設定，以及實際執行調用的
//! 客戶端。角色相關的行為（提示組合、結果解讀）不在這裡，
//! 分別屬於工作流程控制器與正規化層。

/// `client` 模組：`AgentClient` 與 `AgentTransport` 抽象，
/// 一次調用恰好一次請求/回應交換。
pub mod client;

/// `config` 模組：`config/agents.toml` 的解析格式與載入/儲存邏輯。
pub mod config;

/// `message` 模組：調用請求與統一結果信封。
pub mod message;

/// `registry` 模組：行程範圍內固定的三個代理描述子。
pub mod registry;

pub use client::{AgentClient, AgentTransport, HttpAgentTransport};
pub use config::{AgentEndpointConfig, AgentServiceSettings};
pub use message::{AgentInvocationEnvelope, InvokeRequest};
pub use registry::{agents, AgentDescriptor, AgentRole, AGENTS};
