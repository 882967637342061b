use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::agent::config::AgentServiceSettings;
use crate::agent::message::{AgentInvocationEnvelope, InvokeRequest};
use crate::transport::{DiagnosticsSink, InterceptOutcome, Interceptor, Termination};

/// 代理調用的傳輸抽象。
///
/// 控制器只認得這個介面；正式環境走 HTTP，測試注入記憶體內的
/// 假傳輸。實作不得拋出錯誤，所有失敗都以失敗信封表達。
#[async_trait]
pub trait AgentTransport: Send + Sync {
    async fn invoke(&self, request: InvokeRequest) -> AgentInvocationEnvelope;
}

/// 經由攔截器送出調用的 HTTP 傳輸。
pub struct HttpAgentTransport {
    settings: AgentServiceSettings,
    interceptor: Interceptor,
}

impl HttpAgentTransport {
    pub fn new(settings: AgentServiceSettings, sink: Arc<dyn DiagnosticsSink>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.endpoint.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            settings,
            interceptor: Interceptor::with_client(client, sink),
        }
    }
}

#[async_trait]
impl AgentTransport for HttpAgentTransport {
    /// 執行恰好一次請求/回應交換，不重試、不串流。
    async fn invoke(&self, request: InvokeRequest) -> AgentInvocationEnvelope {
        let url = self.settings.invoke_url();
        let outcome = self
            .interceptor
            .post_json(&url, &request, &self.settings.endpoint.extra_headers)
            .await;

        match outcome {
            Ok(InterceptOutcome::Response(response)) => {
                match serde_json::from_str::<AgentInvocationEnvelope>(&response.body) {
                    Ok(envelope) => envelope,
                    Err(err) => {
                        warn!("agent response was not a valid envelope: {err}");
                        AgentInvocationEnvelope::failure("Unable to parse agent response")
                    }
                }
            }
            Ok(InterceptOutcome::Terminated(Termination::Redirect { location })) => {
                AgentInvocationEnvelope::failure(format!(
                    "Session expired: redirected to {location}"
                ))
            }
            Ok(InterceptOutcome::Terminated(Termination::FallbackPage { .. })) => {
                AgentInvocationEnvelope::failure(
                    "Backend replaced the agent response with a fallback page",
                )
            }
            Err(err) => AgentInvocationEnvelope::failure(err.to_string()),
        }
    }
}

/// 與遠端代理服務的唯一接觸點。
///
/// 對哪個角色發話由呼叫端決定；這裡不帶任何角色語意，
/// 只保證信封的不變式成立（失敗必有錯誤訊息）。
pub struct AgentClient {
    transport: Box<dyn AgentTransport>,
}

impl AgentClient {
    pub fn new(transport: Box<dyn AgentTransport>) -> Self {
        Self { transport }
    }

    /// 以設定好的端點建立走 HTTP 的客戶端。
    pub fn over_http(settings: AgentServiceSettings, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self::new(Box::new(HttpAgentTransport::new(settings, sink)))
    }

    /// 對指定代理送出一段提示並等待結果信封。
    pub async fn invoke(&self, message: &str, agent_id: &str) -> AgentInvocationEnvelope {
        debug!("invoking agent {agent_id} ({} chars)", message.len());
        let mut envelope = self
            .transport
            .invoke(InvokeRequest::new(message, agent_id))
            .await;

        // 失敗信封必須帶訊息，呈現層直接顯示。
        if !envelope.success && envelope.error.as_deref().map_or(true, |e| e.trim().is_empty()) {
            envelope.error = Some(String::from("Agent invocation failed"));
        }
        debug!("agent {agent_id} settled (success: {})", envelope.success);
        envelope
    }
}
