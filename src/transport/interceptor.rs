//! 對外 HTTP 呼叫的攔截器。
//!
//! 每一次請求都先由這裡送出，回應被完整緩衝成 `InterceptedResponse`
//! 之後交給 `classify` 分類。被攔截終止的情況（重新導向、後端渲染的
//! 404 頁面）不會回到呼叫端，而是以 `Termination` 形式交還給外層框架
//! 處理；其餘情況下回應原封不動地傳回。

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::classify;
use super::sink::{ChildAppError, DiagnosticsSink, ErrorKind, FrameMessage};

/// 一次 HTTP 交換的完整緩衝結果。
///
/// 回應本文在這裡已經讀完，因此分類邏輯與後續的資料解析
/// 都不需要再接觸網路。
#[derive(Debug, Clone)]
pub struct InterceptedResponse {
    /// 最終的請求 URL（重新導向追蹤後）。
    pub url: String,
    /// HTTP 狀態碼。
    pub status: u16,
    /// `Content-Type` 標頭的原始值，缺少時為空字串。
    pub content_type: String,
    /// 已讀出的回應本文。
    pub body: String,
}

impl InterceptedResponse {
    pub fn is_html(&self) -> bool {
        self.content_type.contains("text/html")
    }

    pub fn is_json(&self) -> bool {
        self.content_type.contains("application/json")
    }

    /// 嘗試將本文解析為 JSON；失敗時回傳 `None`。
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// 一次被攔截呼叫的結果。
#[derive(Debug)]
pub enum InterceptOutcome {
    /// 回應可以繼續交給呼叫端處理。
    Response(InterceptedResponse),
    /// 呼叫已在傳輸層被終止，呼叫端不會收到回應。
    Terminated(Termination),
}

/// 傳輸層終止一次呼叫的原因，交由外層框架接手。
#[derive(Debug)]
pub enum Termination {
    /// 後端要求重新導向，通常代表承載的登入階段已過期，
    /// 必須在最外層重新驗證。
    Redirect { location: String },
    /// 後端以 HTML 渲染了 404 備援頁面，應整頁替換目前內容。
    FallbackPage { html: String },
}

/// 傳輸層的錯誤類型。分類出的後端錯誤不會以這個型別浮出，
/// 只有真正無法完成交換的情況才會。
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("cannot connect to backend ({endpoint})")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid header in agent endpoint config: {name}")]
    InvalidHeader { name: String },
}

/// 包裝共用 `reqwest::Client` 的攔截器。
///
/// 所有通知都經由注入的 `DiagnosticsSink` 送出；未被承載時
/// 注入 `NullSink` 即可，發送絕不會使請求路徑失敗。
pub struct Interceptor {
    client: Client,
    sink: Arc<dyn DiagnosticsSink>,
}

impl Interceptor {
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self::with_client(Client::new(), sink)
    }

    pub fn with_client(client: Client, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { client, sink }
    }

    /// 以 JSON 本文送出一次 POST 並分類回應。
    ///
    /// `extra_headers` 來自端點設定；`Content-Type` 由 `reqwest`
    /// 的 JSON 編碼自動附加。
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        extra_headers: &BTreeMap<String, String>,
    ) -> Result<InterceptOutcome, TransportError> {
        let headers = build_headers(extra_headers)?;

        let response = match self
            .client
            .post(url)
            .headers(headers)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("連線失敗 {url}: {err}");
                self.emit_network_failure(url);
                return Err(TransportError::Network {
                    endpoint: url.to_string(),
                    source: err,
                });
            }
        };

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        // 重新導向優先於其他所有分類。
        if let Some(location) = classify::redirect_target(url, &final_url, status) {
            info!("後端重新導向至 {location}，交由外層框架重新驗證");
            return Ok(InterceptOutcome::Terminated(Termination::Redirect { location }));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!("讀取回應本文失敗 {url}: {err}");
                self.emit_network_failure(url);
                return Err(TransportError::Network {
                    endpoint: url.to_string(),
                    source: err,
                });
            }
        };

        let buffered = InterceptedResponse {
            url: final_url,
            status,
            content_type,
            body,
        };

        match classify::classify(&buffered, self.sink.as_ref()) {
            Some(termination) => Ok(InterceptOutcome::Terminated(termination)),
            None => Ok(InterceptOutcome::Response(buffered)),
        }
    }

    fn emit_network_failure(&self, url: &str) {
        self.sink.emit(FrameMessage::error(ChildAppError::new(
            ErrorKind::NetworkError,
            format!("Network error: Cannot connect to backend ({url})"),
            url,
            None,
        )));
    }
}

/// 由端點設定組出請求標頭。無效的標頭名稱或值視為設定錯誤。
fn build_headers(extra: &BTreeMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    for (key, value) in extra {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
            TransportError::InvalidHeader { name: key.clone() }
        })?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            TransportError::InvalidHeader { name: key.clone() }
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}
