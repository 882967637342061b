use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 發送給代理服務的單次調用請求。
///
/// 一次調用只有一段文字提示與目標代理的識別碼；所有角色相關的
/// 語意都在提示文字裡，傳輸層對此一無所知。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    /// 組合好的提示文字。
    pub message: String,
    /// 目標代理的識別碼。
    pub agent_id: String,
}

impl InvokeRequest {
    pub fn new(message: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            agent_id: agent_id.into(),
        }
    }
}

/// 一次代理調用的統一結果信封。
///
/// 不變式：成功時 `response` 有意義，失敗時 `error` 必須帶有
/// 可以直接顯示給使用者的訊息；兩者不會同時有意義。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentInvocationEnvelope {
    #[serde(default)]
    pub success: bool,
    /// 成功時代理回傳的原始 JSON。形狀沒有逐欄位的契約保證，
    /// 一律交給正規化層防禦性解讀。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentInvocationEnvelope {
    /// 建立一個帶錯誤訊息的失敗信封。
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(message.into()),
        }
    }

    /// 建立一個成功信封。
    pub fn success(response: Value) -> Self {
        Self {
            success: true,
            response: Some(response),
            error: None,
        }
    }

    /// 取出 `response.result`，也就是代理實際產出的資料物件。
    pub fn result(&self) -> Option<&Value> {
        self.response.as_ref().and_then(|response| response.get("result"))
    }

    /// 失敗時的錯誤訊息；沒有訊息的失敗以預設文字代替。
    pub fn error_message(&self, fallback: &str) -> String {
        match &self.error {
            Some(error) if !error.trim().is_empty() => error.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_reads_under_response() {
        let envelope = AgentInvocationEnvelope::success(json!({
            "result": {"change_report": {"total_changes": 5}}
        }));
        assert_eq!(
            envelope.result().and_then(|r| r.pointer("/change_report/total_changes")),
            Some(&json!(5))
        );
    }

    #[test]
    fn result_is_none_without_response() {
        let envelope = AgentInvocationEnvelope::failure("boom");
        assert!(envelope.result().is_none());
    }

    #[test]
    fn error_message_falls_back_when_blank() {
        let envelope = AgentInvocationEnvelope {
            success: false,
            response: None,
            error: Some("  ".into()),
        };
        assert_eq!(envelope.error_message("Analysis failed"), "Analysis failed");
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let envelope: AgentInvocationEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.response.is_none());
        assert!(envelope.error.is_none());
    }
}
