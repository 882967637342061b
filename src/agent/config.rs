use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 代理服務連線設定的頂層結構，從 `config/agents.toml` 載入。
///
/// 與代理的互動只需要一個共用端點；各個代理以識別碼區分，
/// 因此設定檔描述的是端點本身而不是個別代理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentServiceSettings {
    #[serde(default)]
    pub endpoint: AgentEndpointConfig,
}

/// 單一代理端點的連線參數。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEndpointConfig {
    /// 端點的基底 URL。
    pub base_url: String,
    /// 調用路徑，附加在基底 URL 之後。
    #[serde(default = "default_invoke_path")]
    pub invoke_path: String,
    /// 額外附加的 HTTP 標頭（例如租戶或金鑰標頭）。
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
    /// 單次調用允許的秒數上限。
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_invoke_path() -> String {
    String::from("/api/agent/invoke")
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for AgentEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8000"),
            invoke_path: default_invoke_path(),
            extra_headers: BTreeMap::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AgentServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: AgentEndpointConfig::default(),
        }
    }
}

impl AgentServiceSettings {
    /// 從指定的工作區目錄讀取設定。
    /// 如果 `config/agents.toml` 不存在，回傳內建的預設端點。
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let config_path = workspace_root.join("config/agents.toml");
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("讀取代理設定失敗: {}", config_path.display()))?;
            let parsed: AgentServiceSettings = toml::from_str(&raw)
                .with_context(|| format!("解析代理設定失敗: {}", config_path.display()))?;
            Ok(parsed)
        } else {
            Ok(Self::default())
        }
    }

    /// 將目前的設定寫回 `config/agents.toml`。
    pub fn save_to_file(&self, workspace_root: &Path) -> Result<()> {
        let config_dir = workspace_root.join("config");
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("建立設定目錄失敗: {}", config_dir.display()))?;
        }
        let config_path = config_dir.join("agents.toml");
        let serialized = toml::to_string_pretty(self).context("序列化代理設定失敗")?;
        fs::write(&config_path, serialized)
            .with_context(|| format!("寫入代理設定失敗: {}", config_path.display()))?;
        Ok(())
    }

    /// 完整的調用 URL：基底 URL 與調用路徑以單一斜線相接。
    pub fn invoke_url(&self) -> String {
        let base = self.endpoint.base_url.trim_end_matches('/');
        let path = self.endpoint.invoke_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
