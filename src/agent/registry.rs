use serde::Serialize;

/// 描述一個遠端代理服務的靜態資訊。
///
/// 三個代理在行程啟動時就固定下來，整個生命週期內不會變動；
/// 呈現層只用這份資料顯示側欄的代理清單與作用中狀態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentDescriptor {
    /// 遠端服務的固定識別碼。
    pub id: &'static str,
    /// 顯示名稱。
    pub name: &'static str,
    /// 用途說明。
    pub purpose: &'static str,
}

/// 行程範圍內不可變的代理註冊表。
pub const AGENTS: [AgentDescriptor; 3] = [
    AgentDescriptor {
        id: "69a271e024f2adeb72b9fd14",
        name: "Documentation Coordinator",
        purpose: "Analyzes PR diffs and generates documentation",
    },
    AgentDescriptor {
        id: "69a271e1f18a4f26754c8a98",
        name: "Documentation Publisher",
        purpose: "Commits documentation updates to repository",
    },
    AgentDescriptor {
        id: "69a277988e6d0e51fd5cd32f",
        name: "Repository Onboarding",
        purpose: "Generates project docs from PR history",
    },
];

/// 回傳完整的代理註冊表。
pub fn agents() -> &'static [AgentDescriptor] {
    &AGENTS
}

/// 三種工作流程各自對應的代理角色。
///
/// 控制器以角色追蹤進行中的調用；角色到描述子的對應是固定的。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRole {
    /// 分析協調者：解析 PR 變更並產生文件草稿。
    Coordinator,
    /// 文件發佈者：將文件提交回儲存庫。
    Publisher,
    /// 儲存庫導覽：從歷史紀錄產生完整專案文件。
    Onboarding,
}

impl AgentRole {
    pub fn descriptor(self) -> &'static AgentDescriptor {
        match self {
            AgentRole::Coordinator => &AGENTS[0],
            AgentRole::Publisher => &AGENTS[1],
            AgentRole::Onboarding => &AGENTS[2],
        }
    }

    /// 遠端服務識別碼的捷徑。
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_distinct_registry_entries() {
        let ids = [
            AgentRole::Coordinator.id(),
            AgentRole::Publisher.id(),
            AgentRole::Onboarding.id(),
        ];
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn registry_exposes_all_agents() {
        assert_eq!(agents().len(), 3);
        assert_eq!(agents()[0].name, "Documentation Coordinator");
    }
}
