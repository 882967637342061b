//! Client core for the DocSync child application: agent invocation and
//! workflow control, defensive response normalization, and the
//! transport interception protocol that re-broadcasts backend
//! conditions to a hosting shell.

pub mod agent;
pub mod app;
pub mod history;
pub mod model;
pub mod normalize;
pub mod transport;

pub use agent::{AgentClient, AgentInvocationEnvelope, AgentRole, AgentServiceSettings};
pub use app::{App, Screen};
pub use history::{HistoryEntry, HistoryLedger, HistoryStatus};
pub use normalize::Normalized;
pub use transport::{DiagnosticsSink, FrameMessage, Interceptor};
