//! 網路傳輸層：攔截每一次對外的 HTTP 呼叫，對回應進行分類
//! （重新導向、工具授權、404、5xx、連線失敗），並透過診斷通道
//! 將結構化通知廣播給承載此應用的外層框架。
//!
//! 分類邏輯（`classify`）是純函式，與實際的 HTTP 執行
//! （`interceptor`）和通知的遞送機制（`sink`）彼此解耦。

pub mod classify;
pub mod interceptor;
pub mod sink;

pub use interceptor::{InterceptOutcome, InterceptedResponse, Interceptor, Termination, TransportError};
pub use sink::{
    CaptureSink, ChannelSink, ChildAppError, DiagnosticsSink, ErrorKind, FrameMessage,
    FramePayload, LogSink, NullSink, ToolAuthRequired, FRAME_SOURCE,
};
