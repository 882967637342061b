//! The workflow controller.
//!
//! `App` is the single owner of the active screen, the in-flight agent
//! invocation, and all derived state. The review and onboarding
//! workflows live in their own impl files; every state change is a
//! named transition so the presentation layer stays a pure reader.

pub mod navigate;
pub mod onboarding;
pub mod prompts;
pub mod review;
pub mod state;

pub use state::{App, InvocationTicket, Screen};
