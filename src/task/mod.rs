//! Asynchronous crawl task lifecycle
//!
//! A task wraps one orchestrator run with observable state. Callers submit
//! a request, get a task id back immediately, and poll for status and the
//! eventual report.

mod manager;
mod status;

pub use manager::{TaskManager, TaskStatusView, TaskSummary};
pub use status::TaskStatus;
