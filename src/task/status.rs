/// Task status definitions for the crawl task lifecycle
///
/// A task moves Pending -> Running -> Completed or Failed. Terminal states
/// are never left.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable state of a crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is registered but the crawl has not started
    Pending,

    /// The crawl is in progress
    Running,

    /// The crawl finished and its report is available
    Completed,

    /// The crawl failed; an error description is stored instead of a report
    Failed,
}

impl TaskStatus {
    /// Returns true for states that can never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// String form used in logs and listings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TaskStatus::Pending), "pending");
        assert_eq!(format!("{}", TaskStatus::Running), "running");
        assert_eq!(format!("{}", TaskStatus::Completed), "completed");
        assert_eq!(format!("{}", TaskStatus::Failed), "failed");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Running).unwrap();
        assert_eq!(json, r#""running""#);

        let status: TaskStatus = serde_json::from_str(r#""failed""#).unwrap();
        assert_eq!(status, TaskStatus::Failed);
    }
}
