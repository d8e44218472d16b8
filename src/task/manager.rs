//! Task lifecycle management
//!
//! The [`TaskManager`] exposes one crawl as an asynchronous, pollable unit
//! of work. `submit` validates synchronously, registers the task as
//! Pending, and spawns the orchestrator run; status and result queries read
//! the registry concurrently while crawls write their own entries. The
//! registry is process-scoped and owned by the manager, never a hidden
//! global, so tests can build isolated instances.

use crate::config::AppConfig;
use crate::crawler::{CrawlReport, CrawlRequest, Orchestrator};
use crate::task::status::TaskStatus;
use crate::SweepError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Internal state of one task, carrying the terminal payload
#[derive(Debug, Clone)]
enum TaskState {
    Pending,
    Running,
    Completed(Arc<CrawlReport>),
    Failed(String),
}

impl TaskState {
    fn status(&self) -> TaskStatus {
        match self {
            Self::Pending => TaskStatus::Pending,
            Self::Running => TaskStatus::Running,
            Self::Completed(_) => TaskStatus::Completed,
            Self::Failed(_) => TaskStatus::Failed,
        }
    }
}

/// One registered crawl task
#[derive(Debug, Clone)]
struct TaskEntry {
    request: CrawlRequest,
    state: TaskState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Snapshot of a task's state and timestamps
#[derive(Debug, Clone, Serialize)]
pub struct TaskStatusView {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of a task listing
#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub base_url: String,
    pub created_at: DateTime<Utc>,
}

type Registry = Arc<RwLock<HashMap<Uuid, TaskEntry>>>;

/// Registry of crawl tasks with fire-and-forget execution
///
/// Cloning the manager shares the registry and the underlying HTTP client.
#[derive(Clone)]
pub struct TaskManager {
    tasks: Registry,
    orchestrator: Arc<Orchestrator>,
}

impl TaskManager {
    /// Creates a manager with an empty registry
    pub fn new(config: Arc<AppConfig>) -> Result<Self, SweepError> {
        Ok(Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            orchestrator: Arc::new(Orchestrator::new(config)?),
        })
    }

    /// Validates the request, registers a Pending task, and starts the crawl
    ///
    /// Returns as soon as the task is registered; the crawl runs on its own
    /// tokio task. A request that fails validation creates no task at all.
    pub async fn submit(&self, request: CrawlRequest) -> Result<Uuid, SweepError> {
        request.validate()?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        {
            let mut tasks = self.tasks.write().await;
            tasks.insert(
                id,
                TaskEntry {
                    request: request.clone(),
                    state: TaskState::Pending,
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        tracing::info!(task_id = %id, url = %request.url, "crawl task submitted");

        let tasks = Arc::clone(&self.tasks);
        let orchestrator = Arc::clone(&self.orchestrator);

        tokio::spawn(async move {
            Self::transition(&tasks, id, TaskState::Running).await;

            let final_state = match orchestrator.run(&request).await {
                Ok(report) => {
                    tracing::info!(
                        task_id = %id,
                        pages = report.pages_scraped,
                        "crawl task completed"
                    );
                    TaskState::Completed(Arc::new(report))
                }
                Err(e) => {
                    tracing::error!(task_id = %id, error = %e, "crawl task failed");
                    TaskState::Failed(e.to_string())
                }
            };

            Self::transition(&tasks, id, final_state).await;
        });

        Ok(id)
    }

    /// Returns the task's current state and timestamps
    pub async fn get_status(&self, task_id: Uuid) -> Result<TaskStatusView, SweepError> {
        let tasks = self.tasks.read().await;
        let entry = tasks.get(&task_id).ok_or(SweepError::TaskNotFound(task_id))?;

        Ok(TaskStatusView {
            task_id,
            status: entry.state.status(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        })
    }

    /// Returns the finished report for a completed task
    ///
    /// Fails with `ResultNotReady` while the task is pending or running,
    /// and with the stored error description when the task failed.
    pub async fn get_result(&self, task_id: Uuid) -> Result<Arc<CrawlReport>, SweepError> {
        let tasks = self.tasks.read().await;
        let entry = tasks.get(&task_id).ok_or(SweepError::TaskNotFound(task_id))?;

        match &entry.state {
            TaskState::Pending | TaskState::Running => Err(SweepError::ResultNotReady(task_id)),
            TaskState::Completed(report) => Ok(Arc::clone(report)),
            TaskState::Failed(message) => Err(SweepError::TaskFailed {
                id: task_id,
                message: message.clone(),
            }),
        }
    }

    /// Lists all known tasks, newest first
    pub async fn list_tasks(&self) -> Vec<TaskSummary> {
        let tasks = self.tasks.read().await;

        let mut summaries: Vec<TaskSummary> = tasks
            .iter()
            .map(|(id, entry)| TaskSummary {
                task_id: *id,
                status: entry.state.status(),
                base_url: entry.request.url.clone(),
                created_at: entry.created_at,
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.task_id.cmp(&b.task_id))
        });
        summaries
    }

    /// Applies a state transition, refusing to leave a terminal state
    async fn transition(tasks: &Registry, id: Uuid, next: TaskState) {
        let mut tasks = tasks.write().await;
        if let Some(entry) = tasks.get_mut(&id) {
            if entry.state.status().is_terminal() {
                return;
            }
            entry.state = next;
            entry.updated_at = Utc::now();
        }
    }
}
