//! Background-task submission policies
//!
//! Two configuration flags decide how jobs are submitted:
//! - `logged`: failures are logged before surfacing through the join handle
//! - `on_commit`: jobs submitted inside a transaction scope run only after
//!   the transaction commits; a rolled-back transaction drops them
//!
//! The flags map onto an explicit policy table instead of composing wrapper
//! types, so the behavior in effect is visible at startup.

use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// A boxed background job
pub type TaskFuture = BoxFuture<'static, anyhow::Result<()>>;

/// Configuration flags for task submission
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskFlags {
    pub logged: bool,
    pub on_commit: bool,
}

/// Submission behavior selected from the flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPolicy {
    Plain,
    Logged,
    OnCommit,
    LoggedOnCommit,
}

impl TaskPolicy {
    /// Explicit lookup table from flags to behavior
    pub fn from_flags(flags: TaskFlags) -> Self {
        match (flags.on_commit, flags.logged) {
            (true, true) => TaskPolicy::LoggedOnCommit,
            (true, false) => TaskPolicy::OnCommit,
            (false, true) => TaskPolicy::Logged,
            (false, false) => TaskPolicy::Plain,
        }
    }

    pub fn is_logged(self) -> bool {
        matches!(self, TaskPolicy::Logged | TaskPolicy::LoggedOnCommit)
    }

    pub fn is_on_commit(self) -> bool {
        matches!(self, TaskPolicy::OnCommit | TaskPolicy::LoggedOnCommit)
    }
}

/// Jobs deferred until the surrounding transaction commits
#[derive(Default)]
pub struct OnCommitQueue {
    tasks: Vec<(&'static str, TaskFuture)>,
}

impl OnCommitQueue {
    /// Queue a job to run after commit
    pub fn defer(&mut self, name: &'static str, task: TaskFuture) {
        self.tasks.push((name, task));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Policy-driven task submitter
#[derive(Clone, Copy, Debug)]
pub struct TaskRunner {
    policy: TaskPolicy,
}

impl TaskRunner {
    pub fn new(policy: TaskPolicy) -> Self {
        Self { policy }
    }

    pub fn from_flags(flags: TaskFlags) -> Self {
        Self::new(TaskPolicy::from_flags(flags))
    }

    pub fn policy(&self) -> TaskPolicy {
        self.policy
    }

    /// Spawn a job immediately. Failures surface through the join handle;
    /// the logged policies record them first.
    pub fn spawn(&self, name: &'static str, task: TaskFuture) -> JoinHandle<anyhow::Result<()>> {
        let logged = self.policy.is_logged();
        tokio::spawn(async move {
            let result = task.await;
            if logged && let Err(err) = &result {
                error!(task = name, error = %err, "background task failed");
            }
            result
        })
    }

    /// Submit a job inside a transaction scope. On-commit policies defer it
    /// on the queue; the others spawn it right away.
    pub fn submit(
        &self,
        queue: &mut OnCommitQueue,
        name: &'static str,
        task: TaskFuture,
    ) -> Option<JoinHandle<anyhow::Result<()>>> {
        if self.policy.is_on_commit() {
            queue.defer(name, task);
            None
        } else {
            Some(self.spawn(name, task))
        }
    }

    /// Run `f` inside a database transaction. Jobs deferred on the queue are
    /// spawned only after a successful commit; a rollback drops them.
    pub async fn run_with_tasks<F, T>(&self, db: &DatabaseConnection, f: F) -> anyhow::Result<T>
    where
        F: for<'c> FnOnce(
            &'c DatabaseTransaction,
            &'c mut OnCommitQueue,
        ) -> BoxFuture<'c, anyhow::Result<T>>,
    {
        let txn = db.begin().await?;
        let mut queue = OnCommitQueue::default();

        match f(&txn, &mut queue).await {
            Ok(value) => {
                txn.commit().await?;
                let submitted = queue.len();
                for (name, task) in queue.tasks {
                    self.spawn(name, task);
                }
                if submitted > 0 {
                    debug!(tasks = submitted, "submitted deferred tasks after commit");
                }
                Ok(value)
            }
            Err(err) => {
                txn.rollback().await?;
                if !queue.is_empty() {
                    debug!(
                        tasks = queue.len(),
                        "transaction rolled back, deferred tasks dropped"
                    );
                }
                Err(err)
            }
        }
    }
}
