// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Background persistence dispatch.
//!
//! Every store mutation applies to memory synchronously, then enqueues its
//! durable write(s) here. A single writer task drains the queue in dispatch
//! order, so writes land in the same order the mutations happened - a
//! rollback's journal delete can never overtake the advance's insert it
//! undoes - while the mutation path never blocks on the database.
//!
//! The mutation hands back a [`Persist`]; dropping it keeps the classic
//! fire-and-forget behavior (the write still runs, failures are only
//! logged), while awaiting [`Persist::wait`] observes the real outcome -
//! tests and any future sync-status surface use that.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::error;

use verdant_store_db::GardenDb;

use crate::error::GardenError;

/// Shared handle to the single database connection of the session.
pub type DbHandle = Arc<Mutex<GardenDb>>;

type Work = Box<dyn FnOnce(&mut GardenDb) -> verdant_store_db::Result<()> + Send>;

struct Job {
    op: &'static str,
    work: Work,
    done: oneshot::Sender<Result<(), GardenError>>,
}

/// Ordered write queue over one database connection.
///
/// Jobs run one at a time on the blocking pool, strictly FIFO. The worker
/// task lives until the owning store is dropped.
pub(crate) struct WriteQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl WriteQueue {
    /// Spawn the writer task. Requires a running Tokio runtime.
    pub(crate) fn new(db: DbHandle) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                let db = db.clone();
                let Job { op, work, done } = job;
                let result = tokio::task::spawn_blocking(move || {
                    let mut db = db.blocking_lock();
                    work(&mut db)
                })
                .await;

                let result = match result {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => {
                        error!(op, error = %e, "persistence write failed; change will not survive restart");
                        Err(GardenError::from(e))
                    }
                    Err(e) => {
                        error!(op, error = %e, "persistence task failed");
                        Err(GardenError::TaskJoin(e.to_string()))
                    }
                };
                // Nobody waiting is the normal fire-and-forget case.
                let _ = done.send(result);
            }
        });
        Self { tx }
    }

    /// Enqueue one database operation.
    ///
    /// Failures are logged in the worker and never re-thrown into the
    /// caller's stack; the in-memory state has already advanced
    /// optimistically.
    pub(crate) fn submit<F>(&self, op: &'static str, work: F) -> Persist
    where
        F: FnOnce(&mut GardenDb) -> verdant_store_db::Result<()> + Send + 'static,
    {
        let (done, outcome) = oneshot::channel();
        let job = Job {
            op,
            work: Box::new(work),
            done,
        };
        if self.tx.send(job).is_err() {
            // Worker gone: runtime is shutting down, nothing to persist to.
            error!(op, "write queue closed; change will not survive restart");
            return Persist::noop();
        }
        Persist {
            outcomes: vec![outcome],
        }
    }
}

/// The in-flight durable write(s) of one mutation.
#[must_use = "dropping is fire-and-forget; call wait() to observe the outcome"]
pub struct Persist {
    outcomes: Vec<oneshot::Receiver<Result<(), GardenError>>>,
}

impl Persist {
    /// A mutation with nothing to persist: a rejected validation, or a
    /// detached (in-memory only) session.
    pub(crate) fn noop() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Join the writes of one mutation that enqueues more than once (a
    /// stage change updates the stage column and touches the journal).
    pub(crate) fn all(parts: impl IntoIterator<Item = Persist>) -> Self {
        Self {
            outcomes: parts.into_iter().flat_map(|p| p.outcomes).collect(),
        }
    }

    /// Await every enqueued write, returning the first failure.
    pub async fn wait(self) -> Result<(), GardenError> {
        let mut first_err = None;
        for outcome in self.outcomes {
            let result = outcome
                .await
                .map_err(|e| GardenError::TaskJoin(e.to_string()))?;
            if let Err(e) = result
                && first_err.is_none()
            {
                first_err = Some(e);
            }
        }
        match first_err {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}
