//! Scheduler and queue error types

use std::io;

/// Scheduler error types
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("invalid step period: {0} s")]
    InvalidPeriod(f32),
    #[error("failed to spawn simulation worker: {0}")]
    Spawn(#[from] io::Error),
    #[error("simulation worker terminated")]
    WorkerTerminated,
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// The reading end of a message queue has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("message queue expired")]
pub struct QueueExpired;
