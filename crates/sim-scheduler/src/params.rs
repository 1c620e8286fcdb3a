//! Run parameters for runtime tuning

use crate::error::{SchedulerError, SchedulerResult};
use std::time::Duration;

/// Pacing settings a control panel edits alongside the body parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParams {
    /// Step period, seconds
    pub dt: f32,
    /// Steps fast-forwarded by one skip request
    pub skip_frames: u32,
}

impl RunParams {
    pub fn new(dt: f32, skip_frames: u32) -> Self {
        Self { dt, skip_frames }
    }

    /// `dt` as a pacing period. Rejects zero, negative and non-finite values.
    pub fn period(&self) -> SchedulerResult<Duration> {
        period_from_secs(self.dt)
    }
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            dt: 0.01,
            skip_frames: 100,
        }
    }
}

pub(crate) fn period_from_secs(dt: f32) -> SchedulerResult<Duration> {
    match Duration::try_from_secs_f32(dt) {
        Ok(period) if !period.is_zero() => Ok(period),
        _ => Err(SchedulerError::InvalidPeriod(dt)),
    }
}
