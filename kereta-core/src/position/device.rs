//! Real-device GPS adapter.
use crate::position::{PositionError, PositionFix};
use std::collections::VecDeque;

/// Adapter for a platform GPS collaborator that pushes fixes into the
/// engine. Unlike the simulated sources it owns no timer; the collaborator
/// delivers fixes at its own cadence and the session drains them on poll.
///
/// Failures pushed by the platform (permission denial, provider loss) are
/// surfaced once through `poll` as a `PositionError` classification.
#[derive(Debug, Clone, Default)]
pub struct DeviceFeed {
    pending: VecDeque<PositionFix>,
    error: Option<PositionError>,
    running: bool,
}

impl DeviceFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop accepting and delivering fixes. Anything queued is dropped so
    /// no callback can observe a fix after teardown.
    pub fn stop(&mut self) {
        self.running = false;
        self.pending.clear();
        self.error = None;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Platform callback: queue a fix. Ignored while stopped.
    pub fn push_fix(&mut self, fix: PositionFix) {
        if self.running {
            self.pending.push_back(fix);
        }
    }

    /// Platform callback: record a failure to surface on the next poll.
    /// Ignored while stopped.
    pub fn push_error(&mut self, error: PositionError) {
        if self.running {
            self.error = Some(error);
        }
    }

    /// Drain queued fixes, or surface a pending failure exactly once.
    ///
    /// # Errors
    ///
    /// Returns the most recent platform failure pushed since the last poll.
    pub(crate) fn poll(&mut self) -> Result<Vec<PositionFix>, PositionError> {
        if !self.running {
            return Ok(Vec::new());
        }
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        Ok(self.pending.drain(..).collect())
    }
}
