//! Deferred connectivity pass
//!
//! A cut gesture schedules one prune a short delay after it ends, so the
//! buffer is presented before the flood fill runs. At most one prune is
//! pending; scheduling again moves the deadline. Times are on the host's
//! millisecond clock.

use tracing::debug;

use crate::prune::PruneReport;
use crate::types::DrawMode;

use super::DrawingSession;

impl DrawingSession {
    /// Schedule the connectivity pass `prune_delay_ms` after `now_ms`,
    /// replacing any pending one. Only cut sessions prune.
    pub(crate) fn schedule_prune(&mut self, now_ms: f64) {
        if self.mode() != DrawMode::Cut {
            return;
        }
        let deadline = now_ms + self.config.prune_delay_ms as f64;
        if let Some(previous) = self.pending_prune.replace(deadline) {
            debug!("schedule_prune: moved deadline {} -> {}", previous, deadline);
        }
    }

    /// True while a prune is pending
    pub fn is_processing(&self) -> bool {
        self.pending_prune.is_some()
    }

    /// When the host should next call [`DrawingSession::poll`]
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending_prune
    }

    /// Run the pending prune if its deadline has passed
    pub fn poll(&mut self, now_ms: f64) -> Option<PruneReport> {
        match self.pending_prune {
            Some(deadline) if now_ms >= deadline => self.flush_pending_prune(),
            _ => None,
        }
    }

    /// Run the pending prune now, regardless of its deadline
    pub fn flush_pending_prune(&mut self) -> Option<PruneReport> {
        self.pending_prune.take()?;
        let surface = self.surface.as_mut()?;
        Some(self.pruner.prune(surface))
    }

    pub(crate) fn cancel_pending_prune(&mut self) {
        if self.pending_prune.take().is_some() {
            debug!("cancel_pending_prune: dropped pending pass");
        }
    }
}
