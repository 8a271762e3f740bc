/// Single-slot deferred work, flushed on the next frame tick.
///
/// Scheduling while a request is pending replaces it, so bursts of changes
/// between two frames collapse into one piece of work carrying the latest
/// payload.
#[derive(Debug)]
pub struct FrameScheduler<T> {
    pending: Option<T>,
    /// Number of requests dropped in favour of a newer one
    superseded: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self {
            pending: None,
            superseded: 0,
        }
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, payload: T) {
        if self.pending.replace(payload).is_some() {
            self.superseded += 1;
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame tick: hand out the pending payload, if any
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}
