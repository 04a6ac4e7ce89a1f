use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Server-wide state shared by every connection: the shutdown flag and the
/// number of requests currently being handled.
#[derive(Clone, Default)]
pub struct ServerState {
    shutdown: Arc<AtomicBool>,
    in_flight: Arc<AtomicUsize>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the server is shutting down
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Signals that the server should start shutting down
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Marks a request as in flight until the returned guard is dropped.
    pub fn track_request(&self) -> RequestGuard {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        RequestGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}

pub struct RequestGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
