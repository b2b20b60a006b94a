//! Heartbeat delivery for the active widget
//!
//! A cooperative periodic task: once per interval, take the session lock and
//! deliver one `tick()`. The session forwards the heartbeat only while the
//! active renderer wants it, so firing unconditionally is cheap in every
//! other state.

use crate::SharedSession;
use log::{error, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delivers heartbeats to the session until stopped
pub struct TickDriver {
    session: SharedSession,
    interval: Duration,
    stop: Arc<AtomicBool>,
}

impl TickDriver {
    pub fn new(session: SharedSession, interval: Duration) -> Self {
        Self {
            session,
            interval,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting a cooperative stop from another thread
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run the heartbeat loop.
    ///
    /// Exits at the first interval tick after the stop flag is set.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            if self.stop.load(Ordering::Relaxed) {
                break;
            }

            let result = self.session.write().await.tick();
            if let Err(e) = result {
                error!("heartbeat failed: {}", e);
            }
        }

        trace!("tick driver stopped");
    }
}
