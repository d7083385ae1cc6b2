//! Async driver that paces engine moves with a real delay.

use crate::config::MatchConfig;
use crate::controller::{MatchController, ScheduledMove};
use crate::error::MatchError;
use crate::events::MatchObserver;
use crate::player::Control;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// A match whose engine moves land after a delay on a tokio task.
///
/// At most one delay task exists at a time. Restart and advance abort it,
/// and the controller's epoch check discards a move that still slips
/// through.
pub struct MatchSession<O> {
    controller: Arc<Mutex<MatchController<O>>>,
    ai_delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<O> MatchSession<O>
where
    O: MatchObserver + Send + 'static,
{
    /// Wraps a controller.
    pub fn new(controller: MatchController<O>, ai_delay: Duration) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            ai_delay,
            pending: None,
        }
    }

    /// Builds a session from configuration. Seat controls in the config are
    /// not applied; call [`configure_mode`](Self::configure_mode).
    #[instrument(skip(config, observer))]
    pub fn from_config(config: &MatchConfig, observer: O) -> Self {
        let controller =
            MatchController::with_names(config.player_a_name(), config.player_b_name(), observer);
        Self::new(controller, config.ai_delay())
    }

    /// Engine delay.
    pub fn ai_delay(&self) -> Duration {
        self.ai_delay
    }

    /// Runs `f` against the controller under its lock.
    ///
    /// The controller is only lent out shared; every command goes through the
    /// session so engine replies always get a timer.
    pub async fn inspect<R>(&self, f: impl FnOnce(&MatchController<O>) -> R) -> R {
        let controller = self.controller.lock().await;
        f(&controller)
    }

    /// See [`MatchController::configure_mode`].
    ///
    /// # Errors
    ///
    /// Propagates configuration refusals.
    #[instrument(skip(self))]
    pub async fn configure_mode(&mut self, seat_a: Control, seat_b: Control) -> Result<(), MatchError> {
        let scheduled = self.controller.lock().await.configure_mode(seat_a, seat_b)?;
        self.schedule(scheduled);
        Ok(())
    }

    /// See [`MatchController::request_placement`].
    ///
    /// # Errors
    ///
    /// Propagates placement refusals; callers normally ignore them.
    #[instrument(skip(self))]
    pub async fn request_placement(&mut self, index: usize) -> Result<(), MatchError> {
        let scheduled = self.controller.lock().await.request_placement(index)?;
        self.schedule(scheduled);
        Ok(())
    }

    /// See [`MatchController::request_advance_round`].
    #[instrument(skip(self))]
    pub async fn request_advance_round(&mut self) {
        self.cancel_pending();
        let scheduled = self.controller.lock().await.request_advance_round();
        self.schedule(scheduled);
    }

    /// See [`MatchController::request_restart`].
    #[instrument(skip(self))]
    pub async fn request_restart(&mut self) {
        self.cancel_pending();
        let scheduled = self.controller.lock().await.request_restart();
        self.schedule(scheduled);
    }

    /// Waits until no engine move is in flight.
    pub async fn wait_idle(&mut self) {
        if let Some(handle) = self.pending.take()
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!(error = %e, "Engine move task failed");
        }
    }

    fn schedule(&mut self, scheduled: Option<ScheduledMove>) {
        let Some(first) = scheduled else {
            return;
        };
        self.cancel_pending();

        let controller = Arc::clone(&self.controller);
        let delay = self.ai_delay;
        debug!(?first, ?delay, "Deferring engine move");

        self.pending = Some(tokio::spawn(async move {
            let mut next = Some(first);
            while let Some(scheduled) = next {
                tokio::time::sleep(delay).await;
                let mut guard = controller.lock().await;
                next = match guard.apply_scheduled(scheduled) {
                    Ok(next) => next,
                    Err(e) => {
                        debug!(error = %e, "Engine move dropped");
                        None
                    }
                };
            }
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                info!("Cancelling pending engine move");
            }
            handle.abort();
        }
    }
}

impl<O> Drop for MatchSession<O> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
