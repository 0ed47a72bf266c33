use std::sync::Arc;
use std::time::Duration;

use client_logging::{client_debug, client_info};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{ClientEvent, JobClient};

/// Shortest gap between two status requests.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Receives events produced by the client runtime and its poll task.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

/// Recurring status poll for one job.
///
/// Each tick issues at most one request; missed ticks are skipped rather than
/// bunched up. The task ends on its own after a terminal status or a failed
/// request. Cancelling (or dropping) the handle stops it, and a response that
/// arrives after cancellation is never emitted.
pub struct PollTask {
    job_id: String,
    token: CancellationToken,
}

impl PollTask {
    pub fn spawn(
        runtime: &tokio::runtime::Handle,
        client: Arc<dyn JobClient>,
        job_id: impl Into<String>,
        interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let job_id = job_id.into();
        let interval = interval.max(MIN_POLL_INTERVAL);
        let token = CancellationToken::new();
        runtime.spawn(poll_loop(
            client,
            job_id.clone(),
            interval,
            sink,
            token.clone(),
        ));
        Self { job_id, token }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            client_debug!("Cancelling poll task for job {}", self.job_id);
            self.token.cancel();
        }
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn poll_loop(
    client: Arc<dyn JobClient>,
    job_id: String,
    interval: Duration,
    sink: Arc<dyn EventSink>,
    token: CancellationToken,
) {
    // First poll one interval after the job was accepted.
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            _ = token.cancelled() => break,
            result = client.poll(&job_id) => result,
        };
        if token.is_cancelled() {
            break;
        }

        let terminal = match &result {
            Ok(snapshot) => snapshot.status.is_terminal(),
            Err(_) => true,
        };
        sink.emit(ClientEvent::Status {
            job_id: job_id.clone(),
            result,
        });
        if terminal {
            client_info!("Job {} reached a terminal state; polling stopped", job_id);
            token.cancel();
            break;
        }
    }
}
