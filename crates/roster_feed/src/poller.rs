use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use roster_logging::{roster_error, roster_info};
use tokio::time::MissedTickBehavior;

use crate::fetch::{FeedClient, ReqwestFeedClient};
use crate::{FailureKind, FeedSettings, FetchError, PollEvent};

enum PollerCommand {
    Poll { epoch: Option<String> },
    Stop,
}

/// Background poller: owns the interval timer and runs feed requests on its
/// own tokio runtime, reporting both as [`PollEvent`]s.
pub struct PollerHandle {
    cmd_tx: mpsc::Sender<PollerCommand>,
    event_tx: mpsc::Sender<PollEvent>,
    event_rx: mpsc::Receiver<PollEvent>,
}

impl PollerHandle {
    pub fn new(settings: FeedSettings) -> Result<Self, FetchError> {
        let client = ReqwestFeedClient::new(settings.clone())?;
        Self::with_client(Arc::new(client), settings.poll_interval)
    }

    pub fn with_client(
        client: Arc<dyn FeedClient>,
        interval: Duration,
    ) -> Result<Self, FetchError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| FetchError::new(FailureKind::Runtime, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker_tx = event_tx.clone();

        thread::spawn(move || {
            roster_info!("Starting player list interval (every {:?})", interval);
            let ticker = runtime.spawn(tick_loop(interval, worker_tx.clone()));

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    PollerCommand::Poll { epoch } => {
                        let client = client.clone();
                        let event_tx = worker_tx.clone();
                        runtime.spawn(async move {
                            let result = client.fetch(epoch.as_deref()).await;
                            let _ = event_tx.send(PollEvent::Completed { result });
                        });
                    }
                    PollerCommand::Stop => {
                        roster_info!("Stopping player list interval");
                        ticker.abort();
                    }
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
        })
    }

    /// Starts one request. Completion arrives as [`PollEvent::Completed`], also
    /// when the worker is gone and the request never left.
    pub fn poll(&self, epoch: Option<String>) {
        if self.cmd_tx.send(PollerCommand::Poll { epoch }).is_err() {
            roster_error!("Poller worker is gone; poll dropped");
            let _ = self.event_tx.send(PollEvent::Completed {
                result: Err(FetchError::new(FailureKind::Runtime, "poller worker stopped")),
            });
        }
    }

    /// Stops the interval timer. Requests already in flight still report back.
    pub fn stop(&self) {
        let _ = self.cmd_tx.send(PollerCommand::Stop);
    }

    pub fn try_recv(&self) -> Option<PollEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<PollEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn tick_loop(period: Duration, event_tx: mpsc::Sender<PollEvent>) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the first poll waits one full period.
    interval.tick().await;
    loop {
        interval.tick().await;
        if event_tx.send(PollEvent::Tick).is_err() {
            break;
        }
    }
}
