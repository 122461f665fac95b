use std::sync::Arc;
use std::time::{Duration, Instant};

use roster_feed::{FailureKind, FeedClient, FetchError, PollEvent, PollerHandle};
use serde_json::{json, Value};

/// Echoes the epoch it was asked for so tests can see what the poller sent.
struct EchoClient;

#[async_trait::async_trait]
impl FeedClient for EchoClient {
    async fn fetch(&self, epoch: Option<&str>) -> Result<Value, FetchError> {
        match epoch {
            Some("fail") => Err(FetchError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            }),
            other => Ok(json!({ "echo": other })),
        }
    }
}

fn wait_for(handle: &PollerHandle, mut pred: impl FnMut(&PollEvent) -> bool) -> Option<PollEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(event) = handle.recv_timeout(Duration::from_millis(50)) {
            if pred(&event) {
                return Some(event);
            }
        }
    }
    None
}

fn is_completed(event: &PollEvent) -> bool {
    matches!(event, PollEvent::Completed { .. })
}

#[test]
fn poll_reports_completion_with_epoch() {
    let handle = PollerHandle::with_client(Arc::new(EchoClient), Duration::from_secs(3600))
        .expect("poller");
    handle.poll(Some("17".to_string()));

    let event = wait_for(&handle, is_completed).expect("completion");
    assert_eq!(
        event,
        PollEvent::Completed {
            result: Ok(json!({ "echo": "17" }))
        }
    );
}

#[test]
fn poll_reports_transport_failure() {
    let handle = PollerHandle::with_client(Arc::new(EchoClient), Duration::from_secs(3600))
        .expect("poller");
    handle.poll(Some("fail".to_string()));

    match wait_for(&handle, is_completed) {
        Some(PollEvent::Completed { result: Err(err) }) => {
            assert_eq!(err.kind, FailureKind::Network)
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn ticks_arrive_until_stopped() {
    let handle = PollerHandle::with_client(Arc::new(EchoClient), Duration::from_millis(20))
        .expect("poller");
    assert!(wait_for(&handle, |event| *event == PollEvent::Tick).is_some());

    handle.stop();
    std::thread::sleep(Duration::from_millis(100));
    while handle.try_recv().is_some() {}

    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(handle.try_recv(), None);
}

#[test]
fn completion_still_arrives_after_stop() {
    let handle = PollerHandle::with_client(Arc::new(EchoClient), Duration::from_secs(3600))
        .expect("poller");
    handle.stop();
    handle.poll(None);

    let event = wait_for(&handle, is_completed).expect("completion");
    assert_eq!(
        event,
        PollEvent::Completed {
            result: Ok(json!({ "echo": null }))
        }
    );
}
