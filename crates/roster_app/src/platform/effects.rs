use roster_core::{Effect, Msg};
use roster_feed::{FeedSettings, FetchError, PollEvent, PollerHandle};
use roster_logging::{roster_debug, roster_info};

/// Executes core effects against the poller and turns poller events back into messages.
pub struct EffectRunner {
    poller: PollerHandle,
}

impl EffectRunner {
    pub fn new(settings: FeedSettings) -> Result<Self, FetchError> {
        roster_info!("Polling {} every {:?}", settings.endpoint, settings.poll_interval);
        let poller = PollerHandle::new(settings)?;
        Ok(Self { poller })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PollFeed { epoch } => {
                    roster_debug!("PollFeed epoch={:?}", epoch);
                    self.poller.poll(epoch.map(|epoch| epoch.to_string()));
                }
                Effect::StopPolling => self.poller.stop(),
            }
        }
    }

    /// Drains every pending poller event without blocking.
    pub fn pending_messages(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.poller.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: PollEvent) -> Msg {
    match event {
        PollEvent::Tick => Msg::Tick,
        PollEvent::Completed { result: Ok(reply) } => Msg::FeedReceived(reply),
        PollEvent::Completed { result: Err(err) } => Msg::FeedFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_feed::FailureKind;
    use serde_json::json;

    #[test]
    fn poll_events_map_to_messages() {
        assert_eq!(map_event(PollEvent::Tick), Msg::Tick);

        let reply = json!({ "error": null, "ts": 1, "data": [] });
        assert_eq!(
            map_event(PollEvent::Completed {
                result: Ok(reply.clone())
            }),
            Msg::FeedReceived(reply)
        );

        let err = FetchError {
            kind: FailureKind::HttpStatus(503),
            message: "503 Service Unavailable".to_string(),
        };
        assert_eq!(
            map_event(PollEvent::Completed { result: Err(err) }),
            Msg::FeedFailed("http status 503: 503 Service Unavailable".to_string())
        );
    }
}
