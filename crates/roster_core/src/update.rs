use roster_logging::{roster_debug, roster_info, roster_warn};

use crate::{validate_reply, Effect, FeedPayload, Msg, Position, RosterState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: RosterState, msg: Msg) -> (RosterState, Vec<Effect>) {
    let effects = match msg {
        Msg::Tick => match state.begin_poll() {
            Some(epoch) => vec![Effect::PollFeed { epoch }],
            None => {
                if state.is_polling() {
                    roster_debug!("Poll still in flight; skipping tick");
                }
                Vec::new()
            }
        },
        Msg::FeedReceived(reply) => {
            state.finish_poll();
            // Validate against the epoch held now, not the one the request carried.
            match validate_reply(&reply, state.epoch()) {
                Ok(feed_update) => {
                    let (kind, entries) = match &feed_update.payload {
                        FeedPayload::Snapshot(records) => ("snapshot", records.len()),
                        FeedPayload::Diff(patches) => ("diff", patches.len()),
                    };
                    roster_info!(
                        "Accepted {} epoch={} entries={}",
                        kind,
                        feed_update.epoch,
                        entries
                    );
                    state.apply_feed_update(feed_update);
                }
                Err(err) => {
                    roster_warn!("Discarding feed reply: {}", err);
                    state.record_error(err);
                }
            }
            Vec::new()
        }
        Msg::FeedFailed(reason) => {
            state.finish_poll();
            roster_warn!("Feed request failed: {}", reason);
            Vec::new()
        }
        Msg::ObserverMoved([x, y, z]) => {
            state.set_observer(Position::new(x, y, z));
            Vec::new()
        }
        Msg::SortChanged(sort) => {
            state.set_sort(sort);
            Vec::new()
        }
        Msg::FilterChanged(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Msg::StopPolling => {
            if state.is_polling() {
                state.stop_polling();
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
