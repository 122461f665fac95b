use crate::SortMode;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Poll interval elapsed.
    Tick,
    /// Feed reply body, decoded as JSON but not yet validated.
    FeedReceived(serde_json::Value),
    /// Feed request failed before a reply body was available.
    FeedFailed(String),
    /// Observer position event, `[x, y, z]`.
    ObserverMoved([f64; 3]),
    /// User picked a different sort mode.
    SortChanged(SortMode),
    /// User edited the filter box.
    FilterChanged(String),
    /// Stop scheduling new poll cycles. In-flight requests still complete.
    StopPolling,
    /// Fallback for placeholder wiring.
    NoOp,
}
