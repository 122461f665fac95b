use crate::Epoch;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Issue one feed request carrying the epoch we currently hold.
    PollFeed { epoch: Option<Epoch> },
    StopPolling,
}
