//! Roster feed: HTTP polling of the player feed and the background poller.
mod fetch;
mod poller;
mod settings;
mod types;

pub use fetch::{FeedClient, ReqwestFeedClient, EPOCH_HEADER, TOKEN_HEADER};
pub use poller::PollerHandle;
pub use settings::{FeedSettings, DEFAULT_ENDPOINT};
pub use types::{FailureKind, FetchError, PollEvent};
