//! Roster core: pure state machine for the player feed and its derived view.
mod effect;
mod msg;
mod projection;
mod record;
mod reply;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use projection::{convert_players, project};
pub use record::{
    merge_patches, PlayerId, PlayerPatch, PlayerPatches, PlayerRecord, PlayerRecords, Position,
    PositionPatch,
};
pub use reply::{validate_reply, Epoch, FeedError, FeedPayload, FeedUpdate};
pub use state::RosterState;
pub use update::update;
pub use view_model::{PlayerView, RosterViewModel, SortMode, UnknownSortMode, VehicleStatus};
