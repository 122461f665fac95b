use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Epoch, PlayerId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleStatus {
    #[default]
    Unknown,
    Walking,
    Driving,
    /// Planes and helicopters.
    Flying,
    Boating,
    Biking,
}

impl VehicleStatus {
    /// Maps the raw `v` code from the feed; anything unrecognized is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "walking" => Self::Walking,
            "driving" => Self::Driving,
            "flying" => Self::Flying,
            "boating" => Self::Boating,
            "biking" => Self::Biking,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Walking => "walking",
            Self::Driving => "driving",
            Self::Flying => "flying",
            Self::Boating => "boating",
            Self::Biking => "biking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    IdJoinedFirst,
    IdJoinedLast,
    DistanceClosest,
    DistanceFarthest,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::IdJoinedFirst,
        SortMode::IdJoinedLast,
        SortMode::DistanceClosest,
        SortMode::DistanceFarthest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::IdJoinedFirst => "idJoinedFirst",
            SortMode::IdJoinedLast => "idJoinedLast",
            SortMode::DistanceClosest => "distanceClosest",
            SortMode::DistanceFarthest => "distanceFarthest",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort mode {0:?}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}

/// Display-ready projection of one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub distance: f64,
    pub health: f64,
    pub username: String,
    pub license: String,
    pub vehicle_status: VehicleStatus,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterViewModel {
    /// Sorted and filtered players, ready to render.
    pub players: Vec<PlayerView>,
    /// Players known before filtering.
    pub total_players: usize,
    pub sort: SortMode,
    pub filter: String,
    pub epoch: Option<Epoch>,
    pub observer: Position,
    pub polling: bool,
    pub last_error: Option<String>,
    pub dirty: bool,
}
