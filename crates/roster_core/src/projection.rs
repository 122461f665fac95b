use std::cmp::Ordering;

use crate::{PlayerRecords, PlayerView, Position, SortMode, VehicleStatus};

/// Converts authoritative records into views, measuring distance from `observer`.
/// Output is in ascending id order.
pub fn convert_players(records: &PlayerRecords, observer: Position) -> Vec<PlayerView> {
    records
        .iter()
        .map(|(&id, record)| PlayerView {
            id,
            distance: observer.distance_to(&record.position),
            health: record.health,
            username: record.name.clone(),
            license: record.license().to_string(),
            vehicle_status: VehicleStatus::from_code(&record.vehicle),
        })
        .collect()
}

/// Filters then sorts a full copy of `players`. Sorting is stable.
pub fn project(players: &[PlayerView], sort: SortMode, filter: &str) -> Vec<PlayerView> {
    let needle = filter.trim().to_lowercase();
    let mut visible: Vec<PlayerView> = if needle.is_empty() {
        players.to_vec()
    } else {
        players
            .iter()
            .filter(|player| matches_filter(player, &needle))
            .cloned()
            .collect()
    };

    visible.sort_by(|a, b| compare(a, b, sort));
    visible
}

fn matches_filter(player: &PlayerView, needle: &str) -> bool {
    player.username.to_lowercase().contains(needle) || player.id.to_string().contains(needle)
}

fn compare(a: &PlayerView, b: &PlayerView, sort: SortMode) -> Ordering {
    match sort {
        SortMode::IdJoinedFirst => a.id.cmp(&b.id),
        SortMode::IdJoinedLast => b.id.cmp(&a.id),
        SortMode::DistanceClosest => a.distance.total_cmp(&b.distance),
        SortMode::DistanceFarthest => b.distance.total_cmp(&a.distance),
    }
}
