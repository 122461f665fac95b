use roster_core::{PlayerView, RosterViewModel};

/// Plain-text rendering of the view model, one line per entry.
pub fn render(view: &RosterViewModel) -> Vec<String> {
    let epoch = view
        .epoch
        .map(|epoch| epoch.to_string())
        .unwrap_or_else(|| "-".to_string());
    let filter = if view.filter.trim().is_empty() {
        String::new()
    } else {
        format!(" | Filter: {:?}", view.filter)
    };
    let mut lines = vec![format!(
        "Epoch: {} | Players: {}/{} | Sort: {}{}{}",
        epoch,
        view.players.len(),
        view.total_players,
        view.sort,
        filter,
        if view.polling { "" } else { " | stopped" }
    )];
    if let Some(err) = &view.last_error {
        lines.push(format!("Last error: {err}"));
    }
    lines.extend(view.players.iter().map(format_player_row));
    lines
}

fn format_player_row(player: &PlayerView) -> String {
    format!(
        "[#{id}] {name} hp={health} dist={distance:.1} {status} {license}",
        id = player.id,
        name = player.username,
        health = player.health,
        distance = player.distance,
        status = player.vehicle_status.as_str(),
        license = player.license
    )
    .trim_end()
    .to_string()
}
