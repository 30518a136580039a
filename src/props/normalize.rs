//! Flattening of a projections document into prop records.

use std::collections::HashMap;

use tracing::debug;

use super::types::{id_key, team_code, ProjectionResponse, PropRecord, UNKNOWN_PLAYER};

/// Build one [`PropRecord`] per projection row, in upstream order.
///
/// `league` is the upper-cased league label stamped on every record.
pub fn normalize(league: &str, response: ProjectionResponse) -> Vec<PropRecord> {
    let players = player_names(&response);

    let records: Vec<PropRecord> = response
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|row| {
            let attrs = row.attributes.unwrap_or_default();
            let player = attrs
                .new_player_id
                .as_ref()
                .and_then(id_key)
                .and_then(|id| players.get(&id).cloned())
                .unwrap_or_else(|| UNKNOWN_PLAYER.to_string());

            PropRecord {
                player,
                stat: attrs.stat_type,
                line: attrs.line_score,
                team: team_code(attrs.team.as_ref()),
                league: league.to_string(),
            }
        })
        .collect();

    debug!(players = players.len(), records = records.len(), "Normalized projections");

    records
}

/// Player id -> display name, from `included` entities of the player type.
fn player_names(response: &ProjectionResponse) -> HashMap<String, String> {
    response
        .included
        .iter()
        .flatten()
        .filter(|entity| entity.is_player())
        .filter_map(|entity| {
            let id = entity.id.as_ref().and_then(id_key)?;
            let name = entity.name().filter(|name| !name.is_empty())?;
            Some((id, name.to_string()))
        })
        .collect()
}
