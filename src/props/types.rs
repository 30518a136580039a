//! Upstream projections document and the normalized prop record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Included entity type carrying player names.
pub const PLAYER_ENTITY_TYPE: &str = "new-player";

/// Player name used when a projection's player cannot be resolved.
pub const UNKNOWN_PLAYER: &str = "Unknown";

/// A single prop, flattened from one upstream projection row.
///
/// `stat` and `line` carry the upstream JSON values unchanged, so `9` stays
/// `9` and an odd string line is served as the string it was.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PropRecord {
    /// Player display name, or "Unknown".
    pub player: String,
    /// Stat type label (e.g. "Points").
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub stat: Option<Value>,
    /// Line value.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub line: Option<Value>,
    /// Team code, empty when upstream has none.
    pub team: String,
    /// Upper-cased league key.
    pub league: String,
}

/// Projections document returned by the upstream API.
///
/// Both collections may be missing or null; they are read as empty. Any
/// other non-array value is a malformed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionResponse {
    /// Projection rows.
    #[serde(default)]
    pub data: Option<Vec<ProjectionRow>>,
    /// Side-loaded entities (players, teams, leagues, ...).
    #[serde(default)]
    pub included: Option<Vec<IncludedEntity>>,
}

/// One projection row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionRow {
    /// Row attributes. Missing and null read as empty.
    #[serde(default)]
    pub attributes: Option<ProjectionAttributes>,
}

/// Attributes of a projection row.
///
/// Every field is untyped: a row with an unexpected value must not fail the
/// rest of the board.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionAttributes {
    /// Id of the player entity in `included`. String or number.
    #[serde(default)]
    pub new_player_id: Option<Value>,
    /// Stat type label.
    #[serde(default)]
    pub stat_type: Option<Value>,
    /// Line value.
    #[serde(default)]
    pub line_score: Option<Value>,
    /// Team code.
    #[serde(default)]
    pub team: Option<Value>,
}

/// Side-loaded entity. Only players are of interest, so attributes stay
/// untyped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludedEntity {
    /// Entity id. String or number.
    #[serde(default)]
    pub id: Option<Value>,
    /// Entity type tag.
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    /// Entity attributes.
    #[serde(default)]
    pub attributes: Value,
}

impl IncludedEntity {
    /// Whether this entity is a player.
    pub fn is_player(&self) -> bool {
        self.kind.as_ref().and_then(Value::as_str) == Some(PLAYER_ENTITY_TYPE)
    }

    /// Player display name, if present.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }
}

/// Team code as served: missing, null, empty, `false` and `0` become `""`,
/// other scalars their text.
pub fn team_code(team: Option<&Value>) -> String {
    match team {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// Textual form of an id, so `"12"` and `12` join.
pub fn id_key(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
