use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub type PlayerId = u32;

/// Authoritative records keyed by player id, iterated in ascending id order.
pub type PlayerRecords = BTreeMap<PlayerId, PlayerRecord>;

pub type PlayerPatches = BTreeMap<PlayerId, PlayerPatch>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance; any non-finite result collapses to zero.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        let distance = (dx * dx + dy * dy + dz * dz).sqrt();
        if distance.is_finite() {
            distance
        } else {
            0.0
        }
    }
}

/// One player as carried by a full snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "h")]
    pub health: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ids: Vec<String>,
    pub name: String,
    #[serde(rename = "c")]
    pub position: Position,
    #[serde(rename = "v", default, deserialize_with = "null_as_default")]
    pub vehicle: String,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl PlayerRecord {
    /// First identifier, treated as the license id.
    pub fn license(&self) -> &str {
        self.ids.first().map(String::as_str).unwrap_or("")
    }

    /// Field-wise overwrite with whatever the patch carries.
    pub fn apply(&mut self, patch: PlayerPatch) {
        if let Some(health) = patch.health {
            self.health = health;
        }
        if let Some(ids) = patch.ids {
            self.ids = ids;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(position) = patch.position {
            position.apply_to(&mut self.position);
        }
        if let Some(vehicle) = patch.vehicle {
            self.vehicle = vehicle;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PositionPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl PositionPatch {
    fn apply_to(self, position: &mut Position) {
        if let Some(x) = self.x {
            position.x = x;
        }
        if let Some(y) = self.y {
            position.y = y;
        }
        if let Some(z) = self.z {
            position.z = z;
        }
    }
}

/// Partial player update as carried by a diff. Absent fields keep their value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PlayerPatch {
    #[serde(rename = "h")]
    pub health: Option<f64>,
    pub ids: Option<Vec<String>>,
    pub name: Option<String>,
    #[serde(rename = "c")]
    pub position: Option<PositionPatch>,
    #[serde(rename = "v")]
    pub vehicle: Option<String>,
}

/// Deep-merges a diff into the authoritative records. Unknown ids are inserted
/// starting from an empty record.
pub fn merge_patches(records: &mut PlayerRecords, patches: PlayerPatches) {
    for (id, patch) in patches {
        records.entry(id).or_default().apply(patch);
    }
}
