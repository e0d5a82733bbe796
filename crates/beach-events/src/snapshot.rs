//! Snapshot Types
//!
//! Read-only views of the beach handed to renderers after the trigger and
//! after every tick.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// State of a single octopus at snapshot time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OctopusSnapshot {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub awake: bool,
    #[serde(default)]
    pub excitement: u32,
    #[serde(default)]
    pub recovering: bool,
}

impl OctopusSnapshot {
    /// Creates a sleeping octopus snapshot at the given cell.
    pub fn new(id: usize, row: usize, col: usize) -> Self {
        Self {
            id,
            row,
            col,
            awake: false,
            excitement: 0,
            recovering: false,
        }
    }
}

/// Complete beach snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeachSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    pub triggered_by: String,
    pub width: usize,
    pub height: usize,
    pub smell: u32,
    /// Row-major, `row * width + col`
    pub octopuses: Vec<OctopusSnapshot>,
}

impl BeachSnapshot {
    /// Creates an empty snapshot for a beach of the given size.
    pub fn new(
        snapshot_id: impl Into<String>,
        tick: u64,
        triggered_by: impl Into<String>,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            tick,
            triggered_by: triggered_by.into(),
            width,
            height,
            smell: 0,
            octopuses: Vec::with_capacity(width * height),
        }
    }

    /// Finds the octopus at a cell.
    pub fn find(&self, row: usize, col: usize) -> Option<&OctopusSnapshot> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.octopuses.get(row * self.width + col)
    }

    /// Returns the number of awake octopuses.
    pub fn awake_count(&self) -> usize {
        self.octopuses.iter().filter(|o| o.awake).count()
    }

    /// Iterates the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[OctopusSnapshot]> {
        self.octopuses.chunks(self.width.max(1))
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the snapshot to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_three() -> BeachSnapshot {
        let mut snapshot = BeachSnapshot::new("snap_000001", 4, "tick", 3, 2);
        for row in 0..2 {
            for col in 0..3 {
                snapshot
                    .octopuses
                    .push(OctopusSnapshot::new(row * 3 + col, row, col));
            }
        }
        snapshot
    }

    #[test]
    fn test_generate_snapshot_id() {
        assert_eq!(generate_snapshot_id(1), "snap_000001");
        assert_eq!(generate_snapshot_id(42371), "snap_042371");
    }

    #[test]
    fn test_find_uses_row_major_layout() {
        let snapshot = two_by_three();

        let octopus = snapshot.find(1, 2).unwrap();
        assert_eq!(octopus.id, 5);
        assert_eq!((octopus.row, octopus.col), (1, 2));

        assert!(snapshot.find(2, 0).is_none());
        assert!(snapshot.find(0, 3).is_none());
    }

    #[test]
    fn test_rows_and_awake_count() {
        let mut snapshot = two_by_three();
        snapshot.octopuses[1].awake = true;
        snapshot.octopuses[4].awake = true;

        assert_eq!(snapshot.awake_count(), 2);

        let rows: Vec<_> = snapshot.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0][1].awake);
        assert!(rows[1][1].awake);
        assert!(!rows[1][2].awake);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut snapshot = two_by_three();
        snapshot.smell = 3;

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("snap_000001"));
        assert!(json.contains("\"smell\":3"));

        let parsed = BeachSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed.octopuses.len(), 6);
        assert_eq!(parsed.octopuses, snapshot.octopuses);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id":0,"row":0,"col":0,"awake":true}"#;
        let octopus: OctopusSnapshot = serde_json::from_str(json).unwrap();

        assert!(octopus.awake);
        assert_eq!(octopus.excitement, 0);
        assert!(!octopus.recovering);
    }
}
