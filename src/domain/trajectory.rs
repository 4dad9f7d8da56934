// Trajectory domain models and the raw-to-normalized transformation
use crate::domain::color::{station_color, Color, UNKNOWN_COMM_COLOR};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Communication quality reported with a coordinate sample. A closed
/// enumeration: labels outside the four recognized ones decode to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommState {
    LoudAndClear,
    ReadableNoisy,
    Noisy,
    NothingHeard,
    Unknown,
}

impl CommState {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Loud and Clear" => Self::LoudAndClear,
            "Readable Noisy" => Self::ReadableNoisy,
            "Noisy" => Self::Noisy,
            "Nothing Heard" => Self::NothingHeard,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LoudAndClear => "Loud and Clear",
            Self::ReadableNoisy => "Readable Noisy",
            Self::Noisy => "Noisy",
            Self::NothingHeard => "Nothing Heard",
            Self::Unknown => "Unknown",
        }
    }

    /// Marker color encoding the quality gradient, best to worst.
    pub fn color(&self) -> Color {
        match self {
            Self::LoudAndClear => "#006400",
            Self::ReadableNoisy => "#90EE90",
            Self::Noisy => "#FFA500",
            Self::NothingHeard => "#8B0000",
            Self::Unknown => UNKNOWN_COMM_COLOR,
        }
    }
}

impl Serialize for CommState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CommState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Marker color for an optional communication state; absent states fall
/// back to the same neutral gray as `Unknown`.
pub fn comm_state_color(state: Option<CommState>) -> Color {
    state.map_or(UNKNOWN_COMM_COLOR, |s| s.color())
}

/// Coordinate record as the remote backend reports it. Only lat/lng are
/// required; everything else is passed through when present.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCoordinate {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: Option<String>,
    pub station: Option<String>,
    pub device_id: Option<String>,
    pub comm_state: Option<String>,
    pub accuracy: Option<f64>,
    pub sample_date: Option<String>,
    pub sample_time: Option<String>,
    pub captured_at_utc: Option<i64>,
}

/// Trajectory record as the remote backend reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrajectory {
    pub station: String,
    pub device_id: String,
    #[serde(default)]
    pub coordinates: Vec<RawCoordinate>,
}

/// Normalized coordinate sample. Fields absent in the raw record stay
/// absent here; lat/lng are never range-checked.
#[derive(Debug, Clone, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comm_state: Option<CommState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at_utc: Option<i64>,
    /// Marker color for the sample's communication state; the fallback
    /// gray when the state is absent or unrecognized.
    pub comm_color: Color,
}

impl Coordinate {
    fn from_raw(raw: RawCoordinate) -> Self {
        let comm_state = raw.comm_state.as_deref().map(CommState::from_label);
        Self {
            lat: raw.lat,
            lng: raw.lng,
            timestamp: raw.timestamp,
            station: raw.station,
            device_id: raw.device_id,
            comm_state,
            accuracy: raw.accuracy,
            sample_date: raw.sample_date,
            sample_time: raw.sample_time,
            captured_at_utc: raw.captured_at_utc,
            comm_color: comm_state_color(comm_state),
        }
    }

    /// Receipt time parsed from the ISO-8601 `timestamp` field, if present
    /// and well-formed.
    pub fn received_at(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
    }

    /// Capture time derived from the epoch `captured_at_utc` field.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at_utc
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Ordered sequence of coordinates from one station/device pair. Built
/// fresh on every fetch, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    pub id: String,
    pub name: String,
    pub station: String,
    pub device_id: String,
    /// Polyline color assigned from the station palette.
    pub color: Color,
    pub coordinates: Vec<Coordinate>,
    /// Positional (lat, lng) pairs in coordinate order, ready for a
    /// polyline-drawing primitive.
    pub path: Vec<(f64, f64)>,
}

impl Trajectory {
    fn from_raw(raw: RawTrajectory) -> Self {
        let coordinates: Vec<Coordinate> =
            raw.coordinates.into_iter().map(Coordinate::from_raw).collect();
        Self {
            id: format!("{}-{}", raw.station, raw.device_id),
            name: format!("Station: {} | Device: {}", raw.station, raw.device_id),
            color: station_color(&raw.station),
            station: raw.station,
            device_id: raw.device_id,
            path: path_coordinates(&coordinates),
            coordinates,
        }
    }
}

/// Normalizes raw backend trajectories. One output per input; coordinate
/// order within each trajectory is preserved.
pub fn transform(raw: Vec<RawTrajectory>) -> Vec<Trajectory> {
    raw.into_iter().map(Trajectory::from_raw).collect()
}

/// Projects coordinates down to (lat, lng) pairs. No filtering, no
/// deduplication, order preserved.
pub fn path_coordinates(coordinates: &[Coordinate]) -> Vec<(f64, f64)> {
    coordinates.iter().map(|c| (c.lat, c.lng)).collect()
}

/// Distinct non-empty station identifiers across a set of trajectories,
/// sorted lexicographically. Used to populate report-selection controls.
pub fn station_names(trajectories: &[Trajectory]) -> Vec<String> {
    trajectories
        .iter()
        .map(|t| t.station.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_coordinate(lat: f64, lng: f64) -> RawCoordinate {
        RawCoordinate {
            lat,
            lng,
            timestamp: None,
            station: None,
            device_id: None,
            comm_state: None,
            accuracy: None,
            sample_date: None,
            sample_time: None,
            captured_at_utc: None,
        }
    }

    fn raw_trajectory(station: &str, device_id: &str, coords: Vec<RawCoordinate>) -> RawTrajectory {
        RawTrajectory {
            station: station.to_string(),
            device_id: device_id.to_string(),
            coordinates: coords,
        }
    }

    #[test]
    fn test_transform_builds_id_and_name() {
        let result = transform(vec![raw_trajectory("X", "1", vec![raw_coordinate(1.0, 2.0)])]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "X-1");
        assert_eq!(result[0].name, "Station: X | Device: 1");
        assert_eq!(result[0].color, station_color("X"));
        assert_eq!(result[0].coordinates.len(), 1);
        assert_eq!(result[0].coordinates[0].lat, 1.0);
        assert_eq!(result[0].coordinates[0].lng, 2.0);
    }

    #[test]
    fn test_transform_preserves_coordinate_order() {
        let coords = vec![
            raw_coordinate(1.0, 1.0),
            raw_coordinate(3.0, 3.0),
            raw_coordinate(2.0, 2.0),
        ];
        let result = transform(vec![raw_trajectory("S", "D", coords)]);

        let lats: Vec<f64> = result[0].coordinates.iter().map(|c| c.lat).collect();
        assert_eq!(lats, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_transform_is_one_to_one() {
        let raw = vec![
            raw_trajectory("A", "1", vec![]),
            raw_trajectory("B", "2", vec![]),
            raw_trajectory("A", "2", vec![]),
        ];
        let result = transform(raw);

        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A-1", "B-2", "A-2"]);
    }

    #[test]
    fn test_path_coordinates_keeps_pairs_in_order() {
        let result = transform(vec![raw_trajectory(
            "S",
            "D",
            vec![raw_coordinate(1.5, 2.5), raw_coordinate(3.5, 4.5)],
        )]);

        assert_eq!(result[0].path, vec![(1.5, 2.5), (3.5, 4.5)]);
        assert_eq!(
            path_coordinates(&result[0].coordinates),
            vec![(1.5, 2.5), (3.5, 4.5)]
        );
    }

    #[test]
    fn test_comm_state_labels_round_trip() {
        assert_eq!(CommState::from_label("Loud and Clear"), CommState::LoudAndClear);
        assert_eq!(CommState::from_label("Readable Noisy"), CommState::ReadableNoisy);
        assert_eq!(CommState::from_label("Noisy"), CommState::Noisy);
        assert_eq!(CommState::from_label("Nothing Heard"), CommState::NothingHeard);
        assert_eq!(CommState::from_label("garbled"), CommState::Unknown);
    }

    #[test]
    fn test_comm_state_colors() {
        assert_eq!(CommState::LoudAndClear.color(), "#006400");
        assert_eq!(CommState::ReadableNoisy.color(), "#90EE90");
        assert_eq!(CommState::Noisy.color(), "#FFA500");
        assert_eq!(CommState::NothingHeard.color(), "#8B0000");
        assert_eq!(comm_state_color(Some(CommState::Unknown)), "#666666");
        assert_eq!(comm_state_color(None), "#666666");
    }

    #[test]
    fn test_unrecognized_comm_state_decodes_to_unknown() {
        let json = r#"{"station":"S","device_id":"D","coordinates":[{"lat":1.0,"lng":2.0,"comm_state":"garbled"}]}"#;
        let raw: RawTrajectory = serde_json::from_str(json).unwrap();
        let result = transform(vec![raw]);

        assert_eq!(result[0].coordinates[0].comm_state, Some(CommState::Unknown));
        assert_eq!(result[0].coordinates[0].comm_color, "#666666");
    }

    #[test]
    fn test_absent_fields_stay_absent_in_output() {
        let result = transform(vec![raw_trajectory("S", "D", vec![raw_coordinate(1.0, 2.0)])]);
        let json = serde_json::to_value(&result[0].coordinates[0]).unwrap();

        // Only lat, lng and the computed marker color; no defaulted fields.
        assert_eq!(json.as_object().unwrap().len(), 3);
        assert_eq!(json["lat"], 1.0);
        assert_eq!(json["lng"], 2.0);
        assert_eq!(json["comm_color"], "#666666");
    }

    #[test]
    fn test_missing_lat_fails_decoding() {
        let json = r#"{"station":"S","device_id":"D","coordinates":[{"lng":2.0}]}"#;
        assert!(serde_json::from_str::<RawTrajectory>(json).is_err());
    }

    #[test]
    fn test_station_names_filters_and_sorts() {
        let raw = vec![
            raw_trajectory("B", "1", vec![]),
            raw_trajectory("", "2", vec![]),
            raw_trajectory("  ", "3", vec![]),
            raw_trajectory("A", "4", vec![]),
            raw_trajectory("A", "5", vec![]),
        ];
        let trajectories = transform(raw);

        assert_eq!(station_names(&trajectories), vec!["A", "B"]);
    }

    #[test]
    fn test_captured_at_from_epoch() {
        let mut coord = raw_coordinate(1.0, 2.0);
        coord.captured_at_utc = Some(1_700_000_000);
        let result = transform(vec![raw_trajectory("S", "D", vec![coord])]);

        let captured = result[0].coordinates[0].captured_at().unwrap();
        assert_eq!(captured.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_received_at_parses_rfc3339() {
        let mut coord = raw_coordinate(1.0, 2.0);
        coord.timestamp = Some("2024-06-01T12:00:00+06:00".to_string());
        let result = transform(vec![raw_trajectory("S", "D", vec![coord])]);

        assert!(result[0].coordinates[0].received_at().is_some());
    }
}
