use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{BedStatus, CampRecord};

#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read camp file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse camp records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("camp file must be an array of records or an object with a \"camps\" array")]
    Layout,
}

/// Built-in sample camps, one per ring except the outermost
pub fn mock_camps() -> Vec<CampRecord> {
    vec![
        CampRecord::new("A & 2:00", BedStatus::VideoComplete).with_name("Dusty Dreamers"),
        CampRecord::new("B & 3:00", BedStatus::Complete).with_name("Camp Sunrise"),
        CampRecord::new("C & 4:30", BedStatus::BuddyAssigned).with_name("Playa Pals"),
        CampRecord::new("D & 6:00", BedStatus::None).with_name("Late Arrivals"),
        CampRecord::new("E & 7:30", BedStatus::Complete).with_name("Moonbase"),
    ]
}

/// Parse a camp file, either a bare array or `{"camps": [...]}`.
///
/// Records are decoded one at a time: a record that does not decode is logged
/// and skipped, so one bad entry never hides the rest of the file.
pub fn parse_camps(json: &str) -> Result<Vec<CampRecord>, DataError> {
    let records = match serde_json::from_str(json)? {
        Value::Array(records) => records,
        Value::Object(mut file) => match file.remove("camps") {
            Some(Value::Array(records)) => records,
            _ => return Err(DataError::Layout),
        },
        _ => return Err(DataError::Layout),
    };

    let camps: Vec<CampRecord> = records
        .into_iter()
        .enumerate()
        .filter_map(
            |(i, record)| match serde_json::from_value::<CampRecord>(record) {
                Ok(camp) => Some(camp),
                Err(e) => {
                    log::warn!("Skipping camp record {}: {}", i, e);
                    None
                }
            },
        )
        .collect();

    Ok(camps)
}

pub fn load_camps(path: &Path) -> Result<Vec<CampRecord>, DataError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let camps = parse_camps(&contents)?;
    log::debug!("Loaded {} camp records from {:?}", camps.len(), path);
    Ok(camps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RingId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_mock_camps_are_well_formed() {
        let camps = mock_camps();
        assert_eq!(camps.len(), 5);
        assert!(camps.iter().all(|c| c.ring().is_some()));
        assert_eq!(camps[1].ring(), Some(RingId::new('B')));
        assert_eq!(camps[1].bed_status, BedStatus::Complete);
    }

    #[test]
    fn test_parse_camp_array() {
        let json = r#"[
            {"placement_address": "B & 3:00", "bed_status": "complete"},
            {"placement_address": "B3:00", "bed_status": "video_complete", "name": "Typo Camp"}
        ]"#;

        let camps = parse_camps(json).unwrap();
        assert_eq!(camps.len(), 2);
        assert_eq!(camps[0].bed_status, BedStatus::Complete);
        assert_eq!(camps[1].name.as_deref(), Some("Typo Camp"));
        assert_eq!(camps[1].ring(), None);
    }

    #[test]
    fn test_parse_wrapped_camps() {
        let json = r#"{"camps": [{"placement_address": "F & 10:00", "block": 6}]}"#;
        let camps = parse_camps(json).unwrap();
        assert_eq!(camps.len(), 1);
        assert_eq!(camps[0].bed_status, BedStatus::None);
        assert_eq!(camps[0].block, Some(6));
    }

    #[test]
    fn test_unknown_status_keeps_other_records() {
        let json = r#"[
            {"placement_address": "B & 3:00", "bed_status": "complete"},
            {"placement_address": "C & 4:00", "bed_status": "pending"}
        ]"#;

        let camps = parse_camps(json).unwrap();
        assert_eq!(camps.len(), 2);
        assert_eq!(camps[0].ring(), Some(RingId::new('B')));
        assert_eq!(camps[0].bed_status, BedStatus::Complete);
        assert_eq!(camps[1].bed_status, BedStatus::None);
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let json = r#"{"camps": [
            {"bed_status": "complete"},
            {"placement_address": "D & 6:00", "bed_status": "video_complete"}
        ]}"#;

        let camps = parse_camps(json).unwrap();
        assert_eq!(camps.len(), 1);
        assert_eq!(camps[0].ring(), Some(RingId::new('D')));
    }

    #[test]
    fn test_parse_reports_layout_and_syntax_errors() {
        assert!(matches!(parse_camps(r#"{"rows": []}"#), Err(DataError::Layout)));
        assert!(matches!(parse_camps("42"), Err(DataError::Layout)));
        assert!(matches!(parse_camps("[{"), Err(DataError::Json(_))));
    }

    #[test]
    fn test_load_camps_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"placement_address": "C & 4:30", "bed_status": "buddy_assigned"}}]"#
        )
        .unwrap();

        let camps = load_camps(file.path()).unwrap();
        assert_eq!(camps.len(), 1);
        assert_eq!(camps[0].bed_status, BedStatus::BuddyAssigned);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_camps(Path::new("/nonexistent/camps.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
