//! CSV export of detection history.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::motion::Detection;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 5] = ["Timestamp", "Hour", "Category", "Confidence", "Intensity"];

/// Write detections as CSV, one row per detection in the given order.
pub fn write_history<W: Write>(writer: W, detections: &[Detection]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)
        .map_err(|e| Error::Csv { source: e })?;

    for detection in detections {
        csv.write_record([
            detection.timestamp.to_rfc3339(),
            detection.hour().to_string(),
            detection.category.to_string(),
            format!("{:.decimal$}", detection.confidence, decimal = DECIMAL_PLACES),
            format!("{:.decimal$}", detection.intensity, decimal = DECIMAL_PLACES),
        ])
        .map_err(|e| Error::Csv { source: e })?;
    }

    csv.flush()?;
    Ok(())
}

/// Write detections as CSV to a file.
pub fn write_history_file(path: &Path, detections: &[Detection]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_history(std::io::BufWriter::new(file), detections)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::motion::MotionCategory;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_write_history_rows() {
        let detection = Detection {
            timestamp: Local
                .with_ymd_and_hms(2024, 6, 1, 5, 0, 0)
                .earliest()
                .unwrap(),
            intensity: 0.25,
            confidence: 0.5,
            category: MotionCategory::SmallAnimal,
        };

        let mut buffer = Vec::new();
        write_history(&mut buffer, &[detection.clone(), detection]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Timestamp,Hour,Category,Confidence,Intensity");
        assert!(lines[1].ends_with(",5,small_animal,0.5000,0.2500"));
    }

    #[test]
    fn test_write_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        write_history_file(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim(), "Timestamp,Hour,Category,Confidence,Intensity");
    }
}
