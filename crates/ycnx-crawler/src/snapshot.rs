//! JSON snapshot export

use crate::error::CrawlerError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};
use ycnx_domain::StoredRecord;

/// One exported row; field order is the column order of the table
#[derive(Debug, Serialize)]
struct SnapshotRow<'a> {
    id: i64,
    period_id: u64,
    batch_no: &'a str,
    period_name: &'a str,
    draw_date: Option<&'a str>,
    total_applied: u64,
    quota_total: u64,
    total_won: u64,
    total_lost: u64,
    win_rate: &'a str,
    pdf_url: &'a str,
    updated_at: &'a str,
}

impl<'a> From<&'a StoredRecord> for SnapshotRow<'a> {
    fn from(stored: &'a StoredRecord) -> Self {
        let r = &stored.record;
        Self {
            id: stored.id,
            period_id: r.period_id,
            batch_no: &r.batch_no,
            period_name: &r.period_name,
            draw_date: r.draw_date.as_deref(),
            total_applied: r.total_applied,
            quota_total: r.quota_total,
            total_won: r.total_won,
            total_lost: r.total_lost,
            win_rate: &r.win_rate,
            pdf_url: &r.pdf_url,
            updated_at: &stored.updated_at,
        }
    }
}

/// Serialize with 4-space indentation; non-ASCII text is written as-is
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes the history and latest-record snapshots
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    history_path: PathBuf,
    latest_path: PathBuf,
}

impl SnapshotWriter {
    /// Create a writer for the two target files
    pub fn new(history_path: impl Into<PathBuf>, latest_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            latest_path: latest_path.into(),
        }
    }

    /// Full history target
    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Latest-record target
    pub fn latest_path(&self) -> &Path {
        &self.latest_path
    }

    /// Write `history` (most recent first) and its first element
    ///
    /// With an empty history only the history file is written.
    pub fn write(&self, history: &[StoredRecord]) -> Result<(), CrawlerError> {
        let rows: Vec<SnapshotRow<'_>> = history.iter().map(SnapshotRow::from).collect();
        write_replacing(&self.history_path, &to_pretty_json(&rows)?)?;

        match rows.first() {
            Some(latest) => write_replacing(&self.latest_path, &to_pretty_json(latest)?)?,
            None => tracing::warn!("History is empty, {} not written", self.latest_path.display()),
        }
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target
fn write_replacing(path: &Path, contents: &[u8]) -> Result<(), CrawlerError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    file.persist(path).map_err(|e| CrawlerError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ycnx_domain::PeriodRecord;

    fn stored(id: i64, period_id: u64) -> StoredRecord {
        StoredRecord {
            id,
            record: PeriodRecord {
                period_id,
                batch_no: format!("YCCQPCH{:07}", period_id),
                period_name: format!("第{}期", period_id),
                draw_date: None,
                total_applied: 500,
                quota_total: 100,
                total_won: 100,
                total_lost: 400,
                win_rate: "20.00%".to_string(),
                pdf_url: format!("https://example.invalid/YCCQPCH{:07}", period_id),
            },
            updated_at: "2024-05-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_pretty_json_format() {
        let row = stored(1, 1);
        let bytes = to_pretty_json(&SnapshotRow::from(&row)).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("{\n    \"id\": 1,\n    \"period_id\": 1,"));
        assert!(text.contains("\"period_name\": \"第1期\""));
        assert!(text.contains("\"draw_date\": null"));
        assert!(text.trim_end().ends_with("\"updated_at\": \"2024-05-01 12:00:00\"\n}"));
    }

    #[test]
    fn test_write_history_and_latest() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("history.json"), dir.path().join("latest.json"));

        writer.write(&[stored(2, 2), stored(1, 1)]).unwrap();

        let history: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(writer.history_path()).unwrap()).unwrap();
        let latest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(writer.latest_path()).unwrap()).unwrap();

        assert_eq!(history.as_array().unwrap().len(), 2);
        assert_eq!(history[0]["period_id"], 2);
        assert_eq!(latest["period_id"], 2);
        assert_eq!(latest, history[0]);
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("history.json"), dir.path().join("latest.json"));

        writer.write(&[stored(1, 1)]).unwrap();
        writer.write(&[stored(2, 2), stored(1, 1)]).unwrap();

        let latest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(writer.latest_path()).unwrap()).unwrap();
        assert_eq!(latest["id"], 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_empty_history_skips_latest() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("history.json"), dir.path().join("latest.json"));

        writer.write(&[]).unwrap();

        assert_eq!(std::fs::read_to_string(writer.history_path()).unwrap(), "[]");
        assert!(!writer.latest_path().exists());
    }
}
