// File: crates/hubchart-core/src/ingest.rs
// Summary: Reads append-only (timestamp, value) observation CSVs, fabricating placeholder
// rows for empty or header-only files.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::coerce::convert_the_data;
use crate::record::LogRecord;

/// (timestamp text, value text). Row 0 of a table is the header.
pub type Row = (String, String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceStatus {
    /// Two or more rows read from disk.
    Read,
    /// The file was empty or header-only and was padded.
    Synthesized,
    /// The file could not be opened; rows are a placeholder and the series must be skipped.
    Missing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Observations {
    pub rows: Vec<Row>,
    pub status: SourceStatus,
}

impl Observations {
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Value column label.
    pub fn value_label(&self) -> &str {
        self.header().map(|h| h.1.as_str()).unwrap_or("")
    }

    /// Data rows without the header.
    pub fn body(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn is_usable(&self) -> bool {
        self.status != SourceStatus::Missing
    }
}

/// Timestamp text used for fabricated rows.
pub fn now_stamp(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn placeholder(now: NaiveDateTime) -> Vec<Row> {
    vec![
        ("timestamp".to_string(), "placeholder".to_string()),
        (now_stamp(now), "0".to_string()),
    ]
}

/// Read raw rows. Never fails: problems are logged and a placeholder is returned.
pub fn read_rows(path: &Path, now: NaiveDateTime, log: &mut LogRecord) -> Observations {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log.critical(format!("Error opening data file {}: {e}. Skipping.", path.display()));
            return Observations { rows: placeholder(now), status: SourceStatus::Missing };
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        match record {
            Ok(rec) if rec.iter().all(str::is_empty) => {}
            Ok(rec) => rows.push((
                rec.get(0).unwrap_or_default().to_string(),
                rec.get(1).unwrap_or_default().to_string(),
            )),
            Err(e) => log.warning(format!("{}: unreadable line {}: {e}", path.display(), line + 1)),
        }
    }

    let status = match rows.len() {
        0 => {
            log.warning(format!("{} has no data. Substituting a placeholder.", path.display()));
            rows = placeholder(now);
            SourceStatus::Synthesized
        }
        1 => {
            log.warning(format!("{} has only a header row. Adding a zero observation.", path.display()));
            rows.push((now_stamp(now), "0".to_string()));
            SourceStatus::Synthesized
        }
        _ => SourceStatus::Read,
    };
    Observations { rows, status }
}

/// Read and coerce: every value cell of the result parses as a real number or is "NaN".
pub fn get_data(path: &Path, now: NaiveDateTime, log: &mut LogRecord) -> Observations {
    let raw = read_rows(path, now, log);
    Observations { rows: convert_the_data(raw.rows), status: raw.status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Severity;
    use std::io::Write;

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn missing_file_is_critical_with_placeholder() {
        let mut log = LogRecord::new();
        let obs = get_data(Path::new("/definitely/not/here.csv"), now(), &mut log);
        assert_eq!(obs.status, SourceStatus::Missing);
        assert!(!obs.is_usable());
        assert_eq!(obs.rows.len(), 2);
        assert_eq!(log.entries(Severity::Critical).len(), 1);
    }

    #[test]
    fn empty_file_gets_placeholder() {
        let f = file_with("");
        let mut log = LogRecord::new();
        let obs = get_data(f.path(), now(), &mut log);
        assert_eq!(obs.status, SourceStatus::Synthesized);
        assert_eq!(obs.rows[0], ("timestamp".to_string(), "placeholder".to_string()));
        assert_eq!(obs.rows[1].1, "0");
        assert_eq!(log.warning.len(), 1);
    }

    #[test]
    fn header_only_gets_zero_row() {
        let f = file_with("Timestamp,Temperature\n");
        let mut log = LogRecord::new();
        let obs = get_data(f.path(), now(), &mut log);
        assert_eq!(obs.rows.len(), 2);
        assert_eq!(obs.value_label(), "Temperature");
        assert_eq!(obs.rows[1].0, "2026-10-19 12:00:00.000000");
        assert_eq!(log.warning.len(), 1);
    }

    #[test]
    fn malformed_values_become_nan_but_header_survives() {
        let f = file_with("Timestamp,Door\n2026-10-18 01:00:00,open\n2026-10-18 02:00:00,???\n2026-10-18 03:00:00,4.5\n");
        let mut log = LogRecord::new();
        let obs = get_data(f.path(), now(), &mut log);
        assert_eq!(obs.status, SourceStatus::Read);
        assert_eq!(obs.rows[0], ("Timestamp".to_string(), "Door".to_string()));
        let values: Vec<&str> = obs.body().iter().map(|r| r.1.as_str()).collect();
        assert_eq!(values, ["1", "NaN", "4.5"]);
        assert!(log.is_clean());
    }

    #[test]
    fn short_rows_are_tolerated() {
        let f = file_with("Timestamp,Value\n2026-10-18 01:00:00\n2026-10-18 02:00:00,2\n");
        let mut log = LogRecord::new();
        let obs = get_data(f.path(), now(), &mut log);
        assert_eq!(obs.body()[0].1, "NaN");
        assert_eq!(obs.body()[1].1, "2");
    }
}
