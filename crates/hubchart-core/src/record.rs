// File: crates/hubchart-core/src/record.rs
// Summary: Structured log record returned from a worker to the host, one bucket per severity.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Threaddebug,
    Debug,
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Threaddebug,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Critical,
    ];
}

/// Ordered messages collected while one chart job runs.
/// Every append is mirrored to `tracing` at the matching level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Threaddebug", default)]
    pub threaddebug: Vec<String>,
    #[serde(rename = "Debug", default)]
    pub debug: Vec<String>,
    #[serde(rename = "Info", default)]
    pub info: Vec<String>,
    #[serde(rename = "Warning", default)]
    pub warning: Vec<String>,
    #[serde(rename = "Critical", default)]
    pub critical: Vec<String>,
}

impl LogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Threaddebug => tracing::trace!("{message}"),
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Critical => tracing::error!("{message}"),
        }
        self.bucket_mut(severity).push(message);
    }

    pub fn threaddebug(&mut self, message: impl Into<String>) {
        self.push(Severity::Threaddebug, message);
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.push(Severity::Debug, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn critical(&mut self, message: impl Into<String>) {
        self.push(Severity::Critical, message);
    }

    pub fn entries(&self, severity: Severity) -> &[String] {
        match severity {
            Severity::Threaddebug => &self.threaddebug,
            Severity::Debug => &self.debug,
            Severity::Info => &self.info,
            Severity::Warning => &self.warning,
            Severity::Critical => &self.critical,
        }
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<String> {
        match severity {
            Severity::Threaddebug => &mut self.threaddebug,
            Severity::Debug => &mut self.debug,
            Severity::Info => &mut self.info,
            Severity::Warning => &mut self.warning,
            Severity::Critical => &mut self.critical,
        }
    }

    /// All entries, lowest severity bucket first, insertion order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &str)> + '_ {
        Severity::ALL
            .into_iter()
            .flat_map(move |s| self.entries(s).iter().map(move |m| (s, m.as_str())))
    }

    /// True when nothing at Warning or above was recorded.
    pub fn is_clean(&self) -> bool {
        self.warning.is_empty() && self.critical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_keep_insertion_order() {
        let mut log = LogRecord::new();
        log.warning("first");
        log.debug("dbg");
        log.warning("second");
        assert_eq!(log.entries(Severity::Warning), ["first", "second"]);
        assert!(!log.is_clean());
        let all: Vec<_> = log.iter().collect();
        assert_eq!(all[0], (Severity::Debug, "dbg"));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn serializes_with_host_bucket_names() {
        let mut log = LogRecord::new();
        log.critical("boom");
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["Critical"][0], "boom");
        assert!(json.get("Threaddebug").is_some());
    }
}
