// File: crates/hubchart/src/driver.rs
// Summary: Runs each chart job in its own worker process and replays the worker's log record.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};
use hubchart_core::{codec, ChartJob, LogRecord, Severity};

/// Worker binary name; resolved next to the running executable by default.
pub const WORKER_NAME: &str = "hubchart-worker";

/// Outcome of one worker run.
#[derive(Debug)]
pub struct JobReport {
    pub name: String,
    pub status: ExitStatus,
    /// Decoded stdout; None when the worker printed nothing usable.
    pub record: Option<LogRecord>,
    pub stderr: String,
}

impl JobReport {
    pub fn succeeded(&self) -> bool {
        self.status.success() && self.record.as_ref().is_some_and(|r| r.critical.is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct Driver {
    pub worker: PathBuf,
    /// Replay Threaddebug entries as trace events.
    pub verbose: bool,
    pub log_each_chart: bool,
}

impl Driver {
    pub fn new(worker: impl Into<PathBuf>) -> Self {
        Self { worker: worker.into(), verbose: false, log_each_chart: false }
    }

    /// `hubchart-worker` beside the current executable, else whatever PATH finds.
    pub fn default_worker_path() -> PathBuf {
        let file = format!("{WORKER_NAME}{}", std::env::consts::EXE_SUFFIX);
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(&file)))
            .filter(|p| p.exists())
            .unwrap_or_else(|| PathBuf::from(file))
    }

    /// Spawn the worker for one job and wait for it.
    pub fn run(&self, job: &ChartJob) -> Result<JobReport> {
        let token = job.encode().with_context(|| format!("encoding payload for '{}'", job.name))?;
        let output = Command::new(&self.worker)
            .arg(token)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawning {} for '{}'", self.worker.display(), job.name))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let record = match stdout.trim() {
            "" => None,
            text => match codec::decode::<LogRecord>(text) {
                Ok(r) => Some(r),
                Err(e) => {
                    tracing::error!(chart = %job.name, "unreadable worker output: {e}");
                    None
                }
            },
        };

        if let Some(record) = &record {
            replay(record, &job.name, self.verbose);
        }
        if !stderr.is_empty() {
            tracing::error!(chart = %job.name, "{stderr}");
        }
        if !output.status.success() {
            tracing::error!(chart = %job.name, status = %output.status, "worker failed");
        } else if self.log_each_chart {
            tracing::info!(chart = %job.name, "chart refreshed");
        }
        Ok(JobReport { name: job.name.clone(), status: output.status, record, stderr })
    }

    /// One worker per job, all at once; a failing job does not affect the others.
    pub fn run_all(&self, jobs: &[ChartJob]) -> Vec<Result<JobReport>> {
        std::thread::scope(|s| {
            let handles: Vec<_> = jobs.iter().map(|job| s.spawn(move || self.run(job))).collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|_| Err(anyhow::anyhow!("driver thread panicked"))))
                .collect()
        })
    }

    pub fn worker(&self) -> &Path {
        &self.worker
    }
}

/// Emit a worker's record through `tracing` at matching levels.
pub fn replay(record: &LogRecord, chart: &str, verbose: bool) {
    for (severity, message) in record.iter() {
        match severity {
            Severity::Threaddebug if verbose => tracing::trace!(chart, "{message}"),
            Severity::Threaddebug => {}
            Severity::Debug => tracing::debug!(chart, "{message}"),
            Severity::Info => tracing::info!(chart, "{message}"),
            Severity::Warning => tracing::warn!(chart, "{message}"),
            Severity::Critical => tracing::error!(chart, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_worker_is_an_error() {
        let prefs = hubchart_core::PluginPrefs::default();
        let k = hubchart_core::StyleBundles::from_prefs(&prefs).unwrap();
        let job = ChartJob::new(hubchart_core::ChartVariant::Line, "x", prefs, k);
        let driver = Driver::new("/nonexistent/hubchart-worker");
        let err = driver.run(&job).unwrap_err();
        assert!(format!("{err:#}").contains("spawning"));
        let all = driver.run_all(&[job.clone(), job]);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.is_err()));
    }
}
