// File: crates/hubchart/src/bin/worker.rs
// Summary: Isolated chart worker: decode the payload in argv[1], render, print the encoded log record.
// Exits nonzero only when the payload cannot be decoded or the record cannot be written.

use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use hubchart_core::{codec, run_job, ChartJob, JobContext};
use tracing_subscriber::EnvFilter;

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .init();

    let Some(token) = std::env::args().nth(1) else {
        eprintln!("usage: hubchart-worker <payload>");
        return ExitCode::from(2);
    };
    let job = match ChartJob::decode(&token) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("hubchart-worker: cannot decode payload: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = JobContext::now_local();
    let result = panic::catch_unwind(AssertUnwindSafe(|| run_job(&job, &mut ctx)));
    match result {
        Ok(Ok(Some(path))) => {
            if job.prefs.log_each_chart_completed {
                ctx.log.info(format!("{} chart '{}' written to {}.", job.variant.as_str(), job.name, path.display()));
            }
        }
        Ok(Ok(None)) => {}
        Ok(Err(e)) => ctx.log.critical(format!("Error rendering {} chart '{}': {e:#}", job.variant.as_str(), job.name)),
        Err(payload) => ctx.log.critical(format!(
            "Worker panicked rendering {} chart '{}': {}",
            job.variant.as_str(),
            job.name,
            panic_message(payload.as_ref())
        )),
    }

    match codec::encode(&ctx.log) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("hubchart-worker: cannot encode log record: {e}");
            ExitCode::FAILURE
        }
    }
}
