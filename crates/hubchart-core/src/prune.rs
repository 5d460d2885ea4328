// File: crates/hubchart-core/src/prune.rs
// Summary: Restricts a series to an N-day window anchored at "now" or at the series start.

use chrono::{Duration, NaiveDateTime};

use crate::record::LogRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrunePolicy {
    /// Keep observations newer than `now - N days`.
    #[default]
    Newest,
    /// Keep observations within N days of the first one.
    Oldest,
}

impl PrunePolicy {
    pub fn parse(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "oldest" | "old" => PrunePolicy::Oldest,
            _ => PrunePolicy::Newest,
        }
    }
}

/// Prune (x, y) pairs to the window. An empty result becomes `([now], [0])`.
pub fn prune_data(
    x: &[NaiveDateTime],
    y: &[f64],
    days: f64,
    policy: PrunePolicy,
    now: NaiveDateTime,
    log: &mut LogRecord,
) -> (Vec<NaiveDateTime>, Vec<f64>) {
    // A window reaching past the representable date range keeps every row.
    let span = Duration::try_milliseconds((days * 86_400_000.0).round() as i64);
    let keep: Box<dyn Fn(&NaiveDateTime) -> bool> = match policy {
        PrunePolicy::Newest => match span.and_then(|s| now.checked_sub_signed(s)) {
            Some(cutoff) => Box::new(move |t| *t >= cutoff),
            None => Box::new(|_| true),
        },
        PrunePolicy::Oldest => match x.first() {
            Some(first) => match span.and_then(|s| first.checked_add_signed(s)) {
                Some(cutoff) => Box::new(move |t| *t <= cutoff),
                None => Box::new(|_| true),
            },
            None => Box::new(|_| false),
        },
    };

    let (px, py): (Vec<_>, Vec<_>) = x.iter().zip(y).filter(|(t, _)| keep(t)).map(|(t, v)| (*t, *v)).unzip();

    if px.is_empty() {
        log.warning("No data in the requested date range. Plotting a single placeholder point.");
        return (vec![now], vec![0.0]);
    }
    (px, py)
}
