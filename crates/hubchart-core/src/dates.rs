// File: crates/hubchart-core/src/dates.rs
// Summary: Lenient timestamp parsing, the continuous day-number X domain,
// and the date tick locators chosen by a chart's bin selector.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d %Y"];

/// Cap on generated ticks; denser locators produce none rather than a smear.
pub const MAX_TICKS: usize = 1000;

/// Parse the timestamp forms hosts and devices are known to write.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    // Bare epoch seconds.
    if let Ok(secs) = s.parse::<f64>() {
        if secs > 1.0e8 && secs.is_finite() {
            return DateTime::from_timestamp(secs.trunc() as i64, 0).map(|d| d.naive_utc());
        }
    }
    None
}

/// Days (with fraction) since 1970-01-01T00:00, monotonic in time.
pub fn date2num(dt: NaiveDateTime) -> f64 {
    let utc = dt.and_utc();
    utc.timestamp() as f64 / 86_400.0 + utc.timestamp_subsec_nanos() as f64 / 86_400.0e9
}

pub fn num2date(n: f64) -> NaiveDateTime {
    let micros = (n * 86_400.0e6).round() as i64;
    DateTime::from_timestamp_micros(micros)
        .map(|d| d.naive_utc())
        .unwrap_or_default()
}

/// Format a day number with a strftime pattern; the literal "None" blanks the label.
pub fn format_day_number(n: f64, fmt: &str) -> String {
    if fmt.trim().is_empty() || fmt.trim().eq_ignore_ascii_case("none") {
        return String::new();
    }
    num2date(n).format(fmt).to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateUnit {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

/// Ticks every `step` units, aligned to the calendar (e.g. hours divisible by `step`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateLocator {
    pub unit: DateUnit,
    pub step: u32,
}

impl DateLocator {
    pub const fn new(unit: DateUnit, step: u32) -> Self {
        Self { unit, step }
    }

    pub fn ticks(&self, min: f64, max: f64) -> Vec<f64> {
        if !(min.is_finite() && max.is_finite()) || max < min {
            return Vec::new();
        }
        let step = self.step.max(1);
        let lo = num2date(min);
        let hi = num2date(max);
        let mut out = Vec::new();
        let push = |dt: NaiveDateTime, out: &mut Vec<f64>| -> bool {
            if dt > hi || out.len() > MAX_TICKS {
                return false;
            }
            if dt >= lo {
                out.push(date2num(dt));
            }
            true
        };
        match self.unit {
            DateUnit::Minute | DateUnit::Hour | DateUnit::Day => {
                let span_minutes = match self.unit {
                    DateUnit::Minute => step as i64,
                    DateUnit::Hour => step as i64 * 60,
                    _ => step as i64 * 1440,
                };
                // Align to the start of lo's day, then to the unit grid.
                let day_start = lo.date().and_hms_opt(0, 0, 0).unwrap_or(lo);
                let mut t = match self.unit {
                    DateUnit::Day => day_start,
                    DateUnit::Hour => day_start + Duration::hours((lo.hour() / step * step) as i64),
                    _ => {
                        let minute_of_day = (lo.hour() * 60 + lo.minute()) as i64;
                        day_start + Duration::minutes(minute_of_day / span_minutes * span_minutes)
                    }
                };
                while push(t, &mut out) {
                    t += Duration::minutes(span_minutes);
                }
            }
            DateUnit::Month => {
                let (mut y, mut m) = (lo.year(), lo.month());
                while let Some(d) = NaiveDate::from_ymd_opt(y, m, 1).and_then(|d| d.and_hms_opt(0, 0, 0)) {
                    if !push(d, &mut out) {
                        break;
                    }
                    m += step;
                    while m > 12 {
                        m -= 12;
                        y += 1;
                    }
                }
            }
            DateUnit::Year => {
                let mut y = lo.year();
                while let Some(d) = NaiveDate::from_ymd_opt(y, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)) {
                    if !push(d, &mut out) {
                        break;
                    }
                    y += step as i32;
                }
            }
        }
        if out.len() > MAX_TICKS {
            out.clear();
        }
        out
    }
}

/// Major/minor locator pair for a bin selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinScale {
    pub major: DateLocator,
    pub minor: DateLocator,
}

/// Resolve a bin selector (`xAxisBins`) to its locators. Unknown selectors fall back to daily.
pub fn bin_scale(selector: &str) -> BinScale {
    use DateUnit::*;
    let pair = |major: DateLocator, minor: DateLocator| BinScale { major, minor };
    match selector.trim() {
        "quarter-hourly" => pair(DateLocator::new(Hour, 4), DateLocator::new(Minute, 15)),
        "half-hourly" => pair(DateLocator::new(Hour, 4), DateLocator::new(Minute, 30)),
        "hourly" => pair(DateLocator::new(Hour, 4), DateLocator::new(Hour, 1)),
        "hourly_2" => pair(DateLocator::new(Hour, 2), DateLocator::new(Hour, 1)),
        "hourly_4" => pair(DateLocator::new(Hour, 4), DateLocator::new(Hour, 1)),
        "hourly_8" => pair(DateLocator::new(Hour, 8), DateLocator::new(Hour, 4)),
        "hourly_12" => pair(DateLocator::new(Hour, 12), DateLocator::new(Hour, 6)),
        "weekly" => pair(DateLocator::new(Day, 7), DateLocator::new(Day, 1)),
        "monthly" => pair(DateLocator::new(Month, 1), DateLocator::new(Day, 1)),
        "yearly" => pair(DateLocator::new(Year, 1), DateLocator::new(Month, 1)),
        _ => pair(DateLocator::new(Day, 1), DateLocator::new(Hour, 6)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn lenient_parsing() {
        let base = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(13, 5, 0).unwrap();
        assert_eq!(dt("2026-10-19 13:05:00"), base);
        assert_eq!(dt("2026-10-19 13:05:00.250000").and_utc().timestamp_subsec_millis(), 250);
        assert_eq!(dt("2026-10-19T13:05:00"), base);
        assert_eq!(dt("2026-10-19 13:05"), base);
        assert_eq!(dt("10/19/2026 13:05:00"), base);
        assert_eq!(dt("2026-10-19").hour(), 0);
        assert!(parse_timestamp("placeholder").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn day_numbers_are_monotonic_and_invertible() {
        let a = dt("2026-10-19 00:00:00");
        let b = dt("2026-10-19 06:00:00");
        assert!((date2num(b) - date2num(a) - 0.25).abs() < 1e-9);
        assert_eq!(num2date(date2num(b)), b);
        assert_eq!(date2num(dt("1970-01-02 00:00:00")), 1.0);
    }

    #[test]
    fn none_format_blanks_labels() {
        let n = date2num(dt("2026-10-19 06:00:00"));
        assert_eq!(format_day_number(n, "%H:%M"), "06:00");
        assert_eq!(format_day_number(n, "None"), "");
    }

    #[test]
    fn daily_bins() {
        let s = bin_scale("daily");
        let lo = date2num(dt("2026-10-19 05:00:00"));
        let hi = date2num(dt("2026-10-21 23:00:00"));
        let major = s.major.ticks(lo, hi);
        assert_eq!(major.len(), 2); // 20th and 21st midnight
        let minor = s.minor.ticks(lo, hi);
        assert_eq!(num2date(minor[0]), dt("2026-10-19 06:00:00"));
    }

    #[test]
    fn quarter_hour_minor_ticks_align_to_clock() {
        let s = bin_scale("quarter-hourly");
        let lo = date2num(dt("2026-10-19 05:07:00"));
        let hi = date2num(dt("2026-10-19 06:00:00"));
        let minor: Vec<_> = s.minor.ticks(lo, hi).into_iter().map(num2date).collect();
        assert_eq!(minor, [dt("2026-10-19 05:15:00"), dt("2026-10-19 05:30:00"), dt("2026-10-19 05:45:00"), dt("2026-10-19 06:00:00")]);
    }

    #[test]
    fn monthly_and_yearly() {
        let lo = date2num(dt("2025-11-15 00:00:00"));
        let hi = date2num(dt("2026-03-02 00:00:00"));
        let months: Vec<_> = bin_scale("monthly").major.ticks(lo, hi).into_iter().map(num2date).collect();
        assert_eq!(months.first().copied(), Some(dt("2025-12-01")));
        assert_eq!(months.len(), 4);
        let years = bin_scale("yearly").major.ticks(lo, hi);
        assert_eq!(years.len(), 1);
    }

    #[test]
    fn runaway_locators_produce_nothing() {
        let lo = date2num(dt("2000-01-01"));
        let hi = date2num(dt("2026-01-01"));
        assert!(bin_scale("quarter-hourly").minor.ticks(lo, hi).is_empty());
    }
}
