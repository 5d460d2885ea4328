// File: crates/hubchart-core/src/limits.rs
// Summary: Automatic axis limits derived from the values a chart must show.

/// Finite (min, max) of `data`, or None when nothing finite is present.
pub fn data_range(data: &[f64]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in data.iter().copied().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo <= hi).then_some((lo, hi))
}

/// Slack factor `1 / |v|^1.25` applied multiplicatively to an extreme.
fn slack(v: f64) -> f64 {
    1.0 / v.abs().powf(1.25)
}

/// Lower limit below `v`. Zero extremes become 1e-6 first.
pub fn padded_min(v: f64) -> f64 {
    let v = if v == 0.0 { 1e-6 } else { v };
    if v > 0.0 { v * (1.0 - slack(v)) } else { v * (1.0 + slack(v)) }
}

/// Upper limit above `v`. Zero extremes become 1e-6 first.
pub fn padded_max(v: f64) -> f64 {
    let v = if v == 0.0 { 1e-6 } else { v };
    if v > 0.0 { v * (1.0 + slack(v)) } else { v * (1.0 - slack(v)) }
}

/// Axis limits: each side uses the wanted literal when given, else the padded extreme.
/// With no finite data the unset sides fall back to 0 and 1.
pub fn auto_limits(data: &[f64], want_min: Option<f64>, want_max: Option<f64>) -> (f64, f64) {
    match data_range(data) {
        Some((lo, hi)) => (
            want_min.unwrap_or_else(|| padded_min(lo)),
            want_max.unwrap_or_else(|| padded_max(hi)),
        ),
        None => (want_min.unwrap_or(0.0), want_max.unwrap_or(1.0)),
    }
}

/// Data range padded by `margin` (fraction of the span) on both sides; a single point gets `min_span`.
pub fn padded_range(data: &[f64], margin: f64, min_span: f64) -> Option<(f64, f64)> {
    let (lo, hi) = data_range(data)?;
    if hi - lo < 1e-12 {
        return Some((lo - min_span / 2.0, hi + min_span / 2.0));
    }
    let m = (hi - lo) * margin;
    Some((lo - m, hi + m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_contain_the_data() {
        let samples: [&[f64]; 6] = [
            &[0.0, 5.0, 0.0],
            &[-3.0, 2.0],
            &[0.001, 0.002],
            &[-500.0, -20.0],
            &[1.0],
            &[72.5, 68.0, f64::NAN, 80.25],
        ];
        for data in samples {
            let (lo, hi) = auto_limits(data, None, None);
            let (dmin, dmax) = data_range(data).unwrap();
            assert!(lo <= dmin, "{lo} > {dmin} for {data:?}");
            assert!(hi >= dmax, "{hi} < {dmax} for {data:?}");
        }
    }

    #[test]
    fn wanted_values_win() {
        assert_eq!(auto_limits(&[1.0, 2.0], Some(-10.0), Some(10.0)), (-10.0, 10.0));
        let (lo, hi) = auto_limits(&[10.0, 20.0], Some(0.0), None);
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);
    }

    #[test]
    fn slack_shrinks_with_magnitude() {
        assert_eq!(padded_max(1.0), 2.0);
        assert_eq!(padded_min(1.0), 0.0);
        assert!((padded_max(100.0) - 100.0) < 0.5);
    }

    #[test]
    fn empty_data_falls_back() {
        assert_eq!(auto_limits(&[], None, None), (0.0, 1.0));
        assert_eq!(auto_limits(&[f64::NAN], None, Some(4.0)), (0.0, 4.0));
    }

    #[test]
    fn single_point_range() {
        assert_eq!(padded_range(&[3.0], 0.05, 1.0), Some((2.5, 3.5)));
        assert_eq!(padded_range(&[], 0.05, 1.0), None);
    }
}
