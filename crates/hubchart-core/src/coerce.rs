// File: crates/hubchart-core/src/coerce.rs
// Summary: Coerces observation cells into the numeric domain: state words to 0/1,
// the device "unavailable" sentinel and any non-numeric residue to NaN.

use crate::ingest::Row;

/// Literal stored for a cell with no numeric meaning.
pub const NAN_TOKEN: &str = "NaN";
/// Device-level "unavailable" sentinel.
pub const UNAVAILABLE: &str = "-99.0";

const STATE_TABLE: [(&str, &str); 15] = [
    ("true", "1"),
    ("false", "0"),
    ("open", "1"),
    ("closed", "0"),
    ("on", "1"),
    ("off", "0"),
    ("locked", "1"),
    ("unlocked", "0"),
    ("up", "1"),
    ("down", "0"),
    ("1", "1"),
    ("0", "0"),
    ("heat", "1"),
    ("armed", "1"),
    ("disarmed", "0"),
];

/// Coerce a single value cell.
pub fn coerce_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == UNAVAILABLE {
        return NAN_TOKEN.to_string();
    }
    let folded = trimmed.to_lowercase();
    if let Some((_, v)) = STATE_TABLE.iter().find(|(k, _)| *k == folded) {
        return (*v).to_string();
    }
    match trimmed.parse::<f64>() {
        Ok(v) if !v.is_nan() => trimmed.to_string(),
        _ => NAN_TOKEN.to_string(),
    }
}

/// Coerce every value cell; row 0 (the header) is left untouched.
pub fn convert_the_data(mut rows: Vec<Row>) -> Vec<Row> {
    for row in rows.iter_mut().skip(1) {
        row.1 = coerce_value(&row.1);
    }
    rows
}

/// Numeric view of already-coerced value cells (header excluded).
pub fn to_numbers(rows: &[Row]) -> Vec<f64> {
    rows.iter()
        .skip(1)
        .map(|(_, v)| v.parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}
