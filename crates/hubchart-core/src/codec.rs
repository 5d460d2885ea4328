// File: crates/hubchart-core/src/codec.rs
// Summary: Opaque text codec for driver -> worker payloads and worker -> driver log records.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload structure is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode any serializable value as a single argv-safe token.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(STANDARD.encode(bytes))
}

/// Inverse of [`encode`]. Surrounding whitespace (a trailing newline on stdout) is ignored.
pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T, CodecError> {
    let bytes = STANDARD.decode(token.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogRecord;

    #[test]
    fn token_has_no_whitespace_or_quotes() {
        let token = encode(&vec!["a b", "\"quoted\"", "line\nbreak"]).unwrap();
        assert!(!token.contains(char::is_whitespace));
        assert!(!token.contains('"'));
    }

    #[test]
    fn log_record_survives_stdout_newline() {
        let mut log = LogRecord::new();
        log.info("done");
        let token = format!("{}\n", encode(&log).unwrap());
        let back: LogRecord = decode(&token).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(decode::<LogRecord>("***"), Err(CodecError::Base64(_))));
        let not_json = STANDARD.encode(b"not json");
        assert!(matches!(decode::<LogRecord>(&not_json), Err(CodecError::Json(_))));
    }
}
