use serde::Serialize;
use thiserror::Error;

/// Terminal failures of one delineation request. Malformed rows are not errors; they are skipped.
#[derive(Debug, Error)]
pub enum DelineationError {
    #[error("Missing file parameter")]
    MissingInput,
    #[error("Error processing file: {0}")]
    Parse(#[source] csv::Error),
    #[error("invalid start datetime '{value}', expected YYYY-MM-DD HH:MM:SS")]
    InvalidStartTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("No QRS found in the data.")]
    NoQrs,
    #[error("Not enough QRS to compute heart rate intervals.")]
    InsufficientIntervals,
    #[error("QRS onset {current_ms} ms does not follow previous onset {previous_ms} ms")]
    NonIncreasingOnset { previous_ms: u64, current_ms: u64 },
    #[error("Error calculating time indices for heart rates.")]
    TimestampMapping,
}

/// Status class the transport uses when reporting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

impl DelineationError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DelineationError::Parse(_) => ErrorClass::Server,
            _ => ErrorClass::Client,
        }
    }

    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::Client => 400,
            ErrorClass::Server => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_parse_failures_are_server_errors() {
        assert_eq!(DelineationError::MissingInput.status_code(), 400);
        assert_eq!(DelineationError::NoQrs.status_code(), 400);
        assert_eq!(DelineationError::InsufficientIntervals.status_code(), 400);
        assert_eq!(DelineationError::TimestampMapping.status_code(), 400);
        let err = DelineationError::NonIncreasingOnset {
            previous_ms: 10,
            current_ms: 10,
        };
        assert_eq!(err.class(), ErrorClass::Client);

        let bad_utf8: &[u8] = b"P,1,2,\xff\xfe,x\n";
        let csv_err = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bad_utf8)
            .records()
            .find_map(|r| r.err())
            .expect("invalid utf8 must fail");
        let err = DelineationError::Parse(csv_err);
        assert_eq!(err.class(), ErrorClass::Server);
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn error_body_carries_message() {
        let body = DelineationError::NoQrs.body();
        assert_eq!(body.error, "No QRS found in the data.");
        let js = serde_json::to_string(&body).unwrap();
        assert_eq!(js, r#"{"error":"No QRS found in the data."}"#);
    }
}
