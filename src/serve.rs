//! Request loop: one JSON request per input line, one record per output line.
//!
//! Only I/O failures of the reader or writer end the loop. A line that is not
//! UTF-8, not JSON, or fails scoring becomes a rejection record.

use crate::config::ReportFormat;
use crate::error::ScoreError;
use crate::features::TransactionRequest;
use crate::logging::{ScoreRecord, StructuredLogger};
use crate::risk::ScoreResult;
use crate::scorer::FraudScorer;
use chrono::Utc;
use std::io::{BufRead, Write};
use tracing::{error, warn};
use uuid::Uuid;

/// Counts reported when the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    pub scored: u64,
    pub rejected: u64,
}

fn decode(raw: Vec<u8>) -> Result<TransactionRequest, ScoreError> {
    let line = String::from_utf8(raw)
        .map_err(|e| ScoreError::InvalidInput(format!("request is not valid UTF-8: {e}")))?;
    serde_json::from_str(&line).map_err(|e| ScoreError::InvalidInput(format!("malformed request: {e}")))
}

fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(|b| b.is_ascii_whitespace())
}

fn score_line(scorer: &FraudScorer, raw: Vec<u8>) -> (Option<String>, Result<ScoreResult, ScoreError>) {
    match decode(raw) {
        Ok(request) => {
            let outcome = scorer.analyze_request(&request);
            (request.id, outcome)
        }
        Err(e) => (None, Err(e)),
    }
}

pub fn serve_lines(
    scorer: &FraudScorer,
    report: ReportFormat,
    reader: impl BufRead,
    mut writer: impl Write,
) -> std::io::Result<ServeSummary> {
    let mut summary = ServeSummary::default();

    for raw in reader.split(b'\n') {
        let raw = raw?;
        if is_blank(&raw) {
            continue;
        }
        let (id, outcome) = score_line(scorer, raw);
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let ts = Utc::now().to_rfc3339();

        match outcome {
            Ok(result) => {
                summary.scored += 1;
                match report {
                    ReportFormat::Text => writeln!(writer, "[{id}]\n{result}")?,
                    ReportFormat::Json => {
                        let record = ScoreRecord { id: &id, ts, result: Some(&result), error: None };
                        StructuredLogger::emit_json(&record, &mut writer)?;
                    }
                }
            }
            Err(e) => {
                summary.rejected += 1;
                if e.is_fatal() {
                    error!(id = %id, error = %e, "request failed on a collaborator contract violation");
                } else {
                    warn!(id = %id, error = %e, "request rejected");
                }
                match report {
                    ReportFormat::Text => writeln!(writer, "[{id}]\nRejected: {e}\n")?,
                    ReportFormat::Json => {
                        let record = ScoreRecord { id: &id, ts, result: None, error: Some(e.to_string()) };
                        StructuredLogger::emit_json(&record, &mut writer)?;
                    }
                }
            }
        }
        writer.flush()?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carriage_return_and_spaces_are_blank() {
        assert!(is_blank(b"  \r"));
        assert!(!is_blank(b" {}"));
    }

    #[test]
    fn decode_distinguishes_encoding_from_syntax() {
        let err = decode(b"{\"amount\": \xff}".to_vec()).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
        let err = decode(b"{\"amount\": }".to_vec()).unwrap_err();
        assert!(err.to_string().contains("malformed request"));
        let req = decode(b"{\"id\": \"x\", \"amount\": 3}\r".to_vec()).unwrap();
        assert_eq!(req.amount, Some(3.0));
    }
}
