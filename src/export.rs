//! File exports: message history as CSV and downloaded reports.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientResult;
use crate::types::{Message, RecordId, Sender};

pub const CSV_HEADER: &str = "User,Message,Response,Timestamp";
pub const DEFAULT_CSV_FILE: &str = "chatbot_messages.csv";

/// Render user→bot exchanges as CSV.
///
/// A row is emitted only where a `user` message is immediately followed by a
/// `bot` message; anything else (including a trailing unanswered question)
/// is skipped one message at a time.
pub fn messages_to_csv(messages: &[Message]) -> String {
    let mut rows = Vec::new();
    let mut i = 0;

    while i < messages.len() {
        match (messages.get(i), messages.get(i + 1)) {
            (Some(question), Some(answer)) if question.sender == Sender::User && answer.sender == Sender::Bot => {
                rows.push(format!(
                    "{},{},{},{}",
                    question.sender,
                    quote(&question.content),
                    quote(&answer.content),
                    question.timestamp.format("%Y-%m-%d %H:%M:%S"),
                ));
                i += 2;
            }
            _ => i += 1,
        }
    }

    format!("{}\n{}", CSV_HEADER, rows.join("\n"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn write_csv(path: &Path, messages: &[Message]) -> ClientResult<usize> {
    let csv = messages_to_csv(messages);
    fs::write(path, &csv)?;
    // header line does not count
    Ok(csv.lines().count().saturating_sub(1))
}

pub fn default_report_path(id: &RecordId) -> PathBuf {
    PathBuf::from(format!("chatbot_report_{}.pdf", id))
}

pub fn write_report(path: &Path, bytes: &[u8]) -> ClientResult<()> {
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "report saved");
    Ok(())
}
