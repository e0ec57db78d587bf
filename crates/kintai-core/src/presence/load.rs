//! CSV attendance loader.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};

use super::{DayPresence, PresenceTable, UserId};
use crate::error::CoreResult;

/// ## Summary
/// Reads the attendance CSV into a [`PresenceTable`], grouped by user id.
///
/// Each line must have exactly 4 comma-separated fields: user id,
/// `YYYY-MM-DD` date, `HH:MM:SS` start and end. Lines with any other field
/// count are skipped silently (header and footer lines). A 4-field line
/// where any field fails to parse is dropped whole with a debug diagnostic;
/// a line is never partially admitted.
///
/// ## Errors
/// Returns an error if the file cannot be opened. Malformed content alone
/// never fails the load; an empty or fully malformed file yields an empty
/// table.
pub fn load_presence(path: &Path) -> CoreResult<PresenceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut table = PresenceTable::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(line, %err, "unreadable record, skipping");
                continue;
            }
        };
        if record.len() != 4 {
            // header and footer lines
            continue;
        }
        match parse_row(&record) {
            Some((user_id, date, day)) => {
                table.entry(user_id).or_default().insert(date, day);
            }
            None => {
                tracing::debug!(line, row = ?record, "malformed row, skipping");
            }
        }
    }
    Ok(table)
}

fn parse_row(record: &csv::StringRecord) -> Option<(UserId, NaiveDate, DayPresence)> {
    let user_id = record.get(0)?.trim().parse::<UserId>().ok()?;
    let date = NaiveDate::parse_from_str(record.get(1)?, "%Y-%m-%d").ok()?;
    let start = NaiveTime::parse_from_str(record.get(2)?, "%H:%M:%S").ok()?;
    let end = NaiveTime::parse_from_str(record.get(3)?, "%H:%M:%S").ok()?;
    Some((user_id, date, DayPresence { start, end }))
}
