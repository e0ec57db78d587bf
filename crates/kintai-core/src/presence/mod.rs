//! Presence records and the transformations the reports are built from.

pub mod aggregate;
pub mod load;

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

/// Numeric employee identifier from the attendance export.
pub type UserId = i64;

/// One user's single-day check-in/check-out pair.
///
/// Wall-clock times without a timezone. `start <= end` is not enforced;
/// rows that parse are admitted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPresence {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Per-user, per-date presence data.
///
/// Built fresh on every uncached load; the TTL cache is the only long-lived
/// holder. `BTreeMap` keeps user and date iteration deterministic.
pub type PresenceTable = BTreeMap<UserId, BTreeMap<NaiveDate, DayPresence>>;
