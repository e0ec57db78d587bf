//! Background roster refresh.
//!
//! An explicitly started task rather than an import-time side effect:
//! [`spawn_refresh`] ticks once a minute and fires the roster download when
//! the configured cron-like fields match the local time.

use std::time::Duration;

use chrono::{DateTime, Datelike, Local, Timelike};
use kintai_core::config::{RefreshConfig, Settings};
use kintai_core::error::CoreError;
use kintai_core::roster::fetch_roster;
use tokio::task::JoinHandle;

use crate::error::AppResult;

/// One cron-style field: `*`, `*/n`, `a,b,c`, or a single number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CronField {
    Any,
    Step(u32),
    List(Vec<u32>),
}

impl CronField {
    /// ## Summary
    /// Parses a cron-like field pattern.
    ///
    /// ## Errors
    /// Returns an invalid-configuration error for anything that is not `*`,
    /// `*/n` with n > 0, a number, or a comma list of numbers.
    pub fn parse(pattern: &str) -> Result<Self, CoreError> {
        let pattern = pattern.trim();
        if pattern == "*" {
            return Ok(Self::Any);
        }
        if let Some(step) = pattern.strip_prefix("*/") {
            let step = step
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    CoreError::InvalidConfiguration(format!("bad cron step: {pattern}"))
                })?;
            return Ok(Self::Step(step));
        }
        let values = pattern
            .split(',')
            .map(|raw| raw.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_err| {
                CoreError::InvalidConfiguration(format!("bad cron field: {pattern}"))
            })?;
        Ok(Self::List(values))
    }

    #[must_use]
    pub fn matches(&self, value: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Step(step) => value % step == 0,
            Self::List(values) => values.contains(&value),
        }
    }
}

/// Day-of-week (0 = Monday), hour, and minute patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSchedule {
    day_of_week: CronField,
    hour: CronField,
    minute: CronField,
}

impl RefreshSchedule {
    /// ## Errors
    /// Returns an error if any field pattern is invalid.
    pub fn from_config(config: &RefreshConfig) -> AppResult<Self> {
        Ok(Self {
            day_of_week: CronField::parse(&config.day_of_week)?,
            hour: CronField::parse(&config.hour)?,
            minute: CronField::parse(&config.minute)?,
        })
    }

    fn matches(&self, now: &DateTime<Local>) -> bool {
        self.day_of_week
            .matches(now.weekday().num_days_from_monday())
            && self.hour.matches(now.hour())
            && self.minute.matches(now.minute())
    }
}

/// ## Summary
/// Starts the periodic roster download task. The schedule is checked once a
/// minute and fires at most once per matching minute; a failed download is
/// logged inside the fetch and retried on the next matching tick.
///
/// ## Errors
/// Returns an error if the configured schedule patterns are invalid.
pub fn spawn_refresh(settings: &Settings) -> AppResult<JoinHandle<()>> {
    let schedule = RefreshSchedule::from_config(&settings.refresh)?;
    let roster = settings.roster.clone();

    Ok(tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        let mut last_fired: Option<(u32, u32, u32)> = None;
        loop {
            ticker.tick().await;
            let now = Local::now();
            let stamp = (now.ordinal(), now.hour(), now.minute());
            if schedule.matches(&now) && last_fired != Some(stamp) {
                last_fired = Some(stamp);
                fetch_roster(&client, &roster.url, roster.method, &roster.xml_path).await;
            }
        }
    }))
}
