use std::{fmt::Display, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time::{format_date, parse_date};

/// Display name of a user. It is also the key that selects the user's records, so two people
/// typing the same name share a streak and goal history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserName(Arc<str>);

impl UserName {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Last day a user checked in and how many consecutive days led up to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub last_active: NaiveDate,
    pub count: u32,
}

impl StreakRecord {
    pub fn first(today: NaiveDate) -> Self {
        Self {
            last_active: today,
            count: 1,
        }
    }

    /// Two lines: ISO date, then the count.
    pub fn to_text(&self) -> String {
        format!("{}\n{}", format_date(self.last_active), self.count)
    }

    /// Reverse of [StreakRecord::to_text]. The error is a human readable reason, the caller
    /// attaches the user it belongs to.
    pub fn from_text(text: &str) -> Result<Self, String> {
        let mut lines = text.lines();
        let date_line = lines.next().ok_or("record is empty")?;
        let count_line = lines.next().ok_or("count line is missing")?;

        let last_active = parse_date(date_line).map_err(|e| e.to_string())?;
        let count = count_line
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("can't parse count {count_line:?}: {e}"))?;
        if count == 0 {
            return Err("count must be at least 1".into());
        }

        Ok(Self { last_active, count })
    }
}

/// The two append-only logs kept per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Goals,
    Completed,
}

impl LogKind {
    pub fn file_suffix(&self) -> &'static str {
        match self {
            LogKind::Goals => "goals",
            LogKind::Completed => "completed",
        }
    }
}

/// Goals saved for one day, as read back from the goal log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    pub date: String,
    pub goals: Vec<String>,
}
