use chrono::NaiveDate;

use crate::{storage::entities::StreakRecord, utils::time::previous_day};

/// Outcome of checking in on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// First check-in ever.
    Started(StreakRecord),
    /// Last check-in was yesterday.
    Extended(StreakRecord),
    /// Already checked in today. Nothing has to be written.
    Unchanged(StreakRecord),
    /// A day or more was missed, or the stored date lies in the future.
    Reset(StreakRecord),
}

impl StreakUpdate {
    pub fn record(&self) -> StreakRecord {
        match *self {
            StreakUpdate::Started(r)
            | StreakUpdate::Extended(r)
            | StreakUpdate::Unchanged(r)
            | StreakUpdate::Reset(r) => r,
        }
    }

    pub fn count(&self) -> u32 {
        self.record().count
    }

    pub fn needs_write(&self) -> bool {
        !matches!(self, StreakUpdate::Unchanged(_))
    }
}

pub fn next_streak(previous: Option<StreakRecord>, today: NaiveDate) -> StreakUpdate {
    let Some(previous) = previous else {
        return StreakUpdate::Started(StreakRecord::first(today));
    };

    if previous.last_active == today {
        StreakUpdate::Unchanged(previous)
    } else if previous.last_active == previous_day(today) {
        StreakUpdate::Extended(StreakRecord {
            last_active: today,
            count: previous.count.saturating_add(1),
        })
    } else {
        StreakUpdate::Reset(StreakRecord::first(today))
    }
}

/// Streak as it stands today without checking in. A streak whose last day is before yesterday is
/// already broken.
pub fn current_streak(record: Option<StreakRecord>, today: NaiveDate) -> u32 {
    match record {
        Some(r) if r.last_active == today || r.last_active == previous_day(today) => r.count,
        _ => 0,
    }
}
