//! Check-in logic: streaks, goal logs and the advisory helpers. [CheckinService] bridges the pure
//! functions in the submodules with a [CheckinStorage] and a [Clock].

pub mod advice;
pub mod goals;
pub mod streak;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    error::CheckinError,
    storage::{
        block::Block,
        entities::{GoalEntry, LogKind, UserName},
        record_storage::CheckinStorage,
    },
    utils::clock::Clock,
};

use streak::{current_streak, next_streak, StreakUpdate};

pub struct CheckinService<S> {
    storage: S,
    clock: Box<dyn Clock>,
}

impl<S: CheckinStorage> CheckinService<S> {
    pub fn new(storage: S, clock: Box<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Checks the user in for today. Meant to be called once per session; calling it again on the
    /// same day returns the stored streak and writes nothing.
    pub async fn update_streak(&self, user: &UserName) -> Result<StreakUpdate> {
        let today = self.today();
        let previous = self.storage.read_streak(user).await?;
        let update = next_streak(previous, today);

        if update.needs_write() {
            self.storage.write_streak(user, update.record()).await?;
        }
        info!("Streak for {user} on {today}: {update:?}");
        Ok(update)
    }

    /// Streak without checking in.
    pub async fn current_streak(&self, user: &UserName) -> Result<u32> {
        let record = self.storage.read_streak(user).await?;
        Ok(current_streak(record, self.today()))
    }

    /// Appends today's goals and returns the lines that were written.
    pub async fn save_goals<G: AsRef<str>>(&self, user: &UserName, goals: &[G]) -> Result<Vec<String>> {
        let lines = goals::goal_lines(goals)?;
        let block = Block::new(self.today(), lines);
        self.storage
            .append_block(user, LogKind::Goals, &block)
            .await?;
        Ok(block.lines)
    }

    pub async fn read_past_goals(&self, user: &UserName, days: usize) -> Result<Vec<GoalEntry>> {
        let blocks = self.storage.read_blocks(user, LogKind::Goals).await?;
        debug!("Found {} goal block(s) for {user}", blocks.len());
        Ok(goals::past_goals(&blocks, days))
    }

    pub async fn get_today_goals(&self, user: &UserName) -> Result<Vec<String>> {
        let blocks = self.storage.read_blocks(user, LogKind::Goals).await?;
        Ok(goals::today_goals(&blocks, self.today()))
    }

    /// Appends the labels of goals marked as done. Labels are stored verbatim.
    pub async fn save_completed<L: AsRef<str>>(&self, user: &UserName, labels: &[L]) -> Result<()> {
        if labels.is_empty() {
            return Err(CheckinError::NothingCompleted.into());
        }
        let lines = labels.iter().map(|l| l.as_ref().to_owned()).collect();
        let block = Block::new(self.today(), lines);
        self.storage
            .append_block(user, LogKind::Completed, &block)
            .await
    }
}
