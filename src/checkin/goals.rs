use chrono::NaiveDate;

use crate::{
    error::CheckinError,
    storage::{block::Block, entities::GoalEntry},
};

/// Goals that can be set for a single day.
pub const MAX_GOALS: usize = 3;

/// Number of days shown in the goal history by default.
pub const DEFAULT_HISTORY_DAYS: usize = 3;

const GOAL_PREFIX: &str = "Goal";

/// Renders goals as `Goal k: text` lines, `k` being the position in `goals`.
pub fn goal_lines<S: AsRef<str>>(goals: &[S]) -> Result<Vec<String>, CheckinError> {
    if goals.is_empty() {
        return Err(CheckinError::InvalidGoals("at least one goal is required".into()));
    }
    if goals.len() > MAX_GOALS {
        return Err(CheckinError::InvalidGoals(format!(
            "at most {MAX_GOALS} goals can be set, got {}",
            goals.len()
        )));
    }

    goals
        .iter()
        .enumerate()
        .map(|(index, goal)| {
            let goal = goal.as_ref().trim();
            if goal.is_empty() {
                Err(CheckinError::InvalidGoals(format!("goal {} is blank", index + 1)))
            } else if goal.contains(['\n', '\r']) {
                Err(CheckinError::InvalidGoals(format!(
                    "goal {} spans several lines",
                    index + 1
                )))
            } else {
                Ok(format!("{GOAL_PREFIX} {}: {goal}", index + 1))
            }
        })
        .collect()
}

pub fn is_goal_line(line: &str) -> bool {
    line.starts_with(GOAL_PREFIX)
}

fn goals_of(block: &Block) -> Vec<String> {
    block
        .lines
        .iter()
        .filter(|line| is_goal_line(line))
        .cloned()
        .collect()
}

/// Last `days` blocks that carry a label and at least one goal, oldest first.
pub fn past_goals(blocks: &[Block], days: usize) -> Vec<GoalEntry> {
    let mut entries = blocks
        .iter()
        .filter(|block| !block.label.is_empty())
        .filter_map(|block| {
            let goals = goals_of(block);
            (!goals.is_empty()).then(|| GoalEntry {
                date: block.label.clone(),
                goals,
            })
        })
        .collect::<Vec<_>>();

    let keep_from = entries.len().saturating_sub(days);
    entries.split_off(keep_from)
}

/// Goal lines of the first block saved on `today`.
pub fn today_goals(blocks: &[Block], today: NaiveDate) -> Vec<String> {
    blocks
        .iter()
        .find(|block| block.is_dated(today))
        .map(goals_of)
        .unwrap_or_default()
}
