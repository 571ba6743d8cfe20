use std::io::Write;

use anyhow::Result;
use clap::{CommandFactory, Subcommand};

use crate::{
    checkin::{goals::DEFAULT_HISTORY_DAYS, CheckinService},
    storage::{entities::UserName, record_storage::CheckinStorage},
};

use super::{checkin::NO_GOALS_TODAY, output, Args};

#[derive(Debug, Subcommand)]
pub enum GoalsCommand {
    #[command(about = "Save up to 3 goals for today")]
    Set {
        #[arg(long, short, help = "Your name")]
        name: String,
        #[arg(required = true, num_args = 1..=3, help = "Goals for today, blank ones are ignored")]
        goals: Vec<String>,
    },
    #[command(about = "Show the goals saved today")]
    Today {
        #[arg(long, short, help = "Your name")]
        name: String,
    },
    #[command(about = "Show goals of the last days they were saved")]
    History {
        #[arg(long, short, help = "Your name")]
        name: String,
        #[arg(long, short, default_value_t = DEFAULT_HISTORY_DAYS, help = "How many days to show")]
        days: usize,
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct DoneCommand {
    #[arg(long, short, help = "Your name")]
    name: String,
    #[arg(help = "Positions of today's goals that are complete, as listed by `goals today`")]
    positions: Vec<usize>,
}

pub async fn process_goals_command<S: CheckinStorage>(
    command: GoalsCommand,
    service: &CheckinService<S>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        GoalsCommand::Set { name, goals } => {
            let goals = goals
                .into_iter()
                .filter(|g| !g.trim().is_empty())
                .collect::<Vec<_>>();
            if goals.is_empty() {
                output::notice(out, "Please enter at least one goal.")?;
                return Ok(());
            }
            let lines = service.save_goals(&UserName::new(name), &goals).await?;
            output::numbered_goals(out, &lines)?;
            output::success(out, "Your goals have been saved successfully!")
        }
        GoalsCommand::Today { name } => {
            let goals = service.get_today_goals(&UserName::new(name)).await?;
            if goals.is_empty() {
                output::notice(out, NO_GOALS_TODAY)
            } else {
                output::numbered_goals(out, &goals)
            }
        }
        GoalsCommand::History { name, days, json } => {
            let entries = service.read_past_goals(&UserName::new(name), days).await?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &entries)?;
                writeln!(out)?;
                Ok(())
            } else if entries.is_empty() {
                output::notice(out, "No past goals found yet. Save some today!")
            } else {
                output::goal_history(out, &entries)
            }
        }
    }
}

/// Marks goals from today's list as complete. Positions work like the checkboxes of a form: order
/// and repetitions don't matter.
pub async fn process_done_command<S: CheckinStorage>(
    DoneCommand {
        name,
        mut positions,
    }: DoneCommand,
    service: &CheckinService<S>,
    out: &mut impl Write,
) -> Result<()> {
    let user = UserName::new(name);
    let goals = service.get_today_goals(&user).await?;
    if goals.is_empty() {
        return output::notice(out, NO_GOALS_TODAY);
    }

    positions.sort_unstable();
    positions.dedup();
    let mut completed = Vec::with_capacity(positions.len());
    for position in positions {
        let Some(goal) = position.checked_sub(1).and_then(|i| goals.get(i)) else {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!(
                        "There is no goal {position} today, pick between 1 and {}",
                        goals.len()
                    ),
                )
                .into());
        };
        completed.push(goal.clone());
    }

    if completed.is_empty() {
        return output::notice(out, "No goals marked.");
    }
    service.save_completed(&user, &completed).await?;
    output::success(out, "Completed goals saved!")
}
