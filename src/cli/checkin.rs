use std::io::Write;

use anyhow::Result;
use tracing::warn;

use crate::{
    checkin::{
        advice::{suggest_plan, Mood},
        goals::DEFAULT_HISTORY_DAYS,
        CheckinService,
    },
    storage::{entities::UserName, record_storage::CheckinStorage},
};

use super::output;

pub const NO_GOALS_TODAY: &str = "You haven’t saved any goals today yet.";

#[derive(Debug, clap::Args)]
pub struct CheckinCommand {
    #[arg(long, short, help = "Your name. Streaks and goals are kept per name")]
    name: String,
    #[arg(
        long,
        short,
        default_value = "Happy",
        help = "How are you feeling today? One of Happy, Sad, Anxious, Other"
    )]
    mood: String,
    #[arg(
        long,
        short = 'H',
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(0..=10),
        help = "How many hours can you study today?"
    )]
    hours: u8,
}

/// Runs a whole check-in session: the streak is updated once, then history, mood, plan and today's
/// goals are shown.
pub async fn process_checkin_command<S: CheckinStorage>(
    CheckinCommand { name, mood, hours }: CheckinCommand,
    service: &CheckinService<S>,
    out: &mut impl Write,
) -> Result<()> {
    let user = UserName::new(name);

    output::success(out, &format!("Welcome, {user}! Let’s check in."))?;
    let update = service.update_streak(&user).await?;
    output::streak(out, update.count())?;

    output::heading(
        out,
        &format!("🕒 Your Last {DEFAULT_HISTORY_DAYS} Days of Goals"),
    )?;
    let past = service
        .read_past_goals(&user, DEFAULT_HISTORY_DAYS)
        .await?;
    if past.is_empty() {
        output::notice(out, "No past goals found yet. Save some today!")?;
    } else {
        output::goal_history(out, &past)?;
    }

    output::heading(out, &format!("How are you feeling today? {mood}"))?;
    output::notice(out, mood_reply(&mood).response())?;

    output::heading(out, &format!("Study plan for {hours} hour(s)"))?;
    writeln!(out, "{}", suggest_plan(hours.into()))?;

    output::heading(out, "✅ Today's Goals")?;
    let today = service.get_today_goals(&user).await?;
    if today.is_empty() {
        output::notice(out, NO_GOALS_TODAY)?;
    } else {
        output::numbered_goals(out, &today)?;
    }

    writeln!(out)?;
    writeln!(out, "🧠 End of today’s check-in. Great work!")?;
    Ok(())
}

/// Looks up the mood, noting when an unknown label falls back to [Mood::Other].
pub fn mood_reply(label: &str) -> Mood {
    let mood = Mood::from_label(label);
    if mood == Mood::Other && label != Mood::Other.label() {
        warn!("Unknown mood {label:?}, answering as {}", Mood::Other);
    }
    mood
}
