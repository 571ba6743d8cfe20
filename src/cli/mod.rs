pub mod checkin;
pub mod goals;
pub mod output;

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use checkin::{mood_reply, process_checkin_command, CheckinCommand};
use clap::{Parser, Subcommand};
use goals::{process_done_command, process_goals_command, DoneCommand, GoalsCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    checkin::{
        advice::{parse_hours, suggest_plan},
        CheckinService,
    },
    storage::{
        entities::UserName,
        record_storage::{CheckinStorage, FileCheckinStorage},
    },
    utils::{
        clock::SystemClock,
        dir::{create_application_default_path, ensure_dir, LOGS_DIR, RECORDS_DIR},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "dailycheck", version, long_about = None)]
#[command(about = "Daily check-in: keep a streak, set goals and get a study plan", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Check in for today: updates the streak and shows goals, mood reply and plan")]
    Checkin {
        #[command(flatten)]
        command: CheckinCommand,
    },
    #[command(about = "Set and review daily goals")]
    Goals {
        #[command(subcommand)]
        command: GoalsCommand,
    },
    #[command(about = "Mark today's goals as complete")]
    Done {
        #[command(flatten)]
        command: DoneCommand,
    },
    #[command(about = "Show the current streak without checking in")]
    Streak {
        #[arg(long, short, help = "Your name")]
        name: String,
    },
    #[command(about = "Get a few words for your mood")]
    Mood {
        #[arg(help = "One of Happy, Sad, Anxious, Other")]
        mood: String,
    },
    #[command(about = "Suggest a study plan for the hours you have")]
    Plan {
        #[arg(help = "Hours available for studying")]
        hours: String,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = match args.dir.clone() {
        Some(dir) => ensure_dir(dir)?,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir.join(LOGS_DIR), logging_level, args.log)?;
    debug!("Using application directory {app_dir:?}");

    let storage = FileCheckinStorage::new(app_dir.join(RECORDS_DIR))?;
    let service = CheckinService::new(storage, Box::new(SystemClock));

    let mut stdout = std::io::stdout().lock();
    run_command(args.commands, &service, &mut stdout).await
}

async fn run_command<S: CheckinStorage>(
    commands: Commands,
    service: &CheckinService<S>,
    out: &mut impl Write,
) -> Result<()> {
    match commands {
        Commands::Checkin { command } => process_checkin_command(command, service, out).await,
        Commands::Goals { command } => process_goals_command(command, service, out).await,
        Commands::Done { command } => process_done_command(command, service, out).await,
        Commands::Streak { name } => {
            let count = service.current_streak(&UserName::new(name)).await?;
            output::streak(out, count)
        }
        Commands::Mood { mood } => {
            writeln!(out, "{}", mood_reply(&mood).response())?;
            Ok(())
        }
        Commands::Plan { hours } => {
            let hours = parse_hours(&hours)?;
            writeln!(out, "{}", suggest_plan(hours))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use chrono::NaiveDate;
    use clap::Parser;

    use crate::{
        checkin::{
            advice::{mood_response, suggest_plan},
            CheckinService,
        },
        error::CheckinError,
        storage::{
            entities::{GoalEntry, LogKind, UserName},
            record_storage::{CheckinStorage, MemoryCheckinStorage},
        },
        utils::{clock::MockClock, logging::TEST_LOGGING},
    };

    use super::{run_command, Args};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2018, 7, 4).unwrap();

    fn service(storage: Arc<MemoryCheckinStorage>) -> CheckinService<Arc<MemoryCheckinStorage>> {
        let mut clock = MockClock::new();
        clock.expect_today().return_const(TEST_DATE);
        CheckinService::new(storage, Box::new(clock))
    }

    async fn run(
        service: &CheckinService<Arc<MemoryCheckinStorage>>,
        args: &[&str],
    ) -> Result<String> {
        let args = Args::try_parse_from(std::iter::once("dailycheck").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run_command(args.commands, service, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_argument_validation() {
        assert!(Args::try_parse_from(["dailycheck", "checkin", "-n", "ada", "-H", "11"]).is_err());
        assert!(Args::try_parse_from(["dailycheck", "checkin", "-n", "ada", "-H", "10"]).is_ok());
        assert!(Args::try_parse_from(["dailycheck", "goals", "set", "-n", "ada"]).is_err());
        assert!(
            Args::try_parse_from(["dailycheck", "goals", "set", "-n", "ada", "a", "b", "c", "d"])
                .is_err()
        );
        assert!(Args::try_parse_from(["dailycheck", "--log", "streak", "-n", "ada"]).is_ok());
    }

    #[tokio::test]
    async fn test_full_session() -> Result<()> {
        *TEST_LOGGING;
        let storage = Arc::new(MemoryCheckinStorage::new());
        let service = service(storage.clone());

        let first = run(&service, &["checkin", "-n", "ada", "-m", "Sad", "-H", "3"]).await?;
        assert!(first.contains("Welcome, ada!"));
        assert!(first.contains("Current Streak: 1 day(s)"));
        assert!(first.contains("No past goals found yet."));
        assert!(first.contains(mood_response("Sad")));
        assert!(first.contains(suggest_plan(3)));
        assert!(first.contains("You haven’t saved any goals today yet."));

        let saved = run(&service, &["goals", "set", "-n", "ada", "Read", " ", "Exercise"]).await?;
        assert!(saved.contains("[2] Goal 2: Exercise"));

        let second = run(&service, &["checkin", "-n", "ada"]).await?;
        assert!(second.contains("Current Streak: 1 day(s)"));
        assert!(second.contains("- Goal 1: Read"));
        assert!(second.contains("[1] Goal 1: Read"));
        assert!(second.contains(mood_response("Happy")));
        assert!(second.contains(suggest_plan(2)));

        let done = run(&service, &["done", "-n", "ada", "2", "2"]).await?;
        assert!(done.contains("Completed goals saved!"));
        let completed = storage
            .read_blocks(&UserName::from("ada"), LogKind::Completed)
            .await?;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].lines, vec!["Goal 2: Exercise"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_goals_are_not_saved() -> Result<()> {
        let storage = Arc::new(MemoryCheckinStorage::new());
        let service = service(storage.clone());

        let out = run(&service, &["goals", "set", "-n", "ada", " ", ""]).await?;
        assert!(out.contains("Please enter at least one goal."));
        assert!(storage
            .read_blocks(&UserName::from("ada"), LogKind::Goals)
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_done_needs_goals_and_valid_positions() -> Result<()> {
        let storage = Arc::new(MemoryCheckinStorage::new());
        let service = service(storage.clone());

        let out = run(&service, &["done", "-n", "ada", "1"]).await?;
        assert!(out.contains("You haven’t saved any goals today yet."));

        run(&service, &["goals", "set", "-n", "ada", "Read"]).await?;
        assert!(run(&service, &["done", "-n", "ada", "2"]).await.is_err());
        assert!(run(&service, &["done", "-n", "ada", "0"]).await.is_err());

        let out = run(&service, &["done", "-n", "ada"]).await?;
        assert!(out.contains("No goals marked."));
        assert!(storage
            .read_blocks(&UserName::from("ada"), LogKind::Completed)
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_history_json() -> Result<()> {
        let storage = Arc::new(MemoryCheckinStorage::new());
        let service = service(storage);

        run(&service, &["goals", "set", "-n", "ada", "Read"]).await?;
        let out = run(&service, &["goals", "history", "-n", "ada", "--json"]).await?;
        let entries: Vec<GoalEntry> = serde_json::from_str(&out)?;
        assert_eq!(
            entries,
            vec![GoalEntry {
                date: "2018-07-04".into(),
                goals: vec!["Goal 1: Read".into()],
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_mood_and_plan() -> Result<()> {
        let service = service(Arc::new(MemoryCheckinStorage::new()));

        let out = run(&service, &["mood", "Grumpy"]).await?;
        assert_eq!(out.trim_end(), mood_response("Other"));

        let out = run(&service, &["plan", "5"]).await?;
        assert_eq!(out.trim_end(), suggest_plan(5));

        let error = run(&service, &["plan", "lots"]).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CheckinError>(),
            Some(CheckinError::InvalidHours(_))
        ));
        Ok(())
    }
}
