//! Small helpers that keep the console output consistent between commands.

use std::io::Write;

use ansi_term::{Colour, Style};
use anyhow::Result;

use crate::storage::entities::GoalEntry;

pub fn heading(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", Style::new().bold().paint(text))?;
    Ok(())
}

pub fn success(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", Colour::Green.paint(text))?;
    Ok(())
}

pub fn notice(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", Colour::Cyan.paint(text))?;
    Ok(())
}

pub fn streak(out: &mut impl Write, count: u32) -> Result<()> {
    writeln!(
        out,
        "🔥 {}",
        Colour::Yellow
            .bold()
            .paint(format!("Current Streak: {count} day(s)"))
    )?;
    Ok(())
}

pub fn goal_history(out: &mut impl Write, entries: &[GoalEntry]) -> Result<()> {
    for entry in entries {
        writeln!(out, "📅 {}", Style::new().bold().paint(&entry.date))?;
        for goal in &entry.goals {
            writeln!(out, "- {goal}")?;
        }
        writeln!(out, "---")?;
    }
    Ok(())
}

/// Numbered so that `done` can refer to goals by position.
pub fn numbered_goals(out: &mut impl Write, goals: &[String]) -> Result<()> {
    for (index, goal) in goals.iter().enumerate() {
        writeln!(out, "[{}] {goal}", index + 1)?;
    }
    Ok(())
}
