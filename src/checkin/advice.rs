use std::fmt::Display;

use crate::error::CheckinError;

/// Moods the check-in offers. Any label outside of the first three is treated as [Mood::Other].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Other,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Anxious, Mood::Other];

    /// Exact, case sensitive match.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Happy" => Mood::Happy,
            "Sad" => Mood::Sad,
            "Anxious" => Mood::Anxious,
            _ => Mood::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Other => "Other",
        }
    }

    pub fn response(&self) -> &'static str {
        match self {
            Mood::Sad => "Hugs. Try journaling or a short walk today. 💚",
            Mood::Happy => "That’s amazing! Ride the wave and conquer your goals! ⚡",
            Mood::Anxious => "Breathe in. Breathe out. You are not your thoughts. 🌬️",
            Mood::Other => "No matter what you're feeling, you’re doing your best 💪",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn mood_response(mood: &str) -> &'static str {
    Mood::from_label(mood).response()
}

pub fn suggest_plan(hours: i64) -> &'static str {
    if hours <= 1 {
        "Try a 25-min Pomodoro and 1 quick revision."
    } else if hours <= 3 {
        "Plan: 2 Pomodoros, 10-min walk, then review notes."
    } else {
        "Go for 3 focused sessions. Practice + revise + relax."
    }
}

/// Coerces user input into a whole number of hours.
pub fn parse_hours(value: &str) -> Result<i64, CheckinError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| CheckinError::InvalidHours(value.to_owned()))
}
