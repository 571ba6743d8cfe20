//! Domain errors raised by the check-in logic. Operations return [anyhow::Result] and carry these
//! values inside, so callers that care can `downcast_ref::<CheckinError>()`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckinError {
    #[error("user name {name:?} can't be used as a record key: {reason}")]
    InvalidUser { name: String, reason: &'static str },

    #[error("streak record for {user} is malformed: {reason}")]
    MalformedStreak { user: String, reason: String },

    #[error("invalid goals: {0}")]
    InvalidGoals(String),

    #[error("no completed goals were selected")]
    NothingCompleted,

    #[error("can't use {0:?} as a number of study hours")]
    InvalidHours(String),
}
