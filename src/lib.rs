//! Small cli for checking in every day. It keeps a streak of consecutive days, stores up to three
//! goals per day in plain text logs and offers a few words for the mood and a study plan for the
//! hours at hand.
//!

pub mod checkin;
pub mod cli;
pub mod error;
pub mod storage;
pub mod utils;
