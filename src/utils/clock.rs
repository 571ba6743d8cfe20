use chrono::{DateTime, Local, NaiveDate};

/// Represents an entity responsible for providing dates across application. This allows tests to
/// pin "today" to a fixed calendar day.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Local>;

    /// Local calendar day. Streaks and goal blocks are keyed by it.
    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }
}
