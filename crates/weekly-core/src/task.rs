use chrono::{Duration, NaiveDate};

/// Length of the "last week" and "next week" classification windows.
pub const WINDOW_DAYS: i64 = 7;

/// Extra lookback when fetching, so already-completed tasks from the
/// previous week are still returned by the provider.
pub const FETCH_LOOKBACK_DAYS: i64 = 14;

/// A normalized unit of tracked work, valid for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    /// Calendar due date; tasks without one are never time-classified.
    pub due_on: Option<NaiveDate>,
    /// Free-text blocker annotation; non-empty means the task is blocked.
    pub blocker: Option<String>,
}

/// Time bucket a task falls into relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Due within the seven days before the reference date.
    LastWeek,
    /// Due within the seven days after the reference date.
    NextWeek,
}

/// Outcome of classifying one task against a reference date.
///
/// The time bucket and the blocked flag are orthogonal: a task can be
/// both upcoming and blocked, or blocked with no due date at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub bucket: Option<Bucket>,
    pub blocked: bool,
}

/// Classify a task relative to `reference_date` (the calendar date
/// treated as "today" for this invocation).
///
/// The last-week window is `[reference_date - 7d, reference_date)` and
/// the next-week window is `(reference_date, reference_date + 7d]`.
/// Neither window contains the reference date itself, so a task due
/// exactly today lands in no bucket. This is deliberate.
#[must_use]
pub fn classify(task: &Task, reference_date: NaiveDate) -> Classification {
    let window = Duration::days(WINDOW_DAYS);

    let bucket = task.due_on.and_then(|due| {
        if reference_date - window <= due && due < reference_date {
            Some(Bucket::LastWeek)
        } else if reference_date < due && due <= reference_date + window {
            Some(Bucket::NextWeek)
        } else {
            None
        }
    });

    let blocked = task.blocker.as_deref().is_some_and(|b| !b.is_empty());

    Classification { bucket, blocked }
}

/// Provider fetch window for one invocation: fourteen days back (the
/// classification week plus completion margin) through seven days ahead.
#[must_use]
pub fn fetch_window(reference_date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        reference_date - Duration::days(FETCH_LOOKBACK_DAYS),
        reference_date + Duration::days(WINDOW_DAYS),
    )
}
