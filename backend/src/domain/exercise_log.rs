//! Filtered exercise history for a single user.

use std::fmt;
use std::num::{IntErrorKind, NonZeroUsize};

use super::{Exercise, ExerciseDate, User};

/// Rejected log limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLogLimit {
    pub value: String,
}

impl fmt::Display for InvalidLogLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit '{}' must be a positive integer", self.value)
    }
}

impl std::error::Error for InvalidLogLimit {}

/// Maximum number of entries returned in a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLimit(NonZeroUsize);

impl LogLimit {
    pub fn new(limit: usize) -> Option<Self> {
        NonZeroUsize::new(limit).map(Self)
    }

    /// Parse a limit from query text; only integers `>= 1` are accepted.
    ///
    /// Digit strings too large for `usize` saturate to `usize::MAX`.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::LogLimit;
    ///
    /// assert_eq!(LogLimit::parse("3").map(|l| l.get()), Ok(3));
    /// assert_eq!(
    ///     LogLimit::parse("99999999999999999999999").map(|l| l.get()),
    ///     Ok(usize::MAX)
    /// );
    /// assert!(LogLimit::parse("0").is_err());
    /// assert!(LogLimit::parse("-1").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidLogLimit> {
        match raw.trim().parse::<NonZeroUsize>() {
            Ok(limit) => Ok(Self(limit)),
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => Ok(Self(NonZeroUsize::MAX)),
            Err(_) => Err(InvalidLogLimit {
                value: raw.to_owned(),
            }),
        }
    }

    #[rustfmt::skip]
    pub fn get(self) -> usize { self.0.get() }
}

/// Date window and entry cap applied to a user's exercises.
///
/// Both bounds are inclusive. An inverted window (`from > to`) is not an
/// error; it simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExerciseLogFilter {
    pub from: Option<ExerciseDate>,
    pub to: Option<ExerciseDate>,
    pub limit: Option<LogLimit>,
}

impl ExerciseLogFilter {
    /// Whether `date` falls inside the window.
    pub fn includes(&self, date: ExerciseDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Filter exercises already in natural order, then truncate to the limit.
    pub fn apply<I>(&self, exercises: I) -> Vec<Exercise>
    where
        I: IntoIterator<Item = Exercise>,
    {
        let matching = exercises
            .into_iter()
            .filter(|exercise| self.includes(exercise.date()));
        match self.limit {
            Some(limit) => matching.take(limit.get()).collect(),
            None => matching.collect(),
        }
    }
}

/// Log returned for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    user: User,
    entries: Vec<Exercise>,
}

impl ExerciseLog {
    pub fn new(user: User, entries: Vec<Exercise>) -> Self {
        Self { user, entries }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn entries(&self) -> &[Exercise] {
        &self.entries
    }

    /// Number of entries returned, after filtering and limiting.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
