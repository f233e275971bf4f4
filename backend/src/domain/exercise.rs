//! Exercise entries logged against a user.
//!
//! The value types in this module validate their input once at construction,
//! so services and adapters can pass them around without re-checking.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use super::UserId;

/// Maximum allowed length for an exercise description, in characters.
pub const DESCRIPTION_MAX: usize = 500;
/// Smallest accepted duration, in minutes.
pub const DURATION_MIN: u32 = 1;
/// Largest accepted duration, in minutes (one day).
pub const DURATION_MAX: u32 = 1440;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";
/// Years a date may fall in: four digits, all storable in a PostgreSQL `DATE`.
const DATE_YEARS: RangeInclusive<i32> = 1..=9999;

/// Validation errors returned by the exercise constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseValidationError {
    EmptyDescription,
    DescriptionTooLong { max: usize },
    DurationOutOfRange { min: u32, max: u32 },
    InvalidDate { value: String },
}

impl fmt::Display for ExerciseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::DurationOutOfRange { min, max } => write!(
                f,
                "duration must be a whole number of minutes between {min} and {max}"
            ),
            Self::InvalidDate { value } => write!(f, "date '{value}' is not a valid date"),
        }
    }
}

impl std::error::Error for ExerciseValidationError {}

/// Identifier of a stored exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Generate a new random [`ExerciseId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text description of what was done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`], trimming surrounding
    /// whitespace.
    pub fn new(description: impl AsRef<str>) -> Result<Self, ExerciseValidationError> {
        let trimmed = description.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        if trimmed.chars().count() > DESCRIPTION_MAX {
            return Err(ExerciseValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Exercise duration in whole minutes.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::DurationMinutes;
///
/// assert_eq!(DurationMinutes::new(30).map(|d| d.get()), Ok(30));
/// assert!(DurationMinutes::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DurationMinutes(u32);

impl DurationMinutes {
    pub fn new(minutes: u32) -> Result<Self, ExerciseValidationError> {
        if (DURATION_MIN..=DURATION_MAX).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(ExerciseValidationError::DurationOutOfRange {
                min: DURATION_MIN,
                max: DURATION_MAX,
            })
        }
    }

    /// Validate a signed value, as read back from an `INTEGER` column.
    pub fn from_i64(minutes: i64) -> Result<Self, ExerciseValidationError> {
        let minutes = u32::try_from(minutes).map_err(|_| {
            ExerciseValidationError::DurationOutOfRange {
                min: DURATION_MIN,
                max: DURATION_MAX,
            }
        })?;
        Self::new(minutes)
    }

    #[rustfmt::skip]
    pub fn get(self) -> u32 { self.0 }
}

impl fmt::Display for DurationMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar day an exercise was performed on.
///
/// Rendered in the fixed form `"Mon Jan 01 2024"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseDate(NaiveDate);

impl ExerciseDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse user supplied date text.
    ///
    /// Accepted forms, tried in order: `2024-01-01`, an RFC 3339 timestamp
    /// (its UTC calendar date), and the rendered form `Mon Jan 01 2024`.
    /// The year must lie in `1..=9999`.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::ExerciseDate;
    ///
    /// let date = ExerciseDate::parse("2024-01-01").expect("ISO date");
    /// assert_eq!(date.to_string(), "Mon Jan 01 2024");
    /// assert_eq!(ExerciseDate::parse("Mon Jan 01 2024"), Ok(date));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ExerciseValidationError> {
        let trimmed = raw.trim();
        let parsed = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
            })
            .or_else(|| NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT).ok());
        parsed
            .filter(|date| DATE_YEARS.contains(&date.year()))
            .map(Self)
            .ok_or_else(|| ExerciseValidationError::InvalidDate {
                value: raw.to_owned(),
            })
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_DATE_FORMAT))
    }
}

impl From<NaiveDate> for ExerciseDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// Validated input for a new exercise, before the date default is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub description: Description,
    pub duration: DurationMinutes,
    pub date: Option<ExerciseDate>,
}

/// Exercise logged against a user.
///
/// ## Invariants
/// - `user_id` referenced an existing user when the exercise was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    user_id: UserId,
    description: Description,
    duration: DurationMinutes,
    date: ExerciseDate,
}

impl Exercise {
    pub fn new(
        id: ExerciseId,
        user_id: UserId,
        description: Description,
        duration: DurationMinutes,
        date: ExerciseDate,
    ) -> Self {
        Self {
            id,
            user_id,
            description,
            duration,
            date,
        }
    }

    /// Create a new exercise from a draft, falling back to `today` when the
    /// draft carries no date.
    pub fn from_draft(user_id: UserId, draft: ExerciseDraft, today: ExerciseDate) -> Self {
        let ExerciseDraft {
            description,
            duration,
            date,
        } = draft;
        Self::new(
            ExerciseId::random(),
            user_id,
            description,
            duration,
            date.unwrap_or(today),
        )
    }

    pub fn id(&self) -> ExerciseId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    pub fn date(&self) -> ExerciseDate {
        self.date
    }
}
