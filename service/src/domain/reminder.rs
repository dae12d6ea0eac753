//! [`Reminder`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, TimeOfDay};
use derive_more::{AsRef, Display, From, Into};
use itertools::Itertools as _;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{send_log, Email};

/// Dated reminder notifying its recipients according to its [`Schedule`]s.
#[derive(Clone, Debug)]
pub struct Reminder {
    /// ID of this [`Reminder`].
    pub id: Id,

    /// [`Date`] this [`Reminder`] is about.
    pub due_date: Date,

    /// [`Description`] of this [`Reminder`].
    pub description: Description,

    /// Indicator whether this [`Reminder`] is evaluated by the scheduler.
    pub active: bool,

    /// Free-form [`Kind`] of this [`Reminder`].
    pub kind: Kind,

    /// [`Schedule`]s of this [`Reminder`] in their order.
    pub schedules: Vec<Schedule>,

    /// Recipients of this [`Reminder`].
    pub recipients: Vec<Email>,

    /// [`DateTime`] when this [`Reminder`] was created.
    pub created_at: CreationDateTime,
}

impl Reminder {
    /// Returns the [`Schedule`]s of this [`Reminder`] due on `today` at the
    /// provided wall-clock `now`.
    ///
    /// Nothing is due for an inactive [`Reminder`].
    pub fn due_schedules(
        &self,
        today: Date,
        now: TimeOfDay,
    ) -> impl Iterator<Item = &Schedule> + '_ {
        self.schedules
            .iter()
            .filter(move |s| self.active && s.is_due(self.due_date, today, now))
    }
}

/// Returns the first [`send_log::Label`] repeated among the provided
/// [`Schedule`]s, if any.
#[must_use]
pub fn duplicate_label(schedules: &[Schedule]) -> Option<&send_log::Label> {
    schedules.iter().map(|s| &s.label).duplicates().next()
}

/// ID of a [`Reminder`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for Id {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Description of a [`Reminder`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 4096
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Free-form kind of a [`Reminder`] (like `contract`, `certificate`).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Kind(String);

impl Kind {
    /// Creates a new [`Kind`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `kind` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Creates a new [`Kind`] if the given `kind` is valid.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        Self::check(&kind).then_some(Self(kind))
    }

    /// Checks whether the given `kind` is a valid [`Kind`].
    fn check(kind: impl AsRef<str>) -> bool {
        let kind = kind.as_ref();
        kind.trim() == kind && !kind.is_empty() && kind.len() <= 64
    }
}

impl FromStr for Kind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Kind`")
    }
}

/// Point in time relative to [`Reminder::due_date`] when its recipients are
/// notified.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    /// [`send_log::Label`] of this [`Schedule`], unique within its
    /// [`Reminder`].
    pub label: send_log::Label,

    /// Number of days before [`Reminder::due_date`] to notify on.
    pub days_before: DaysBefore,

    /// [`TimeOfDay`] before which nothing is sent on the target day.
    pub time_of_day: Option<TimeOfDay>,
}

impl Schedule {
    /// Returns the day this [`Schedule`] fires on for the provided `due_date`.
    #[must_use]
    pub fn target_day(&self, due_date: Date) -> Option<Date> {
        due_date.checked_add_days(-i64::from(self.days_before.0))
    }

    /// Checks whether this [`Schedule`] fires on `today` at the provided
    /// wall-clock `now`.
    #[must_use]
    pub fn is_due(&self, due_date: Date, today: Date, now: TimeOfDay) -> bool {
        self.target_day(due_date) == Some(today)
            && self.time_of_day.map_or(true, |at| now >= at)
    }
}

/// Non-negative number of days before a [`Reminder::due_date`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Into, Ord, PartialEq,
    PartialOrd,
)]
pub struct DaysBefore(u16);

impl DaysBefore {
    /// Returns the number of days.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl FromStr for DaysBefore {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| "invalid `DaysBefore`")
    }
}

/// [`DateTime`] when a [`Reminder`] was created.
pub type CreationDateTime = DateTimeOf<(Reminder, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{Date, DateTime, TimeOfDay};

    use crate::domain::send_log;

    use super::{
        duplicate_label, DaysBefore, Description, Id, Kind, Reminder, Schedule,
    };

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn schedule(label: &str, days: u16, at: Option<&str>) -> Schedule {
        Schedule {
            label: send_log::Label::new(label).unwrap(),
            days_before: days.into(),
            time_of_day: at.map(time),
        }
    }

    fn reminder(schedules: Vec<Schedule>) -> Reminder {
        Reminder {
            id: Id::new(),
            due_date: date("2025-06-12"),
            description: Description::new("Contract renewal").unwrap(),
            active: true,
            kind: Kind::new("contract").unwrap(),
            schedules,
            recipients: vec![],
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn targets_exact_day() {
        let s = schedule("T-7", 7, None);
        let due = date("2025-06-12");
        let noon = time("12:00");

        assert_eq!(s.target_day(due), Some(date("2025-06-05")));
        assert!(s.is_due(due, date("2025-06-05"), noon));
        assert!(!s.is_due(due, date("2025-06-04"), noon));
        assert!(!s.is_due(due, date("2025-06-06"), noon));
    }

    #[test]
    fn gates_by_time_of_day() {
        let s = schedule("T-7", 7, Some("09:00"));
        let (due, today) = (date("2025-06-12"), date("2025-06-05"));

        assert!(!s.is_due(due, today, time("08:59")));
        assert!(s.is_due(due, today, time("09:00")));
        assert!(s.is_due(due, today, time("17:30")));
    }

    #[test]
    fn zero_days_fires_on_due_date() {
        let s = schedule("T-0", 0, None);

        let due = date("2025-06-12");

        assert!(s.is_due(due, due, time("00:00")));
    }

    #[test]
    fn inactive_reminder_is_never_due() {
        let mut r = reminder(vec![
            schedule("T-7", 7, None),
            schedule("T-1", 1, None),
            schedule("again", 7, Some("10:00")),
        ]);
        let today = date("2025-06-05");

        assert_eq!(
            r.due_schedules(today, time("09:00"))
                .map(|s| s.label.to_string())
                .collect::<Vec<_>>(),
            ["T-7"],
        );
        assert_eq!(r.due_schedules(today, time("10:00")).count(), 2);

        r.active = false;
        assert_eq!(r.due_schedules(today, time("10:00")).count(), 0);
    }

    #[test]
    fn finds_duplicate_labels() {
        let unique = [schedule("T-7", 7, None), schedule("T-1", 1, None)];
        let repeated = [
            schedule("T-7", 7, None),
            schedule("T-1", 1, None),
            schedule("T-7", 3, None),
        ];

        assert_eq!(duplicate_label(&unique), None);
        assert_eq!(
            duplicate_label(&repeated).map(ToString::to_string).as_deref(),
            Some("T-7"),
        );
    }

    #[test]
    fn parses_days_before() {
        assert_eq!("7".parse::<DaysBefore>().unwrap().get(), 7);
        assert!("-1".parse::<DaysBefore>().is_err());
    }
}
