//! [`SendLog`] definitions.

use std::{ops::RangeInclusive, str::FromStr};

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, UtcOffset};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{employee, reminder, Email};

/// Record of a delivered notification.
///
/// Append-only: at most one [`SendLog`] exists per [`Key`] per local calendar
/// day for scheduled notifications.
#[derive(Clone, Debug)]
pub struct SendLog {
    /// ID of this [`SendLog`].
    pub id: Id,

    /// [`Subject`] the notification was about.
    pub subject: Subject,

    /// [`Label`] of the notification.
    pub label: Label,

    /// [`Email`] the notification was delivered to.
    pub email: Email,

    /// [`DateTime`] when the notification was delivered.
    pub sent_at: SentDateTime,
}

impl SendLog {
    /// Returns the deduplication [`Key`] of this [`SendLog`].
    #[must_use]
    pub fn key(&self) -> Key {
        Key {
            subject: self.subject,
            label: self.label.clone(),
            email: self.email.clone(),
        }
    }

    /// Returns the inclusive range of [`SentDateTime`]s covering the whole
    /// local calendar day `today` in the provided [`UtcOffset`].
    #[must_use]
    pub fn day_window(
        today: Date,
        offset: UtcOffset,
    ) -> RangeInclusive<SentDateTime> {
        today.start_of_day(offset)..=today.end_of_day(offset)
    }
}

/// ID of a [`SendLog`].
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

/// Entity a notification is about.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Subject {
    /// Notification of a [`Reminder`].
    ///
    /// [`Reminder`]: crate::domain::Reminder
    Reminder(reminder::Id),

    /// Birthday or jubilee notification of an [`Employee`].
    ///
    /// [`Employee`]: crate::domain::Employee
    Employee(employee::Id),
}

/// Label distinguishing notifications about the same [`Subject`].
///
/// Either a [`Schedule`] label, or one of the [`Label::MANUAL`],
/// [`Label::BIRTHDAY`] and [`Label::JUBILEE`].
///
/// [`Schedule`]: crate::domain::reminder::Schedule
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Label(String);

impl Label {
    /// [`Label`] of a manually triggered notification.
    pub const MANUAL: &'static str = "manual";

    /// [`Label`] of a birthday notification.
    pub const BIRTHDAY: &'static str = "birthday";

    /// [`Label`] of a jubilee notification.
    pub const JUBILEE: &'static str = "jubilee";

    /// Creates a new [`Label`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `label` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Creates a new [`Label`] if the given `label` is valid.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        Self::check(&label).then_some(Self(label))
    }

    /// Creates the [`Label::MANUAL`].
    #[must_use]
    pub fn manual() -> Self {
        Self(Self::MANUAL.into())
    }

    /// Creates the [`Label::BIRTHDAY`].
    #[must_use]
    pub fn birthday() -> Self {
        Self(Self::BIRTHDAY.into())
    }

    /// Creates the [`Label::JUBILEE`].
    #[must_use]
    pub fn jubilee() -> Self {
        Self(Self::JUBILEE.into())
    }

    /// Checks whether the given `label` is a valid [`Label`].
    fn check(label: impl AsRef<str>) -> bool {
        let label = label.as_ref();
        label.trim() == label && !label.is_empty() && label.len() <= 64
    }
}

impl FromStr for Label {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Label`")
    }
}

/// Deduplication key of a [`SendLog`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    /// [`Subject`] of the notification.
    pub subject: Subject,

    /// [`Label`] of the notification.
    pub label: Label,

    /// [`Email`] the notification is delivered to.
    pub email: Email,
}

/// [`DateTime`] when a notification was delivered.
pub type SentDateTime = DateTimeOf<(SendLog, unit::Delivery)>;

#[cfg(test)]
mod spec {
    use common::{Date, DateTime, UtcOffset};

    use super::{Label, SendLog};

    #[test]
    fn day_window_covers_local_day() {
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        let today: Date = "2025-06-05".parse().unwrap();

        let window = SendLog::day_window(today, offset);

        for (at, inside) in [
            ("2025-06-04T21:59:59.999Z", false),
            ("2025-06-04T22:00:00Z", true),
            ("2025-06-05T12:00:00Z", true),
            ("2025-06-05T21:59:59.999Z", true),
            ("2025-06-05T22:00:00Z", false),
        ] {
            let at = DateTime::from_rfc3339(at).unwrap().coerce();
            assert_eq!(window.contains(&at), inside, "at: {at:?}");
        }
    }

    #[test]
    fn validates_label() {
        assert!(Label::new("").is_none());
        assert!(Label::new(" T-7").is_none());
        assert_eq!(Label::new("T-7").unwrap().to_string(), "T-7");
        assert_eq!(Label::manual().to_string(), "manual");
    }
}
