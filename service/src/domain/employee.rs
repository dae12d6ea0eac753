//! [`Employee`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{lifecycle, Email};

/// Employee tracked through its lifecycle.
#[derive(Clone, Debug)]
pub struct Employee {
    /// ID of this [`Employee`].
    pub id: Id,

    /// First [`Name`] of this [`Employee`].
    pub first_name: Name,

    /// Last [`Name`] of this [`Employee`].
    pub last_name: Name,

    /// [`Email`] of this [`Employee`].
    pub email: Option<Email>,

    /// [`Date`] when this [`Employee`] was born.
    pub birth_date: Option<Date>,

    /// [`Date`] when this [`Employee`] started working.
    pub start_date: Option<Date>,

    /// [`Date`] when this [`Employee`] leaves (or has left) the company.
    pub exit_date: Option<Date>,

    /// Lifecycle [`Status`] of this [`Employee`].
    pub status: Status,

    /// [`DateTime`] when this [`Employee`] was created.
    pub created_at: CreationDateTime,
}

impl Employee {
    /// Returns the full name of this [`Employee`].
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the anchor [`Date`] of the provided lifecycle phase of this
    /// [`Employee`], if known.
    #[must_use]
    pub fn anchor(&self, kind: lifecycle::Kind) -> Option<Date> {
        match kind {
            lifecycle::Kind::Onboarding => self.start_date,
            lifecycle::Kind::Offboarding => self.exit_date,
        }
    }
}

/// ID of an [`Employee`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
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

/// First or last name of an [`Employee`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

define_kind! {
    #[doc = "Lifecycle status of an [`Employee`]."]
    enum Status {
        #[doc = "Regularly working."]
        Active = 1,

        #[doc = "Being onboarded."]
        Onboarding = 2,

        #[doc = "Being offboarded."]
        Offboarding = 3,

        #[doc = "Left the company."]
        Exited = 4,
    }
}

impl Status {
    /// Returns the lifecycle phase whose tasks are due while an [`Employee`]
    /// has this [`Status`], if any.
    #[must_use]
    pub const fn lifecycle_kind(self) -> Option<lifecycle::Kind> {
        match self {
            Self::Onboarding => Some(lifecycle::Kind::Onboarding),
            Self::Offboarding => Some(lifecycle::Kind::Offboarding),
            Self::Active | Self::Exited => None,
        }
    }
}

/// [`DateTime`] when an [`Employee`] was created.
pub type CreationDateTime = DateTimeOf<(Employee, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{Date, DateTime};

    use crate::domain::lifecycle;

    use super::{Employee, Id, Name, Status};

    fn employee() -> Employee {
        Employee {
            id: Id::new(),
            first_name: Name::new("Jane").unwrap(),
            last_name: Name::new("Doe").unwrap(),
            email: None,
            birth_date: None,
            start_date: "2025-07-01".parse().ok(),
            exit_date: None,
            status: Status::Onboarding,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn picks_anchor_by_kind() {
        let mut e = employee();

        assert_eq!(
            e.anchor(lifecycle::Kind::Onboarding),
            "2025-07-01".parse::<Date>().ok(),
        );
        assert_eq!(e.anchor(lifecycle::Kind::Offboarding), None);

        e.exit_date = "2026-01-31".parse().ok();
        assert_eq!(
            e.anchor(lifecycle::Kind::Offboarding),
            "2026-01-31".parse::<Date>().ok(),
        );
    }

    #[test]
    fn maps_status_to_lifecycle_kind() {
        assert_eq!(
            Status::Onboarding.lifecycle_kind(),
            Some(lifecycle::Kind::Onboarding),
        );
        assert_eq!(
            Status::Offboarding.lifecycle_kind(),
            Some(lifecycle::Kind::Offboarding),
        );
        assert_eq!(Status::Active.lifecycle_kind(), None);
        assert_eq!(Status::Exited.lifecycle_kind(), None);
    }

    #[test]
    fn validates_name() {
        assert!(Name::new("").is_none());
        assert!(Name::new(" Jane").is_none());
        assert_eq!(employee().full_name(), "Jane Doe");
    }
}
