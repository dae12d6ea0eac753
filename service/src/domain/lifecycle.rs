//! Onboarding and offboarding task definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{employee, user, Employee};

define_kind! {
    #[doc = "Lifecycle phase of an [`Employee`]."]
    enum Kind {
        #[doc = "Joining the company, anchored at the start date."]
        Onboarding = 1,

        #[doc = "Leaving the company, anchored at the exit date."]
        Offboarding = 2,
    }
}

/// Template of a task every [`Employee`] gets in a lifecycle phase.
#[derive(Clone, Debug)]
pub struct Template {
    /// ID of this [`Template`].
    pub id: TemplateId,

    /// Lifecycle phase [`Kind`] this [`Template`] applies to.
    pub kind: Kind,

    /// [`Title`] of the task.
    pub title: Title,

    /// Number of days the task is due after (or before, if negative) the
    /// anchor date.
    pub relative_due_days: i32,

    /// ID of the [`User`] owning the task.
    pub owner_id: Option<user::Id>,

    /// Indicator whether this [`Template`] is used for generation.
    pub active: bool,

    /// [`DateTime`] when this [`Template`] was created.
    pub created_at: TemplateCreationDateTime,
}

impl Template {
    /// Creates a new open [`Assignment`] of this [`Template`] for the provided
    /// [`Employee`].
    ///
    /// [`None`] is returned if the [`Employee`] has no anchor date for the
    /// [`Kind`] of this [`Template`].
    #[must_use]
    pub fn assign(&self, employee: &Employee) -> Option<Assignment> {
        let due_date = employee
            .anchor(self.kind)?
            .checked_add_days(i64::from(self.relative_due_days))?;
        let now = AssignmentCreationDateTime::now();
        Some(Assignment {
            id: AssignmentId::new(),
            employee_id: employee.id,
            template_id: self.id,
            due_date,
            owner_id: self.owner_id,
            status: Status::Open,
            created_at: now,
            updated_at: now.coerce(),
        })
    }
}

/// Task assigned to an [`Employee`] out of a [`Template`].
///
/// Unique per [`Employee`] and [`Template`].
#[derive(Clone, Debug)]
pub struct Assignment {
    /// ID of this [`Assignment`].
    pub id: AssignmentId,

    /// ID of the [`Employee`] this [`Assignment`] is for.
    pub employee_id: employee::Id,

    /// ID of the [`Template`] this [`Assignment`] was generated from.
    pub template_id: TemplateId,

    /// [`Date`] this [`Assignment`] is due on.
    pub due_date: Date,

    /// ID of the [`User`] owning this [`Assignment`].
    pub owner_id: Option<user::Id>,

    /// [`Status`] of this [`Assignment`].
    pub status: Status,

    /// [`DateTime`] when this [`Assignment`] was created.
    pub created_at: AssignmentCreationDateTime,

    /// [`DateTime`] when this [`Assignment`] was updated last time.
    pub updated_at: AssignmentUpdateDateTime,
}

define_kind! {
    #[doc = "Completion status of an [`Assignment`]."]
    enum Status {
        #[doc = "Still to be done."]
        Open = 1,

        #[doc = "Completed."]
        Done = 2,
    }
}

/// ID of a [`Template`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct TemplateId(Uuid);

impl TemplateId {
    /// Creates a new random [`TemplateId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// ID of an [`Assignment`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct AssignmentId(Uuid);

impl AssignmentId {
    /// Creates a new random [`AssignmentId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a task.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// [`DateTime`] when a [`Template`] was created.
pub type TemplateCreationDateTime = DateTimeOf<(Template, unit::Creation)>;

/// [`DateTime`] when an [`Assignment`] was created.
pub type AssignmentCreationDateTime = DateTimeOf<(Assignment, unit::Creation)>;

/// [`DateTime`] when an [`Assignment`] was updated.
pub type AssignmentUpdateDateTime = DateTimeOf<(Assignment, unit::Update)>;

#[cfg(test)]
mod spec {
    use common::{Date, DateTime};

    use crate::domain::{employee, Employee};

    use super::{Kind, Status, Template, TemplateId, Title};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn employee() -> Employee {
        Employee {
            id: employee::Id::new(),
            first_name: employee::Name::new("Jane").unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: None,
            start_date: Some(date("2025-07-01")),
            exit_date: None,
            status: employee::Status::Onboarding,
            created_at: DateTime::now().coerce(),
        }
    }

    fn template(kind: Kind, relative_due_days: i32) -> Template {
        Template {
            id: TemplateId::new(),
            kind,
            title: Title::new("Prepare laptop").unwrap(),
            relative_due_days,
            owner_id: None,
            active: true,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn computes_due_date_from_anchor() {
        let e = employee();

        let before = template(Kind::Onboarding, -3).assign(&e).unwrap();
        assert_eq!(before.due_date, date("2025-06-28"));
        assert_eq!(before.status, Status::Open);
        assert_eq!(before.employee_id, e.id);

        let after = template(Kind::Onboarding, 14).assign(&e).unwrap();
        assert_eq!(after.due_date, date("2025-07-15"));
    }

    #[test]
    fn skips_missing_anchor() {
        let mut e = employee();

        assert!(template(Kind::Offboarding, 0).assign(&e).is_none());

        e.start_date = None;
        assert!(template(Kind::Onboarding, 0).assign(&e).is_none());
    }
}
