//! Onboarding and offboarding tasks definitions.

use common::{Date, DateTime};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{command::generate_lifecycle_tasks, domain, read};
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A template of lifecycle tasks generated for every onboarded or offboarded
/// employee.
#[derive(Clone, Debug, From)]
pub struct Template(domain::lifecycle::Template);

/// A template of lifecycle tasks.
#[graphql_object(name = "TaskTemplate", context = Context)]
impl Template {
    /// Unique identifier of this `TaskTemplate`.
    #[must_use]
    pub fn id(&self) -> TemplateId {
        self.0.id.into()
    }

    /// Lifecycle phase this `TaskTemplate` is applied in.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Title of the tasks generated from this `TaskTemplate`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Number of days the generated tasks are due relatively to the anchor
    /// date.
    ///
    /// Negative values point before the anchor date.
    #[must_use]
    pub fn relative_due_days(&self) -> i32 {
        self.0.relative_due_days
    }

    /// `User` owning the generated tasks, if any.
    #[must_use]
    pub fn owner(&self) -> Option<api::User> {
        self.0.owner_id.map(|id| {
            #[expect(
                unsafe_code,
                reason = "owner existence is checked on template creation"
            )]
            unsafe {
                api::User::new_unchecked(id)
            }
        })
    }

    /// Indicator whether tasks are generated from this `TaskTemplate`.
    #[must_use]
    pub fn active(&self) -> bool {
        self.0.active
    }

    /// `DateTime` when this `TaskTemplate` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// A lifecycle task assigned for an employee.
#[derive(Clone, Debug, From)]
pub struct Task(read::lifecycle::Task);

/// A lifecycle task assigned for an `Employee`.
#[graphql_object(name = "LifecycleTask", context = Context)]
impl Task {
    /// Unique identifier of this `LifecycleTask`.
    #[must_use]
    pub fn id(&self) -> TaskId {
        self.0.assignment.id.into()
    }

    /// `Employee` this `LifecycleTask` is assigned for.
    #[must_use]
    pub fn employee(&self) -> api::Employee {
        #[expect(
            unsafe_code,
            reason = "tasks are generated for existing employees only"
        )]
        unsafe {
            api::Employee::new_unchecked(self.0.assignment.employee_id)
        }
    }

    /// ID of the `TaskTemplate` this `LifecycleTask` is generated from.
    #[must_use]
    pub fn template_id(&self) -> TemplateId {
        self.0.assignment.template_id.into()
    }

    /// Title of this `LifecycleTask`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Lifecycle phase of this `LifecycleTask`.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// `Date` this `LifecycleTask` is due on.
    #[must_use]
    pub fn due_date(&self) -> Date {
        self.0.assignment.due_date
    }

    /// `User` owning this `LifecycleTask`, if any.
    #[must_use]
    pub fn owner(&self) -> Option<api::User> {
        self.0.assignment.owner_id.map(|id| {
            #[expect(
                unsafe_code,
                reason = "owner existence is checked on template creation"
            )]
            unsafe {
                api::User::new_unchecked(id)
            }
        })
    }

    /// Completion status of this `LifecycleTask`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.assignment.status.into()
    }

    /// `DateTime` when this `LifecycleTask` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.assignment.created_at.coerce()
    }

    /// `DateTime` when this `LifecycleTask` was updated last time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.assignment.updated_at.coerce()
    }
}

/// Unique identifier of a `TaskTemplate`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::lifecycle::TemplateId)]
#[into(domain::lifecycle::TemplateId)]
#[graphql(name = "TaskTemplateId", transparent)]
pub struct TemplateId(Uuid);

/// Unique identifier of a `LifecycleTask`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::lifecycle::AssignmentId)]
#[into(domain::lifecycle::AssignmentId)]
#[graphql(name = "LifecycleTaskId", transparent)]
pub struct TaskId(Uuid);

/// Title of a `LifecycleTask`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "LifecycleTaskTitle",
    with = scalar::Via::<domain::lifecycle::Title>,
)]
pub struct Title(domain::lifecycle::Title);

/// Lifecycle phase of an `Employee`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "LifecycleKind")]
pub enum Kind {
    /// Joining the company, anchored at the start date.
    Onboarding,

    /// Leaving the company, anchored at the exit date.
    Offboarding,
}

impl From<domain::lifecycle::Kind> for Kind {
    fn from(kind: domain::lifecycle::Kind) -> Self {
        use domain::lifecycle::Kind as K;
        match kind {
            K::Onboarding => Self::Onboarding,
            K::Offboarding => Self::Offboarding,
        }
    }
}

impl From<Kind> for domain::lifecycle::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Onboarding => Self::Onboarding,
            Kind::Offboarding => Self::Offboarding,
        }
    }
}

/// Completion status of a `LifecycleTask`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "LifecycleTaskStatus")]
pub enum Status {
    /// Still to be done.
    Open,

    /// Completed.
    Done,
}

impl From<domain::lifecycle::Status> for Status {
    fn from(status: domain::lifecycle::Status) -> Self {
        use domain::lifecycle::Status as S;
        match status {
            S::Open => Self::Open,
            S::Done => Self::Done,
        }
    }
}

impl From<Status> for domain::lifecycle::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Open => Self::Open,
            Status::Done => Self::Done,
        }
    }
}

/// Mode of `LifecycleTask`s generation.
#[derive(Clone, Copy, Debug, Default, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "LifecycleGenerationMode")]
pub enum GenerationMode {
    /// Keeps the already generated `LifecycleTask`s untouched.
    #[default]
    CreateIfAbsent,

    /// Reopens the already generated `LifecycleTask`s with their due dates
    /// and owners recalculated.
    Overwrite,
}

impl From<GenerationMode> for generate_lifecycle_tasks::Mode {
    fn from(mode: GenerationMode) -> Self {
        match mode {
            GenerationMode::CreateIfAbsent => Self::CreateIfAbsent,
            GenerationMode::Overwrite => Self::Overwrite,
        }
    }
}
