//! [`Employee`]-related definitions.

use common::{Date, DateTime};
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{
    command::{create_employee, update_employee},
    domain, query, Query as _,
};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// An employee of the company.
#[derive(Clone, Debug, From)]
pub struct Employee {
    /// ID of this [`Employee`].
    pub id: Id,

    /// [`domain::Employee`] representing this [`Employee`].
    employee: OnceCell<domain::Employee>,
}

impl From<domain::Employee> for Employee {
    fn from(employee: domain::Employee) -> Self {
        Self {
            id: employee.id.into(),
            employee: OnceCell::new_with(Some(employee)),
        }
    }
}

impl Employee {
    /// Creates a new [`Employee`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Employee`] with the provided ID exists,
    /// otherwise accessing this [`Employee`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            employee: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Employee`] representing this [`Employee`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Employee`] doesn't exist.
    async fn employee(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Employee, Error> {
        let id = self.id.into();
        self.employee
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::employee::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|e| {
                        future::ready(e.ok_or_else(|| {
                            api::query::EmployeeError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// An employee of the company.
#[graphql_object(context = Context)]
impl Employee {
    /// Unique identifier of this `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// First name of this `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.firstName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn first_name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.employee(ctx).await?.first_name.clone().into())
    }

    /// Last name of this `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.lastName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn last_name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.employee(ctx).await?.last_name.clone().into())
    }

    /// First and last names of this `Employee` joined together.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.fullName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn full_name(&self, ctx: &Context) -> Result<String, Error> {
        Ok(self.employee(ctx).await?.full_name())
    }

    /// Email of this `Employee`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(
        &self,
        ctx: &Context,
    ) -> Result<Option<scalar::Email>, Error> {
        Ok(self.employee(ctx).await?.email.clone().map(Into::into))
    }

    /// `Date` when this `Employee` was born.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.birthDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn birth_date(
        &self,
        ctx: &Context,
    ) -> Result<Option<Date>, Error> {
        Ok(self.employee(ctx).await?.birth_date)
    }

    /// `Date` when this `Employee` started working.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.startDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn start_date(
        &self,
        ctx: &Context,
    ) -> Result<Option<Date>, Error> {
        Ok(self.employee(ctx).await?.start_date)
    }

    /// `Date` when this `Employee` leaves or has left.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.exitDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn exit_date(
        &self,
        ctx: &Context,
    ) -> Result<Option<Date>, Error> {
        Ok(self.employee(ctx).await?.exit_date)
    }

    /// Lifecycle status of this `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.employee(ctx).await?.status.into())
    }

    /// Onboarding and offboarding tasks of this `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.lifecycleTasks",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn lifecycle_tasks(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::lifecycle::Task>, Error> {
        api::Query::lifecycle_tasks(self.id, ctx).await
    }

    /// `DateTime` when this `Employee` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.employee(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of an `Employee`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::employee::Id)]
#[into(domain::employee::Id)]
#[graphql(name = "EmployeeId", transparent)]
pub struct Id(Uuid);

/// First or last name of an `Employee`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "EmployeeName",
    with = scalar::Via::<domain::employee::Name>,
)]
pub struct Name(domain::employee::Name);

/// Lifecycle status of an `Employee`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "EmployeeStatus")]
pub enum Status {
    /// Regularly working.
    Active,

    /// Being onboarded.
    Onboarding,

    /// Being offboarded.
    Offboarding,

    /// Left the company.
    Exited,
}

impl From<domain::employee::Status> for Status {
    fn from(status: domain::employee::Status) -> Self {
        use domain::employee::Status as S;
        match status {
            S::Active => Self::Active,
            S::Onboarding => Self::Onboarding,
            S::Offboarding => Self::Offboarding,
            S::Exited => Self::Exited,
        }
    }
}

impl From<Status> for domain::employee::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => Self::Active,
            Status::Onboarding => Self::Onboarding,
            Status::Offboarding => Self::Offboarding,
            Status::Exited => Self::Exited,
        }
    }
}

/// Result of an `Employee` creation or update.
#[derive(Clone, Debug)]
pub struct MutationResult {
    /// Created or updated [`Employee`].
    pub employee: Employee,

    /// Number of lifecycle tasks generated along.
    pub generated_tasks: usize,
}

impl From<create_employee::Output> for MutationResult {
    fn from(output: create_employee::Output) -> Self {
        Self {
            employee: output.employee.into(),
            generated_tasks: output.generated_tasks,
        }
    }
}

impl From<update_employee::Output> for MutationResult {
    fn from(output: update_employee::Output) -> Self {
        Self {
            employee: output.employee.into(),
            generated_tasks: output.generated_tasks,
        }
    }
}

/// Result of an `Employee` creation or update.
#[graphql_object(name = "EmployeeMutationResult", context = Context)]
impl MutationResult {
    /// Created or updated `Employee`.
    #[must_use]
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Number of lifecycle tasks generated for the `Employee`.
    #[must_use]
    pub fn generated_tasks(&self) -> i32 {
        api::count(self.generated_tasks)
    }
}
