//! GraphQL [`Query`]s definitions.

use common::{Date, DateTime};
use juniper::graphql_object;
use service::{
    domain::{jubilee, send_log},
    query, read, Query as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Employee` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "employee",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn employee(
        id: api::employee::Id,
        ctx: &Context,
    ) -> Result<api::Employee, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::employee::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| EmployeeError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists the `Employee`s, optionally filtered by their status.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "employees",
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn employees(
        status: Option<api::employee::Status>,
        ctx: &Context,
    ) -> Result<Vec<api::Employee>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::employees::List::by(read::employee::Filter {
                status: status.map(Into::into),
                present_only: false,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the work anniversaries of the present `Employee`s hitting the
    /// configured milestone years.
    ///
    /// Looks at the exact `on` day (today by default), or, if `windowDays`
    /// is specified, at the window of that many days starting from it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `INVALID_WINDOW` - the `windowDays` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "jubilees",
            on = ?on.map(|d| d.to_string()),
            otel.name = Self::SPAN_NAME,
            window_days = ?window_days,
        ),
    )]
    pub async fn jubilees(
        on: Option<Date>,
        window_days: Option<i32>,
        ctx: &Context,
    ) -> Result<api::report::Jubilees, Error> {
        _ = ctx.current_session().await?;

        let today =
            on.unwrap_or_else(|| ctx.service().local_date(DateTime::now()));
        let target = match window_days {
            None => jubilee::Target::On(today),
            Some(days) => jubilee::Target::Within {
                today,
                days: u16::try_from(days)
                    .map_err(|_| ReportError::InvalidWindow.into())
                    .map_err(ctx.error())?,
            },
        };

        ctx.service()
            .execute(query::report::Jubilees { target })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists the present `Employee`s having birthday `on` the specified day
    /// (today by default).
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "birthdays",
            on = ?on.map(|d| d.to_string()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn birthdays(
        on: Option<Date>,
        ctx: &Context,
    ) -> Result<Vec<api::Employee>, Error> {
        _ = ctx.current_session().await?;

        let on =
            on.unwrap_or_else(|| ctx.service().local_date(DateTime::now()));
        ctx.service()
            .execute(query::report::Birthdays { on })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the `Reminder` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `REMINDER_NOT_EXISTS` - the `Reminder` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "reminder",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reminder(
        id: api::reminder::Id,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::reminder::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ReminderError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists the `Reminder`s ordered by their due `Date`, optionally
    /// filtered by their activity.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            active = ?active,
            gql.name = "reminders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reminders(
        active: Option<bool>,
        ctx: &Context,
    ) -> Result<Vec<api::Reminder>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::reminders::List::by(read::reminder::Filter {
                active,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the send log of the `Reminder` with the specified ID, the
    /// latest deliveries first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reminderSendLogs",
            otel.name = Self::SPAN_NAME,
            reminder_id = %reminder_id,
        ),
    )]
    pub async fn reminder_send_logs(
        reminder_id: api::reminder::Id,
        ctx: &Context,
    ) -> Result<Vec<api::reminder::SendLog>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::reminder::SendLogs::by(
                send_log::Subject::Reminder(reminder_id.into()),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|logs| logs.into_iter().map(Into::into).collect())
    }

    /// Lists the lifecycle tasks of the `Employee` with the specified ID,
    /// ordered by their due `Date`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            employee_id = %employee_id,
            gql.name = "lifecycleTasks",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn lifecycle_tasks(
        employee_id: api::employee::Id,
        ctx: &Context,
    ) -> Result<Vec<api::lifecycle::Task>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::lifecycle::Tasks::by(employee_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|tasks| tasks.into_iter().map(Into::into).collect())
    }

    /// Lists the `TaskTemplate`s, optionally filtered by their kind and
    /// activity.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            active = ?active,
            gql.name = "taskTemplates",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn task_templates(
        kind: Option<api::lifecycle::Kind>,
        active: Option<bool>,
        ctx: &Context,
    ) -> Result<Vec<api::lifecycle::Template>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::lifecycle::Templates::by(
                read::lifecycle::TemplateFilter {
                    kind: kind.map(Into::into),
                    active,
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the current `Settings`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "settings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn settings(
        ctx: &Context,
    ) -> Result<api::setting::Settings, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::setting::Current::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum EmployeeError {
        #[code = "EMPLOYEE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Employee` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ReminderError {
        #[code = "REMINDER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Reminder` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ReportError {
        #[code = "INVALID_WINDOW"]
        #[status = BAD_REQUEST]
        #[message = "`windowDays` must be within 0..=65535 range"]
        InvalidWindow,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
