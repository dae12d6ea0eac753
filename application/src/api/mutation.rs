//! GraphQL [`Mutation`]s definitions.

use common::{Date, DateTime};
use juniper::{graphql_object, Nullable};
use service::{
    command, domain::jubilee::MilestoneYears, query, Command as _,
};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User` with the provided credentials.
    ///
    /// Requires authentication, unless no `User` exists yet. The very first
    /// `User` is signed in right away.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `LOGIN_OCCUPIED` - provided `UserLogin` is occupied by another `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUser",
            email = ?email,
            login = %login,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        login: api::user::Login,
        password: api::user::Password,
        email: Option<api::scalar::Email>,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        let bootstrap = ctx
            .service()
            .execute(query::users::TotalCount::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .is_zero();
        if !bootstrap {
            _ = ctx.current_session().await?;
        }

        let user = ctx
            .service()
            .execute(command::CreateUser {
                name: name.into(),
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                email: email.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        if bootstrap {
            let output = ctx
                .service()
                .execute(command::CreateUserSession::ByUserId(user.id))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())?;
            ctx.set_current_session(Session {
                user_id: output.user.id.into(),
                token: output.token,
                expires_at: output.expires_at.coerce(),
            })
            .await;
        }

        Ok(user.into())
    }

    /// Creates a new `UserSession` with the provided credentials.
    ///
    /// The session token is also set as the `session` cookie.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        login: api::user::Login,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Expires the `session` cookie.
    ///
    /// Tokens are stateless, so the ones handed out earlier stay valid until
    /// their expiration.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteUserSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub fn delete_user_session(ctx: &Context) -> bool {
        ctx.clear_session_cookie();
        true
    }

    /// Creates a new `Employee` with the provided details.
    ///
    /// Onboarding tasks are generated for an `ONBOARDING` `Employee`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `EXIT_BEFORE_START` - provided `exitDate` precedes the `startDate`.
    #[tracing::instrument(
        skip_all,
        fields(
            first_name = %first_name,
            gql.name = "createEmployee",
            last_name = %last_name,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn create_employee(
        first_name: api::employee::Name,
        last_name: api::employee::Name,
        email: Option<api::scalar::Email>,
        birth_date: Option<Date>,
        start_date: Option<Date>,
        exit_date: Option<Date>,
        status: Option<api::employee::Status>,
        ctx: &Context,
    ) -> Result<api::employee::MutationResult, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::CreateEmployee {
                first_name: first_name.into(),
                last_name: last_name.into(),
                email: email.map(Into::into),
                birth_date,
                start_date,
                exit_date,
                status: status
                    .unwrap_or(api::employee::Status::Active)
                    .into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided details of the `Employee` with the specified ID.
    ///
    /// Omitted arguments are left untouched, while explicit `null`s clear the
    /// optional details. Changing the status to `ONBOARDING` or `OFFBOARDING`
    /// generates the corresponding tasks.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` with the specified ID does
    ///                           not exist;
    /// - `EXIT_BEFORE_START` - resulting `exitDate` precedes the `startDate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateEmployee",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn update_employee(
        id: api::employee::Id,
        first_name: Option<api::employee::Name>,
        last_name: Option<api::employee::Name>,
        email: Nullable<api::scalar::Email>,
        birth_date: Nullable<Date>,
        start_date: Nullable<Date>,
        exit_date: Nullable<Date>,
        status: Option<api::employee::Status>,
        ctx: &Context,
    ) -> Result<api::employee::MutationResult, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::UpdateEmployee {
                employee_id: id.into(),
                first_name: first_name.map(Into::into),
                last_name: last_name.map(Into::into),
                email: email.explicit().map(|e| e.map(Into::into)),
                birth_date: birth_date.explicit(),
                start_date: start_date.explicit(),
                exit_date: exit_date.explicit(),
                status: status.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Reminder` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `DUPLICATE_SCHEDULE_LABEL` - several `ReminderSchedule`s share the
    ///                                same label;
    /// - `INVALID_DAYS_BEFORE` - `daysBefore` of a `ReminderSchedule` is out
    ///                           of range.
    #[tracing::instrument(
        skip_all,
        fields(
            due_date = %due_date,
            gql.name = "createReminder",
            kind = %kind,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_reminder(
        due_date: Date,
        description: api::reminder::Description,
        kind: api::reminder::Kind,
        schedules: Vec<api::reminder::ScheduleInput>,
        recipients: Vec<api::scalar::Email>,
        active: Option<bool>,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        _ = ctx.current_session().await?;

        let schedules = schedules
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateReminder {
                due_date,
                description: description.into(),
                active: active.unwrap_or(true),
                kind: kind.into(),
                schedules,
                recipients: recipients.into_iter().map(Into::into).collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided details of the `Reminder` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `DUPLICATE_SCHEDULE_LABEL` - several `ReminderSchedule`s share the
    ///                                same label;
    /// - `INVALID_DAYS_BEFORE` - `daysBefore` of a `ReminderSchedule` is out
    ///                           of range;
    /// - `REMINDER_NOT_EXISTS` - the `Reminder` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            active = ?active,
            gql.name = "updateReminder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn update_reminder(
        id: api::reminder::Id,
        due_date: Option<Date>,
        description: Option<api::reminder::Description>,
        kind: Option<api::reminder::Kind>,
        schedules: Option<Vec<api::reminder::ScheduleInput>>,
        recipients: Option<Vec<api::scalar::Email>>,
        active: Option<bool>,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        _ = ctx.current_session().await?;

        let schedules = schedules
            .map(|list| {
                list.into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateReminder {
                reminder_id: id.into(),
                due_date,
                description: description.map(Into::into),
                active,
                kind: kind.map(Into::into),
                schedules,
                recipients: recipients
                    .map(|list| list.into_iter().map(Into::into).collect()),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Reminder` with the specified ID along with its send log.
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
            gql.name = "deleteReminder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_reminder(
        id: api::reminder::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::DeleteReminder {
                reminder_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Sends the `Reminder` with the specified ID to all its recipients right
    /// away, regardless of its schedules and activity.
    ///
    /// Manual sends are logged, but never deduplicated.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `NOTHING_DELIVERED` - the `Reminder` failed to be delivered to
    ///                         every recipient;
    /// - `REMINDER_NOT_EXISTS` - the `Reminder` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "sendReminder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn send_reminder(
        id: api::reminder::Id,
        ctx: &Context,
    ) -> Result<api::notification::Summary, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::SendReminder {
                reminder_id: id.into(),
                at: DateTime::now(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sends all the active `Reminder`s which are due at the moment.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "sendDueReminders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn send_due_reminders(
        ctx: &Context,
    ) -> Result<api::notification::Summary, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::SendDueReminders {
                at: DateTime::now(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sends today's birthday and jubilee notifications.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "runDaily",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn run_daily(
        ctx: &Context,
    ) -> Result<api::notification::Summary, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::RunDaily {
                at: DateTime::now(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `TaskTemplate` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `OWNER_NOT_EXISTS` - the owner `User` with the specified ID does
    ///                        not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createTaskTemplate",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
            owner_id = ?owner_id,
            relative_due_days = %relative_due_days,
            title = %title,
        ),
    )]
    pub async fn create_task_template(
        kind: api::lifecycle::Kind,
        title: api::lifecycle::Title,
        relative_due_days: i32,
        owner_id: Option<api::user::Id>,
        active: Option<bool>,
        ctx: &Context,
    ) -> Result<api::lifecycle::Template, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::CreateTaskTemplate {
                kind: kind.into(),
                title: title.into(),
                relative_due_days,
                owner_id: owner_id.map(Into::into),
                active: active.unwrap_or(true),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Generates the lifecycle tasks of the provided kind for the `Employee`
    /// with the specified ID out of the active `TaskTemplate`s.
    ///
    /// Returns the number of the generated tasks.
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
            employee_id = %employee_id,
            gql.name = "generateLifecycleTasks",
            kind = ?kind,
            mode = ?mode,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn generate_lifecycle_tasks(
        employee_id: api::employee::Id,
        kind: api::lifecycle::Kind,
        mode: Option<api::lifecycle::GenerationMode>,
        ctx: &Context,
    ) -> Result<i32, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::GenerateLifecycleTasks {
                employee_id: employee_id.into(),
                kind: kind.into(),
                mode: mode.map(Into::into).unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|out| api::count(out.generated))
    }

    /// Updates the status of the `LifecycleTask` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `TASK_NOT_EXISTS` - the `LifecycleTask` with the specified ID does
    ///                       not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateTaskStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn update_task_status(
        id: api::lifecycle::TaskId,
        status: api::lifecycle::Status,
        ctx: &Context,
    ) -> Result<api::lifecycle::Task, Error> {
        _ = ctx.current_session().await?;

        let assignment = ctx
            .service()
            .execute(command::UpdateTaskStatus {
                assignment_id: id.into(),
                status: status.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::lifecycle::Tasks::by(assignment.employee_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .find(|t| t.assignment.id == assignment.id)
            .ok_or_else(|| TaskError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided `Settings`, leaving the omitted ones untouched.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current session is not authenticated;
    /// - `INVALID_MILESTONE_YEARS` - a milestone is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateSettings",
            milestone_years = ?milestone_years,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_settings(
        milestone_years: Option<Vec<i32>>,
        notification_recipients: Option<Vec<api::scalar::Email>>,
        reminder_mail: Option<api::setting::MailTemplateInput>,
        birthday_mail: Option<api::setting::MailTemplateInput>,
        jubilee_mail: Option<api::setting::MailTemplateInput>,
        ctx: &Context,
    ) -> Result<api::setting::Settings, Error> {
        _ = ctx.current_session().await?;

        let milestone_years = milestone_years
            .map(|years| {
                years
                    .into_iter()
                    .map(|y| u16::try_from(y).ok().filter(|y| *y > 0))
                    .collect::<Option<MilestoneYears>>()
            })
            .map(|years| years.ok_or(SettingsError::InvalidMilestoneYears))
            .transpose()
            .map_err(Into::into)
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateSettings {
                milestone_years,
                notification_recipients: notification_recipients
                    .map(|list| list.into_iter().map(Into::into).collect()),
                reminder_mail: reminder_mail.map(Into::into),
                birthday_mail: birthday_mail.map(Into::into),
                jubilee_mail: jubilee_mail.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum SettingsError {
        #[code = "INVALID_MILESTONE_YEARS"]
        #[status = BAD_REQUEST]
        #[message = "Milestone years must be within 1..=65535 range"]
        InvalidMilestoneYears,
    }
}

define_error! {
    enum TaskError {
        #[code = "TASK_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`LifecycleTask` with the specified ID does not exist"]
        NotExists,
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOGIN_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "Provided `UserLogin` is occupied"]
                LoginOccupied,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::LoginOccupied(_) => Error::LoginOccupied.into(),
            Self::PasswordHash(_) => return None,
        })
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = UNAUTHORIZED]
                #[message = "Provided credentials does not match any `User`"]
                WrongCredentials,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) | Self::UserNotExists(_) => {
                return None
            }
            Self::WrongCredentials => Error::WrongCredentials.into(),
        })
    }
}

impl AsError for command::generate_lifecycle_tasks::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::EmployeeNotExists(_) => {
                api::query::EmployeeError::NotExists.into()
            }
        })
    }
}

impl AsError for command::create_employee::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::ExitBeforeStart => EmployeeError::ExitBeforeStart.into(),
            Self::GenerateTasks(e) => return e.try_as_error(),
        })
    }
}

impl AsError for command::update_employee::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::EmployeeNotExists(_) => {
                api::query::EmployeeError::NotExists.into()
            }
            Self::ExitBeforeStart => EmployeeError::ExitBeforeStart.into(),
            Self::GenerateTasks(e) => return e.try_as_error(),
        })
    }
}

define_error! {
    enum EmployeeError {
        #[code = "EXIT_BEFORE_START"]
        #[status = BAD_REQUEST]
        #[message = "`exitDate` of an `Employee` precedes its `startDate`"]
        ExitBeforeStart,
    }
}

define_error! {
    enum ReminderError {
        #[code = "DUPLICATE_SCHEDULE_LABEL"]
        #[status = BAD_REQUEST]
        #[message = "Several `ReminderSchedule`s share the same label"]
        DuplicateScheduleLabel,

        #[code = "NOTHING_DELIVERED"]
        #[status = BAD_GATEWAY]
        #[message = "`Reminder` failed to be delivered to every recipient"]
        NothingDelivered,
    }
}

impl AsError for command::create_reminder::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::DuplicateScheduleLabel(_) => {
                ReminderError::DuplicateScheduleLabel.into()
            }
        })
    }
}

impl AsError for command::update_reminder::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::DuplicateScheduleLabel(_) => {
                ReminderError::DuplicateScheduleLabel.into()
            }
            Self::ReminderNotExists(_) => {
                api::query::ReminderError::NotExists.into()
            }
        })
    }
}

impl AsError for command::delete_reminder::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::ReminderNotExists(_) => {
                api::query::ReminderError::NotExists.into()
            }
        })
    }
}

impl AsError for command::send_reminder::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NothingDelivered(summary) => {
                let mut err = Error::from(ReminderError::NothingDelivered);
                if let Some(f) = summary.failures.first() {
                    err.message = format!("{}: {}", err.message, f.error);
                }
                err
            }
            Self::ReminderNotExists(_) => {
                api::query::ReminderError::NotExists.into()
            }
        })
    }
}

impl AsError for command::send_due_reminders::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::run_daily::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::create_task_template::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "OWNER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Owner `User` with the specified ID does not \
                             exist"]
                OwnerNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::OwnerNotExists(_) => Error::OwnerNotExists.into(),
        })
    }
}

impl AsError for command::update_task_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::AssignmentNotExists(_) => TaskError::NotExists.into(),
        })
    }
}

impl AsError for command::update_settings::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
