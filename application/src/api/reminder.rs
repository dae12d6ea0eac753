//! [`Reminder`]-related definitions.

use common::{Date, DateTime, TimeOfDay};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar,
};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, define_error, Context, Error};

/// A reminder about a due date, mailed to its recipients on schedule.
#[derive(Clone, Debug, From)]
pub struct Reminder(domain::Reminder);

/// A reminder about a due date, mailed to its recipients on schedule.
#[graphql_object(context = Context)]
impl Reminder {
    /// Unique identifier of this `Reminder`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Date` this `Reminder` is about.
    #[must_use]
    pub fn due_date(&self) -> Date {
        self.0.due_date
    }

    /// Description of this `Reminder`.
    #[must_use]
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Indicator whether this `Reminder` is sent on schedule.
    #[must_use]
    pub fn active(&self) -> bool {
        self.0.active
    }

    /// Free-form kind of this `Reminder`.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.clone().into()
    }

    /// `ReminderSchedule`s this `Reminder` is sent on.
    #[must_use]
    pub fn schedules(&self) -> Vec<Schedule> {
        self.0.schedules.iter().cloned().map(Into::into).collect()
    }

    /// Recipients of this `Reminder`.
    #[must_use]
    pub fn recipients(&self) -> Vec<scalar::Email> {
        self.0.recipients.iter().cloned().map(Into::into).collect()
    }

    /// Log of this `Reminder` deliveries.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reminder.sendLogs",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn send_logs(
        &self,
        ctx: &Context,
    ) -> Result<Vec<SendLog>, Error> {
        api::Query::reminder_send_logs(self.id(), ctx).await
    }

    /// `DateTime` when this `Reminder` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Point in time a `Reminder` is sent at.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ReminderSchedule")]
pub struct Schedule {
    /// Label distinguishing this `ReminderSchedule` in the send log.
    pub label: Label,

    /// Number of days before the due date to send the `Reminder` on.
    pub days_before: i32,

    /// Local time of day from which the `Reminder` is sent, if any.
    pub time_of_day: Option<TimeOfDay>,
}

impl From<domain::reminder::Schedule> for Schedule {
    fn from(schedule: domain::reminder::Schedule) -> Self {
        let domain::reminder::Schedule {
            label,
            days_before,
            time_of_day,
        } = schedule;
        Self {
            label: label.into(),
            days_before: days_before.get().into(),
            time_of_day,
        }
    }
}

/// Point in time a `Reminder` is sent at.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ReminderScheduleInput")]
pub struct ScheduleInput {
    /// Label distinguishing the `ReminderSchedule` in the send log.
    pub label: Label,

    /// Number of days before the due date to send the `Reminder` on.
    pub days_before: i32,

    /// Local time of day from which the `Reminder` is sent, if any.
    pub time_of_day: Option<TimeOfDay>,
}

impl TryFrom<ScheduleInput> for domain::reminder::Schedule {
    type Error = Error;

    fn try_from(input: ScheduleInput) -> Result<Self, Self::Error> {
        let ScheduleInput {
            label,
            days_before,
            time_of_day,
        } = input;
        Ok(Self {
            label: label.into(),
            days_before: u16::try_from(days_before)
                .map_err(|_| ScheduleError::InvalidDaysBefore)?
                .into(),
            time_of_day,
        })
    }
}

/// Record of a single `Reminder` delivery.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ReminderSendLog")]
pub struct SendLog {
    /// Label of the `ReminderSchedule` the `Reminder` was sent on.
    pub label: Label,

    /// Recipient the `Reminder` was sent to.
    pub email: scalar::Email,

    /// `DateTime` when the `Reminder` was sent.
    pub sent_at: DateTime,
}

impl From<domain::SendLog> for SendLog {
    fn from(log: domain::SendLog) -> Self {
        Self {
            label: log.label.into(),
            email: log.email.into(),
            sent_at: log.sent_at.coerce(),
        }
    }
}

/// Unique identifier of a `Reminder`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::reminder::Id)]
#[into(domain::reminder::Id)]
#[graphql(name = "ReminderId", transparent)]
pub struct Id(Uuid);

/// Description of a `Reminder`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ReminderDescription",
    with = scalar::Via::<domain::reminder::Description>,
)]
pub struct Description(domain::reminder::Description);

/// Free-form kind of a `Reminder`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ReminderKind",
    with = scalar::Via::<domain::reminder::Kind>,
)]
pub struct Kind(domain::reminder::Kind);

/// Label of a `ReminderSchedule`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ScheduleLabel",
    with = scalar::Via::<domain::send_log::Label>,
)]
pub struct Label(domain::send_log::Label);

define_error! {
    enum ScheduleError {
        #[code = "INVALID_DAYS_BEFORE"]
        #[status = BAD_REQUEST]
        #[message = "`daysBefore` of a `ReminderSchedule` must be within \
                     0..=65535 range"]
        InvalidDaysBefore,
    }
}
