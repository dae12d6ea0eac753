//! [`Command`] for updating a [`Reminder`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{reminder, send_log, Email, Reminder},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Reminder`].
///
/// Fields set to [`None`] are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateReminder {
    /// ID of the [`Reminder`] to update.
    pub reminder_id: reminder::Id,

    /// New due [`Date`].
    pub due_date: Option<Date>,

    /// New [`reminder::Description`].
    pub description: Option<reminder::Description>,

    /// New activity indicator.
    pub active: Option<bool>,

    /// New [`reminder::Kind`].
    pub kind: Option<reminder::Kind>,

    /// New [`reminder::Schedule`]s replacing the existing ones.
    pub schedules: Option<Vec<reminder::Schedule>>,

    /// New recipients replacing the existing ones.
    pub recipients: Option<Vec<Email>>,
}

impl<Db, M> Command<UpdateReminder> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Reminder>, reminder::Id>>,
            Ok = Option<Reminder>,
            Err = Traced<database::Error>,
        > + Database<Insert<Reminder>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reminder;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateReminder,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateReminder {
            reminder_id,
            due_date,
            description,
            active,
            kind,
            schedules,
            recipients,
        } = cmd;

        if let Some(label) =
            schedules.as_deref().and_then(reminder::duplicate_label)
        {
            return Err(tracerr::new!(E::DuplicateScheduleLabel(
                label.clone()
            )));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut reminder = tx
            .execute(Select(By::<Option<Reminder>, _>::new(reminder_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReminderNotExists(reminder_id))
            .map_err(tracerr::wrap!())?;

        if let Some(date) = due_date {
            reminder.due_date = date;
        }
        if let Some(description) = description {
            reminder.description = description;
        }
        if let Some(active) = active {
            reminder.active = active;
        }
        if let Some(kind) = kind {
            reminder.kind = kind;
        }
        if let Some(schedules) = schedules {
            reminder.schedules = schedules;
        }
        if let Some(recipients) = recipients {
            reminder.recipients = recipients;
        }

        tx.execute(Insert(reminder.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(reminder)
    }
}

/// Error of [`UpdateReminder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Several [`reminder::Schedule`]s share the same [`send_log::Label`].
    #[display("`{_0}` schedule label is duplicated")]
    DuplicateScheduleLabel(#[error(not(source))] send_log::Label),

    /// [`Reminder`] with the provided ID does not exist.
    #[display("`Reminder(id: {_0})` does not exist")]
    ReminderNotExists(#[error(not(source))] reminder::Id),
}
