//! [`Command`] for creating a new [`Reminder`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{reminder, send_log, Email, Reminder},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Reminder`].
#[derive(Clone, Debug)]
pub struct CreateReminder {
    /// Due [`Date`] of a new [`Reminder`].
    pub due_date: Date,

    /// [`reminder::Description`] of a new [`Reminder`].
    pub description: reminder::Description,

    /// Indicator whether a new [`Reminder`] is active.
    pub active: bool,

    /// [`reminder::Kind`] of a new [`Reminder`].
    pub kind: reminder::Kind,

    /// [`reminder::Schedule`]s of a new [`Reminder`].
    pub schedules: Vec<reminder::Schedule>,

    /// Recipients of a new [`Reminder`].
    pub recipients: Vec<Email>,
}

impl<Db, M> Command<CreateReminder> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Reminder>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reminder;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReminder,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReminder {
            due_date,
            description,
            active,
            kind,
            schedules,
            recipients,
        } = cmd;

        if let Some(label) = reminder::duplicate_label(&schedules) {
            return Err(tracerr::new!(E::DuplicateScheduleLabel(
                label.clone()
            )));
        }

        let reminder = Reminder {
            id: reminder::Id::new(),
            due_date,
            description,
            active,
            kind,
            schedules,
            recipients,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
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

/// Error of [`CreateReminder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Several [`reminder::Schedule`]s share the same [`send_log::Label`].
    #[display("`{_0}` schedule label is duplicated")]
    DuplicateScheduleLabel(#[error(not(source))] send_log::Label),
}

#[cfg(test)]
mod spec {
    use common::UtcOffset;

    use crate::{
        domain::{reminder, send_log, Email},
        test_support::service,
        Command as _,
    };

    use super::{CreateReminder, ExecutionError};

    fn schedule(label: &str, days: u16) -> reminder::Schedule {
        reminder::Schedule {
            label: send_log::Label::new(label).unwrap(),
            days_before: days.into(),
            time_of_day: None,
        }
    }

    fn create(schedules: Vec<reminder::Schedule>) -> CreateReminder {
        CreateReminder {
            due_date: "2025-06-17".parse().unwrap(),
            description: reminder::Description::new("Probation ends").unwrap(),
            active: true,
            kind: reminder::Kind::new("probation").unwrap(),
            schedules,
            recipients: vec![Email::new("hr@example.com").unwrap()],
        }
    }

    #[tokio::test]
    async fn stores_reminder() {
        let svc = service(UtcOffset::UTC);

        let reminder = svc
            .execute(create(vec![schedule("T-7", 7), schedule("T-0", 0)]))
            .await
            .unwrap();

        let state = svc.database().lock();
        assert_eq!(state.reminders.len(), 1);
        assert_eq!(state.reminders[0].id, reminder.id);
        assert_eq!(state.reminders[0].schedules, reminder.schedules);
    }

    #[tokio::test]
    async fn rejects_duplicate_labels() {
        let svc = service(UtcOffset::UTC);

        let err = svc
            .execute(create(vec![schedule("T-7", 7), schedule("T-7", 3)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DuplicateScheduleLabel(_),
        ));
        assert!(svc.database().lock().reminders.is_empty());
    }
}
