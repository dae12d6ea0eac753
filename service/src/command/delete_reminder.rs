//! [`Command`] for deleting a [`Reminder`].

use common::operations::{By, Commit, Delete, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{reminder, Reminder},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Reminder`] along with its send log.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteReminder {
    /// ID of the [`Reminder`] to delete.
    pub reminder_id: reminder::Id,
}

impl<Db, M> Command<DeleteReminder> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Delete<By<Reminder, reminder::Id>>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteReminder,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteReminder { reminder_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let deleted = tx
            .execute(Delete(By::new(reminder_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::ReminderNotExists(reminder_id)));
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`DeleteReminder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Reminder`] with the provided ID does not exist.
    #[display("`Reminder(id: {_0})` does not exist")]
    ReminderNotExists(#[error(not(source))] reminder::Id),
}

#[cfg(test)]
mod spec {
    use common::{DateTime, UtcOffset};

    use crate::{
        domain::{reminder, send_log, Email, Reminder, SendLog},
        test_support::service,
        Command as _,
    };

    use super::{DeleteReminder, ExecutionError};

    #[tokio::test]
    async fn deletes_with_send_log() {
        let svc = service(UtcOffset::UTC);
        let id = reminder::Id::new();
        {
            let mut state = svc.database().lock();
            state.reminders.push(Reminder {
                id,
                due_date: "2025-06-17".parse().unwrap(),
                description: reminder::Description::new("Visa").unwrap(),
                active: true,
                kind: reminder::Kind::new("visa").unwrap(),
                schedules: vec![],
                recipients: vec![],
                created_at: DateTime::now().coerce(),
            });
            state.send_logs.push(SendLog {
                id: send_log::Id::new(),
                subject: send_log::Subject::Reminder(id),
                label: send_log::Label::manual(),
                email: Email::new("hr@example.com").unwrap(),
                sent_at: DateTime::now().coerce(),
            });
        }

        svc.execute(DeleteReminder { reminder_id: id }).await.unwrap();

        let state = svc.database().lock();
        assert!(state.reminders.is_empty());
        assert!(state.send_logs.is_empty());
    }

    #[tokio::test]
    async fn fails_for_unknown_reminder() {
        let svc = service(UtcOffset::UTC);

        let err = svc
            .execute(DeleteReminder {
                reminder_id: reminder::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ReminderNotExists(_)));
    }
}
