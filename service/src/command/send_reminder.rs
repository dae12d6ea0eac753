//! [`Command`] for sending a [`Reminder`] manually.

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    command::{
        deliver_notification::{self, Summary},
        DeliverNotification,
    },
    domain::{mail, reminder, send_log, Reminder, Settings},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for sending a [`Reminder`] to all its recipients right away.
///
/// Neither the [`reminder::Schedule`]s nor the daily deduplication are taken
/// into account. Every successful delivery is logged with the
/// [`send_log::Label::MANUAL`].
#[derive(Clone, Copy, Debug)]
pub struct SendReminder {
    /// ID of the [`Reminder`] to send.
    pub reminder_id: reminder::Id,

    /// [`DateTime`] the [`Reminder`] is sent at.
    pub at: DateTime,
}

impl<Db, M> Command<SendReminder> for Service<Db, M>
where
    Db: Database<
            Select<By<Option<Reminder>, reminder::Id>>,
            Ok = Option<Reminder>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Settings, ()>>,
            Ok = Settings,
            Err = Traced<database::Error>,
        >,
    Self: Command<
        DeliverNotification,
        Ok = deliver_notification::Output,
        Err = Traced<deliver_notification::ExecutionError>,
    >,
{
    type Ok = Summary;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SendReminder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendReminder { reminder_id, at } = cmd;

        let reminder = self
            .database()
            .execute(Select(By::new(reminder_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ReminderNotExists(reminder_id))
            .map_err(tracerr::wrap!())?;
        let settings = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let vars =
            mail::Variables::reminder(&reminder, None, self.local_date(at));
        let mut summary = Summary::default();
        for email in &reminder.recipients {
            let notification = DeliverNotification {
                subject: send_log::Subject::Reminder(reminder.id),
                label: send_log::Label::manual(),
                mail: settings.reminder_mail.render(email.clone(), &vars),
                at,
                deduplicate: false,
            };
            let key = notification.key();
            summary.record(key, self.execute(notification).await);
        }

        if summary.sent == 0 && !summary.failures.is_empty() {
            return Err(tracerr::new!(E::NothingDelivered(summary)));
        }
        Ok(summary)
    }
}

/// Error of [`SendReminder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Reminder`] with the provided ID does not exist.
    #[display("`Reminder(id: {_0})` does not exist")]
    ReminderNotExists(#[error(not(source))] reminder::Id),

    /// Delivery failed for every recipient.
    #[display("Nothing delivered: {_0}")]
    NothingDelivered(#[error(not(source))] Summary),
}

#[cfg(test)]
mod spec {
    use common::{Date, DateTime, UtcOffset};

    use crate::{
        domain::{reminder, send_log, Email, Reminder},
        infra::{database::Memory, mailer::Recording},
        test_support::{at, service_with},
        Command as _,
    };

    use super::{ExecutionError, SendReminder};

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn reminder(active: bool) -> Reminder {
        Reminder {
            id: reminder::Id::new(),
            due_date: "2025-06-17".parse::<Date>().unwrap(),
            description: reminder::Description::new("Visa renewal").unwrap(),
            active,
            kind: reminder::Kind::new("visa").unwrap(),
            schedules: vec![],
            recipients: vec![email("a@example.com"), email("b@example.com")],
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn sends_regardless_of_schedules_and_activity() {
        let db = Memory::default();
        let mailer = Recording::default();
        let r = reminder(false);
        let id = r.id;
        db.lock().reminders.push(r);
        let svc = service_with(db.clone(), mailer.clone(), UtcOffset::UTC);

        for _ in 0..2 {
            let summary = svc
                .execute(SendReminder {
                    reminder_id: id,
                    at: at("2025-06-10T10:00:00Z"),
                })
                .await
                .unwrap();
            assert_eq!(summary.sent, 2);
        }

        assert_eq!(mailer.sent().len(), 4);
        let logs = db.lock().send_logs.clone();
        assert_eq!(logs.len(), 4);
        assert!(logs.iter().all(|l| l.label == send_log::Label::manual()));
        assert!(mailer.sent()[0].html.contains("7 day(s) left"));
    }

    #[tokio::test]
    async fn succeeds_partially() {
        let db = Memory::default();
        let mailer = Recording::default();
        let r = reminder(true);
        let id = r.id;
        db.lock().reminders.push(r);
        mailer.fail_for(&email("a@example.com"));
        let svc = service_with(db, mailer, UtcOffset::UTC);

        let summary = svc
            .execute(SendReminder {
                reminder_id: id,
                at: at("2025-06-10T10:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failures.len(), 1);
    }

    #[tokio::test]
    async fn fails_when_nothing_delivered() {
        let db = Memory::default();
        let mailer = Recording::default();
        let r = reminder(true);
        let id = r.id;
        db.lock().reminders.push(r);
        mailer.fail_for(&email("a@example.com"));
        mailer.fail_for(&email("b@example.com"));
        let svc = service_with(db.clone(), mailer, UtcOffset::UTC);

        let err = svc
            .execute(SendReminder {
                reminder_id: id,
                at: at("2025-06-10T10:00:00Z"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NothingDelivered(s) if s.failures.len() == 2,
        ));
        assert!(db.lock().send_logs.is_empty());
    }

    #[tokio::test]
    async fn fails_for_unknown_reminder() {
        let svc = service_with(
            Memory::default(),
            Recording::default(),
            UtcOffset::UTC,
        );

        let err = svc
            .execute(SendReminder {
                reminder_id: reminder::Id::new(),
                at: at("2025-06-10T10:00:00Z"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ReminderNotExists(_)));
    }
}
