//! [`Command`] for sending the [`Reminder`] notifications due today.

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
    domain::{mail, send_log, Reminder, Settings},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for sending the [`Reminder`] notifications due today.
///
/// Every recipient of every due [`reminder::Schedule`] of an active
/// [`Reminder`] is notified at most once per local calendar day.
///
/// [`reminder::Schedule`]: crate::domain::reminder::Schedule
#[derive(Clone, Copy, Debug)]
pub struct SendDueReminders {
    /// [`DateTime`] to evaluate the [`Reminder`]s at.
    pub at: DateTime,
}

impl<Db, M> Command<SendDueReminders> for Service<Db, M>
where
    Db: Database<
            Select<By<Vec<Reminder>, read::reminder::Filter>>,
            Ok = Vec<Reminder>,
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

    async fn execute(
        &self,
        cmd: SendDueReminders,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendDueReminders { at } = cmd;
        let today = self.local_date(at);
        let now = at.time_of_day(self.config().utc_offset);

        let reminders = self
            .database()
            .execute(Select(By::new(read::reminder::Filter {
                active: Some(true),
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let settings = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut summary = Summary::default();
        for reminder in &reminders {
            for schedule in reminder.due_schedules(today, now) {
                let vars =
                    mail::Variables::reminder(reminder, Some(schedule), today);
                for email in &reminder.recipients {
                    let notification = DeliverNotification {
                        subject: send_log::Subject::Reminder(reminder.id),
                        label: schedule.label.clone(),
                        mail: settings
                            .reminder_mail
                            .render(email.clone(), &vars),
                        at,
                        deduplicate: true,
                    };
                    let key = notification.key();
                    summary.record(key, self.execute(notification).await);
                }
            }
        }
        Ok(summary)
    }
}

/// Error of [`SendDueReminders`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
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

    use super::SendDueReminders;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn reminder(schedules: Vec<reminder::Schedule>) -> Reminder {
        Reminder {
            id: reminder::Id::new(),
            due_date: "2025-06-17".parse::<Date>().unwrap(),
            description: reminder::Description::new("Visa renewal").unwrap(),
            active: true,
            kind: reminder::Kind::new("visa").unwrap(),
            schedules,
            recipients: vec![
                email("hr@example.com"),
                email("boss@example.com"),
            ],
            created_at: DateTime::now().coerce(),
        }
    }

    fn schedule(
        label: &str,
        days: u16,
        at: Option<&str>,
    ) -> reminder::Schedule {
        reminder::Schedule {
            label: send_log::Label::new(label).unwrap(),
            days_before: days.into(),
            time_of_day: at.map(|t| t.parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn sends_once_per_day() {
        let db = Memory::default();
        let mailer = Recording::default();
        db.lock()
            .reminders
            .push(reminder(vec![schedule("T-7", 7, None)]));
        let svc = service_with(db.clone(), mailer.clone(), UtcOffset::UTC);

        let first = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T07:00:00Z"),
            })
            .await
            .unwrap();
        let second = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T18:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(first.sent, 2);
        assert_eq!(second.sent, 0);
        assert_eq!(second.deduplicated, 2);
        assert_eq!(mailer.sent().len(), 2);
        assert_eq!(db.lock().send_logs.len(), 2);

        let mail = &mailer.sent()[0];
        assert_eq!(mail.subject, "Reminder: Visa renewal (2025-06-17)");
        assert!(mail.html.contains("7 day(s) left"), "html: {}", mail.html);
    }

    #[tokio::test]
    async fn waits_for_time_of_day() {
        let db = Memory::default();
        let mailer = Recording::default();
        db.lock()
            .reminders
            .push(reminder(vec![schedule("T-7", 7, Some("09:00"))]));
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        let svc = service_with(db, mailer.clone(), offset);

        // 08:59 local time.
        let early = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T06:59:00Z"),
            })
            .await
            .unwrap();
        // 09:00 local time.
        let on_time = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T07:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(early.sent, 0);
        assert_eq!(on_time.sent, 2);
    }

    #[tokio::test]
    async fn fires_only_on_target_day() {
        let db = Memory::default();
        let mailer = Recording::default();
        db.lock().reminders.push(reminder(vec![
            schedule("T-7", 7, None),
            schedule("T-0", 0, None),
        ]));
        let svc = service_with(db, mailer.clone(), UtcOffset::UTC);

        for (day, sent) in [
            ("2025-06-09T12:00:00Z", 0),
            ("2025-06-10T12:00:00Z", 2),
            ("2025-06-11T12:00:00Z", 0),
            ("2025-06-17T12:00:00Z", 2),
        ] {
            let summary = svc
                .execute(SendDueReminders { at: at(day) })
                .await
                .unwrap();
            assert_eq!(summary.sent, sent, "day: {day}");
        }
        assert_eq!(mailer.sent().len(), 4);
    }

    #[tokio::test]
    async fn ignores_inactive_reminders() {
        let db = Memory::default();
        let mailer = Recording::default();
        let mut r = reminder(vec![schedule("T-7", 7, None)]);
        r.active = false;
        db.lock().reminders.push(r);
        let svc = service_with(db, mailer.clone(), UtcOffset::UTC);

        let summary = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T12:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(summary.sent, 0);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn retries_failed_recipients_only() {
        let db = Memory::default();
        let mailer = Recording::default();
        db.lock()
            .reminders
            .push(reminder(vec![schedule("T-7", 7, None)]));
        mailer.fail_for(&email("hr@example.com"));
        let svc = service_with(db.clone(), mailer.clone(), UtcOffset::UTC);

        let first = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T10:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(first.sent, 1);
        assert_eq!(first.failures.len(), 1);
        assert_eq!(first.failures[0].key.email, email("hr@example.com"));

        mailer.recover(&email("hr@example.com"));
        let second = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T11:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(second.sent, 1);
        assert_eq!(second.deduplicated, 1);
        assert!(second.failures.is_empty());
        assert_eq!(db.lock().send_logs.len(), 2);
    }

    #[tokio::test]
    async fn does_not_log_skipped_deliveries() {
        let db = Memory::default();
        db.lock()
            .reminders
            .push(reminder(vec![schedule("T-7", 7, None)]));
        let svc =
            service_with(db.clone(), Recording::disabled(), UtcOffset::UTC);

        let summary = svc
            .execute(SendDueReminders {
                at: at("2025-06-10T10:00:00Z"),
            })
            .await
            .unwrap();

        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.sent, 0);
        assert!(db.lock().send_logs.is_empty());
    }
}
