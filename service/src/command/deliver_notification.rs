//! [`Command`] for delivering a single notification [`Mail`].

use std::ops::RangeInclusive;

use common::{
    operations::{By, Deliver, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        send_log::{self, SentDateTime},
        Mail, SendLog,
    },
    infra::{database, mailer, Database, Mailer},
    Service,
};

use super::Command;

/// [`Command`] for delivering a single notification [`Mail`] and recording it
/// in the [`SendLog`].
#[derive(Clone, Debug)]
pub struct DeliverNotification {
    /// [`send_log::Subject`] the notification is about.
    pub subject: send_log::Subject,

    /// [`send_log::Label`] of the notification.
    pub label: send_log::Label,

    /// Rendered [`Mail`] to deliver.
    pub mail: Mail,

    /// [`DateTime`] the notification is delivered at.
    pub at: DateTime,

    /// Indicates whether the [`Mail`] is not delivered if a [`SendLog`] with
    /// the same [`send_log::Key`] exists for the local day of
    /// [`DeliverNotification::at`].
    pub deduplicate: bool,
}

impl DeliverNotification {
    /// Returns the [`send_log::Key`] of this notification.
    #[must_use]
    pub fn key(&self) -> send_log::Key {
        send_log::Key {
            subject: self.subject,
            label: self.label.clone(),
            email: self.mail.to.clone(),
        }
    }
}

/// Output of [`DeliverNotification`] [`Command`].
///
/// A [`Mail`] is only reported as [`Output::Sent`] once its [`SendLog`] is
/// stored. If the [`Mailer`] delivers it, but storing the [`SendLog`] fails,
/// an [`ExecutionError::Db`] is returned instead, and the [`Mail`] is sent
/// again by the next deduplicated delivery.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Output {
    /// [`Mail`] was delivered and recorded in the [`SendLog`].
    Sent,

    /// [`Mail`] was delivered today already.
    Deduplicated,

    /// [`Mail`] was skipped by the [`Mailer`].
    Skipped,
}

impl<Db, M> Command<DeliverNotification> for Service<Db, M>
where
    Db: Database<
            Select<
                By<
                    Option<SendLog>,
                    (send_log::Key, RangeInclusive<SentDateTime>),
                >,
            >,
            Ok = Option<SendLog>,
            Err = Traced<database::Error>,
        > + Database<Insert<SendLog>, Ok = (), Err = Traced<database::Error>>,
    M: Mailer<
        Deliver<Mail>,
        Ok = mailer::Delivery,
        Err = Traced<mailer::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeliverNotification,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let key = cmd.key();
        let DeliverNotification {
            subject,
            label,
            mail,
            at,
            deduplicate,
        } = cmd;

        if deduplicate {
            let today = self.local_date(at);
            let window = SendLog::day_window(today, self.config().utc_offset);
            let sent = self
                .database()
                .execute(Select(By::new((key, window))))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if sent.is_some() {
                return Ok(Output::Deduplicated);
            }
        }

        let email = mail.to.clone();
        let delivery = self
            .mailer()
            .execute(Deliver(mail))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if delivery == mailer::Delivery::Skipped {
            return Ok(Output::Skipped);
        }

        log::info!("`{label}` notification delivered to `{email}`");

        self.database()
            .execute(Insert(SendLog {
                id: send_log::Id::new(),
                subject,
                label,
                email,
                sent_at: at.coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output::Sent)
    }
}

/// Error of [`DeliverNotification`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Mailer`] error.
    #[display("`Mailer` failed: {_0}")]
    Mailer(mailer::Error),
}

/// Failed notification delivery.
#[derive(Debug)]
pub struct Failure {
    /// [`send_log::Key`] of the failed notification.
    pub key: send_log::Key,

    /// Error the delivery failed with.
    pub error: Traced<ExecutionError>,
}

/// Summary of multiple [`DeliverNotification`]s.
#[derive(Debug, Default, Display)]
#[display(
    "{sent} sent, {deduplicated} deduplicated, {skipped} skipped, {} failed",
    failures.len()
)]
pub struct Summary {
    /// Number of sent notifications.
    pub sent: usize,

    /// Number of notifications delivered earlier today already.
    pub deduplicated: usize,

    /// Number of notifications skipped by the [`Mailer`].
    pub skipped: usize,

    /// Failed notifications.
    ///
    /// Includes the ones delivered by the [`Mailer`] whose [`SendLog`]
    /// failed to be stored, so they may be received twice.
    pub failures: Vec<Failure>,
}

impl Summary {
    /// Records the result of a [`DeliverNotification`] with the provided
    /// [`send_log::Key`] into this [`Summary`].
    ///
    /// Failures are logged and kept, so the following notifications are
    /// still delivered.
    pub fn record(
        &mut self,
        key: send_log::Key,
        result: Result<Output, Traced<ExecutionError>>,
    ) {
        match result {
            Ok(Output::Sent) => self.sent += 1,
            Ok(Output::Deduplicated) => self.deduplicated += 1,
            Ok(Output::Skipped) => self.skipped += 1,
            Err(error) => {
                log::warn!(
                    "failed to deliver `{}` notification to `{}`: {error}",
                    key.label,
                    key.email,
                );
                self.failures.push(Failure { key, error });
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::UtcOffset;

    use crate::{
        domain::{reminder, send_log, Email, Mail},
        infra::{
            database::{self, Memory},
            mailer::Recording,
        },
        test_support::{at, service_with},
        Command as _,
    };

    use super::{DeliverNotification, ExecutionError, Output};

    fn notification(rfc3339: &str, deduplicate: bool) -> DeliverNotification {
        DeliverNotification {
            subject: send_log::Subject::Reminder(reminder::Id::default()),
            label: send_log::Label::new("week").unwrap(),
            mail: Mail {
                to: Email::new("jane@example.com").unwrap(),
                subject: "Subject".into(),
                html: "<p>Body</p>".into(),
            },
            at: at(rfc3339),
            deduplicate,
        }
    }

    #[tokio::test]
    async fn deduplicates_within_local_day() {
        let db = Memory::default();
        let mailer = Recording::default();
        let offset = UtcOffset::from_hms(3, 0, 0).unwrap();
        let svc = service_with(db.clone(), mailer.clone(), offset);

        let first = svc
            .execute(notification("2025-06-10T08:00:00Z", true))
            .await
            .unwrap();
        // 23:30 local time of the same day.
        let second = svc
            .execute(notification("2025-06-10T20:30:00Z", true))
            .await
            .unwrap();
        // 00:30 local time of the next day.
        let third = svc
            .execute(notification("2025-06-10T21:30:00Z", true))
            .await
            .unwrap();

        assert_eq!(first, Output::Sent);
        assert_eq!(second, Output::Deduplicated);
        assert_eq!(third, Output::Sent);
        assert_eq!(mailer.sent().len(), 2);
        assert_eq!(db.lock().send_logs.len(), 2);
    }

    #[tokio::test]
    async fn sends_again_without_deduplication() {
        let db = Memory::default();
        let mailer = Recording::default();
        let svc = service_with(db.clone(), mailer.clone(), UtcOffset::UTC);

        for _ in 0..2 {
            let out = svc
                .execute(notification("2025-06-10T08:00:00Z", false))
                .await
                .unwrap();
            assert_eq!(out, Output::Sent);
        }

        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn records_nothing_on_failure_or_skip() {
        let db = Memory::default();
        let failing = Recording::default();
        failing.fail_for(&Email::new("jane@example.com").unwrap());
        let svc = service_with(db.clone(), failing, UtcOffset::UTC);

        assert!(svc
            .execute(notification("2025-06-10T08:00:00Z", true))
            .await
            .is_err());

        let svc =
            service_with(db.clone(), Recording::disabled(), UtcOffset::UTC);
        let out = svc
            .execute(notification("2025-06-10T08:00:00Z", true))
            .await
            .unwrap();

        assert_eq!(out, Output::Skipped);
        assert!(db.lock().send_logs.is_empty());
    }

    #[tokio::test]
    async fn sends_again_when_log_is_not_stored() {
        let db = Memory::default();
        db.lock().refuse_send_logs = true;
        let mailer = Recording::default();
        let svc = service_with(db.clone(), mailer.clone(), UtcOffset::UTC);

        let err = svc
            .execute(notification("2025-06-10T08:00:00Z", true))
            .await
            .unwrap_err();
        db.lock().refuse_send_logs = false;
        let second = svc
            .execute(notification("2025-06-10T09:00:00Z", true))
            .await
            .unwrap();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Db(database::Error::Refused),
        ));
        assert_eq!(second, Output::Sent);
        assert_eq!(mailer.sent().len(), 2);
        assert_eq!(db.lock().send_logs.len(), 1);
    }
}
