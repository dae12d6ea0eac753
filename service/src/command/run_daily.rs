//! [`Command`] for sending today's birthday and jubilee notifications.

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
    domain::{jubilee, mail, send_log, Employee, Settings},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for notifying the [`Settings::notification_recipients`] about
/// today's birthdays and jubilees of the present [`Employee`]s.
///
/// Every notification is delivered at most once per local calendar day.
#[derive(Clone, Copy, Debug)]
pub struct RunDaily {
    /// [`DateTime`] to run at.
    pub at: DateTime,
}

impl<Db, M> Command<RunDaily> for Service<Db, M>
where
    Db: Database<
            Select<By<Vec<Employee>, read::employee::Filter>>,
            Ok = Vec<Employee>,
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

    async fn execute(&self, cmd: RunDaily) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RunDaily { at } = cmd;
        let today = self.local_date(at);

        let employees = self
            .database()
            .execute(Select(By::new(read::employee::Filter::present())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let settings = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let birthdays = employees
            .iter()
            .filter(|e| {
                e.birth_date
                    .is_some_and(|b| jubilee::is_birthday(b, today))
            })
            .map(|e| {
                (
                    e.id,
                    send_log::Label::birthday(),
                    &settings.birthday_mail,
                    mail::Variables::birthday(e, today),
                )
            });
        let jubilees = jubilee::hits(
            &employees,
            &settings.milestone_years,
            jubilee::Target::On(today),
        )
        .into_iter()
        .map(|hit| {
            (
                hit.employee.id,
                send_log::Label::jubilee(),
                &settings.jubilee_mail,
                mail::Variables::jubilee(&hit),
            )
        });

        let mut summary = Summary::default();
        for (id, label, template, vars) in birthdays.chain(jubilees) {
            for email in &settings.notification_recipients {
                let notification = DeliverNotification {
                    subject: send_log::Subject::Employee(id),
                    label: label.clone(),
                    mail: template.render(email.clone(), &vars),
                    at,
                    deduplicate: true,
                };
                let key = notification.key();
                summary.record(key, self.execute(notification).await);
            }
        }
        Ok(summary)
    }
}

/// Error of [`RunDaily`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
