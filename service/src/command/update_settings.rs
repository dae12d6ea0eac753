//! [`Command`] for updating the [`Settings`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{jubilee::MilestoneYears, mail, Email, Settings},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`Settings`].
///
/// Fields set to [`None`] are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateSettings {
    /// New [`Settings::milestone_years`].
    pub milestone_years: Option<MilestoneYears>,

    /// New [`Settings::notification_recipients`].
    pub notification_recipients: Option<Vec<Email>>,

    /// New [`Settings::reminder_mail`].
    pub reminder_mail: Option<mail::Template>,

    /// New [`Settings::birthday_mail`].
    pub birthday_mail: Option<mail::Template>,

    /// New [`Settings::jubilee_mail`].
    pub jubilee_mail: Option<mail::Template>,
}

impl<Db, M> Command<UpdateSettings> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Settings, ()>>,
            Ok = Settings,
            Err = Traced<database::Error>,
        > + Database<Update<Settings>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Settings;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateSettings,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateSettings {
            milestone_years,
            notification_recipients,
            reminder_mail,
            birthday_mail,
            jubilee_mail,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut settings = tx
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(years) = milestone_years {
            settings.milestone_years = years;
        }
        if let Some(recipients) = notification_recipients {
            settings.notification_recipients = recipients;
        }
        if let Some(template) = reminder_mail {
            settings.reminder_mail = template;
        }
        if let Some(template) = birthday_mail {
            settings.birthday_mail = template;
        }
        if let Some(template) = jubilee_mail {
            settings.jubilee_mail = template;
        }

        tx.execute(Update(settings.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(settings)
    }
}

/// Error of [`UpdateSettings`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::UtcOffset;

    use crate::{
        domain::{mail, Settings},
        test_support::service,
        Command as _,
    };

    use super::UpdateSettings;

    #[tokio::test]
    async fn keeps_untouched_values() {
        let svc = service(UtcOffset::UTC);

        let settings = svc
            .execute(UpdateSettings {
                milestone_years: Some("1, 3".parse().unwrap()),
                birthday_mail: Some(mail::Template::new("Hi", "<p>Hi</p>")),
                ..UpdateSettings::default()
            })
            .await
            .unwrap();

        let defaults = Settings::default();
        assert_eq!(settings.milestone_years.to_string(), "1,3");
        assert_eq!(settings.birthday_mail.subject, "Hi");
        assert_eq!(settings.jubilee_mail, defaults.jubilee_mail);
        assert_eq!(svc.database().lock().settings, Some(settings));
    }
}
