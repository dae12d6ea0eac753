//! [`DispatchNotifications`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Perform, Start},
    DateTime,
};
use derive_more::{Display, Error as StdError, From};
use smart_default::SmartDefault;
use tokio::time::{interval, MissedTickBehavior};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{
        deliver_notification::Summary, run_daily, send_due_reminders,
        RunDaily, SendDueReminders,
    },
    Command, Service,
};

use super::Task;

/// Configuration for [`DispatchNotifications`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Indicates whether [`DispatchNotifications`] runs at all.
    pub enabled: bool,

    /// Interval between notifications dispatching.
    #[default(time::Duration::from_secs(15 * 60))]
    pub interval: time::Duration,
}

/// [`Task`] for periodic dispatching of birthday, jubilee and due reminder
/// notifications.
#[derive(Clone, Copy, Debug)]
pub struct DispatchNotifications<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db, M> Task<Start<By<DispatchNotifications<Self>, Config>>>
    for Service<Db, M>
where
    DispatchNotifications<Service<Db, M>>:
        Task<Perform<()>, Ok = (), Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<DispatchNotifications<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = DispatchNotifications {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::DispatchNotifications` failed: {e}");
            });
        }
    }
}

impl<Db, M> Task<Perform<()>> for DispatchNotifications<Service<Db, M>>
where
    Service<Db, M>: Command<
            RunDaily,
            Ok = Summary,
            Err = Traced<run_daily::ExecutionError>,
        > + Command<
            SendDueReminders,
            Ok = Summary,
            Err = Traced<send_due_reminders::ExecutionError>,
        >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let at = DateTime::now();

        let daily = self.service.execute(RunDaily { at }).await;
        if let Ok(summary) = &daily {
            log::info!("birthdays and jubilees dispatched: {summary}");
        }
        let reminders = self.service.execute(SendDueReminders { at }).await;
        if let Ok(summary) = &reminders {
            log::info!("due reminders dispatched: {summary}");
        }

        _ = daily.map_err(ExecutionError::from)?;
        reminders.map_err(ExecutionError::from).map(drop)
    }
}

/// Error of [`DispatchNotifications`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// [`RunDaily`] failed.
    #[display("`RunDaily` failed: {_0}")]
    RunDaily(Traced<run_daily::ExecutionError>),

    /// [`SendDueReminders`] failed.
    #[display("`SendDueReminders` failed: {_0}")]
    SendDueReminders(Traced<send_due_reminders::ExecutionError>),
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{Perform, Update},
        Date, DateTime, UtcOffset,
    };

    use crate::{
        domain::{employee, Email, Employee, Settings},
        infra::{database::Memory, mailer::Recording},
        test_support::service_with,
        Task as _,
    };

    use super::{Config, DispatchNotifications};

    #[tokio::test]
    async fn dispatches_daily_notifications_on_each_run() {
        let db = Memory::default();
        db.execute(Update(Settings {
            notification_recipients: vec![Email::new("hr@example.com")
                .unwrap()],
            ..Settings::default()
        }))
        .await
        .unwrap();
        db.lock().employees.push(Employee {
            id: employee::Id::new(),
            first_name: employee::Name::new("Jane").unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: Date::today(UtcOffset::UTC).with_year(2000),
            start_date: None,
            exit_date: None,
            status: employee::Status::Active,
            created_at: DateTime::now().coerce(),
        });
        let mailer = Recording::default();
        let task = DispatchNotifications {
            config: Config::default(),
            service: service_with(db, mailer.clone(), UtcOffset::UTC),
        };

        task.execute(Perform(())).await.unwrap();
        task.execute(Perform(())).await.unwrap();

        assert_eq!(mailer.sent().len(), 1);
    }
}
