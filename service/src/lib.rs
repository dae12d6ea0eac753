//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::time;

use common::{
    operations::{By, Start},
    Date, DateTime, UtcOffset,
};
use derive_more::{Debug, Display, Error};

#[cfg(doc)]
use infra::{Database, Mailer};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Lifetime of a newly created [`domain::user::Session`].
    pub session_ttl: time::Duration,

    /// [`UtcOffset`] defining the local calendar day of notifications.
    pub utc_offset: UtcOffset,

    /// [`task::DispatchNotifications`] configuration.
    pub dispatch_notifications: task::dispatch_notifications::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, M> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Mailer`] of this [`Service`].
    mailer: M,
}

impl<Db, M> Service<Db, M> {
    /// Creates a new [`Service`] with the provided parameters.
    ///
    /// [`task::DispatchNotifications`] is spawned in the returned
    /// [`task::Background`] only if enabled in the [`Config`].
    pub fn new(
        config: Config,
        database: Db,
        mailer: M,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::DispatchNotifications<Self>,
                        task::dispatch_notifications::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            database,
            mailer,
        };

        let mut bg = task::Background::default();
        let conf = this.config().dispatch_notifications;
        if conf.enabled {
            let svc = this.clone();
            bg.spawn("DispatchNotifications", async move {
                svc.execute(Start(By::new(conf))).await
            });
        }

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Mailer`] of this [`Service`].
    #[must_use]
    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Returns the local calendar [`Date`] of the provided [`DateTime`].
    #[must_use]
    pub fn local_date(&self, at: DateTime) -> Date {
        at.date(self.config.utc_offset)
    }
}

/// Shortcut for the error of starting a [`Task`].
type TaskStartError<Svc, T, Args> = <Svc as Task<Start<By<T, Args>>>>::Err;

/// Error of starting a [`Service`].
#[derive(Debug, Display, Error)]
pub enum StartupError<Svc>
where
    Svc: Task<
        Start<
            By<
                task::DispatchNotifications<Svc>,
                task::dispatch_notifications::Config,
            >,
        >,
    >,
{
    /// [`task::DispatchNotifications`] failed to start.
    DispatchNotificationsTask(
        TaskStartError<
            Svc,
            task::DispatchNotifications<Svc>,
            task::dispatch_notifications::Config,
        >,
    ),
}

#[cfg(test)]
mod test_support {
    //! Shared helpers of [`Service`] tests.

    use std::time;

    use common::{DateTime, UtcOffset};

    use crate::{
        infra::{database::Memory, mailer::Recording},
        task, Config, Service,
    };

    /// [`Service`] backed by the in-memory infrastructure.
    pub(crate) type TestService = Service<Memory, Recording>;

    /// Creates a new [`TestService`] observing the provided [`UtcOffset`].
    pub(crate) fn service(offset: UtcOffset) -> TestService {
        service_with(Memory::default(), Recording::default(), offset)
    }

    /// Creates a new [`TestService`] out of the provided infrastructure.
    pub(crate) fn service_with(
        db: Memory,
        mailer: Recording,
        offset: UtcOffset,
    ) -> TestService {
        Service {
            config: Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"test",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"test",
                ),
                session_ttl: time::Duration::from_secs(60 * 60),
                utc_offset: offset,
                dispatch_notifications: task::dispatch_notifications::Config {
                    enabled: false,
                    interval: time::Duration::from_secs(60),
                },
            },
            database: db,
            mailer,
        }
    }

    /// Parses the provided RFC 3339 string into a [`DateTime`].
    pub(crate) fn at(rfc3339: &str) -> DateTime {
        DateTime::from_rfc3339(rfc3339).unwrap()
    }
}
