//! [`Config`]-related definitions.

use std::time;

use common::UtcOffset;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::Debug;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// SMTP configuration.
    pub smtp: Smtp,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[debug(skip)]
    #[default("secret".to_owned())]
    pub jwt_secret: String,

    /// Lifetime of a user session.
    #[default(time::Duration::from_secs(8 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub session_ttl: time::Duration,

    /// [`UtcOffset`] of the local calendar day, in `±HH:MM` format.
    #[default(UtcOffset::UTC)]
    #[serde(deserialize_with = "deserialize_utc_offset")]
    pub utc_offset: UtcOffset,

    /// Service tasks configuration.
    pub tasks: Tasks,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            jwt_secret,
            session_ttl,
            utc_offset,
            tasks:
                Tasks {
                    dispatch_notifications,
                },
        } = value;
        Self {
            jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                jwt_secret.as_bytes(),
            ),
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                jwt_secret.as_bytes(),
            ),
            session_ttl,
            utc_offset,
            dispatch_notifications:
                service::task::dispatch_notifications::Config {
                    enabled: dispatch_notifications.enabled,
                    interval: dispatch_notifications.interval,
                },
        }
    }
}

/// Deserializes an [`UtcOffset`] from its `±HH:MM` representation.
fn deserialize_utc_offset<'de, D>(d: D) -> Result<UtcOffset, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    UtcOffset::parse(
        &s,
        ::time::macros::format_description!(
            "[offset_hour sign:mandatory]:[offset_minute]"
        ),
    )
    .map_err(serde::de::Error::custom)
}

/// Service tasks configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Tasks {
    /// `DispatchNotifications` task configuration.
    pub dispatch_notifications: Task,
}

/// Service task configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Task {
    /// Indicator whether the task is running.
    pub enabled: bool,

    /// Task execution interval.
    #[default(time::Duration::from_secs(15 * 60))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,
}

/// SMTP configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Smtp {
    /// Host of the SMTP relay.
    ///
    /// Mails are not sent if omitted.
    pub host: Option<String>,

    /// Port of the SMTP relay.
    #[default(587)]
    pub port: u16,

    /// User to authenticate on the SMTP relay as.
    pub user: Option<String>,

    /// Password to authenticate on the SMTP relay with.
    #[debug(skip)]
    pub password: Option<String>,

    /// Sender address of mails.
    #[default("HR <hr@localhost>".to_owned())]
    pub from: String,
}

impl From<Smtp> for service::infra::mailer::smtp::Config {
    fn from(value: Smtp) -> Self {
        let Smtp {
            host,
            port,
            user,
            password,
            from,
        } = value;

        Self {
            host,
            port,
            user,
            password: password.map(SecretString::from),
            from,
        }
    }
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[debug(skip)]
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time;

    use common::UtcOffset;
    use serde::Deserialize;

    use super::{Config, Service};

    #[test]
    fn has_sane_defaults() {
        let conf = Config::default();

        assert_eq!(conf.service.session_ttl.as_secs(), 8 * 60 * 60);
        assert_eq!(conf.service.utc_offset, UtcOffset::UTC);
        assert!(!conf.service.tasks.dispatch_notifications.enabled);
        assert_eq!(
            conf.service.tasks.dispatch_notifications.interval,
            time::Duration::from_secs(15 * 60),
        );
        assert_eq!(conf.smtp.port, 587);
        assert!(conf.smtp.host.is_none());
    }

    #[test]
    fn parses_utc_offset() {
        #[derive(Deserialize)]
        struct Wrapper {
            service: Service,
        }

        let w: Wrapper = config::Config::builder()
            .set_override("service.utc_offset", "+03:00")
            .unwrap()
            .set_override("service.session_ttl", "30m")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(
            w.service.utc_offset,
            UtcOffset::from_hms(3, 0, 0).unwrap(),
        );
        assert_eq!(w.service.session_ttl.as_secs(), 30 * 60);
    }
}
