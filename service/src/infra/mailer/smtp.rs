//! SMTP [`Mailer`] implementation.

use std::sync::Arc;

use common::operations::Deliver;
use derive_more::Debug;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
};
use secrecy::{ExposeSecret as _, SecretString};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Mail,
    infra::mailer::{self, Delivery, Mailer},
};

/// [`Smtp`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Host of the SMTP relay.
    ///
    /// [`Mail`]s are skipped if [`None`].
    pub host: Option<String>,

    /// Port of the SMTP relay.
    pub port: u16,

    /// User to authenticate on the SMTP relay as, if any.
    pub user: Option<String>,

    /// Password to authenticate on the SMTP relay with.
    #[debug(skip)]
    pub password: Option<SecretString>,

    /// Sender of [`Mail`]s.
    pub from: String,
}

/// [`Mailer`] delivering [`Mail`]s via an SMTP relay with `STARTTLS`.
#[derive(Clone, Debug)]
pub struct Smtp {
    /// SMTP transport, if configured.
    #[debug(skip)]
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,

    /// Sender of [`Mail`]s.
    from: Mailbox,
}

impl Smtp {
    /// Creates a new [`Smtp`] [`Mailer`] with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::from`] address is invalid, or the SMTP relay cannot be
    /// set up.
    pub fn new(conf: Config) -> Result<Self, Traced<mailer::Error>> {
        let Config {
            host,
            port,
            user,
            password,
            from,
        } = conf;

        let from = from
            .parse::<Mailbox>()
            .map_err(tracerr::from_and_wrap!(=> mailer::Error))?;

        let Some(host) = host else {
            log::warn!("SMTP host is not configured, mails will be skipped");
            return Ok(Self {
                transport: None,
                from,
            });
        };

        let mut transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
                .map_err(tracerr::from_and_wrap!(=> mailer::Error))?
                .port(port);
        if let Some(user) = user {
            let password = password
                .as_ref()
                .map(|p| p.expose_secret().to_owned())
                .unwrap_or_default();
            transport = transport.credentials(Credentials::new(user, password));
        }

        Ok(Self {
            transport: Some(Arc::new(transport.build())),
            from,
        })
    }
}

impl Mailer<Deliver<Mail>> for Smtp {
    type Ok = Delivery;
    type Err = Traced<mailer::Error>;

    async fn execute(
        &self,
        Deliver(mail): Deliver<Mail>,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(transport) = &self.transport else {
            log::debug!("skipping mail to `{}`: no SMTP transport", mail.to);
            return Ok(Delivery::Skipped);
        };

        let Mail { to, subject, html } = mail;
        let to = AsRef::<str>::as_ref(&to)
            .parse::<Mailbox>()
            .map_err(tracerr::from_and_wrap!(=> mailer::Error))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(tracerr::from_and_wrap!(=> mailer::Error))?;

        transport
            .send(message)
            .await
            .map_err(tracerr::from_and_wrap!(=> mailer::Error))
            .map(|_| Delivery::Sent)
    }
}
