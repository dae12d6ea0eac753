//! [`Mailer`]-related implementations.

#[cfg(test)]
pub mod recording;
pub mod smtp;

use derive_more::{Display, Error as StdError, From};

#[cfg(doc)]
use common::operations::Deliver;
#[cfg(doc)]
use crate::domain::Mail;

#[cfg(test)]
pub use self::recording::Recording;
pub use self::smtp::Smtp;

/// [`Mail`] delivery operation.
pub use common::Handler as Mailer;

/// Outcome of a [`Deliver`]ed [`Mail`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Delivery {
    /// [`Mail`] was handed over to the transport.
    Sent,

    /// [`Mail`] was not sent, because no transport is configured.
    Skipped,
}

/// [`Mailer`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// SMTP transport error.
    #[display("SMTP transport error: {_0}")]
    Smtp(lettre::transport::smtp::Error),

    /// Mail address cannot be used by the transport.
    #[display("Invalid mail address: {_0}")]
    Address(lettre::address::AddressError),

    /// Mail message cannot be assembled.
    #[display("Failed to build mail message: {_0}")]
    Build(lettre::error::Error),
}
