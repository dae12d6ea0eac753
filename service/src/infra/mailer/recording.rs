//! [`Mailer`] recording [`Mail`]s in memory.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

use common::operations::Deliver;
use tracerr::Traced;

use crate::{
    domain::{Email, Mail},
    infra::mailer::{self, Delivery, Mailer},
};

/// [`Mailer`] recording delivered [`Mail`]s instead of sending them.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    /// Shared state of this [`Recording`] [`Mailer`].
    state: Arc<Mutex<State>>,
}

/// State of a [`Recording`] [`Mailer`].
#[derive(Debug, Default)]
struct State {
    /// Delivered [`Mail`]s in order.
    sent: Vec<Mail>,

    /// Recipients the delivery to fails for.
    failing: HashSet<Email>,

    /// Indicates whether all the [`Mail`]s are skipped.
    disabled: bool,
}

impl Recording {
    /// Creates a new [`Recording`] [`Mailer`] skipping every [`Mail`].
    #[must_use]
    pub fn disabled() -> Self {
        let this = Self::default();
        this.lock().disabled = true;
        this
    }

    /// Makes the delivery to the provided recipient fail.
    pub fn fail_for(&self, email: &Email) {
        _ = self.lock().failing.insert(email.clone());
    }

    /// Makes the delivery to the provided recipient succeed again.
    pub fn recover(&self, email: &Email) {
        _ = self.lock().failing.remove(email);
    }

    /// Returns all the delivered [`Mail`]s.
    #[must_use]
    pub fn sent(&self) -> Vec<Mail> {
        self.lock().sent.clone()
    }

    /// Locks the [`State`] of this [`Recording`] [`Mailer`].
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Mailer<Deliver<Mail>> for Recording {
    type Ok = Delivery;
    type Err = Traced<mailer::Error>;

    async fn execute(
        &self,
        Deliver(mail): Deliver<Mail>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.lock();
        if state.disabled {
            return Ok(Delivery::Skipped);
        }
        if state.failing.contains(&mail.to) {
            return Err(tracerr::new!(mailer::Error::Address(
                "unreachable"
                    .parse::<lettre::Address>()
                    .expect_err("not an address"),
            )));
        }
        state.sent.push(mail);
        Ok(Delivery::Sent)
    }
}
