//! [`Query`] collection related to a single [`Reminder`].

use common::operations::By;

use crate::domain::{reminder, send_log, Reminder, SendLog};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Reminder`] by its [`reminder::Id`].
pub type ById = DatabaseQuery<By<Option<Reminder>, reminder::Id>>;

/// Queries [`SendLog`]s of a [`Reminder`], the most recent first.
pub type SendLogs = DatabaseQuery<By<Vec<SendLog>, send_log::Subject>>;
