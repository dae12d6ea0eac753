//! [`Query`] collection related to the multiple [`Reminder`]s.

use common::operations::By;

use crate::{domain::Reminder, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Reminder`]s passing a [`read::reminder::Filter`].
pub type List = DatabaseQuery<By<Vec<Reminder>, read::reminder::Filter>>;
