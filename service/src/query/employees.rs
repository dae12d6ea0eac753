//! [`Query`] collection related to the multiple [`Employee`]s.

use common::operations::By;

use crate::{domain::Employee, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Employee`]s passing a [`read::employee::Filter`].
pub type List = DatabaseQuery<By<Vec<Employee>, read::employee::Filter>>;
