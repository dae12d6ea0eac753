//! [`Query`] collection related to lifecycle tasks.

use common::operations::By;

use crate::{
    domain::{employee, lifecycle},
    read,
};
#[cfg(doc)]
use crate::{domain::Employee, Query};

use super::DatabaseQuery;

/// Queries all the [`read::lifecycle::Task`]s of an [`Employee`].
pub type Tasks = DatabaseQuery<By<Vec<read::lifecycle::Task>, employee::Id>>;

/// Queries a list of [`lifecycle::Template`]s.
pub type Templates = DatabaseQuery<
    By<Vec<lifecycle::Template>, read::lifecycle::TemplateFilter>,
>;
