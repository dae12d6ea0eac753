//! [`Query`] collection related to the multiple [`User`]s.
//!
//! [`User`]: crate::domain::User

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries total count of [`User`]s.
///
/// [`User`]: crate::domain::User
pub type TotalCount = DatabaseQuery<By<read::user::TotalCount, ()>>;
