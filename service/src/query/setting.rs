//! [`Query`] collection related to the [`Settings`].

use common::operations::By;

use crate::domain::Settings;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the current [`Settings`].
pub type Current = DatabaseQuery<By<Settings, ()>>;
