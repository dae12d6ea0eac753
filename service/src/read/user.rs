//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::User;

/// Total count of [`User`]s.
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
pub struct TotalCount(i32);

impl TotalCount {
    /// Indicates whether there are no [`User`]s at all.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}
