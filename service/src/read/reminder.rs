//! [`Reminder`] read model definition.
//!
//! [`Reminder`]: crate::domain::Reminder

#[cfg(doc)]
use crate::domain::Reminder;

/// Filter of a [`Reminder`]s list.
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// Activity of the listed [`Reminder`]s.
    ///
    /// All the [`Reminder`]s are listed if [`None`].
    pub active: Option<bool>,
}
