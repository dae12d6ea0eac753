//! [`Employee`] read model definition.
//!
//! [`Employee`]: crate::domain::Employee

use crate::domain::{employee, Employee};

/// Filter of an [`Employee`]s list.
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// [`employee::Status`] the listed [`Employee`]s have.
    ///
    /// All the [`Employee`]s are listed if [`None`].
    pub status: Option<employee::Status>,

    /// Indicates whether [`employee::Status::Exited`] [`Employee`]s are left
    /// out.
    pub present_only: bool,
}

impl Filter {
    /// [`Filter`] of the [`Employee`]s still working in the company.
    #[must_use]
    pub const fn present() -> Self {
        Self {
            status: None,
            present_only: true,
        }
    }

    /// Checks whether the provided [`Employee`] passes this [`Filter`].
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.status.map_or(true, |s| employee.status == s)
            && !(self.present_only
                && employee.status == employee::Status::Exited)
    }
}
