//! Reports over the present [`Employee`]s.
//!
//! [`Employee`]: crate::domain::Employee

pub mod birthdays;
pub mod jubilees;

pub use self::{birthdays::Birthdays, jubilees::Jubilees};
