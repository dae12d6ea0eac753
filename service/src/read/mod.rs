//! Read entities definitions.

pub mod employee;
pub mod lifecycle;
pub mod reminder;
pub mod user;
