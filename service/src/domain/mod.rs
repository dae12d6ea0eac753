//! Domain definitions.

pub mod email;
pub mod employee;
pub mod jubilee;
pub mod lifecycle;
pub mod mail;
pub mod reminder;
pub mod send_log;
pub mod setting;
pub mod user;

pub use self::{
    email::Email, employee::Employee, mail::Mail, reminder::Reminder,
    send_log::SendLog, setting::Settings, user::User,
};
