//! Background [`Task`]s definitions.

mod background;
pub mod dispatch_notifications;

pub use common::Handler as Task;

pub use self::{
    background::{Background, Failure},
    dispatch_notifications::DispatchNotifications,
};
