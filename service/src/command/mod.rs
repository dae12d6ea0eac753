//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_employee;
pub mod create_reminder;
pub mod create_task_template;
pub mod create_user;
pub mod create_user_session;
pub mod delete_reminder;
pub mod deliver_notification;
pub mod generate_lifecycle_tasks;
pub mod run_daily;
pub mod send_due_reminders;
pub mod send_reminder;
pub mod update_employee;
pub mod update_reminder;
pub mod update_settings;
pub mod update_task_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_employee::CreateEmployee, create_reminder::CreateReminder,
    create_task_template::CreateTaskTemplate, create_user::CreateUser,
    create_user_session::CreateUserSession, delete_reminder::DeleteReminder,
    deliver_notification::DeliverNotification,
    generate_lifecycle_tasks::GenerateLifecycleTasks, run_daily::RunDaily,
    send_due_reminders::SendDueReminders, send_reminder::SendReminder,
    update_employee::UpdateEmployee, update_reminder::UpdateReminder,
    update_settings::UpdateSettings, update_task_status::UpdateTaskStatus,
};
