//! Notification dispatching definitions.

use juniper::GraphQLObject;
use service::{command::deliver_notification, domain::send_log};

use crate::api::{self, reminder, scalar};

/// Outcome of a notifications dispatch.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "DispatchSummary")]
pub struct Summary {
    /// Number of sent mails.
    pub sent: i32,

    /// Number of mails not sent, because they were sent earlier the same
    /// day already.
    pub deduplicated: i32,

    /// Number of mails not sent, because no mail transport is configured.
    pub skipped: i32,

    /// Mails failed to be sent.
    pub failures: Vec<Failure>,
}

impl From<deliver_notification::Summary> for Summary {
    fn from(summary: deliver_notification::Summary) -> Self {
        let deliver_notification::Summary {
            sent,
            deduplicated,
            skipped,
            failures,
        } = summary;
        Self {
            sent: api::count(sent),
            deduplicated: api::count(deduplicated),
            skipped: api::count(skipped),
            failures: failures.into_iter().map(Into::into).collect(),
        }
    }
}

/// Mail failed to be sent.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "DispatchFailure")]
pub struct Failure {
    /// Label of the failed notification.
    pub label: reminder::Label,

    /// Recipient the mail failed to be sent to.
    pub email: scalar::Email,

    /// Description of the failure.
    pub message: String,
}

impl From<deliver_notification::Failure> for Failure {
    fn from(failure: deliver_notification::Failure) -> Self {
        let deliver_notification::Failure {
            key: send_log::Key { label, email, .. },
            error,
        } = failure;
        Self {
            label: label.into(),
            email: email.into(),
            message: error.as_ref().to_string(),
        }
    }
}
