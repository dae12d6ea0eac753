//! [`Settings`]-related definitions.

use juniper::{GraphQLInputObject, GraphQLObject};
use service::domain;

use crate::api::scalar;

/// Settings of the notifications.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Settings {
    /// Years of work considered a jubilee, in ascending order.
    pub milestone_years: Vec<i32>,

    /// Recipients of the birthday and jubilee notifications.
    pub notification_recipients: Vec<scalar::Email>,

    /// `MailTemplate` of the `Reminder` notifications.
    pub reminder_mail: MailTemplate,

    /// `MailTemplate` of the birthday notifications.
    pub birthday_mail: MailTemplate,

    /// `MailTemplate` of the jubilee notifications.
    pub jubilee_mail: MailTemplate,
}

impl From<domain::Settings> for Settings {
    fn from(settings: domain::Settings) -> Self {
        let domain::Settings {
            milestone_years,
            notification_recipients,
            reminder_mail,
            birthday_mail,
            jubilee_mail,
        } = settings;
        Self {
            milestone_years: milestone_years.iter().map(Into::into).collect(),
            notification_recipients: notification_recipients
                .into_iter()
                .map(Into::into)
                .collect(),
            reminder_mail: reminder_mail.into(),
            birthday_mail: birthday_mail.into(),
            jubilee_mail: jubilee_mail.into(),
        }
    }
}

/// Template of a notification mail.
///
/// `{{variable}}` placeholders are substituted on rendering, unknown ones
/// are rendered empty.
#[derive(Clone, Debug, GraphQLObject)]
pub struct MailTemplate {
    /// Subject of the mail.
    pub subject: String,

    /// HTML body of the mail.
    pub html: String,
}

impl From<domain::mail::Template> for MailTemplate {
    fn from(template: domain::mail::Template) -> Self {
        let domain::mail::Template { subject, html } = template;
        Self { subject, html }
    }
}

/// Template of a notification mail.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct MailTemplateInput {
    /// Subject of the mail.
    pub subject: String,

    /// HTML body of the mail.
    pub html: String,
}

impl From<MailTemplateInput> for domain::mail::Template {
    fn from(input: MailTemplateInput) -> Self {
        let MailTemplateInput { subject, html } = input;
        Self::new(subject, html)
    }
}
