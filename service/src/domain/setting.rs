//! [`Settings`] definitions.

use crate::domain::{jubilee::MilestoneYears, mail, Email};

/// Administrative settings of notifications.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Years of service celebrated as jubilees.
    pub milestone_years: MilestoneYears,

    /// Recipients of birthday and jubilee notifications.
    pub notification_recipients: Vec<Email>,

    /// [`mail::Template`] of reminder notifications.
    pub reminder_mail: mail::Template,

    /// [`mail::Template`] of birthday notifications.
    pub birthday_mail: mail::Template,

    /// [`mail::Template`] of jubilee notifications.
    pub jubilee_mail: mail::Template,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            milestone_years: [5, 10, 15, 20, 25, 30, 35, 40]
                .into_iter()
                .collect(),
            notification_recipients: vec![],
            reminder_mail: mail::Template::default_reminder(),
            birthday_mail: mail::Template::default_birthday(),
            jubilee_mail: mail::Template::default_jubilee(),
        }
    }
}

/// Key of a single stored [`Settings`] entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    /// [`Settings::milestone_years`] as comma-separated values.
    MilestoneYears,

    /// [`Settings::notification_recipients`] as comma-separated values.
    NotificationRecipients,

    /// Subject of [`Settings::reminder_mail`].
    ReminderMailSubject,

    /// HTML body of [`Settings::reminder_mail`].
    ReminderMailHtml,

    /// Subject of [`Settings::birthday_mail`].
    BirthdayMailSubject,

    /// HTML body of [`Settings::birthday_mail`].
    BirthdayMailHtml,

    /// Subject of [`Settings::jubilee_mail`].
    JubileeMailSubject,

    /// HTML body of [`Settings::jubilee_mail`].
    JubileeMailHtml,
}

impl Key {
    /// All the stored [`Key`]s.
    pub const ALL: [Self; 8] = [
        Self::MilestoneYears,
        Self::NotificationRecipients,
        Self::ReminderMailSubject,
        Self::ReminderMailHtml,
        Self::BirthdayMailSubject,
        Self::BirthdayMailHtml,
        Self::JubileeMailSubject,
        Self::JubileeMailHtml,
    ];

    /// Returns the storage name of this [`Key`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MilestoneYears => "milestone_years",
            Self::NotificationRecipients => "notification_recipients",
            Self::ReminderMailSubject => "reminder_mail_subject",
            Self::ReminderMailHtml => "reminder_mail_html",
            Self::BirthdayMailSubject => "birthday_mail_subject",
            Self::BirthdayMailHtml => "birthday_mail_html",
            Self::JubileeMailSubject => "jubilee_mail_subject",
            Self::JubileeMailHtml => "jubilee_mail_html",
        }
    }

    /// Parses a [`Key`] out of its storage name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl Settings {
    /// Returns the stored value of the provided [`Key`].
    #[must_use]
    pub fn get(&self, key: Key) -> String {
        match key {
            Key::MilestoneYears => self.milestone_years.to_string(),
            Key::NotificationRecipients => self
                .notification_recipients
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
            Key::ReminderMailSubject => self.reminder_mail.subject.clone(),
            Key::ReminderMailHtml => self.reminder_mail.html.clone(),
            Key::BirthdayMailSubject => self.birthday_mail.subject.clone(),
            Key::BirthdayMailHtml => self.birthday_mail.html.clone(),
            Key::JubileeMailSubject => self.jubilee_mail.subject.clone(),
            Key::JubileeMailHtml => self.jubilee_mail.html.clone(),
        }
    }

    /// Applies the stored `value` of the provided [`Key`].
    pub fn set(&mut self, key: Key, value: String) {
        match key {
            Key::MilestoneYears => {
                self.milestone_years = MilestoneYears::parse(&value);
            }
            Key::NotificationRecipients => {
                self.notification_recipients = Email::parse_list(&value);
            }
            Key::ReminderMailSubject => self.reminder_mail.subject = value,
            Key::ReminderMailHtml => self.reminder_mail.html = value,
            Key::BirthdayMailSubject => self.birthday_mail.subject = value,
            Key::BirthdayMailHtml => self.birthday_mail.html = value,
            Key::JubileeMailSubject => self.jubilee_mail.subject = value,
            Key::JubileeMailHtml => self.jubilee_mail.html = value,
        }
    }
}
