//! [`Mail`] and its [`Template`] definitions.

use std::{collections::HashMap, sync::LazyLock};

use common::Date;
use regex::{Captures, Regex};

use crate::domain::{
    jubilee, reminder, send_log, Email, Employee, Reminder,
};

/// HTML mail ready to be delivered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mail {
    /// Recipient of this [`Mail`].
    pub to: Email,

    /// Subject line of this [`Mail`].
    pub subject: String,

    /// HTML body of this [`Mail`].
    pub html: String,
}

/// Template of a [`Mail`] with `{{key}}` placeholders.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template {
    /// Template of the subject line.
    pub subject: String,

    /// Template of the HTML body.
    pub html: String,
}

impl Template {
    /// Creates a new [`Template`] out of the provided parts.
    #[must_use]
    pub fn new(subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            html: html.into(),
        }
    }

    /// Default [`Template`] of a [`Reminder`] notification.
    #[must_use]
    pub fn default_reminder() -> Self {
        Self::new(
            "Reminder: {{description}} ({{due_date}})",
            "<p>{{description}}</p>\
             <p>Type: {{kind}}. Due on <b>{{due_date}}</b> \
             ({{days_before}} day(s) left).</p>",
        )
    }

    /// Default [`Template`] of a birthday notification.
    #[must_use]
    pub fn default_birthday() -> Self {
        Self::new(
            "Birthday: {{full_name}}",
            "<p>Today is the birthday of <b>{{full_name}}</b>.</p>",
        )
    }

    /// Default [`Template`] of a jubilee notification.
    #[must_use]
    pub fn default_jubilee() -> Self {
        Self::new(
            "Jubilee: {{full_name}}, {{years}} years",
            "<p><b>{{full_name}}</b> celebrates {{years}} years with us \
             on {{anniversary_date}} (since {{start_date}}).</p>",
        )
    }

    /// Renders this [`Template`] into a [`Mail`] to the provided recipient.
    ///
    /// Values substituted into the HTML body are HTML-escaped, while the
    /// subject line receives them as is.
    #[must_use]
    pub fn render(&self, to: Email, vars: &Variables) -> Mail {
        Mail {
            to,
            subject: render(&self.subject, vars, str::to_owned),
            html: render(&self.html, vars, escape_html),
        }
    }
}

/// Values to substitute [`Template`] placeholders with.
#[derive(Clone, Debug, Default)]
pub struct Variables(HashMap<&'static str, String>);

impl Variables {
    /// Adds the provided `value` of the `key` placeholder.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        drop(self.0.insert(key, value.to_string()));
        self
    }

    /// Returns the value of the `key` placeholder, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// [`Variables`] describing a [`Reminder`] firing on `today`, either by
    /// its [`reminder::Schedule`] or manually.
    #[must_use]
    pub fn reminder(
        reminder: &Reminder,
        schedule: Option<&reminder::Schedule>,
        today: Date,
    ) -> Self {
        let vars = Self::default()
            .with("description", &reminder.description)
            .with("kind", &reminder.kind)
            .with("due_date", reminder.due_date)
            .with("today", today);
        match schedule {
            Some(s) => vars
                .with("label", &s.label)
                .with("days_before", s.days_before),
            None => vars
                .with("label", send_log::Label::manual())
                .with("days_before", today.days_until(reminder.due_date)),
        }
    }

    /// [`Variables`] describing an [`Employee`].
    #[must_use]
    pub fn employee(employee: &Employee) -> Self {
        let mut vars = Self::default()
            .with("first_name", &employee.first_name)
            .with("last_name", &employee.last_name)
            .with("full_name", employee.full_name());
        for (key, date) in [
            ("birth_date", employee.birth_date),
            ("start_date", employee.start_date),
        ] {
            if let Some(d) = date {
                vars = vars.with(key, d);
            }
        }
        vars
    }

    /// [`Variables`] describing a birthday of an [`Employee`] on `today`.
    #[must_use]
    pub fn birthday(employee: &Employee, today: Date) -> Self {
        let vars = Self::employee(employee).with("today", today);
        match employee.birth_date {
            Some(b) => vars.with("age", today.year() - b.year()),
            None => vars,
        }
    }

    /// [`Variables`] describing a [`jubilee::Hit`].
    #[must_use]
    pub fn jubilee(hit: &jubilee::Hit) -> Self {
        Self::employee(&hit.employee)
            .with("years", hit.years)
            .with("anniversary_date", hit.anniversary_date)
    }
}

/// Substitutes `{{key}}` placeholders (with optional inner whitespace) of the
/// provided `text` with the [`Variables`].
///
/// Every substituted value is passed through the `encode` function first.
/// Unknown keys are rendered as an empty string.
#[must_use]
pub fn render(
    text: &str,
    vars: &Variables,
    encode: impl Fn(&str) -> String,
) -> String {
    /// Regular expression matching a placeholder.
    static REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid regex")
    });

    REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            encode(vars.get(&caps[1]).unwrap_or_default())
        })
        .into_owned()
}

/// Escapes the provided `value` to be safely embedded into HTML text or
/// attribute.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::{employee, jubilee, Email, Employee};

    use super::{escape_html, render, Template, Variables};

    fn jane(first_name: &str) -> Employee {
        Employee {
            id: employee::Id::new(),
            first_name: employee::Name::new(first_name).unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: None,
            start_date: "2015-06-10".parse().ok(),
            exit_date: None,
            status: employee::Status::Active,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn substitutes_placeholders() {
        let vars = Variables::default().with("name", "Jane").with("n", 5);

        let raw = |t: &str| render(t, &vars, str::to_owned);

        assert_eq!(raw("Hi {{name}}!"), "Hi Jane!");
        assert_eq!(raw("{{ name }}/{{n}}/{{  n}}"), "Jane/5/5");
        assert_eq!(raw("no placeholders"), "no placeholders");
    }

    #[test]
    fn renders_unknown_as_empty() {
        let vars = Variables::default().with("name", "Jane");

        let raw = |t: &str| render(t, &vars, str::to_owned);

        assert_eq!(raw("[{{missing}}]{{name}}"), "[]Jane");
        assert_eq!(raw("{{ }} {{a-b}}"), "{{ }} {{a-b}}");
    }

    #[test]
    fn renders_jubilee_mail() {
        let hit = jubilee::Hit {
            employee: jane("Jane"),
            years: 10,
            anniversary_date: "2025-06-10".parse().unwrap(),
        };
        let to = Email::new("hr@example.com").unwrap();

        let mail = Template::default_jubilee()
            .render(to.clone(), &Variables::jubilee(&hit));

        assert_eq!(mail.to, to);
        assert_eq!(mail.subject, "Jubilee: Jane Doe, 10 years");
        assert!(mail.html.contains("on 2025-06-10 (since 2015-06-10)"));
    }

    #[test]
    fn escapes_values_in_html_body_only() {
        let hit = jubilee::Hit {
            employee: jane("<b>Jane</b> & \"Co\""),
            years: 10,
            anniversary_date: "2025-06-10".parse().unwrap(),
        };
        let to = Email::new("hr@example.com").unwrap();

        let mail = Template::default_jubilee()
            .render(to, &Variables::jubilee(&hit));

        assert_eq!(
            mail.subject,
            "Jubilee: <b>Jane</b> & \"Co\" Doe, 10 years",
        );
        assert!(mail.html.contains(
            "<b>&lt;b&gt;Jane&lt;/b&gt; &amp; &quot;Co&quot; Doe</b>",
        ));
        assert_eq!(escape_html("it's"), "it&#39;s");
    }
}
