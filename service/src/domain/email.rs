//! [`Email`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

/// Email address of a mail recipient.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    ///
    /// Surrounding whitespace is trimmed and the address is lowercased.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref().trim().to_lowercase();
        Self::check(&address).then_some(Self(address))
    }

    /// Parses a list of [`Email`]s separated by commas, semicolons or
    /// whitespace, dropping invalid entries and duplicates.
    #[must_use]
    pub fn parse_list(list: &str) -> Vec<Self> {
        let mut emails = Vec::<Self>::new();
        for email in list
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter_map(Self::new)
        {
            if !emails.contains(&email) {
                emails.push(email);
            }
        }
        emails
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

#[cfg(test)]
mod spec {
    use super::Email;

    #[test]
    fn normalizes_address() {
        let email = Email::new("  Jane.Doe@Example.COM ").unwrap();

        assert_eq!(email.to_string(), "jane.doe@example.com");
    }

    #[test]
    fn rejects_malformed() {
        for input in ["", "jane", "jane@", "@example.com", "ja ne@ex.com"] {
            assert!(Email::new(input).is_none(), "input: {input}");
        }
    }

    #[test]
    fn parses_list() {
        let list = Email::parse_list("a@x.io, b@x.io;;bad\nA@x.io  c@x.io");

        assert_eq!(
            list.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>(),
            ["a@x.io", "b@x.io", "c@x.io"],
        );
    }
}
