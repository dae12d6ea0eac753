//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{macros::format_description, Month, UtcOffset};

use crate::DateTimeOf;

/// Calendar date without a time-of-day or an offset.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] out of its calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the current [`Date`] in the provided [`UtcOffset`].
    #[must_use]
    pub fn today(offset: UtcOffset) -> Self {
        crate::DateTime::now().date(offset)
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month of this [`Date`] in `1..=12` range.
    #[must_use]
    pub fn month(self) -> u8 {
        self.0.month().into()
    }

    /// Returns the day of month of this [`Date`].
    #[must_use]
    pub fn day(self) -> u8 {
        self.0.day()
    }

    /// Returns this [`Date`] moved to the provided `year`, keeping its month
    /// and day.
    ///
    /// February 29 is moved to February 28 when the `year` is not a leap one.
    /// [`None`] is returned if the `year` is out of the supported range.
    #[must_use]
    pub fn with_year(self, year: i32) -> Option<Self> {
        let (month, day) = (self.0.month(), self.0.day());
        time::Date::from_calendar_date(year, month, day)
            .or_else(|e| {
                if month == Month::February && day == 29 {
                    time::Date::from_calendar_date(year, month, 28)
                } else {
                    Err(e)
                }
            })
            .ok()
            .map(Self)
    }

    /// Returns this [`Date`] shifted by the provided number of `days`.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        self.0.checked_add(time::Duration::days(days)).map(Self)
    }

    /// Returns the number of days from this [`Date`] until the `other` one.
    ///
    /// The result is negative if the `other` [`Date`] is in the past.
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    /// Returns the first instant of this [`Date`] in the provided
    /// [`UtcOffset`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn start_of_day<Of: ?Sized>(
        self,
        offset: UtcOffset,
    ) -> DateTimeOf<Of> {
        self.0
            .midnight()
            .assume_offset(offset)
            .try_into()
            .expect("infallible")
    }

    /// Returns the last millisecond of this [`Date`] in the provided
    /// [`UtcOffset`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn end_of_day<Of: ?Sized>(
        self,
        offset: UtcOffset,
    ) -> DateTimeOf<Of> {
        self.0
            .with_hms_milli(23, 59, 59, 999)
            .expect("valid time")
            .assume_offset(offset)
            .try_into()
            .expect("infallible")
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for Date {
    type Err = ParseError;

    /// Parses a [`Date`] from the `YYYY-MM-DD` format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|e| {
                if matches!(e, time::error::Parse::TryFromParsed(_)) {
                    ParseError::OutOfRange
                } else {
                    ParseError::Format
                }
            })
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Input doesn't match the `YYYY-MM-DD` format.
    #[display("expected `YYYY-MM-DD` format")]
    Format,

    /// Components don't form an existing calendar date.
    #[display("date does not exist")]
    OutOfRange,
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Date {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Date {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in a `YYYY-MM-DD` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = crate::Date;

    impl Date {
        fn to_output<S: ScalarValue>(date: &Date) -> Value<S> {
            Value::scalar(date.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from non-string \
                         value: {input}",
                    )
                })
                .and_then(|s| {
                    s.parse().map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use time::UtcOffset;

    use crate::DateTime;

    use super::{Date, ParseError};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats() {
        let d = date("2015-06-10");
        assert_eq!((d.year(), d.month(), d.day()), (2015, 6, 10));
        assert_eq!(d.to_string(), "2015-06-10");

        assert!("2015-6-10".parse::<Date>().is_err());
        assert!("2015-06-31".parse::<Date>().is_err());
        assert!("2015/06/10".parse::<Date>().is_err());
        assert!("2015-06-10T00:00".parse::<Date>().is_err());
        assert!("".parse::<Date>().is_err());
    }

    #[test]
    fn distinguishes_parse_errors() {
        assert!(matches!(
            "2015-06-31".parse::<Date>(),
            Err(ParseError::OutOfRange),
        ));
        assert!(matches!(
            "2025-02-29".parse::<Date>(),
            Err(ParseError::OutOfRange),
        ));
        assert!(matches!(
            "2015-06".parse::<Date>(),
            Err(ParseError::Format),
        ));
        assert!(matches!(
            "June 10, 2015".parse::<Date>(),
            Err(ParseError::Format),
        ));
        assert_eq!(
            "2024-02-29".parse::<Date>().ok(),
            Date::from_ymd(2024, 2, 29),
        );
    }

    #[test]
    fn moves_leap_day_to_february_28() {
        let leap = date("2000-02-29");

        assert_eq!(leap.with_year(2025), Some(date("2025-02-28")));
        assert_eq!(leap.with_year(2024), Some(date("2024-02-29")));
        assert_eq!(
            date("2015-06-10").with_year(2025),
            Some(date("2025-06-10")),
        );
    }

    #[test]
    fn shifts_by_days() {
        let d = date("2025-06-05");

        assert_eq!(d.checked_add_days(7), Some(date("2025-06-12")));
        assert_eq!(d.checked_add_days(-5), Some(date("2025-05-31")));
        assert_eq!(
            date("2024-12-30").checked_add_days(3),
            Some(date("2025-01-02")),
        );
        assert_eq!(d.days_until(date("2025-06-10")), 5);
        assert_eq!(d.days_until(date("2025-06-01")), -4);
    }

    #[test]
    fn bounds_local_day() {
        let offset = UtcOffset::from_hms(3, 0, 0).unwrap();
        let d = date("2025-06-05");

        let start: DateTime = d.start_of_day(offset);
        let end: DateTime = d.end_of_day(offset);

        assert_eq!(
            start,
            DateTime::from_rfc3339("2025-06-04T21:00:00Z").unwrap(),
        );
        assert_eq!(
            end,
            DateTime::from_rfc3339("2025-06-05T20:59:59.999Z").unwrap(),
        );
        assert_eq!(start.date(offset), d);
        assert_eq!(end.date(offset), d);
    }
}
