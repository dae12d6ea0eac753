//! Wall-clock time-of-day.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::macros::format_description;

/// Time-of-day with a minute precision.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeOfDay(time::Time);

impl TimeOfDay {
    /// Creates a new [`TimeOfDay`] out of the provided `hour` and `minute`.
    ///
    /// [`None`] is returned if they're out of range.
    #[must_use]
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        time::Time::from_hms(hour, minute, 0).ok().map(Self)
    }

    /// Returns the hour of this [`TimeOfDay`].
    #[must_use]
    pub fn hour(self) -> u8 {
        self.0.hour()
    }

    /// Returns the minute of this [`TimeOfDay`].
    #[must_use]
    pub fn minute(self) -> u8 {
        self.0.minute()
    }
}

impl From<time::Time> for TimeOfDay {
    fn from(t: time::Time) -> Self {
        // Seconds are dropped.
        Self(time::Time::from_hms(t.hour(), t.minute(), 0).unwrap_or(t))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = &'static str;

    /// Parses a [`TimeOfDay`] from the `HH:MM` format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Time::parse(s, format_description!("[hour]:[minute]"))
            .map(Self)
            .map_err(|_| "expected `HH:MM` time-of-day")
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for TimeOfDay {
    accepts!(TIME);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Time::from_sql(ty, raw).map(Self::from)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for TimeOfDay {
    accepts!(TIME);
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

    /// Time-of-day in a `HH:MM` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type TimeOfDay = crate::TimeOfDay;

    impl TimeOfDay {
        fn to_output<S: ScalarValue>(t: &TimeOfDay) -> Value<S> {
            Value::scalar(t.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `TimeOfDay` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    s.parse().map_err(|e| {
                        format!("Cannot parse `TimeOfDay` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::TimeOfDay;

    #[test]
    fn parses_valid() {
        for (input, h, m) in
            [("00:00", 0, 0), ("09:00", 9, 0), ("23:59", 23, 59)]
        {
            let t: TimeOfDay = input.parse().unwrap();
            assert_eq!((t.hour(), t.minute()), (h, m), "input: {input}");
            assert_eq!(t.to_string(), input);
        }
    }

    #[test]
    fn rejects_invalid() {
        for input in [
            "", "9:00", "24:00", "12:60", "12-00", "12:0a", "+1:00",
            "12:00:00",
        ] {
            assert!(input.parse::<TimeOfDay>().is_err(), "input: {input}");
        }
    }

    #[test]
    fn orders_by_clock() {
        let nine: TimeOfDay = "09:00".parse().unwrap();

        assert!("08:59".parse::<TimeOfDay>().unwrap() < nine);
        assert!("09:01".parse::<TimeOfDay>().unwrap() > nine);
    }
}
