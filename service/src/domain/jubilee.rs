//! Work anniversary ("jubilee") matching.

use std::{collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

use common::Date;
use itertools::Itertools as _;

use crate::domain::Employee;

/// Set of years of service worth celebrating.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MilestoneYears(BTreeSet<u16>);

impl MilestoneYears {
    /// Parses [`MilestoneYears`] out of comma-separated values.
    ///
    /// Malformed, zero and negative entries are dropped silently.
    #[must_use]
    pub fn parse(csv: &str) -> Self {
        Self(
            csv.split(',')
                .filter_map(|v| v.trim().parse::<u16>().ok())
                .filter(|&y| y > 0)
                .collect(),
        )
    }

    /// Checks whether the provided number of `years` is a milestone.
    #[must_use]
    pub fn contains(&self, years: u16) -> bool {
        self.0.contains(&years)
    }

    /// Indicates whether there are no milestones at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the milestones in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u16> for MilestoneYears {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        Self(iter.into_iter().filter(|&y| y > 0).collect())
    }
}

impl FromStr for MilestoneYears {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for MilestoneYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format(","))
    }
}

/// Day or window to match anniversaries against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    /// Anniversaries falling exactly on the [`Date`].
    On(Date),

    /// Anniversaries falling into `today..=today + days`.
    Within {
        /// First [`Date`] of the window.
        today: Date,

        /// Number of days the window spans after `today`.
        days: u16,
    },
}

impl Target {
    /// Returns the inclusive bounds of this [`Target`].
    #[must_use]
    pub fn bounds(self) -> (Date, Date) {
        match self {
            Self::On(date) => (date, date),
            Self::Within { today, days } => (
                today,
                today
                    .checked_add_days(i64::from(days))
                    .unwrap_or(today),
            ),
        }
    }
}

/// [`Employee`] reaching a milestone anniversary.
#[derive(Clone, Debug)]
pub struct Hit {
    /// [`Employee`] celebrating.
    pub employee: Employee,

    /// Years of service being celebrated.
    pub years: u16,

    /// [`Date`] of the anniversary.
    pub anniversary_date: Date,
}

/// Finds all the milestone anniversaries of the provided `employees` falling
/// into the [`Target`].
///
/// [`Employee`]s without a start date never match, as well as the ones
/// having left before the anniversary. The result is not sorted.
pub fn hits<'e>(
    employees: impl IntoIterator<Item = &'e Employee>,
    milestones: &MilestoneYears,
    target: Target,
) -> Vec<Hit> {
    if milestones.is_empty() {
        return vec![];
    }

    let (from, to) = target.bounds();
    let mut hits = vec![];
    for employee in employees {
        let Some(start) = employee.start_date else {
            continue;
        };

        for year in from.year()..=to.year() {
            let Ok(years) = u16::try_from(year - start.year()) else {
                continue;
            };
            if years == 0 || !milestones.contains(years) {
                continue;
            }
            let Some(anniversary) = start.with_year(year) else {
                continue;
            };
            if anniversary < from || anniversary > to {
                continue;
            }
            if employee.exit_date.is_some_and(|exit| exit < anniversary) {
                continue;
            }

            hits.push(Hit {
                employee: employee.clone(),
                years,
                anniversary_date: anniversary,
            });
        }
    }
    hits
}

/// Checks whether the `date` (of birth) falls on `today` in the current
/// year.
///
/// February 29 is celebrated on February 28 in non-leap years.
#[must_use]
pub fn is_birthday(date: Date, today: Date) -> bool {
    date.with_year(today.year()) == Some(today)
}

/// [`Hit`]s grouped by the years being celebrated.
#[derive(Clone, Debug, Default)]
pub struct Report(Vec<Group>);

/// [`Hit`]s celebrating the same number of years.
#[derive(Clone, Debug)]
pub struct Group {
    /// Years being celebrated.
    pub years: u16,

    /// [`Hit`]s of this [`Group`] ordered by their anniversary.
    pub hits: Vec<Hit>,
}

impl Report {
    /// Groups the provided [`Hit`]s by years in ascending order.
    #[must_use]
    pub fn new(hits: Vec<Hit>) -> Self {
        Self(
            hits.into_iter()
                .sorted_by_key(|h| (h.years, h.anniversary_date))
                .chunk_by(|h| h.years)
                .into_iter()
                .map(|(years, hits)| Group {
                    years,
                    hits: hits.collect(),
                })
                .collect(),
        )
    }

    /// Returns the [`Group`]s of this [`Report`].
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.0
    }

    /// Returns the total number of [`Hit`]s in this [`Report`].
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|g| g.hits.len()).sum()
    }
}

#[cfg(test)]
mod spec {
    use common::{Date, DateTime};

    use crate::domain::{employee, Employee};

    use super::{hits, is_birthday, MilestoneYears, Report, Target};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn employee(start: Option<&str>) -> Employee {
        Employee {
            id: employee::Id::new(),
            first_name: employee::Name::new("Jane").unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: None,
            start_date: start.map(date),
            exit_date: None,
            status: employee::Status::Active,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn parses_milestones() {
        let m = MilestoneYears::parse(" 5, 10,abc,-3,0, 10 ,25,");

        assert_eq!(m.iter().collect::<Vec<_>>(), [5, 10, 25]);
        assert_eq!(m.to_string(), "5,10,25");
        assert!(MilestoneYears::parse("").is_empty());
        assert!(MilestoneYears::parse("x,-1,0").is_empty());
    }

    #[test]
    fn matches_within_window() {
        let e = employee(Some("2015-06-10"));
        let m = MilestoneYears::parse("5,10");

        let found = hits(
            [&e],
            &m,
            Target::Within {
                today: date("2025-06-05"),
                days: 7,
            },
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].years, 10);
        assert_eq!(found[0].anniversary_date, date("2025-06-10"));
    }

    #[test]
    fn window_is_inclusive() {
        let e = employee(Some("2015-06-12"));
        let m = MilestoneYears::parse("10");
        let today = date("2025-06-05");

        assert_eq!(hits([&e], &m, Target::Within { today, days: 7 }).len(), 1);
        assert_eq!(hits([&e], &m, Target::Within { today, days: 6 }).len(), 0);

        let e = employee(Some("2015-06-05"));
        assert_eq!(hits([&e], &m, Target::Within { today, days: 0 }).len(), 1);
    }

    #[test]
    fn window_spans_new_year() {
        let e = employee(Some("2016-01-03"));
        let m = MilestoneYears::parse("10");

        let found = hits(
            [&e],
            &m,
            Target::Within {
                today: date("2025-12-28"),
                days: 10,
            },
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].anniversary_date, date("2026-01-03"));
    }

    #[test]
    fn matches_exact_day() {
        let e = employee(Some("2015-06-10"));
        let m = MilestoneYears::parse("10");

        assert_eq!(hits([&e], &m, Target::On(date("2025-06-10"))).len(), 1);
        assert_eq!(hits([&e], &m, Target::On(date("2025-06-11"))).len(), 0);
        assert_eq!(hits([&e], &m, Target::On(date("2024-06-10"))).len(), 0);
    }

    #[test]
    fn leap_day_start_celebrates_on_february_28() {
        let e = employee(Some("2016-02-29"));
        let m = MilestoneYears::parse("9");

        assert_eq!(hits([&e], &m, Target::On(date("2025-02-28"))).len(), 1);
        assert_eq!(hits([&e], &m, Target::On(date("2025-03-01"))).len(), 0);
    }

    #[test]
    fn ignores_non_milestones_and_missing_start() {
        let m = MilestoneYears::parse("5,10");
        let on = Target::On(date("2025-06-10"));

        assert!(hits([&employee(None)], &m, on).is_empty());
        assert!(hits([&employee(Some("2018-06-10"))], &m, on).is_empty());
        assert!(hits([&employee(Some("2025-06-10"))], &m, on).is_empty());
        assert!(hits([&employee(Some("2030-06-10"))], &m, on).is_empty());
        let none = MilestoneYears::default();
        assert!(hits([&employee(Some("2015-06-10"))], &none, on).is_empty());
    }

    #[test]
    fn ignores_exited_before_anniversary() {
        let m = MilestoneYears::parse("10");
        let on = Target::On(date("2025-06-10"));

        let mut e = employee(Some("2015-06-10"));
        e.exit_date = Some(date("2025-06-09"));
        assert!(hits([&e], &m, on).is_empty());

        e.exit_date = Some(date("2025-06-10"));
        assert_eq!(hits([&e], &m, on).len(), 1);
    }

    #[test]
    fn detects_birthday() {
        assert!(is_birthday(date("1990-03-15"), date("2025-03-15")));
        assert!(!is_birthday(date("1990-03-15"), date("2025-03-14")));
    }

    #[test]
    fn leap_day_birthday_falls_on_february_28() {
        let leap = date("2000-02-29");

        assert!(is_birthday(leap, date("2025-02-28")));
        assert!(!is_birthday(leap, date("2025-03-01")));
        assert!(is_birthday(leap, date("2024-02-29")));
        assert!(!is_birthday(leap, date("2024-02-28")));
    }

    #[test]
    fn groups_report_by_years() {
        let employees = [
            employee(Some("2015-06-12")),
            employee(Some("2020-06-06")),
            employee(Some("2015-06-08")),
        ];
        let m = MilestoneYears::parse("5,10");

        let report = Report::new(hits(
            &employees,
            &m,
            Target::Within {
                today: date("2025-06-05"),
                days: 30,
            },
        ));

        assert_eq!(report.total(), 3);
        let groups = report.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].years, 5);
        assert_eq!(groups[0].hits.len(), 1);
        assert_eq!(groups[1].years, 10);
        assert_eq!(
            groups[1]
                .hits
                .iter()
                .map(|h| h.anniversary_date)
                .collect::<Vec<_>>(),
            [date("2025-06-08"), date("2025-06-12")],
        );
    }
}
