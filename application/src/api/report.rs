//! Reports over the present employees.

use common::Date;
use juniper::GraphQLObject;
use service::domain::jubilee;

use crate::{api, Context};

/// Work anniversaries of the present `Employee`s, grouped by milestone years.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "JubileeReport")]
pub struct Jubilees {
    /// Groups of `Jubilee`s ordered by milestone years.
    pub groups: Vec<JubileeGroup>,

    /// Total number of `Jubilee`s in all the groups.
    pub total: i32,
}

impl From<jubilee::Report> for Jubilees {
    fn from(report: jubilee::Report) -> Self {
        Self {
            total: api::count(report.total()),
            groups: report.groups().iter().cloned().map(Into::into).collect(),
        }
    }
}

/// `Jubilee`s of the same milestone years.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct JubileeGroup {
    /// Milestone years of the `Jubilee`s in this group.
    pub years: i32,

    /// `Jubilee`s ordered by their anniversary `Date`.
    pub jubilees: Vec<Jubilee>,
}

impl From<jubilee::Group> for JubileeGroup {
    fn from(group: jubilee::Group) -> Self {
        Self {
            years: group.years.into(),
            jubilees: group.hits.into_iter().map(Into::into).collect(),
        }
    }
}

/// Work anniversary of an `Employee` matching a milestone.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Jubilee {
    /// `Employee` celebrating the anniversary.
    pub employee: api::Employee,

    /// Number of completed years with the company.
    pub years: i32,

    /// `Date` of the anniversary.
    pub anniversary_date: Date,
}

impl From<jubilee::Hit> for Jubilee {
    fn from(hit: jubilee::Hit) -> Self {
        let jubilee::Hit {
            employee,
            years,
            anniversary_date,
        } = hit;
        Self {
            employee: employee.into(),
            years: years.into(),
            anniversary_date,
        }
    }
}
