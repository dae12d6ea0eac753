//! GraphQL API definitions.

pub mod employee;
pub mod lifecycle;
mod mutation;
pub mod notification;
mod query;
pub mod reminder;
pub mod report;
pub mod scalar;
pub mod setting;
mod subscription;
pub mod user;

pub use self::{
    employee::Employee, mutation::Mutation, query::Query, reminder::Reminder,
    subscription::Subscription, user::User,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

/// Converts the provided count into a GraphQL `Int`, saturating on overflow.
#[must_use]
pub fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
