//! [`SendLog`]-related [`Database`] implementations.

use std::ops::RangeInclusive;

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        employee, reminder,
        send_log::{self, SentDateTime},
        SendLog,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of a [`SendLog`] row.
const COLUMNS: &str = "id, reminder_id, employee_id, label, email, sent_at";

/// Splits the provided [`send_log::Subject`] into its storage columns.
fn subject_columns(
    subject: send_log::Subject,
) -> (Option<reminder::Id>, Option<employee::Id>) {
    match subject {
        send_log::Subject::Reminder(id) => (Some(id), None),
        send_log::Subject::Employee(id) => (None, Some(id)),
    }
}

/// Builds a [`SendLog`] out of the provided [`Row`] having [`COLUMNS`].
fn from_row(row: &Row) -> SendLog {
    let subject = match row.get::<_, Option<reminder::Id>>("reminder_id") {
        Some(id) => send_log::Subject::Reminder(id),
        None => send_log::Subject::Employee(row.get("employee_id")),
    };
    SendLog {
        id: row.get("id"),
        subject,
        label: row.get("label"),
        email: row.get("email"),
        sent_at: row.get("sent_at"),
    }
}

impl<C>
    Database<
        Select<
            By<
                Option<SendLog>,
                (send_log::Key, RangeInclusive<SentDateTime>),
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<SendLog>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Option<SendLog>,
                (send_log::Key, RangeInclusive<SentDateTime>),
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (
            send_log::Key {
                subject,
                label,
                email,
            },
            window,
        ) = by.into_inner();
        let (reminder_id, employee_id) = subject_columns(subject);
        let (from, to) = window.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM send_logs \
             WHERE reminder_id IS NOT DISTINCT FROM $1::UUID \
               AND employee_id IS NOT DISTINCT FROM $2::UUID \
               AND label = $3::VARCHAR \
               AND email = $4::VARCHAR \
               AND sent_at BETWEEN $5::TIMESTAMPTZ AND $6::TIMESTAMPTZ \
             ORDER BY sent_at DESC \
             LIMIT 1",
        );
        self.query_opt(
            &sql,
            &[&reminder_id, &employee_id, &label, &email, &from, &to],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<SendLog>, send_log::Subject>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<SendLog>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<SendLog>, send_log::Subject>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (reminder_id, employee_id) = subject_columns(by.into_inner());

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM send_logs \
             WHERE reminder_id IS NOT DISTINCT FROM $1::UUID \
               AND employee_id IS NOT DISTINCT FROM $2::UUID \
             ORDER BY sent_at DESC",
        );
        Ok(self
            .query(&sql, &[&reminder_id, &employee_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<SendLog>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(log): Insert<SendLog>,
    ) -> Result<Self::Ok, Self::Err> {
        let SendLog {
            id,
            subject,
            label,
            email,
            sent_at,
        } = log;
        let (reminder_id, employee_id) = subject_columns(subject);

        const SQL: &str = "\
            INSERT INTO send_logs (\
                id, reminder_id, employee_id, label, email, sent_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::VARCHAR, $5::VARCHAR, \
                $6::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[&id, &reminder_id, &employee_id, &label, &email, &sent_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
