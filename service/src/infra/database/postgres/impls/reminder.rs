//! [`Reminder`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Select};
use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::{
    domain::{reminder, Email, Reminder},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Postgres<C>
where
    C: Connection,
{
    /// Selects [`Reminder`]s matching the provided SQL `condition`, along with
    /// their [`reminder::Schedule`]s and recipients.
    async fn select_reminders(
        &self,
        condition: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Reminder>, Traced<database::Error>> {
        let sql = format!(
            "SELECT id, due_date, description, active, kind, created_at \
             FROM reminders \
             WHERE {condition} \
             ORDER BY due_date, id",
        );
        let rows = self
            .query(&sql, params)
            .await
            .map_err(tracerr::wrap!())?;
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let ids = rows
            .iter()
            .map(|r| r.get("id"))
            .collect::<Vec<reminder::Id>>();

        const SCHEDULES_SQL: &str = "\
            SELECT reminder_id, label, days_before, time_of_day \
            FROM reminder_schedules \
            WHERE reminder_id = ANY($1::UUID[]) \
            ORDER BY reminder_id, position";
        let mut schedules = HashMap::<reminder::Id, Vec<_>>::new();
        for row in self
            .query(SCHEDULES_SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
        {
            schedules
                .entry(row.get("reminder_id"))
                .or_default()
                .push(schedule_from_row(&row));
        }

        const RECIPIENTS_SQL: &str = "\
            SELECT reminder_id, email \
            FROM reminder_recipients \
            WHERE reminder_id = ANY($1::UUID[]) \
            ORDER BY reminder_id, position";
        let mut recipients = HashMap::<reminder::Id, Vec<Email>>::new();
        for row in self
            .query(RECIPIENTS_SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
        {
            recipients
                .entry(row.get("reminder_id"))
                .or_default()
                .push(row.get("email"));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                Reminder {
                    id,
                    due_date: row.get("due_date"),
                    description: row.get("description"),
                    active: row.get("active"),
                    kind: row.get("kind"),
                    schedules: schedules.remove(&id).unwrap_or_default(),
                    recipients: recipients.remove(&id).unwrap_or_default(),
                    created_at: row.get("created_at"),
                }
            })
            .collect())
    }
}

/// Builds a [`reminder::Schedule`] out of the provided [`Row`].
fn schedule_from_row(row: &Row) -> reminder::Schedule {
    let days_before = row.get::<_, i32>("days_before");
    reminder::Schedule {
        label: row.get("label"),
        days_before: u16::try_from(days_before).unwrap_or_default().into(),
        time_of_day: row.get("time_of_day"),
    }
}

impl<C> Database<Select<By<Option<Reminder>, reminder::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reminder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reminder>, reminder::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        self.select_reminders("id = $1::UUID", &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|r| r.into_iter().next())
    }
}

impl<C> Database<Select<By<Vec<Reminder>, read::reminder::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Reminder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Reminder>, read::reminder::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::reminder::Filter { active } = by.into_inner();

        self.select_reminders(
            "($1::BOOL IS NULL OR active = $1::BOOL)",
            &[&active],
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Reminder>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reminder): Insert<Reminder>,
    ) -> Result<Self::Ok, Self::Err> {
        let Reminder {
            id,
            due_date,
            description,
            active,
            kind,
            schedules,
            recipients,
            created_at,
        } = reminder;

        const SQL: &str = "\
            INSERT INTO reminders (\
                id, due_date, description, active, kind, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::DATE, $3::VARCHAR, $4::BOOL, $5::VARCHAR, \
                $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET due_date = EXCLUDED.due_date, \
                description = EXCLUDED.description, \
                active = EXCLUDED.active, \
                kind = EXCLUDED.kind";
        _ = self
            .exec(
                SQL,
                &[&id, &due_date, &description, &active, &kind, &created_at],
            )
            .await
            .map_err(tracerr::wrap!())?;

        const CLEAR_SQL: &str = "\
            DELETE FROM reminder_schedules \
            WHERE reminder_id = $1::UUID";
        _ = self
            .exec(CLEAR_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?;
        const SCHEDULE_SQL: &str = "\
            INSERT INTO reminder_schedules (\
                reminder_id, position, label, days_before, time_of_day\
            ) \
            VALUES ($1::UUID, $2::INT4, $3::VARCHAR, $4::INT4, $5::TIME)";
        for (pos, s) in (0_i32..).zip(&schedules) {
            let days_before = i32::from(s.days_before.get());
            _ = self
                .exec(
                    SCHEDULE_SQL,
                    &[&id, &pos, &s.label, &days_before, &s.time_of_day],
                )
                .await
                .map_err(tracerr::wrap!())?;
        }

        const CLEAR_RECIPIENTS_SQL: &str = "\
            DELETE FROM reminder_recipients \
            WHERE reminder_id = $1::UUID";
        _ = self
            .exec(CLEAR_RECIPIENTS_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?;
        const RECIPIENT_SQL: &str = "\
            INSERT INTO reminder_recipients (reminder_id, position, email) \
            VALUES ($1::UUID, $2::INT4, $3::VARCHAR)";
        for (pos, email) in (0_i32..).zip(&recipients) {
            _ = self
                .exec(RECIPIENT_SQL, &[&id, &pos, email])
                .await
                .map_err(tracerr::wrap!())?;
        }

        Ok(())
    }
}

impl<C> Database<Delete<By<Reminder, reminder::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Reminder, reminder::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM reminders \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
