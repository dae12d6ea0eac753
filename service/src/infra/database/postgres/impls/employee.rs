//! [`Employee`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{employee, Employee},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of an [`Employee`] row.
const COLUMNS: &str = "\
    id, first_name, last_name, email, \
    birth_date, start_date, exit_date, \
    status, created_at";

/// Builds an [`Employee`] out of the provided [`Row`] having [`COLUMNS`].
fn from_row(row: &Row) -> Employee {
    Employee {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        birth_date: row.get("birth_date"),
        start_date: row.get("start_date"),
        exit_date: row.get("exit_date"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Employee>, employee::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM employees \
             WHERE id = $1::UUID",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Employee>, read::employee::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Employee>, read::employee::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::employee::Filter {
            status,
            present_only,
        } = by.into_inner();
        let exited = employee::Status::Exited;

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM employees \
             WHERE ($1::INT2 IS NULL OR status = $1::INT2) \
               AND (NOT $2::BOOL OR status <> $3::INT2) \
             ORDER BY last_name, first_name, id",
        );
        Ok(self
            .query(&sql, &[&status, &present_only, &exited])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Employee>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(employee): Insert<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        let Employee {
            id,
            first_name,
            last_name,
            email,
            birth_date,
            start_date,
            exit_date,
            status,
            created_at,
        } = employee;

        const SQL: &str = "\
            INSERT INTO employees (\
                id, first_name, last_name, email, \
                birth_date, start_date, exit_date, \
                status, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::DATE, $6::DATE, $7::DATE, \
                $8::INT2, $9::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                email = EXCLUDED.email, \
                birth_date = EXCLUDED.birth_date, \
                start_date = EXCLUDED.start_date, \
                exit_date = EXCLUDED.exit_date, \
                status = EXCLUDED.status";
        self.exec(
            SQL,
            &[
                &id,
                &first_name,
                &last_name,
                &email,
                &birth_date,
                &start_date,
                &exit_date,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
