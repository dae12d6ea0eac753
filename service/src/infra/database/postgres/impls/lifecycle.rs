//! Lifecycle-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{employee, lifecycle},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of a [`lifecycle::Assignment`] row, prefixed with `a.`.
const ASSIGNMENT_COLUMNS: &str = "\
    a.id, a.employee_id, a.template_id, a.due_date, a.owner_id, a.status, \
    a.created_at, a.updated_at";

/// Builds a [`lifecycle::Assignment`] out of the provided [`Row`] having
/// [`ASSIGNMENT_COLUMNS`].
fn assignment_from_row(row: &Row) -> lifecycle::Assignment {
    lifecycle::Assignment {
        id: row.get("id"),
        employee_id: row.get("employee_id"),
        template_id: row.get("template_id"),
        due_date: row.get("due_date"),
        owner_id: row.get("owner_id"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C>
    Database<
        Select<By<Vec<lifecycle::Template>, read::lifecycle::TemplateFilter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<lifecycle::Template>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<lifecycle::Template>, read::lifecycle::TemplateFilter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::lifecycle::TemplateFilter { kind, active } = by.into_inner();

        const SQL: &str = "\
            SELECT id, kind, title, relative_due_days, owner_id, active, \
                   created_at \
            FROM task_templates \
            WHERE ($1::INT2 IS NULL OR kind = $1::INT2) \
              AND ($2::BOOL IS NULL OR active = $2::BOOL) \
            ORDER BY kind, relative_due_days, title";
        Ok(self
            .query(SQL, &[&kind, &active])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| lifecycle::Template {
                id: row.get("id"),
                kind: row.get("kind"),
                title: row.get("title"),
                relative_due_days: row.get("relative_due_days"),
                owner_id: row.get("owner_id"),
                active: row.get("active"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

impl<C> Database<Insert<lifecycle::Template>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(template): Insert<lifecycle::Template>,
    ) -> Result<Self::Ok, Self::Err> {
        let lifecycle::Template {
            id,
            kind,
            title,
            relative_due_days,
            owner_id,
            active,
            created_at,
        } = template;

        const SQL: &str = "\
            INSERT INTO task_templates (\
                id, kind, title, relative_due_days, owner_id, active, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::INT2, $3::VARCHAR, $4::INT4, $5::UUID, \
                $6::BOOL, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET kind = EXCLUDED.kind, \
                title = EXCLUDED.title, \
                relative_due_days = EXCLUDED.relative_due_days, \
                owner_id = EXCLUDED.owner_id, \
                active = EXCLUDED.active";
        self.exec(
            SQL,
            &[
                &id,
                &kind,
                &title,
                &relative_due_days,
                &owner_id,
                &active,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

/// Inserts the provided [`lifecycle::Assignment`], doing nothing if the
/// [`lifecycle::Template`] is assigned to the [`Employee`] already.
///
/// Returns whether the [`lifecycle::Assignment`] was inserted.
///
/// [`Employee`]: crate::domain::Employee
impl<C> Database<Insert<lifecycle::Assignment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(assignment): Insert<lifecycle::Assignment>,
    ) -> Result<Self::Ok, Self::Err> {
        let lifecycle::Assignment {
            id,
            employee_id,
            template_id,
            due_date,
            owner_id,
            status,
            created_at,
            updated_at,
        } = assignment;

        const SQL: &str = "\
            INSERT INTO task_assignments (\
                id, employee_id, template_id, due_date, owner_id, status, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::DATE, $5::UUID, $6::INT2, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ\
            ) \
            ON CONFLICT (employee_id, template_id) DO NOTHING";
        self.exec(
            SQL,
            &[
                &id,
                &employee_id,
                &template_id,
                &due_date,
                &owner_id,
                &status,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|inserted| inserted > 0)
    }
}

/// Upserts the provided [`lifecycle::Assignment`], overwriting the existing
/// one of the same [`lifecycle::Template`] and [`Employee`].
///
/// [`Employee`]: crate::domain::Employee
impl<C> Database<Update<lifecycle::Assignment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(assignment): Update<lifecycle::Assignment>,
    ) -> Result<Self::Ok, Self::Err> {
        let lifecycle::Assignment {
            id,
            employee_id,
            template_id,
            due_date,
            owner_id,
            status,
            created_at,
            updated_at,
        } = assignment;

        const SQL: &str = "\
            INSERT INTO task_assignments (\
                id, employee_id, template_id, due_date, owner_id, status, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::DATE, $5::UUID, $6::INT2, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ\
            ) \
            ON CONFLICT (employee_id, template_id) DO UPDATE \
            SET due_date = EXCLUDED.due_date, \
                owner_id = EXCLUDED.owner_id, \
                status = EXCLUDED.status, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &employee_id,
                &template_id,
                &due_date,
                &owner_id,
                &status,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C>
    Database<
        Select<By<Option<lifecycle::Assignment>, lifecycle::AssignmentId>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<lifecycle::Assignment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<lifecycle::Assignment>, lifecycle::AssignmentId>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} \
             FROM task_assignments AS a \
             WHERE a.id = $1::UUID",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(assignment_from_row))
    }
}

impl<C> Database<Select<By<Vec<read::lifecycle::Task>, employee::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::lifecycle::Task>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::lifecycle::Task>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();

        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS}, t.title, t.kind \
             FROM task_assignments AS a \
             INNER JOIN task_templates AS t ON t.id = a.template_id \
             WHERE a.employee_id = $1::UUID \
             ORDER BY a.due_date, t.title",
        );
        Ok(self
            .query(&sql, &[&employee_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| read::lifecycle::Task {
                assignment: assignment_from_row(row),
                title: row.get("title"),
                kind: row.get("kind"),
            })
            .collect())
    }
}
