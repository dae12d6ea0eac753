//! [`Command`] for generating lifecycle tasks of an [`Employee`].

use common::operations::{
    By, Commit, Insert, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{employee, lifecycle, Employee},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for assigning every active [`lifecycle::Template`] of the
/// provided [`lifecycle::Kind`] to an [`Employee`].
///
/// Nothing is generated if the [`Employee`] has no anchor [`Date`] for the
/// [`lifecycle::Kind`].
///
/// [`Date`]: common::Date
#[derive(Clone, Copy, Debug)]
pub struct GenerateLifecycleTasks {
    /// ID of the [`Employee`] to generate tasks for.
    pub employee_id: employee::Id,

    /// [`lifecycle::Kind`] of the tasks to generate.
    pub kind: lifecycle::Kind,

    /// [`Mode`] of treating the already existing tasks.
    pub mode: Mode,
}

/// Mode of treating the already existing [`lifecycle::Assignment`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// Existing [`lifecycle::Assignment`]s are left untouched.
    #[default]
    CreateIfAbsent,

    /// Existing [`lifecycle::Assignment`]s are reopened with their due date
    /// and owner recalculated.
    Overwrite,
}

/// Output of [`GenerateLifecycleTasks`] [`Command`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Output {
    /// Number of generated [`lifecycle::Assignment`]s.
    ///
    /// Counts only the newly created ones in [`Mode::CreateIfAbsent`], and
    /// all the written ones in [`Mode::Overwrite`].
    pub generated: usize,
}

impl<Db, M> Command<GenerateLifecycleTasks> for Service<Db, M>
where
    Db: Database<
            Select<By<Option<Employee>, employee::Id>>,
            Ok = Option<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<Vec<lifecycle::Template>, read::lifecycle::TemplateFilter>,
            >,
            Ok = Vec<lifecycle::Template>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Insert<lifecycle::Assignment>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<
            Update<lifecycle::Assignment>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: GenerateLifecycleTasks,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let GenerateLifecycleTasks {
            employee_id,
            kind,
            mode,
        } = cmd;

        let employee = self
            .database()
            .execute(Select(By::new(employee_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::EmployeeNotExists(employee_id))
            .map_err(tracerr::wrap!())?;
        if employee.anchor(kind).is_none() {
            return Ok(Output::default());
        }

        let templates = self
            .database()
            .execute(Select(By::new(read::lifecycle::TemplateFilter {
                kind: Some(kind),
                active: Some(true),
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let assignments = templates.iter().filter_map(|t| t.assign(&employee));
        let mut generated = 0;
        for assignment in assignments {
            let written = match mode {
                Mode::CreateIfAbsent => tx
                    .execute(Insert(assignment))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?,
                Mode::Overwrite => tx
                    .execute(Update(assignment))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(|()| true)?,
            };
            if written {
                generated += 1;
            }
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Output { generated })
    }
}

/// Error of [`GenerateLifecycleTasks`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Employee`] with the provided ID does not exist.
    #[display("`Employee(id: {_0})` does not exist")]
    EmployeeNotExists(#[error(not(source))] employee::Id),
}

#[cfg(test)]
mod spec {
    use common::{DateTime, UtcOffset};

    use crate::{
        domain::{employee, lifecycle, user, Employee},
        test_support::{service, TestService},
        Command as _,
    };

    use super::{ExecutionError, GenerateLifecycleTasks, Mode};

    fn employee(start: Option<&str>) -> Employee {
        Employee {
            id: employee::Id::new(),
            first_name: employee::Name::new("Jane").unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: None,
            start_date: start.map(|d| d.parse().unwrap()),
            exit_date: None,
            status: employee::Status::Onboarding,
            created_at: DateTime::now().coerce(),
        }
    }

    fn template(
        kind: lifecycle::Kind,
        days: i32,
        active: bool,
    ) -> lifecycle::Template {
        lifecycle::Template {
            id: lifecycle::TemplateId::new(),
            kind,
            title: lifecycle::Title::new("Prepare laptop").unwrap(),
            relative_due_days: days,
            owner_id: None,
            active,
            created_at: DateTime::now().coerce(),
        }
    }

    fn setup(start: Option<&str>) -> (TestService, employee::Id) {
        let svc = service(UtcOffset::UTC);
        let e = employee(start);
        let id = e.id;
        {
            let mut state = svc.database().lock();
            state.employees.push(e);
            state
                .templates
                .push(template(lifecycle::Kind::Onboarding, -3, true));
            state
                .templates
                .push(template(lifecycle::Kind::Onboarding, 7, true));
            state
                .templates
                .push(template(lifecycle::Kind::Onboarding, 1, false));
            state
                .templates
                .push(template(lifecycle::Kind::Offboarding, 0, true));
        }
        (svc, id)
    }

    fn generate(id: employee::Id, mode: Mode) -> GenerateLifecycleTasks {
        GenerateLifecycleTasks {
            employee_id: id,
            kind: lifecycle::Kind::Onboarding,
            mode,
        }
    }

    #[tokio::test]
    async fn generates_from_active_templates() {
        let (svc, id) = setup(Some("2025-07-01"));

        let out = svc
            .execute(generate(id, Mode::CreateIfAbsent))
            .await
            .unwrap();

        assert_eq!(out.generated, 2);
        let mut due = svc
            .database()
            .lock()
            .assignments
            .iter()
            .map(|a| a.due_date.to_string())
            .collect::<Vec<_>>();
        due.sort();
        assert_eq!(due, ["2025-06-28", "2025-07-08"]);
    }

    #[tokio::test]
    async fn creates_only_absent() {
        let (svc, id) = setup(Some("2025-07-01"));

        let first = svc
            .execute(generate(id, Mode::CreateIfAbsent))
            .await
            .unwrap();
        let second = svc
            .execute(generate(id, Mode::CreateIfAbsent))
            .await
            .unwrap();

        assert_eq!(first.generated, 2);
        assert_eq!(second.generated, 0);
        assert_eq!(svc.database().lock().assignments.len(), 2);
    }

    #[tokio::test]
    async fn overwrites_existing() {
        let (svc, id) = setup(Some("2025-07-01"));
        _ = svc
            .execute(generate(id, Mode::CreateIfAbsent))
            .await
            .unwrap();
        let owner = user::Id::new();
        {
            let mut state = svc.database().lock();
            for a in &mut state.assignments {
                a.status = lifecycle::Status::Done;
            }
            for t in &mut state.templates {
                t.owner_id = Some(owner);
            }
            state.employees[0].start_date = "2025-08-01".parse().ok();
        }

        let out = svc.execute(generate(id, Mode::Overwrite)).await.unwrap();

        assert_eq!(out.generated, 2);
        let state = svc.database().lock();
        assert_eq!(state.assignments.len(), 2);
        for a in &state.assignments {
            assert_eq!(a.status, lifecycle::Status::Open);
            assert_eq!(a.owner_id, Some(owner));
        }
        assert!(state
            .assignments
            .iter()
            .any(|a| a.due_date.to_string() == "2025-07-29"));
    }

    #[tokio::test]
    async fn generates_nothing_without_anchor() {
        let (svc, id) = setup(None);

        let out = svc
            .execute(generate(id, Mode::CreateIfAbsent))
            .await
            .unwrap();

        assert_eq!(out.generated, 0);
        assert!(svc.database().lock().assignments.is_empty());
    }

    #[tokio::test]
    async fn fails_for_unknown_employee() {
        let svc = service(UtcOffset::UTC);

        let err = svc
            .execute(generate(employee::Id::new(), Mode::CreateIfAbsent))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmployeeNotExists(_)));
    }
}
