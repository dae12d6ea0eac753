//! [`Command`] for updating an [`Employee`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    command::{
        generate_lifecycle_tasks::{self, Mode},
        GenerateLifecycleTasks,
    },
    domain::{employee, Email, Employee},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`Employee`].
///
/// Fields set to [`None`] are left untouched. Moving the [`Employee`] into
/// the [`employee::Status::Onboarding`] or [`employee::Status::Offboarding`]
/// generates the missing lifecycle tasks.
#[derive(Clone, Debug, Default)]
pub struct UpdateEmployee {
    /// ID of the [`Employee`] to update.
    pub employee_id: employee::Id,

    /// New first [`employee::Name`].
    pub first_name: Option<employee::Name>,

    /// New last [`employee::Name`].
    pub last_name: Option<employee::Name>,

    /// New [`Email`], or its removal.
    pub email: Option<Option<Email>>,

    /// New birth [`Date`], or its removal.
    pub birth_date: Option<Option<Date>>,

    /// New start [`Date`], or its removal.
    pub start_date: Option<Option<Date>>,

    /// New exit [`Date`], or its removal.
    pub exit_date: Option<Option<Date>>,

    /// New [`employee::Status`].
    pub status: Option<employee::Status>,
}

/// Output of [`UpdateEmployee`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Updated [`Employee`].
    pub employee: Employee,

    /// Number of generated lifecycle tasks.
    pub generated_tasks: usize,
}

impl<Db, M> Command<UpdateEmployee> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Employee>, employee::Id>>,
            Ok = Option<Employee>,
            Err = Traced<database::Error>,
        > + Database<Insert<Employee>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Self: Command<
        GenerateLifecycleTasks,
        Ok = generate_lifecycle_tasks::Output,
        Err = Traced<generate_lifecycle_tasks::ExecutionError>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateEmployee,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateEmployee {
            employee_id,
            first_name,
            last_name,
            email,
            birth_date,
            start_date,
            exit_date,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut employee = tx
            .execute(Select(By::<Option<Employee>, _>::new(employee_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EmployeeNotExists(employee_id))
            .map_err(tracerr::wrap!())?;
        let previous_status = employee.status;

        if let Some(name) = first_name {
            employee.first_name = name;
        }
        if let Some(name) = last_name {
            employee.last_name = name;
        }
        if let Some(email) = email {
            employee.email = email;
        }
        if let Some(date) = birth_date {
            employee.birth_date = date;
        }
        if let Some(date) = start_date {
            employee.start_date = date;
        }
        if let Some(date) = exit_date {
            employee.exit_date = date;
        }
        if let Some(status) = status {
            employee.status = status;
        }

        if let (Some(start), Some(exit)) =
            (employee.start_date, employee.exit_date)
        {
            if exit < start {
                return Err(tracerr::new!(E::ExitBeforeStart));
            }
        }

        tx.execute(Insert(employee.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let kind = employee
            .status
            .lifecycle_kind()
            .filter(|_| employee.status != previous_status);
        let generated_tasks = match kind {
            Some(kind) => {
                self.execute(GenerateLifecycleTasks {
                    employee_id,
                    kind,
                    mode: Mode::CreateIfAbsent,
                })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .generated
            }
            None => 0,
        };

        Ok(Output {
            employee,
            generated_tasks,
        })
    }
}

/// Error of [`UpdateEmployee`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Employee`] with the provided ID does not exist.
    #[display("`Employee(id: {_0})` does not exist")]
    EmployeeNotExists(#[error(not(source))] employee::Id),

    /// Exit [`Date`] precedes the start [`Date`].
    #[display("Exit date precedes the start date")]
    ExitBeforeStart,

    /// [`GenerateLifecycleTasks`] failed.
    #[display("Failed to generate lifecycle tasks: {_0}")]
    #[from]
    GenerateTasks(generate_lifecycle_tasks::ExecutionError),
}

#[cfg(test)]
mod spec {
    use common::{DateTime, UtcOffset};

    use crate::{
        domain::{employee, lifecycle, Employee},
        test_support::{service, TestService},
        Command as _,
    };

    use super::{ExecutionError, UpdateEmployee};

    fn setup() -> (TestService, employee::Id) {
        let svc = service(UtcOffset::UTC);
        let id = employee::Id::new();
        let mut state = svc.database().lock();
        state.employees.push(Employee {
            id,
            first_name: employee::Name::new("Jane").unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: None,
            start_date: "2020-01-15".parse().ok(),
            exit_date: None,
            status: employee::Status::Active,
            created_at: DateTime::now().coerce(),
        });
        state.templates.push(lifecycle::Template {
            id: lifecycle::TemplateId::new(),
            kind: lifecycle::Kind::Offboarding,
            title: lifecycle::Title::new("Return the laptop").unwrap(),
            relative_due_days: 0,
            owner_id: None,
            active: true,
            created_at: DateTime::now().coerce(),
        });
        drop(state);
        (svc, id)
    }

    #[tokio::test]
    async fn generates_tasks_on_status_change() {
        let (svc, id) = setup();

        let out = svc
            .execute(UpdateEmployee {
                employee_id: id,
                exit_date: Some("2025-09-30".parse().ok()),
                status: Some(employee::Status::Offboarding),
                ..UpdateEmployee::default()
            })
            .await
            .unwrap();
        let again = svc
            .execute(UpdateEmployee {
                employee_id: id,
                status: Some(employee::Status::Offboarding),
                ..UpdateEmployee::default()
            })
            .await
            .unwrap();

        assert_eq!(out.generated_tasks, 1);
        assert_eq!(again.generated_tasks, 0);
        assert_eq!(out.employee.status, employee::Status::Offboarding);
        let state = svc.database().lock();
        assert_eq!(state.assignments.len(), 1);
        assert_eq!(state.assignments[0].due_date.to_string(), "2025-09-30");
    }

    #[tokio::test]
    async fn clears_optional_fields() {
        let (svc, id) = setup();

        let out = svc
            .execute(UpdateEmployee {
                employee_id: id,
                start_date: Some(None),
                last_name: employee::Name::new("Smith"),
                ..UpdateEmployee::default()
            })
            .await
            .unwrap();

        assert_eq!(out.employee.start_date, None);
        assert_eq!(out.employee.full_name(), "Jane Smith");
    }

    #[tokio::test]
    async fn rejects_exit_before_start() {
        let (svc, id) = setup();

        let err = svc
            .execute(UpdateEmployee {
                employee_id: id,
                exit_date: Some("2019-12-31".parse().ok()),
                ..UpdateEmployee::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ExitBeforeStart));
        assert_eq!(svc.database().lock().employees[0].exit_date, None);
    }

    #[tokio::test]
    async fn fails_for_unknown_employee() {
        let (svc, _) = setup();

        let err = svc
            .execute(UpdateEmployee {
                employee_id: employee::Id::new(),
                ..UpdateEmployee::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmployeeNotExists(_)));
    }
}
