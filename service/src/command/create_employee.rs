//! [`Command`] for creating a new [`Employee`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    Date, DateTime,
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

/// [`Command`] for creating a new [`Employee`].
///
/// Lifecycle tasks are generated right away if the [`Employee`] is created
/// in the [`employee::Status::Onboarding`] or
/// [`employee::Status::Offboarding`].
#[derive(Clone, Debug)]
pub struct CreateEmployee {
    /// First [`employee::Name`] of a new [`Employee`].
    pub first_name: employee::Name,

    /// Last [`employee::Name`] of a new [`Employee`].
    pub last_name: employee::Name,

    /// [`Email`] of a new [`Employee`].
    pub email: Option<Email>,

    /// Birth [`Date`] of a new [`Employee`].
    pub birth_date: Option<Date>,

    /// Start [`Date`] of a new [`Employee`].
    pub start_date: Option<Date>,

    /// Exit [`Date`] of a new [`Employee`].
    pub exit_date: Option<Date>,

    /// [`employee::Status`] of a new [`Employee`].
    pub status: employee::Status,
}

/// Output of [`CreateEmployee`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Created [`Employee`].
    pub employee: Employee,

    /// Number of generated lifecycle tasks.
    pub generated_tasks: usize,
}

impl<Db, M> Command<CreateEmployee> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Employee>, Err = Traced<database::Error>>
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
        cmd: CreateEmployee,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateEmployee {
            first_name,
            last_name,
            email,
            birth_date,
            start_date,
            exit_date,
            status,
        } = cmd;

        if let (Some(start), Some(exit)) = (start_date, exit_date) {
            if exit < start {
                return Err(tracerr::new!(E::ExitBeforeStart));
            }
        }

        let employee = Employee {
            id: employee::Id::new(),
            first_name,
            last_name,
            email,
            birth_date,
            start_date,
            exit_date,
            status,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(employee.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let generated_tasks = match status.lifecycle_kind() {
            Some(kind) => {
                self.execute(GenerateLifecycleTasks {
                    employee_id: employee.id,
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

/// Error of [`CreateEmployee`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

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
        domain::{employee, lifecycle},
        test_support::service,
        Command as _,
    };

    use super::{CreateEmployee, ExecutionError};

    fn create(
        status: employee::Status,
        start: &str,
        exit: Option<&str>,
    ) -> CreateEmployee {
        CreateEmployee {
            first_name: employee::Name::new("Jane").unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: None,
            start_date: start.parse().ok(),
            exit_date: exit.map(|d| d.parse().unwrap()),
            status,
        }
    }

    #[tokio::test]
    async fn generates_onboarding_tasks() {
        let svc = service(UtcOffset::UTC);
        svc.database().lock().templates.push(lifecycle::Template {
            id: lifecycle::TemplateId::new(),
            kind: lifecycle::Kind::Onboarding,
            title: lifecycle::Title::new("Sign the contract").unwrap(),
            relative_due_days: -1,
            owner_id: None,
            active: true,
            created_at: DateTime::now().coerce(),
        });

        let out = svc
            .execute(create(employee::Status::Onboarding, "2025-07-01", None))
            .await
            .unwrap();
        let active = svc
            .execute(create(employee::Status::Active, "2025-07-01", None))
            .await
            .unwrap();

        assert_eq!(out.generated_tasks, 1);
        assert_eq!(active.generated_tasks, 0);
        let state = svc.database().lock();
        assert_eq!(state.employees.len(), 2);
        assert_eq!(state.assignments.len(), 1);
        assert_eq!(state.assignments[0].employee_id, out.employee.id);
    }

    #[tokio::test]
    async fn rejects_exit_before_start() {
        let svc = service(UtcOffset::UTC);

        let err = svc
            .execute(create(
                employee::Status::Active,
                "2025-07-01",
                Some("2025-06-30"),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ExitBeforeStart));
        assert!(svc.database().lock().employees.is_empty());
    }
}
