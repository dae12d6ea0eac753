//! [`Command`] for updating a [`lifecycle::Status`] of a task.

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::lifecycle,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`lifecycle::Status`] of a
/// [`lifecycle::Assignment`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateTaskStatus {
    /// ID of the [`lifecycle::Assignment`] to update.
    pub assignment_id: lifecycle::AssignmentId,

    /// New [`lifecycle::Status`].
    pub status: lifecycle::Status,
}

impl<Db, M> Command<UpdateTaskStatus> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<
                By<Option<lifecycle::Assignment>, lifecycle::AssignmentId>,
            >,
            Ok = Option<lifecycle::Assignment>,
            Err = Traced<database::Error>,
        > + Database<
            Update<lifecycle::Assignment>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = lifecycle::Assignment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateTaskStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTaskStatus {
            assignment_id,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut assignment = tx
            .execute(Select(By::new(assignment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AssignmentNotExists(assignment_id))
            .map_err(tracerr::wrap!())?;
        if assignment.status == status {
            return Ok(assignment);
        }

        assignment.status = status;
        assignment.updated_at = lifecycle::AssignmentUpdateDateTime::now();
        tx.execute(Update(assignment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(assignment)
    }
}

/// Error of [`UpdateTaskStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`lifecycle::Assignment`] with the provided ID does not exist.
    #[display("`Assignment(id: {_0})` does not exist")]
    AssignmentNotExists(#[error(not(source))] lifecycle::AssignmentId),
}

#[cfg(test)]
mod spec {
    use common::UtcOffset;

    use crate::{
        domain::{employee, lifecycle},
        test_support::service,
        Command as _,
    };

    use super::{ExecutionError, UpdateTaskStatus};

    #[tokio::test]
    async fn marks_task_done() {
        let svc = service(UtcOffset::UTC);
        let now = lifecycle::AssignmentCreationDateTime::now();
        let assignment = lifecycle::Assignment {
            id: lifecycle::AssignmentId::new(),
            employee_id: employee::Id::new(),
            template_id: lifecycle::TemplateId::new(),
            due_date: "2025-07-01".parse().unwrap(),
            owner_id: None,
            status: lifecycle::Status::Open,
            created_at: now,
            updated_at: now.coerce(),
        };
        let id = assignment.id;
        svc.database().lock().assignments.push(assignment);

        let updated = svc
            .execute(UpdateTaskStatus {
                assignment_id: id,
                status: lifecycle::Status::Done,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, lifecycle::Status::Done);
        assert_eq!(
            svc.database().lock().assignments[0].status,
            lifecycle::Status::Done,
        );
    }

    #[tokio::test]
    async fn fails_for_unknown_task() {
        let svc = service(UtcOffset::UTC);

        let err = svc
            .execute(UpdateTaskStatus {
                assignment_id: lifecycle::AssignmentId::new(),
                status: lifecycle::Status::Done,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::AssignmentNotExists(_),
        ));
    }
}
