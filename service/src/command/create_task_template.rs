//! [`Command`] for creating a new [`lifecycle::Template`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{lifecycle, user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`lifecycle::Template`].
#[derive(Clone, Debug)]
pub struct CreateTaskTemplate {
    /// [`lifecycle::Kind`] of a new [`lifecycle::Template`].
    pub kind: lifecycle::Kind,

    /// [`lifecycle::Title`] of a new [`lifecycle::Template`].
    pub title: lifecycle::Title,

    /// Number of days the task is due relative to the anchor date.
    pub relative_due_days: i32,

    /// ID of the [`User`] owning the generated tasks.
    pub owner_id: Option<user::Id>,

    /// Indicator whether a new [`lifecycle::Template`] is active.
    pub active: bool,
}

impl<Db, M> Command<CreateTaskTemplate> for Service<Db, M>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Insert<lifecycle::Template>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = lifecycle::Template;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateTaskTemplate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateTaskTemplate {
            kind,
            title,
            relative_due_days,
            owner_id,
            active,
        } = cmd;

        if let Some(id) = owner_id {
            let owner = self
                .database()
                .execute(Select(By::<Option<User>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if owner.map_or(true, |u| u.deleted_at.is_some()) {
                return Err(tracerr::new!(E::OwnerNotExists(id)));
            }
        }

        let template = lifecycle::Template {
            id: lifecycle::TemplateId::new(),
            kind,
            title,
            relative_due_days,
            owner_id,
            active,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(template.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(template)
    }
}

/// Error of [`CreateTaskTemplate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Owner [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    OwnerNotExists(#[error(not(source))] user::Id),
}
