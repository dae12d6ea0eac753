//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Login, Name, Password};
use crate::{
    domain::{user, Email, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Login`] of a new [`User`].
    pub login: user::Login,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// [`Email`] of a new [`User`].
    pub email: Option<Email>,
}

impl<Db, M> Command<CreateUser> for Service<Db, M>
where
    Db: for<'l> Database<
            Select<By<Option<User>, &'l user::Login>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            login,
            password,
            email,
        } = cmd;

        let u = self
            .database()
            .execute(Select(By::new(&login)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::LoginOccupied(login)));
        }

        let password_hash = user::PasswordHash::new(password.expose_secret())
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let user = User {
            id: user::Id::new(),
            name,
            login,
            password_hash,
            email,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Login`] is already occupied.
    #[display("`{_0}` login is occupied")]
    LoginOccupied(#[error(not(source))] user::Login),

    /// [`Password`] hashing failed.
    #[display("Failed to hash the password: {_0}")]
    #[from]
    PasswordHash(argon2::password_hash::Error),
}

#[cfg(test)]
mod spec {
    use common::UtcOffset;
    use secrecy::SecretBox;

    use crate::{domain::user, test_support::service, Command as _};

    use super::{CreateUser, ExecutionError};

    fn create(login: &str) -> CreateUser {
        CreateUser {
            name: user::Name::new("Jane Doe").unwrap(),
            login: user::Login::new(login).unwrap(),
            password: SecretBox::new(Box::new(
                user::Password::new("correct horse").unwrap(),
            )),
            email: None,
        }
    }

    #[tokio::test]
    async fn hashes_password() {
        let svc = service(UtcOffset::UTC);

        let user = svc.execute(create("jane")).await.unwrap();

        let password = user::Password::new("correct horse").unwrap();
        assert!(user.password_hash.verify(&password));
        assert_ne!(user.password_hash.to_string(), "correct horse");
        assert_eq!(svc.database().lock().users.len(), 1);
    }

    #[tokio::test]
    async fn rejects_occupied_login() {
        let svc = service(UtcOffset::UTC);
        _ = svc.execute(create("jane")).await.unwrap();

        let err = svc.execute(create("jane")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::LoginOccupied(_)));
        assert_eq!(svc.database().lock().users.len(), 1);
    }
}
