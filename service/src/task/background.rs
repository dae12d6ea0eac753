//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
    iter,
};

use derive_more::Display;
use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};
use tokio::task;

#[cfg(doc)]
use crate::Task;

/// Background environment for running [`Task`]s.
///
/// Resolves once all the spawned [`Task`]s complete, or any of them fails.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set of tasks.
    set: task::LocalSet,

    /// Handles of spawned tasks.
    handles: Vec<task::JoinHandle<Result<(), Failure>>>,
}

/// Failure of a [`Task`] spawned in a [`Background`].
#[derive(Debug, Display)]
#[display("`{task}` task failed: {error}")]
pub struct Failure {
    /// Name of the failed [`Task`].
    pub task: &'static str,

    /// Error the [`Task`] failed with.
    pub error: Box<dyn Error + 'static>,
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.error)
    }
}

impl Background {
    /// Spawns a new named [`Task`] inside the [`Background`] environment.
    pub fn spawn<F, E>(&mut self, task: &'static str, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        self.handles.push(self.set.spawn_local(future.map_err(move |e| {
            Failure {
                task,
                error: Box::new(e),
            }
        })));
    }

    /// Indicates whether no [`Task`]s were spawned in this [`Background`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl IntoFuture for Background {
    type Output = Result<(), Failure>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { set, handles } = self;
        future::try_join_all(iter::once(set.map(Ok).boxed_local()).chain(
            handles.into_iter().map(|h| {
                h.map(|r| {
                    r.unwrap_or_else(|e| {
                        Err(Failure {
                            task: "unknown",
                            error: Box::new(e),
                        })
                    })
                })
                .boxed_local()
            }),
        ))
        .map_ok(drop)
        .boxed_local()
    }
}

#[cfg(test)]
mod spec {
    use std::io;

    use super::Background;

    #[tokio::test]
    async fn completes_when_empty() {
        let bg = Background::default();

        assert!(bg.is_empty());
        assert!(bg.await.is_ok());
    }

    #[tokio::test]
    async fn reports_failed_task_name() {
        let mut bg = Background::default();
        bg.spawn("Ok", async { Ok::<_, io::Error>(()) });
        bg.spawn("Broken", async { Err(io::Error::other("boom")) });

        let err = bg.await.unwrap_err();

        assert_eq!(err.task, "Broken");
        assert_eq!(err.to_string(), "`Broken` task failed: boom");
    }
}
