//! [`Jubilees`] definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{jubilee, Employee, Settings},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] for the milestone anniversaries of the present [`Employee`]s
/// falling into a [`jubilee::Target`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Jubilees {
    /// Day or window to match the anniversaries against.
    pub target: jubilee::Target,
}

impl<Db, M> Query<Jubilees> for Service<Db, M>
where
    Db: Database<
            Select<By<Vec<Employee>, read::employee::Filter>>,
            Ok = Vec<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Settings, ()>>,
            Ok = Settings,
            Err = Traced<database::Error>,
        >,
{
    type Ok = jubilee::Report;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Jubilees { target }: Jubilees,
    ) -> Result<Self::Ok, Self::Err> {
        let settings = self
            .database()
            .execute(Select(By::<Settings, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        if settings.milestone_years.is_empty() {
            return Ok(jubilee::Report::default());
        }

        let employees = self
            .database()
            .execute(Select(By::new(read::employee::Filter::present())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(jubilee::Report::new(jubilee::hits(
            &employees,
            &settings.milestone_years,
            target,
        )))
    }
}
