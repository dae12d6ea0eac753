//! [`Birthdays`] definition.

use common::{
    operations::{By, Select},
    Date,
};
use tracerr::Traced;

use crate::{
    domain::{jubilee, Employee},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] for the present [`Employee`]s having their birthday on a
/// [`Date`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Birthdays {
    /// [`Date`] to check the birthdays on.
    pub on: Date,
}

impl<Db, M> Query<Birthdays> for Service<Db, M>
where
    Db: Database<
        Select<By<Vec<Employee>, read::employee::Filter>>,
        Ok = Vec<Employee>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Birthdays { on }: Birthdays,
    ) -> Result<Self::Ok, Self::Err> {
        let mut employees = self
            .database()
            .execute(Select(By::new(read::employee::Filter::present())))
            .await
            .map_err(tracerr::wrap!())?;
        employees.retain(|e| {
            e.birth_date.is_some_and(|b| jubilee::is_birthday(b, on))
        });
        employees.sort_by_key(Employee::full_name);
        Ok(employees)
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, UtcOffset};

    use crate::{
        domain::{employee, Employee},
        test_support::service,
        Query as _,
    };

    use super::Birthdays;

    fn employee(name: &str, birth: &str) -> Employee {
        Employee {
            id: employee::Id::new(),
            first_name: employee::Name::new(name).unwrap(),
            last_name: employee::Name::new("Doe").unwrap(),
            email: None,
            birth_date: birth.parse().ok(),
            start_date: None,
            exit_date: None,
            status: employee::Status::Active,
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn matches_day_and_month() {
        let svc = service(UtcOffset::UTC);
        {
            let mut state = svc.database().lock();
            state.employees.push(employee("Zoe", "1990-03-14"));
            state.employees.push(employee("Adam", "1985-03-14"));
            state.employees.push(employee("Eve", "1990-03-15"));
        }

        let found = svc
            .execute(Birthdays {
                on: "2025-03-14".parse().unwrap(),
            })
            .await
            .unwrap();

        let names = found
            .iter()
            .map(|e| e.first_name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Adam", "Zoe"]);
    }
}
