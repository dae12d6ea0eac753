//! [`Settings`]-related [`Database`] implementations.

use common::operations::{By, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{setting, Settings},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Selects the stored [`Settings`] on top of the default ones.
///
/// Unknown keys are ignored.
impl<C> Database<Select<By<Settings, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Settings;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Settings, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT key, value \
            FROM settings";
        let rows = self.query(SQL, &[]).await.map_err(tracerr::wrap!())?;

        let mut settings = Settings::default();
        for row in rows {
            if let Some(key) = setting::Key::from_name(row.get("key")) {
                settings.set(key, row.get("value"));
            }
        }
        Ok(settings)
    }
}

impl<C> Database<Update<Settings>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(settings): Update<Settings>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO settings (key, value) \
            VALUES ($1::VARCHAR, $2::TEXT) \
            ON CONFLICT (key) DO UPDATE \
            SET value = EXCLUDED.value";
        for key in setting::Key::ALL {
            let value = settings.get(key);
            _ = self
                .exec(SQL, &[&key.as_str(), &value])
                .await
                .map_err(tracerr::wrap!())?;
        }
        Ok(())
    }
}
