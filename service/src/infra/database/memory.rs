//! In-memory [`Database`] implementation.

use std::{
    collections::HashMap,
    ops::RangeInclusive,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use common::operations::{By, Commit, Delete, Insert, Select, Transact, Update};
use tracerr::Traced;

use crate::{
    domain::{
        employee, lifecycle, reminder,
        send_log::{self, SentDateTime},
        user, Employee, Reminder, SendLog, Settings, User,
    },
    infra::{database, Database},
    read,
};

/// In-memory [`Database`].
///
/// [`Transact`] shares the state with its parent [`Memory`], so nothing is
/// ever rolled back.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Shared stored data.
    state: Arc<Mutex<State>>,
}

/// Data stored in a [`Memory`] [`Database`].
#[derive(Debug, Default)]
pub struct State {
    /// Stored [`User`]s.
    pub users: Vec<User>,

    /// Stored [`Employee`]s.
    pub employees: Vec<Employee>,

    /// Stored [`Reminder`]s.
    pub reminders: Vec<Reminder>,

    /// Stored [`SendLog`]s in insertion order.
    pub send_logs: Vec<SendLog>,

    /// Stored [`lifecycle::Template`]s.
    pub templates: Vec<lifecycle::Template>,

    /// Stored [`lifecycle::Assignment`]s.
    pub assignments: Vec<lifecycle::Assignment>,

    /// Stored [`Settings`], if any.
    pub settings: Option<Settings>,

    /// Indicates whether storing [`SendLog`]s fails with
    /// [`database::Error::Refused`].
    pub refuse_send_logs: bool,
}

impl Memory {
    /// Locks the [`State`] of this [`Memory`] [`Database`].
    pub fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Replaces the item matching the `same` predicate, or appends a new one.
fn upsert<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
    if let Some(existing) = items.iter_mut().find(|i| same(i)) {
        *existing = item;
    } else {
        items.push(item);
    }
}

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }
}

impl<'l> Database<Select<By<Option<User>, &'l user::Login>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Login>>,
    ) -> Result<Self::Ok, Self::Err> {
        let login = by.into_inner();
        Ok(self.lock().users.iter().find(|u| &u.login == login).cloned())
    }
}

impl Database<Insert<User>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = user.id;
        upsert(&mut self.lock().users, user, |u| u.id == id);
        Ok(())
    }
}

impl Database<Select<By<read::user::TotalCount, ()>>> for Memory {
    type Ok = read::user::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::user::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let count = self.lock().users.len();
        Ok(i32::try_from(count).unwrap_or(i32::MAX).into())
    }
}

impl Database<Select<By<Option<Employee>, employee::Id>>> for Memory {
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.lock().employees.iter().find(|e| e.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Employee>, read::employee::Filter>>> for Memory {
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Employee>, read::employee::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .lock()
            .employees
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

impl Database<Insert<Employee>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(employee): Insert<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = employee.id;
        upsert(&mut self.lock().employees, employee, |e| e.id == id);
        Ok(())
    }
}

impl Database<Select<By<Option<Reminder>, reminder::Id>>> for Memory {
    type Ok = Option<Reminder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reminder>, reminder::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.lock().reminders.iter().find(|r| r.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Reminder>, read::reminder::Filter>>> for Memory {
    type Ok = Vec<Reminder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Reminder>, read::reminder::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::reminder::Filter { active } = by.into_inner();
        Ok(self
            .lock()
            .reminders
            .iter()
            .filter(|r| active.map_or(true, |a| r.active == a))
            .cloned()
            .collect())
    }
}

impl Database<Insert<Reminder>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reminder): Insert<Reminder>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = reminder.id;
        upsert(&mut self.lock().reminders, reminder, |r| r.id == id);
        Ok(())
    }
}

impl Database<Delete<By<Reminder, reminder::Id>>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Reminder, reminder::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut state = self.lock();
        let before = state.reminders.len();
        state.reminders.retain(|r| r.id != id);
        state
            .send_logs
            .retain(|l| l.subject != send_log::Subject::Reminder(id));
        Ok(state.reminders.len() < before)
    }
}

impl
    Database<
        Select<
            By<
                Option<SendLog>,
                (send_log::Key, RangeInclusive<SentDateTime>),
            >,
        >,
    > for Memory
{
    type Ok = Option<SendLog>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Option<SendLog>,
                (send_log::Key, RangeInclusive<SentDateTime>),
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (key, window) = by.into_inner();
        Ok(self
            .lock()
            .send_logs
            .iter()
            .rev()
            .find(|l| l.key() == key && window.contains(&l.sent_at))
            .cloned())
    }
}

impl Database<Select<By<Vec<SendLog>, send_log::Subject>>> for Memory {
    type Ok = Vec<SendLog>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<SendLog>, send_log::Subject>>,
    ) -> Result<Self::Ok, Self::Err> {
        let subject = by.into_inner();
        Ok(self
            .lock()
            .send_logs
            .iter()
            .rev()
            .filter(|l| l.subject == subject)
            .cloned()
            .collect())
    }
}

impl Database<Insert<SendLog>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(log): Insert<SendLog>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.lock();
        if state.refuse_send_logs {
            return Err(tracerr::new!(database::Error::Refused));
        }
        state.send_logs.push(log);
        Ok(())
    }
}

impl
    Database<
        Select<By<Vec<lifecycle::Template>, read::lifecycle::TemplateFilter>>,
    > for Memory
{
    type Ok = Vec<lifecycle::Template>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<lifecycle::Template>, read::lifecycle::TemplateFilter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .lock()
            .templates
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }
}

impl Database<Insert<lifecycle::Template>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(template): Insert<lifecycle::Template>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = template.id;
        upsert(&mut self.lock().templates, template, |t| t.id == id);
        Ok(())
    }
}

impl Database<Insert<lifecycle::Assignment>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(assignment): Insert<lifecycle::Assignment>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.lock();
        let exists = state.assignments.iter().any(|a| {
            a.employee_id == assignment.employee_id
                && a.template_id == assignment.template_id
        });
        if !exists {
            state.assignments.push(assignment);
        }
        Ok(!exists)
    }
}

impl Database<Update<lifecycle::Assignment>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(assignment): Update<lifecycle::Assignment>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.lock();
        if let Some(existing) = state.assignments.iter_mut().find(|a| {
            a.employee_id == assignment.employee_id
                && a.template_id == assignment.template_id
        }) {
            existing.due_date = assignment.due_date;
            existing.owner_id = assignment.owner_id;
            existing.status = assignment.status;
            existing.updated_at = assignment.updated_at;
        } else {
            state.assignments.push(assignment);
        }
        Ok(())
    }
}

impl
    Database<
        Select<By<Option<lifecycle::Assignment>, lifecycle::AssignmentId>>,
    > for Memory
{
    type Ok = Option<lifecycle::Assignment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<lifecycle::Assignment>, lifecycle::AssignmentId>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.lock().assignments.iter().find(|a| a.id == id).cloned())
    }
}

impl Database<Select<By<Vec<read::lifecycle::Task>, employee::Id>>> for Memory {
    type Ok = Vec<read::lifecycle::Task>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::lifecycle::Task>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();
        let state = self.lock();
        let templates = state
            .templates
            .iter()
            .map(|t| (t.id, t))
            .collect::<HashMap<_, _>>();
        Ok(state
            .assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .filter_map(|a| {
                let t = templates.get(&a.template_id)?;
                Some(read::lifecycle::Task {
                    assignment: a.clone(),
                    title: t.title.clone(),
                    kind: t.kind,
                })
            })
            .collect())
    }
}

impl Database<Select<By<Settings, ()>>> for Memory {
    type Ok = Settings;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Settings, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.lock().settings.clone().unwrap_or_default())
    }
}

impl Database<Update<Settings>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(settings): Update<Settings>,
    ) -> Result<Self::Ok, Self::Err> {
        self.lock().settings = Some(settings);
        Ok(())
    }
}
