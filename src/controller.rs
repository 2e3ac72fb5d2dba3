use chrono::Utc;

use crate::io::store::{Store, StoreError};
use crate::model::task::{Filter, Task};

/// The clear-completed confirmation prompt, shared by both front ends
pub const CLEAR_PROMPT: &str = "Tem certeza que deseja remover todas as tarefas concluídas?";

/// A UI intent, mapping front-end actions to controller operations so the
/// controller stays testable without any UI attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Toggle(i64),
    Delete(i64),
    ClearCompleted,
    SetFilter(Filter),
}

/// Owns the ordered task list and the active filter.
///
/// Every mutating operation rewrites the full persisted list before
/// returning. Invalid operations (empty text, unknown id) are silent
/// no-ops and do not touch the file.
pub struct Controller {
    tasks: Vec<Task>,
    filter: Filter,
    store: Store,
    /// Highest id issued or loaded so far
    last_id: i64,
}

impl Controller {
    /// Load the persisted list from the store and start at filter All.
    pub fn new(store: Store) -> Self {
        let tasks = store.load();
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Controller {
            tasks,
            filter: Filter::default(),
            store,
            last_id,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// The filtered view, in insertion order.
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    /// Counter summary: `"N tarefa(s)"` plus, when the list is non-empty,
    /// an appended completed count.
    pub fn counter_text(&self) -> String {
        let total = self.tasks.len();
        let mut text = if total == 1 {
            "1 tarefa".to_string()
        } else {
            format!("{} tarefas", total)
        };
        if total > 0 {
            text.push_str(&format!(" ({} concluídas)", self.completed_count()));
        }
        text
    }

    /// Dispatch a tagged UI action.
    pub fn apply(&mut self, action: Action) -> Result<(), StoreError> {
        match action {
            Action::Add(text) => self.add(&text).map(|_| ()),
            Action::Toggle(id) => self.toggle(id),
            Action::Delete(id) => self.delete(id),
            Action::ClearCompleted => self.clear_completed().map(|_| ()),
            Action::SetFilter(filter) => {
                self.set_filter(filter);
                Ok(())
            }
        }
    }

    /// Append a new pending task. Whitespace-only text is rejected and
    /// returns `Ok(None)` without persisting.
    pub fn add(&mut self, text: &str) -> Result<Option<i64>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = self.next_id();
        self.tasks.push(Task::new(id, text.to_string()));
        self.persist()?;
        Ok(Some(id))
    }

    /// Flip the completion flag of the matching task; unknown ids are
    /// ignored.
    pub fn toggle(&mut self, id: i64) -> Result<(), StoreError> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.done = !task.done;
                self.persist()
            }
            None => Ok(()),
        }
    }

    /// Remove the matching task; unknown ids are ignored, so the call is
    /// idempotent.
    pub fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Remove every completed task, preserving the relative order of the
    /// remainder. Returns how many were removed. Confirmation is the front
    /// end's responsibility, gated on `completed_count()`.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return Ok(0);
        }
        self.persist()?;
        Ok(removed)
    }

    /// Set the active filter. Display-only: never persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Millisecond timestamp, bumped past the last issued id so rapid
    /// calls within one tick still get unique ids.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.tasks)
    }
}
