use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::todo::{NewTodo, Todo};
use crate::repository::{StoreError, TodoStore};

struct State {
    next_id: i64,
    todos: BTreeMap<i32, Todo>,
}

/// Process-local store. Ids start at 1 and are never handed out twice.
pub struct MemoryStore {
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: Mutex::new(State {
                next_id: 1,
                todos: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl TodoStore for MemoryStore {
    fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let state = self.lock()?;
        Ok(state.todos.values().cloned().collect())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Todo>, StoreError> {
        let state = self.lock()?;
        Ok(state.todos.get(&id).cloned())
    }

    fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut state = self.lock()?;
        let id = i32::try_from(state.next_id).map_err(|_| StoreError::IdsExhausted)?;
        state.next_id += 1;
        let todo = Todo { id, text: todo.text };
        state.todos.insert(id, todo.clone());
        Ok(todo)
    }

    fn delete(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.todos.remove(&todo.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(text: &str) -> NewTodo {
        NewTodo {
            text: text.to_string(),
        }
    }

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.find_all().unwrap().is_empty());
        assert_eq!(store.find_by_id(1).unwrap(), None);
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let first = store.insert(new_todo("buy milk")).unwrap();
        let second = store.insert(new_todo("walk dog")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.find_by_id(2).unwrap(), Some(second.clone()));
        assert_eq!(store.find_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn delete_removes_and_ids_are_not_reused() {
        let store = MemoryStore::new();
        let todo = store.insert(new_todo("buy milk")).unwrap();
        store.delete(&todo).unwrap();
        assert_eq!(store.find_by_id(todo.id).unwrap(), None);

        let next = store.insert(new_todo("walk dog")).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn insert_fails_once_ids_run_out() {
        let store = MemoryStore {
            state: Mutex::new(State {
                next_id: i32::MAX as i64,
                todos: BTreeMap::new(),
            }),
        };
        let last = store.insert(new_todo("last")).unwrap();
        assert_eq!(last.id, i32::MAX);

        let err = store.insert(new_todo("one too many")).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted));
        assert_eq!(store.find_all().unwrap(), vec![last]);
    }
}
