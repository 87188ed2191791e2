//! Named collections of lightweight someday-tasks, loosely coupled to the
//! planner. A collection task carries no scheduling or quadrant state; the
//! only way across the boundary is [`CollectionStore::move_to_plan`], which
//! deletes here and inserts a fresh default task into the
//! [`TaskStore`](crate::store::TaskStore).
//!
//! Collections keep insertion order (a `Vec`, not a sorted map): the sidebar
//! lists them in the order they were created, and renaming must not move
//! them around.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::store::TaskStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionTask {
    pub id: Uuid,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub tasks: Vec<CollectionTask>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStore {
    collections: Vec<Collection>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection. No-op on a blank or duplicate name.
    pub fn create(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.get(trimmed).is_some() {
            debug!(name, "ignoring collection create");
            return false;
        }
        debug!(name = trimmed, "created collection");
        self.collections.push(Collection {
            name: trimmed.to_string(),
            tasks: Vec::new(),
        });
        true
    }

    /// Appends a task to a collection. No-op on blank text or an unknown
    /// collection.
    pub fn add_task(&mut self, collection: &str, text: &str) -> Option<Uuid> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!(collection, "ignoring blank collection task");
            return None;
        }
        let Some(entry) = self.get_mut(collection) else {
            debug!(collection, "add to unknown collection ignored");
            return None;
        };

        let id = Uuid::new_v4();
        entry.tasks.push(CollectionTask {
            id,
            text: trimmed.to_string(),
        });
        debug!(collection, %id, "added collection task");
        Some(id)
    }

    /// Renames in place, preserving the collection's position and task
    /// order. No-op if the new name is blank, unchanged, or already taken
    /// by another collection.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        let trimmed = new.trim();
        if trimmed.is_empty() || trimmed == old {
            debug!(old, new, "ignoring collection rename");
            return false;
        }
        if self.get(trimmed).is_some() {
            debug!(old, new = trimmed, "rename collides with existing collection");
            return false;
        }
        let Some(entry) = self.get_mut(old) else {
            debug!(old, "rename of unknown collection ignored");
            return false;
        };

        debug!(old, new = trimmed, "renamed collection");
        entry.name = trimmed.to_string();
        true
    }

    /// Removes a collection and all its tasks. Callers gate this behind an
    /// explicit user confirmation; by the time it is called the decision is
    /// final.
    pub fn delete(&mut self, name: &str) -> bool {
        let Some(index) = self.collections.iter().position(|c| c.name == name) else {
            debug!(name, "delete of unknown collection ignored");
            return false;
        };
        let removed = self.collections.remove(index);
        debug!(name, tasks = removed.tasks.len(), "deleted collection");
        true
    }

    /// Promotes a collection task into the planner: removes it here and
    /// captures a fresh task with the default quadrant, no slot and a one
    /// hour duration. No-op if the task is not in the named collection.
    pub fn move_to_plan(&mut self, collection: &str, task_id: Uuid, store: &mut TaskStore) -> bool {
        let Some(entry) = self.get_mut(collection) else {
            debug!(collection, "promote from unknown collection ignored");
            return false;
        };
        let Some(index) = entry.tasks.iter().position(|t| t.id == task_id) else {
            debug!(collection, %task_id, "promote of unknown collection task ignored");
            return false;
        };

        let task = entry.tasks.remove(index);
        debug!(collection, %task_id, text = %task.text, "promoted collection task");
        store.add_task(&task.text).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::CollectionStore;
    use crate::store::TaskStore;
    use crate::task::Quadrant;

    #[test]
    fn create_rejects_blank_and_duplicate_names() {
        let mut store = CollectionStore::new();
        assert!(store.create("Errands"));
        assert!(!store.create("Errands"));
        assert!(!store.create("   "));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn tasks_need_a_known_collection_and_some_text() {
        let mut store = CollectionStore::new();
        store.create("Errands");
        assert!(store.add_task("Errands", "Pick up package").is_some());
        assert!(store.add_task("Errands", "  ").is_none());
        assert!(store.add_task("Groceries", "Milk").is_none());
        assert_eq!(store.get("Errands").expect("collection").tasks.len(), 1);
    }

    #[test]
    fn rename_preserves_position_and_tasks() {
        let mut store = CollectionStore::new();
        store.create("Errands");
        store.create("Reading");
        store.add_task("Reading", "The Name of the Rose");

        assert!(store.rename("Reading", "Books"));
        let names: Vec<&str> = store.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Errands", "Books"]);
        assert_eq!(store.get("Books").expect("collection").tasks.len(), 1);
    }

    #[test]
    fn rename_to_self_or_existing_name_is_a_no_op() {
        let mut store = CollectionStore::new();
        store.create("Errands");
        store.create("Books");
        assert!(!store.rename("Errands", "Errands"));
        assert!(!store.rename("Errands", "Books"));
        assert!(!store.rename("Errands", ""));
        assert!(store.get("Errands").is_some());
    }

    #[test]
    fn delete_takes_the_tasks_with_it() {
        let mut store = CollectionStore::new();
        store.create("Errands");
        store.add_task("Errands", "Pick up package");
        assert!(store.delete("Errands"));
        assert!(!store.delete("Errands"));
        assert!(store.is_empty());
    }

    #[test]
    fn promotion_moves_the_text_into_a_default_task() {
        let mut collections = CollectionStore::new();
        let mut plan = TaskStore::new();
        collections.create("Errands");
        let id = collections
            .add_task("Errands", "Pick up package")
            .expect("added");

        assert!(collections.move_to_plan("Errands", id, &mut plan));
        assert!(collections.get("Errands").expect("collection").tasks.is_empty());

        let task = plan.iter().next().expect("promoted task");
        assert_eq!(task.text, "Pick up package");
        assert_eq!(task.quadrant, Quadrant::Schedule);
        assert_eq!(task.scheduled_time, None);
        assert_eq!(task.duration, 1.0);
        assert!(!task.completed);
    }

    #[test]
    fn promotion_of_a_stale_id_changes_nothing() {
        let mut collections = CollectionStore::new();
        let mut plan = TaskStore::new();
        collections.create("Errands");
        assert!(!collections.move_to_plan("Errands", uuid::Uuid::new_v4(), &mut plan));
        assert!(plan.is_empty());
    }
}
