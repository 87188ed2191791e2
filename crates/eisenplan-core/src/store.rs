//! The authoritative task collection. Nothing else in the workspace mutates
//! tasks; front-ends call the operations here and re-render from the read
//! surface.
//!
//! Invalid input is a silent no-op by design: every mutation reports via its
//! return value whether state changed, and never panics or errors.

use tracing::debug;
use uuid::Uuid;

use crate::task::{Quadrant, Task};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample set shown on first launch: all four quadrants populated,
    /// three tasks on the calendar, one already done.
    pub fn with_samples() -> Self {
        let mut store = Self::new();
        store.push_sample("Finish the project report", Quadrant::Do, false, Some(8.0), 3.0);
        store.push_sample("Book a dentist appointment", Quadrant::Schedule, false, None, 1.0);
        store.push_sample("Sort the inbox", Quadrant::Delegate, false, Some(10.5), 1.0);
        store.push_sample("Scroll social media", Quadrant::Delete, true, None, 1.0);
        store.push_sample("Quick check-in call", Quadrant::Do, false, Some(9.5), 0.5);
        store
    }

    fn push_sample(
        &mut self,
        text: &str,
        quadrant: Quadrant,
        completed: bool,
        scheduled_time: Option<f64>,
        duration: f64,
    ) {
        let mut task = Task::new(text);
        task.quadrant = quadrant;
        task.completed = completed;
        task.scheduled_time = scheduled_time;
        task.duration = duration;
        self.tasks.push(task);
    }

    /// Appends a new task with the capture defaults. No-op on blank text.
    pub fn add_task(&mut self, text: &str) -> Option<Uuid> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("ignoring add of blank task text");
            return None;
        }

        let task = Task::new(trimmed);
        let id = task.id;
        debug!(%id, text = %task.text, "added task");
        self.tasks.push(task);
        Some(id)
    }

    /// Flips completion. The scheduling side effect reads the *pre-toggle*
    /// flag: finishing a task takes it off the calendar, un-finishing keeps
    /// whatever is stored (by then always nothing). Intentionally asymmetric;
    /// see `completing_clears_schedule_uncompleting_preserves_it`.
    pub fn toggle_completion(&mut self, id: Uuid) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "toggle on unknown task ignored");
            return false;
        };

        task.scheduled_time = if task.completed {
            task.scheduled_time
        } else {
            None
        };
        task.completed = !task.completed;
        debug!(%id, completed = task.completed, scheduled = ?task.scheduled_time, "toggled task");
        true
    }

    /// Applies a drop: a new quadrant, a new slot time, or both. Whichever
    /// argument is `None` leaves that field untouched, so a matrix move
    /// never unschedules and a calendar drop never reclassifies.
    pub fn reclassify(&mut self, id: Uuid, quadrant: Option<Quadrant>, time: Option<f64>) -> bool {
        if quadrant.is_none() && time.is_none() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "reclassify on unknown task ignored");
            return false;
        };

        if let Some(quadrant) = quadrant {
            task.quadrant = quadrant;
        }
        if let Some(time) = time {
            task.scheduled_time = Some(time);
        }
        debug!(%id, quadrant = ?task.quadrant, scheduled = ?task.scheduled_time, "reclassified task");
        true
    }

    /// Replaces the duration. The caller has already checked the candidate
    /// against the grid ceiling.
    pub fn resize(&mut self, id: Uuid, duration: f64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "resize on unknown task ignored");
            return false;
        };

        task.duration = duration;
        debug!(%id, duration, "resized task");
        true
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    pub fn in_quadrant(&self, quadrant: Quadrant) -> impl Iterator<Item = &Task> {
        self.active().filter(move |t| t.quadrant == quadrant)
    }

    /// The calendar view: active tasks with a slot.
    pub fn scheduled(&self) -> impl Iterator<Item = &Task> {
        self.active().filter(|t| t.is_scheduled())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::task::Quadrant;

    #[test]
    fn blank_text_is_not_captured() {
        let mut store = TaskStore::new();
        assert_eq!(store.add_task("   "), None);
        assert_eq!(store.add_task(""), None);
        assert!(store.is_empty());
    }

    #[test]
    fn capture_defaults() {
        let mut store = TaskStore::new();
        let id = store.add_task("Buy milk").expect("non-blank add");
        let task = store.get(id).expect("stored task");
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.quadrant, Quadrant::Schedule);
        assert!(!task.completed);
        assert_eq!(task.scheduled_time, None);
        assert_eq!(task.duration, 1.0);
    }

    /// Pins the deliberate asymmetry: the scheduling side effect of a
    /// toggle reads the pre-toggle completion flag.
    #[test]
    fn completing_clears_schedule_uncompleting_preserves_it() {
        let mut store = TaskStore::new();
        let id = store.add_task("Review slides").expect("add");
        store.reclassify(id, None, Some(10.5));

        assert!(store.toggle_completion(id));
        let task = store.get(id).expect("task");
        assert!(task.completed);
        assert_eq!(task.scheduled_time, None);

        assert!(store.toggle_completion(id));
        let task = store.get(id).expect("task");
        assert!(!task.completed);
        assert_eq!(task.scheduled_time, None);
    }

    #[test]
    fn matrix_move_keeps_the_slot() {
        let mut store = TaskStore::new();
        let id = store.add_task("Call the bank").expect("add");
        store.reclassify(id, None, Some(10.5));
        assert!(store.reclassify(id, Some(Quadrant::Do), None));

        let task = store.get(id).expect("task");
        assert_eq!(task.quadrant, Quadrant::Do);
        assert_eq!(task.scheduled_time, Some(10.5));
    }

    #[test]
    fn calendar_drop_keeps_the_quadrant() {
        let mut store = TaskStore::new();
        let id = store.add_task("Water the plants").expect("add");
        store.reclassify(id, Some(Quadrant::Delegate), None);
        assert!(store.reclassify(id, None, Some(14.5)));

        let task = store.get(id).expect("task");
        assert_eq!(task.quadrant, Quadrant::Delegate);
        assert_eq!(task.scheduled_time, Some(14.5));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = TaskStore::new();
        let ghost = uuid::Uuid::new_v4();
        assert!(!store.toggle_completion(ghost));
        assert!(!store.reclassify(ghost, Some(Quadrant::Do), None));
        assert!(!store.resize(ghost, 2.0));
        assert!(store.is_empty());
    }

    #[test]
    fn sample_set_populates_every_view() {
        let store = TaskStore::with_samples();
        assert_eq!(store.len(), 5);
        assert_eq!(store.completed().count(), 1);
        assert_eq!(store.scheduled().count(), 3);
        for quadrant in Quadrant::ALL {
            assert!(store.iter().any(|t| t.quadrant == quadrant));
        }
    }
}
