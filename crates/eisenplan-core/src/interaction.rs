//! The two single-pointer gesture state machines.
//!
//! Both are two-state (idle / holding a task id) and deliberately forgiving:
//! starting over an active gesture overwrites it (single-pointer input means
//! the previous one can no longer finish), finishing is unconditional on any
//! exit path, and a captured id that has gone stale degrades to a no-op drop.
//! Front-ends feed these from their event layer; the sessions translate
//! pointer geometry through [`timegrid`](crate::timegrid) and apply the
//! result to the [`TaskStore`](crate::store::TaskStore).

use tracing::debug;
use uuid::Uuid;

use crate::store::TaskStore;
use crate::task::Quadrant;
use crate::timegrid;

/// Dragging a task card toward a quadrant or a calendar slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    dragging: Option<Uuid>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Uuid> {
        self.dragging
    }

    /// Captures the dragged task. Last writer wins.
    pub fn begin(&mut self, id: Uuid) {
        debug!(%id, "drag start");
        self.dragging = Some(id);
    }

    /// Drop on one of the four matrix panels: reclassifies, never touches
    /// the slot time. Always returns to idle.
    pub fn drop_on_quadrant(&mut self, store: &mut TaskStore, quadrant: Quadrant) -> bool {
        let Some(id) = self.dragging.take() else {
            return false;
        };
        debug!(%id, quadrant = quadrant.as_key(), "drop on quadrant");
        store.reclassify(id, Some(quadrant), None)
    }

    /// Drop on the calendar body at `pixel_y` below its top edge: schedules
    /// into the nearest slot, never touches the quadrant. Always returns to
    /// idle.
    pub fn drop_on_calendar(&mut self, store: &mut TaskStore, pixel_y: f64) -> bool {
        let Some(id) = self.dragging.take() else {
            return false;
        };
        let slot = timegrid::pixel_offset_to_hour(pixel_y);
        debug!(%id, slot, "drop on calendar");
        store.reclassify(id, None, Some(slot))
    }

    /// The no-op drop path: drop outside any target, or drag end without a
    /// drop. Clears the captured id, mutates nothing.
    pub fn cancel(&mut self) {
        if self.dragging.take().is_some() {
            debug!("drag cancelled");
        }
    }
}

/// Click-dragging the bottom handle of a scheduled block to change its
/// duration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResizeSession {
    resizing: Option<Uuid>,
}

impl ResizeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Uuid> {
        self.resizing
    }

    pub fn begin(&mut self, id: Uuid) {
        debug!(%id, "resize start");
        self.resizing = Some(id);
    }

    /// One pointer-move frame. Recomputes the candidate duration from the
    /// pointer's offset below the calendar top; a candidate that would push
    /// the block past the end of the window is ignored outright (the
    /// ceiling is hard, the block never silently shrinks to fit). Returns
    /// whether the store changed.
    pub fn update(&self, store: &mut TaskStore, pointer_y: f64) -> bool {
        let Some(id) = self.resizing else {
            return false;
        };
        let Some(task) = store.get(id) else {
            debug!(%id, "resize target vanished");
            return false;
        };
        let Some(start) = task.scheduled_time else {
            debug!(%id, "resize target is unscheduled");
            return false;
        };

        let top = timegrid::task_top_offset(start);
        let candidate = timegrid::pixel_delta_to_duration(pointer_y, top);
        if !timegrid::fits_in_grid(start, candidate) {
            debug!(%id, candidate, "resize past end of grid ignored");
            return false;
        }
        if candidate == task.duration {
            return false;
        }

        store.resize(id, candidate)
    }

    /// Pointer release, on any path. Always returns to idle.
    pub fn finish(&mut self) {
        if self.resizing.take().is_some() {
            debug!("resize finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragSession, ResizeSession};
    use crate::store::TaskStore;
    use crate::task::Quadrant;
    use crate::timegrid::{HOUR_HEIGHT, task_top_offset};

    #[test]
    fn drop_without_a_drag_is_a_no_op() {
        let mut store = TaskStore::new();
        let mut drag = DragSession::new();
        assert!(!drag.drop_on_quadrant(&mut store, Quadrant::Do));
        assert!(!drag.drop_on_calendar(&mut store, 120.0));
    }

    #[test]
    fn a_new_drag_overwrites_the_previous_one() {
        let mut store = TaskStore::new();
        let first = store.add_task("first").expect("add");
        let second = store.add_task("second").expect("add");

        let mut drag = DragSession::new();
        drag.begin(first);
        drag.begin(second);
        assert!(drag.drop_on_quadrant(&mut store, Quadrant::Do));

        assert_eq!(store.get(second).expect("task").quadrant, Quadrant::Do);
        assert_eq!(store.get(first).expect("task").quadrant, Quadrant::Schedule);
    }

    #[test]
    fn any_drop_returns_to_idle() {
        let mut store = TaskStore::new();
        let id = store.add_task("task").expect("add");

        let mut drag = DragSession::new();
        drag.begin(id);
        drag.drop_on_calendar(&mut store, 90.0);
        assert_eq!(drag.active(), None);

        drag.begin(id);
        drag.cancel();
        assert_eq!(drag.active(), None);
        assert!(!drag.drop_on_quadrant(&mut store, Quadrant::Delete));
    }

    #[test]
    fn stale_drag_id_drops_harmlessly() {
        let mut store = TaskStore::new();
        let mut drag = DragSession::new();
        drag.begin(uuid::Uuid::new_v4());
        assert!(!drag.drop_on_quadrant(&mut store, Quadrant::Do));
        assert_eq!(drag.active(), None);
    }

    #[test]
    fn resize_accepts_within_the_window_and_rejects_past_it() {
        let mut store = TaskStore::new();
        let id = store.add_task("deep work").expect("add");
        store.reclassify(id, None, Some(9.0));

        let mut resize = ResizeSession::new();
        resize.begin(id);

        // Pointer 2.4h below the block top: candidate 2.5, 9.0 + 2.5 fits.
        let top = task_top_offset(9.0);
        assert!(resize.update(&mut store, top + 2.4 * HOUR_HEIGHT));
        assert_eq!(store.get(id).expect("task").duration, 2.5);

        // Pointer 12h below: candidate 12.0, 9.0 + 12.0 > 20 is ignored.
        assert!(!resize.update(&mut store, top + 12.0 * HOUR_HEIGHT));
        assert_eq!(store.get(id).expect("task").duration, 2.5);

        resize.finish();
        assert_eq!(resize.active(), None);
    }

    #[test]
    fn resize_never_goes_below_half_an_hour() {
        let mut store = TaskStore::new();
        let id = store.add_task("standup").expect("add");
        store.reclassify(id, None, Some(9.0));

        let mut resize = ResizeSession::new();
        resize.begin(id);
        assert!(resize.update(&mut store, task_top_offset(9.0) - 500.0));
        assert_eq!(store.get(id).expect("task").duration, 0.5);
    }

    #[test]
    fn resize_on_unscheduled_or_missing_task_is_ignored() {
        let mut store = TaskStore::new();
        let id = store.add_task("unscheduled").expect("add");

        let mut resize = ResizeSession::new();
        resize.begin(id);
        assert!(!resize.update(&mut store, 300.0));

        resize.begin(uuid::Uuid::new_v4());
        assert!(!resize.update(&mut store, 300.0));
        resize.finish();
        assert_eq!(resize.active(), None);
    }

    #[test]
    fn a_move_that_lands_on_the_same_slot_count_changes_nothing() {
        let mut store = TaskStore::new();
        let id = store.add_task("steady").expect("add");
        store.reclassify(id, None, Some(9.0));

        let mut resize = ResizeSession::new();
        resize.begin(id);
        let top = task_top_offset(9.0);
        assert!(resize.update(&mut store, top + 1.5 * HOUR_HEIGHT));
        assert_eq!(store.get(id).expect("task").duration, 1.5);
        // A couple of pixels of jitter quantizes to the same duration.
        assert!(!resize.update(&mut store, top + 1.5 * HOUR_HEIGHT + 3.0));
        assert_eq!(store.get(id).expect("task").duration, 1.5);
    }
}
