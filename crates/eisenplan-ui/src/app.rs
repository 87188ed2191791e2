//! Root component: owns the stores and gesture sessions and hands mutation
//! callbacks down to the views. Every handler clones the current store,
//! applies one core operation and publishes the result, so a drop or a
//! toggle is fully applied before the next event is processed.

use eisenplan_core::collections::CollectionStore;
use eisenplan_core::interaction::{DragSession, ResizeSession};
use eisenplan_core::store::TaskStore;
use eisenplan_core::task::Quadrant;
use gloo::events::EventListener;
use uuid::Uuid;
use wasm_bindgen::JsCast;
use yew::{Callback, Html, function_component, html, use_effect_with, use_node_ref, use_state};

use crate::components::{CompletedList, TaskInput};
use crate::components::calendar::DayCalendar;
use crate::components::collections::CollectionsPanel;
use crate::components::matrix::PriorityMatrix;

#[function_component(App)]
pub fn app() -> Html {
    let tasks = use_state(TaskStore::with_samples);
    let collections = use_state(CollectionStore::new);
    let drag = use_state(DragSession::new);
    let resize = use_state(ResizeSession::new);
    let calendar_body = use_node_ref();

    let on_add_task = {
        let tasks = tasks.clone();
        Callback::from(move |text: String| {
            let mut store = (*tasks).clone();
            if store.add_task(&text).is_some() {
                tasks.set(store);
            }
        })
    };

    let on_toggle_complete = {
        let tasks = tasks.clone();
        Callback::from(move |id: Uuid| {
            let mut store = (*tasks).clone();
            if store.toggle_completion(id) {
                tasks.set(store);
            }
        })
    };

    let on_drag_start = {
        let drag = drag.clone();
        Callback::from(move |id: Uuid| {
            tracing::debug!(%id, "drag start");
            let mut session = (*drag).clone();
            session.begin(id);
            drag.set(session);
        })
    };

    // The no-op drop path: dragend fires on every drag, including drops
    // outside any registered target.
    let on_drag_end = {
        let drag = drag.clone();
        Callback::from(move |_| {
            let mut session = (*drag).clone();
            session.cancel();
            drag.set(session);
        })
    };

    let on_drop_quadrant = {
        let tasks = tasks.clone();
        let drag = drag.clone();
        Callback::from(move |quadrant: Quadrant| {
            tracing::debug!(quadrant = quadrant.as_key(), "drop on quadrant");
            let mut store = (*tasks).clone();
            let mut session = (*drag).clone();
            if session.drop_on_quadrant(&mut store, quadrant) {
                tasks.set(store);
            }
            drag.set(session);
        })
    };

    let on_drop_calendar = {
        let tasks = tasks.clone();
        let drag = drag.clone();
        Callback::from(move |pixel_y: f64| {
            tracing::debug!(pixel_y, "drop on calendar");
            let mut store = (*tasks).clone();
            let mut session = (*drag).clone();
            if session.drop_on_calendar(&mut store, pixel_y) {
                tasks.set(store);
            }
            drag.set(session);
        })
    };

    let on_resize_start = {
        let resize = resize.clone();
        Callback::from(move |id: Uuid| {
            tracing::debug!(%id, "resize start");
            let mut session = (*resize).clone();
            session.begin(id);
            resize.set(session);
        })
    };

    // Window-scoped move/up listeners, alive exactly while a resize holds a
    // task. The effect re-runs when the session or the store changes and its
    // cleanup drops the listeners on every exit path, unmount included.
    {
        let tasks = tasks.clone();
        let resize = resize.clone();
        let calendar_body = calendar_body.clone();
        use_effect_with(
            ((*resize).clone(), (*tasks).clone()),
            move |(session, _): &(ResizeSession, TaskStore)| {
                let mut listeners = Vec::new();

                if session.active().is_some() {
                    let window = gloo::utils::window();

                    let move_session = session.clone();
                    let move_tasks = tasks.clone();
                    let body = calendar_body.clone();
                    listeners.push(EventListener::new(&window, "mousemove", move |event| {
                        let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() else {
                            return;
                        };
                        let Some(element) = body.cast::<web_sys::Element>() else {
                            return;
                        };
                        let rect = element.get_bounding_client_rect();
                        let pointer_y = f64::from(event.client_y()) - rect.top();

                        let mut store = (*move_tasks).clone();
                        if move_session.update(&mut store, pointer_y) {
                            move_tasks.set(store);
                        }
                    }));

                    let up_resize = resize.clone();
                    listeners.push(EventListener::new(&window, "mouseup", move |_| {
                        let mut session = (*up_resize).clone();
                        session.finish();
                        up_resize.set(session);
                    }));
                }

                move || drop(listeners)
            },
        );
    }

    let on_create_collection = {
        let collections = collections.clone();
        Callback::from(move |name: String| {
            let mut store = (*collections).clone();
            if store.create(&name) {
                collections.set(store);
            }
        })
    };

    let on_add_collection_task = {
        let collections = collections.clone();
        Callback::from(move |(name, text): (String, String)| {
            let mut store = (*collections).clone();
            if store.add_task(&name, &text).is_some() {
                collections.set(store);
            }
        })
    };

    let on_rename_collection = {
        let collections = collections.clone();
        Callback::from(move |(old, new): (String, String)| {
            let mut store = (*collections).clone();
            if store.rename(&old, &new) {
                collections.set(store);
            }
        })
    };

    // The confirmation dialog already happened at the view boundary.
    let on_delete_collection = {
        let collections = collections.clone();
        Callback::from(move |name: String| {
            let mut store = (*collections).clone();
            if store.delete(&name) {
                collections.set(store);
            }
        })
    };

    let on_promote = {
        let collections = collections.clone();
        let tasks = tasks.clone();
        Callback::from(move |(name, id): (String, Uuid)| {
            let mut groups = (*collections).clone();
            let mut store = (*tasks).clone();
            if groups.move_to_plan(&name, id, &mut store) {
                collections.set(groups);
                tasks.set(store);
            }
        })
    };

    let active: Vec<_> = tasks.active().cloned().collect();
    let completed: Vec<_> = tasks.completed().cloned().collect();
    let scheduled: Vec<_> = tasks.scheduled().cloned().collect();
    let groups: Vec<_> = collections.iter().cloned().collect();

    html! {
        <div class="page">
            <header class="page-header">
                <h1>{ "Eisenplan" }</h1>
            </header>

            <main class="page-main">
                <TaskInput on_add={on_add_task} />

                <div class="layout">
                    <div class="layout-column">
                        <PriorityMatrix
                            tasks={active}
                            dragging={drag.active()}
                            on_drop={on_drop_quadrant}
                            on_drag_start={on_drag_start.clone()}
                            on_drag_end={on_drag_end.clone()}
                            on_toggle={on_toggle_complete.clone()}
                        />
                        <CompletedList
                            tasks={completed}
                            on_toggle={on_toggle_complete}
                        />
                    </div>

                    <DayCalendar
                        tasks={scheduled}
                        body_ref={calendar_body}
                        dragging={drag.active()}
                        on_drop={on_drop_calendar}
                        on_drag_start={on_drag_start}
                        on_drag_end={on_drag_end}
                        on_resize_start={on_resize_start}
                    />

                    <CollectionsPanel
                        collections={groups}
                        on_create={on_create_collection}
                        on_add_task={on_add_collection_task}
                        on_rename={on_rename_collection}
                        on_delete={on_delete_collection}
                        on_promote={on_promote}
                    />
                </div>
            </main>

            <footer class="page-footer">
                <p>{ "Structured by the Eisenhower matrix" }</p>
            </footer>
        </div>
    }
}
