//! The day calendar: an hour grid from 07:00 to 20:00 with the scheduled
//! tasks absolutely positioned over it. Dropping a card converts the
//! pointer offset below the grid top into a slot; the bottom handle of a
//! block starts a resize.

use eisenplan_core::task::Task;
use eisenplan_core::timegrid::{self, HOUR_HEIGHT};
use uuid::Uuid;
use web_sys::DragEvent;
use yew::{Callback, Html, NodeRef, Properties, classes, function_component, html};

use super::matrix::quadrant_class;

#[derive(Properties, PartialEq)]
pub struct DayCalendarProps {
    /// Active scheduled tasks only; completed ones leave the calendar.
    pub tasks: Vec<Task>,
    /// Owned by the app so the window-scoped resize listeners can measure
    /// against the same element the drop handler does.
    pub body_ref: NodeRef,
    pub dragging: Option<Uuid>,
    pub on_drop: Callback<f64>,
    pub on_drag_start: Callback<Uuid>,
    pub on_drag_end: Callback<()>,
    pub on_resize_start: Callback<Uuid>,
}

#[function_component(DayCalendar)]
pub fn day_calendar(props: &DayCalendarProps) -> Html {
    let ondragover = Callback::from(|event: DragEvent| {
        event.prevent_default();
    });

    let ondrop = {
        let body_ref = props.body_ref.clone();
        let on_drop = props.on_drop.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            let Some(element) = body_ref.cast::<web_sys::Element>() else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            on_drop.emit(f64::from(event.client_y()) - rect.top());
        })
    };

    html! {
        <div class="panel calendar">
            <div class="header">{ "Day plan" }</div>
            <div class="calendar-body" ref={props.body_ref.clone()} {ondragover} {ondrop}>
                {
                    for timegrid::grid_hours().map(|hour| html! {
                        <div class="calendar-hour-row" style={format!("height:{HOUR_HEIGHT}px;")}>
                            <span class="calendar-hour-label">{ format!("{hour}:00") }</span>
                            <div class="calendar-hour-rule">
                                <div class="calendar-half-rule"></div>
                            </div>
                        </div>
                    })
                }
                {
                    for props.tasks.iter().cloned().map(|task| html! {
                        <CalendarBlock
                            task={task.clone()}
                            is_dragging={props.dragging == Some(task.id)}
                            on_drag_start={props.on_drag_start.clone()}
                            on_drag_end={props.on_drag_end.clone()}
                            on_resize_start={props.on_resize_start.clone()}
                        />
                    })
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CalendarBlockProps {
    pub task: Task,
    pub is_dragging: bool,
    pub on_drag_start: Callback<Uuid>,
    pub on_drag_end: Callback<()>,
    pub on_resize_start: Callback<Uuid>,
}

#[function_component(CalendarBlock)]
pub fn calendar_block(props: &CalendarBlockProps) -> Html {
    let Some(start) = props.task.scheduled_time else {
        return html! {};
    };
    let task_id = props.task.id;

    let top = timegrid::task_top_offset(start);
    let height = props.task.duration * HOUR_HEIGHT;
    let end = start + props.task.duration;
    let short = props.task.duration <= 0.5;

    let ondragstart = {
        let on_drag_start = props.on_drag_start.clone();
        Callback::from(move |event: DragEvent| {
            if let Some(data_transfer) = event.data_transfer() {
                let _ = data_transfer.set_data("text/plain", &task_id.to_string());
                data_transfer.set_effect_allowed("move");
            }
            on_drag_start.emit(task_id);
        })
    };

    let ondragend = {
        let on_drag_end = props.on_drag_end.clone();
        Callback::from(move |_: DragEvent| {
            on_drag_end.emit(());
        })
    };

    // The handle press must win over the card's drag start: intercept the
    // mouse-down before it bubbles and let the window listeners take over.
    let on_handle_down = {
        let on_resize_start = props.on_resize_start.clone();
        Callback::from(move |event: yew::MouseEvent| {
            event.prevent_default();
            event.stop_propagation();
            on_resize_start.emit(task_id);
        })
    };

    html! {
        <div
            class={classes!(
                "calendar-block",
                quadrant_class(props.task.quadrant),
                short.then_some("short"),
                props.is_dragging.then_some("dragging")
            )}
            style={format!("top:{top}px;height:{height}px;")}
            draggable="true"
            {ondragstart}
            {ondragend}
        >
            <p class="calendar-block-title" title={props.task.text.clone()}>
                { &props.task.text }
            </p>
            <p class="calendar-block-time">
                { format!("{} - {}", timegrid::format_hour(start), timegrid::format_hour(end)) }
            </p>
            <div class="resize-handle" onmousedown={on_handle_down}></div>
        </div>
    }
}
