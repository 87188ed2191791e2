//! The 2x2 priority matrix: four drop-target panels of draggable task
//! cards.

use eisenplan_core::task::{Quadrant, Task};
use eisenplan_core::timegrid;
use uuid::Uuid;
use web_sys::DragEvent;
use yew::{Callback, Html, Properties, classes, function_component, html, use_state};

use super::TaskCheckbox;

/// CSS hook for a quadrant's accent color.
pub fn quadrant_class(quadrant: Quadrant) -> &'static str {
    match quadrant {
        Quadrant::Do => "quadrant-do",
        Quadrant::Schedule => "quadrant-schedule",
        Quadrant::Delegate => "quadrant-delegate",
        Quadrant::Delete => "quadrant-delete",
    }
}

#[derive(Properties, PartialEq)]
pub struct PriorityMatrixProps {
    pub tasks: Vec<Task>,
    pub dragging: Option<Uuid>,
    pub on_drop: Callback<Quadrant>,
    pub on_drag_start: Callback<Uuid>,
    pub on_drag_end: Callback<()>,
    pub on_toggle: Callback<Uuid>,
}

#[function_component(PriorityMatrix)]
pub fn priority_matrix(props: &PriorityMatrixProps) -> Html {
    html! {
        <div class="panel matrix">
            <div class="header">{ "Eisenhower matrix" }</div>
            <div class="matrix-grid">
                {
                    for Quadrant::ALL.iter().map(|quadrant| {
                        let cards: Vec<Task> = props
                            .tasks
                            .iter()
                            .filter(|task| task.quadrant == *quadrant)
                            .cloned()
                            .collect();
                        html! {
                            <QuadrantPanel
                                quadrant={*quadrant}
                                tasks={cards}
                                dragging={props.dragging}
                                on_drop={props.on_drop.clone()}
                                on_drag_start={props.on_drag_start.clone()}
                                on_drag_end={props.on_drag_end.clone()}
                                on_toggle={props.on_toggle.clone()}
                            />
                        }
                    })
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct QuadrantPanelProps {
    pub quadrant: Quadrant,
    pub tasks: Vec<Task>,
    pub dragging: Option<Uuid>,
    pub on_drop: Callback<Quadrant>,
    pub on_drag_start: Callback<Uuid>,
    pub on_drag_end: Callback<()>,
    pub on_toggle: Callback<Uuid>,
}

#[function_component(QuadrantPanel)]
pub fn quadrant_panel(props: &QuadrantPanelProps) -> Html {
    let drag_over = use_state(|| false);
    let quadrant = props.quadrant;

    let ondragover = {
        let drag_over = drag_over.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            if !*drag_over {
                drag_over.set(true);
            }
        })
    };

    let ondragleave = {
        let drag_over = drag_over.clone();
        Callback::from(move |_: DragEvent| {
            drag_over.set(false);
        })
    };

    let ondrop = {
        let drag_over = drag_over.clone();
        let on_drop = props.on_drop.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            drag_over.set(false);
            on_drop.emit(quadrant);
        })
    };

    html! {
        <div
            class={classes!(
                "quadrant",
                quadrant_class(quadrant),
                (*drag_over).then_some("drop-hint")
            )}
            {ondragover}
            {ondragleave}
            {ondrop}
        >
            <div class="quadrant-header">
                <h3>{ quadrant.title() }</h3>
                <p>{ quadrant.hint() }</p>
            </div>
            <div class="quadrant-body">
                {
                    for props.tasks.iter().cloned().map(|task| html! {
                        <MatrixCard
                            task={task.clone()}
                            is_dragging={props.dragging == Some(task.id)}
                            on_drag_start={props.on_drag_start.clone()}
                            on_drag_end={props.on_drag_end.clone()}
                            on_toggle={props.on_toggle.clone()}
                        />
                    })
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MatrixCardProps {
    pub task: Task,
    pub is_dragging: bool,
    pub on_drag_start: Callback<Uuid>,
    pub on_drag_end: Callback<()>,
    pub on_toggle: Callback<Uuid>,
}

#[function_component(MatrixCard)]
pub fn matrix_card(props: &MatrixCardProps) -> Html {
    let task_id = props.task.id;

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

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |()| on_toggle.emit(task_id))
    };

    html! {
        <div
            class={classes!("task-card", props.is_dragging.then_some("dragging"))}
            draggable="true"
            {ondragstart}
            {ondragend}
        >
            <TaskCheckbox
                checked={props.task.completed}
                quadrant_class={quadrant_class(props.task.quadrant)}
                on_toggle={on_toggle}
            />
            <p class="task-text">{ &props.task.text }</p>
            {
                if let Some(time) = props.task.scheduled_time {
                    html! {
                        <span
                            class="chip"
                            title={format!("Planned for {}", timegrid::format_hour(time))}
                        >
                            { timegrid::format_hour(time) }
                        </span>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
