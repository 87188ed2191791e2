//! Shared small components. The matrix, calendar and collections panels
//! live in their own modules; the capture form, the completion checkbox and
//! the completed list are used across panels and sit here.

pub mod calendar;
pub mod collections;
pub mod matrix;

use eisenplan_core::task::Task;
use uuid::Uuid;
use web_sys::SubmitEvent;
use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html, use_state};

#[derive(Properties, PartialEq)]
pub struct TaskInputProps {
    pub on_add: Callback<String>,
}

/// The capture form at the top of the page. Submitting emits the draft and
/// clears the field; blank drafts are the store's no-op to make.
#[function_component(TaskInput)]
pub fn task_input(props: &TaskInputProps) -> Html {
    let draft = use_state(String::new);

    let oninput = {
        let draft = draft.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_add.emit((*draft).clone());
            draft.set(String::new());
        })
    };

    html! {
        <form class="task-input" {onsubmit}>
            <input
                type="text"
                value={(*draft).clone()}
                {oninput}
                placeholder="New task..."
                aria-label="New task"
            />
            <button type="submit">{ "Add" }</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskCheckboxProps {
    pub checked: bool,
    pub quadrant_class: &'static str,
    pub on_toggle: Callback<()>,
}

#[function_component(TaskCheckbox)]
pub fn task_checkbox(props: &TaskCheckboxProps) -> Html {
    let on_toggle = props.on_toggle.clone();
    html! {
        <div
            class={classes!(
                "checkbox",
                props.quadrant_class,
                props.checked.then_some("checked")
            )}
            role="checkbox"
            aria-checked={if props.checked { "true" } else { "false" }}
            onclick={move |_| on_toggle.emit(())}
        >
            { if props.checked { "✓" } else { "" } }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CompletedListProps {
    pub tasks: Vec<Task>,
    pub on_toggle: Callback<Uuid>,
}

#[function_component(CompletedList)]
pub fn completed_list(props: &CompletedListProps) -> Html {
    html! {
        <div class="panel completed-list">
            <div class="header">{ "Done" }</div>
            {
                if props.tasks.is_empty() {
                    html! { <p class="empty">{ "Nothing done yet." }</p> }
                } else {
                    html! {
                        <>
                            {
                                for props.tasks.iter().map(|task| {
                                    let id = task.id;
                                    let on_toggle = props.on_toggle.clone();
                                    html! {
                                        <div class="task-card done">
                                            <TaskCheckbox
                                                checked={true}
                                                quadrant_class={"quadrant-neutral"}
                                                on_toggle={Callback::from(move |()| on_toggle.emit(id))}
                                            />
                                            <p class="task-text">{ &task.text }</p>
                                        </div>
                                    }
                                })
                            }
                        </>
                    }
                }
            }
        </div>
    }
}
