//! The collections sidebar: named groups of someday-tasks, loosely coupled
//! to the plan. Deleting a collection is the one destructive action in the
//! app and sits behind a confirm dialog at this boundary.

use eisenplan_core::collections::Collection;
use gloo::dialogs::confirm;
use uuid::Uuid;
use web_sys::SubmitEvent;
use yew::{Callback, Html, Properties, TargetCast, function_component, html, use_state};

#[derive(Properties, PartialEq)]
pub struct CollectionsPanelProps {
    pub collections: Vec<Collection>,
    pub on_create: Callback<String>,
    pub on_add_task: Callback<(String, String)>,
    pub on_rename: Callback<(String, String)>,
    pub on_delete: Callback<String>,
    pub on_promote: Callback<(String, Uuid)>,
}

#[function_component(CollectionsPanel)]
pub fn collections_panel(props: &CollectionsPanelProps) -> Html {
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
        let on_create = props.on_create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_create.emit((*draft).clone());
            draft.set(String::new());
        })
    };

    html! {
        <div class="panel collections">
            <div class="header">{ "Collections" }</div>
            <form class="collection-form" {onsubmit}>
                <input
                    type="text"
                    value={(*draft).clone()}
                    {oninput}
                    placeholder="New collection..."
                    aria-label="New collection"
                />
                <button type="submit">{ "Create" }</button>
            </form>
            {
                if props.collections.is_empty() {
                    html! { <p class="empty">{ "No collections yet." }</p> }
                } else {
                    html! {
                        <>
                            {
                                for props.collections.iter().cloned().map(|collection| {
                                    let name = collection.name.clone();
                                    let on_add_task = {
                                        let on_add_task = props.on_add_task.clone();
                                        let name = name.clone();
                                        Callback::from(move |text: String| {
                                            on_add_task.emit((name.clone(), text));
                                        })
                                    };
                                    let on_rename = {
                                        let on_rename = props.on_rename.clone();
                                        let name = name.clone();
                                        Callback::from(move |new: String| {
                                            on_rename.emit((name.clone(), new));
                                        })
                                    };
                                    let on_delete = {
                                        let on_delete = props.on_delete.clone();
                                        let name = name.clone();
                                        Callback::from(move |()| on_delete.emit(name.clone()))
                                    };
                                    let on_promote = {
                                        let on_promote = props.on_promote.clone();
                                        let name = name.clone();
                                        Callback::from(move |id: Uuid| {
                                            on_promote.emit((name.clone(), id));
                                        })
                                    };
                                    html! {
                                        <CollectionCard
                                            collection={collection}
                                            on_add_task={on_add_task}
                                            on_rename={on_rename}
                                            on_delete={on_delete}
                                            on_promote={on_promote}
                                        />
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

#[derive(Properties, PartialEq)]
pub struct CollectionCardProps {
    pub collection: Collection,
    pub on_add_task: Callback<String>,
    pub on_rename: Callback<String>,
    pub on_delete: Callback<()>,
    pub on_promote: Callback<Uuid>,
}

#[function_component(CollectionCard)]
pub fn collection_card(props: &CollectionCardProps) -> Html {
    // `Some` while the rename field is open, holding the draft.
    let renaming = use_state(|| None::<String>);
    let task_draft = use_state(String::new);

    let start_rename = {
        let renaming = renaming.clone();
        let current = props.collection.name.clone();
        Callback::from(move |_: yew::MouseEvent| {
            renaming.set(Some(current.clone()));
        })
    };

    let on_rename_input = {
        let renaming = renaming.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            renaming.set(Some(input.value()));
        })
    };

    let on_rename_submit = {
        let renaming = renaming.clone();
        let on_rename = props.on_rename.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(draft) = (*renaming).clone() {
                on_rename.emit(draft);
            }
            renaming.set(None);
        })
    };

    let on_delete_click = {
        let on_delete = props.on_delete.clone();
        let name = props.collection.name.clone();
        let count = props.collection.tasks.len();
        Callback::from(move |_: yew::MouseEvent| {
            if confirm(&format!(
                "Delete collection \"{name}\" and its {count} task(s)?"
            )) {
                on_delete.emit(());
            }
        })
    };

    let on_task_input = {
        let task_draft = task_draft.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            task_draft.set(input.value());
        })
    };

    let on_task_submit = {
        let task_draft = task_draft.clone();
        let on_add_task = props.on_add_task.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_add_task.emit((*task_draft).clone());
            task_draft.set(String::new());
        })
    };

    html! {
        <div class="collection-card">
            <div class="collection-card-header">
                {
                    if let Some(draft) = (*renaming).clone() {
                        html! {
                            <form class="collection-form" onsubmit={on_rename_submit}>
                                <input
                                    type="text"
                                    value={draft}
                                    oninput={on_rename_input}
                                    aria-label="Collection name"
                                />
                                <button type="submit">{ "Save" }</button>
                            </form>
                        }
                    } else {
                        html! {
                            <>
                                <span class="collection-name">{ &props.collection.name }</span>
                                <span class="badge">{ props.collection.tasks.len() }</span>
                                <button class="ghost" onclick={start_rename}>{ "Rename" }</button>
                                <button class="ghost danger" onclick={on_delete_click}>{ "Delete" }</button>
                            </>
                        }
                    }
                }
            </div>
            <div class="collection-card-body">
                {
                    for props.collection.tasks.iter().map(|task| {
                        let id = task.id;
                        let on_promote = props.on_promote.clone();
                        html! {
                            <div class="collection-task">
                                <p class="task-text">{ &task.text }</p>
                                <button
                                    class="ghost"
                                    title="Move into the plan"
                                    onclick={move |_| on_promote.emit(id)}
                                >
                                    { "Plan" }
                                </button>
                            </div>
                        }
                    })
                }
            </div>
            <form class="collection-form" onsubmit={on_task_submit}>
                <input
                    type="text"
                    value={(*task_draft).clone()}
                    oninput={on_task_input}
                    placeholder="Add to collection..."
                    aria-label="New collection task"
                />
                <button type="submit">{ "Add" }</button>
            </form>
        </div>
    }
}
