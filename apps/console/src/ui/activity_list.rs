use dioxus::prelude::*;

use crate::form::FormMode;
use crate::hooks::activities::{delete_activity, reload_activities};
use crate::models::Activity;
use crate::pipeline::Derived;
use crate::state::{use_app_actions, use_app_state, AppActions, LoadStatus};

const DELETE_PROMPT: &str = "Are you sure you want to delete this activity?";

#[component]
pub fn ActivityList(view: Memo<Derived>) -> Element {
    let actions = use_app_actions();
    let state = use_app_state();
    let snapshot = state.read();
    let status = snapshot.activities.status;
    let collection_empty = snapshot.activities.items.is_empty();
    let editing_id = match &snapshot.form.mode {
        FormMode::Edit(id) => Some(id.clone()),
        FormMode::Create => None,
    };
    drop(snapshot);

    let visible = view.read().visible.clone();

    let body = match status {
        LoadStatus::Idle | LoadStatus::Loading => {
            rsx! { p { class: "text-sm text-slate-500", "Loading activities..." } }
        }
        LoadStatus::Failed => rsx! {
            div { class: "space-y-2",
                p { class: "text-sm text-red-500", "Could not load activities." }
                button {
                    class: "rounded border border-slate-300 px-3 py-1 text-xs text-slate-700 hover:bg-slate-100",
                    onclick: move |_| {
                        spawn(reload_activities(actions));
                    },
                    "Retry"
                }
            }
        },
        LoadStatus::Succeeded if collection_empty => rsx! {
            p { class: "text-sm text-slate-500 italic", "No activities yet. Add one to get started!" }
        },
        LoadStatus::Succeeded if visible.is_empty() => rsx! {
            p { class: "text-sm text-slate-500 italic", "No activities match the current filters." }
        },
        LoadStatus::Succeeded => {
            let cards = visible.into_iter().map(|activity| {
                let is_editing = editing_id.as_ref() == Some(&activity.id);
                activity_card(actions, activity, is_editing)
            });
            rsx! {
                div { class: "activities-list space-y-2", {cards} }
            }
        }
    };

    rsx! {
        section { class: "list-section space-y-3",
            h2 { class: "text-lg font-semibold text-slate-900", "Activities" }
            {body}
        }
    }
}

fn activity_card(actions: AppActions, activity: Activity, is_editing: bool) -> Element {
    let key = activity.id.to_string();
    let id = activity.id.clone();
    let card_class = if is_editing {
        "activity-card rounded-lg border border-slate-900 bg-slate-50 p-3 shadow-sm space-y-1"
    } else {
        "activity-card rounded-lg border border-slate-200 bg-white p-3 shadow-sm space-y-1"
    };
    let date_label = activity.display_date();
    let duration = activity.duration_minutes;
    let editable = activity.clone();

    rsx! {
        div { key: "{key}", class: card_class,
            div { class: "flex items-center justify-between gap-2",
                h3 { class: "text-sm font-semibold text-slate-800", "{activity.name}" }
                div { class: "flex gap-1",
                    button {
                        class: "rounded border border-slate-300 px-2 py-0.5 text-[11px] text-slate-700 hover:bg-slate-100",
                        title: "Edit activity",
                        onclick: move |_| actions.start_edit(&editable),
                        "Edit"
                    }
                    button {
                        class: "rounded border border-red-300 px-2 py-0.5 text-[11px] text-red-600 hover:bg-red-50",
                        title: "Delete activity",
                        onclick: move |_| {
                            if confirm_delete() {
                                delete_activity(actions, id.clone());
                            }
                        },
                        "×"
                    }
                }
            }
            div { class: "flex flex-wrap gap-3 text-[11px] text-slate-500",
                span { "{date_label}" }
                span { "{activity.category}" }
                span { "{duration} min" }
            }
            if let Some(description) = activity.description.as_ref() {
                p { class: "text-xs text-slate-600", "{description}" }
            }
        }
    }
}

fn confirm_delete() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };

    window
        .confirm_with_message(DELETE_PROMPT)
        .map_err(|err: wasm_bindgen::JsValue| {
            tracing::warn!(?err, "confirm dialog unavailable");
        })
        .unwrap_or(false)
}
