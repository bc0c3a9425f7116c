use dioxus::prelude::*;

use crate::form::{ActivityForm, FormField};
use crate::hooks::activities::submit_activity_form;
use crate::state::{use_app_actions, use_app_state, AppActions};

const INPUT_CLASS: &str = "w-full rounded border border-slate-300 px-2 py-1.5 text-sm";
const INPUT_ERROR_CLASS: &str = "w-full rounded border border-red-500 px-2 py-1.5 text-sm";

#[component]
pub fn ActivityFormPanel() -> Element {
    let actions = use_app_actions();
    let form = use_app_state().read().form.clone();

    let editing = form.is_editing();
    let heading = if editing { "Edit Activity" } else { "Add New Activity" };
    let submit_label = match (form.submitting, editing) {
        (true, true) => "Saving...",
        (true, false) => "Adding...",
        (false, true) => "Save Changes",
        (false, false) => "Add Activity",
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        submit_activity_form(actions);
    };

    let description = form.fields.description.clone();

    rsx! {
        section { class: "form-section rounded-lg border border-slate-200 bg-white p-4 shadow-sm space-y-3",
            h2 { class: "text-lg font-semibold text-slate-900", "{heading}" }
            form { class: "space-y-3", onsubmit: on_submit,
                {field_input(actions, &form, FormField::Name, "text")}
                {field_input(actions, &form, FormField::Category, "text")}
                {field_input(actions, &form, FormField::Date, "date")}
                {field_input(actions, &form, FormField::DurationMinutes, "number")}
                div { class: "flex flex-col gap-1",
                    label { class: "text-xs font-semibold text-slate-600", "Description" }
                    textarea {
                        class: INPUT_CLASS,
                        rows: "3",
                        placeholder: "Optional description...",
                        value: "{description}",
                        oninput: move |evt| actions.set_form_field(FormField::Description, evt.value()),
                    }
                }
                div { class: "flex gap-2",
                    button {
                        class: "rounded bg-slate-900 px-4 py-1.5 text-sm font-semibold text-white hover:bg-slate-800 disabled:opacity-50",
                        r#type: "submit",
                        disabled: form.submitting,
                        "{submit_label}"
                    }
                    if editing {
                        button {
                            class: "rounded border border-slate-300 px-4 py-1.5 text-sm text-slate-700 hover:bg-slate-100",
                            r#type: "button",
                            disabled: form.submitting,
                            onclick: move |_| actions.cancel_edit(),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}

fn field_input(
    actions: AppActions,
    form: &ActivityForm,
    field: FormField,
    input_type: &'static str,
) -> Element {
    let label = field.label();
    let value = form.fields.get(field).to_string();
    let error = form.error(field).map(str::to_string);
    let class = if error.is_some() {
        INPUT_ERROR_CLASS
    } else {
        INPUT_CLASS
    };

    rsx! {
        div { class: "flex flex-col gap-1",
            label { class: "text-xs font-semibold text-slate-600",
                "{label} "
                span { class: "text-red-500", "*" }
            }
            input {
                class: "{class}",
                r#type: input_type,
                value: "{value}",
                oninput: move |evt| actions.set_form_field(field, evt.value()),
            }
            if let Some(message) = error {
                span { class: "text-[11px] text-red-500", "{message}" }
            }
        }
    }
}
