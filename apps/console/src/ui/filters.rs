use dioxus::prelude::*;

use crate::hooks::activities::use_filter_options;
use crate::models::format_display_date;
use crate::pipeline::{ALL_CATEGORIES, ALL_DATES};
use crate::state::{use_app_actions, use_app_state};

const SELECT_CLASS: &str = "rounded border border-slate-300 px-2 py-1 text-xs";

#[component]
pub fn FilterBar() -> Element {
    let actions = use_app_actions();
    let criteria = use_app_state().read().criteria.clone();
    let options = use_filter_options().read().clone();

    let search = criteria.search.clone();
    let category = criteria.category.as_selection().to_string();
    let date = criteria.date.as_selection().to_string();
    let sort = criteria.sort.as_str();
    let filtered = !criteria.is_unfiltered();

    rsx! {
        div { class: "flex flex-wrap items-end gap-2 rounded-lg border border-slate-200 bg-white p-3 shadow-sm",
            div { class: "flex flex-col gap-1",
                label { class: "text-[11px] font-semibold text-slate-600", "Search" }
                input {
                    class: "w-48 rounded border border-slate-300 px-2 py-1 text-xs",
                    r#type: "search",
                    placeholder: "Name or description",
                    value: "{search}",
                    oninput: move |evt| actions.set_search(evt.value()),
                }
            }
            div { class: "flex flex-col gap-1",
                label { class: "text-[11px] font-semibold text-slate-600", "Category" }
                select {
                    class: SELECT_CLASS,
                    value: "{category}",
                    onchange: move |evt| actions.select_category(&evt.value()),
                    option { value: ALL_CATEGORIES, selected: category == ALL_CATEGORIES, "All" }
                    for option_value in options.categories.iter() {
                        option {
                            key: "{option_value}",
                            value: "{option_value}",
                            selected: *option_value == category,
                            "{option_value}"
                        }
                    }
                }
            }
            div { class: "flex flex-col gap-1",
                label { class: "text-[11px] font-semibold text-slate-600", "Date" }
                select {
                    class: SELECT_CLASS,
                    value: "{date}",
                    onchange: move |evt| actions.select_date(&evt.value()),
                    option { value: ALL_DATES, selected: date == ALL_DATES, "All dates" }
                    for option_value in options.dates.iter() {
                        option {
                            key: "{option_value}",
                            value: "{option_value}",
                            selected: *option_value == date,
                            {format_display_date(option_value)}
                        }
                    }
                }
            }
            div { class: "flex flex-col gap-1",
                label { class: "text-[11px] font-semibold text-slate-600", "Sort" }
                select {
                    class: SELECT_CLASS,
                    value: "{sort}",
                    onchange: move |evt| actions.set_sort(&evt.value()),
                    option { value: "desc", selected: sort == "desc", "Newest first" }
                    option { value: "asc", selected: sort == "asc", "Oldest first" }
                }
            }
            if filtered {
                button {
                    class: "rounded border border-slate-300 px-3 py-1 text-xs text-slate-700 hover:bg-slate-100",
                    onclick: move |_| actions.clear_filters(),
                    "Clear filters"
                }
            }
        }
    }
}
