use dioxus::prelude::*;

use crate::models::{format_display_date, format_minutes};
use crate::pipeline::{CategoryStat, DateStat, Derived};

#[component]
pub fn StatisticsPanel(view: Memo<Derived>) -> Element {
    let stats = view.read().stats.clone();
    let total_minutes = stats.total_minutes;
    let total_label = format_minutes(total_minutes);
    let total_count = stats.total_count;

    rsx! {
        section { class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm space-y-3",
            h2 { class: "text-lg font-semibold text-slate-900", "Statistics" }
            div { class: "flex flex-wrap gap-6 text-sm text-slate-700",
                div {
                    p { class: "text-[11px] uppercase text-slate-500", "Activities" }
                    p { class: "text-xl font-semibold", "{total_count}" }
                }
                div {
                    p { class: "text-[11px] uppercase text-slate-500", "Total time" }
                    p { class: "text-xl font-semibold", "{total_minutes} min" }
                    p { class: "text-[11px] text-slate-500", "{total_label}" }
                }
            }
            if total_count == 0 {
                p { class: "text-xs text-slate-500 italic", "Nothing to summarize yet." }
            } else {
                div { class: "grid gap-4 md:grid-cols-2",
                    {category_table(&stats.by_category)}
                    {date_table(&stats.by_date)}
                }
            }
        }
    }
}

fn category_table(rows: &[CategoryStat]) -> Element {
    rsx! {
        div { class: "space-y-1",
            h3 { class: "text-sm font-semibold text-slate-800", "By category" }
            table { class: "w-full text-xs text-slate-600",
                thead {
                    tr {
                        th { class: "text-left", "Category" }
                        th { class: "text-right", "Count" }
                        th { class: "text-right", "Minutes" }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        tr { key: "{row.category}",
                            td { "{row.category}" }
                            td { class: "text-right", "{row.count}" }
                            td { class: "text-right", "{row.minutes}" }
                        }
                    }
                }
            }
        }
    }
}

fn date_table(rows: &[DateStat]) -> Element {
    rsx! {
        div { class: "space-y-1",
            h3 { class: "text-sm font-semibold text-slate-800", "By date" }
            table { class: "w-full text-xs text-slate-600",
                thead {
                    tr {
                        th { class: "text-left", "Date" }
                        th { class: "text-right", "Count" }
                        th { class: "text-right", "Minutes" }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        tr { key: "{row.date}",
                            td { {format_display_date(&row.date)} }
                            td { class: "text-right", "{row.count}" }
                            td { class: "text-right", "{row.minutes}" }
                        }
                    }
                }
            }
        }
    }
}
