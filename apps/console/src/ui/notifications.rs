use crate::state::{use_app_actions, use_app_state};
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn accent_classes(self) -> (&'static str, &'static str) {
        match self {
            Self::Success => ("border-emerald-500 bg-emerald-50", "text-emerald-700"),
            Self::Error => ("border-red-500 bg-red-50", "text-red-700"),
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ToastProps {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub on_close: EventHandler<MouseEvent>,
}

#[component]
pub fn Toast(props: ToastProps) -> Element {
    let (container_class, accent_text) = props.kind.accent_classes();
    let on_close = props.on_close;

    rsx! {
        div { class: format!("pointer-events-auto rounded-lg border-l-4 p-4 shadow-lg {}", container_class),
            div { class: "flex items-start justify-between gap-4",
                div { class: "space-y-1",
                    h3 { class: format!("text-sm font-semibold {}", accent_text), "{props.title}" }
                    p { class: "text-xs text-slate-700", "{props.message}" }
                }
                button {
                    class: "rounded bg-slate-200 px-2 py-1 text-[11px] text-slate-600 transition hover:bg-slate-300",
                    onclick: move |evt| on_close.call(evt),
                    "Dismiss"
                }
            }
        }
    }
}

/// Error banner for the last failed call, plus a success notice after a
/// saved mutation. The error wins when both are set.
#[component]
pub fn NotificationCenter() -> Element {
    let actions = use_app_actions();
    let state = use_app_state();
    let snapshot = state.read();
    let error = snapshot.activities.error.clone();
    let notice = snapshot.notice.clone();
    drop(snapshot);

    let toast = if let Some(message) = error {
        rsx! {
            Toast {
                key: "activity-error",
                kind: ToastKind::Error,
                title: "Error".to_string(),
                message,
                on_close: move |_| actions.clear_error(),
            }
        }
    } else if let Some(message) = notice {
        rsx! {
            Toast {
                key: "activity-notice",
                kind: ToastKind::Success,
                title: "Done".to_string(),
                message,
                on_close: move |_| actions.clear_notice(),
            }
        }
    } else {
        return rsx! {};
    };

    rsx! {
        div { class: "pointer-events-none fixed right-4 top-4 z-50 flex w-80 flex-col gap-3",
            {toast}
        }
    }
}
