#![allow(non_snake_case)]

mod api;
mod config;
#[cfg(test)]
mod fixtures;
mod form;
mod hooks;
mod models;
mod pipeline;
mod state;
mod sync;
mod ui;

use api::{ActivityClient, ClientError};
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use hooks::activities::{use_activity_loader, use_activity_view};
use once_cell::sync::OnceCell;
use state::AppState;
use sync::ActivitySync;
use tracing::{error, info};
use ui::activity_form::ActivityFormPanel;
use ui::activity_list::ActivityList;
use ui::filters::FilterBar;
use ui::notifications::NotificationCenter;
use ui::statistics::StatisticsPanel;

pub(crate) static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();
pub(crate) static ACTIVITY_SYNC: OnceCell<ActivitySync<ActivityClient>> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    init_logging(config.profile.log_level());
    bootstrap_infrastructure(config);
    launch(App);
}

fn init_logging(level: tracing::Level) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(level);
    });
}

fn bootstrap_infrastructure(config: AppConfig) {
    match ActivityClient::new(&config) {
        Ok(client) => {
            info!(endpoint = client.endpoint(), "activity client initialized");
            let _ = ACTIVITY_SYNC.set(ActivitySync::new(client));
        }
        Err(err) => {
            report_client_error("failed to initialize activity client", &err);
        }
    }

    let _ = APP_CONFIG.set(config);
}

fn report_client_error(context: &str, err: &ClientError) {
    error!(%context, ?err, status = ?err.status(), "api bootstrap error");
}

#[component]
fn App() -> Element {
    let app_state = use_signal(AppState::default);

    use_context_provider(|| app_state);

    rsx! {
        div { class: "relative",
            Router::<Route> {}
            NotificationCenter {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Dashboard {},
}

#[component]
fn Dashboard() -> Element {
    use_activity_loader();
    let view = use_activity_view();

    let api_endpoint = APP_CONFIG
        .get()
        .map(|c| c.activities_endpoint())
        .unwrap_or_else(|| "API endpoint not configured".to_string());

    rsx! {
        div { class: "app-shell mx-auto max-w-6xl space-y-4 p-4",
            header { class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                h1 { class: "text-xl font-semibold text-slate-900", "Activity Tracker" }
                p { class: "text-xs text-slate-500", "API: {api_endpoint}" }
            }
            div { class: "grid gap-4 lg:grid-cols-3",
                div { class: "space-y-4 lg:col-span-1",
                    ActivityFormPanel {}
                    StatisticsPanel { view }
                }
                div { class: "space-y-4 lg:col-span-2",
                    FilterBar {}
                    ActivityList { view }
                }
            }
        }
    }
}
