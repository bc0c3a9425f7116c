use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::models::ActivityId;
use crate::pipeline::{category_options, date_options, derive, Derived};
use crate::state::{use_app_actions, use_app_state, AppActions};
use crate::ACTIVITY_SYNC;

const CLIENT_MISSING: &str = "Activity client is not initialised; check ACTIVITY_API_BASE_URL";

/// Fetches the collection once when the dashboard mounts.
pub fn use_activity_loader() {
    let actions = use_app_actions();

    use_future(move || async move {
        TimeoutFuture::new(0).await;
        reload_activities(actions).await;
    });
}

/// Visible list and statistics for the current criteria.
pub fn use_activity_view() -> Memo<Derived> {
    let state = use_app_state();

    use_memo(move || {
        let snapshot = state.read();
        derive(&snapshot.activities.items, &snapshot.criteria)
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub dates: Vec<String>,
}

/// Dropdown choices, taken from the whole collection rather than the visible
/// subset.
pub fn use_filter_options() -> Memo<FilterOptions> {
    let state = use_app_state();

    use_memo(move || {
        let snapshot = state.read();
        FilterOptions {
            categories: category_options(&snapshot.activities.items),
            dates: date_options(&snapshot.activities.items),
        }
    })
}

pub async fn reload_activities(actions: AppActions) {
    match ACTIVITY_SYNC.get() {
        Some(sync) => {
            sync.reload(&actions).await;
        }
        None => actions.set_client_unavailable(CLIENT_MISSING.into()),
    }
}

pub fn submit_activity_form(actions: AppActions) {
    spawn(async move {
        let Some(sync) = ACTIVITY_SYNC.get() else {
            actions.set_client_unavailable(CLIENT_MISSING.into());
            return;
        };

        if let Err(err) = sync.submit(&actions).await {
            tracing::debug!(%err, "activity form not saved");
        }
    });
}

pub fn delete_activity(actions: AppActions, id: ActivityId) {
    spawn(async move {
        let Some(sync) = ACTIVITY_SYNC.get() else {
            actions.set_client_unavailable(CLIENT_MISSING.into());
            return;
        };

        if let Err(err) = sync.delete(&actions, &id).await {
            tracing::debug!(%id, %err, "activity not deleted");
        }
    });
}
