use dioxus::prelude::*;

use crate::api::{ClientError, ClientResult};
use crate::form::{ActivityForm, FormField};
use crate::models::Activity;
use crate::pipeline::{CategoryFilter, DateFilter, FilterCriteria, SortOrder};

pub type AppSignal = Signal<AppState>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Sequence number of a list request. Only the newest ticket may apply its
/// result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// The loaded activities plus load status. Items are only ever replaced
/// wholesale by a successful list call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityCollection {
    pub items: Vec<Activity>,
    pub status: LoadStatus,
    pub error: Option<String>,
    latest_ticket: u64,
}

impl ActivityCollection {
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.status = LoadStatus::Loading;
        self.error = None;
        LoadTicket(self.latest_ticket)
    }

    /// Applies a list result. Returns `false` and leaves state untouched when a
    /// newer load has been issued since `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: ClientResult<Vec<Activity>>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding stale activity list response"
            );
            return false;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.status = LoadStatus::Succeeded;
                self.error = None;
            }
            Err(err) => {
                self.status = LoadStatus::Failed;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn begin_mutation(&mut self) {
        self.error = None;
    }

    pub fn fail_mutation(&mut self, err: &ClientError) {
        self.error = Some(err.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub activities: ActivityCollection,
    pub criteria: FilterCriteria,
    pub form: ActivityForm,
    pub notice: Option<String>,
}

/// Write access to the single owned application state. Async flows hold a
/// handle, never a borrow, so no write guard lives across an `.await`.
pub trait StoreHandle {
    fn with_collection<R>(&self, f: impl FnOnce(&mut ActivityCollection) -> R) -> R;

    fn with_form<R>(&self, f: impl FnOnce(&mut ActivityForm) -> R) -> R;

    fn set_notice(&self, message: Option<String>);
}

#[derive(Clone, Copy)]
pub struct AppActions {
    state: AppSignal,
}

impl AppActions {
    pub fn new(state: AppSignal) -> Self {
        Self { state }
    }

    pub fn set_search(&self, search: String) {
        let mut state = self.state;
        state.write().criteria.search = search;
    }

    pub fn select_category(&self, selection: &str) {
        let mut state = self.state;
        state.write().criteria.category = CategoryFilter::from_selection(selection);
    }

    pub fn select_date(&self, selection: &str) {
        let mut state = self.state;
        state.write().criteria.date = DateFilter::from_selection(selection);
    }

    pub fn set_sort(&self, selection: &str) {
        let mut state = self.state;
        state.write().criteria.sort = SortOrder::from_selection(selection);
    }

    pub fn clear_filters(&self) {
        let mut state = self.state;
        state.write().criteria = FilterCriteria::default();
    }

    pub fn set_form_field(&self, field: FormField, value: String) {
        let mut state = self.state;
        state.write().form.set_field(field, value);
    }

    pub fn start_edit(&self, activity: &Activity) {
        let mut state = self.state;
        if !state.write().form.start_edit(activity) {
            tracing::debug!(id = %activity.id, "edit ignored while a submission is in flight");
        }
    }

    pub fn cancel_edit(&self) {
        let mut state = self.state;
        let mut snapshot = state.write();
        if !snapshot.form.submitting {
            snapshot.form.reset();
        }
    }

    pub fn clear_error(&self) {
        let mut state = self.state;
        state.write().activities.clear_error();
    }

    pub fn clear_notice(&self) {
        self.set_notice(None);
    }

    pub fn set_client_unavailable(&self, message: String) {
        let mut state = self.state;
        let mut snapshot = state.write();
        snapshot.activities.status = LoadStatus::Failed;
        snapshot.activities.error = Some(message);
    }
}

impl StoreHandle for AppActions {
    fn with_collection<R>(&self, f: impl FnOnce(&mut ActivityCollection) -> R) -> R {
        let mut state = self.state;
        let mut snapshot = state.write();
        f(&mut snapshot.activities)
    }

    fn with_form<R>(&self, f: impl FnOnce(&mut ActivityForm) -> R) -> R {
        let mut state = self.state;
        let mut snapshot = state.write();
        f(&mut snapshot.form)
    }

    fn set_notice(&self, message: Option<String>) {
        let mut state = self.state;
        state.write().notice = message;
    }
}

pub fn use_app_state() -> AppSignal {
    use_context::<AppSignal>()
}

pub fn use_app_actions() -> AppActions {
    AppActions::new(use_app_state())
}
