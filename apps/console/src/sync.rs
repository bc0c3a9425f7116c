//! Drives the gateway and applies its results to the owned application state.
//!
//! A mutation and the reload that follows it run under one async lock, so a
//! second create/update/delete cannot interleave with the first one's reload.

use futures::lock::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ActivityGateway, ClientError, ClientResult};
use crate::form::{FormMode, SubmitBlocked};
use crate::models::{Activity, ActivityId, ActivityInput};
use crate::state::StoreHandle;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Blocked(#[from] SubmitBlocked),
    #[error(transparent)]
    Gateway(#[from] ClientError),
}

pub struct ActivitySync<G> {
    gateway: G,
    gate: Mutex<()>,
}

impl<G: ActivityGateway> ActivitySync<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            gate: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Full list fetch. Returns whether the result was applied; `false` means a
    /// newer load superseded it.
    pub async fn reload(&self, store: &impl StoreHandle) -> bool {
        let _guard = self.gate.lock().await;
        self.load(store).await
    }

    pub async fn create(
        &self,
        store: &impl StoreHandle,
        draft: &ActivityInput,
    ) -> ClientResult<Activity> {
        self.mutate(store, "created", self.gateway.create(draft)).await
    }

    pub async fn update(
        &self,
        store: &impl StoreHandle,
        id: &ActivityId,
        draft: &ActivityInput,
    ) -> ClientResult<Activity> {
        self.mutate(store, "updated", self.gateway.update(id, draft))
            .await
    }

    /// A form editing the deleted record falls back to create mode.
    pub async fn delete(&self, store: &impl StoreHandle, id: &ActivityId) -> ClientResult<()> {
        self.mutate(store, "deleted", self.gateway.delete(id)).await?;
        if store.with_form(|form| form.release_deleted(id)) {
            debug!(%id, "edited activity was deleted, form reset");
        }
        Ok(())
    }

    /// Validates the staged form and sends it as a create or an update
    /// depending on the form mode. Nothing reaches the network when the form
    /// is invalid or already submitting.
    pub async fn submit(&self, store: &impl StoreHandle) -> Result<Activity, SubmitError> {
        let submission = match store.with_form(|form| form.begin_submit()) {
            Ok(submission) => submission,
            Err(blocked) => {
                debug!(%blocked, "activity form submission blocked");
                return Err(blocked.into());
            }
        };

        let result = match &submission.mode {
            FormMode::Create => self.create(store, &submission.input).await,
            FormMode::Edit(id) => self.update(store, id, &submission.input).await,
        };

        store.with_form(|form| form.finish_submit(&result));
        Ok(result?)
    }

    async fn mutate<T>(
        &self,
        store: &impl StoreHandle,
        verb: &str,
        call: impl std::future::Future<Output = ClientResult<T>>,
    ) -> ClientResult<T> {
        let _guard = self.gate.lock().await;
        store.set_notice(None);
        store.with_collection(|collection| collection.begin_mutation());

        match call.await {
            Ok(value) => {
                info!(verb, "activity mutation succeeded, reloading");
                store.set_notice(Some(format!("Activity {verb}")));
                self.load(store).await;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, op = ?err.op(), status = ?err.status(), "activity mutation failed");
                store.with_collection(|collection| collection.fail_mutation(&err));
                Err(err)
            }
        }
    }

    async fn load(&self, store: &impl StoreHandle) -> bool {
        let ticket = store.with_collection(|collection| collection.begin_load());
        let result = self.gateway.list().await;

        match &result {
            Ok(items) => info!(count = items.len(), "activities loaded"),
            Err(err) => warn!(error = %err, "activity list failed"),
        }

        store.with_collection(|collection| collection.finish_load(ticket, result))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures::executor::block_on;
    use futures::future::join;
    use reqwest::StatusCode;

    use super::*;
    use crate::api::GatewayOp;
    use crate::fixtures::activities::morning_run_and_reading;
    use crate::form::{ActivityForm, FormField, FormFields};
    use crate::state::{ActivityCollection, LoadStatus};

    /// In-memory stand-in for the REST store.
    #[derive(Default)]
    struct FakeGateway {
        rows: RefCell<Vec<Activity>>,
        next_id: Cell<i64>,
        calls: Cell<usize>,
        fail_list: Cell<bool>,
        reject_create: RefCell<Option<String>>,
        suspend_calls: Cell<bool>,
        trace: RefCell<Vec<&'static str>>,
    }

    /// Returns `Pending` once, waking itself, so other joined futures get a
    /// turn.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                return Poll::Ready(());
            }
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    impl FakeGateway {
        fn seeded(rows: Vec<Activity>) -> Self {
            let next_id = rows.len() as i64 + 1;
            let gateway = Self {
                rows: RefCell::new(rows),
                ..Self::default()
            };
            gateway.next_id.set(next_id);
            gateway
        }

        fn touch(&self) {
            self.calls.set(self.calls.get() + 1);
        }

        fn record(&self, step: &'static str) {
            self.trace.borrow_mut().push(step);
        }

        async fn suspend(&self) {
            if self.suspend_calls.get() {
                YieldOnce(false).await;
            }
        }
    }

    impl ActivityGateway for FakeGateway {
        async fn list(&self) -> ClientResult<Vec<Activity>> {
            self.touch();
            self.record("list-start");
            self.suspend().await;
            self.record("list-end");
            if self.fail_list.get() {
                return Err(ClientError::Http {
                    op: GatewayOp::List,
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: Some("database offline".into()),
                });
            }
            Ok(self.rows.borrow().clone())
        }

        async fn create(&self, draft: &ActivityInput) -> ClientResult<Activity> {
            self.touch();
            self.record("create");
            self.suspend().await;
            if let Some(body) = self.reject_create.borrow().clone() {
                return Err(ClientError::Http {
                    op: GatewayOp::Create,
                    status: StatusCode::BAD_REQUEST,
                    body: Some(body),
                });
            }
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let created = Activity::from_input(ActivityId::Numeric(id), draft.clone());
            self.rows.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: &ActivityId, draft: &ActivityInput) -> ClientResult<Activity> {
            self.touch();
            let mut rows = self.rows.borrow_mut();
            let Some(row) = rows.iter_mut().find(|row| &row.id == id) else {
                return Err(ClientError::NotFound {
                    op: GatewayOp::Update,
                    id: id.clone(),
                });
            };
            *row = Activity::from_input(id.clone(), draft.clone());
            Ok(row.clone())
        }

        async fn delete(&self, id: &ActivityId) -> ClientResult<()> {
            self.touch();
            self.record("delete");
            self.rows.borrow_mut().retain(|row| &row.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestStore {
        collection: RefCell<ActivityCollection>,
        form: RefCell<ActivityForm>,
        notice: RefCell<Option<String>>,
    }

    impl StoreHandle for TestStore {
        fn with_collection<R>(&self, f: impl FnOnce(&mut ActivityCollection) -> R) -> R {
            f(&mut self.collection.borrow_mut())
        }

        fn with_form<R>(&self, f: impl FnOnce(&mut ActivityForm) -> R) -> R {
            f(&mut self.form.borrow_mut())
        }

        fn set_notice(&self, message: Option<String>) {
            *self.notice.borrow_mut() = message;
        }
    }

    fn loaded(sync: &ActivitySync<FakeGateway>) -> TestStore {
        let store = TestStore::default();
        assert!(block_on(sync.reload(&store)));
        store
    }

    fn draft(name: &str) -> ActivityInput {
        ActivityInput {
            name: name.into(),
            description: Some("Sun salutations".into()),
            category: "Exercise".into(),
            date: "2024-01-18".into(),
            duration_minutes: 25,
        }
    }

    #[test]
    fn reload_replaces_items() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);

        let collection = store.collection.borrow();
        assert_eq!(collection.status, LoadStatus::Succeeded);
        assert_eq!(collection.items, morning_run_and_reading());
    }

    #[test]
    fn failed_reload_marks_collection_failed() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        sync.gateway().fail_list.set(true);

        assert!(block_on(sync.reload(&store)));
        let collection = store.collection.borrow();
        assert_eq!(collection.status, LoadStatus::Failed);
        assert_eq!(
            collection.error.as_deref(),
            Some("Error fetching activities: Failed to fetch activities: 500 Internal Server Error")
        );
    }

    #[test]
    fn create_then_list_contains_submitted_fields_and_server_id() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);

        let created = block_on(sync.create(&store, &draft("Yoga"))).unwrap();
        assert_eq!(created.id, ActivityId::Numeric(3));

        let collection = store.collection.borrow();
        assert_eq!(collection.status, LoadStatus::Succeeded);
        let listed = collection
            .items
            .iter()
            .find(|row| row.id == created.id)
            .unwrap();
        assert_eq!(listed.to_input(), draft("Yoga"));
        assert_eq!(store.notice.borrow().as_deref(), Some("Activity created"));
    }

    #[test]
    fn update_of_missing_id_leaves_items_untouched() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        let before = store.collection.borrow().items.clone();

        let err = block_on(sync.update(&store, &ActivityId::Numeric(404), &draft("Ghost")))
            .unwrap_err();
        assert!(err.is_not_found());

        let collection = store.collection.borrow();
        assert_eq!(collection.items, before);
        assert_eq!(collection.status, LoadStatus::Succeeded);
        assert_eq!(
            collection.error.as_deref(),
            Some("Error updating activity: Activity not found")
        );
    }

    #[test]
    fn rejected_create_surfaces_body_text_and_skips_reload() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        *sync.gateway().reject_create.borrow_mut() = Some("Name must be unique".into());
        let calls_before = sync.gateway().calls.get();

        assert!(block_on(sync.create(&store, &draft("Reading"))).is_err());
        assert_eq!(sync.gateway().calls.get(), calls_before + 1);
        assert_eq!(
            store.collection.borrow().error.as_deref(),
            Some("Error creating activity: Name must be unique")
        );
    }

    #[test]
    fn delete_reloads_without_the_row() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);

        block_on(sync.delete(&store, &ActivityId::Numeric(1))).unwrap();
        let names: Vec<String> = store
            .collection
            .borrow()
            .items
            .iter()
            .map(|row| row.name.clone())
            .collect();
        assert_eq!(names, vec!["Reading"]);
    }

    #[test]
    fn invalid_form_issues_no_gateway_call() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = TestStore::default();

        for raw in ["0", "-5", "ten"] {
            store.with_form(|form| {
                form.fields = FormFields {
                    name: "Run".into(),
                    category: "Exercise".into(),
                    date: "2024-01-18".into(),
                    duration_minutes: raw.into(),
                    description: String::new(),
                };
            });

            let err = block_on(sync.submit(&store)).unwrap_err();
            assert!(matches!(err, SubmitError::Blocked(SubmitBlocked::Invalid(_))));
            assert!(store.form.borrow().error(FormField::DurationMinutes).is_some());
        }
        assert_eq!(sync.gateway().calls.get(), 0);
    }

    #[test]
    fn submit_in_edit_mode_updates_and_resets_form() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        let target = store.collection.borrow().items[1].clone();

        store.with_form(|form| {
            assert!(form.start_edit(&target));
            form.set_field(FormField::DurationMinutes, "75".into());
        });

        let saved = block_on(sync.submit(&store)).unwrap();
        assert_eq!(saved.duration_minutes, 75);
        assert_eq!(*store.form.borrow(), ActivityForm::default());
        assert_eq!(store.collection.borrow().items[1].duration_minutes, 75);
    }

    #[test]
    fn failed_submit_keeps_form_contents() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        *sync.gateway().reject_create.borrow_mut() = Some("duplicate".into());

        store.with_form(|form| {
            form.set_field(FormField::Name, "Swim".into());
            form.set_field(FormField::Category, "Exercise".into());
            form.set_field(FormField::Date, "2024-01-18".into());
            form.set_field(FormField::DurationMinutes, "40".into());
        });

        let err = block_on(sync.submit(&store)).unwrap_err();
        assert!(matches!(err, SubmitError::Gateway(_)));
        let form = store.form.borrow();
        assert!(!form.submitting);
        assert_eq!(form.fields.name, "Swim");
    }

    #[test]
    fn overlapping_mutations_wait_for_the_first_reload() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        sync.gateway().suspend_calls.set(true);
        sync.gateway().trace.borrow_mut().clear();

        let yoga = draft("Yoga");
        let first = ActivityId::Numeric(1);
        let (created, deleted) = block_on(join(
            sync.create(&store, &yoga),
            sync.delete(&store, &first),
        ));
        assert!(created.is_ok());
        assert!(deleted.is_ok());

        assert_eq!(
            *sync.gateway().trace.borrow(),
            vec!["create", "list-start", "list-end", "delete", "list-start", "list-end"]
        );
        let collection = store.collection.borrow();
        assert_eq!(collection.status, LoadStatus::Succeeded);
        let names: Vec<&str> = collection.items.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["Reading", "Yoga"]);
    }

    #[test]
    fn later_failure_clears_the_previous_notice() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);

        block_on(sync.create(&store, &draft("Yoga"))).unwrap();
        assert_eq!(store.notice.borrow().as_deref(), Some("Activity created"));

        *sync.gateway().reject_create.borrow_mut() = Some("Name must be unique".into());
        assert!(block_on(sync.create(&store, &draft("Yoga"))).is_err());
        assert_eq!(*store.notice.borrow(), None);

        store.with_collection(|collection| collection.clear_error());
        assert_eq!(*store.notice.borrow(), None);
    }

    #[test]
    fn deleting_the_edited_record_resets_the_form() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        let target = store.collection.borrow().items[0].clone();
        store.with_form(|form| assert!(form.start_edit(&target)));

        block_on(sync.delete(&store, &target.id)).unwrap();
        assert_eq!(*store.form.borrow(), ActivityForm::default());
    }

    #[test]
    fn deleting_another_record_keeps_the_edit() {
        let sync = ActivitySync::new(FakeGateway::seeded(morning_run_and_reading()));
        let store = loaded(&sync);
        let target = store.collection.borrow().items[1].clone();
        store.with_form(|form| assert!(form.start_edit(&target)));

        block_on(sync.delete(&store, &ActivityId::Numeric(1))).unwrap();
        assert_eq!(store.form.borrow().mode, FormMode::Edit(target.id.clone()));
    }
}
