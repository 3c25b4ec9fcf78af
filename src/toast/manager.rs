use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::debug;
use uuid::Uuid;

use crate::config::ToastSettings;
use crate::presentation::{DEFAULT_CLOSE_LABEL, ToastView};
use crate::types::{Platform, ToastId};
use crate::viewport::{HostRef, SurfaceRef, Viewport};

use super::id;
use super::options::{Callback, ToastOptions, ToastRecord};
use super::store::NotificationStore;
use super::timers::{TimerRegistry, TimerToken};

pub const DEFAULT_MAX_VISIBLE: usize = 3;
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3_000);

tokio::task_local! {
    static CURRENT: ToastHandle;
}

/// The handle installed by the innermost [`ToastProvider::scope`], or a
/// detached handle when called outside of any scope.
#[must_use]
pub fn use_toast() -> ToastHandle {
    CURRENT.try_with(ToastHandle::clone).unwrap_or_default()
}

struct State {
    store: NotificationStore,
    timers: TimerRegistry,
    revision: u64,
}

struct Shared {
    provider: Uuid,
    default_duration: Duration,
    platform: Platform,
    close_label: String,
    state: Mutex<State>,
    viewport: Viewport,
    this: Weak<Shared>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self) -> ToastHandle {
        ToastHandle {
            shared: self.this.clone(),
        }
    }

    /// Apply `f` under the state lock; when it reports a change, push the
    /// resulting snapshot to the viewport.
    fn mutate(&self, f: impl FnOnce(&mut State) -> bool) {
        let snapshot = {
            let mut state = self.lock();
            if !f(&mut state) {
                return;
            }
            state.revision += 1;
            (state.revision, state.store.list().to_vec())
        };
        let (revision, records) = snapshot;
        self.publish(revision, &records);
    }

    fn publish(&self, revision: u64, records: &[ToastRecord]) {
        let views = records
            .iter()
            .map(|record| {
                let handle = self.handle();
                let close_id = record.id.clone();
                let close_handle = handle.clone();
                let on_close: Callback = Arc::new(move || close_handle.dismiss(&close_id));
                let action_id = record.id.clone();
                let on_action: Callback = Arc::new(move || handle.trigger_action(&action_id));
                ToastView::resolve(record, self.platform, &self.close_label, on_close, on_action)
            })
            .collect();
        self.viewport.render(revision, views);
    }

    fn show(&self, options: ToastOptions) -> ToastId {
        let id = id::resolve(options.id.as_ref());
        let duration = options.duration.unwrap_or(self.default_duration);
        let record = ToastRecord::new(id.clone(), options);

        self.mutate(|state| {
            let replaced = state.store.contains(&id);
            for evicted in state.store.upsert(record) {
                state.timers.cancel(&evicted);
                debug!(provider = %self.provider, toast_id = %evicted, "toast evicted");
            }

            state.timers.cancel(&id);
            if !duration.is_zero() {
                let owner = self.this.clone();
                let expiring = id.clone();
                state.timers.schedule(id.clone(), duration, move |token| {
                    if let Some(shared) = owner.upgrade() {
                        shared.expire(&expiring, token);
                    }
                });
            }

            debug!(
                provider = %self.provider,
                toast_id = %id,
                replaced,
                duration_ms = duration.as_millis(),
                visible = state.store.len(),
                "toast shown"
            );
            true
        });
        id
    }

    fn dismiss(&self, id: &ToastId) {
        self.mutate(|state| {
            let had_timer = state.timers.cancel(id);
            let removed = state.store.remove(id).is_some();
            if removed {
                debug!(provider = %self.provider, toast_id = %id, "toast dismissed");
            }
            removed || had_timer
        });
    }

    fn expire(&self, id: &ToastId, token: TimerToken) {
        self.mutate(|state| {
            if !state.timers.settle(id, token) {
                debug!(provider = %self.provider, toast_id = %id, "stale timer ignored");
                return false;
            }
            debug!(provider = %self.provider, toast_id = %id, "toast expired");
            state.store.remove(id).is_some()
        });
    }

    fn clear(&self) {
        self.mutate(|state| {
            let cancelled = state.timers.cancel_all();
            let removed = state.store.clear();
            debug!(
                provider = %self.provider,
                removed = removed.len(),
                cancelled,
                "toasts cleared"
            );
            !removed.is_empty() || cancelled > 0
        });
    }

    fn trigger_action(&self, id: &ToastId) {
        let action = self
            .lock()
            .store
            .get(id)
            .and_then(|record| record.options.action.clone());
        let Some(action) = action else {
            return;
        };

        // runs unlocked: the callback may call back into the provider
        if let Some(on_click) = &action.on_click {
            on_click();
        }
        if action.auto_close {
            self.dismiss(id);
        }
    }

    fn teardown(&self) {
        let cancelled = {
            let mut state = self.lock();
            state.store.clear();
            state.timers.cancel_all()
        };
        self.viewport.detach();
        debug!(provider = %self.provider, cancelled, "toast provider unmounted");
    }
}

/// Owner of one toast queue. Dropping it is the unmount: every pending timer
/// is cancelled and the viewport is detached.
pub struct ToastProvider {
    shared: Arc<Shared>,
}

impl ToastProvider {
    #[must_use]
    pub fn builder() -> ToastProviderBuilder {
        ToastProviderBuilder::default()
    }

    /// A provider with default settings and no host, i.e. with no visible
    /// output.
    #[must_use]
    pub fn headless() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn handle(&self) -> ToastHandle {
        self.shared.handle()
    }

    #[must_use]
    pub fn provider_id(&self) -> Uuid {
        self.shared.provider
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.shared.viewport.is_attached()
    }

    /// Change the explicit attachment target; a no-op if it is the same
    /// surface as before.
    pub fn set_portal_container(&self, container: Option<SurfaceRef>) {
        self.shared.viewport.set_portal_container(container);
    }

    /// Run `future` with this provider's handle available through
    /// [`use_toast`].
    pub async fn scope<F: Future>(&self, future: F) -> F::Output {
        CURRENT.scope(self.handle(), future).await
    }
}

impl Drop for ToastProvider {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

#[must_use]
pub struct ToastProviderBuilder {
    max_visible: usize,
    default_duration: Duration,
    platform: Platform,
    close_label: String,
    host: Option<HostRef>,
    portal_container: Option<SurfaceRef>,
    runtime: Option<Handle>,
}

impl Default for ToastProviderBuilder {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            default_duration: DEFAULT_DURATION,
            platform: Platform::default(),
            close_label: DEFAULT_CLOSE_LABEL.to_string(),
            host: None,
            portal_container: None,
            runtime: None,
        }
    }
}

impl ToastProviderBuilder {
    pub fn max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible;
        self
    }

    /// Lifetime of toasts shown without an explicit duration.
    /// `Duration::ZERO` disables auto-dismiss by default.
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = label.into();
        self
    }

    pub fn host(mut self, host: HostRef) -> Self {
        self.host = Some(host);
        self
    }

    pub fn portal_container(mut self, container: SurfaceRef) -> Self {
        self.portal_container = Some(container);
        self
    }

    /// Runtime used for auto-dismiss timers. Defaults to the runtime current
    /// at `build` time.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn settings(self, settings: &ToastSettings) -> Self {
        self.max_visible(settings.max_visible)
            .default_duration(settings.default_duration)
            .platform(settings.platform)
            .close_label(settings.close_label.clone())
    }

    #[must_use]
    pub fn build(self) -> ToastProvider {
        let runtime = self.runtime.or_else(|| Handle::try_current().ok());
        let provider = Uuid::now_v7();
        let viewport = Viewport::mount(self.host, self.portal_container);
        debug!(
            %provider,
            max_visible = self.max_visible,
            default_duration_ms = self.default_duration.as_millis(),
            attached = viewport.is_attached(),
            "toast provider mounted"
        );

        let shared = Arc::new_cyclic(|this| Shared {
            provider,
            default_duration: self.default_duration,
            platform: self.platform,
            close_label: self.close_label,
            state: Mutex::new(State {
                store: NotificationStore::new(self.max_visible),
                timers: TimerRegistry::with_runtime(runtime),
                revision: 0,
            }),
            viewport,
            this: this.clone(),
        });
        ToastProvider { shared }
    }
}

/// Control surface handed to consumers.
///
/// Holds no ownership of the provider: once the provider is dropped, or for
/// a handle created with `default()`, every call is accepted and ignored and
/// `show` returns an empty id.
#[derive(Clone, Default)]
pub struct ToastHandle {
    shared: Weak<Shared>,
}

impl ToastHandle {
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.shared.strong_count() == 0
    }

    pub fn show(&self, options: ToastOptions) -> ToastId {
        match self.shared.upgrade() {
            Some(shared) => shared.show(options),
            None => {
                debug!("show on detached toast handle ignored");
                ToastId::default()
            }
        }
    }

    pub fn dismiss(&self, id: &ToastId) {
        if let Some(shared) = self.shared.upgrade() {
            shared.dismiss(id);
        }
    }

    pub fn clear(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.clear();
        }
    }

    /// Press the action button of toast `id`: run its callback, then dismiss
    /// the toast unless the action opted out of auto-close.
    pub fn trigger_action(&self, id: &ToastId) {
        if let Some(shared) = self.shared.upgrade() {
            shared.trigger_action(id);
        }
    }

    /// Visible toasts in render order.
    #[must_use]
    pub fn visible(&self) -> Vec<ToastRecord> {
        self.inspect(|state| state.store.list().to_vec())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn visible_ids(&self) -> Vec<ToastId> {
        self.visible().into_iter().map(|record| record.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inspect(|state| state.store.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.inspect(|state| state.timers.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn has_timer(&self, id: &ToastId) -> bool {
        self.inspect(|state| state.timers.contains(id))
            .unwrap_or_default()
    }

    fn inspect<R>(&self, f: impl FnOnce(&State) -> R) -> Option<R> {
        let shared = self.shared.upgrade()?;
        let state = shared.lock();
        Some(f(&state))
    }
}

impl std::fmt::Debug for ToastHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastHandle")
            .field("detached", &self.is_detached())
            .finish()
    }
}
