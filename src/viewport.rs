//! Detached display surface the provider projects its toasts into.
//!
//! The provider never renders in place: it resolves one attachment target
//! per mount (or per change of the explicit target) and pushes snapshots to
//! it. Without a [`Host`] there is nothing to attach to and every push is
//! swallowed.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::presentation::ToastView;

/// Something that can display the current toast set.
///
/// `render` receives the full set every time; implementations replace
/// whatever they showed before.
pub trait Surface: Send + Sync {
    fn render(&self, toasts: &[ToastView]);
}

pub type SurfaceRef = Arc<dyn Surface>;

/// Rendering environment the provider is mounted in.
pub trait Host: Send + Sync {
    /// Nearest ancestor of the provider designated as a UI root, if any.
    fn designated_root(&self) -> Option<SurfaceRef>;

    /// Top-level surface used when no designated root exists.
    fn body(&self) -> SurfaceRef;
}

pub type HostRef = Arc<dyn Host>;

/// Pick the surface the viewport attaches to.
#[must_use]
pub fn resolve_container(host: Option<&dyn Host>, explicit: Option<&SurfaceRef>) -> Option<SurfaceRef> {
    let host = host?;
    if let Some(target) = explicit {
        return Some(Arc::clone(target));
    }
    Some(host.designated_root().unwrap_or_else(|| host.body()))
}

fn same_surface(a: Option<&SurfaceRef>, b: Option<&SurfaceRef>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        _ => false,
    }
}

struct ViewportState {
    explicit: Option<SurfaceRef>,
    attached: Option<SurfaceRef>,
    revision: u64,
    current: Vec<ToastView>,
}

pub struct Viewport {
    host: Option<HostRef>,
    state: Mutex<ViewportState>,
}

impl Viewport {
    #[must_use]
    pub fn mount(host: Option<HostRef>, explicit: Option<SurfaceRef>) -> Self {
        let attached = resolve_container(host.as_deref(), explicit.as_ref());
        debug!(attached = attached.is_some(), "viewport mounted");
        Self {
            host,
            state: Mutex::new(ViewportState {
                explicit,
                attached,
                revision: 0,
                current: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.lock().attached.is_some()
    }

    /// Swap the explicit attachment target.
    ///
    /// Nothing happens when `explicit` is the same surface as before. Otherwise
    /// the old surface is emptied and the new one receives the current set.
    pub fn set_portal_container(&self, explicit: Option<SurfaceRef>) {
        let (previous, next, current) = {
            let mut state = self.lock();
            if same_surface(state.explicit.as_ref(), explicit.as_ref()) {
                return;
            }
            let next = resolve_container(self.host.as_deref(), explicit.as_ref());
            state.explicit = explicit;
            let previous = std::mem::replace(&mut state.attached, next.clone());
            (previous, next, state.current.clone())
        };

        if same_surface(previous.as_ref(), next.as_ref()) {
            return;
        }
        debug!(attached = next.is_some(), "viewport re-attached");
        if let Some(previous) = previous {
            previous.render(&[]);
        }
        if let Some(next) = next {
            next.render(&current);
        }
    }

    /// Push a snapshot taken at `revision`; older snapshots are dropped.
    pub fn render(&self, revision: u64, toasts: Vec<ToastView>) {
        let target = {
            let mut state = self.lock();
            if revision < state.revision {
                return;
            }
            state.revision = revision;
            state.current = toasts;
            state
                .attached
                .clone()
                .map(|surface| (surface, state.current.clone()))
        };

        if let Some((surface, toasts)) = target {
            surface.render(&toasts);
        }
    }

    /// Detach on unmount; the surface is left empty.
    pub fn detach(&self) {
        let previous = {
            let mut state = self.lock();
            state.current.clear();
            state.attached.take()
        };
        if let Some(previous) = previous {
            previous.render(&[]);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Surface that keeps the last rendered set in memory.
#[derive(Default)]
pub struct MemorySurface {
    frames: Mutex<Vec<Vec<String>>>,
    current: Mutex<Vec<ToastView>>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn current(&self) -> Vec<ToastView> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every render so far, each as the display lines of that frame.
    #[must_use]
    pub fn frames(&self) -> Vec<Vec<String>> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last_frame(&self) -> Vec<String> {
        self.frames().pop().unwrap_or_default()
    }
}

impl Surface for MemorySurface {
    fn render(&self, toasts: &[ToastView]) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toasts.iter().map(ToString::to_string).collect());
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = toasts.to_vec();
    }
}

/// Host with a fixed body and an optional designated root.
pub struct StaticHost {
    root: Option<SurfaceRef>,
    body: SurfaceRef,
}

impl StaticHost {
    #[must_use]
    pub fn new(body: SurfaceRef) -> Arc<Self> {
        Arc::new(Self { root: None, body })
    }

    #[must_use]
    pub fn with_root(body: SurfaceRef, root: SurfaceRef) -> Arc<Self> {
        Arc::new(Self {
            root: Some(root),
            body,
        })
    }
}

impl Host for StaticHost {
    fn designated_root(&self) -> Option<SurfaceRef> {
        self.root.clone()
    }

    fn body(&self) -> SurfaceRef {
        Arc::clone(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::{Host, MemorySurface, StaticHost, SurfaceRef, resolve_container, same_surface};
    use std::sync::Arc;

    fn surface() -> (Arc<MemorySurface>, SurfaceRef) {
        let memory = MemorySurface::new();
        let as_ref: SurfaceRef = memory.clone();
        (memory, as_ref)
    }

    #[test]
    fn no_host_means_no_surface() {
        let (_, explicit) = surface();
        assert!(resolve_container(None, Some(&explicit)).is_none());
        assert!(resolve_container(None, None).is_none());
    }

    #[test]
    fn explicit_beats_root_beats_body() {
        let (_, body) = surface();
        let (_, root) = surface();
        let (_, explicit) = surface();

        let host = StaticHost::with_root(body.clone(), root.clone());
        let host: &dyn Host = host.as_ref();
        let picked = resolve_container(Some(host), Some(&explicit));
        assert!(same_surface(picked.as_ref(), Some(&explicit)));
        let picked = resolve_container(Some(host), None);
        assert!(same_surface(picked.as_ref(), Some(&root)));

        let bare = StaticHost::new(body.clone());
        let picked = resolve_container(Some(bare.as_ref()), None);
        assert!(same_surface(picked.as_ref(), Some(&body)));
    }
}
