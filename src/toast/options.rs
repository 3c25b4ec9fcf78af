use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::types::{Appearance, ToastId};

pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Labeled button carried by a toast.
#[derive(Clone)]
pub struct ToastAction {
    pub label: String,
    pub on_click: Option<Callback>,
    /// Dismiss the toast after `on_click` runs. Defaults to `true`.
    pub auto_close: bool,
}

impl ToastAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
            auto_close: true,
        }
    }

    #[must_use]
    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .field("on_click", &self.on_click.is_some())
            .field("auto_close", &self.auto_close)
            .finish()
    }
}

/// What a caller hands to `show`.
///
/// `duration` left at `None` takes the provider default; `Some(Duration::ZERO)`
/// keeps the toast until it is dismissed.
#[derive(Clone, Debug)]
pub struct ToastOptions {
    pub id: Option<ToastId>,
    pub message: String,
    pub description: Option<String>,
    pub appearance: Appearance,
    pub action: Option<ToastAction>,
    pub dismissible: bool,
    pub duration: Option<Duration>,
    pub close_button_label: Option<String>,
}

impl ToastOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: None,
            message: message.into(),
            description: None,
            appearance: Appearance::default(),
            action: None,
            dismissible: true,
            duration: None,
            close_button_label: None,
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Disable auto-dismiss for this toast.
    #[must_use]
    pub fn persistent(self) -> Self {
        self.duration(Duration::ZERO)
    }

    #[must_use]
    pub fn close_button_label(mut self, label: impl Into<String>) -> Self {
        self.close_button_label = Some(label.into());
        self
    }
}

/// A visible toast: the caller's options plus the resolved identity.
#[derive(Clone, Debug)]
pub struct ToastRecord {
    pub id: ToastId,
    pub options: ToastOptions,
}

impl ToastRecord {
    #[must_use]
    pub const fn new(id: ToastId, options: ToastOptions) -> Self {
        Self { id, options }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.options.message
    }
}
