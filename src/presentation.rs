//! Stateless presentation of a single toast.
//!
//! A [`ToastView`] carries only resolved data plus the two callbacks a surface
//! may wire to its buttons. It never touches provider state directly.

use std::fmt;

use crate::toast::{Callback, ToastRecord};
use crate::types::{Appearance, Platform, ToastId};

pub const DEFAULT_CLOSE_LABEL: &str = "Закрыть уведомление";

/// Accessibility role of the toast container.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Status,
    Alert,
}

/// `aria-live` politeness of the toast container.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Politeness {
    Polite,
    Assertive,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CloseIcon {
    /// 16px iOS-style cross.
    Ios16,
    /// 20px filled cross.
    Filled20,
}

impl CloseIcon {
    #[must_use]
    pub const fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Ios => Self::Ios16,
            Platform::Android => Self::Filled20,
        }
    }

    const fn glyph(self) -> &'static str {
        match self {
            Self::Ios16 => "×",
            Self::Filled20 => "⊗",
        }
    }
}

#[derive(Clone)]
pub struct ToastView {
    pub id: ToastId,
    pub message: String,
    pub description: Option<String>,
    pub appearance: Appearance,
    pub role: Role,
    pub politeness: Politeness,
    pub action_label: Option<String>,
    pub dismissible: bool,
    pub close_icon: CloseIcon,
    pub close_label: String,
    on_close: Callback,
    on_action: Callback,
}

impl ToastView {
    /// Resolve `record` into its visual form.
    ///
    /// `on_close` is wired to the close button; `on_action` to the action
    /// button, and is expected to apply the auto-close rule itself.
    #[must_use]
    pub fn resolve(
        record: &ToastRecord,
        platform: Platform,
        default_close_label: &str,
        on_close: Callback,
        on_action: Callback,
    ) -> Self {
        let options = &record.options;
        let (role, politeness) = if options.appearance.is_error() {
            (Role::Alert, Politeness::Assertive)
        } else {
            (Role::Status, Politeness::Polite)
        };

        Self {
            id: record.id.clone(),
            message: options.message.clone(),
            description: non_empty(options.description.as_deref()),
            appearance: options.appearance,
            role,
            politeness,
            action_label: non_empty(options.action.as_ref().map(|a| a.label.as_str())),
            dismissible: options.dismissible,
            close_icon: CloseIcon::for_platform(platform),
            close_label: options
                .close_button_label
                .clone()
                .unwrap_or_else(|| default_close_label.to_string()),
            on_close,
            on_action,
        }
    }

    /// Close button pressed.
    pub fn close(&self) {
        (self.on_close)();
    }

    /// Action button pressed. No-op when the toast has no visible action.
    pub fn activate_action(&self) {
        if self.action_label.is_some() {
            (self.on_action)();
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

impl fmt::Display for ToastView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.appearance, self.message)?;
        if let Some(description) = &self.description {
            write!(f, " · {description}")?;
        }
        if let Some(label) = &self.action_label {
            write!(f, " [{label}]")?;
        }
        if self.dismissible {
            write!(f, " [{}]", self.close_icon.glyph())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ToastView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastView")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("description", &self.description)
            .field("appearance", &self.appearance)
            .field("role", &self.role)
            .field("action_label", &self.action_label)
            .field("dismissible", &self.dismissible)
            .field("close_icon", &self.close_icon)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{CloseIcon, DEFAULT_CLOSE_LABEL, Politeness, Role, ToastView};
    use crate::toast::{Callback, ToastAction, ToastOptions, ToastRecord};
    use crate::types::{Appearance, Platform, ToastId};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn noop() -> Callback {
        Arc::new(|| {})
    }

    fn view(options: ToastOptions, platform: Platform) -> ToastView {
        let record = ToastRecord::new(ToastId::from("t"), options);
        ToastView::resolve(&record, platform, DEFAULT_CLOSE_LABEL, noop(), noop())
    }

    #[test]
    fn negative_toasts_are_assertive_alerts() {
        let alert = view(
            ToastOptions::new("Failed").appearance(Appearance::Negative),
            Platform::Android,
        );
        assert_eq!(alert.role, Role::Alert);
        assert_eq!(alert.politeness, Politeness::Assertive);

        let status = view(ToastOptions::new("Saved"), Platform::Android);
        assert_eq!(status.role, Role::Status);
        assert_eq!(status.politeness, Politeness::Polite);
    }

    #[test]
    fn close_icon_follows_platform() {
        assert_eq!(view(ToastOptions::new("m"), Platform::Ios).close_icon, CloseIcon::Ios16);
        assert_eq!(
            view(ToastOptions::new("m"), Platform::Android).close_icon,
            CloseIcon::Filled20
        );
    }

    #[test]
    fn blank_description_and_label_are_hidden() {
        let v = view(
            ToastOptions::new("m")
                .description("  ")
                .action(ToastAction::new("")),
            Platform::Android,
        );
        assert!(v.description.is_none());
        assert!(v.action_label.is_none());
        assert_eq!(v.close_label, DEFAULT_CLOSE_LABEL);
    }

    #[test]
    fn action_callback_requires_visible_action() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&hits);
        let on_action: Callback = Arc::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        let hidden = ToastRecord::new(ToastId::from("a"), ToastOptions::new("m"));
        ToastView::resolve(&hidden, Platform::Ios, "x", noop(), Arc::clone(&on_action))
            .activate_action();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let shown = ToastRecord::new(
            ToastId::from("b"),
            ToastOptions::new("m").action(ToastAction::new("Undo")),
        );
        ToastView::resolve(&shown, Platform::Ios, "x", noop(), on_action).activate_action();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn renders_single_line() {
        let v = view(
            ToastOptions::new("Изменения сохранены")
                .description("Можно продолжать работу.")
                .appearance(Appearance::Positive)
                .action(ToastAction::new("Отменить")),
            Platform::Ios,
        );
        insta::assert_snapshot!(v.to_string(), @"[positive] Изменения сохранены · Можно продолжать работу. [Отменить] [×]");

        let plain = view(ToastOptions::new("Offline").dismissible(false), Platform::Android);
        insta::assert_snapshot!(plain.to_string(), @"[neutral] Offline");
    }
}
