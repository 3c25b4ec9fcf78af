mod id;
mod manager;
mod options;
mod store;
mod timers;

pub use manager::{
    DEFAULT_DURATION, DEFAULT_MAX_VISIBLE, ToastHandle, ToastProvider, ToastProviderBuilder,
    use_toast,
};
pub use options::{Callback, ToastAction, ToastOptions, ToastRecord};
pub use store::NotificationStore;
pub use timers::{TimerRegistry, TimerToken};
