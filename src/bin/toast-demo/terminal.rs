use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use maxui_toast::ToastId;
use maxui_toast::presentation::ToastView;
use maxui_toast::viewport::Surface;

/// Prints every viewport frame to stdout and remembers the last one so the
/// script can press its buttons.
#[derive(Default)]
pub struct TerminalSurface {
    current: Mutex<Vec<ToastView>>,
}

impl TerminalSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn find(&self, id: &ToastId) -> Option<ToastView> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|view| &view.id == id)
            .cloned()
    }
}

impl Surface for TerminalSurface {
    fn render(&self, toasts: &[ToastView]) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "--- {} visible", toasts.len());
        for view in toasts {
            let _ = writeln!(out, "{:>24}  {view}", view.id);
        }
        let _ = out.flush();
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = toasts.to_vec();
    }
}
