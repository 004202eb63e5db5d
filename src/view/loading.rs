//! Loading indicator guard.

use crate::ui::UiBinding;

/// Shows the loading indicator for as long as it lives.
///
/// The indicator is hidden again in `Drop`, whichever way the submission ends.
pub struct LoadingGuard<'a> {
    ui: &'a dyn UiBinding,
}

impl<'a> LoadingGuard<'a> {
    pub fn show(ui: &'a dyn UiBinding) -> Self {
        ui.set_loading(true);
        Self { ui }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.ui.set_loading(false);
    }
}
