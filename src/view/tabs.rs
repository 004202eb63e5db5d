//! Exclusive tab switching.

use super::ViewError;

/// Tab holding the camera capture view.
pub const CAMERA_TAB: &str = "camera";

/// Tab holding the file upload form.
pub const UPLOAD_TAB: &str = "upload";

/// One tab: its content panel and its button each carry an active marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    pub name: String,
    pub content_active: bool,
    pub button_active: bool,
}

/// A set of tabs of which exactly one is active once any has been opened.
#[derive(Debug, Clone)]
pub struct TabSet {
    panels: Vec<TabPanel>,
}

impl TabSet {
    /// Create tabs with `initial` active.
    pub fn new<I, S>(names: I, initial: &str) -> Result<Self, ViewError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tabs = Self {
            panels: names
                .into_iter()
                .map(|name| TabPanel {
                    name: name.into(),
                    content_active: false,
                    button_active: false,
                })
                .collect(),
        };
        tabs.open(initial)?;
        Ok(tabs)
    }

    /// Clear every marker, then mark the content and button of `name`.
    ///
    /// An unknown name changes nothing.
    pub fn open(&mut self, name: &str) -> Result<(), ViewError> {
        if !self.panels.iter().any(|p| p.name == name) {
            return Err(ViewError::UnknownTab(name.to_string()));
        }

        for panel in &mut self.panels {
            panel.content_active = false;
            panel.button_active = false;
        }
        for panel in self.panels.iter_mut().filter(|p| p.name == name) {
            panel.content_active = true;
            panel.button_active = true;
        }
        Ok(())
    }

    /// Name of the active tab.
    pub fn active(&self) -> Option<&str> {
        self.panels
            .iter()
            .find(|p| p.content_active)
            .map(|p| p.name.as_str())
    }

    pub fn panels(&self) -> &[TabPanel] {
        &self.panels
    }
}

impl Default for TabSet {
    fn default() -> Self {
        Self {
            panels: vec![
                TabPanel {
                    name: CAMERA_TAB.to_string(),
                    content_active: true,
                    button_active: true,
                },
                TabPanel {
                    name: UPLOAD_TAB.to_string(),
                    content_active: false,
                    button_active: false,
                },
            ],
        }
    }
}
